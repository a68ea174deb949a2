//! Authentication

pub mod data;
mod errors;
pub mod oidc;
pub mod password;
pub mod records;
mod repository;
mod service;
pub mod tokens;
mod users;

pub use errors::*;
pub use records::UserUuid;
pub use service::*;
pub use users::*;
