//! Categories
//!
//! Categories form a forest: every category has at most one parent and any
//! number of children. Hierarchy queries run over an in-memory [`tree::CategoryTree`]
//! loaded inside the calling transaction.

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
pub(crate) mod repository;
pub mod service;
pub mod tree;

pub use errors::CategoriesServiceError;
pub use service::*;
