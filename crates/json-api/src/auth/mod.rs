//! Authentication
//!
//! Token issuance and OIDC login are public. Every other route sits behind
//! [`middleware::handler`], which resolves the bearer token to a user.

mod errors;
pub(crate) mod handlers;
pub(crate) mod middleware;

pub(crate) use handlers::*;
