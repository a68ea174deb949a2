//! Auth Handlers

pub(crate) mod oidc;
pub(crate) mod oidc_callback;
pub(crate) mod oidc_config;
pub(crate) mod refresh;
pub(crate) mod token;
