//! Auth Config

use std::time::Duration;

use clap::Args;

use storefront_app::auth::{oidc::OidcConfig, tokens::TokenIssuer};

/// Token signing and OIDC settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign access and refresh tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    #[arg(long, env = "ACCESS_TOKEN_TTL_SECONDS", default_value_t = 300)]
    pub access_token_ttl_seconds: u64,

    /// Refresh token lifetime in seconds
    #[arg(long, env = "REFRESH_TOKEN_TTL_SECONDS", default_value_t = 86_400)]
    pub refresh_token_ttl_seconds: u64,

    /// Expected `iss` of OIDC id tokens; demo mode when unset
    #[arg(long, env = "OIDC_ISSUER")]
    pub oidc_issuer: Option<String>,

    /// OIDC client id, also the expected `aud` of id tokens
    #[arg(long, env = "OIDC_CLIENT_ID")]
    pub oidc_client_id: Option<String>,

    /// Secret id tokens are signed with
    #[arg(long, env = "OIDC_CLIENT_SECRET", hide_env_values = true)]
    pub oidc_client_secret: Option<String>,
}

impl AuthConfig {
    /// Build the token issuer from the configured secret and lifetimes.
    #[must_use]
    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            self.jwt_secret.as_bytes(),
            Duration::from_secs(self.access_token_ttl_seconds),
            Duration::from_secs(self.refresh_token_ttl_seconds),
        )
    }

    #[must_use]
    pub fn oidc(&self) -> OidcConfig {
        OidcConfig {
            issuer: self.oidc_issuer.clone(),
            client_id: self.oidc_client_id.clone(),
            client_secret: self.oidc_client_secret.clone(),
        }
    }
}
