//! OpenID Connect demo login.
//!
//! There is no discovery or JWKS fetching: ID tokens are HS256 JWTs signed with the
//! client secret, checked against the configured issuer and client id.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::auth::{data::OidcUserInfo, errors::AuthServiceError};

/// Issuer advertised to clients while no real provider is configured.
pub const DEMO_ISSUER: &str = "https://example-oidc-provider.com";

/// Client id advertised to clients while none is configured.
pub const DEMO_CLIENT_ID: &str = "storefront-client";

pub const OIDC_SCOPE: &str = "openid profile email phone";

#[derive(Clone, Default)]
pub struct OidcConfig {
    pub issuer: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Debug for OidcConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OidcConfig")
            .field("issuer", &self.issuer)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// What a browser client needs to start an OIDC login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcClientConfig {
    pub issuer: String,
    pub client_id: String,
    pub scope: &'static str,

    /// True while no issuer is configured and only user-info assertions are accepted.
    pub demo_mode: bool,
}

impl OidcConfig {
    #[must_use]
    pub fn client_config(&self) -> OidcClientConfig {
        OidcClientConfig {
            issuer: self.issuer.clone().unwrap_or_else(|| DEMO_ISSUER.to_string()),
            client_id: self.client_id().to_string(),
            scope: OIDC_SCOPE,
            demo_mode: self.issuer.is_none(),
        }
    }

    fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or(DEMO_CLIENT_ID)
    }

    /// Verify an ID token and return the identity claims it carries.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::OidcNotConfigured`] without an issuer or client secret,
    /// and [`AuthServiceError::InvalidToken`] when the signature, issuer, audience or
    /// expiry does not check out.
    pub fn verify_id_token(&self, id_token: &str) -> Result<OidcUserInfo, AuthServiceError> {
        let (Some(issuer), Some(secret)) = (&self.issuer, &self.client_secret) else {
            return Err(AuthServiceError::OidcNotConfigured);
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[self.client_id()]);

        decode::<OidcUserInfo>(
            id_token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AuthServiceError::InvalidToken)
    }
}
