//! Signed access and refresh tokens.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{errors::AuthServiceError, records::UserUuid};

/// Lifetime of an access token when none is configured.
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(300);

/// Lifetime of a refresh token when none is configured.
pub const DEFAULT_REFRESH_TOKEN_TTL: Duration = Duration::from_secs(86_400);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    iat: i64,
    exp: i64,
    typ: TokenKind,
}

/// Issues and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl Debug for TokenIssuer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[redacted]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Sign a token of the given kind for `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded.
    pub fn issue(&self, user: UserUuid, kind: TokenKind) -> Result<String, AuthServiceError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };

        let issued_at = Timestamp::now().as_second();
        let lifetime = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        self.sign(&Claims {
            sub: user.into_uuid(),
            iat: issued_at,
            exp: issued_at.saturating_add(lifetime),
            typ: kind,
        })
    }

    /// Check the signature, expiry and kind of `token`, returning its subject.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::InvalidToken`] for any token that does not verify.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<UserUuid, AuthServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AuthServiceError::InvalidToken)?
            .claims;

        if claims.typ != kind {
            return Err(AuthServiceError::InvalidToken);
        }

        Ok(UserUuid::from_uuid(claims.sub))
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthServiceError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(AuthServiceError::TokenEncoding)
    }
}
