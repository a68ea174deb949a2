//! Auth Data

use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::Deserialize;
use zeroize::Zeroizing;

use crate::{
    auth::{errors::AuthServiceError, records::UserUuid},
    domain::validation::{is_valid_email, is_valid_phone, required_text},
};

/// New User Data
#[derive(Clone)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
}

impl NewUser {
    pub(crate) fn validated(self) -> Result<Self, AuthServiceError> {
        let username = required_text(&self.username)
            .ok_or_else(|| AuthServiceError::Validation("username must not be blank".to_string()))?;

        let email = self.email.trim().to_string();

        if !is_valid_email(&email) {
            return Err(AuthServiceError::Validation(
                "enter a valid email address".to_string(),
            ));
        }

        if self.password.is_empty() {
            return Err(AuthServiceError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        Ok(Self {
            username,
            email,
            ..self
        })
    }
}

impl Debug for NewUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NewUser")
            .field("uuid", &self.uuid)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Username and password presented at login.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Claims about the caller asserted by an identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OidcUserInfo {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub given_name: Option<String>,

    #[serde(default)]
    pub family_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub phone_number: Option<String>,
}

/// What the caller presented to the OIDC login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OidcAssertion {
    /// Demo mode: the caller states who they are.
    UserInfo(OidcUserInfo),

    /// An ID token signed with the configured client secret.
    IdToken(String),
}

/// Normalised identity extracted from [`OidcUserInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OidcIdentity {
    pub(crate) email: String,

    /// May be empty when the provider sent no name at all.
    pub(crate) name: String,

    /// May be empty when the provider sent no phone number.
    pub(crate) phone: String,
}

impl OidcUserInfo {
    pub(crate) fn identity(&self) -> Result<OidcIdentity, AuthServiceError> {
        let Some(email) = self.email.as_deref().and_then(required_text) else {
            return Err(AuthServiceError::Validation(
                "email is required from the identity provider".to_string(),
            ));
        };

        if !is_valid_email(&email) {
            return Err(AuthServiceError::Validation(
                "enter a valid email address".to_string(),
            ));
        }

        let name = self.name.as_deref().and_then(required_text).unwrap_or_else(|| {
            [self.given_name.as_deref(), self.family_name.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        });

        let phone = self
            .phone
            .as_deref()
            .or(self.phone_number.as_deref())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        if !phone.is_empty() && !is_valid_phone(&phone) {
            return Err(AuthServiceError::Validation(
                "phone number must be entered in the format '+999999999'. \
                 Up to 15 digits allowed."
                    .to_string(),
            ));
        }

        Ok(OidcIdentity { email, name, phone })
    }
}
