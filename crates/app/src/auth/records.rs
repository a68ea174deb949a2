//! User Records

use std::fmt::{Debug, Formatter, Result as FmtResult};

use jiff::Timestamp;

use crate::{domain::customers::records::CustomerRecord, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
///
/// `password_hash` is absent for accounts that only ever signed in through OIDC.
#[derive(Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Debug for UserRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("UserRecord")
            .field("uuid", &self.uuid)
            .field("username", &self.username)
            .field("email", &self.email)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "[redacted]"),
            )
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Access and refresh tokens issued together on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Outcome of an OIDC login.
#[derive(Debug, Clone, PartialEq)]
pub struct OidcLogin {
    pub tokens: TokenPair,
    pub user: UserRecord,

    /// Display name asserted by the identity provider, falling back to the profile name.
    pub name: String,

    pub customer: CustomerRecord,

    /// Whether the user account was created by this login.
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password_hash() {
        let user = UserRecord {
            uuid: UserUuid::new(),
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: Some("$2b$12$secret".to_string()),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        let rendered = format!("{user:?}");

        assert!(!rendered.contains("secret"), "{rendered}");
        assert!(rendered.contains("[redacted]"), "{rendered}");
    }
}
