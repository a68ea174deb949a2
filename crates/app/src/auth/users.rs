//! User accounts with password logins.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        data::NewUser, errors::AuthServiceError, password::hash_password, records::UserRecord,
        repository::PgAuthRepository,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AuthServiceError> {
        let user = user.validated()?;
        let hash = hash_password(user.password).await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, user.uuid, &user.username, &user.email, Some(&hash))
            .await?;

        tx.commit().await?;

        info!(user = %created.uuid, username = %created.username, "user created");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create a user that signs in with a username and password.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AuthServiceError>;
}
