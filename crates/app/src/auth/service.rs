//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        data::{Credentials, OidcAssertion},
        errors::AuthServiceError,
        oidc::{OidcClientConfig, OidcConfig},
        password::verify_password,
        records::{OidcLogin, TokenPair, UserRecord, UserUuid},
        repository::PgAuthRepository,
        tokens::{TokenIssuer, TokenKind},
    },
    database::Db,
    domain::customers::{
        data::NewCustomer,
        records::{CustomerRecord, CustomerUuid},
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    customers: PgCustomersRepository,
    tokens: TokenIssuer,
    oidc: OidcConfig,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, tokens: TokenIssuer, oidc: OidcConfig) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            customers: PgCustomersRepository::new(),
            tokens,
            oidc,
        }
    }

    fn token_pair(&self, user: UserUuid) -> Result<TokenPair, AuthServiceError> {
        Ok(TokenPair {
            access: self.tokens.issue(user, TokenKind::Access)?,
            refresh: self.tokens.issue(user, TokenKind::Refresh)?,
        })
    }

    /// Resolve a verified token subject to a user that still exists.
    async fn existing_user(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = match self.repository.get_user(&mut tx, user).await {
            Err(sqlx::Error::RowNotFound) => return Err(AuthServiceError::InvalidToken),
            result => result?,
        };

        tx.commit().await?;

        Ok(user)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let user = self.tokens.verify(bearer_token, TokenKind::Access)?;

        Ok(self.existing_user(user).await?.uuid)
    }

    async fn obtain_token(&self, credentials: Credentials) -> Result<TokenPair, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_username(&mut tx, credentials.username.trim())
            .await?;

        tx.commit().await?;

        let Some(UserRecord {
            uuid,
            password_hash: Some(hash),
            ..
        }) = user
        else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(credentials.password, hash).await? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.token_pair(uuid)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<String, AuthServiceError> {
        let user = self.tokens.verify(refresh_token, TokenKind::Refresh)?;
        let user = self.existing_user(user).await?;

        self.tokens.issue(user.uuid, TokenKind::Access)
    }

    async fn oidc_login(&self, assertion: OidcAssertion) -> Result<OidcLogin, AuthServiceError> {
        let info = match assertion {
            OidcAssertion::UserInfo(info) => info,
            OidcAssertion::IdToken(id_token) => self.oidc.verify_id_token(&id_token)?,
        };

        let identity = info.identity()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .insert_user_if_missing(&mut tx, UserUuid::new(), &identity.email, &identity.email)
            .await?;

        // The email may be free while the username is held by another account.
        let user = self
            .repository
            .find_user_by_email(&mut tx, &identity.email)
            .await?
            .ok_or(AuthServiceError::AlreadyExists)?;

        let customer = match self
            .customers
            .find_customer_for_user(&mut tx, user.uuid)
            .await?
        {
            Some(existing) => {
                let name = Some(identity.name.as_str())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(existing.name.as_str())
                    .to_string();

                let phone = Some(identity.phone.as_str())
                    .filter(|phone| !phone.is_empty())
                    .unwrap_or(existing.phone.as_str())
                    .to_string();

                if name == existing.name && phone == existing.phone {
                    existing
                } else {
                    self.customers
                        .update_contact_details(&mut tx, existing.uuid, &name, &phone)
                        .await?
                }
            }
            None => {
                let name = if identity.name.is_empty() {
                    identity.email.clone()
                } else {
                    identity.name.clone()
                };

                self.customers
                    .create_customer(
                        &mut tx,
                        &NewCustomer {
                            uuid: CustomerUuid::new(),
                            user_uuid: user.uuid,
                            name,
                            email: identity.email.clone(),
                            phone: identity.phone.clone(),
                        },
                    )
                    .await?
            }
        };

        tx.commit().await?;

        info!(user = %user.uuid, customer = %customer.uuid, created, "oidc login");

        Ok(OidcLogin {
            tokens: self.token_pair(user.uuid)?,
            name: display_name(&identity.name, &customer),
            user,
            customer,
            created,
        })
    }

    fn oidc_config(&self) -> OidcClientConfig {
        self.oidc.client_config()
    }
}

fn display_name(asserted: &str, customer: &CustomerRecord) -> String {
    if asserted.is_empty() {
        customer.name.clone()
    } else {
        asserted.to_string()
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve an access token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;

    /// Exchange a username and password for an access/refresh token pair.
    async fn obtain_token(&self, credentials: Credentials) -> Result<TokenPair, AuthServiceError>;

    /// Exchange a refresh token for a new access token.
    async fn refresh_token(&self, refresh_token: &str) -> Result<String, AuthServiceError>;

    /// Get or create the user and customer profile behind an OIDC assertion.
    async fn oidc_login(&self, assertion: OidcAssertion) -> Result<OidcLogin, AuthServiceError>;

    fn oidc_config(&self) -> OidcClientConfig;
}
