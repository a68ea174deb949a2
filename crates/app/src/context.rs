//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, oidc::OidcConfig, tokens::TokenIssuer},
    database::{self, Db},
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        customers::{CustomersService, PgCustomersService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
    notifications::NotificationDispatcher,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Settings the services need beyond a database connection.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub tokens: TokenIssuer,
    pub oidc: OidcConfig,

    /// Apply pending migrations before building the services.
    pub migrate: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub customers: Arc<dyn CustomersService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        settings: AppSettings,
        notifications: NotificationDispatcher,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if settings.migrate {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::new(&Db::new(pool), settings, notifications))
    }

    #[must_use]
    pub fn new(db: &Db, settings: AppSettings, notifications: NotificationDispatcher) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(
                db.clone(),
                settings.tokens,
                settings.oidc,
            )),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), notifications)),
        }
    }
}
