//! Per-test databases inside one shared Postgres container.

use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

use crate::database;

const USER: &str = "storefront_test";
const PASSWORD: &str = "storefront_test_password";

/// The shared container and the host address it was published on.
struct Server {
    _container: ContainerAsync<PostgresImage>,
    address: String,
}

static SERVER: Lazy<OnceCell<Server>> = Lazy::new(OnceCell::new);

/// Databases waiting to be dropped by the janitor task.
static JANITOR: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Database names are generated, but they are interpolated into DDL so keep them boring.
fn is_safe_database_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name.starts_with(|c: char| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

async fn start_server() -> Server {
    // Module setters live on the image; `with_tag` turns it into a request.
    let container = PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name(USER)
        .with_tag("16-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    Server {
        _container: container,
        address: format!("{host}:{port}"),
    }
}

async fn server_url(database: &str) -> String {
    let server = SERVER.get_or_init(start_server).await;

    format!("postgresql://{USER}:{PASSWORD}@{}/{database}", server.address)
}

async fn start_janitor() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if !is_safe_database_name(&name) {
                continue;
            }

            let Ok(mut conn) = PgConnection::connect(&server_url("postgres").await).await else {
                continue;
            };

            let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
                .execute(&mut conn)
                .await;

            let _ = conn.close().await;
        }
    });

    sender
}

/// A freshly migrated database that is dropped when the value goes out of scope.
///
/// Services commit their own transactions, so isolation comes from every test getting
/// its own database rather than from rollback.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl TestDb {
    pub async fn new() -> Self {
        JANITOR.get_or_init(start_janitor).await;

        let name = format!(
            "storefront_test_{}_{}",
            std::process::id(),
            SEQUENCE.fetch_add(1, Ordering::Relaxed)
        );

        assert!(is_safe_database_name(&name), "unsafe database name {name}");

        let mut conn = PgConnection::connect(&server_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&server_url(&name).await)
            .await
            .expect("Failed to create pool for database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(janitor) = JANITOR.get() {
            let _ = janitor.send(self.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_safe() {
        assert!(is_safe_database_name("storefront_test_42_7"));
    }

    #[test]
    fn unsafe_names_are_refused() {
        assert!(!is_safe_database_name(""));
        assert!(!is_safe_database_name("1starts_with_digit"));
        assert!(!is_safe_database_name("has-hyphen"));
        assert!(!is_safe_database_name("quote\"d"));
        assert!(!is_safe_database_name(&"a".repeat(64)));
    }

    #[tokio::test]
    async fn fresh_database_has_schema() {
        let db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM information_schema.tables \
             WHERE table_name IN ('users', 'customers', 'categories', 'products', 'orders')",
        )
        .fetch_one(db.pool())
        .await
        .expect("Failed to query schema");

        assert_eq!(tables, 5);
    }
}
