//! PostgreSQL connection pool management

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use party_common::DatabaseConfig;
use sqlx::error::BoxDynError;
use sqlx::migrate::{MigrateError, Migration, MigrationSource, MigrationType, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Pool tuning not covered by [`DatabaseConfig`]
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// Maximum idle time before a connection is closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Create a new PostgreSQL connection pool with default tuning
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    create_pool_with(config, &PoolOptions::default()).await
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool_with(
    config: &DatabaseConfig,
    options: &PoolOptions,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(options.acquire_timeout)
        .idle_timeout(options.idle_timeout)
        .max_lifetime(options.max_lifetime)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool created"
    );
    Ok(pool)
}

/// Schema scripts compiled into the binary: (version, description, sql)
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    20_260_101_000_000,
    "init",
    include_str!("../../migrations/20260101000000_init.sql"),
)];

/// Migration source backed by [`MIGRATIONS`]
#[derive(Debug)]
struct BundledMigrations;

impl BundledMigrations {
    fn migrations() -> Vec<Migration> {
        MIGRATIONS
            .iter()
            .map(|&(version, description, sql)| {
                Migration::new(
                    version,
                    Cow::Borrowed(description),
                    MigrationType::Simple,
                    Cow::Borrowed(sql),
                    false,
                )
            })
            .collect()
    }
}

impl MigrationSource<'static> for BundledMigrations {
    fn resolve(
        self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Migration>, BoxDynError>> + Send + 'static>> {
        Box::pin(async move { Ok(Self::migrations()) })
    }
}

/// Apply the bundled schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let migrator = Migrator::new(BundledMigrations).await?;
    migrator.run(pool).await?;
    info!(count = MIGRATIONS.len(), "Database migrations applied");
    Ok(())
}
