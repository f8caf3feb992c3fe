//! Database connection pool

mod postgres;

pub use postgres::{create_pool, create_pool_with, run_migrations, PoolOptions};
pub use sqlx::postgres::PgPool;
