//! # party-db
//!
//! Persistence layer implementing the vote and reaction adapter traits with
//! PostgreSQL via SQLx, plus the device-local key/value store.
//!
//! ## Overview
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives and their domain mappers
//! - Repository implementations for votes and reactions
//! - `LISTEN`/`NOTIFY` change feeds delivered as cancellable subscriptions
//! - A JSON-file device store standing in for browser local storage
//!
//! ## Usage
//!
//! ```rust,ignore
//! use party_common::AppConfig;
//! use party_db::{create_pool, run_migrations, ChangeFeedConfig, PgVoteRepository};
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!     let votes = PgVoteRepository::new(pool, ChangeFeedConfig::from(&config.session));
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod realtime;
pub mod repositories;

// Re-export commonly used types
pub use device::{JsonFileDeviceStore, MemoryDeviceStore};
pub use pool::{create_pool, run_migrations, PgPool};
pub use realtime::{ChangeFeedConfig, REACTION_CHANNEL, VOTE_CHANNEL};
pub use repositories::{PgReactionRepository, PgVoteRepository};
