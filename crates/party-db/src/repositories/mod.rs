//! PostgreSQL repository implementations

pub(crate) mod error;
mod reaction;
mod vote;

pub use reaction::PgReactionRepository;
pub use vote::PgVoteRepository;
