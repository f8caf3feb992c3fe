//! Database models - SQLx-compatible structs for PostgreSQL tables

mod nominee;
mod reaction;

pub use nominee::NomineeVotesModel;
pub use reaction::ReactionModel;
