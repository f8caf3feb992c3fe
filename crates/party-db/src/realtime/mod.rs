//! Real-time change feeds over PostgreSQL `LISTEN`/`NOTIFY`
//!
//! Triggers installed by the migrations publish one JSON payload per row
//! change; [`listener`] turns a channel into a typed [`party_core::Subscription`].

mod listener;

pub use listener::{subscribe_channel, ChangeFeedConfig, Decoder};

/// Channel carrying `{handle, votes}` after every nominee vote change
pub const VOTE_CHANNEL: &str = "nominee_votes";

/// Channel carrying `{photo_url, op}` after every reaction insert/update/delete
pub const REACTION_CHANNEL: &str = "photo_reactions_changed";
