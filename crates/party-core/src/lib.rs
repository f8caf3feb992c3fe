//! # party-core
//!
//! Domain layer for the party archive: nominees, archive photos, emoji reactions,
//! vote events, and the adapter traits the infrastructure crates implement.
//! Nothing in here talks to the network; merge, leader, and tally rules are pure.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    leaders, merge_votes, top_emojis, ArchiveItem, ContentSnapshot, Nominee, NomineeContent,
    ReactionCounts, ReactionRecord, SiteSettings, ToggleOutcome, DEFAULT_TOP_EMOJIS,
};
pub use error::DomainError;
pub use events::{
    EventSink, ReactionChange, ReactionEvent, ReactionSubscription, Subscription, VoteEvent,
    VoteSubscription, DEFAULT_SUBSCRIPTION_BUFFER,
};
pub use traits::{ContentSource, DeviceStore, ReactionRepository, RepoResult, VoteRepository};
pub use value_objects::{Handle, HandleParseError, ReactionEmoji, UnknownEmoji, UserId};
