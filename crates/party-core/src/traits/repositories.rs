//! Adapter traits (ports) - define the interface to every backing store
//!
//! The domain and service layers depend only on these traits; the
//! infrastructure crates provide the implementations, and tests provide
//! in-memory ones. Instances are constructed once per session and injected,
//! never reached through globals.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::ContentSnapshot;
use crate::error::DomainError;
use crate::events::{ReactionSubscription, VoteSubscription};
use crate::value_objects::{Handle, ReactionEmoji, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Content Source
// ============================================================================

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch nominees, archive photos, and site settings in one query
    async fn fetch_content(&self) -> RepoResult<ContentSnapshot>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Current vote count for every nominee row the store knows about
    async fn fetch_votes(&self) -> RepoResult<HashMap<Handle, u64>>;

    /// Ask the store to add one vote for `handle`.
    ///
    /// The caller never adjusts its own copy of the count; the new value
    /// arrives through the change feed or the next fetch.
    async fn increment_vote(&self, handle: &Handle) -> RepoResult<()>;

    /// Open the vote change feed
    async fn subscribe(&self) -> RepoResult<VoteSubscription>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// The user's reaction on a photo, if any
    async fn find(&self, photo_url: &str, user_id: UserId) -> RepoResult<Option<ReactionEmoji>>;

    /// Apply the three-way toggle atomically and return the resulting reaction.
    ///
    /// Implementations must make the read-decide-write a single unit with
    /// respect to other toggles on the same (photo_url, user_id).
    async fn toggle(
        &self,
        photo_url: &str,
        user_id: UserId,
        emoji: ReactionEmoji,
    ) -> RepoResult<Option<ReactionEmoji>>;

    /// Raw stored emoji of every record on a photo
    async fn emojis_for_photo(&self, photo_url: &str) -> RepoResult<Vec<String>>;

    /// Open the reaction change feed (all photos)
    async fn subscribe(&self) -> RepoResult<ReactionSubscription>;
}

// ============================================================================
// Device Store
// ============================================================================

/// Small key/value store that survives across sessions on one device profile
pub trait DeviceStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
}
