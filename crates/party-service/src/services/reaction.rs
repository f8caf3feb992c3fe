//! Reaction service
//!
//! Emoji reactions on archive photos, one per (photo, device user). The
//! user id is created lazily the first time a reaction is written.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use party_core::{
    top_emojis, ReactionCounts, ReactionEmoji, ReactionSubscription, Subscription, UserId,
    DEFAULT_SUBSCRIPTION_BUFFER,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::timeout::with_timeout;

/// Device store key holding the anonymous user id
pub const USER_ID_KEY: &str = "party.user_id";

type ToggleKey = (String, UserId);

/// Everything a photo overlay shows, fetched together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoSummary {
    pub photo_url: String,
    pub counts: ReactionCounts,
    pub top: Vec<ReactionEmoji>,
    pub total: u64,
    pub mine: Option<ReactionEmoji>,
}

/// Reaction service
#[derive(Debug)]
pub struct ReactionService {
    ctx: ServiceContext,
    user_id: Mutex<Option<UserId>>,
    in_flight: DashMap<ToggleKey, Arc<tokio::sync::Mutex<()>>>,
}

fn require_photo(photo_url: &str) -> ServiceResult<()> {
    if photo_url.trim().is_empty() {
        return Err(ServiceError::validation("photo URL is required"));
    }
    Ok(())
}

impl ReactionService {
    /// Create a new ReactionService
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            user_id: Mutex::new(None),
            in_flight: DashMap::new(),
        }
    }

    // === User identity ===

    /// The persisted user id, if this device has one yet
    fn stored_user_id(&self) -> ServiceResult<Option<UserId>> {
        let mut cached = self.user_id.lock();
        if let Some(id) = *cached {
            return Ok(Some(id));
        }
        let Some(raw) = self.ctx.device_store().get(USER_ID_KEY)? else {
            return Ok(None);
        };
        match UserId::parse(&raw) {
            Ok(id) => {
                *cached = Some(id);
                Ok(Some(id))
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored user id");
                Ok(None)
            }
        }
    }

    /// The user id, created and persisted on first use
    fn user_id(&self) -> ServiceResult<UserId> {
        if let Some(id) = self.stored_user_id()? {
            return Ok(id);
        }
        let mut cached = self.user_id.lock();
        if let Some(id) = *cached {
            return Ok(id);
        }
        let id = UserId::generate();
        self.ctx.device_store().set(USER_ID_KEY, &id.to_string())?;
        *cached = Some(id);
        info!(user_id = %id, "Device user id created");
        Ok(id)
    }

    // === Ledger operations ===

    /// This device's reaction on a photo
    #[instrument(skip(self))]
    pub async fn get_user_reaction(&self, photo_url: &str) -> ServiceResult<Option<ReactionEmoji>> {
        require_photo(photo_url)?;
        // No id yet means no reaction was ever written from this device
        let Some(user) = self.stored_user_id()? else {
            return Ok(None);
        };
        with_timeout(
            self.ctx.operation_timeout(),
            "find_reaction",
            self.ctx.reaction_repo().find(photo_url, user),
        )
        .await
    }

    /// Toggle a reaction: insert, replace with the new emoji, or remove
    /// when the same emoji is chosen again. Returns the resulting reaction.
    #[instrument(skip(self))]
    pub async fn set_reaction(
        &self,
        photo_url: &str,
        emoji: ReactionEmoji,
    ) -> ServiceResult<Option<ReactionEmoji>> {
        require_photo(photo_url)?;
        let user = self.user_id()?;
        let key: ToggleKey = (photo_url.to_string(), user);

        let slot = self.in_flight.entry(key.clone()).or_default().clone();
        let result = {
            let _toggle = slot.lock().await;
            with_timeout(
                self.ctx.operation_timeout(),
                "toggle_reaction",
                self.ctx.reaction_repo().toggle(photo_url, user, emoji),
            )
            .await
        };
        drop(slot);
        self.in_flight
            .remove_if(&key, |_, slot| Arc::strong_count(slot) == 1);

        match &result {
            Ok(now) => debug!(result = ?now, "Reaction toggled"),
            Err(e) => warn!(error = %e, "Reaction toggle failed"),
        }
        result
    }

    /// Per-emoji counts for a photo, all six emoji present
    #[instrument(skip(self))]
    pub async fn get_reaction_counts(&self, photo_url: &str) -> ServiceResult<ReactionCounts> {
        require_photo(photo_url)?;
        let glyphs = with_timeout(
            self.ctx.operation_timeout(),
            "list_reactions",
            self.ctx.reaction_repo().emojis_for_photo(photo_url),
        )
        .await?;
        Ok(ReactionCounts::tally(glyphs))
    }

    /// Most-used emoji, count descending, zero counts dropped
    pub fn get_top_emojis(counts: &ReactionCounts, n: usize) -> Vec<ReactionEmoji> {
        top_emojis(counts, n)
    }

    /// Total reactions across all emoji
    pub fn get_total_count(counts: &ReactionCounts) -> u64 {
        counts.total()
    }

    /// Counts, top emoji, total, and this device's reaction in one call
    #[instrument(skip(self))]
    pub async fn photo_summary(&self, photo_url: &str, top_n: usize) -> ServiceResult<PhotoSummary> {
        let (counts, mine) = tokio::try_join!(
            self.get_reaction_counts(photo_url),
            self.get_user_reaction(photo_url),
        )?;
        Ok(PhotoSummary {
            photo_url: photo_url.to_string(),
            top: Self::get_top_emojis(&counts, top_n),
            total: Self::get_total_count(&counts),
            counts,
            mine,
        })
    }

    /// Live change notices for one photo.
    ///
    /// Dropping or unsubscribing the returned feed releases the underlying
    /// store listener.
    #[instrument(skip(self))]
    pub async fn watch_reactions(&self, photo_url: &str) -> ServiceResult<ReactionSubscription> {
        require_photo(photo_url)?;
        let mut upstream = with_timeout(
            self.ctx.operation_timeout(),
            "subscribe_reactions",
            self.ctx.reaction_repo().subscribe(),
        )
        .await?;

        let (sink, subscription) = Subscription::channel(DEFAULT_SUBSCRIPTION_BUFFER);
        let photo_url = photo_url.to_string();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = sink.closed() => break,
                    event = upstream.recv() => match event {
                        Some(event) if event.photo_url == photo_url => {
                            if sink.send(event).await.is_err() {
                                break;
                            }
                        }
                        Some(_) => {}
                        None => break,
                    }
                }
            }
            debug!(photo_url = %photo_url, "Reaction watch released");
        });

        Ok(subscription)
    }
}
