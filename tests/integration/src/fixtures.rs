//! Test fixtures and in-memory adapters
//!
//! Each fake records what it was asked to do and can be told to fail or to
//! hold a call open, so tests can drive the interleavings they care about.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use party_core::{
    ArchiveItem, ContentSnapshot, ContentSource, DomainError, EventSink, Handle, NomineeContent,
    ReactionChange, ReactionEmoji, ReactionEvent, ReactionRepository, ReactionSubscription,
    RepoResult, SiteSettings, Subscription, ToggleOutcome, UserId, VoteEvent, VoteRepository,
    VoteSubscription, DEFAULT_SUBSCRIPTION_BUFFER,
};
use tokio::sync::oneshot;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Parse a handle, panicking on bad test input
pub fn handle(raw: &str) -> Handle {
    Handle::parse(raw).expect("valid test handle")
}

/// A unique archive photo URL
pub fn photo_url() -> String {
    format!("https://cdn.example.com/archive/{}.jpg", unique_suffix())
}

/// Content with one photo per nominee and `archive` archive photos
pub fn sample_content(handles: &[&str], archive: usize) -> ContentSnapshot {
    ContentSnapshot {
        nominees: handles
            .iter()
            .map(|h| NomineeContent {
                handle: handle(h),
                photo_urls: vec![
                    format!("https://cdn.example.com/{h}/1.jpg"),
                    format!("https://cdn.example.com/{h}/2.jpg"),
                ],
            })
            .collect(),
        archive: (0..archive)
            .map(|i| ArchiveItem {
                url: format!("https://cdn.example.com/archive/{i}.jpg"),
                caption: Some(format!("moment {i}")),
            })
            .collect(),
        settings: SiteSettings::default(),
    }
}

/// Fan an event out to every live sink, forgetting closed ones
async fn broadcast<E: Clone>(sinks: &Mutex<Vec<EventSink<E>>>, event: E) {
    let live: Vec<EventSink<E>> = {
        let mut sinks = sinks.lock();
        sinks.retain(|s| !s.is_closed());
        sinks.clone()
    };
    for sink in live {
        sink.send(event.clone()).await.ok();
    }
}

// ============================================================================
// Content Source
// ============================================================================

/// Content source serving a fixed snapshot
#[derive(Debug, Default)]
pub struct InMemoryContentSource {
    snapshot: Mutex<ContentSnapshot>,
    fail: AtomicBool,
    fetches: AtomicUsize,
}

impl InMemoryContentSource {
    pub fn new(snapshot: ContentSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            ..Self::default()
        }
    }

    pub fn set_snapshot(&self, snapshot: ContentSnapshot) {
        *self.snapshot.lock() = snapshot;
    }

    /// Make every following fetch fail
    pub fn fail_fetches(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for InMemoryContentSource {
    async fn fetch_content(&self) -> RepoResult<ContentSnapshot> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::ContentStoreError("content store unavailable".to_string()));
        }
        Ok(self.snapshot.lock().clone())
    }
}

// ============================================================================
// Vote Store
// ============================================================================

/// Vote store keeping counts in memory and pushing every change
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    votes: Mutex<HashMap<Handle, u64>>,
    sinks: Mutex<Vec<EventSink<VoteEvent>>>,
    fetch_gate: Mutex<Option<oneshot::Receiver<()>>>,
    fail_fetch: AtomicBool,
    fail_increment: AtomicBool,
    increments: AtomicUsize,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a count without emitting an event
    pub fn seed(&self, handle: &Handle, votes: u64) {
        self.votes.lock().insert(handle.clone(), votes);
    }

    pub fn votes_for(&self, handle: &Handle) -> u64 {
        self.votes.lock().get(handle).copied().unwrap_or(0)
    }

    /// Number of increment calls received, successful or not
    pub fn increment_calls(&self) -> usize {
        self.increments.load(Ordering::SeqCst)
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_increments(&self, fail: bool) {
        self.fail_increment.store(fail, Ordering::SeqCst);
    }

    /// Hold the next `fetch_votes` open until the returned sender fires
    pub fn hold_next_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.fetch_gate.lock() = Some(rx);
        tx
    }

    /// Set a count remotely and push it to every subscriber
    pub async fn push(&self, handle: &Handle, votes: u64) {
        self.seed(handle, votes);
        broadcast(&self.sinks, VoteEvent::new(handle.clone(), votes)).await;
    }

    /// Subscribers whose consumer side is still open
    pub fn live_subscribers(&self) -> usize {
        let mut sinks = self.sinks.lock();
        sinks.retain(|s| !s.is_closed());
        sinks.len()
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteStore {
    async fn fetch_votes(&self) -> RepoResult<HashMap<Handle, u64>> {
        let gate = self.fetch_gate.lock().take();
        if let Some(gate) = gate {
            gate.await.ok();
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("vote store unavailable".to_string()));
        }
        Ok(self.votes.lock().clone())
    }

    async fn increment_vote(&self, handle: &Handle) -> RepoResult<()> {
        self.increments.fetch_add(1, Ordering::SeqCst);
        if self.fail_increment.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        let votes = {
            let mut map = self.votes.lock();
            let entry = map.entry(handle.clone()).or_insert(0);
            *entry += 1;
            *entry
        };
        broadcast(&self.sinks, VoteEvent::new(handle.clone(), votes)).await;
        Ok(())
    }

    async fn subscribe(&self) -> RepoResult<VoteSubscription> {
        let (sink, subscription) = Subscription::channel(DEFAULT_SUBSCRIPTION_BUFFER);
        self.sinks.lock().push(sink);
        Ok(subscription)
    }
}

// ============================================================================
// Reaction Ledger
// ============================================================================

/// Reaction ledger keyed by (photo_url, user_id)
#[derive(Debug, Default)]
pub struct InMemoryReactionStore {
    records: tokio::sync::Mutex<HashMap<(String, UserId), String>>,
    sinks: Mutex<Vec<EventSink<ReactionEvent>>>,
    fail_writes: AtomicBool,
    split_toggle: AtomicBool,
}

impl InMemoryReactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw record, bypassing the toggle
    pub async fn insert_raw(&self, photo_url: &str, user_id: UserId, glyph: &str) {
        self.records
            .lock()
            .await
            .insert((photo_url.to_string(), user_id), glyph.to_string());
    }

    /// Number of records stored for a photo
    pub async fn record_count(&self, photo_url: &str) -> usize {
        self.records
            .lock()
            .await
            .keys()
            .filter(|(url, _)| url == photo_url)
            .count()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Release the record lock between the read and the write of a toggle,
    /// so the store alone no longer serializes concurrent toggles
    pub fn split_toggle(&self, split: bool) {
        self.split_toggle.store(split, Ordering::SeqCst);
    }

    pub fn live_subscribers(&self) -> usize {
        let mut sinks = self.sinks.lock();
        sinks.retain(|s| !s.is_closed());
        sinks.len()
    }
}

#[async_trait]
impl ReactionRepository for InMemoryReactionStore {
    async fn find(&self, photo_url: &str, user_id: UserId) -> RepoResult<Option<ReactionEmoji>> {
        let records = self.records.lock().await;
        Ok(records
            .get(&(photo_url.to_string(), user_id))
            .and_then(|glyph| ReactionEmoji::from_glyph(glyph)))
    }

    async fn toggle(
        &self,
        photo_url: &str,
        user_id: UserId,
        emoji: ReactionEmoji,
    ) -> RepoResult<Option<ReactionEmoji>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("write rejected".to_string()));
        }
        let key = (photo_url.to_string(), user_id);
        let existing = {
            let records = self.records.lock().await;
            records.get(&key).and_then(|g| ReactionEmoji::from_glyph(g))
        };
        if self.split_toggle.load(Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        let outcome = ToggleOutcome::decide(existing, emoji);
        let op = {
            let mut records = self.records.lock().await;
            match outcome {
                ToggleOutcome::Insert(e) => {
                    records.insert(key, e.as_str().to_string());
                    ReactionChange::Insert
                }
                ToggleOutcome::Replace(e) => {
                    records.insert(key, e.as_str().to_string());
                    ReactionChange::Update
                }
                ToggleOutcome::Remove => {
                    records.remove(&key);
                    ReactionChange::Delete
                }
            }
        };
        broadcast(
            &self.sinks,
            ReactionEvent {
                photo_url: photo_url.to_string(),
                op,
            },
        )
        .await;
        Ok(outcome.resulting())
    }

    async fn emojis_for_photo(&self, photo_url: &str) -> RepoResult<Vec<String>> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|((url, _), _)| url == photo_url)
            .map(|(_, glyph)| glyph.clone())
            .collect())
    }

    async fn subscribe(&self) -> RepoResult<ReactionSubscription> {
        let (sink, subscription) = Subscription::channel(DEFAULT_SUBSCRIPTION_BUFFER);
        self.sinks.lock().push(sink);
        Ok(subscription)
    }
}
