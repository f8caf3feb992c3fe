//! Test helpers for integration tests
//!
//! Wires the in-memory adapters into a session and provides small polling
//! utilities for asserting on state that settles asynchronously.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use party_common::{try_init_tracing, SessionConfig, TracingConfig};
use party_core::{ContentSnapshot, DeviceStore};
use party_db::MemoryDeviceStore;
use party_service::{ServiceContext, ServiceContextBuilder, Session};

use crate::fixtures::{InMemoryContentSource, InMemoryReactionStore, InMemoryVoteStore};

/// Install a test subscriber once; honours RUST_LOG
pub fn init_test_tracing() {
    try_init_tracing(&TracingConfig::default()).ok();
}

/// Session configuration with short timeouts for tests
pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        operation_timeout_ms: 2_000,
        listener_reconnect_delay_ms: 50,
        fallback_hero_video_url: "https://cdn.example.com/fallback.mp4".to_string(),
    }
}

/// A session over in-memory adapters, with handles on every fake
pub struct TestSession {
    pub content: Arc<InMemoryContentSource>,
    pub votes: Arc<InMemoryVoteStore>,
    pub reactions: Arc<InMemoryReactionStore>,
    pub device: Arc<dyn DeviceStore>,
    pub session: Session,
}

impl TestSession {
    /// Fresh device, given content, no votes
    pub fn new(content: ContentSnapshot) -> Self {
        Self::with_device(content, Arc::new(MemoryDeviceStore::new()))
    }

    /// Use an existing device store, e.g. to simulate a page reload
    pub fn with_device(content: ContentSnapshot, device: Arc<dyn DeviceStore>) -> Self {
        Self::with_stores(
            Arc::new(InMemoryContentSource::new(content)),
            Arc::new(InMemoryVoteStore::new()),
            Arc::new(InMemoryReactionStore::new()),
            device,
        )
    }

    /// Share remote stores between sessions (two visitors, or a reload)
    pub fn with_stores(
        content: Arc<InMemoryContentSource>,
        votes: Arc<InMemoryVoteStore>,
        reactions: Arc<InMemoryReactionStore>,
        device: Arc<dyn DeviceStore>,
    ) -> Self {
        init_test_tracing();
        let ctx = build_context(&content, &votes, &reactions, &device);
        let session = Session::new(ctx).expect("session");
        Self {
            content,
            votes,
            reactions,
            device,
            session,
        }
    }

    /// A second session on the same device and stores, as after a reload
    pub fn reload(&self) -> Self {
        Self::with_stores(
            Arc::clone(&self.content),
            Arc::clone(&self.votes),
            Arc::clone(&self.reactions),
            Arc::clone(&self.device),
        )
    }
}

fn build_context(
    content: &Arc<InMemoryContentSource>,
    votes: &Arc<InMemoryVoteStore>,
    reactions: &Arc<InMemoryReactionStore>,
    device: &Arc<dyn DeviceStore>,
) -> ServiceContext {
    ServiceContextBuilder::new()
        .content(content.clone())
        .vote_repo(votes.clone())
        .reaction_repo(reactions.clone())
        .device_store(Arc::clone(device))
        .session(test_session_config())
        .build()
        .expect("all adapters provided")
}

/// Poll `check` until it holds or `within` elapses
pub async fn eventually<F>(within: Duration, mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + within;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    check()
}

/// Poll an async `check` until it holds or `within` elapses
pub async fn eventually_async<F, Fut>(within: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + within;
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    check().await
}
