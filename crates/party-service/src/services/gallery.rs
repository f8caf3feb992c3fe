//! Gallery state and the vote merge protocol
//!
//! The nominee list is built from two independent fetches (content and vote
//! counts) and then patched by pushed vote events. Pushed values are kept in
//! an overlay keyed by handle and re-applied after every merge, so an event
//! that lands before the initial load finishes is never lost.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use party_core::{
    leaders, merge_votes, ArchiveItem, ContentSnapshot, DomainError, Handle, Nominee,
    SiteSettings, VoteEvent,
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::lightbox::ArchiveLightbox;
use super::timeout::with_timeout;
use super::vote::VoteGuard;

/// Where the gallery is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Load failed; the gallery renders empty and is not retried automatically
    Failed,
}

/// One nominee as a renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NomineeView {
    pub handle: Handle,
    pub photo_urls: Vec<String>,
    pub current_photo: Option<String>,
    /// Hidden until this device has voted
    pub votes: Option<u64>,
    pub is_leader: bool,
}

/// Snapshot of the whole gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    pub load_state: LoadState,
    pub has_voted: bool,
    pub nominees: Vec<NomineeView>,
    pub archive: Vec<ArchiveItem>,
    pub hero_video_url: String,
}

#[derive(Debug)]
struct GalleryState {
    load_state: LoadState,
    nominees: Vec<Nominee>,
    archive: Vec<ArchiveItem>,
    settings: SiteSettings,
    pushed: HashMap<Handle, u64>,
    photo_index: HashMap<Handle, usize>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            load_state: LoadState::Idle,
            nominees: Vec::new(),
            archive: Vec::new(),
            settings: SiteSettings::default(),
            pushed: HashMap::new(),
            photo_index: HashMap::new(),
        }
    }
}

impl GalleryState {
    fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
        // Anything pushed from here on is newer than what the fetch returns
        self.pushed.clear();
    }

    /// Install a successful load: merge, then re-apply pushed values.
    ///
    /// Counts never decrease, so a pushed value only replaces a smaller
    /// fetched one. Every carousel starts again at its first photo.
    fn install(&mut self, snapshot: ContentSnapshot, votes: &HashMap<Handle, u64>) {
        let mut nominees = merge_votes(&snapshot.nominees, votes);
        for nominee in &mut nominees {
            if let Some(pushed) = self.pushed.get(&nominee.handle) {
                nominee.votes = nominee.votes.max(*pushed);
            }
        }
        self.photo_index.clear();
        self.nominees = nominees;
        self.archive = snapshot.archive;
        self.settings = snapshot.settings;
        self.load_state = LoadState::Ready;
    }

    fn fail(&mut self) {
        self.load_state = LoadState::Failed;
        self.nominees.clear();
        self.archive.clear();
        self.settings = SiteSettings::default();
    }

    /// Upsert one pushed count
    fn apply(&mut self, event: &VoteEvent) {
        self.pushed.insert(event.handle.clone(), event.votes);
        match self.nominees.iter_mut().find(|n| n.handle == event.handle) {
            Some(nominee) => nominee.votes = event.votes,
            None => debug!(handle = %event.handle, "Vote for nominee not loaded yet"),
        }
    }

    fn nominee(&self, handle: &Handle) -> ServiceResult<&Nominee> {
        self.nominees
            .iter()
            .find(|n| &n.handle == handle)
            .ok_or_else(|| DomainError::NomineeNotFound(handle.clone()).into())
    }

    fn step_photo(&mut self, handle: &Handle, forward: bool) -> ServiceResult<usize> {
        let count = self.nominee(handle)?.photo_count();
        if count == 0 {
            return Ok(0);
        }
        let index = self.photo_index.entry(handle.clone()).or_insert(0);
        *index = if forward {
            (*index + 1) % count
        } else {
            (*index + count - 1) % count
        };
        Ok(*index)
    }
}

/// Live vote feed applied to the gallery; stops when dropped
#[derive(Debug)]
pub struct LiveUpdates {
    task: JoinHandle<()>,
}

impl LiveUpdates {
    /// Stop applying events and release the feed
    pub fn stop(self) {
        self.task.abort();
    }

    /// Whether events are still being applied
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for LiveUpdates {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Gallery service
#[derive(Debug)]
pub struct GalleryService {
    ctx: ServiceContext,
    votes: Arc<VoteGuard>,
    state: Arc<RwLock<GalleryState>>,
}

impl GalleryService {
    /// Create an empty gallery
    pub fn new(ctx: ServiceContext, votes: Arc<VoteGuard>) -> Self {
        Self {
            ctx,
            votes,
            state: Arc::new(RwLock::new(GalleryState::default())),
        }
    }

    /// Fetch content and vote counts in parallel and merge them.
    ///
    /// If either fetch fails the whole load fails and the gallery enters
    /// the degraded `Failed` state.
    #[instrument(skip(self))]
    pub async fn load(&self) -> ServiceResult<()> {
        self.state.write().begin_load();

        let limit = self.ctx.operation_timeout();
        let fetched = tokio::try_join!(
            with_timeout(limit, "fetch_content", self.ctx.content().fetch_content()),
            with_timeout(limit, "fetch_votes", self.ctx.vote_repo().fetch_votes()),
        );

        let mut state = self.state.write();
        match fetched {
            Ok((snapshot, votes)) => {
                state.install(snapshot, &votes);
                info!(
                    nominees = state.nominees.len(),
                    archive = state.archive.len(),
                    "Gallery loaded"
                );
                Ok(())
            }
            Err(e) => {
                state.fail();
                error!(error = %e, "Gallery load failed");
                Err(ServiceError::load_failed(e))
            }
        }
    }

    /// Apply one pushed vote count
    pub fn apply_event(&self, event: &VoteEvent) {
        self.state.write().apply(event);
    }

    /// Subscribe to the vote feed and apply every event as it arrives
    #[instrument(skip(self))]
    pub async fn start_live_updates(&self) -> ServiceResult<LiveUpdates> {
        let mut feed = with_timeout(
            self.ctx.operation_timeout(),
            "subscribe_votes",
            self.ctx.vote_repo().subscribe(),
        )
        .await?;

        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            while let Some(event) = feed.recv().await {
                debug!(handle = %event.handle, votes = event.votes, "Vote pushed");
                state.write().apply(&event);
            }
            debug!("Vote feed ended");
        });

        info!("Live vote updates started");
        Ok(LiveUpdates { task })
    }

    /// Cast this device's vote for a loaded nominee
    pub async fn cast_vote(&self, handle: &Handle) -> ServiceResult<()> {
        self.state.read().nominee(handle)?;
        self.votes.cast_vote(handle).await
    }

    /// Advance a nominee's photo carousel, wrapping at the end
    pub fn next_photo(&self, handle: &Handle) -> ServiceResult<usize> {
        self.state.write().step_photo(handle, true)
    }

    /// Step a nominee's photo carousel back, wrapping at the start
    pub fn prev_photo(&self, handle: &Handle) -> ServiceResult<usize> {
        self.state.write().step_photo(handle, false)
    }

    pub fn load_state(&self) -> LoadState {
        self.state.read().load_state
    }

    /// Merged nominees with raw counts, regardless of reveal state
    pub fn nominees(&self) -> Vec<Nominee> {
        self.state.read().nominees.clone()
    }

    /// First nominee at the top count, once this device has voted
    pub fn leader(&self) -> Option<Nominee> {
        if !self.votes.has_voted() {
            return None;
        }
        let state = self.state.read();
        leaders(&state.nominees).first().map(|n| (*n).clone())
    }

    /// Hero video, falling back to the configured default
    pub fn hero_video_url(&self) -> String {
        let state = self.state.read();
        state
            .settings
            .hero_video_or(&self.ctx.session().fallback_hero_video_url)
            .to_string()
    }

    /// A lightbox over the current archive photos
    pub fn lightbox(&self) -> ArchiveLightbox {
        ArchiveLightbox::new(self.state.read().archive.clone())
    }

    /// Renderer projection with reveal-after-vote applied
    pub fn view(&self) -> GalleryView {
        let voted = self.votes.has_voted();
        let state = self.state.read();

        let leader_handles: HashSet<&Handle> = if voted {
            leaders(&state.nominees).into_iter().map(|n| &n.handle).collect()
        } else {
            HashSet::new()
        };

        let nominees = state
            .nominees
            .iter()
            .map(|n| {
                let index = state.photo_index.get(&n.handle).copied().unwrap_or(0);
                NomineeView {
                    handle: n.handle.clone(),
                    photo_urls: n.photo_urls.clone(),
                    current_photo: n.photo_urls.get(index).cloned(),
                    votes: voted.then_some(n.votes),
                    is_leader: leader_handles.contains(&n.handle),
                }
            })
            .collect();

        GalleryView {
            load_state: state.load_state,
            has_voted: voted,
            nominees,
            archive: state.archive.clone(),
            hero_video_url: state
                .settings
                .hero_video_or(&self.ctx.session().fallback_hero_video_url)
                .to_string(),
        }
    }
}
