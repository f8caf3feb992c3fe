//! Session vote guard
//!
//! One vote per device profile. The flag lives in the device store under
//! [`VOTED_KEY`]; casts are serialized so a double click can never issue a
//! second increment.

use parking_lot::RwLock;
use party_core::Handle;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::timeout::with_timeout;

/// Device store key holding the vote flag
pub const VOTED_KEY: &str = "party.voted";

const VOTED_VALUE: &str = "true";

/// Whether this device has voted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    NotVoted,
    Voted,
}

impl VoteState {
    pub fn is_voted(self) -> bool {
        matches!(self, Self::Voted)
    }
}

/// Session vote guard
#[derive(Debug)]
pub struct VoteGuard {
    ctx: ServiceContext,
    state: RwLock<VoteState>,
    cast_lock: Mutex<()>,
}

impl VoteGuard {
    /// Create the guard, reading the persisted flag
    pub fn new(ctx: ServiceContext) -> ServiceResult<Self> {
        let state = match ctx.device_store().get(VOTED_KEY)?.as_deref() {
            Some(VOTED_VALUE) => VoteState::Voted,
            _ => VoteState::NotVoted,
        };
        Ok(Self {
            ctx,
            state: RwLock::new(state),
            cast_lock: Mutex::new(()),
        })
    }

    /// Current state
    pub fn state(&self) -> VoteState {
        *self.state.read()
    }

    pub fn has_voted(&self) -> bool {
        self.state().is_voted()
    }

    /// Cast this device's single vote.
    ///
    /// The local count is never touched; the new total arrives through the
    /// vote feed or the next load.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn cast_vote(&self, handle: &Handle) -> ServiceResult<()> {
        let _cast = self.cast_lock.lock().await;

        if self.has_voted() {
            return Err(ServiceError::AlreadyVoted);
        }

        let increment = self.ctx.vote_repo().increment_vote(handle);
        if let Err(e) = with_timeout(self.ctx.operation_timeout(), "increment_vote", increment).await
        {
            warn!(error = %e, "Vote not recorded");
            return Err(ServiceError::vote_failed(e));
        }

        // The vote counted remotely; block further votes this session even
        // if the flag cannot be written.
        *self.state.write() = VoteState::Voted;
        if let Err(e) = self.ctx.device_store().set(VOTED_KEY, VOTED_VALUE) {
            error!(error = %e, "Vote recorded but the device flag could not be persisted");
        }

        info!("Vote cast");
        Ok(())
    }
}
