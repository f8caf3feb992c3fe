//! One visitor session: every service wired to a shared context

use std::sync::Arc;

use party_common::{AppConfig, AppResult};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::gallery::GalleryService;
use super::reaction::ReactionService;
use super::vote::VoteGuard;

/// Services for one visitor session
#[derive(Debug)]
pub struct Session {
    ctx: ServiceContext,
    votes: Arc<VoteGuard>,
    gallery: GalleryService,
    reactions: ReactionService,
}

impl Session {
    /// Build the services over an existing context
    pub fn new(ctx: ServiceContext) -> ServiceResult<Self> {
        let votes = Arc::new(VoteGuard::new(ctx.clone())?);
        Ok(Self {
            gallery: GalleryService::new(ctx.clone(), Arc::clone(&votes)),
            reactions: ReactionService::new(ctx.clone()),
            votes,
            ctx,
        })
    }

    /// Connect production adapters from configuration and build the services
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let ctx = ServiceContext::connect(config).await?;
        Ok(Self::new(ctx)?)
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    pub fn votes(&self) -> &VoteGuard {
        &self.votes
    }

    pub fn gallery(&self) -> &GalleryService {
        &self.gallery
    }

    pub fn reactions(&self) -> &ReactionService {
        &self.reactions
    }
}
