//! Service context - dependency container for services
//!
//! Holds every adapter the services talk to. Built once per session, either
//! from configuration with [`ServiceContext::connect`] or from explicit
//! adapters with [`ServiceContextBuilder`].

use std::sync::Arc;
use std::time::Duration;

use party_common::{try_init_tracing, AppConfig, AppError, AppResult, SessionConfig, TracingConfig};
use party_content::ContentStoreClient;
use party_core::{ContentSource, DeviceStore, ReactionRepository, VoteRepository};
use party_db::{
    create_pool, run_migrations, ChangeFeedConfig, JsonFileDeviceStore, PgReactionRepository,
    PgVoteRepository,
};
use tracing::info;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Adapters
    content: Arc<dyn ContentSource>,
    vote_repo: Arc<dyn VoteRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    device_store: Arc<dyn DeviceStore>,

    // Session knobs
    session: SessionConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        content: Arc<dyn ContentSource>,
        vote_repo: Arc<dyn VoteRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        device_store: Arc<dyn DeviceStore>,
        session: SessionConfig,
    ) -> Self {
        Self {
            content,
            vote_repo,
            reaction_repo,
            device_store,
            session,
        }
    }

    /// Wire the production adapters from configuration.
    ///
    /// Installs tracing for the configured environment (unless already
    /// installed), connects the database pool and applies migrations, opens
    /// the device store, and builds the content store client.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        try_init_tracing(&TracingConfig::for_environment(config.app.env))?;

        let timeout = config.session.operation_timeout();
        let content = ContentStoreClient::new(&config.content, timeout)?;

        let pool = create_pool(&config.database)
            .await
            .map_err(AppError::internal)?;
        run_migrations(&pool).await.map_err(AppError::internal)?;

        let feed = ChangeFeedConfig::from(&config.session);
        let device_store = JsonFileDeviceStore::open(&config.device.state_path)?;

        info!(
            app = %config.app.name,
            env = ?config.app.env,
            endpoint = content.endpoint(),
            "Session context connected"
        );

        Ok(Self::new(
            Arc::new(content),
            Arc::new(PgVoteRepository::new(pool.clone(), feed.clone())),
            Arc::new(PgReactionRepository::new(pool, feed)),
            Arc::new(device_store),
            config.session.clone(),
        ))
    }

    // === Adapters ===

    /// Get the content source
    pub fn content(&self) -> &dyn ContentSource {
        self.content.as_ref()
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the device store
    pub fn device_store(&self) -> &dyn DeviceStore {
        self.device_store.as_ref()
    }

    // === Session ===

    /// Session configuration
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Upper bound on any single store call
    pub fn operation_timeout(&self) -> Duration {
        self.session.operation_timeout()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("adapters", &"...")
            .field("session", &self.session)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom adapters
pub struct ServiceContextBuilder {
    content: Option<Arc<dyn ContentSource>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    device_store: Option<Arc<dyn DeviceStore>>,
    session: SessionConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            content: None,
            vote_repo: None,
            reaction_repo: None,
            device_store: None,
            session: SessionConfig::default(),
        }
    }

    pub fn content(mut self, content: Arc<dyn ContentSource>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn device_store(mut self, store: Arc<dyn DeviceStore>) -> Self {
        self.device_store = Some(store);
        self
    }

    pub fn session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any adapter is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.content
                .ok_or_else(|| ServiceError::validation("content source is required"))?,
            self.vote_repo
                .ok_or_else(|| ServiceError::validation("vote_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.device_store
                .ok_or_else(|| ServiceError::validation("device_store is required"))?,
            self.session,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
