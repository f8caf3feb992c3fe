//! PostgreSQL implementation of VoteRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use party_core::{Handle, RepoResult, VoteEvent, VoteRepository, VoteSubscription};

use crate::mappers::votes_by_handle;
use crate::models::NomineeVotesModel;
use crate::realtime::{subscribe_channel, ChangeFeedConfig, VOTE_CHANNEL};

use super::error::{map_db_error, map_vote_error};

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
    feed: ChangeFeedConfig,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool, feed: ChangeFeedConfig) -> Self {
        Self { pool, feed }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn fetch_votes(&self) -> RepoResult<HashMap<Handle, u64>> {
        let rows = sqlx::query_as::<_, NomineeVotesModel>(
            r#"
            SELECT handle, votes
            FROM nominees
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(votes_by_handle(rows))
    }

    #[instrument(skip(self), fields(handle = %handle))]
    async fn increment_vote(&self, handle: &Handle) -> RepoResult<()> {
        let votes = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT increment_vote($1)
            "#,
        )
        .bind(handle.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_vote_error)?;

        info!(votes, "Vote recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn subscribe(&self) -> RepoResult<VoteSubscription> {
        subscribe_channel(&self.pool, VOTE_CHANNEL, &self.feed, VoteEvent::from_payload).await
    }
}
