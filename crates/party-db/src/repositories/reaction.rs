//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use party_core::{
    ReactionEmoji, ReactionEvent, ReactionRecord, ReactionRepository, ReactionSubscription,
    RepoResult, ToggleOutcome, UserId,
};

use crate::models::ReactionModel;
use crate::realtime::{subscribe_channel, ChangeFeedConfig, REACTION_CHANNEL};

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
    feed: ChangeFeedConfig,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool, feed: ChangeFeedConfig) -> Self {
        Self { pool, feed }
    }
}

/// Toggle decision when the stored glyph may be outside the reaction set.
///
/// An unrecognized stored value is overwritten rather than matched.
fn decide(stored: Option<&str>, chosen: ReactionEmoji) -> ToggleOutcome {
    match stored {
        None => ToggleOutcome::Insert(chosen),
        Some(glyph) => match ReactionEmoji::from_glyph(glyph) {
            Some(current) => ToggleOutcome::decide(Some(current), chosen),
            None => ToggleOutcome::Replace(chosen),
        },
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, photo_url: &str, user_id: UserId) -> RepoResult<Option<ReactionEmoji>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT photo_url, user_id, emoji, created_at
            FROM photo_reactions
            WHERE photo_url = $1 AND user_id = $2
            "#,
        )
        .bind(photo_url)
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = result else {
            return Ok(None);
        };
        match ReactionRecord::try_from(model) {
            Ok(record) => Ok(Some(record.emoji)),
            Err(e) => {
                warn!(error = %e, "Ignoring stored reaction outside the reaction set");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn toggle(
        &self,
        photo_url: &str,
        user_id: UserId,
        emoji: ReactionEmoji,
    ) -> RepoResult<Option<ReactionEmoji>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serializes toggles on the same slot, including when no row exists yet
        sqlx::query(
            r#"
            SELECT pg_advisory_xact_lock(hashtext($1 || ':' || $2::text))
            "#,
        )
        .bind(photo_url)
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let stored = sqlx::query_scalar::<_, String>(
            r#"
            SELECT emoji
            FROM photo_reactions
            WHERE photo_url = $1 AND user_id = $2
            "#,
        )
        .bind(photo_url)
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let outcome = decide(stored.as_deref(), emoji);
        match outcome {
            ToggleOutcome::Insert(chosen) => {
                let record = ReactionRecord::new(photo_url, user_id, chosen);
                sqlx::query(
                    r#"
                    INSERT INTO photo_reactions (photo_url, user_id, emoji, created_at)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (photo_url, user_id) DO UPDATE SET emoji = EXCLUDED.emoji
                    "#,
                )
                .bind(&record.photo_url)
                .bind(record.user_id.into_inner())
                .bind(record.emoji.as_str())
                .bind(record.created_at)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            ToggleOutcome::Replace(chosen) => {
                sqlx::query(
                    r#"
                    UPDATE photo_reactions SET emoji = $3
                    WHERE photo_url = $1 AND user_id = $2
                    "#,
                )
                .bind(photo_url)
                .bind(user_id.into_inner())
                .bind(chosen.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            ToggleOutcome::Remove => {
                sqlx::query(
                    r#"
                    DELETE FROM photo_reactions WHERE photo_url = $1 AND user_id = $2
                    "#,
                )
                .bind(photo_url)
                .bind(user_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        tx.commit().await.map_err(map_db_error)?;
        debug!(?outcome, "Reaction toggled");
        Ok(outcome.resulting())
    }

    #[instrument(skip(self))]
    async fn emojis_for_photo(&self, photo_url: &str) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT emoji
            FROM photo_reactions
            WHERE photo_url = $1
            "#,
        )
        .bind(photo_url)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn subscribe(&self) -> RepoResult<ReactionSubscription> {
        subscribe_channel(
            &self.pool,
            REACTION_CHANNEL,
            &self.feed,
            ReactionEvent::from_payload,
        )
        .await
    }
}
