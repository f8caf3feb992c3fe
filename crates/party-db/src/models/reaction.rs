//! Photo reaction model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the photo_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub photo_url: String,
    pub user_id: Uuid,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}
