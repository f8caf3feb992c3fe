//! Nominee vote row model

use sqlx::FromRow;

/// Database model for the nominees table
#[derive(Debug, Clone, FromRow)]
pub struct NomineeVotesModel {
    pub handle: String,
    pub votes: i64,
}
