//! Photo reaction row -> domain mapper

use party_core::{DomainError, ReactionEmoji, ReactionRecord, UserId};

use crate::models::ReactionModel;

impl TryFrom<ReactionModel> for ReactionRecord {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let emoji: ReactionEmoji = model.emoji.parse()?;
        Ok(ReactionRecord {
            photo_url: model.photo_url,
            user_id: UserId::from_uuid(model.user_id),
            emoji,
            created_at: model.created_at,
        })
    }
}
