//! Reaction ledger change pushed by the reaction store

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of row change on the reaction ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionChange {
    Insert,
    Update,
    Delete,
}

/// A reaction on `photo_url` changed; counts for that photo are stale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub photo_url: String,
    pub op: ReactionChange,
}

impl ReactionEvent {
    /// Decode a raw JSON payload
    pub fn from_payload(payload: &str) -> Result<Self, DomainError> {
        let event: Self =
            serde_json::from_str(payload).map_err(|e| DomainError::MalformedEvent(e.to_string()))?;
        if event.photo_url.trim().is_empty() {
            return Err(DomainError::MalformedEvent("empty photo_url".to_string()));
        }
        Ok(event)
    }
}
