//! Vote count change pushed by the vote store

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Handle;

/// One remote row update on the nominees table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEvent {
    pub handle: Handle,
    pub votes: u64,
}

impl VoteEvent {
    pub fn new(handle: Handle, votes: u64) -> Self {
        Self { handle, votes }
    }

    /// Decode a raw JSON payload, rejecting missing or ill-typed fields
    pub fn from_payload(payload: &str) -> Result<Self, DomainError> {
        serde_json::from_str(payload).map_err(|e| DomainError::MalformedEvent(e.to_string()))
    }
}
