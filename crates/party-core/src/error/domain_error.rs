//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Handle, HandleParseError, UnknownEmoji};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Nominee not found: {0}")]
    NomineeNotFound(Handle),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid handle: {0}")]
    InvalidHandle(#[from] HandleParseError),

    #[error(transparent)]
    UnknownEmoji(#[from] UnknownEmoji),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("A vote has already been cast on this device")]
    AlreadyVoted,

    // =========================================================================
    // Remote Rejections
    // =========================================================================
    #[error("Vote rejected by the vote store: {0}")]
    VoteRejected(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Content store error: {0}")]
    ContentStoreError(String),

    #[error("Device store error: {0}")]
    DeviceStoreError(String),

    #[error("Subscription closed")]
    SubscriptionClosed,
}

impl DomainError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::NomineeNotFound(_) => "UNKNOWN_NOMINEE",

            Self::InvalidHandle(_) => "INVALID_HANDLE",
            Self::UnknownEmoji(_) => "UNKNOWN_EMOJI",
            Self::InvalidRecord(_) => "INVALID_RECORD",
            Self::MalformedEvent(_) => "MALFORMED_EVENT",

            Self::AlreadyVoted => "ALREADY_VOTED",

            Self::VoteRejected(_) => "VOTE_REJECTED",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::ContentStoreError(_) => "CONTENT_STORE_ERROR",
            Self::DeviceStoreError(_) => "DEVICE_STORE_ERROR",
            Self::SubscriptionClosed => "SUBSCRIPTION_CLOSED",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NomineeNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidHandle(_)
                | Self::UnknownEmoji(_)
                | Self::InvalidRecord(_)
                | Self::MalformedEvent(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyVoted)
    }

    /// Check if this came from a backing store or transport
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_)
                | Self::ContentStoreError(_)
                | Self::DeviceStoreError(_)
                | Self::SubscriptionClosed
        )
    }
}
