//! Service layer error types
//!
//! Provides a unified error type for all service operations, plus the short
//! notice text a visitor sees when something fails.

use std::fmt;
use std::time::Duration;

use party_common::AppError;
use party_core::DomainError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or adapter failure
    Domain(DomainError),

    /// A store call exceeded the operation timeout
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// This device already cast its vote
    AlreadyVoted,

    /// The vote store did not record the vote; the guard stays NotVoted
    VoteFailed(Box<ServiceError>),

    /// Initial content or vote fetch failed; the gallery is degraded
    LoadFailed(Box<ServiceError>),

    /// Validation error
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Timeout { operation, after } => {
                write!(f, "{operation} timed out after {}ms", after.as_millis())
            }
            Self::AlreadyVoted => write!(f, "A vote has already been cast on this device"),
            Self::VoteFailed(e) => write!(f, "Vote failed: {e}"),
            Self::LoadFailed(e) => write!(f, "Gallery load failed: {e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::VoteFailed(e) | Self::LoadFailed(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Wrap a failed increment
    pub fn vote_failed(cause: ServiceError) -> Self {
        Self::VoteFailed(Box::new(cause))
    }

    /// Wrap a failed initial load
    pub fn load_failed(cause: ServiceError) -> Self {
        Self::LoadFailed(Box::new(cause))
    }

    /// Get the error code for notices and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Timeout { .. } => "TIMEOUT",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::VoteFailed(_) => "VOTE_FAILED",
            Self::LoadFailed(_) => "LOAD_FAILED",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Whether the visitor can usefully try the same action again
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_infrastructure(),
            Self::Timeout { .. } | Self::VoteFailed(_) | Self::LoadFailed(_) => true,
            Self::AlreadyVoted | Self::Validation(_) => false,
        }
    }

    /// Short notice shown to the visitor
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AlreadyVoted => "You've already voted on this device.",
            Self::VoteFailed(_) => "Your vote didn't go through. Please try again.",
            Self::LoadFailed(_) => "The gallery couldn't be loaded right now.",
            Self::Timeout { .. } => "That took too long. Please try again.",
            Self::Domain(e) if e.is_not_found() => "That nominee isn't in the gallery.",
            Self::Domain(e) if e.is_validation() => "That reaction isn't available.",
            Self::Domain(_) | Self::Validation(_) => "Something went wrong. Please try again.",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::AlreadyVoted => Self::AlreadyVoted,
            other => Self::Domain(other),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Timeout { .. } => AppError::Timeout(err.to_string()),
            ServiceError::AlreadyVoted => AppError::Domain(DomainError::AlreadyVoted),
            ServiceError::VoteFailed(_) | ServiceError::LoadFailed(_) => {
                AppError::Remote(err.to_string())
            }
            ServiceError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
