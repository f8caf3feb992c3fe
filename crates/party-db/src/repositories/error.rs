//! Error handling utilities for repositories

use party_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a failed vote call.
///
/// An error raised by the database itself (the increment function refusing
/// the call) is a rejection; anything else is an infrastructure failure.
pub fn map_vote_error(e: SqlxError) -> DomainError {
    match e.as_database_error() {
        Some(db_err) => DomainError::VoteRejected(db_err.message().to_string()),
        None => map_db_error(e),
    }
}
