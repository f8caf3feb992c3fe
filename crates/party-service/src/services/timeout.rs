//! Deadline for store calls

use std::future::Future;
use std::time::Duration;

use party_core::RepoResult;
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Run one store call, failing with `Timeout` once `limit` elapses
pub(crate) async fn with_timeout<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> ServiceResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(ServiceError::from),
        Err(_) => {
            warn!(operation, limit_ms = limit.as_millis() as u64, "Store call timed out");
            Err(ServiceError::Timeout {
                operation,
                after: limit,
            })
        }
    }
}
