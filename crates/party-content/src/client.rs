//! HTTP client for the content store query API

use std::time::Duration;

use async_trait::async_trait;
use party_common::ContentConfig;
use party_core::{ContentSnapshot, ContentSource, DomainError, RepoResult};
use tracing::{debug, instrument};

use crate::dto::{ContentQueryResult, QueryEnvelope};
use crate::query::CONTENT_QUERY;

fn map_http_error(e: reqwest::Error) -> DomainError {
    DomainError::ContentStoreError(e.to_string())
}

/// Content store adapter
///
/// Holds one pooled HTTP client; construct once per session and share.
#[derive(Debug, Clone)]
pub struct ContentStoreClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ContentStoreClient {
    /// Create a client for the configured project and dataset
    pub fn new(config: &ContentConfig, timeout: Duration) -> RepoResult<Self> {
        Self::with_endpoint(config.query_endpoint(), timeout)
    }

    /// Create a client against an explicit query endpoint
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> RepoResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_http_error)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// The query endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentSource for ContentStoreClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_content(&self) -> RepoResult<ContentSnapshot> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", CONTENT_QUERY)])
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;

        let envelope: QueryEnvelope<ContentQueryResult> =
            response.json().await.map_err(map_http_error)?;
        let snapshot = envelope.result.into_snapshot();

        debug!(
            nominees = snapshot.nominees.len(),
            archive = snapshot.archive.len(),
            "Content fetched"
        );
        Ok(snapshot)
    }
}
