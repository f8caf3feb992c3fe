//! Raw response shapes returned by the content query

use serde::Deserialize;
use validator::Validate;

/// Envelope every query response is wrapped in
#[derive(Debug, Deserialize)]
pub struct QueryEnvelope<T> {
    pub result: T,
}

/// Top-level result of [`crate::CONTENT_QUERY`]
#[derive(Debug, Default, Deserialize)]
pub struct ContentQueryResult {
    // Either list comes back as null when the dataset has no documents of that type
    #[serde(default)]
    pub nominees: Option<Vec<NomineeDto>>,
    #[serde(default)]
    pub archive: Option<Vec<ArchiveDto>>,
    #[serde(default)]
    pub settings: Option<SettingsDto>,
}

/// Nominee document
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NomineeDto {
    // Length is checked on the trimmed value by `Handle::parse`
    #[validate(required(message = "Nominee handle is required"))]
    pub handle: Option<String>,

    // Images without an uploaded asset come back as null entries
    #[serde(default)]
    pub photo_urls: Option<Vec<Option<String>>>,
}

/// Archive document
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArchiveDto {
    #[validate(
        required(message = "Archive photo has no image"),
        url(message = "Archive photo URL is invalid")
    )]
    pub url: Option<String>,

    #[validate(length(max = 500, message = "Caption must be at most 500 characters"))]
    pub caption: Option<String>,
}

/// Site settings singleton
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    #[validate(url(message = "Hero video URL is invalid"))]
    pub video_url: Option<String>,
}
