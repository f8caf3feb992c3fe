//! Read-only content delivered by the content store

use serde::Serialize;

use crate::value_objects::Handle;

/// Nominee as described by the content store, before votes are merged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NomineeContent {
    pub handle: Handle,
    pub photo_urls: Vec<String>,
}

/// Single archive photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveItem {
    pub url: String,
    pub caption: Option<String>,
}

impl ArchiveItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
        }
    }
}

/// Site-wide settings singleton
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteSettings {
    pub hero_video_url: Option<String>,
}

impl SiteSettings {
    /// Hero video, or the given fallback when none is configured
    pub fn hero_video_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.hero_video_url.as_deref().unwrap_or(fallback)
    }
}

/// Everything one content query returns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentSnapshot {
    pub nominees: Vec<NomineeContent>,
    pub archive: Vec<ArchiveItem>,
    pub settings: SiteSettings,
}
