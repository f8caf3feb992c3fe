//! DTO -> domain mappers
//!
//! Invalid records are reported and dropped here; nothing with a missing or
//! malformed field reaches the domain layer.

use std::collections::HashSet;

use party_core::{ArchiveItem, ContentSnapshot, DomainError, Handle, NomineeContent, SiteSettings};
use tracing::warn;
use validator::{Validate, ValidateUrl};

use super::responses::{ArchiveDto, ContentQueryResult, NomineeDto, SettingsDto};

fn invalid(err: impl std::fmt::Display) -> DomainError {
    DomainError::InvalidRecord(err.to_string())
}

impl TryFrom<NomineeDto> for NomineeContent {
    type Error = DomainError;

    fn try_from(dto: NomineeDto) -> Result<Self, Self::Error> {
        dto.validate().map_err(invalid)?;
        let raw = dto
            .handle
            .ok_or_else(|| invalid("Nominee handle is required"))?;
        let handle = Handle::parse(&raw)?;

        let mut photo_urls = Vec::new();
        for url in dto.photo_urls.unwrap_or_default() {
            match url {
                Some(url) if url.validate_url() => photo_urls.push(url),
                other => warn!(handle = %handle, url = ?other, "Dropping invalid nominee photo"),
            }
        }

        Ok(Self { handle, photo_urls })
    }
}

impl TryFrom<ArchiveDto> for ArchiveItem {
    type Error = DomainError;

    fn try_from(dto: ArchiveDto) -> Result<Self, Self::Error> {
        dto.validate().map_err(invalid)?;
        let url = dto.url.ok_or_else(|| invalid("Archive photo has no image"))?;
        Ok(Self {
            url,
            caption: dto.caption.filter(|c| !c.trim().is_empty()),
        })
    }
}

impl SettingsDto {
    /// Validated site settings; an invalid document falls back to the defaults
    pub fn into_settings(self) -> SiteSettings {
        if let Err(e) = self.validate() {
            warn!(error = %e, "Ignoring invalid site settings");
            return SiteSettings::default();
        }
        SiteSettings {
            hero_video_url: self.video_url,
        }
    }
}

impl ContentQueryResult {
    /// Validate every record and build the snapshot.
    ///
    /// Malformed nominees and archive photos are logged and skipped; a
    /// repeated handle keeps its first occurrence.
    pub fn into_snapshot(self) -> ContentSnapshot {
        let raw_nominees = self.nominees.unwrap_or_default();
        let mut seen = HashSet::new();
        let mut nominees = Vec::with_capacity(raw_nominees.len());
        for dto in raw_nominees {
            match NomineeContent::try_from(dto) {
                Ok(nominee) => {
                    if seen.insert(nominee.handle.clone()) {
                        nominees.push(nominee);
                    } else {
                        warn!(handle = %nominee.handle, "Dropping duplicate nominee");
                    }
                }
                Err(e) => warn!(error = %e, "Dropping malformed nominee"),
            }
        }

        let archive = self
            .archive
            .unwrap_or_default()
            .into_iter()
            .filter_map(|dto| match ArchiveItem::try_from(dto) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(error = %e, "Dropping malformed archive photo");
                    None
                }
            })
            .collect();

        ContentSnapshot {
            nominees,
            archive,
            settings: self
                .settings
                .map(SettingsDto::into_settings)
                .unwrap_or_default(),
        }
    }
}
