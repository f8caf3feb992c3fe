//! Data-transfer types for content store responses

mod mappers;
mod responses;

pub use responses::{ArchiveDto, ContentQueryResult, NomineeDto, QueryEnvelope, SettingsDto};
