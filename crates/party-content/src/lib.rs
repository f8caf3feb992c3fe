//! # party-content
//!
//! Read-only adapter for the headless content store. One query returns the
//! nominees (with photo URLs), the archive photos, and the site settings;
//! every record is validated at this boundary before it becomes a domain type.

mod client;
pub mod dto;
mod query;

pub use client::ContentStoreClient;
pub use query::CONTENT_QUERY;
