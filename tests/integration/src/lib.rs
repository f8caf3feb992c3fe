//! Integration test utilities for the party services
//!
//! In-memory implementations of every adapter trait, plus helpers that wire
//! them into a [`party_service::Session`] for end-to-end tests.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
