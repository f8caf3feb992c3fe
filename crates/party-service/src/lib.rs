//! # party-service
//!
//! Application layer: the session's gallery state and its merge protocol,
//! the one-vote-per-device guard, the reaction ledger operations, and the
//! carousel and lightbox cursors a renderer drives.

pub mod services;

pub use services::{
    ArchiveLightbox, GalleryService, GalleryView, LiveUpdates, LoadState, NomineeView,
    PhotoSummary, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, Session, VoteGuard, VoteState,
};
