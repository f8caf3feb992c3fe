//! Session services
//!
//! Every service reaches its backing stores through the injected
//! [`ServiceContext`]; nothing here holds a global connection.

pub mod context;
pub mod error;
pub mod gallery;
pub mod lightbox;
pub mod reaction;
pub mod session;
mod timeout;
pub mod vote;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use gallery::{GalleryService, GalleryView, LiveUpdates, LoadState, NomineeView};
pub use lightbox::ArchiveLightbox;
pub use reaction::{PhotoSummary, ReactionService};
pub use session::Session;
pub use vote::{VoteGuard, VoteState};
