//! Domain entities - core business objects

mod content;
mod nominee;
mod reaction;

pub use content::{ArchiveItem, ContentSnapshot, NomineeContent, SiteSettings};
pub use nominee::{leaders, merge_votes, Nominee};
pub use reaction::{top_emojis, ReactionCounts, ReactionRecord, ToggleOutcome, DEFAULT_TOP_EMOJIS};
