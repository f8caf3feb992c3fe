//! Value objects - immutable, self-validating domain primitives

mod emoji;
mod handle;
mod user_id;

pub use emoji::{ReactionEmoji, UnknownEmoji};
pub use handle::{Handle, HandleParseError};
pub use user_id::UserId;
