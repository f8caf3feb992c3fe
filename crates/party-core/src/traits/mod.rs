//! Adapter traits (ports)

mod repositories;

pub use repositories::{ContentSource, DeviceStore, ReactionRepository, RepoResult, VoteRepository};
