//! Device-local key/value state
//!
//! Stands in for browser local storage: a handful of string keys (the vote
//! flag, the anonymous user id) scoped to one device profile.

mod file_store;
mod memory_store;

pub use file_store::JsonFileDeviceStore;
pub use memory_store::MemoryDeviceStore;
