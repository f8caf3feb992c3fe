//! In-memory device store

use std::collections::HashMap;

use parking_lot::RwLock;
use party_core::{DeviceStore, RepoResult};

/// Device store that forgets everything when dropped, like a private window
#[derive(Debug, Default)]
pub struct MemoryDeviceStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceStore for MemoryDeviceStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
