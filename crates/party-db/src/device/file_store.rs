//! JSON file backed device store

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use party_core::{DeviceStore, DomainError, RepoResult};
use tracing::debug;

fn store_error(err: impl std::fmt::Display) -> DomainError {
    DomainError::DeviceStoreError(err.to_string())
}

/// Device store persisted as a flat JSON object on disk.
///
/// The whole map is held in memory and rewritten on every `set`, through a
/// temporary file and a rename so a crash never leaves a half-written file.
#[derive(Debug)]
pub struct JsonFileDeviceStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileDeviceStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// An unreadable or corrupt file is an error; silently starting over
    /// would forget that this device already voted.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(store_error)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(store_error(e)),
        };
        debug!(path = %path.display(), entries = entries.len(), "Device store opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> RepoResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(store_error)?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(store_error)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(store_error)?;
        fs::rename(&tmp, &self.path).map_err(store_error)
    }
}

impl DeviceStore for JsonFileDeviceStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&entries) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
