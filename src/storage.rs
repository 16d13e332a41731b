//! Key-value slots the task collections are mirrored into.
//!
//! Each application owns one slot under a fixed key and rewrites it in full
//! after every mutation. The in-memory collection stays authoritative; a slot
//! is only read once, when the application starts.

use crate::error::StorageError;
use log::{debug, error, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
};

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores every key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path_for(key), value).map_err(io_err)?;
        debug!("wrote {} bytes to slot `{}`", value.len(), key);
        Ok(())
    }
}

/// In-process storage, optionally capped like a browser origin's quota.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads the collection stored under `key`.
///
/// A missing slot, a failed read or a value that does not parse all yield an
/// empty collection. The failure is logged and otherwise swallowed.
pub fn load_tasks<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Vec<T> {
    let data = match storage.get_item(key) {
        Ok(Some(data)) => data,
        Ok(None) => return Vec::new(),
        Err(err) => {
            error!("Error reading tasks from storage: {err}");
            return Vec::new();
        }
    };

    serde_json::from_str(&data).unwrap_or_else(|err| {
        warn!("discarding unparsable contents of slot `{key}`: {err}");
        Vec::new()
    })
}

/// Serializes the whole collection and overwrites the slot under `key`.
pub fn save_tasks<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    tasks: &[T],
) -> Result<(), StorageError> {
    let data = serde_json::to_string(tasks).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set_item(key, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        done: bool,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                name: "first".into(),
                done: false,
            },
            Item {
                name: "second".into(),
                done: true,
            },
        ]
    }

    #[test]
    fn missing_slot_loads_empty() {
        let storage = MemoryStorage::new();
        let loaded: Vec<Item> = load_tasks(&storage, "nothing");
        assert!(loaded.is_empty());
    }

    #[test]
    fn garbage_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item("slot", "{not json").unwrap();
        let loaded: Vec<Item> = load_tasks(&storage, "slot");
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_then_load_is_deep_equal() {
        let mut storage = MemoryStorage::new();
        save_tasks(&mut storage, "slot", &items()).unwrap();
        let loaded: Vec<Item> = load_tasks(&storage, "slot");
        assert_eq!(loaded, items());
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let mut storage = MemoryStorage::with_quota(16);
        let err = save_tasks(&mut storage, "slot", &items()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));
        assert_eq!(storage.get_item("slot").unwrap(), None);
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345678").unwrap();
        storage.set_item("k", "87654321").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("87654321"));
    }

    #[test]
    fn file_storage_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("data"));
        assert_eq!(storage.get_item("slot").unwrap(), None);

        save_tasks(&mut storage, "slot", &items()).unwrap();
        assert!(dir.path().join("data").join("slot.json").exists());

        let reopened = FileStorage::new(dir.path().join("data"));
        let loaded: Vec<Item> = load_tasks(&reopened, "slot");
        assert_eq!(loaded, items());
    }
}
