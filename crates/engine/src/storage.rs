//! Slot storage: the key-value backend every persisted piece of state
//! goes through.
//!
//! Persistence in presu is a handful of named slots (working draft,
//! budgets mirror, company config, master data), each holding one JSON
//! payload. The [`SlotStore`] trait keeps the backend injectable so tests
//! run against an in-memory map while the binaries use one file per slot.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::EngineError;

/// A named-slot string store.
pub trait SlotStore {
    /// Returns the payload stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, EngineError>;

    /// Overwrites the payload stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), EngineError>;

    /// Removes the slot; removing an absent slot is fine.
    fn remove(&self, key: &str) -> Result<(), EngineError>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), EngineError> {
        self.slots().remove(key);
        Ok(())
    }
}

/// File backend: one `<key>.json` file per slot under a data directory.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SlotStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), EngineError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads and deserializes a slot.
///
/// A corrupt payload is logged and treated as absence, so callers fall
/// back to their default value instead of failing.
pub(crate) fn read_slot<T: DeserializeOwned>(
    store: &impl SlotStore,
    key: &str,
) -> Result<Option<T>, EngineError> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(key, %err, "discarding corrupt slot");
                Ok(None)
            }
        },
    }
}

/// Serializes and writes a slot.
pub(crate) fn write_slot<T: Serialize>(
    store: &impl SlotStore,
    key: &str,
    value: &T,
) -> Result<(), EngineError> {
    store.set(key, &serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::default();
        assert!(store.get("slot").unwrap().is_none());

        store.set("slot", "payload").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("payload"));

        store.remove("slot").unwrap();
        store.remove("slot").unwrap();
        assert!(store.get("slot").unwrap().is_none());
    }

    #[test]
    fn corrupt_slot_reads_as_absent() {
        let store = MemoryStore::default();
        store.set("slot", "][").unwrap();
        let value: Option<Vec<u8>> = read_slot(&store, "slot").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_data")
            .join(uuid::Uuid::new_v4().to_string());
        let store = JsonFileStore::new(&dir);

        assert!(store.get("slot").unwrap().is_none());
        store.set("slot", "\"payload\"").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("\"payload\""));
        store.remove("slot").unwrap();
        assert!(store.get("slot").unwrap().is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
