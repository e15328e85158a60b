//! Persistent key/value store for raffle settings and history.
//!
//! Values travel as [`toml::Value`] so the trait stays object-safe; the
//! [`load`] and [`save`] helpers do the serde conversion. Neither helper
//! ever fails outward: a bad or missing value yields the default, and a
//! failed write is logged and otherwise ignored so the raffle keeps running
//! in memory.

pub mod file;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use file::FileStore;

pub const KEY_DIGIT_COUNT: &str = "raffle_digitCount";
pub const KEY_MANUAL_REVEAL: &str = "raffle_isManualRevealEnabled";
pub const KEY_COUNTDOWN_ENABLED: &str = "raffle_isCountdownEnabled";
pub const KEY_COUNTDOWN_DURATION: &str = "raffle_countdownDuration";
pub const KEY_HISTORY: &str = "raffle_history";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("value could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub trait Store {
    fn get(&self, key: &str) -> Option<toml::Value>;
    fn set(&mut self, key: &str, value: toml::Value) -> Result<(), StoreError>;
    /// Remove every key.
    fn clear(&mut self) -> Result<(), StoreError>;
}

pub fn load<T: DeserializeOwned>(store: &dyn Store, key: &str, default: T) -> T {
    let Some(value) = store.get(key) else {
        return default;
    };
    match value.try_into() {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable stored value");
            default
        }
    }
}

pub fn save<T: Serialize + ?Sized>(store: &mut dyn Store, key: &str, value: &T) {
    let result = toml::Value::try_from(value)
        .map_err(StoreError::from)
        .and_then(|v| store.set(key, v));
    if let Err(e) = result {
        tracing::warn!(key, error = %e, "failed to persist value");
    }
}

/// In-memory store used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub values: std::collections::BTreeMap<String, toml::Value>,
    pub writes: usize,
}

#[cfg(test)]
impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<toml::Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: toml::Value) -> Result<(), StoreError> {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.values.clear();
        Ok(())
    }
}

/// Store whose every write fails, as with a read-only or full disk.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingStore {
    pub attempts: usize,
}

#[cfg(test)]
impl Store for FailingStore {
    fn get(&self, _key: &str) -> Option<toml::Value> {
        None
    }

    fn set(&mut self, _key: &str, _value: toml::Value) -> Result<(), StoreError> {
        self.attempts += 1;
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.attempts += 1;
        Err(StoreError::Io(std::io::Error::other("disk gone")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_falls_back_to_default() {
        let mut store = MemoryStore::default();
        assert_eq!(load(&store, KEY_DIGIT_COUNT, 3i64), 3);

        store
            .set(KEY_DIGIT_COUNT, toml::Value::String("four".into()))
            .unwrap();
        assert_eq!(load(&store, KEY_DIGIT_COUNT, 3i64), 3);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::default();
        save(&mut store, KEY_MANUAL_REVEAL, &true);
        assert!(load(&store, KEY_MANUAL_REVEAL, false));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_save_swallows_write_errors() {
        let mut store = FailingStore::default();
        save(&mut store, KEY_DIGIT_COUNT, &4i64);
        save(&mut store, KEY_HISTORY, &["001"][..]);
        assert_eq!(store.attempts, 2);
        assert_eq!(load(&store, KEY_DIGIT_COUNT, 3i64), 3);
    }
}
