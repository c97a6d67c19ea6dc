//! Key-value persistence
//!
//! Everything the game stores is a JSON string under a fixed key:
//! - progress snapshot (score and lives for Continue)
//! - custom hero list
//! - theme preference
//!
//! Callers treat every failure as "use defaults". Errors are returned so
//! they can be logged, never so they can stop the game.

pub mod progress;
pub mod store;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use progress::ProgressSnapshot;
pub use store::{FileStore, MemoryStore};

/// A store shared between the game, the hero roster and the settings
pub type SharedStore = Rc<dyn KeyValueStore>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read `{key}`")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write `{key}`")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data under `{key}`")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode `{key}`")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage
pub trait KeyValueStore {
    /// Value under `key`, `None` if never set
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    /// Overwrite the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    /// Delete `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Read and decode a JSON value
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| PersistenceError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_absent() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = load_json(&store, "numbers").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_save_then_load_json() {
        let store = MemoryStore::new();
        save_json(&store, "numbers", &[1u32, 2, 3]).unwrap();
        let value: Option<Vec<u32>> = load_json(&store, "numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_load_json_malformed_is_decode_error() {
        let store = MemoryStore::new();
        store.set("numbers", "[1, 2,").unwrap();
        let err = load_json::<Vec<u32>>(&store, "numbers").unwrap_err();
        assert!(matches!(err, PersistenceError::Decode { ref key, .. } if key == "numbers"));
    }
}
