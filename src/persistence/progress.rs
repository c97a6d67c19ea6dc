//! Saved progress for the Continue option
//!
//! Only score and lives survive; falling balls and the current problem do not.

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, PersistenceError, load_json, save_json};

/// Score and lives as last written by a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub saved_score: u32,
    pub saved_lives: u8,
}

impl ProgressSnapshot {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "mathBallCatcherProgress";

    pub fn new(score: u32, lives: u8) -> Self {
        Self {
            saved_score: score,
            saved_lives: lives,
        }
    }

    /// Stored snapshot, `None` if nothing was saved
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Self>, PersistenceError> {
        load_json(store, Self::STORAGE_KEY)
    }

    /// Overwrite the stored snapshot (best effort)
    pub fn save(&self, store: &dyn KeyValueStore) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::debug!(
                "Progress saved (score {}, lives {})",
                self.saved_score,
                self.saved_lives
            ),
            Err(e) => log::warn!("Progress not saved: {e}"),
        }
    }

    /// Forget any stored snapshot (best effort)
    pub fn clear(store: &dyn KeyValueStore) {
        if let Err(e) = store.remove(Self::STORAGE_KEY) {
            log::warn!("Progress not cleared: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&ProgressSnapshot::new(5, 2)).unwrap();
        assert_eq!(json, r#"{"savedScore":5,"savedLives":2}"#);
    }

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        assert_eq!(ProgressSnapshot::load(&store).unwrap(), None);

        ProgressSnapshot::new(7, 1).save(&store);
        assert_eq!(
            ProgressSnapshot::load(&store).unwrap(),
            Some(ProgressSnapshot::new(7, 1))
        );

        ProgressSnapshot::clear(&store);
        assert_eq!(ProgressSnapshot::load(&store).unwrap(), None);
    }

    #[test]
    fn test_negative_score_is_decode_error() {
        let store = MemoryStore::new();
        store
            .set(ProgressSnapshot::STORAGE_KEY, r#"{"savedScore":-1,"savedLives":2}"#)
            .unwrap();
        assert!(matches!(
            ProgressSnapshot::load(&store),
            Err(PersistenceError::Decode { .. })
        ));
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        ProgressSnapshot::new(1, 1).save(&store);
        ProgressSnapshot::clear(&store);
        store.set_fail_writes(false);
        assert_eq!(ProgressSnapshot::load(&store).unwrap(), None);
    }
}
