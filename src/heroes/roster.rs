//! Custom heroes
//!
//! Persisted as a JSON array. Every hero gets a random id when it is
//! created, so deleting one never depends on list position.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Accessory, BodyType, COLORS};
use crate::persistence::{KeyValueStore, PersistenceError, load_json, save_json};

/// Name used when the builder's name field is left blank
pub const DEFAULT_HERO_NAME: &str = "Custom Hero";

/// Stable hero identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub String);

impl HeroId {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(format!("hero-{:016x}", rng.random::<u64>()))
    }
}

impl std::fmt::Display for HeroId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A saved custom hero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroRecord {
    pub id: HeroId,
    pub name: String,
    #[serde(rename = "bodyTypeId")]
    pub body_type: BodyType,
    #[serde(rename = "colorHex")]
    pub color: String,
    #[serde(rename = "accessoryIds")]
    pub accessories: Vec<Accessory>,
}

/// Hero builder form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroDraft {
    pub name: String,
    pub body_type: BodyType,
    pub color: &'static str,
    /// In the order they were picked
    pub accessories: Vec<Accessory>,
}

impl Default for HeroDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            body_type: BodyType::TypeA,
            color: COLORS[0],
            accessories: Vec::new(),
        }
    }
}

impl HeroDraft {
    /// Add the accessory, or remove it if already picked
    pub fn toggle_accessory(&mut self, accessory: Accessory) {
        if let Some(pos) = self.accessories.iter().position(|&a| a == accessory) {
            self.accessories.remove(pos);
        } else {
            self.accessories.push(accessory);
        }
    }

    pub fn has_accessory(&self, accessory: Accessory) -> bool {
        self.accessories.contains(&accessory)
    }

    /// Next body type, wrapping
    pub fn cycle_body_type(&mut self) {
        let idx = BodyType::ALL
            .iter()
            .position(|&b| b == self.body_type)
            .unwrap_or(0);
        self.body_type = BodyType::ALL[(idx + 1) % BodyType::ALL.len()];
    }

    /// Next color in the palette, wrapping
    pub fn cycle_color(&mut self) {
        let idx = COLORS.iter().position(|&c| c == self.color).unwrap_or(0);
        self.color = COLORS[(idx + 1) % COLORS.len()];
    }

    /// Finish the hero
    pub fn build(&self, id: HeroId) -> HeroRecord {
        let name = self.name.trim();
        HeroRecord {
            id,
            name: if name.is_empty() {
                DEFAULT_HERO_NAME.to_string()
            } else {
                name.to_string()
            },
            body_type: self.body_type,
            color: self.color.to_string(),
            accessories: self.accessories.clone(),
        }
    }
}

/// The saved custom heroes, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroRoster {
    pub heroes: Vec<HeroRecord>,
}

impl HeroRoster {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "customHeroes";

    pub fn new() -> Self {
        Self { heroes: Vec::new() }
    }

    /// Load the stored heroes; anything unreadable means an empty roster
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<Vec<HeroRecord>>(store, Self::STORAGE_KEY) {
            Ok(Some(heroes)) => {
                log::info!("Loaded {} custom heroes", heroes.len());
                Self { heroes }
            }
            Ok(None) => Self::new(),
            Err(e) => {
                log::warn!("Can't load custom heroes: {e}");
                Self::new()
            }
        }
    }

    pub fn get(&self, id: &HeroId) -> Option<&HeroRecord> {
        self.heroes.iter().find(|h| &h.id == id)
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    /// The list as currently stored
    fn stored(store: &dyn KeyValueStore) -> Result<Vec<HeroRecord>, PersistenceError> {
        Ok(load_json(store, Self::STORAGE_KEY)?.unwrap_or_default())
    }

    /// Append a hero to the stored list and write it back (best effort)
    ///
    /// The stored list is re-read first. If it can't be read or decoded it is
    /// left untouched: the hero is kept for this session only and `false` is
    /// returned.
    pub fn add(&mut self, store: &dyn KeyValueStore, hero: HeroRecord) -> bool {
        let mut heroes = match Self::stored(store) {
            Ok(heroes) => heroes,
            Err(e) => {
                log::warn!("Custom hero not saved, stored list unreadable: {e}");
                self.heroes.push(hero);
                return false;
            }
        };
        heroes.push(hero);
        let saved = match save_json(store, Self::STORAGE_KEY, &heroes) {
            Ok(()) => {
                log::info!("Custom heroes saved ({} entries)", heroes.len());
                true
            }
            Err(e) => {
                log::warn!("Custom hero not saved: {e}");
                false
            }
        };
        self.heroes = heroes;
        saved
    }

    /// Delete a hero from the stored list and write it back
    ///
    /// Returns the updated list, or `None` when the stored list can't be
    /// read or the write failed (the roster is left unchanged in that case).
    pub fn remove(&mut self, store: &dyn KeyValueStore, id: &HeroId) -> Option<&[HeroRecord]> {
        let result = Self::stored(store).and_then(|heroes| {
            let updated: Vec<HeroRecord> = heroes.into_iter().filter(|h| &h.id != id).collect();
            save_json(store, Self::STORAGE_KEY, &updated).map(|()| updated)
        });
        match result {
            Ok(updated) => {
                log::info!("Deleted custom hero {id}");
                self.heroes = updated;
                Some(&self.heroes)
            }
            Err(e) => {
                log::warn!("Can't delete custom hero {id}: {e}");
                None
            }
        }
    }
}
