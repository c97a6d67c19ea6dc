//! Heroes: the built-in characters and player-made ones
//!
//! Body types and accessories are stored by numeric id.

pub mod roster;

use serde::{Deserialize, Serialize};

pub use roster::{DEFAULT_HERO_NAME, HeroDraft, HeroId, HeroRecord, HeroRoster};

/// Palette offered by the hero builder
pub const COLORS: [&str; 5] = ["#FF6B6B", "#4A90E2", "#50C878", "#FFD700", "#9B59B6"];

/// Body shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BodyType {
    /// Rounded box
    TypeA,
    /// Round
    TypeB,
    /// Square box
    TypeC,
}

impl BodyType {
    pub const ALL: [BodyType; 3] = [BodyType::TypeA, BodyType::TypeB, BodyType::TypeC];

    pub fn id(&self) -> u8 {
        match self {
            BodyType::TypeA => 1,
            BodyType::TypeB => 2,
            BodyType::TypeC => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BodyType::TypeA => "Type A",
            BodyType::TypeB => "Type B",
            BodyType::TypeC => "Type C",
        }
    }
}

impl TryFrom<u8> for BodyType {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        BodyType::ALL
            .into_iter()
            .find(|b| b.id() == id)
            .ok_or_else(|| format!("unknown body type id {id}"))
    }
}

impl From<BodyType> for u8 {
    fn from(body: BodyType) -> u8 {
        body.id()
    }
}

/// Optional extras drawn over the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Accessory {
    Hat,
    Glasses,
    Cape,
}

impl Accessory {
    pub const ALL: [Accessory; 3] = [Accessory::Hat, Accessory::Glasses, Accessory::Cape];

    pub fn id(&self) -> u8 {
        match self {
            Accessory::Hat => 1,
            Accessory::Glasses => 2,
            Accessory::Cape => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Accessory::Hat => "Hat",
            Accessory::Glasses => "Glasses",
            Accessory::Cape => "Cape",
        }
    }
}

impl TryFrom<u8> for Accessory {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Accessory::ALL
            .into_iter()
            .find(|a| a.id() == id)
            .ok_or_else(|| format!("unknown accessory id {id}"))
    }
}

impl From<Accessory> for u8 {
    fn from(accessory: Accessory) -> u8 {
        accessory.id()
    }
}

/// Which character this is
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CharacterId {
    Builtin(u8),
    Custom(HeroId),
}

/// A playable character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub body_type: BodyType,
    pub color: String,
    pub accessories: Vec<Accessory>,
}

impl Character {
    pub fn is_custom(&self) -> bool {
        matches!(self.id, CharacterId::Custom(_))
    }
}

impl From<&HeroRecord> for Character {
    fn from(hero: &HeroRecord) -> Self {
        Self {
            id: CharacterId::Custom(hero.id.clone()),
            name: hero.name.clone(),
            body_type: hero.body_type,
            color: hero.color.clone(),
            accessories: hero.accessories.clone(),
        }
    }
}

/// The characters every player starts with
pub fn builtin_characters() -> Vec<Character> {
    let builtin = |id, name: &str, body_type, color: &str| Character {
        id: CharacterId::Builtin(id),
        name: name.to_string(),
        body_type,
        color: color.to_string(),
        accessories: Vec::new(),
    };
    vec![
        builtin(1, "Bobby Bounce", BodyType::TypeA, "#FF6B6B"),
        builtin(2, "Robo Catcher", BodyType::TypeC, "#4A90E2"),
        builtin(3, "Cosmic Collector", BodyType::TypeB, "#50C878"),
    ]
}

/// Selection list: built-ins first, then custom heroes oldest first
pub fn all_characters(roster: &HeroRoster) -> Vec<Character> {
    builtin_characters()
        .into_iter()
        .chain(roster.heroes.iter().map(Character::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_u8() {
        for body in BodyType::ALL {
            assert_eq!(BodyType::try_from(body.id()), Ok(body));
        }
        for accessory in Accessory::ALL {
            assert_eq!(Accessory::try_from(accessory.id()), Ok(accessory));
        }
        assert!(BodyType::try_from(0).is_err());
        assert!(Accessory::try_from(4).is_err());
    }

    #[test]
    fn test_unknown_body_id_rejected_on_decode() {
        let json = r##"{"id":"x","name":"n","bodyTypeId":9,"colorHex":"#fff","accessoryIds":[]}"##;
        assert!(serde_json::from_str::<HeroRecord>(json).is_err());
    }

    #[test]
    fn test_selection_order() {
        let mut roster = HeroRoster::new();
        roster.heroes.push(HeroDraft::default().build(HeroId("h1".into())));
        let characters = all_characters(&roster);
        assert_eq!(characters.len(), 4);
        assert_eq!(characters[0].name, "Bobby Bounce");
        assert!(!characters[2].is_custom());
        assert!(characters[3].is_custom());
        assert_eq!(characters[3].id, CharacterId::Custom(HeroId("h1".into())));
    }
}
