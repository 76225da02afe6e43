//! Game configuration: ground properties and rule constants.
//!
//! Both parts load from one JSON document:
//!
//! ```text
//! {
//!   "rules":   { "unit_cost": 5, ... },          (optional, defaults apply)
//!   "grounds": { "soil": { "title": "Soil", "max_durability": 2,
//!                          "resource": null, "next_ground": "tunnel" }, ... }
//! }
//! ```
//!
//! Every field type needs a `grounds` entry. The built-in defaults match
//! `res/ground_properties.json`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{FieldType, ResourceKind, Resources};

/// Static properties of one field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundProperties {
    /// Display title.
    pub title: String,
    /// Durability a fresh field of this type starts with.
    pub max_durability: u32,
    /// Resource credited per worker per turn, if any.
    pub resource: Option<ResourceKind>,
    /// Type the field turns into once dug out.
    pub next_ground: FieldType,
}

impl GroundProperties {
    fn new(title: &str, max_durability: u32, resource: Option<ResourceKind>, next_ground: FieldType) -> Self {
        Self {
            title: title.to_string(),
            max_durability,
            resource,
            next_ground,
        }
    }
}

/// Lookup table of ground properties, one entry per [`FieldType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTable {
    entries: [GroundProperties; FieldType::COUNT],
}

impl FieldTable {
    /// Build a table from entries keyed by field type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingGround`] if any field type has no entry.
    pub fn from_map(mut map: HashMap<FieldType, GroundProperties>) -> Result<Self, ConfigError> {
        let mut take = |ty: FieldType| map.remove(&ty).ok_or(ConfigError::MissingGround(ty));
        Ok(Self {
            entries: [
                take(FieldType::Tunnel)?,
                take(FieldType::Soil)?,
                take(FieldType::Oil)?,
                take(FieldType::Diamond)?,
                take(FieldType::Gold)?,
                take(FieldType::Lava)?,
                take(FieldType::Stone)?,
            ],
        })
    }

    /// Properties of a field type.
    #[must_use]
    #[inline]
    pub fn get(&self, ty: FieldType) -> &GroundProperties {
        &self.entries[ty.index()]
    }

    fn to_map(&self) -> HashMap<FieldType, GroundProperties> {
        FieldType::ALL
            .into_iter()
            .map(|ty| (ty, self.get(ty).clone()))
            .collect()
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        use FieldType::{Soil, Stone, Tunnel};

        Self {
            entries: [
                GroundProperties::new("Tunnel", 0, None, Tunnel),
                GroundProperties::new("Soil", 2, None, Tunnel),
                GroundProperties::new("Oil", 4, Some(ResourceKind::Oil), Soil),
                GroundProperties::new("Diamond", 6, Some(ResourceKind::Diamond), Soil),
                GroundProperties::new("Gold", 4, Some(ResourceKind::Gold), Soil),
                GroundProperties::new("Lava", 3, None, Stone),
                GroundProperties::new("Stone", 5, None, Tunnel),
            ],
        }
    }
}

/// Rule constants for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Occupancy cap checked by [`Game::is_unit_can_move`](crate::Game::is_unit_can_move).
    pub max_units_on_field: u32,
    /// Movement budget a unit gets every turn.
    pub max_unit_speed: u32,
    /// Gold price of a new unit.
    pub unit_cost: u32,
    /// Oil a player must hold to speed up a unit.
    pub speed_up_cost: u32,
    /// Units each player starts with.
    pub start_unit_count: u32,
    /// Ledger each player starts with.
    pub start_resources: Resources,
    /// Diamond fields forced onto a fresh board.
    pub diamond_deposits: u32,
    /// Rounds (one turn per player) before the game ends.
    pub max_rounds: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_units_on_field: 3,
            max_unit_speed: 3,
            unit_cost: 5,
            speed_up_cost: 2,
            start_unit_count: 3,
            start_resources: Resources::new(0, 10, 0),
            diamond_deposits: 10,
            max_rounds: 50,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawConfig {
    #[serde(default)]
    rules: GameRules,
    grounds: HashMap<FieldType, GroundProperties>,
}

/// Complete configuration for creating games.
///
/// The ground table is shared so many games can be built from one config.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// Rule constants.
    pub rules: GameRules,
    /// Ground properties.
    pub grounds: Arc<FieldTable>,
}

impl GameConfig {
    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a ground entry is missing.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Ok(Self {
            rules: raw.rules,
            grounds: Arc::new(FieldTable::from_map(raw.grounds)?),
        })
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize this configuration back to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        let raw = RawConfig {
            rules: self.rules,
            grounds: self.grounds.to_map(),
        };
        Ok(serde_json::to_string_pretty(&raw)?)
    }
}
