//! Player state management.

use std::fmt;

use crate::game::Resources;

/// Index of a player in the game's turn order.
pub type PlayerId = usize;

/// State for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Position in the turn order.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Resource ledger.
    pub resources: Resources,
}

impl Player {
    /// Create a new player with a starting ledger.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, resources: Resources) -> Self {
        Self {
            id,
            name: name.into(),
            resources,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} ({}): {}", self.id, self.name, self.resources)
    }
}
