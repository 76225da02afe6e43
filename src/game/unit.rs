//! Worker units.

use std::fmt;

use crate::game::{Coord, PlayerId};

/// Stable identifier of a unit; doubles as its index in the game registry.
pub type UnitId = usize;

/// A worker belonging to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    id: UnitId,
    pos: Coord,
    owner: PlayerId,
    speed: u32,
    max_speed: u32,
    sped_up: bool,
}

impl Unit {
    /// Create a unit with a full movement budget.
    #[must_use]
    pub const fn new(id: UnitId, pos: Coord, owner: PlayerId, max_speed: u32) -> Self {
        Self {
            id,
            pos,
            owner,
            speed: max_speed,
            max_speed,
            sped_up: false,
        }
    }

    /// Unit id.
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Current position.
    #[must_use]
    pub const fn pos(&self) -> Coord {
        self.pos
    }

    /// Owning player.
    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Remaining movement budget.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Budget restored at the start of each of the owner's turns.
    #[must_use]
    pub const fn max_speed(&self) -> u32 {
        self.max_speed
    }

    /// Whether the unit was sped up this cycle.
    #[must_use]
    pub const fn is_sped_up(&self) -> bool {
        self.sped_up
    }

    /// Check that `new_pos` is within the remaining budget.
    ///
    /// Only distance counts; board edges and occupancy are the caller's concern.
    #[must_use]
    pub fn can_move(&self, new_pos: Coord) -> bool {
        self.pos.manhattan(new_pos) <= self.speed
    }

    /// Move to `new_pos`, spending the Manhattan distance from the budget.
    ///
    /// Returns `false` and leaves the unit untouched if the move is out of reach.
    pub fn move_to(&mut self, new_pos: Coord) -> bool {
        if !self.can_move(new_pos) {
            return false;
        }
        self.speed -= self.pos.manhattan(new_pos);
        self.pos = new_pos;
        true
    }

    /// Add one point of budget, once per cycle.
    pub fn speed_up(&mut self) {
        if !self.sped_up {
            self.speed = self.speed.saturating_add(1);
            self.sped_up = true;
        }
    }

    /// Refresh the unit if it is `current_player`'s turn.
    pub fn update(&mut self, current_player: PlayerId) {
        if current_player == self.owner {
            self.sped_up = false;
            self.speed = self.max_speed;
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unit {} at {} speed={}/{} player={}",
            self.id, self.pos, self.speed, self.max_speed, self.owner
        )?;
        if self.sped_up {
            f.write_str(" (sped up)")?;
        }
        Ok(())
    }
}
