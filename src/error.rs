//! Error types for the simulation core and its front ends.

use std::io;

use thiserror::Error;

use crate::game::{Coord, FieldType, PlayerId, ResourceKind, UnitId};

/// Why a game could not be set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    /// At least one player name is required.
    #[error("a game needs at least one player")]
    NoPlayers,
    /// There are only four bases on a board.
    #[error("at most {max} players are supported, got {got}")]
    TooManyPlayers {
        /// Requested player count.
        got: usize,
        /// Supported maximum.
        max: usize,
    },
    /// Bases would overlap or fall off the board.
    #[error("board {width}x{height} is too small (minimum {min}x{min})")]
    BoardTooSmall {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
        /// Minimum side length.
        min: u16,
    },
}

/// A rejected game command.
///
/// A command that returns one of these has not changed the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No unit is registered under this id.
    #[error("unit {0} does not exist")]
    UnknownUnit(UnitId),
    /// The unit belongs to someone other than the current player.
    #[error("unit {unit} belongs to player {owner}, not player {current}")]
    NotYourUnit {
        /// The unit in question.
        unit: UnitId,
        /// Its owner.
        owner: PlayerId,
        /// Whose turn it is.
        current: PlayerId,
    },
    /// The coordinate is off the board.
    #[error("no field at {0}")]
    NoField(Coord),
    /// The destination is further than the unit's remaining budget.
    #[error("unit {unit} cannot reach distance {distance} with budget {budget}")]
    OutOfReach {
        /// The unit in question.
        unit: UnitId,
        /// Manhattan distance to the destination.
        distance: u32,
        /// Remaining movement budget.
        budget: u32,
    },
    /// The unit was already sped up this cycle.
    #[error("unit {0} is already sped up")]
    AlreadyBoosted(UnitId),
    /// The current player cannot afford the command.
    #[error("not enough {kind}: need {required}, have {available}")]
    Insufficient {
        /// Resource that is short.
        kind: ResourceKind,
        /// Amount the command costs.
        required: u32,
        /// Amount the player holds.
        available: u32,
    },
}

/// Failure to load game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    /// The document is not valid configuration JSON.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A field type has no properties entry.
    #[error("no ground properties for {0:?}")]
    MissingGround(FieldType),
}

/// A console line that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// The first token is not a known command.
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    /// A required argument was not given.
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// Human description of the arguments.
        expected: &'static str,
    },
    /// An argument is not a valid number.
    #[error("`{0}` is not a valid number")]
    BadNumber(String),
}
