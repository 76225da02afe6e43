// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Delve: a turn-based digging game for up to four players.
//!
//! Players take turns moving worker units across a grid of fields. Units
//! dig the fields they stand on, wearing them down turn after turn; resource
//! fields pay out gold, oil or diamonds while they last and collapse into
//! softer ground once exhausted. The player holding the most diamonds when
//! the round limit is reached or the last diamond vein is gone wins.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  delve CLI: play / simulate / validate    │
//! ├─────────────────────┬─────────────────────┤
//! │  console (session)  │  sim (autoplayer)   │
//! ├─────────────────────┴─────────────────────┤
//! │  game: Game, Board, Field, Unit, Player   │
//! ├───────────────────────────────────────────┤
//! │  config: rules + ground properties (JSON) │
//! └───────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod render;
pub mod sim;

pub use config::{FieldTable, GameConfig, GameRules, GroundProperties};
pub use error::{CommandError, ConfigError, ConsoleError, SetupError};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, Coord, Field, FieldType, Game, Player, PlayerId, ResourceKind, Resources, Unit, UnitId,
};
