//! Game layer for Delve.
//!
//! Implements the simulation rules:
//! - Board of fields (tunnels, soil, deposits, lava, stone)
//! - Fields that wear down and excavate as units dig
//! - Players with resource ledgers
//! - Units with per-turn movement budgets
//! - Turn order, commands and scoring

mod board;
mod field;
mod invariants;
mod player;
mod resources;
mod state;
mod unit;

pub use board::{Board, BoardUpdate, Coord};
pub use field::{Field, FieldType, FieldUpdate, Occupant};
pub use invariants::{check_invariants, InvariantViolation};
pub use player::{Player, PlayerId};
pub use resources::{ResourceKind, Resources};
pub use state::{BasePair, Game, Standing, DEFAULT_BOARD_SIZE, MAX_PLAYERS, MIN_BOARD_SIDE};
pub use unit::{Unit, UnitId};
