//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger for a game driven only through its command
//! methods. If they do, it indicates a bug in the engine.

use crate::game::{FieldType, Game};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(game: &Game) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut push = |message: String| violations.push(InvariantViolation { message });

    // Registry: id is the index, owner exists, unit stands on its field once
    for (idx, unit) in game.units(None).enumerate() {
        if unit.id() != idx {
            push(format!("Unit at registry index {idx} has id {}", unit.id()));
        }
        if game.player(unit.owner()).is_none() {
            push(format!("Unit {} owned by unknown player {}", unit.id(), unit.owner()));
        }
        if unit.speed() > unit.max_speed() + 1 {
            push(format!(
                "Unit {} has speed {} above max {} + boost",
                unit.id(),
                unit.speed(),
                unit.max_speed()
            ));
        }

        match game.field(unit.pos()) {
            None => push(format!("Unit {} stands off the board at {}", unit.id(), unit.pos())),
            Some(field) => {
                let copies = field.occupants().iter().filter(|o| o.unit == unit.id()).count();
                if copies != 1 {
                    push(format!(
                        "Unit {} listed {copies} times on its field {}",
                        unit.id(),
                        unit.pos()
                    ));
                }
            }
        }
    }

    // Fields: occupants match the registry, durability within the type's max
    let mut occupant_total = 0usize;
    for (coord, field) in game.board().iter() {
        occupant_total += field.unit_count();

        for occupant in field.occupants() {
            match game.unit(occupant.unit) {
                None => push(format!("Field {coord} lists unknown unit {}", occupant.unit)),
                Some(unit) => {
                    if unit.pos() != coord {
                        push(format!(
                            "Field {coord} lists unit {} which is at {}",
                            unit.id(),
                            unit.pos()
                        ));
                    }
                    if unit.owner() != occupant.owner {
                        push(format!(
                            "Field {coord} caches owner {} for unit {} owned by {}",
                            occupant.owner,
                            unit.id(),
                            unit.owner()
                        ));
                    }
                }
            }
        }

        let max = game.board().grounds().get(field.field_type()).max_durability;
        if field.durability() > max {
            push(format!(
                "Field {coord} durability {} exceeds {:?} max {max}",
                field.durability(),
                field.field_type()
            ));
        }
    }

    let unit_total = game.units(None).count();
    if occupant_total != unit_total {
        push(format!("{occupant_total} occupants on the board for {unit_total} units"));
    }

    // Bases of the players in the game stay dug out
    let bases = game.bases_coord();
    for player in game.players() {
        for coord in bases[player.id] {
            let ty = game.field(coord).map(crate::game::Field::field_type);
            if ty != Some(FieldType::Tunnel) {
                push(format!("Base {coord} of player {} is {ty:?}", player.id));
            }
        }
    }

    violations
}
