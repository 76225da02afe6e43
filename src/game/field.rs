//! Field (grid cell) types and excavation.

use serde::{Deserialize, Serialize};

use crate::config::FieldTable;
use crate::game::{Player, PlayerId, ResourceKind, UnitId};

/// Kind of ground on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FieldType {
    /// Dug-out ground. Bases are tunnels.
    Tunnel = 0,
    /// Plain soil.
    Soil = 1,
    /// Oil deposit.
    Oil = 2,
    /// Diamond deposit.
    Diamond = 3,
    /// Gold deposit.
    Gold = 4,
    /// Lava, hardens into stone.
    Lava = 5,
    /// Stone.
    Stone = 6,
}

impl FieldType {
    /// Number of field types.
    pub const COUNT: usize = 7;

    /// All types in discriminant order.
    pub const ALL: [FieldType; Self::COUNT] = [
        FieldType::Tunnel,
        FieldType::Soil,
        FieldType::Oil,
        FieldType::Diamond,
        FieldType::Gold,
        FieldType::Lava,
        FieldType::Stone,
    ];

    /// Types a fresh board is randomly filled with.
    pub const TERRAIN: [FieldType; 5] = [
        FieldType::Soil,
        FieldType::Oil,
        FieldType::Gold,
        FieldType::Lava,
        FieldType::Stone,
    ];

    /// Table slot of this type.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// One-letter code used by the text view.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            FieldType::Tunnel => '.',
            FieldType::Soil => 's',
            FieldType::Oil => 'o',
            FieldType::Diamond => 'D',
            FieldType::Gold => 'G',
            FieldType::Lava => '~',
            FieldType::Stone => '#',
        }
    }
}

/// A unit standing on a field.
///
/// The owner is cached here because it never changes after a unit is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    /// The unit.
    pub unit: UnitId,
    /// The unit's owner.
    pub owner: PlayerId,
}

/// What happened to a field during one [`Field::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldUpdate {
    /// The current player's units working the field.
    pub workers: u32,
    /// Resource credited to the player (`workers` of it), if the field yields one.
    pub resource: Option<ResourceKind>,
    /// Whether the field was excavated.
    pub excavated: bool,
}

/// A single cell on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    ground: FieldType,
    durability: u32,
    occupants: Vec<Occupant>,
}

impl Field {
    /// Create a fresh, empty field of the given type.
    #[must_use]
    pub fn new(field_type: FieldType, table: &FieldTable) -> Self {
        Self {
            ground: field_type,
            durability: table.get(field_type).max_durability,
            occupants: Vec::new(),
        }
    }

    /// Current ground type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.ground
    }

    /// Remaining durability.
    #[must_use]
    pub const fn durability(&self) -> u32 {
        self.durability
    }

    /// Units on this field in stacking order.
    #[must_use]
    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Number of units on this field.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.occupants.len()
    }

    /// Check whether a unit stands here.
    #[must_use]
    pub fn contains(&self, unit: UnitId) -> bool {
        self.occupants.iter().any(|o| o.unit == unit)
    }

    /// Replace the ground type, restoring full durability. Occupants stay.
    pub fn reset(&mut self, field_type: FieldType, table: &FieldTable) {
        self.ground = field_type;
        self.durability = table.get(field_type).max_durability;
    }

    /// Turn the field into its next ground type.
    pub fn excavate(&mut self, table: &FieldTable) {
        let next = table.get(self.ground).next_ground;
        log::trace!("excavating {:?} into {next:?}", self.ground);
        self.reset(next, table);
    }

    /// Whether this type excavates into itself and so never changes.
    #[must_use]
    pub fn is_terminal(&self, table: &FieldTable) -> bool {
        table.get(self.ground).next_ground == self.ground
    }

    /// Put a unit on top of the stack.
    pub fn add_unit(&mut self, occupant: Occupant) {
        self.occupants.push(occupant);
    }

    /// Take a unit off this field, keeping the order of the others.
    ///
    /// Returns `None` if the unit is not here.
    pub fn pop_unit(&mut self, unit: UnitId) -> Option<Occupant> {
        let idx = self.occupants.iter().position(|o| o.unit == unit)?;
        Some(self.occupants.remove(idx))
    }

    /// Let the current player's units dig for one turn.
    ///
    /// Each worker wears one point of durability and, on a resource field,
    /// earns the player one unit of that resource. A field worn down to zero
    /// is excavated once.
    pub fn update(&mut self, player: &mut Player, table: &FieldTable) -> FieldUpdate {
        let workers = self.occupants.iter().filter(|o| o.owner == player.id).count();
        let workers = u32::try_from(workers).unwrap_or(u32::MAX);
        let resource = table.get(self.ground).resource;

        self.durability = self.durability.saturating_sub(workers);
        if let Some(kind) = resource {
            player.resources.credit(kind, workers);
        }

        let excavated = self.durability == 0 && !self.is_terminal(table);
        if excavated {
            self.excavate(table);
        }

        FieldUpdate {
            workers,
            resource,
            excavated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Resources;

    fn occupant(unit: UnitId, owner: PlayerId) -> Occupant {
        Occupant { unit, owner }
    }

    #[test]
    fn test_new_field_has_full_durability() {
        let table = FieldTable::default();
        let field = Field::new(FieldType::Gold, &table);
        assert_eq!(field.field_type(), FieldType::Gold);
        assert_eq!(field.durability(), 4);
        assert_eq!(field.unit_count(), 0);
    }

    #[test]
    fn test_pop_missing_unit() {
        let table = FieldTable::default();
        let mut field = Field::new(FieldType::Soil, &table);
        field.add_unit(occupant(0, 0));

        assert_eq!(field.pop_unit(7), None);
        assert_eq!(field.unit_count(), 1);
    }

    #[test]
    fn test_pop_keeps_stacking_order() {
        let table = FieldTable::default();
        let mut field = Field::new(FieldType::Soil, &table);
        for id in 0..3 {
            field.add_unit(occupant(id, 0));
        }

        assert_eq!(field.pop_unit(1), Some(occupant(1, 0)));
        let ids: Vec<_> = field.occupants().iter().map(|o| o.unit).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_update_credits_only_current_player_workers() {
        let table = FieldTable::default();
        let mut field = Field::new(FieldType::Gold, &table);
        field.add_unit(occupant(0, 0));
        field.add_unit(occupant(1, 0));
        field.add_unit(occupant(2, 1));

        let mut player = Player::new(0, "A", Resources::default());
        let update = field.update(&mut player, &table);

        assert_eq!(update.workers, 2);
        assert_eq!(update.resource, Some(ResourceKind::Gold));
        assert!(!update.excavated);
        assert_eq!(player.resources.gold, 2);
        assert_eq!(field.durability(), 2);
    }

    #[test]
    fn test_update_without_resource() {
        let table = FieldTable::default();
        let mut field = Field::new(FieldType::Stone, &table);
        field.add_unit(occupant(0, 0));

        let mut player = Player::new(0, "A", Resources::default());
        field.update(&mut player, &table);

        assert_eq!(player.resources, Resources::default());
        assert_eq!(field.durability(), 4);
    }

    #[test]
    fn test_exhausted_field_excavates_once() {
        let table = FieldTable::default();
        let mut field = Field::new(FieldType::Soil, &table);
        for id in 0..5 {
            field.add_unit(occupant(id, 0));
        }

        let mut player = Player::new(0, "A", Resources::default());
        let update = field.update(&mut player, &table);

        assert!(update.excavated);
        assert_eq!(field.field_type(), FieldType::Tunnel);
        assert_eq!(field.unit_count(), 5);
    }

    #[test]
    fn test_lava_chain() {
        let table = FieldTable::default();
        let mut field = Field::new(FieldType::Lava, &table);
        field.add_unit(occupant(0, 0));
        let mut player = Player::new(0, "A", Resources::default());

        for _ in 0..3 {
            field.update(&mut player, &table);
        }
        assert_eq!(field.field_type(), FieldType::Stone);
        assert_eq!(field.durability(), 5);
    }

    #[test]
    fn test_tunnel_is_terminal() {
        let table = FieldTable::default();
        let mut field = Field::new(FieldType::Tunnel, &table);
        field.add_unit(occupant(0, 0));
        let mut player = Player::new(0, "A", Resources::default());

        let update = field.update(&mut player, &table);
        assert!(!update.excavated);
        assert_eq!(field.field_type(), FieldType::Tunnel);
    }
}
