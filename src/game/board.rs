//! Board and coordinate types.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::config::FieldTable;
use crate::game::{Field, FieldType, Player, Resources};

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    #[must_use]
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u16, u16)> for Coord {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x, y)
    }
}

/// Totals from one [`Board::update`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardUpdate {
    /// Units of the current player that worked a field.
    pub workers: u32,
    /// Resources credited to the current player.
    pub harvested: Resources,
    /// Fields that were excavated.
    pub excavations: u32,
}

/// The game board.
#[derive(Debug, Clone)]
pub struct Board {
    /// Width of the board in fields.
    width: u16,
    /// Height of the board in fields.
    height: u16,
    /// Fields stored in row-major order.
    fields: Vec<Field>,
    /// Ground properties shared with the config.
    grounds: Arc<FieldTable>,
}

impl Board {
    /// Create a board with every field of one type.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn filled(width: u16, height: u16, field_type: FieldType, grounds: Arc<FieldTable>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        let fields = vec![Field::new(field_type, &grounds); size];

        Some(Self {
            width,
            height,
            fields,
            grounds,
        })
    }

    /// Generate a random board.
    ///
    /// Each field gets a random [`FieldType::TERRAIN`] type, then
    /// `diamond_deposits` random coordinates are overwritten with diamonds.
    /// Deposits may land on the same coordinate twice.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(
        width: u16,
        height: u16,
        grounds: Arc<FieldTable>,
        diamond_deposits: u32,
        rng: &mut R,
    ) -> Option<Self> {
        let mut board = Self::filled(width, height, FieldType::Soil, grounds)?;

        for idx in 0..board.fields.len() {
            let ty = FieldType::TERRAIN[rng.random_range(0..FieldType::TERRAIN.len())];
            board.fields[idx].reset(ty, &board.grounds);
        }

        for _ in 0..diamond_deposits {
            let coord = Coord::new(rng.random_range(0..width), rng.random_range(0..height));
            board.reset_field(coord, FieldType::Diamond);
        }

        Some(board)
    }

    /// Get the width of the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Ground properties this board was built with.
    #[must_use]
    pub fn grounds(&self) -> &FieldTable {
        &self.grounds
    }

    /// Get a reference to the raw fields slice in row-major order.
    #[must_use]
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Check if a coordinate is within the board bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Convert a coordinate to an index into the fields array.
    #[must_use]
    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Get the field at the given coordinate.
    #[must_use]
    pub fn field(&self, coord: Coord) -> Option<&Field> {
        self.coord_to_index(coord).map(|idx| &self.fields[idx])
    }

    /// Get a mutable reference to the field at the given coordinate.
    #[must_use]
    pub fn field_mut(&mut self, coord: Coord) -> Option<&mut Field> {
        self.coord_to_index(coord).map(|idx| &mut self.fields[idx])
    }

    /// Change the ground type at `coord`, keeping its occupants.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn reset_field(&mut self, coord: Coord, field_type: FieldType) -> bool {
        match self.coord_to_index(coord) {
            Some(idx) => {
                self.fields[idx].reset(field_type, &self.grounds);
                true
            }
            None => false,
        }
    }

    /// Iterate over all coordinates and fields.
    // Indices are below width * height, both u16
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Field)> {
        let width = usize::from(self.width);
        self.fields.iter().enumerate().map(move |(idx, field)| {
            let x = (idx % width) as u16;
            let y = (idx / width) as u16;
            (Coord::new(x, y), field)
        })
    }

    /// Count fields of a given type.
    #[must_use]
    pub fn count(&self, field_type: FieldType) -> usize {
        self.fields
            .iter()
            .filter(|field| field.field_type() == field_type)
            .count()
    }

    /// Let `player`'s units dig on every field, in row-major order.
    pub fn update(&mut self, player: &mut Player) -> BoardUpdate {
        let mut total = BoardUpdate::default();

        for field in &mut self.fields {
            let update = field.update(player, &self.grounds);
            total.workers += update.workers;
            if let Some(kind) = update.resource {
                total.harvested.credit(kind, update.workers);
            }
            if update.excavated {
                total.excavations += 1;
            }
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Occupant;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn soil_board(width: u16, height: u16) -> Board {
        Board::filled(width, height, FieldType::Soil, Arc::new(FieldTable::default())).unwrap()
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Coord::new(0, 0).manhattan(Coord::new(3, 4)), 7);
        assert_eq!(Coord::new(5, 1).manhattan(Coord::new(2, 3)), 5);
        assert_eq!(Coord::new(2, 2).manhattan(Coord::new(2, 2)), 0);
    }

    #[test]
    fn test_board_zero_size() {
        let grounds = Arc::new(FieldTable::default());
        assert!(Board::filled(0, 10, FieldType::Soil, grounds.clone()).is_none());
        assert!(Board::filled(10, 0, FieldType::Soil, grounds).is_none());
    }

    #[test]
    fn test_board_bounds() {
        let board = soil_board(10, 8);
        assert!(board.field(Coord::new(0, 0)).is_some());
        assert!(board.field(Coord::new(9, 7)).is_some());
        assert!(board.field(Coord::new(10, 0)).is_none());
        assert!(board.field(Coord::new(0, 8)).is_none());
    }

    #[test]
    fn test_iter_is_row_major() {
        let board = soil_board(3, 2);
        let coords: Vec<_> = board.iter().map(|(coord, _)| coord).collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[2], Coord::new(2, 0));
        assert_eq!(coords[3], Coord::new(0, 1));
        assert_eq!(coords.len(), 6);
    }

    #[test]
    fn test_generate_is_seeded() {
        let grounds = Arc::new(FieldTable::default());
        let a = Board::generate(12, 12, grounds.clone(), 10, &mut SmallRng::seed_from_u64(7)).unwrap();
        let b = Board::generate(12, 12, grounds, 10, &mut SmallRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.fields(), b.fields());
    }

    #[test]
    fn test_generate_uses_terrain_and_diamonds() {
        let grounds = Arc::new(FieldTable::default());
        let board = Board::generate(10, 10, grounds, 10, &mut SmallRng::seed_from_u64(1)).unwrap();

        assert_eq!(board.count(FieldType::Tunnel), 0);
        let diamonds = board.count(FieldType::Diamond);
        assert!((1..=10).contains(&diamonds), "got {diamonds} diamonds");
    }

    #[test]
    fn test_update_harvests_everywhere() {
        let mut board = soil_board(4, 4);
        board.reset_field(Coord::new(1, 1), FieldType::Gold);
        board.reset_field(Coord::new(3, 2), FieldType::Oil);
        board
            .field_mut(Coord::new(1, 1))
            .unwrap()
            .add_unit(Occupant { unit: 0, owner: 0 });
        board
            .field_mut(Coord::new(3, 2))
            .unwrap()
            .add_unit(Occupant { unit: 1, owner: 0 });

        let mut player = Player::new(0, "A", Resources::default());
        let update = board.update(&mut player);

        assert_eq!(update.workers, 2);
        assert_eq!(update.harvested, Resources::new(0, 1, 1));
        assert_eq!(player.resources, Resources::new(0, 1, 1));
    }
}
