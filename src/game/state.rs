//! Game state management: turn order, unit lifecycle and commands.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{GameConfig, GameRules};
use crate::error::{CommandError, SetupError};
use crate::game::{
    Board, BoardUpdate, Coord, Field, FieldType, Occupant, Player, PlayerId, ResourceKind, Unit,
    UnitId,
};

/// Maximum number of players in a game (one per board edge).
pub const MAX_PLAYERS: usize = 4;

/// Smallest board side on which the four bases do not overlap.
pub const MIN_BOARD_SIDE: u16 = 4;

/// Default board size used by the front ends.
pub const DEFAULT_BOARD_SIZE: (u16, u16) = (10, 10);

/// A player's two spawn fields; units spawn on the first one.
pub type BasePair = [Coord; 2];

/// A player's position in the final ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// The player.
    pub player: PlayerId,
    /// Player name.
    pub name: String,
    /// Diamonds collected.
    pub diamonds: u32,
}

/// Complete game state.
///
/// All mutation goes through the command methods, each of which either
/// applies fully or returns a [`CommandError`] without changing anything.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    /// Append-only; a unit's id is its index.
    units: Vec<Unit>,
    turn: u32,
    rules: GameRules,
}

impl Game {
    /// Start a game with the default config and a random board.
    ///
    /// # Errors
    ///
    /// Returns an error for zero or more than [`MAX_PLAYERS`] players, or a
    /// board smaller than [`MIN_BOARD_SIDE`] on either side.
    pub fn new<S: AsRef<str>>(names: &[S], size: (u16, u16)) -> Result<Self, SetupError> {
        Self::with_seed(names, size, rand::random())
    }

    /// Start a game with the default config and a reproducible board.
    ///
    /// # Errors
    ///
    /// See [`Game::new`].
    pub fn with_seed<S: AsRef<str>>(names: &[S], size: (u16, u16), seed: u64) -> Result<Self, SetupError> {
        Self::with_config(names, size, &GameConfig::default(), seed)
    }

    /// Start a game from an explicit config.
    ///
    /// Every player gets their base pair dug out as tunnels and their
    /// starting units on the first base field. One turn per player is run
    /// so all units start refreshed, then the turn counter goes back to 0.
    ///
    /// # Errors
    ///
    /// See [`Game::new`].
    pub fn with_config<S: AsRef<str>>(
        names: &[S],
        (width, height): (u16, u16),
        config: &GameConfig,
        seed: u64,
    ) -> Result<Self, SetupError> {
        if names.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if names.len() > MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers {
                got: names.len(),
                max: MAX_PLAYERS,
            });
        }
        let too_small = SetupError::BoardTooSmall {
            width,
            height,
            min: MIN_BOARD_SIDE,
        };
        if width < MIN_BOARD_SIDE || height < MIN_BOARD_SIDE {
            return Err(too_small);
        }

        let rules = config.rules;
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Board::generate(width, height, config.grounds.clone(), rules.diamond_deposits, &mut rng)
            .ok_or(too_small)?;

        let players = names
            .iter()
            .enumerate()
            .map(|(id, name)| Player::new(id, name.as_ref(), rules.start_resources))
            .collect();

        let mut game = Self {
            board,
            players,
            units: Vec::new(),
            turn: 0,
            rules,
        };

        let bases = game.bases_coord();
        for base in bases.iter().take(names.len()) {
            for &coord in base {
                game.board.reset_field(coord, FieldType::Tunnel);
            }
            for _ in 0..rules.start_unit_count {
                game.add_unit(base[0]).map_err(|_| too_small)?;
            }
            game.next_turn();
        }
        game.turn = 0;

        log::debug!(
            "game ready: {} players on {width}x{height}, seed {seed}",
            game.players.len()
        );
        Ok(game)
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Rule constants in effect.
    #[must_use]
    pub const fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Number of turns taken since setup.
    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turn
    }

    /// All players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Turn-order index of this player, `None` if it is not seated here.
    #[must_use]
    pub fn player_num(&self, player: &Player) -> Option<PlayerId> {
        self.players
            .get(player.id)
            .filter(|seated| seated.name == player.name)
            .map(|seated| seated.id)
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.turn as usize % self.players.len()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_id()]
    }

    /// Field at a coordinate, `None` off the board.
    #[must_use]
    pub fn field(&self, pos: Coord) -> Option<&Field> {
        self.board.field(pos)
    }

    /// Get a unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Units on a field in stacking order; empty off the board.
    #[must_use]
    pub fn units_on_field(&self, pos: Coord) -> Vec<&Unit> {
        self.board
            .field(pos)
            .map(|field| {
                field
                    .occupants()
                    .iter()
                    .filter_map(|o| self.units.get(o.unit))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All units in id order, optionally only those of one owner.
    pub fn units(&self, owner: Option<PlayerId>) -> impl Iterator<Item = &Unit> {
        self.units
            .iter()
            .filter(move |unit| owner.is_none_or(|owner| unit.owner() == owner))
    }

    /// Spawn fields of all four board edges: west, north, east, south.
    ///
    /// Player `i` uses pair `i`.
    #[must_use]
    pub fn bases_coord(&self) -> [BasePair; MAX_PLAYERS] {
        let w = self.board.width() - 1;
        let h = self.board.height() - 1;
        [
            [Coord::new(0, h / 2), Coord::new(0, h / 2 + 1)],
            [Coord::new(w / 2, 0), Coord::new(w / 2 + 1, 0)],
            [Coord::new(w, h / 2), Coord::new(w, h / 2 + 1)],
            [Coord::new(w / 2, h), Coord::new(w / 2 + 1, h)],
        ]
    }

    /// End the current turn.
    ///
    /// The next player's units dig on every field they occupy, then all of
    /// that player's units get their movement budget back.
    pub fn next_turn(&mut self) -> BoardUpdate {
        self.turn += 1;
        let current = self.current_player_id();

        let update = self.board.update(&mut self.players[current]);
        for unit in &mut self.units {
            unit.update(current);
        }

        log::debug!(
            "turn {}: player {current} harvested {} ({} excavations)",
            self.turn,
            update.harvested,
            update.excavations
        );
        update
    }

    /// Create a unit for the current player at `field_pos`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoField`] if the coordinate is off the board.
    pub fn add_unit(&mut self, field_pos: Coord) -> Result<UnitId, CommandError> {
        let owner = self.current_player_id();
        let id = self.units.len();

        let field = self
            .board
            .field_mut(field_pos)
            .ok_or(CommandError::NoField(field_pos))?;
        field.add_unit(Occupant { unit: id, owner });
        self.units
            .push(Unit::new(id, field_pos, owner, self.rules.max_unit_speed));

        Ok(id)
    }

    /// Buy a unit for the current player; it spawns on their first base field.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Insufficient`] if the player cannot pay the unit cost.
    pub fn buy_unit(&mut self) -> Result<UnitId, CommandError> {
        let current = self.current_player_id();
        let cost = self.rules.unit_cost;
        let available = self.players[current].resources.gold;
        if available < cost {
            return self.reject(CommandError::Insufficient {
                kind: ResourceKind::Gold,
                required: cost,
                available,
            });
        }

        let [spawn, _] = self.bases_coord()[current];
        let id = self.add_unit(spawn)?;
        self.players[current].resources.gold -= cost;

        log::debug!("player {current} bought unit {id}");
        Ok(id)
    }

    /// Give a unit one extra point of movement this cycle.
    ///
    /// The current player must hold at least the speed-up cost in oil. The
    /// oil is checked but not spent.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is unknown, already sped up, or the
    /// player holds too little oil.
    pub fn speed_up_unit(&mut self, unit_id: UnitId) -> Result<(), CommandError> {
        let Some(unit) = self.units.get(unit_id) else {
            return self.reject(CommandError::UnknownUnit(unit_id));
        };
        if unit.is_sped_up() {
            return self.reject(CommandError::AlreadyBoosted(unit_id));
        }
        let cost = self.rules.speed_up_cost;
        let available = self.current_player().resources.oil;
        if available < cost {
            return self.reject(CommandError::Insufficient {
                kind: ResourceKind::Oil,
                required: cost,
                available,
            });
        }

        self.units[unit_id].speed_up();
        Ok(())
    }

    /// Move one of the current player's units.
    ///
    /// Any destination within the unit's remaining Manhattan budget is legal,
    /// regardless of adjacency or how many units already stand there.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is unknown or not the current player's,
    /// either end is off the board, or the destination is out of reach.
    pub fn move_unit(&mut self, unit_id: UnitId, new_pos: Coord) -> Result<(), CommandError> {
        if let Err(err) = self.check_move(unit_id, new_pos) {
            return self.reject(err);
        }

        let unit = &mut self.units[unit_id];
        let from = unit.pos();
        let owner = unit.owner();
        unit.move_to(new_pos);

        let occupant = self
            .board
            .field_mut(from)
            .and_then(|field| field.pop_unit(unit_id))
            .unwrap_or(Occupant { unit: unit_id, owner });
        if let Some(field) = self.board.field_mut(new_pos) {
            field.add_unit(occupant);
        }

        Ok(())
    }

    /// Check whether a front end should offer this move.
    ///
    /// Stricter than [`Game::move_unit`]: the destination must also hold
    /// fewer than `max_units_on_field` units.
    #[must_use]
    pub fn is_unit_can_move(&self, unit_id: UnitId, new_pos: Coord) -> bool {
        if self.check_move(unit_id, new_pos).is_err() {
            return false;
        }
        if self.units[unit_id].pos() == new_pos {
            return true;
        }
        self.board
            .field(new_pos)
            .is_some_and(|field| field.unit_count() < self.rules.max_units_on_field as usize)
    }

    fn check_move(&self, unit_id: UnitId, new_pos: Coord) -> Result<(), CommandError> {
        let unit = self
            .units
            .get(unit_id)
            .ok_or(CommandError::UnknownUnit(unit_id))?;

        let current = self.current_player_id();
        if unit.owner() != current {
            return Err(CommandError::NotYourUnit {
                unit: unit_id,
                owner: unit.owner(),
                current,
            });
        }
        if self.board.field(unit.pos()).is_none() {
            return Err(CommandError::NoField(unit.pos()));
        }
        if self.board.field(new_pos).is_none() {
            return Err(CommandError::NoField(new_pos));
        }
        if !unit.can_move(new_pos) {
            return Err(CommandError::OutOfReach {
                unit: unit_id,
                distance: unit.pos().manhattan(new_pos),
                budget: unit.speed(),
            });
        }
        Ok(())
    }

    fn reject<T>(&self, err: CommandError) -> Result<T, CommandError> {
        log::debug!("player {} command rejected: {err}", self.current_player_id());
        Err(err)
    }

    /// Check if the game is over.
    ///
    /// The game ends after `max_rounds` full rounds or once every diamond
    /// field has been dug out.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        let turn_limit = u64::from(self.rules.max_rounds) * self.players.len() as u64;
        u64::from(self.turn) >= turn_limit || self.board.count(FieldType::Diamond) == 0
    }

    /// Players ranked by diamonds, most first.
    ///
    /// Ties go to the name sorting last, then to the later seat.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<_> = self
            .players
            .iter()
            .map(|p| Standing {
                player: p.id,
                name: p.name.clone(),
                diamonds: p.resources.diamond,
            })
            .collect();
        standings.sort_by(|a, b| (b.diamonds, &b.name, b.player).cmp(&(a.diamonds, &a.name, a.player)));
        standings
    }

    /// The sole diamond leader of a finished game.
    ///
    /// `None` while the game runs or if the lead is shared.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_game_over() {
            return None;
        }
        match self.standings().as_slice() {
            [first, second, ..] if first.diamonds == second.diamonds => None,
            [first, ..] => Some(first.player),
            [] => None,
        }
    }
}
