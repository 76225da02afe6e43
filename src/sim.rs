//! Self-play: a seeded autoplayer that drives whole games.
//!
//! The autoplayer only uses the public command surface of [`Game`], the same
//! way the console does, so simulated games double as an end-to-end check of
//! the rules. A game is a pure function of `(seed, SimConfig)`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::SetupError;
use crate::game::{
    Coord, FieldType, Game, PlayerId, ResourceKind, Resources, Standing, Unit, UnitId,
    DEFAULT_BOARD_SIZE,
};

/// Units a bot stops buying at.
const MAX_BOT_UNITS: usize = 8;

/// Setup shared by every game of a batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of bot players.
    pub players: usize,
    /// Board width and height.
    pub size: (u16, u16),
    /// Rules and ground table.
    pub config: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            players: 2,
            size: DEFAULT_BOARD_SIZE,
            config: GameConfig::default(),
        }
    }
}

impl SimConfig {
    /// Bot names in turn order.
    #[must_use]
    pub fn player_names(&self) -> Vec<String> {
        (0..self.players).map(|i| format!("Bot {i}")).collect()
    }
}

/// Final result of a simulated game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// Total turns played.
    pub turns_played: u32,
    /// Sole diamond leader, `None` on a tie.
    pub winner: Option<PlayerId>,
    /// Ranking, most diamonds first.
    pub standings: Vec<Standing>,
    /// Every player's ledger at the end, in turn order.
    pub resources: Vec<Resources>,
    /// Units bought during play.
    pub units_bought: u32,
    /// Diamond fields left on the board.
    pub diamonds_left: usize,
}

/// A greedy bot: buys units while it can afford them and walks every unit
/// towards the richest field it can reach.
#[derive(Debug)]
pub struct AutoPlayer {
    rng: SmallRng,
    bought: u32,
}

impl AutoPlayer {
    /// Create a bot with its own random stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            bought: 0,
        }
    }

    /// Units bought so far.
    #[must_use]
    pub const fn units_bought(&self) -> u32 {
        self.bought
    }

    /// Issue all commands for the current player, then end the turn.
    pub fn play_turn(&mut self, game: &mut Game) {
        let current = game.current_player_id();

        while game.units(Some(current)).count() < MAX_BOT_UNITS
            && game.current_player().resources.gold >= game.rules().unit_cost
        {
            if game.buy_unit().is_err() {
                break;
            }
            self.bought += 1;
        }

        let targets: Vec<Coord> = game
            .board()
            .iter()
            .filter(|(_, field)| field.field_type() == FieldType::Diamond)
            .map(|(coord, _)| coord)
            .collect();

        let units: Vec<UnitId> = game.units(Some(current)).map(Unit::id).collect();
        for id in units {
            let can_boost = game.unit(id).is_some_and(|unit| !unit.is_sped_up())
                && game.current_player().resources.oil >= game.rules().speed_up_cost;
            let boosted = if can_boost { game.speed_up_unit(id) } else { Ok(()) };
            if let Err(err) = boosted {
                log::warn!("autoplayer speed up rejected: {err}");
            }

            let Some(dest) = self.pick_destination(game, id, &targets) else {
                continue;
            };
            if let Err(err) = game.move_unit(id, dest) {
                log::warn!("autoplayer move rejected: {err}");
            }
        }

        game.next_turn();
    }

    /// Best reachable field for a unit, or `None` to stay put.
    fn pick_destination(&mut self, game: &Game, id: UnitId, targets: &[Coord]) -> Option<Coord> {
        let unit = game.unit(id)?;
        let here = unit.pos();
        let budget = unit.speed();

        let mut best: Option<(i64, Coord)> = None;
        for (coord, field) in game.board().iter() {
            if here.manhattan(coord) > budget || !game.is_unit_can_move(id, coord) {
                continue;
            }
            let score = field_value(game, field.field_type()) * 100
                - i64::from(nearest(coord, targets))
                + i64::from(self.rng.random_range(0..3u8));
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, coord));
            }
        }

        best.map(|(_, coord)| coord).filter(|&coord| coord != here)
    }
}

fn field_value(game: &Game, ty: FieldType) -> i64 {
    match game.board().grounds().get(ty).resource {
        Some(ResourceKind::Diamond) => 5,
        Some(ResourceKind::Gold) => 2,
        Some(ResourceKind::Oil) => 1,
        None => 0,
    }
}

fn nearest(from: Coord, targets: &[Coord]) -> u32 {
    targets
        .iter()
        .map(|&t| from.manhattan(t))
        .min()
        .unwrap_or(0)
}

/// Play one bot-only game from setup to game over.
///
/// # Errors
///
/// Returns an error if the config describes an impossible setup.
pub fn run_game(seed: u64, sim: &SimConfig) -> Result<GameResult, SetupError> {
    let mut game = Game::with_config(&sim.player_names(), sim.size, &sim.config, seed)?;
    let mut bot = AutoPlayer::new(seed.rotate_left(17) ^ 0x5eed);

    while !game.is_game_over() {
        bot.play_turn(&mut game);
        debug_assert!(
            crate::game::check_invariants(&game).is_empty(),
            "invariants broken at turn {}",
            game.turn_number()
        );
    }

    log::debug!(
        "game {seed} finished after {} turns, winner {:?}",
        game.turn_number(),
        game.winner()
    );

    Ok(GameResult {
        seed,
        turns_played: game.turn_number(),
        winner: game.winner(),
        standings: game.standings(),
        resources: game.players().iter().map(|p| p.resources).collect(),
        units_bought: bot.units_bought(),
        diamonds_left: game.board().count(FieldType::Diamond),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameRules;

    #[test]
    fn test_game_terminates() {
        let sim = SimConfig::default();
        let result = run_game(7, &sim).unwrap();

        let limit = sim.config.rules.max_rounds * 2;
        assert!(result.turns_played <= limit);
        assert!(result.turns_played == limit || result.diamonds_left == 0);
        assert_eq!(result.standings.len(), 2);
        assert_eq!(result.resources.len(), 2);
    }

    #[test]
    fn test_same_seed_same_game() {
        let sim = SimConfig {
            players: 3,
            ..SimConfig::default()
        };
        assert_eq!(run_game(99, &sim).unwrap(), run_game(99, &sim).unwrap());
    }

    #[test]
    fn test_bots_collect_resources() {
        let sim = SimConfig::default();
        let result = run_game(3, &sim).unwrap();
        let collected: u32 = result
            .resources
            .iter()
            .map(|r| r.diamond + r.gold + r.oil)
            .sum();
        assert!(collected > 0);
    }

    #[test]
    fn test_winner_matches_standings() {
        let sim = SimConfig {
            players: 4,
            size: (12, 12),
            ..SimConfig::default()
        };
        for seed in 0..5 {
            let result = run_game(seed, &sim).unwrap();
            match result.winner {
                Some(id) => {
                    assert_eq!(result.standings[0].player, id);
                    assert!(result.standings[0].diamonds > result.standings[1].diamonds);
                }
                None => assert_eq!(result.standings[0].diamonds, result.standings[1].diamonds),
            }
        }
    }

    #[test]
    fn test_short_game_respects_round_limit() {
        let mut sim = SimConfig::default();
        sim.config.rules = GameRules {
            max_rounds: 2,
            ..GameRules::default()
        };
        let result = run_game(1, &sim).unwrap();
        assert!(result.turns_played <= 4);
    }

    #[test]
    fn test_bad_setup_is_reported() {
        let sim = SimConfig {
            players: 0,
            ..SimConfig::default()
        };
        assert_eq!(run_game(1, &sim), Err(SetupError::NoPlayers));
    }
}
