//! Output formatting utilities for CLI.

// Counters are averaged as f64 for display
#![allow(clippy::cast_precision_loss)]

use std::fmt::Write;

use delve::game::{PlayerId, Standing};
use delve::sim::GameResult;
use serde::Serialize;

/// Format the final standings of a game as human-readable text.
pub(super) fn format_standings(standings: &[Standing], winner: Option<PlayerId>, turns: u32) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Final standings after {turns} turns");
    for (place, standing) in standings.iter().enumerate() {
        let _ = writeln!(
            output,
            "  {}. Player {} ({}): {} diamonds",
            place + 1,
            standing.player,
            standing.name,
            standing.diamonds
        );
    }
    match winner.and_then(|id| standings.iter().find(|s| s.player == id)) {
        Some(standing) => {
            let _ = writeln!(output, "  Winner: {}", standing.name);
        }
        None => output.push_str("  Winner: none (tied or unfinished)\n"),
    }

    output
}

/// Batch statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct SimStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Win count per player.
    pub(super) wins: Vec<u64>,
    /// Games without a sole winner.
    pub(super) draws: u64,
    /// Games that ended because the diamonds ran out.
    pub(super) mined_out: u64,
    /// Total diamonds per player.
    total_diamonds: Vec<u64>,
    /// Diamond sum of squares for std dev calculation.
    diamond_sq_sums: Vec<f64>,
    /// Total turns across all games.
    total_turns: u64,
    /// Total units bought across all games.
    units_bought: u64,
}

impl SimStats {
    /// Create new stats for n players.
    pub(super) fn new(num_players: usize) -> Self {
        Self {
            wins: vec![0; num_players],
            total_diamonds: vec![0; num_players],
            diamond_sq_sums: vec![0.0; num_players],
            ..Self::default()
        }
    }

    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);
        self.units_bought += u64::from(result.units_bought);
        if result.diamonds_left == 0 {
            self.mined_out += 1;
        }

        match result.winner.and_then(|id| self.wins.get_mut(id)) {
            Some(wins) => *wins += 1,
            None => self.draws += 1,
        }

        for (i, resources) in result.resources.iter().enumerate() {
            if i < self.total_diamonds.len() {
                let diamonds = resources.diamond;
                self.total_diamonds[i] += u64::from(diamonds);
                self.diamond_sq_sums[i] += f64::from(diamonds) * f64::from(diamonds);
            }
        }
    }

    /// Merge another worker's stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.mined_out += other.mined_out;
        self.total_turns += other.total_turns;
        self.units_bought += other.units_bought;
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.total_diamonds.iter_mut().zip(&other.total_diamonds) {
            *a += b;
        }
        for (a, b) in self.diamond_sq_sums.iter_mut().zip(&other.diamond_sq_sums) {
            *a += b;
        }
    }

    /// Get win rate for a player (0.0-1.0).
    pub(super) fn win_rate(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(player_idx).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get average diamonds for a player.
    pub(super) fn avg_diamonds(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_diamonds.get(player_idx).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get diamond standard deviation for a player.
    pub(super) fn diamond_std_dev(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_diamonds(player_idx);
        let sq_sum = self.diamond_sq_sums.get(player_idx).copied().unwrap_or(0.0);
        let variance = (sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Get average game length.
    pub(super) fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }

    /// Get average units bought per game.
    pub(super) fn avg_units_bought(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.units_bought as f64 / self.games_played as f64
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimResult {
    /// Total games played.
    games_played: u64,
    /// Per-player statistics.
    players: Vec<JsonSimPlayer>,
    /// Number of games without a sole winner.
    draws: u64,
    /// Number of games that ran out of diamonds.
    mined_out: u64,
    /// Average game length in turns.
    avg_turns: f64,
    /// Average units bought per game.
    avg_units_bought: f64,
}

/// JSON-serializable per-player batch stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimPlayer {
    /// Player id (0-based).
    player: usize,
    /// Bot name.
    name: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average diamonds.
    avg_diamonds: f64,
    /// Diamond standard deviation.
    diamond_std_dev: f64,
}

impl JsonSimResult {
    /// Create from stats and player names.
    pub(super) fn from_stats(stats: &SimStats, names: &[String]) -> Self {
        let players = names
            .iter()
            .enumerate()
            .map(|(i, name)| JsonSimPlayer {
                player: i,
                name: name.clone(),
                wins: stats.wins.get(i).copied().unwrap_or(0),
                win_rate: stats.win_rate(i),
                avg_diamonds: stats.avg_diamonds(i),
                diamond_std_dev: stats.diamond_std_dev(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            players,
            draws: stats.draws,
            mined_out: stats.mined_out,
            avg_turns: stats.avg_turns(),
            avg_units_bought: stats.avg_units_bought(),
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_sim_text(stats: &SimStats, names: &[String]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Simulation Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, name) in names.iter().enumerate() {
        let wins = stats.wins.get(i).copied().unwrap_or(0);
        let rate = stats.win_rate(i) * 100.0;
        let _ = writeln!(output, "  {name}: {rate:.1}% ({wins} wins)");
    }
    let draw_rate = if stats.games_played == 0 {
        0.0
    } else {
        stats.draws as f64 / stats.games_played as f64 * 100.0
    };
    let _ = writeln!(output, "  Draws: {} ({draw_rate:.1}%)\n", stats.draws);

    output.push_str("Average Diamonds:\n");
    for (i, name) in names.iter().enumerate() {
        let _ = writeln!(
            output,
            "  {name}: {:.1} (+/- {:.1})",
            stats.avg_diamonds(i),
            stats.diamond_std_dev(i)
        );
    }

    let _ = writeln!(output, "\nAverage Game Length: {:.0} turns", stats.avg_turns());
    let _ = writeln!(output, "Mined Out: {} games", stats.mined_out);
    let _ = writeln!(output, "Units Bought: {:.1} per game", stats.avg_units_bought());

    output
}
