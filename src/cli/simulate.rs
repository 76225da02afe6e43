//! Simulate command implementation.

use super::output::{format_sim_text, JsonSimResult, SimStats};
use super::{load_config, random_seed, CliError, SimulateFormat};
use delve::sim::{run_game, SimConfig};
use delve::Game;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the setup is invalid.
#[allow(clippy::too_many_arguments, clippy::cast_precision_loss)]
pub(crate) fn execute(
    games: u64,
    players: usize,
    size: (u16, u16),
    seed: Option<u64>,
    threads: Option<usize>,
    config: Option<&Path>,
    format: SimulateFormat,
    progress: bool,
) -> Result<(), CliError> {
    let sim = SimConfig {
        players,
        size,
        config: load_config(config)?,
    };
    let names = sim.player_names();

    // Reject a bad setup once instead of in every worker
    Game::with_config(&names, sim.size, &sim.config, 0)?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(random_seed);
    log::info!("simulating {games} games from seed {base_seed}");

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Bad progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each worker folds into its own stats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || SimStats::new(players),
            |mut local_stats, i| {
                let game_seed = base_seed.wrapping_add(i);
                match run_game(game_seed, &sim) {
                    Ok(result) => local_stats.add_result(&result),
                    Err(e) => log::warn!("game {game_seed} failed to start: {e}"),
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local_stats
            },
        )
        .reduce(
            || SimStats::new(players),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        SimulateFormat::Text => {
            println!();
            print!("{}", format_sim_text(&stats, &names));
            println!();
            println!("Duration: {:.2}s ({games_per_sec:.0} games/sec)", duration.as_secs_f64());
        }
        SimulateFormat::Json => {
            let json_result = JsonSimResult::from_stats(&stats, &names);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
