//! Play command implementation.

use super::output::format_standings;
use super::{load_config, random_seed, CliError};
use delve::console::Session;
use delve::Game;
use std::io;
use std::path::Path;

/// Execute the play command: an interactive game on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the setup is invalid,
/// or the terminal cannot be read or written.
pub(crate) fn execute(
    players: &[String],
    size: (u16, u16),
    seed: Option<u64>,
    config: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    let seed = seed.unwrap_or_else(random_seed);

    let game = Game::with_config(players, size, &config, seed)?;
    log::info!(
        "starting {}x{} game for {} players (seed {seed})",
        size.0,
        size.1,
        players.len()
    );

    println!("Delve: type `help` for commands, `quit` to leave.");
    let mut session = Session::new(game);
    let mut stdout = io::stdout();
    session.run(io::stdin().lock(), &mut stdout)?;
    let game = session.shutdown();

    println!();
    print!(
        "{}",
        format_standings(&game.standings(), game.winner(), game.turn_number())
    );
    Ok(())
}
