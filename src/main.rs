//! Delve CLI - play, simulate and check Delve games from the command line.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Delve - a turn-based digging game
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an interactive game in the terminal
    Play {
        /// Player names in turn order (1-4 players)
        #[arg(short, long, num_args = 1..=4, default_values = ["Player 1", "Player 2"])]
        players: Vec<String>,

        /// Board size as WIDTHxHEIGHT
        #[arg(long, default_value = "10x10", value_parser = cli::parse_size)]
        size: (u16, u16),

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Game config JSON (default: built-in rules)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Run many bot-only games in parallel and aggregate statistics
    Simulate {
        /// Number of games to run (default: 100)
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Number of bot players (1-4)
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Board size as WIDTHxHEIGHT
        #[arg(long, default_value = "10x10", value_parser = cli::parse_size)]
        size: (u16, u16),

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Game config JSON (default: built-in rules)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Check a game config file
    Validate {
        /// Config JSON file to validate
        #[arg(required = true)]
        config: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            players,
            size,
            seed,
            config,
        } => cli::play::execute(&players, size, seed, config.as_deref()),

        Commands::Simulate {
            games,
            players,
            size,
            seed,
            threads,
            config,
            format,
            progress,
        } => cli::simulate::execute(
            games,
            players,
            size,
            seed,
            threads,
            config.as_deref(),
            format,
            progress,
        ),

        Commands::Validate { config } => cli::validate::execute(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
