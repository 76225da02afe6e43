//! CLI command implementations for Delve.

pub(crate) mod play;
pub(crate) mod simulate;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use delve::{ConfigError, GameConfig, SetupError};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimulateFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SetupError> for CliError {
    fn from(e: SetupError) -> Self {
        Self::new(format!("Invalid game setup: {e}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

/// Parse a board size written as `WIDTHxHEIGHT`.
pub(crate) fn parse_size(s: &str) -> Result<(u16, u16), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width `{w}`: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height `{h}`: {e}"))?;
    Ok((w, h))
}

/// Load the config file if one was given, else the built-in defaults.
fn load_config(path: Option<&Path>) -> Result<GameConfig, CliError> {
    match path {
        Some(path) => GameConfig::load(path)
            .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display()))),
        None => Ok(GameConfig::default()),
    }
}

/// Seed from the clock when none was given.
fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().wrapping_mul(1_000_000_000) ^ u64::from(d.subsec_nanos()))
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("10x8"), Ok((10, 8)));
        assert_eq!(parse_size("6X6"), Ok((6, 6)));
        assert!(parse_size("10").is_err());
        assert!(parse_size("ax5").is_err());
        assert!(parse_size("5x70000").is_err());
    }

    #[test]
    fn test_load_config_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.rules, delve::GameRules::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some(Path::new("/no/such/delve.json"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load /no/such/delve.json"));
    }
}
