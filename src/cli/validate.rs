//! Config validation command implementation.

use super::CliError;
use delve::{FieldType, Game, GameConfig};
use std::fs;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or fails a check.
pub(crate) fn execute(config: &Path) -> Result<(), CliError> {
    let json = fs::read_to_string(config)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", config.display())))?;

    println!("Validating: {}", config.display());
    println!();

    let parsed = GameConfig::from_json(&json);
    print_check("JSON document with every ground type", parsed.is_ok());
    let parsed = parsed?;

    let checks = run_checks(&parsed);
    for (name, ok) in &checks {
        print_check(name, *ok);
    }

    let failed = checks.iter().filter(|(_, ok)| !ok).count();
    if failed > 0 {
        return Err(CliError::new(format!("{failed} check(s) failed")));
    }

    println!();
    println!("Summary:");
    for ty in FieldType::ALL {
        let ground = parsed.grounds.get(ty);
        let resource = ground.resource.map_or("-".to_string(), |r| r.to_string());
        println!(
            "  {:<8} durability {:>2}  resource {:<7}  -> {:?}",
            ground.title, ground.max_durability, resource, ground.next_ground
        );
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

/// Sanity checks beyond what parsing enforces.
fn run_checks(config: &GameConfig) -> Vec<(String, bool)> {
    let grounds = &config.grounds;
    let rules = &config.rules;
    let mut checks = Vec::new();

    for ty in FieldType::ALL {
        checks.push((
            format!("{ty:?} digs down to a terminal ground"),
            reaches_terminal(config, ty),
        ));
    }

    let tunnel = grounds.get(FieldType::Tunnel);
    checks.push((
        "Tunnel is terminal".to_string(),
        tunnel.next_ground == FieldType::Tunnel,
    ));

    for ty in FieldType::ALL {
        let ground = grounds.get(ty);
        if ground.resource.is_some() {
            checks.push((
                format!("{ty:?} has durability to harvest"),
                ground.max_durability > 0,
            ));
        }
    }

    checks.push(("Units can move".to_string(), rules.max_unit_speed > 0));
    checks.push(("Players start with units".to_string(), rules.start_unit_count > 0));
    checks.push(("Game lasts at least one round".to_string(), rules.max_rounds > 0));
    checks.push(("Board has diamonds".to_string(), rules.diamond_deposits > 0));
    checks.push((
        "Default four-player setup".to_string(),
        Game::with_config(&["1", "2", "3", "4"], delve::game::DEFAULT_BOARD_SIZE, config, 0).is_ok(),
    ));

    checks
}

/// Follow `next_ground` until a type that excavates into itself.
fn reaches_terminal(config: &GameConfig, start: FieldType) -> bool {
    let mut ty = start;
    for _ in 0..=FieldType::COUNT {
        let next = config.grounds.get(ty).next_ground;
        if next == ty {
            return true;
        }
        ty = next;
    }
    false
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
