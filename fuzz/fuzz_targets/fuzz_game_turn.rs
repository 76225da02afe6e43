#![no_main]

//! Full game turn fuzzer.
//!
//! Drives a game with arbitrary command sequences and checks that:
//! 1. Rejected commands leave the game untouched
//! 2. Turn order advances by exactly one per `next_turn`
//! 3. Invariants hold after every command

use arbitrary::Arbitrary;
use delve::game::check_invariants;
use delve::{Coord, Game};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated command.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzCommand {
    /// Move a unit.
    Move { unit: u8, x: u8, y: u8 },
    /// Buy a unit for the current player.
    Buy,
    /// Speed up a unit.
    SpeedUp { unit: u8 },
    /// Place a unit directly.
    Add { x: u8, y: u8 },
    /// End the turn.
    NextTurn,
}

/// Structured input for full game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    /// Number of players (capped to 1-4).
    players: u8,
    /// Board width and height (capped to 4-24).
    size: (u8, u8),
    /// Board seed.
    seed: u64,
    /// Commands to apply in order.
    commands: Vec<FuzzCommand>,
}

fuzz_target!(|input: GameInput| {
    let players = usize::from(input.players % 4) + 1;
    let width = u16::from(input.size.0 % 21) + 4;
    let height = u16::from(input.size.1 % 21) + 4;
    let names: Vec<String> = (0..players).map(|i| format!("P{i}")).collect();

    let mut game = match Game::with_seed(&names, (width, height), input.seed) {
        Ok(game) => game,
        Err(e) => panic!("valid setup rejected: {e}"),
    };

    let violations = check_invariants(&game);
    assert!(violations.is_empty(), "Invariants violated at start: {violations:?}");

    for cmd in input.commands.into_iter().take(200) {
        let turn = game.turn_number();
        let before = game.clone();

        let rejected = match cmd {
            FuzzCommand::Move { unit, x, y } => game
                .move_unit(usize::from(unit), Coord::new(u16::from(x), u16::from(y)))
                .is_err(),
            FuzzCommand::Buy => game.buy_unit().is_err(),
            FuzzCommand::SpeedUp { unit } => game.speed_up_unit(usize::from(unit)).is_err(),
            FuzzCommand::Add { x, y } => game.add_unit(Coord::new(u16::from(x), u16::from(y))).is_err(),
            FuzzCommand::NextTurn => {
                game.next_turn();
                assert_eq!(game.turn_number(), turn + 1);
                false
            }
        };

        if rejected {
            assert_eq!(game.turn_number(), before.turn_number());
            assert_eq!(game.players(), before.players());
            assert!(game.units(None).eq(before.units(None)), "rejected command moved units");
        }

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");
    }
});
