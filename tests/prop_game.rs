//! Property-based tests for game mechanics.
//!
//! These tests verify properties of movement, digging and turn order.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;

use delve::game::{check_invariants, Occupant, MIN_BOARD_SIDE};
use delve::{Coord, Field, FieldTable, FieldType, Game, Player, Resources, Unit};

fn terrain() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A move succeeds iff it is within budget, and spends exactly the distance.
    #[test]
    fn prop_unit_move_spends_distance(
        x in 0u16..50, y in 0u16..50,
        tx in 0u16..50, ty in 0u16..50,
        speed in 0u32..8
    ) {
        let mut unit = Unit::new(0, Coord::new(x, y), 0, speed);
        let target = Coord::new(tx, ty);
        let distance = u32::from(x.abs_diff(tx)) + u32::from(y.abs_diff(ty));

        let moved = unit.move_to(target);

        prop_assert_eq!(moved, distance <= speed);
        if moved {
            prop_assert_eq!(unit.pos(), target);
            prop_assert_eq!(unit.speed(), speed - distance);
        } else {
            prop_assert_eq!(unit.pos(), Coord::new(x, y));
            prop_assert_eq!(unit.speed(), speed);
        }
    }

    /// Each update credits exactly one unit of the field's resource per own worker.
    #[test]
    fn prop_field_accrual(
        ty in terrain(),
        own in 0usize..6,
        other in 0usize..6
    ) {
        let table = FieldTable::default();
        let mut field = Field::new(ty, &table);
        for i in 0..own {
            field.add_unit(Occupant { unit: i, owner: 0 });
        }
        for i in 0..other {
            field.add_unit(Occupant { unit: own + i, owner: 1 });
        }
        let mut player = Player::new(0, "P", Resources::default());

        let update = field.update(&mut player, &table);

        prop_assert_eq!(update.workers as usize, own);
        let mut expected = Resources::default();
        if let Some(kind) = table.get(ty).resource {
            expected[kind] = u32::try_from(own).unwrap();
        }
        prop_assert_eq!(player.resources, expected);
    }

    /// Working a field walks its excavation chain one step per crossing.
    #[test]
    fn prop_excavation_one_step_per_update(
        ty in terrain(),
        workers in 1usize..8
    ) {
        let table = FieldTable::default();
        let mut field = Field::new(ty, &table);
        for i in 0..workers {
            field.add_unit(Occupant { unit: i, owner: 0 });
        }
        let mut player = Player::new(0, "P", Resources::default());

        for _ in 0..32 {
            let before = field.field_type();
            let update = field.update(&mut player, &table);
            let after = field.field_type();

            if update.excavated {
                prop_assert_eq!(after, table.get(before).next_ground);
                prop_assert_eq!(field.durability(), table.get(after).max_durability);
            } else {
                prop_assert_eq!(after, before);
            }
        }
        prop_assert_eq!(field.field_type(), FieldType::Tunnel);
        prop_assert_eq!(field.durability(), 0);
    }

    /// Bases are distinct, on the board, and mirror each other.
    #[test]
    fn prop_bases_in_bounds_and_distinct(
        w in MIN_BOARD_SIDE..40,
        h in MIN_BOARD_SIDE..40,
        seed in any::<u64>()
    ) {
        let game = Game::with_seed(&["A"], (w, h), seed).unwrap();
        let bases = game.bases_coord();

        let all: HashSet<Coord> = bases.iter().flatten().copied().collect();
        prop_assert_eq!(all.len(), 8);
        for coord in &all {
            prop_assert!(game.board().in_bounds(*coord));
        }

        // West/east and north/south pairs mirror across the board
        prop_assert_eq!(bases[0][0].y, bases[2][0].y);
        prop_assert_eq!(bases[1][0].x, bases[3][0].x);
        prop_assert_eq!(bases[0][0].x + bases[2][0].x, w - 1);
        prop_assert_eq!(bases[1][0].y + bases[3][0].y, h - 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Turn order cycles through players and survives arbitrary commands.
    #[test]
    fn prop_turn_rotation(
        players in 1usize..=4,
        seed in any::<u64>(),
        commands in prop::collection::vec((0u8..4, 0usize..20, 0u16..12, 0u16..12), 0..60)
    ) {
        let names: Vec<String> = (0..players).map(|i| format!("P{i}")).collect();
        let mut game = Game::with_seed(&names, (10, 10), seed).unwrap();

        let mut turns = 0u32;
        for (op, unit, x, y) in commands {
            match op {
                0 => { let _ = game.move_unit(unit, Coord::new(x, y)); }
                1 => { let _ = game.buy_unit(); }
                2 => { let _ = game.speed_up_unit(unit); }
                _ => {
                    game.next_turn();
                    turns += 1;
                }
            }
            prop_assert_eq!(game.turn_number(), turns);
            prop_assert_eq!(game.current_player_id(), turns as usize % players);
            let violations = check_invariants(&game);
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
    }
}
