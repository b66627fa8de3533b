//! Property-based tests over randomly played games.

use proptest::prelude::*;

use royal_ur::core::{GameState, Origin, PlayerId};
use royal_ur::game::{Game, GameBuilder};
use royal_ur::rules::{MoveEngine, MoveResult};

/// Play `steps` turns of a seeded game, choosing among legal moves by `choices`.
fn play(seed: u64, choices: &[usize], steps: usize) -> Game {
    let mut game = GameBuilder::new().seed(seed).build().unwrap();
    for step in 0..steps {
        if game.is_terminal().is_some() {
            break;
        }
        let report = game.roll().unwrap();
        if report.passed {
            continue;
        }
        let moves = game.legal_moves();
        if moves.is_empty() {
            game.switch_turn().unwrap();
            continue;
        }
        let pick = choices[step % choices.len()];
        let result = game.make_move(moves[pick % moves.len()].origin).unwrap();
        assert!(!matches!(result, MoveResult::Rejected(_)));
    }
    game
}

fn every_origin(state: &GameState) -> Vec<Origin> {
    std::iter::once(Origin::Reserve)
        .chain((0..state.track().len()).map(Origin::Cell))
        .collect()
}

proptest! {
    // 1. Pieces are never created or lost: reserve + board + recorded exits
    #[test]
    fn conservation_holds(
        seed in any::<u64>(),
        choices in prop::collection::vec(0..8usize, 1..16),
        steps in 0..120usize,
    ) {
        let game = play(seed, &choices, steps);
        let state = game.state();
        prop_assert!(state.check_conservation());
        for player in PlayerId::all() {
            let count = state.piece_count(player);
            prop_assert_eq!(count.reserve + count.on_board + state.exits(player), 5, "{:?}", count);
        }
    }

    // 2. Validation never changes the state and always gives the same answer
    #[test]
    fn validate_is_pure(
        seed in any::<u64>(),
        choices in prop::collection::vec(0..8usize, 1..16),
        steps in 0..60usize,
        distance in 0..=4usize,
    ) {
        let game = play(seed, &choices, steps);
        let state = game.state();
        let track_before = state.track().clone();
        let history_before = state.history().len();

        for player in PlayerId::all() {
            for origin in every_origin(state) {
                let first = MoveEngine::validate(state, player, origin, distance);
                let second = MoveEngine::validate(state, player, origin, distance);
                prop_assert_eq!(first, second);
            }
        }

        prop_assert_eq!(state.track(), &track_before);
        prop_assert_eq!(state.history().len(), history_before);
    }

    // 3. Cells outside the mirror set never hold two pieces
    #[test]
    fn fight_cells_hold_at_most_one(
        seed in any::<u64>(),
        choices in prop::collection::vec(0..8usize, 1..16),
        steps in 0..120usize,
    ) {
        let game = play(seed, &choices, steps);
        for cell in game.state().track().iter() {
            if !cell.spec().mirror {
                prop_assert!(cell.occupants().len() <= 1);
            }
        }
    }

    // 4. Rolls stay within the number of dice
    #[test]
    fn roll_distance_in_range(seed in any::<u64>()) {
        let mut game = GameBuilder::new().seed(seed).build().unwrap();
        let report = game.roll().unwrap();
        prop_assert!(report.roll.distance <= 4);
        prop_assert_eq!(report.passed, report.roll.distance == 0);
    }

    // 5. A winner has every piece finished
    #[test]
    fn winner_has_finished_all(
        seed in any::<u64>(),
        choices in prop::collection::vec(0..8usize, 1..16),
    ) {
        let game = play(seed, &choices, 2_000);
        if let Some(winner) = game.winner() {
            prop_assert_eq!(game.piece_count(winner).finished, 5);
            prop_assert!(game.state().has_no_pieces_left(winner));
        }
    }
}
