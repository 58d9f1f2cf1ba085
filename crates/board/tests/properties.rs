//! Property-based tests for the board model.
//!
//! Positions are generated by playing random legal moves from an empty
//! board, so every tested state is reachable through alternating play.

use connectn_board::{GameState, Move};
use connectn_core::{ConnectNError, Mark};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a (size, run_length) pair with 1 <= run_length <= size <= 6
fn arb_geometry() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=6).prop_flat_map(|size| (Just(size), 1usize..=size))
}

/// Play random moves until the game ends or `max_moves` is reached.
/// Returns the final state and every intermediate state.
fn random_game(size: usize, run_length: usize, seed: u64, max_moves: usize) -> Vec<GameState> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut history = vec![GameState::new(size, run_length).unwrap()];

    for _ in 0..max_moves {
        let state = history.last().unwrap();
        if state.is_terminal() {
            break;
        }
        let moves = state.legal_moves();
        let mv = *moves.choose(&mut rng).unwrap();
        let next = state.apply_move(mv).unwrap();
        history.push(next);
    }

    history
}

/// Generate a reachable position on an arbitrary geometry
fn arb_position() -> impl Strategy<Value = GameState> {
    (arb_geometry(), any::<u64>(), 0usize..36).prop_map(|((size, run), seed, moves)| {
        random_game(size, run, seed, moves).pop().unwrap()
    })
}

// =============================================================================
// Draw detection
// =============================================================================

proptest! {
    /// is_draw() holds exactly when no cell is empty, regardless of wins
    #[test]
    fn prop_draw_iff_board_full(state in arb_position()) {
        let full = state.cells().iter().all(Option::is_some);
        prop_assert_eq!(state.is_draw(), full);
    }

    /// Occupied count and side to move agree with the cells
    #[test]
    fn prop_side_to_move_matches_parity(state in arb_position()) {
        let occupied = state.cells().iter().filter(|c| c.is_some()).count();
        prop_assert_eq!(state.occupied(), occupied);

        let expected = if occupied % 2 == 0 { Mark::A } else { Mark::B };
        prop_assert_eq!(state.side_to_move(), expected);
    }
}

// =============================================================================
// Terminal states
// =============================================================================

proptest! {
    /// Exactly one of ongoing / win / draw after every move of a game
    #[test]
    fn prop_exactly_one_status(
        (size, run) in arb_geometry(),
        seed in any::<u64>()
    ) {
        for state in random_game(size, run, seed, 36) {
            let win = state.is_win();
            let draw = !win && state.is_draw();
            let ongoing = !win && !draw;

            prop_assert_eq!([ongoing, win, draw].iter().filter(|b| **b).count(), 1);
            prop_assert_eq!(state.outcome().is_none(), ongoing);
        }
    }

    /// A random game always ends with a win or a full board
    #[test]
    fn prop_games_terminate(
        (size, run) in arb_geometry(),
        seed in any::<u64>()
    ) {
        let history = random_game(size, run, seed, size * size);
        let last = history.last().unwrap();

        prop_assert!(last.is_terminal());
        prop_assert!(history.len() <= size * size + 1);
    }

    /// Once a state is won, no earlier state in the game was terminal
    #[test]
    fn prop_only_final_state_terminal(
        (size, run) in arb_geometry(),
        seed in any::<u64>()
    ) {
        let history = random_game(size, run, seed, 36);
        let (last, earlier) = history.split_last().unwrap();

        prop_assert!(earlier.iter().all(|s| !s.is_terminal()));
        prop_assert!(last.is_terminal());
    }
}

// =============================================================================
// Move generation
// =============================================================================

proptest! {
    /// One legal move per empty cell, no duplicates, all applicable
    #[test]
    fn prop_legal_moves_cover_empty_cells(state in arb_position()) {
        let children = state.generate_legal_moves();
        let empty = state.cells().iter().filter(|c| c.is_none()).count();
        prop_assert_eq!(children.len(), empty);

        let mut ids: Vec<usize> = children.iter().map(|(mv, _)| mv.0).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), empty);

        for (mv, child) in &children {
            let applied = state.apply_move(*mv);
            prop_assert_eq!(applied.as_ref(), Ok(child));
            prop_assert_eq!(child.occupied(), state.occupied() + 1);
        }
    }

    /// Applying a move never changes the source state
    #[test]
    fn prop_apply_move_is_pure(state in arb_position()) {
        let before = state.clone();
        let _children = state.generate_legal_moves();
        prop_assert_eq!(state, before);
    }

    /// Occupied cells and off-board moves are rejected
    #[test]
    fn prop_illegal_moves_rejected(state in arb_position()) {
        let size = state.size();
        for index in 0..size * size {
            let (row, col) = (index / size, index % size);
            let mv = Move::from_coords(row, col, size);
            let result = state.apply_move(mv);
            if state.cell(row, col).is_some() {
                prop_assert!(matches!(result, Err(ConnectNError::InvalidMove(_))));
            } else {
                prop_assert!(result.is_ok());
            }
        }

        let off_board = state.apply_move(Move(size * size));
        prop_assert!(matches!(off_board, Err(ConnectNError::InvalidMove(_))));
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_empty_three_by_three() {
    let state = GameState::new(3, 3).unwrap();

    assert!(!state.is_win());
    assert!(!state.is_draw());
    assert_eq!(state.generate_legal_moves().len(), 9);
}

#[test]
fn test_full_row_is_win() {
    let x = Some(Mark::A);
    let o = Some(Mark::B);
    let state = GameState::from_cells(3, 3, vec![None, None, None, x, x, x, o, None, o]).unwrap();

    assert!(state.is_win());
}

#[test]
fn test_full_board_without_run_is_draw() {
    let x = Some(Mark::A);
    let o = Some(Mark::B);
    // x o x
    // x x o
    // o x o
    let state = GameState::from_cells(3, 3, vec![x, o, x, x, x, o, o, x, o]).unwrap();

    assert!(!state.is_win());
    assert!(state.is_draw());
}
