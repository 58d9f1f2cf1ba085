//! Random playouts.

use connectn_board::GameState;
use connectn_core::Outcome;
use rand::seq::SliceRandom;
use rand::Rng;

/// Play uniformly random moves from `state` until someone wins or the
/// board fills up.
///
/// The result is in the global mark frame: `Outcome::score()` is the
/// winner's mark value, or 0 for a draw. Running out of moves is the normal
/// draw ending, never an error.
pub fn rollout<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Outcome {
    let mut state = state.clone();

    while !state.is_win() {
        let moves = state.legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            return Outcome::Draw;
        };
        state = state
            .apply_move(mv)
            .expect("BUG: legal_moves returned an occupied cell");
    }

    Outcome::Win(state.last_mover())
}
