//! Knight movement: (±1, ±2) or (±2, ±1) jumps, no path check.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_shared::{shared_preconditions, Delta};

pub fn knight_can_move_to(game_state: &GameState, origin: Square, destination: Square) -> bool {
    if shared_preconditions(game_state, origin, destination).is_none() {
        return false;
    }
    let delta = Delta::between(origin, destination);
    matches!(
        (delta.d_file.abs(), delta.d_rank.abs()),
        (1, 2) | (2, 1)
    )
}

#[cfg(test)]
mod tests {
    use super::knight_can_move_to;
    use crate::game_state::{chess_types::Square, game_state::GameState};

    #[test]
    fn knight_jumps_over_pieces() {
        let state = GameState::new_game();
        let b1 = Square::at(1, 0);
        assert!(knight_can_move_to(&state, b1, Square::at(0, 2)));
        assert!(knight_can_move_to(&state, b1, Square::at(2, 2)));
        assert!(!knight_can_move_to(&state, b1, Square::at(3, 1)), "own pawn on d2");
        assert!(!knight_can_move_to(&state, b1, Square::at(1, 2)));
    }

    #[test]
    fn knight_from_center_has_eight_targets() {
        let state = GameState::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").expect("FEN");
        let d4 = Square::at(3, 3);
        let targets = Square::all()
            .filter(|&to| knight_can_move_to(&state, d4, to))
            .count();
        assert_eq!(targets, 8);
    }
}
