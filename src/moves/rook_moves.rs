//! Rook movement along clear ranks and files.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_shared::{path_is_clear, shared_preconditions, Delta};

pub fn rook_can_move_to(game_state: &GameState, origin: Square, destination: Square) -> bool {
    shared_preconditions(game_state, origin, destination).is_some()
        && Delta::between(origin, destination).is_straight()
        && path_is_clear(game_state, origin, destination)
}

#[cfg(test)]
mod tests {
    use super::rook_can_move_to;
    use crate::game_state::{chess_types::Square, game_state::GameState};

    #[test]
    fn rook_blocker_stops_ray() {
        let state = GameState::from_fen("4k3/8/8/8/p7/8/8/R3K3 w - - 0 1").expect("FEN");
        let a1 = Square::at(0, 0);
        assert!(rook_can_move_to(&state, a1, Square::at(0, 3)), "capture a4");
        assert!(!rook_can_move_to(&state, a1, Square::at(0, 4)), "through a4");
        assert!(rook_can_move_to(&state, a1, Square::at(3, 0)));
        assert!(!rook_can_move_to(&state, a1, Square::at(4, 0)), "own king");
        assert!(!rook_can_move_to(&state, a1, Square::at(5, 0)), "through king");
        assert!(!rook_can_move_to(&state, a1, Square::at(1, 1)), "diagonal");
    }

    #[test]
    fn rook_in_the_corner_of_the_start_position_is_boxed_in() {
        let state = GameState::new_game();
        let a1 = Square::at(0, 0);
        assert_eq!(Square::all().filter(|&to| rook_can_move_to(&state, a1, to)).count(), 0);
    }
}
