//! Bishop movement along clear diagonals.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_shared::{path_is_clear, shared_preconditions, Delta};

pub fn bishop_can_move_to(game_state: &GameState, origin: Square, destination: Square) -> bool {
    shared_preconditions(game_state, origin, destination).is_some()
        && Delta::between(origin, destination).is_diagonal()
        && path_is_clear(game_state, origin, destination)
}

#[cfg(test)]
mod tests {
    use super::bishop_can_move_to;
    use crate::game_state::{chess_types::Square, game_state::GameState};

    #[test]
    fn bishop_stops_at_blockers_of_either_color() {
        let state = GameState::from_fen("4k3/8/5p2/8/3B4/2P5/8/4K3 w - - 0 1").expect("FEN");
        let d4 = Square::at(3, 3);
        assert!(bishop_can_move_to(&state, d4, Square::at(4, 4)));
        assert!(bishop_can_move_to(&state, d4, Square::at(5, 5)), "capture f6");
        assert!(!bishop_can_move_to(&state, d4, Square::at(6, 6)), "through f6");
        assert!(!bishop_can_move_to(&state, d4, Square::at(2, 2)), "own pawn c3");
        assert!(!bishop_can_move_to(&state, d4, Square::at(1, 1)), "through c3");
        assert!(!bishop_can_move_to(&state, d4, Square::at(3, 5)), "not diagonal");
        assert!(bishop_can_move_to(&state, d4, Square::at(0, 6)));
    }
}
