//! Queen movement: the union of bishop and rook movement.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bishop_moves::bishop_can_move_to;
use crate::moves::rook_moves::rook_can_move_to;

#[inline]
pub fn queen_can_move_to(game_state: &GameState, origin: Square, destination: Square) -> bool {
    bishop_can_move_to(game_state, origin, destination)
        || rook_can_move_to(game_state, origin, destination)
}

#[cfg(test)]
mod tests {
    use super::queen_can_move_to;
    use crate::game_state::{chess_types::Square, game_state::GameState};

    #[test]
    fn queen_from_open_center_reaches_twenty_seven_squares() {
        let state = GameState::from_fen("k7/8/8/8/3Q4/8/8/7K w - - 0 1").expect("FEN");
        let d4 = Square::at(3, 3);
        let count = Square::all()
            .filter(|&to| queen_can_move_to(&state, d4, to))
            .count();
        assert_eq!(count, 27);
        assert!(!queen_can_move_to(&state, d4, Square::at(4, 5)), "knight-shaped");
    }
}
