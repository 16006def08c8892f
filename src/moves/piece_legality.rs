//! Single entry point for move legality, dispatching on piece kind.
//!
//! Every rule is a pure function of the board and two squares. Nothing here
//! consults check state; see `move_generation::legal_move_checks` for that.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bishop_moves::bishop_can_move_to;
use crate::moves::king_moves::king_can_move_to;
use crate::moves::knight_moves::knight_can_move_to;
use crate::moves::pawn_moves::pawn_can_move_to;
use crate::moves::queen_moves::queen_can_move_to;
use crate::moves::rook_moves::rook_can_move_to;

/// Can the piece standing on `origin` move to `destination`? `false` when
/// `origin` is empty.
pub fn can_move_to(game_state: &GameState, origin: Square, destination: Square) -> bool {
    let Some(piece) = game_state.get_piece(origin) else {
        return false;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_can_move_to(game_state, origin, destination),
        PieceKind::Knight => knight_can_move_to(game_state, origin, destination),
        PieceKind::Bishop => bishop_can_move_to(game_state, origin, destination),
        PieceKind::Rook => rook_can_move_to(game_state, origin, destination),
        PieceKind::Queen => queen_can_move_to(game_state, origin, destination),
        PieceKind::King => king_can_move_to(game_state, origin, destination),
    }
}

/// Signed-coordinate form of `can_move_to`; off-board destinations are illegal.
#[inline]
pub fn can_move_to_xy(game_state: &GameState, origin: Square, x: i32, y: i32) -> bool {
    if !GameState::is_within_bounds(x, y) {
        return false;
    }
    can_move_to(game_state, origin, Square::at(x as u8, y as u8))
}

/// Every destination `can_move_to` accepts, scanning all 64 squares in
/// board-scan order.
pub fn possible_moves(game_state: &GameState, origin: Square) -> Vec<Square> {
    Square::all()
        .filter(|&destination| can_move_to(game_state, origin, destination))
        .collect()
}
