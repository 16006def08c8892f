//! King movement: one step in any direction, or a two-file castle.
//!
//! Castling here checks only unmoved pieces, rights, and empty squares. It
//! does not test whether the king crosses an attacked square; callers that
//! want that rule layer it on with the check detector.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_shared::{path_is_clear, shared_preconditions, Delta};

pub fn king_can_move_to(game_state: &GameState, origin: Square, destination: Square) -> bool {
    let Some(king) = shared_preconditions(game_state, origin, destination) else {
        return false;
    };

    if Delta::between(origin, destination).king_distance() <= 1 {
        return true;
    }

    can_castle(game_state, origin, destination, king)
}

/// Home square of the rook a castle toward `destination` would use.
#[inline]
pub fn castling_rook_square(origin: Square, destination: Square) -> Square {
    let rook_file = if destination.file > origin.file { 7 } else { 0 };
    Square::at(rook_file, origin.rank)
}

fn can_castle(game_state: &GameState, origin: Square, destination: Square, king: PieceRecord) -> bool {
    let delta = Delta::between(origin, destination);
    if delta.d_rank != 0 || delta.d_file.abs() != 2 {
        return false;
    }
    if game_state.is_occupied(destination) || king.has_moved {
        return false;
    }

    let king_side = delta.d_file > 0;
    if !game_state.castling_rights.get(king.color, king_side) {
        return false;
    }

    let rook_square = castling_rook_square(origin, destination);
    match game_state.get_piece(rook_square) {
        Some(rook)
            if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
        _ => return false,
    }

    path_is_clear(game_state, origin, rook_square)
}
