//! Check detection.
//!
//! A king is in check when some opposing piece's own legality rule accepts
//! the king's square as a destination. Each query scans the whole board.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_shared::Delta;
use crate::moves::piece_legality::can_move_to;

/// Is the piece on `square` a king that some opposing piece can reach?
/// `false` for empty squares and for every other piece kind.
pub fn is_in_check(game_state: &GameState, square: Square) -> bool {
    match game_state.get_piece(square) {
        Some(piece) if piece.kind == PieceKind::King => {
            !attackers_of(game_state, square, piece.color, true).is_empty()
        }
        _ => false,
    }
}

/// Would a king of `color` standing on `king_square` be attacked? The
/// opposing king is left out of the scan, so this is safe to ask about
/// empty squares and never recurses between the two kings.
pub fn is_in_check_at(game_state: &GameState, king_square: Square, color: Color) -> bool {
    !attackers_of(game_state, king_square, color, false).is_empty()
}

/// Is `square` covered by some piece of the side opposing `defender`?
///
/// Pawns count along their capture diagonals whether or not the square is
/// occupied, and never by pushing. Every other kind, the opposing king
/// included, counts when its legality rule could capture a `defender` piece
/// standing on `square`.
pub fn is_square_attacked(game_state: &GameState, square: Square, defender: Color) -> bool {
    let occupied_board;
    let board = if game_state.is_occupied(square) {
        game_state
    } else {
        let mut scratch = game_state.clone();
        scratch.set_piece(square, Some(PieceRecord::new(PieceKind::Pawn, defender).moved()));
        occupied_board = scratch;
        &occupied_board
    };

    game_state
        .occupied()
        .filter(|(_, piece)| piece.color != defender)
        .any(|(origin, piece)| match piece.kind {
            PieceKind::Pawn => pawn_covers(origin, piece.color, square),
            _ => can_move_to(board, origin, square),
        })
}

/// Check test for the king of `color`. Silently `false` when that king is
/// missing from the board.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    game_state
        .find_king(color)
        .is_some_and(|square| is_in_check(game_state, square))
}

/// Every enemy piece that can move onto the piece standing on `square`.
pub fn attacking_pieces(game_state: &GameState, square: Square) -> Vec<(Square, PieceRecord)> {
    match game_state.get_piece(square) {
        Some(piece) => attackers_of(game_state, square, piece.color, true),
        None => Vec::new(),
    }
}

/// Would moving `from -> to` on a scratch copy leave the mover's king in check?
pub fn would_leave_king_in_check(
    game_state: &GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> bool {
    let Some(mover) = game_state.get_piece(from) else {
        return false;
    };
    let mut scratch = game_state.clone();
    if scratch.apply_move(from, to, promotion).is_err() {
        return false;
    }
    is_king_in_check(&scratch, mover.color)
}

#[inline]
fn pawn_covers(origin: Square, color: Color, square: Square) -> bool {
    let delta = Delta::between(origin, square);
    delta.d_rank == color.forward() && delta.d_file.abs() == 1
}

fn attackers_of(
    game_state: &GameState,
    target: Square,
    defender: Color,
    include_king: bool,
) -> Vec<(Square, PieceRecord)> {
    game_state
        .occupied()
        .filter(|(_, piece)| piece.color != defender)
        .filter(|(_, piece)| include_king || piece.kind != PieceKind::King)
        .filter(|&(origin, _)| can_move_to(game_state, origin, target))
        .collect()
}
