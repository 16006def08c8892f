//! Candidate move enumeration for one color.
//!
//! Candidates come from running each piece's legality rule over the whole
//! board, pieces and destinations both in board-scan order. That order is
//! part of the contract: the move selector breaks ties by it.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::would_leave_king_in_check;
use crate::moves::piece_legality::possible_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceRecord,
    pub promotion: Option<PieceKind>,
}

/// Promotion to attach when a pawn of `piece.color` lands on `to`.
#[inline]
pub fn promotion_for(piece: PieceRecord, to: Square, promote_to: PieceKind) -> Option<PieceKind> {
    let last_rank = piece.color.opposite().back_rank();
    (piece.kind == PieceKind::Pawn && to.rank == last_rank).then_some(promote_to)
}

/// Every move the per-piece rules allow for `color`, ignoring check.
/// Pawns reaching the last rank promote to a queen.
pub fn generate_candidate_moves(game_state: &GameState, color: Color) -> Vec<CandidateMove> {
    let mut out = Vec::new();
    for (from, piece) in game_state.pieces_of(color) {
        for to in possible_moves(game_state, from) {
            out.push(CandidateMove {
                from,
                to,
                piece,
                promotion: promotion_for(piece, to, PieceKind::Queen),
            });
        }
    }
    out
}

/// Candidates that do not leave `color`'s own king in check.
pub fn generate_legal_moves(game_state: &GameState, color: Color) -> Vec<CandidateMove> {
    generate_candidate_moves(game_state, color)
        .into_iter()
        .filter(|mv| !would_leave_king_in_check(game_state, mv.from, mv.to, mv.promotion))
        .collect()
}
