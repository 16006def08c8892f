//! Static board evaluation.
//!
//! Search delegates scoring to the `BoardScorer` trait so the heuristic can
//! be swapped without touching the selector. `PieceSquareScorer` is the
//! engine's default and sums three terms over every occupied square:
//!
//! 1. material of the pieces belonging to the evaluated color;
//! 2. a signed balance, `+(material + table)` for White pieces and
//!    `-(material + mirrored table)` for Black pieces;
//! 3. mobility, `±2` for each enemy piece a piece could capture, signed by
//!    that piece's own color.

use crate::game_state::chess_rules::piece_value;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::piece_legality::can_move_to;
use crate::tables::piece_square_tables::piece_square_value;

pub trait BoardScorer: Send + Sync {
    /// Positive favors White, negative favors Black.
    fn score(&self, game_state: &GameState, color: Color) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    pub const MOBILITY_WEIGHT: i32 = 2;

    /// Material owned by `color`.
    pub fn material_for(game_state: &GameState, color: Color) -> i32 {
        game_state
            .pieces_of(color)
            .into_iter()
            .map(|(_, piece)| piece_value(piece.kind))
            .sum()
    }

    /// White-minus-Black material plus piece-square values.
    pub fn signed_balance(game_state: &GameState) -> i32 {
        game_state
            .occupied()
            .map(|(square, piece)| {
                piece.color.sign()
                    * (piece_value(piece.kind) + piece_square_value(piece.kind, piece.color, square))
            })
            .sum()
    }

    /// White-minus-Black count of capturable enemy pieces, weighted.
    pub fn mobility(game_state: &GameState) -> i32 {
        let occupied: Vec<(Square, PieceRecord)> = game_state.occupied().collect();
        let mut score = 0i32;
        for &(origin, piece) in &occupied {
            let capturable = occupied
                .iter()
                .filter(|(_, target)| target.color != piece.color)
                .filter(|&&(target_square, _)| can_move_to(game_state, origin, target_square))
                .count() as i32;
            score += piece.color.sign() * Self::MOBILITY_WEIGHT * capturable;
        }
        score
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState, color: Color) -> i32 {
        Self::material_for(game_state, color)
            + Self::signed_balance(game_state)
            + Self::mobility(game_state)
    }
}

/// Plain material balance, White minus Black. Handy for tests and as a
/// cheaper scorer for self-play.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, _color: Color) -> i32 {
        PieceSquareScorer::material_for(game_state, Color::White)
            - PieceSquareScorer::material_for(game_state, Color::Black)
    }
}
