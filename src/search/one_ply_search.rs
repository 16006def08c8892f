//! Single-ply move selection.
//!
//! Every candidate for the side to move is played on a scratch clone and the
//! resulting position is scored for the mover. White keeps the highest
//! score and Black the lowest; the first candidate reaching the best score
//! wins, so the result follows board-scan order. The live board is only
//! read.

use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::checkmate::{is_in_checkmate, CheckmateRules};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_candidate_moves, CandidateMove};
use crate::search::board_scoring::BoardScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Charged when the candidate moves the piece this side moved last.
    pub repeat_piece_penalty: i32,
    /// Charged when a king move lands the king in checkmate.
    pub self_checkmate_penalty: i32,
    /// When the mover starts in check, drop candidates that stay in check.
    pub skip_unresolved_check: bool,
    pub checkmate_rules: CheckmateRules,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            repeat_piece_penalty: 50,
            self_checkmate_penalty: 9999,
            skip_unresolved_check: true,
            checkmate_rules: CheckmateRules::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<CandidateMove>,
    pub best_score: i32,
    pub candidates_scored: usize,
    pub candidates_skipped: usize,
}

#[inline]
fn improves(color: Color, score: i32, best: i32) -> bool {
    match color {
        Color::White => score > best,
        Color::Black => score < best,
    }
}

/// Score one candidate for `color`, penalties included. `None` when the
/// candidate is filtered out by `skip_unresolved_check`.
pub fn score_candidate<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    mv: &CandidateMove,
    scorer: &S,
    config: &SelectorConfig,
    last_moved_square: Option<Square>,
    started_in_check: bool,
) -> ChessResult<Option<i32>> {
    let color = mv.piece.color;
    let mut scratch = game_state.clone();
    scratch.apply_move(mv.from, mv.to, mv.promotion)?;

    if config.skip_unresolved_check && started_in_check && is_king_in_check(&scratch, color) {
        return Ok(None);
    }

    let mut score = scorer.score(&scratch, color);

    // Penalties push the score away from the mover's preferred direction.
    if last_moved_square == Some(mv.from) {
        score -= color.sign() * config.repeat_piece_penalty;
    }
    if mv.piece.kind == PieceKind::King && is_in_checkmate(&scratch, mv.to, config.checkmate_rules) {
        score -= color.sign() * config.self_checkmate_penalty;
    }

    Ok(Some(score))
}

/// Pick the best candidate for the side to move in `game_state`.
pub fn one_ply_search<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    scorer: &S,
    config: &SelectorConfig,
    last_moved_square: Option<Square>,
) -> ChessResult<SearchResult> {
    let color = game_state.side_to_move;
    let started_in_check = is_king_in_check(game_state, color);
    let mut result = SearchResult::default();

    for mv in generate_candidate_moves(game_state, color) {
        let Some(score) =
            score_candidate(game_state, &mv, scorer, config, last_moved_square, started_in_check)?
        else {
            result.candidates_skipped += 1;
            continue;
        };
        result.candidates_scored += 1;

        if result.best_move.is_none() || improves(color, score, result.best_score) {
            result.best_move = Some(mv);
            result.best_score = score;
        }
    }

    debug!(
        color = %color,
        scored = result.candidates_scored,
        skipped = result.candidates_skipped,
        best_score = result.best_score,
        "one-ply search finished"
    );
    Ok(result)
}
