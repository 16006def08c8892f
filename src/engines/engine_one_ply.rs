//! One-ply evaluating engine.
//!
//! Wraps the single-ply selector with a board scorer and remembers where the
//! last committed piece landed, so the repeat penalty can discourage shuffling
//! the same piece back and forth.

use tracing::info;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{parse_bool_option, Engine, EngineOutput};
use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::CandidateMove;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::one_ply_search::{one_ply_search, SelectorConfig};

pub struct OnePlyEngine {
    config: SelectorConfig,
    scorer: Box<dyn BoardScorer>,
    last_moved_square: Option<Square>,
}

impl OnePlyEngine {
    pub fn new() -> Self {
        Self::with_config(SelectorConfig::default())
    }

    pub fn with_config(config: SelectorConfig) -> Self {
        Self::with_scorer(config, Box::new(PieceSquareScorer))
    }

    pub fn with_scorer(config: SelectorConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self {
            config,
            scorer,
            last_moved_square: None,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn last_moved_square(&self) -> Option<Square> {
        self.last_moved_square
    }

    fn parse_penalty(name: &str, value: &str) -> ChessResult<i32> {
        value.trim().parse::<i32>().map_err(|_| ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }
}

impl Default for OnePlyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for OnePlyEngine {
    fn name(&self) -> &str {
        "Mailbox One-Ply"
    }

    fn new_game(&mut self) {
        self.last_moved_square = None;
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("RepeatPenalty") {
            self.config.repeat_piece_penalty = Self::parse_penalty(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("SelfMatePenalty") {
            self.config.self_checkmate_penalty = Self::parse_penalty(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("SkipUnresolvedCheck") {
            self.config.skip_unresolved_check = parse_bool_option(name, value)?;
            return Ok(());
        }
        Err(ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput> {
        let result = one_ply_search(
            game_state,
            self.scorer.as_ref(),
            &self.config,
            self.last_moved_square,
        )?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string one_ply scored {} skipped {}",
            result.candidates_scored, result.candidates_skipped
        ));

        let Some(best) = result.best_move else {
            info!(color = %game_state.side_to_move, "no candidate moves");
            return Ok(out);
        };

        out.info_lines
            .push(format!("info string one_ply score {}", result.best_score));
        out.best_move = Some(best);
        out.best_score = Some(result.best_score);
        Ok(out)
    }

    fn move_committed(&mut self, mv: &CandidateMove) {
        self.last_moved_square = Some(mv.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_update_the_selector_config() {
        let mut engine = OnePlyEngine::new();
        engine.set_option("RepeatPenalty", "75").expect("valid option");
        engine.set_option("selfmatepenalty", "5000").expect("valid option");
        engine.set_option("SkipUnresolvedCheck", "false").expect("valid option");
        assert_eq!(engine.config().repeat_piece_penalty, 75);
        assert_eq!(engine.config().self_checkmate_penalty, 5000);
        assert!(!engine.config().skip_unresolved_check);

        assert!(engine.set_option("RepeatPenalty", "lots").is_err());
        assert!(engine.set_option("Hash", "64").is_err());
    }

    #[test]
    fn remembers_only_committed_moves() {
        let mut engine = OnePlyEngine::new();
        let state = GameState::new_game();
        let out = engine.choose_move(&state).expect("search");
        let best = out.best_move.expect("opening move");
        assert!(out.best_score.is_some());
        assert_eq!(engine.last_moved_square(), None, "choosing is not playing");

        engine.move_committed(&best);
        assert_eq!(engine.last_moved_square(), Some(best.to));

        engine.new_game();
        assert_eq!(engine.last_moved_square(), None);
    }

    #[test]
    fn fresh_engines_agree_on_the_same_position() {
        let state = GameState::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
            .expect("FEN should parse");
        let a = OnePlyEngine::new().choose_move(&state).expect("search");
        let b = OnePlyEngine::new().choose_move(&state).expect("search");
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.best_score, b.best_score);
    }
}
