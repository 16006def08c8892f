//! Engine abstraction shared by the session and the match harness.
//!
//! Engines read the position, never mutate it, and hand back the move they
//! want committed. Committing is the caller's job.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::CandidateMove;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<CandidateMove>,
    pub best_score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        Err(ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    /// Pick a move for `game_state.side_to_move`. `best_move` is `None` when
    /// the side has no candidate at all.
    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput>;

    /// Called after the move returned by `choose_move` was committed to the
    /// board. Not called when the caller rejects it.
    fn move_committed(&mut self, _mv: &CandidateMove) {}
}

/// Shared boolean option parsing.
pub(crate) fn parse_bool_option(name: &str, value: &str) -> ChessResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_options_accept_the_usual_spellings() {
        assert_eq!(parse_bool_option("X", " ON "), Ok(true));
        assert_eq!(parse_bool_option("X", "0"), Ok(false));
        assert!(matches!(
            parse_bool_option("X", "maybe"),
            Err(ChessError::InvalidOption { .. })
        ));
    }
}
