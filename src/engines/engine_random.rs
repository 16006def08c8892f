//! Random-move engine.
//!
//! Picks uniformly among the legal moves for the side to move. Seeded so
//! self-play series and diagnostics are reproducible.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub struct RandomEngine {
    seed: u64,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Mailbox Random"
    }

    fn new_game(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput> {
        let legal_moves = generate_legal_moves(game_state, game_state.side_to_move);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::would_leave_king_in_check;

    #[test]
    fn same_seed_same_moves() {
        let state = GameState::new_game();
        let mut a = RandomEngine::new(7);
        let mut b = RandomEngine::new(7);
        for _ in 0..5 {
            let ma = a.choose_move(&state).expect("move").best_move;
            let mb = b.choose_move(&state).expect("move").best_move;
            assert_eq!(ma, mb);
        }
    }

    #[test]
    fn new_game_replays_the_seed() {
        let state = GameState::new_game();
        let mut engine = RandomEngine::new(42);
        let first = engine.choose_move(&state).expect("move").best_move;
        engine.new_game();
        let again = engine.choose_move(&state).expect("move").best_move;
        assert_eq!(first, again);
    }

    #[test]
    fn only_picks_moves_that_keep_the_king_safe() {
        // The e2 knight is pinned.
        let state = GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN");
        let mut engine = RandomEngine::new(3);
        for _ in 0..20 {
            let mv = engine.choose_move(&state).expect("move").best_move.expect("has moves");
            assert!(!would_leave_king_in_check(&state, mv.from, mv.to, mv.promotion));
        }
    }

    #[test]
    fn no_legal_moves_yields_none() {
        let state = GameState::from_fen("8/8/8/8/8/8/8/K7 b - - 0 1").expect("FEN");
        let out = RandomEngine::default().choose_move(&state).expect("ok");
        assert_eq!(out.best_move, None);
    }
}
