//! Command/query façade over one live game.
//!
//! `GameSession` owns the authoritative `GameState`. Queries never mutate
//! it. `move_to` validates a move on a scratch clone and swaps the clone in
//! only when every rule passes, so a rejected move leaves nothing behind.
//! A single in-flight flag gates new moves while a collaborator finishes
//! presenting the previous one; moves issued meanwhile are rejected, never
//! queued.

use tracing::{debug, warn};

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::checkmate::{is_in_checkmate, CheckmateRules};
use crate::move_generation::legal_move_checks::{is_in_check, is_king_in_check, is_square_attacked};
use crate::move_generation::legal_move_generator::{generate_legal_moves, promotion_for};
use crate::moves::piece_legality::{can_move_to, can_move_to_xy, possible_moves};
use crate::session::game_events::{EventLog, GameEvent, GameEventKind, RejectReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Hold the in-flight flag after each move until `complete_move`.
    pub await_move_completion: bool,
    /// Reject castles whose king starts on, crosses, or lands on an attacked square.
    pub forbid_castling_through_check: bool,
    /// Reject any move that leaves the mover's king attacked.
    pub reject_moves_into_check: bool,
    /// Kind a pawn becomes on its last rank when a move is issued by square.
    pub auto_promotion: PieceKind,
    pub checkmate_rules: CheckmateRules,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            await_move_completion: false,
            forbid_castling_through_check: false,
            reject_moves_into_check: false,
            auto_promotion: PieceKind::Queen,
            checkmate_rules: CheckmateRules::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    config: SessionConfig,
    move_in_flight: bool,
    finished: bool,
    winner: Option<Color>,
    events: EventLog,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_state(GameState::new_game(), config)
    }

    pub fn from_fen(fen: &str, config: SessionConfig) -> ChessResult<Self> {
        Ok(Self::with_state(GameState::from_fen(fen)?, config))
    }

    pub fn with_state(state: GameState, config: SessionConfig) -> Self {
        Self {
            state,
            config,
            move_in_flight: false,
            finished: false,
            winner: None,
            events: EventLog::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn fen(&self) -> String {
        self.state.get_fen()
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn can_move_to(&self, from: Square, x: i32, y: i32) -> bool {
        can_move_to_xy(&self.state, from, x, y)
    }

    pub fn possible_moves(&self, from: Square) -> Vec<Square> {
        possible_moves(&self.state, from)
    }

    #[inline]
    pub fn is_move_in_flight(&self) -> bool {
        self.move_in_flight
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Is the side to move checkmated right now? Unlike `is_finished`, this
    /// also answers for positions loaded already mated.
    pub fn is_checkmate(&self) -> bool {
        let color = self.state.side_to_move;
        self.state
            .find_king(color)
            .is_some_and(|square| is_in_checkmate(&self.state, square, self.config.checkmate_rules))
    }

    /// Side to move is not in check and has no legal move. Reported only.
    pub fn is_stalemate(&self) -> bool {
        let color = self.state.side_to_move;
        !is_king_in_check(&self.state, color) && generate_legal_moves(&self.state, color).is_empty()
    }

    /// A hundred half-moves without a pawn move or capture. Reported only.
    pub fn is_fifty_move_draw_claimable(&self) -> bool {
        self.state.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    /// Events since the last drain, oldest first. Drain after each command;
    /// an undrained queue drops its oldest entries once full.
    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.pending()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Move the piece on `from` to `(x, y)`. `false`, with the board
    /// untouched, when the move is rejected for any reason.
    pub fn move_to(&mut self, from: Square, x: i32, y: i32) -> bool {
        if !GameState::is_within_bounds(x, y) {
            return self.reject(from, (x, y), RejectReason::IllegalDestination);
        }
        let to = Square::at(x as u8, y as u8);
        let promotion = match self.state.get_piece(from) {
            Some(piece) => promotion_for(piece, to, self.config.auto_promotion),
            None => None,
        };
        self.commit(from, to, promotion)
    }

    /// Release the in-flight flag once the previous move has been presented.
    pub fn complete_move(&mut self) {
        self.move_in_flight = false;
    }

    /// Ask `engine` for a move and commit it. `Ok(None)` when the game is
    /// over, a move is in flight, the engine has nothing to play, or its
    /// choice is rejected.
    pub fn play_engine_turn(&mut self, engine: &mut dyn Engine) -> ChessResult<Option<MoveRecord>> {
        if self.finished || self.move_in_flight {
            return Ok(None);
        }
        let output = engine.choose_move(&self.state)?;
        for line in &output.info_lines {
            debug!(engine = engine.name(), "{line}");
        }
        let Some(mv) = output.best_move else {
            return Ok(None);
        };

        if self.commit(mv.from, mv.to, mv.promotion) {
            engine.move_committed(&mv);
            Ok(self.state.last_move().copied())
        } else {
            warn!(engine = engine.name(), from = %mv.from, to = %mv.to, "engine move rejected");
            Ok(None)
        }
    }

    fn commit(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) -> bool {
        let target = (i32::from(to.file), i32::from(to.rank));
        if self.move_in_flight {
            return self.reject(from, target, RejectReason::MoveInFlight);
        }
        if self.finished {
            return self.reject(from, target, RejectReason::GameFinished);
        }
        let Some(piece) = self.state.get_piece(from) else {
            return self.reject(from, target, RejectReason::NoPiece);
        };
        if piece.color != self.state.side_to_move {
            return self.reject(from, target, RejectReason::WrongSide);
        }
        if !can_move_to(&self.state, from, to) {
            return self.reject(from, target, RejectReason::IllegalDestination);
        }
        if self.config.forbid_castling_through_check && self.castles_through_check(piece, from, to) {
            return self.reject(from, target, RejectReason::CastlesThroughCheck);
        }

        let was_in_check = is_king_in_check(&self.state, piece.color);
        let mut scratch = self.state.clone();
        let record = match scratch.apply_move(from, to, promotion) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "apply failed after legality passed");
                return self.reject(from, target, RejectReason::NoPiece);
            }
        };
        let in_check_after = is_king_in_check(&scratch, piece.color);
        if was_in_check && in_check_after {
            return self.reject(from, target, RejectReason::StillInCheck);
        }
        if self.config.reject_moves_into_check && in_check_after {
            return self.reject(from, target, RejectReason::LeavesKingInCheck);
        }

        self.state = scratch;
        self.announce(&record);
        if self.config.await_move_completion {
            self.move_in_flight = true;
        }
        true
    }

    fn castles_through_check(&self, king: PieceRecord, from: Square, to: Square) -> bool {
        if king.kind != PieceKind::King || from.rank != to.rank || from.file.abs_diff(to.file) != 2 {
            return false;
        }
        let low = from.file.min(to.file);
        let high = from.file.max(to.file);
        (low..=high).any(|file| is_square_attacked(&self.state, Square::at(file, from.rank), king.color))
    }

    fn announce(&mut self, record: &MoveRecord) {
        if let (Some(piece), Some(square)) = (record.captured_piece, record.captured_square) {
            self.events.push(GameEventKind::Capture { piece, square });
        }
        let Some(arrived) = self.state.get_piece(record.to) else {
            return;
        };
        self.events.push(GameEventKind::Moved {
            piece: arrived,
            from: record.from,
            to: record.to,
        });

        if record.captured_piece.is_some_and(|piece| piece.kind == PieceKind::King) {
            self.finish(arrived.color);
            return;
        }

        let opponent = arrived.color.opposite();
        let Some(king_square) = self.state.find_king(opponent) else {
            return;
        };
        if !is_in_check(&self.state, king_square) {
            return;
        }
        let Some(king) = self.state.get_piece(king_square) else {
            return;
        };
        self.events.push(GameEventKind::Check {
            piece: king,
            square: king_square,
        });

        if is_in_checkmate(&self.state, king_square, self.config.checkmate_rules) {
            self.events.push(GameEventKind::Checkmate {
                piece: king,
                square: king_square,
            });
            self.finish(arrived.color);
        }
    }

    fn finish(&mut self, winner: Color) {
        self.finished = true;
        self.winner = Some(winner);
        self.events.push(GameEventKind::Winner { color: winner });
    }

    fn reject(&mut self, from: Square, to: (i32, i32), reason: RejectReason) -> bool {
        self.events.push(GameEventKind::Rejected { from, to, reason });
        false
    }
}
