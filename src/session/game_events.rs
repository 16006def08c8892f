//! Notifications raised while a game is played.
//!
//! The session records one event per thing a collaborator (board view,
//! sound, move list) may want to react to. Events are logged through
//! `tracing` as they are raised and queued until drained.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::game_state::chess_types::{Color, PieceRecord, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MoveInFlight,
    GameFinished,
    WrongSide,
    NoPiece,
    IllegalDestination,
    StillInCheck,
    LeavesKingInCheck,
    CastlesThroughCheck,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::MoveInFlight => "a move is already in flight",
            RejectReason::GameFinished => "the game is finished",
            RejectReason::WrongSide => "it is not that side's turn",
            RejectReason::NoPiece => "no piece on the origin square",
            RejectReason::IllegalDestination => "the piece cannot reach that square",
            RejectReason::StillInCheck => "the king would still be in check",
            RejectReason::LeavesKingInCheck => "the move exposes the king",
            RejectReason::CastlesThroughCheck => "the king would castle through check",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEventKind {
    Check { piece: PieceRecord, square: Square },
    Checkmate { piece: PieceRecord, square: Square },
    Capture { piece: PieceRecord, square: Square },
    Moved { piece: PieceRecord, from: Square, to: Square },
    Winner { color: Color },
    Rejected { from: Square, to: (i32, i32), reason: RejectReason },
}

impl fmt::Display for GameEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEventKind::Check { piece, .. } => write!(f, "{piece} in check"),
            GameEventKind::Checkmate { piece, .. } => write!(f, "{piece} in checkmate"),
            GameEventKind::Capture { piece, .. } => write!(f, "take {piece}"),
            GameEventKind::Moved { piece, to, .. } => {
                write!(f, "{piece} to ({}, {})", to.file, to.rank)
            }
            GameEventKind::Winner { color } => write!(f, "winner is {color}"),
            GameEventKind::Rejected { from, to, reason } => {
                write!(f, "move from {from} to ({}, {}) rejected: {reason}", to.0, to.1)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    pub kind: GameEventKind,
    pub at: DateTime<Utc>,
}

impl GameEvent {
    pub fn now(kind: GameEventKind) -> Self {
        Self { kind, at: Utc::now() }
    }
}

/// Most events held before the oldest start being dropped.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Queue of events awaiting a collaborator.
///
/// Collaborators are expected to `drain` after each command. A queue nobody
/// drains keeps only the newest `MAX_PENDING_EVENTS` entries.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pending: Vec<GameEvent>,
    dropped: u64,
}

impl EventLog {
    pub fn push(&mut self, kind: GameEventKind) {
        match kind {
            GameEventKind::Rejected { .. } => debug!(event = %kind, "game event"),
            _ => info!(event = %kind, "game event"),
        }
        if self.pending.len() >= MAX_PENDING_EVENTS {
            let overflow = self.pending.len() + 1 - MAX_PENDING_EVENTS;
            self.pending.drain(..overflow);
            if self.dropped == 0 {
                warn!(cap = MAX_PENDING_EVENTS, "event queue full, dropping oldest events");
            }
            self.dropped = self.dropped.saturating_add(overflow as u64);
        }
        self.pending.push(GameEvent::now(kind));
    }

    /// Events discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }
}
