//! Errors used throughout the engine.
//!
//! `ChessError` is the single error type returned by fallible operations.
//! Ordinary illegal moves are not errors: legality queries answer `false`
//! and the session's `move_to` answers `false`. Errors are reserved for
//! malformed input (FEN, algebraic squares, engine options) and for contract
//! violations such as applying a move from an empty square.

use thiserror::Error;

use crate::game_state::chess_types::Square;

/// Reasons a FEN string is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must contain at least 4 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("FEN placement must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("FEN rank {rank} places a piece beyond the h-file")]
    FileOverflow { rank: usize },

    #[error("FEN rank {rank} describes {width} files instead of 8")]
    RankWidth { rank: usize, width: usize },

    #[error("invalid piece character '{0}' in FEN placement")]
    UnknownPiece(char),

    #[error("invalid side-to-move field '{0}'")]
    SideToMove(String),

    #[error("invalid castling rights character '{0}'")]
    Castling(char),

    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),

    #[error("invalid move counter '{0}'")]
    Counter(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),

    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraic(String),

    /// A move was applied from a square with no piece on it. Callers must
    /// validate legality before applying.
    #[error("no piece exists on the origin square {0}")]
    EmptyOrigin(Square),

    #[error("invalid engine option {name}={value}")]
    InvalidOption { name: String, value: String },
}

pub type ChessResult<T> = Result<T, ChessError>;
