//! Authoritative board state.
//!
//! `GameState` is an 8x8 mailbox of optional piece records plus the derived
//! state FEN carries (side to move, castling rights, en-passant target, move
//! clocks) and an append-only move history. Speculative work always happens
//! on a `clone()`; the live instance is only mutated through `apply_move`.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move_in_place;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Indexed `[file][rank]`.
    squares: [[Option<PieceRecord>; 8]; 8],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    /// Square a pawn may capture into, set only right after a double step.
    pub en_passant_target: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub move_history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            squares: [[None; 8]; 8],
            side_to_move: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            move_history: Vec::new(),
        }
    }
}

impl GameState {
    /// An empty board with White to move and all castling flags set.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// The standard starting position.
    pub fn new_game() -> Self {
        let mut state = Self::new_empty();
        for file in 0..8u8 {
            state.set_piece(
                Square::at(file, Color::White.pawn_home_rank()),
                Some(PieceRecord::new(PieceKind::Pawn, Color::White)),
            );
            state.set_piece(
                Square::at(file, Color::Black.pawn_home_rank()),
                Some(PieceRecord::new(PieceKind::Pawn, Color::Black)),
            );
        }
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back_rank.into_iter().enumerate() {
            for color in [Color::White, Color::Black] {
                state.set_piece(
                    Square::at(file as u8, color.back_rank()),
                    Some(PieceRecord::new(kind, color)),
                );
            }
        }
        debug_assert_eq!(generate_fen(&state), STARTING_POSITION_FEN);
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Replace this state with the position described by `fen`.
    ///
    /// All-or-nothing: on error `self` is left untouched.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        *self = parse_fen(fen)?;
        Ok(())
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn is_within_bounds(x: i32, y: i32) -> bool {
        (0..8).contains(&x) && (0..8).contains(&y)
    }

    #[inline]
    pub fn get_piece(&self, square: Square) -> Option<PieceRecord> {
        self.squares[square.file as usize][square.rank as usize]
    }

    /// Signed-coordinate lookup; anything off the board is empty.
    #[inline]
    pub fn piece_at(&self, x: i32, y: i32) -> Option<PieceRecord> {
        if Self::is_within_bounds(x, y) {
            self.squares[x as usize][y as usize]
        } else {
            None
        }
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<PieceRecord>) {
        self.squares[square.file as usize][square.rank as usize] = piece;
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.get_piece(square).is_some()
    }

    /// Every occupied square, in board-scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceRecord)> + '_ {
        Square::all().filter_map(move |square| self.get_piece(square).map(|p| (square, p)))
    }

    /// Pieces of one color, in board-scan order.
    pub fn pieces_of(&self, color: Color) -> Vec<(Square, PieceRecord)> {
        self.occupied()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// The first king of `color` found in board-scan order.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(square, _)| square)
    }

    /// Commit a move. See `legal_move_apply::apply_move_in_place`.
    #[inline]
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveRecord> {
        apply_move_in_place(self, from, to, promotion)
    }

    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.move_history.last()
    }
}
