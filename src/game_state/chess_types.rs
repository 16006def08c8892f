//! Value types shared by every subsystem: colors, piece kinds, piece records,
//! board coordinates, castling rights and move records.
//!
//! Everything here is `Copy`. Piece records are copied between squares and
//! never shared, so a move always writes a fresh record.

use std::fmt;

use crate::chess_errors::{ChessError, ChessResult};

/// Side to move / piece color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step a pawn of this color advances by.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks at the start of a game.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_home_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// +1 for White, -1 for Black. Used to sign evaluation terms.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase FEN letter for this kind.
    #[inline]
    pub const fn fen_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_fen_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        f.write_str(name)
    }
}

/// A piece as it stands on one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceRecord {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl PieceRecord {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn moved(self) -> Self {
        Self {
            has_moved: true,
            ..self
        }
    }

    /// Decode a FEN piece letter: uppercase is White, lowercase is Black.
    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        PieceKind::from_fen_letter(ch).map(|kind| Self::new(kind, color))
    }

    pub fn to_fen_char(self) -> char {
        let letter = self.kind.fen_letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }
}

impl fmt::Display for PieceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// Board coordinate. File 0 is the a-file, rank 0 is White's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    /// Checked construction from signed coordinates; `None` when off the board.
    #[inline]
    pub fn new(file: i8, rank: i8) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Unchecked-by-sign constructor for literals known to be in range.
    ///
    /// # Panics
    /// Panics if either coordinate is 8 or more.
    #[inline]
    pub const fn at(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square coordinate out of range");
        Self { file, rank }
    }

    #[inline]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        Self::new(self.file as i8 + d_file, self.rank as i8 + d_rank)
    }

    /// The square seen from the other side of the board: `(7 - file, 7 - rank)`.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self {
            file: 7 - self.file,
            rank: 7 - self.rank,
        }
    }

    /// All 64 squares in board-scan order (file-major, then rank).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Square { file, rank }))
    }

    /// Parse long algebraic notation such as `e4`.
    pub fn from_algebraic(text: &str) -> ChessResult<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidAlgebraic(text.to_owned()));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessError::InvalidAlgebraic(text.to_owned()));
        }
        Ok(Self {
            file: file - b'a',
            rank: rank - b'1',
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

/// Four independent castling flags. Once cleared a flag is never set again
/// by move application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    #[inline]
    pub fn get(&self, color: Color, king_side: bool) -> bool {
        match (color, king_side) {
            (Color::White, true) => self.white_king_side,
            (Color::White, false) => self.white_queen_side,
            (Color::Black, true) => self.black_king_side,
            (Color::Black, false) => self.black_queen_side,
        }
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, king_side: bool) {
        match (color, king_side) {
            (Color::White, true) => self.white_king_side = false,
            (Color::White, false) => self.white_queen_side = false,
            (Color::Black, true) => self.black_king_side = false,
            (Color::Black, false) => self.black_queen_side = false,
        }
    }

    #[inline]
    pub fn revoke_color(&mut self, color: Color) {
        self.revoke(color, true);
        self.revoke(color, false);
    }

    #[inline]
    pub fn any_for(&self, color: Color) -> bool {
        self.get(color, true) || self.get(color, false)
    }

    /// Which flag a rook standing on `square` guards, if that square is one
    /// of the four rook home squares for `color`.
    pub fn rook_home_side(color: Color, square: Square) -> Option<bool> {
        if square.rank != color.back_rank() {
            return None;
        }
        match square.file {
            0 => Some(false),
            7 => Some(true),
            _ => None,
        }
    }
}

/// Immutable description of one committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The piece as it stood on `from` before moving.
    pub moving_piece: PieceRecord,
    pub captured_piece: Option<PieceRecord>,
    /// Differs from `to` for an en-passant capture.
    pub captured_square: Option<Square>,
    pub promotion: Option<PieceKind>,
    pub is_castling: bool,
    pub rook_from: Option<Square>,
    pub rook_to: Option<Square>,
    pub is_en_passant_capture: bool,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.fen_letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_chars_round_trip_with_color() {
        let white_knight = PieceRecord::from_fen_char('N').expect("N is a piece");
        assert_eq!(white_knight.kind, PieceKind::Knight);
        assert_eq!(white_knight.color, Color::White);
        assert_eq!(white_knight.to_fen_char(), 'N');

        let black_queen = PieceRecord::from_fen_char('q').expect("q is a piece");
        assert_eq!(black_queen.color, Color::Black);
        assert_eq!(black_queen.to_fen_char(), 'q');

        assert!(PieceRecord::from_fen_char('x').is_none());
        assert!(PieceRecord::from_fen_char('3').is_none());
    }

    #[test]
    fn square_bounds_and_algebraic() {
        assert!(Square::new(-1, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        let e4 = Square::from_algebraic("e4").expect("e4 should parse");
        assert_eq!(e4, Square::at(4, 3));
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::at(0, 0).mirrored(), Square::at(7, 7));
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("e44").is_err());
    }

    #[test]
    fn board_scan_order_is_file_major() {
        let squares: Vec<Square> = Square::all().take(9).collect();
        assert_eq!(squares[0], Square::at(0, 0));
        assert_eq!(squares[1], Square::at(0, 1));
        assert_eq!(squares[8], Square::at(1, 0));
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn castling_flags_revoke_independently() {
        let mut rights = CastlingRights::ALL;
        rights.revoke(Color::White, true);
        assert!(!rights.white_king_side);
        assert!(rights.white_queen_side);
        rights.revoke_color(Color::Black);
        assert!(!rights.any_for(Color::Black));
        assert!(rights.any_for(Color::White));
    }
}
