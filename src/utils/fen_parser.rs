//! FEN-to-GameState parser.
//!
//! Builds a fresh `GameState` from a Forsyth-Edwards Notation string. The
//! halfmove and fullmove fields are optional and default to `0` and `1`.
//! After placement, `has_moved` flags are inferred from pawn home ranks and
//! the castling field.

use crate::chess_errors::{ChessResult, FenError};
use crate::game_state::{chess_types::*, game_state::GameState};

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&parts.len()) {
        return Err(FenError::FieldCount(parts.len()).into());
    }

    let mut game_state = GameState::new_empty();

    parse_board(parts[0], &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(parts[1])?;
    game_state.castling_rights = parse_castling_rights(parts[2])?;
    game_state.en_passant_target = parse_en_passant_square(parts[3])?;
    game_state.halfmove_clock = match parts.get(4) {
        Some(text) => parse_counter(text)?,
        None => 0,
    };
    game_state.fullmove_number = match parts.get(5) {
        Some(text) => parse_counter(text)?,
        None => 1,
    };

    infer_has_moved_flags(&mut game_state);

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::UnknownPiece(ch));
                }
                file += empty_count as usize;
                if file > 8 {
                    return Err(FenError::FileOverflow { rank: fen_rank_idx });
                }
                continue;
            }

            let piece = PieceRecord::from_fen_char(ch).ok_or(FenError::UnknownPiece(ch))?;
            if file >= 8 {
                return Err(FenError::FileOverflow { rank: fen_rank_idx });
            }

            game_state.set_piece(Square::at(file as u8, board_rank), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankWidth {
                rank: fen_rank_idx,
                width: file,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_king_side = true,
            'Q' => rights.white_queen_side = true,
            'k' => rights.black_king_side = true,
            'q' => rights.black_queen_side = true,
            _ => return Err(FenError::Castling(ch)),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Square::from_algebraic(en_passant_part)
        .map(Some)
        .map_err(|_| FenError::EnPassant(en_passant_part.to_owned()))
}

fn parse_counter(text: &str) -> Result<u16, FenError> {
    text.parse::<u16>()
        .map_err(|_| FenError::Counter(text.to_owned()))
}

/// Pawns off their home rank have moved. A rook is unmoved only on its home
/// corner with the matching castling flag set. A king is unmoved while either
/// of its castling flags is set.
fn infer_has_moved_flags(game_state: &mut GameState) {
    let rights = game_state.castling_rights;

    for square in Square::all() {
        let Some(mut piece) = game_state.get_piece(square) else {
            continue;
        };

        piece.has_moved = match piece.kind {
            PieceKind::Pawn => square.rank != piece.color.pawn_home_rank(),
            PieceKind::Rook => match CastlingRights::rook_home_side(piece.color, square) {
                Some(king_side) => !rights.get(piece.color, king_side),
                None => true,
            },
            PieceKind::King => !rights.any_for(piece.color),
            _ => false,
        };

        game_state.set_piece(square, Some(piece));
    }
}
