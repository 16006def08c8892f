//! Committed move application.
//!
//! Relocates the moving piece, resolves ordinary and en-passant captures,
//! moves the castling rook, then updates castling rights, the en-passant
//! target, clocks, and side to move before appending a `MoveRecord`.

use tracing::trace;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};

pub fn apply_move_in_place(
    game_state: &mut GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<MoveRecord> {
    let moving_piece = game_state
        .get_piece(from)
        .ok_or(ChessError::EmptyOrigin(from))?;

    let mut record = MoveRecord {
        from,
        to,
        moving_piece,
        captured_piece: None,
        captured_square: None,
        promotion,
        is_castling: false,
        rook_from: None,
        rook_to: None,
        is_en_passant_capture: false,
    };

    // En passant: a pawn landing on the empty target captures the pawn
    // one rank behind it.
    if moving_piece.kind == PieceKind::Pawn
        && !game_state.is_occupied(to)
        && game_state.en_passant_target == Some(to)
    {
        if let Some(victim_square) = to.offset(0, -moving_piece.color.forward()) {
            match game_state.get_piece(victim_square) {
                Some(victim)
                    if victim.kind == PieceKind::Pawn && victim.color != moving_piece.color =>
                {
                    game_state.set_piece(victim_square, None);
                    record.captured_piece = Some(victim);
                    record.captured_square = Some(victim_square);
                    record.is_en_passant_capture = true;
                }
                _ => {}
            }
        }
    }

    // Ordinary capture.
    if let Some(captured) = game_state.get_piece(to) {
        game_state.set_piece(to, None);
        record.captured_piece = Some(captured);
        record.captured_square = Some(to);
    }

    // Castling rook relocation.
    if moving_piece.kind == PieceKind::King && (to.file as i8 - from.file as i8).abs() == 2 {
        let king_side = to.file > from.file;
        let rook_from = Square::at(if king_side { 7 } else { 0 }, from.rank);
        let rook_to = Square::at(if king_side { to.file - 1 } else { to.file + 1 }, from.rank);

        if let Some(rook) = game_state.get_piece(rook_from) {
            game_state.set_piece(rook_from, None);
            game_state.set_piece(rook_to, Some(rook.moved()));
            record.is_castling = true;
            record.rook_from = Some(rook_from);
            record.rook_to = Some(rook_to);
        }
    }

    // Relocate the mover as a fresh record.
    game_state.set_piece(from, None);
    let mut arrived = moving_piece.moved();
    if let Some(kind) = promotion {
        arrived.kind = kind;
    }
    game_state.set_piece(to, Some(arrived));

    update_castling_rights(game_state, &record);
    update_en_passant_target(game_state, &record);
    update_move_counters(game_state, &record);

    game_state.side_to_move = moving_piece.color.opposite();
    game_state.move_history.push(record);

    trace!(
        move_text = %record,
        fen = %game_state.get_fen(),
        "applied move"
    );

    Ok(record)
}

fn update_castling_rights(game_state: &mut GameState, record: &MoveRecord) {
    let mover = record.moving_piece;
    let rights = &mut game_state.castling_rights;

    match mover.kind {
        PieceKind::King => rights.revoke_color(mover.color),
        PieceKind::Rook => {
            if let Some(king_side) = CastlingRights::rook_home_side(mover.color, record.from) {
                rights.revoke(mover.color, king_side);
            }
        }
        _ => {}
    }

    if let (Some(captured), Some(square)) = (record.captured_piece, record.captured_square) {
        if captured.kind == PieceKind::Rook {
            if let Some(king_side) = CastlingRights::rook_home_side(captured.color, square) {
                rights.revoke(captured.color, king_side);
            }
        }
    }
}

fn update_en_passant_target(game_state: &mut GameState, record: &MoveRecord) {
    let double_step = record.moving_piece.kind == PieceKind::Pawn
        && (record.to.rank as i8 - record.from.rank as i8).abs() == 2;

    game_state.en_passant_target = if double_step {
        Some(Square::at(record.from.file, (record.from.rank + record.to.rank) / 2))
    } else {
        None
    };
}

fn update_move_counters(game_state: &mut GameState, record: &MoveRecord) {
    if record.moving_piece.kind == PieceKind::Pawn || record.is_capture() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }

    if record.moving_piece.color == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::{chess_types::*, game_state::GameState};
    use crate::moves::piece_legality::can_move_to;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    fn play(state: &mut GameState, from: &str, to: &str) -> MoveRecord {
        state
            .apply_move(sq(from), sq(to), None)
            .expect("move should apply")
    }

    #[test]
    fn empty_origin_is_a_contract_error() {
        let mut state = GameState::new_game();
        let err = state
            .apply_move(sq("e4"), sq("e5"), None)
            .expect_err("no piece on e4");
        assert_eq!(err, ChessError::EmptyOrigin(sq("e4")));
        assert_eq!(state.get_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn double_step_sets_target_and_next_move_clears_it() {
        let mut state = GameState::new_game();
        play(&mut state, "e2", "e4");
        assert_eq!(state.en_passant_target, Some(sq("e3")));
        assert_eq!(state.side_to_move, Color::Black);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 1);
        assert_eq!(
            state.get_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        play(&mut state, "g8", "f6");
        assert_eq!(state.en_passant_target, None);
        assert_eq!(state.halfmove_clock, 1);
        assert_eq!(state.fullmove_number, 2);
        assert_eq!(state.side_to_move, Color::White);
    }

    #[test]
    fn en_passant_removes_the_pawn_behind_the_target() {
        let mut state =
            GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        play(&mut state, "d7", "d5");
        assert_eq!(state.en_passant_target, Some(sq("d6")));
        assert!(can_move_to(&state, sq("e5"), sq("d6")));

        let record = play(&mut state, "e5", "d6");
        assert!(record.is_en_passant_capture);
        assert_eq!(record.captured_square, Some(sq("d5")));
        assert_eq!(
            record.captured_piece.map(|p| (p.kind, p.color)),
            Some((PieceKind::Pawn, Color::Black))
        );
        assert!(state.get_piece(sq("d5")).is_none(), "captured pawn removed from rank 5");
        assert!(state.get_piece(sq("d6")).is_some());
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.en_passant_target, None);
    }

    #[test]
    fn king_side_castle_moves_rook_and_clears_both_rights() {
        let mut state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("FEN should parse");
        assert!(can_move_to(&state, sq("e1"), sq("g1")));

        let record = play(&mut state, "e1", "g1");
        assert!(record.is_castling);
        assert_eq!(record.rook_from, Some(sq("h1")));
        assert_eq!(record.rook_to, Some(sq("f1")));

        let rook = state.get_piece(sq("f1")).expect("rook relocated");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(rook.has_moved);
        assert!(state.get_piece(sq("h1")).is_none());
        assert!(!state.castling_rights.white_king_side);
        assert!(!state.castling_rights.white_queen_side);
        assert!(state.castling_rights.black_king_side);
        assert_eq!(state.get_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 10");

        // Reloading never restores rights that move application cleared.
        let reloaded = GameState::from_fen(&state.get_fen()).expect("FEN should parse");
        assert!(!reloaded.castling_rights.any_for(Color::White));
        assert!(!can_move_to(&reloaded, sq("g1"), sq("e1")));
    }

    #[test]
    fn queen_side_castle_for_black() {
        let mut state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("FEN should parse");
        let record = play(&mut state, "e8", "c8");
        assert_eq!(record.rook_from, Some(sq("a8")));
        assert_eq!(record.rook_to, Some(sq("d8")));
        assert_eq!(state.get_fen(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 1 2");
    }

    #[test]
    fn rook_moves_and_captures_revoke_matching_rights() {
        let mut state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        play(&mut state, "a1", "a8");
        assert!(!state.castling_rights.white_queen_side, "a1 rook moved");
        assert!(!state.castling_rights.black_queen_side, "a8 rook captured");
        assert!(state.castling_rights.white_king_side);
        assert!(state.castling_rights.black_king_side);
        assert_eq!(state.halfmove_clock, 0);
    }

    #[test]
    fn promotion_replaces_kind_and_history_records_everything() {
        let mut state =
            GameState::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let record = state
            .apply_move(sq("a7"), sq("b8"), Some(PieceKind::Queen))
            .expect("promotion capture should apply");

        let queen = state.get_piece(sq("b8")).expect("promoted piece");
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::White);
        assert!(queen.has_moved);
        assert_eq!(record.promotion, Some(PieceKind::Queen));
        assert_eq!(record.moving_piece.kind, PieceKind::Pawn);
        assert_eq!(record.captured_piece.map(|p| p.kind), Some(PieceKind::Knight));
        assert_eq!(state.move_history, vec![record]);
        assert_eq!(record.to_string(), "a7b8q");
    }
}
