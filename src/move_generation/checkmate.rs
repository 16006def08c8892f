//! Checkmate detection.
//!
//! A checked piece is mated when it has no escape square, no friendly piece
//! can capture an attacker, and no friendly piece can step onto an attack
//! line. Every candidate response is played out on a scratch copy and only
//! counts if the defender is no longer in check afterwards.

use tracing::debug;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{attacking_pieces, is_in_check, is_king_in_check};
use crate::moves::move_shared::squares_between;
use crate::moves::piece_legality::{can_move_to, possible_moves};

/// How the escape scan turns the defender's possible moves into squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeScan {
    /// Treat each possible move as the absolute destination it is.
    #[default]
    AbsoluteDestinations,
    /// Add each possible move to the defender's square again, as if it were
    /// an offset. Kept to reproduce positions evaluated that way; it misses
    /// most real escapes.
    LegacyOffsetDoubling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckmateRules {
    pub escape_scan: EscapeScan,
}

/// Is the piece on `square` in check with no response? `false` whenever it
/// is not currently in check, which includes every non-king piece.
pub fn is_in_checkmate(game_state: &GameState, square: Square, rules: CheckmateRules) -> bool {
    if !is_in_check(game_state, square) {
        return false;
    }
    let Some(defender) = game_state.get_piece(square) else {
        return false;
    };

    if has_escape_square(game_state, square, defender.color, rules.escape_scan) {
        return false;
    }

    for (attacker_square, _) in attacking_pieces(game_state, square) {
        if can_capture_attacker(game_state, square, attacker_square) {
            return false;
        }
        for block_square in line_of_attack(attacker_square, square) {
            if can_block_attack(game_state, square, attacker_square, block_square) {
                return false;
            }
        }
    }

    debug!(square = %square, piece = %defender, "checkmate detected");
    true
}

/// Squares strictly between `attacker` and `defender`, ordered from the
/// attacker outward. Empty for knights and adjacent attackers.
#[inline]
pub fn line_of_attack(attacker: Square, defender: Square) -> Vec<Square> {
    squares_between(attacker, defender)
}

/// Can a friendly piece other than the defender move onto `block_square`
/// and lift the check?
pub fn can_block_attack(
    game_state: &GameState,
    defender_square: Square,
    attacker_square: Square,
    block_square: Square,
) -> bool {
    let Some(defender) = game_state.get_piece(defender_square) else {
        return false;
    };

    game_state
        .pieces_of(defender.color)
        .into_iter()
        .filter(|&(origin, _)| origin != defender_square && origin != attacker_square)
        .any(|(origin, _)| {
            can_move_to(game_state, origin, block_square)
                && resolves_check(game_state, origin, block_square, defender.color)
        })
}

/// A capture of the attacker is a block on the attacker's own square.
#[inline]
fn can_capture_attacker(game_state: &GameState, defender_square: Square, attacker_square: Square) -> bool {
    can_block_attack(game_state, defender_square, attacker_square, attacker_square)
}

fn has_escape_square(game_state: &GameState, square: Square, color: Color, scan: EscapeScan) -> bool {
    possible_moves(game_state, square).into_iter().any(|destination| {
        let candidate = match scan {
            EscapeScan::AbsoluteDestinations => Some(destination),
            EscapeScan::LegacyOffsetDoubling => {
                square.offset(destination.file as i8, destination.rank as i8)
            }
        };
        candidate.is_some_and(|to| {
            can_move_to(game_state, square, to) && resolves_check(game_state, square, to, color)
        })
    })
}

fn resolves_check(game_state: &GameState, from: Square, to: Square, color: Color) -> bool {
    let mut scratch = game_state.clone();
    if scratch.apply_move(from, to, None).is_err() {
        return false;
    }
    !is_king_in_check(&scratch, color)
}
