//! Pawn movement: single push, double push from the unmoved state, diagonal
//! capture, and en-passant capture into the current target square.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_shared::{shared_preconditions, Delta};

pub fn pawn_can_move_to(game_state: &GameState, origin: Square, destination: Square) -> bool {
    let Some(pawn) = shared_preconditions(game_state, origin, destination) else {
        return false;
    };

    let forward = pawn.color.forward();
    let delta = Delta::between(origin, destination);
    let target = game_state.get_piece(destination);

    if delta.d_file == 0 && delta.d_rank == forward {
        return target.is_none();
    }

    if delta.d_file == 0 && delta.d_rank == 2 * forward && !pawn.has_moved {
        let Some(intermediate) = origin.offset(0, forward) else {
            return false;
        };
        return target.is_none() && !game_state.is_occupied(intermediate);
    }

    if delta.d_file.abs() == 1 && delta.d_rank == forward {
        return match target {
            Some(enemy) => enemy.color != pawn.color,
            None => game_state.en_passant_target == Some(destination),
        };
    }

    false
}
