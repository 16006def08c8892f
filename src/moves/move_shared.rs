//! Helpers shared by the per-piece legality rules.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Board displacement from `origin` to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub d_file: i8,
    pub d_rank: i8,
}

impl Delta {
    #[inline]
    pub fn between(origin: Square, destination: Square) -> Self {
        Self {
            d_file: destination.file as i8 - origin.file as i8,
            d_rank: destination.rank as i8 - origin.rank as i8,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.d_file == 0 && self.d_rank == 0
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        !self.is_zero() && self.d_file.abs() == self.d_rank.abs()
    }

    #[inline]
    pub fn is_straight(self) -> bool {
        !self.is_zero() && (self.d_file == 0 || self.d_rank == 0)
    }

    /// Chebyshev distance.
    #[inline]
    pub fn king_distance(self) -> i8 {
        self.d_file.abs().max(self.d_rank.abs())
    }

    /// Per-axis sign of the displacement.
    #[inline]
    pub fn unit_step(self) -> (i8, i8) {
        (self.d_file.signum(), self.d_rank.signum())
    }
}

/// Checks common to every piece: the origin holds a piece, the destination
/// is not the origin, and the destination does not hold a piece of the
/// mover's own color. Returns the moving piece when they pass.
#[inline]
pub fn shared_preconditions(
    game_state: &GameState,
    origin: Square,
    destination: Square,
) -> Option<PieceRecord> {
    let mover = game_state.get_piece(origin)?;
    if origin == destination {
        return None;
    }
    match game_state.get_piece(destination) {
        Some(target) if target.color == mover.color => None,
        _ => Some(mover),
    }
}

/// Squares strictly between `origin` and `destination`, walking one step at
/// a time along the per-axis sign of the displacement. Empty when the two
/// squares are adjacent or not on a shared line.
pub fn squares_between(origin: Square, destination: Square) -> Vec<Square> {
    let delta = Delta::between(origin, destination);
    if !delta.is_diagonal() && !delta.is_straight() {
        return Vec::new();
    }

    let (step_file, step_rank) = delta.unit_step();
    let steps = delta.king_distance();
    (1..steps)
        .filter_map(|i| origin.offset(i * step_file, i * step_rank))
        .collect()
}

/// True when no square strictly between `origin` and `destination` is occupied.
#[inline]
pub fn path_is_clear(game_state: &GameState, origin: Square, destination: Square) -> bool {
    squares_between(origin, destination)
        .into_iter()
        .all(|square| !game_state.is_occupied(square))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_between_walks_lines_exclusively() {
        let a1 = Square::at(0, 0);
        assert_eq!(
            squares_between(a1, Square::at(3, 3)),
            vec![Square::at(1, 1), Square::at(2, 2)]
        );
        assert_eq!(
            squares_between(Square::at(4, 7), Square::at(4, 4)),
            vec![Square::at(4, 6), Square::at(4, 5)]
        );
        assert!(squares_between(a1, Square::at(1, 1)).is_empty());
        assert!(squares_between(a1, Square::at(1, 2)).is_empty());
    }

    #[test]
    fn own_color_destination_fails_preconditions() {
        let state = GameState::new_game();
        assert!(shared_preconditions(&state, Square::at(0, 0), Square::at(0, 1)).is_none());
        assert!(shared_preconditions(&state, Square::at(0, 0), Square::at(0, 0)).is_none());
        assert!(shared_preconditions(&state, Square::at(3, 3), Square::at(3, 4)).is_none());
        assert!(shared_preconditions(&state, Square::at(0, 1), Square::at(0, 6)).is_some());
    }
}
