//! Check detection.

use chess_core::{Color, Position};

use crate::board::BoardView;
use crate::movement;

/// Returns true if any piece of `by` attacks `target`.
///
/// A square is attacked when some piece's capture pattern reaches it and
/// no piece blocks the squares in between. Whatever stands on the target
/// square itself does not matter.
pub fn is_attacked(board: &BoardView, target: Position, by: Color) -> bool {
    board
        .entries()
        .filter(|(_, piece)| piece.color == by)
        .any(|(from, piece)| {
            movement::can_capture(piece.kind, piece.color, from, target)
                && movement::requires_empty(piece.kind, piece.color, from, target)
                    .iter()
                    .all(|square| board.is_empty(*square))
        })
}

/// Returns true if the king of `color` is attacked.
pub fn is_in_check(board: &BoardView, color: Color) -> bool {
    is_attacked(board, board.king_square(color), color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::parse_placement;
    use uuid::Uuid;

    fn board(placement: &str) -> BoardView {
        BoardView::build(&parse_placement(Uuid::new_v4(), placement).unwrap())
    }

    #[test]
    fn rook_attacks_along_open_line() {
        let board = board("k7/8/8/8/R6K/8/8/8");
        assert!(is_attacked(&board, Position::at(4, 5), Color::White));
        assert!(is_attacked(&board, Position::at(0, 0), Color::White));
        assert!(!is_attacked(&board, Position::at(3, 1), Color::White));
    }

    #[test]
    fn blocked_line_does_not_attack() {
        let board = board("k7/8/8/8/R2p3K/8/8/8");
        assert!(is_attacked(&board, Position::at(4, 3), Color::White));
        assert!(!is_attacked(&board, Position::at(4, 4), Color::White));
    }

    #[test]
    fn knight_jumps_over_blockers() {
        let board = board("k7/8/8/3ppp2/3pNp2/3ppp1K/8/8");
        assert!(is_attacked(&board, Position::at(2, 3), Color::White));
        assert!(is_attacked(&board, Position::at(6, 5), Color::White));
    }

    #[test]
    fn pawn_attacks_only_diagonally_forward() {
        let board = board("k7/8/8/8/4P3/8/8/7K");
        assert!(is_attacked(&board, Position::at(3, 3), Color::White));
        assert!(is_attacked(&board, Position::at(3, 5), Color::White));
        assert!(!is_attacked(&board, Position::at(3, 4), Color::White));
        assert!(!is_attacked(&board, Position::at(5, 3), Color::White));
    }

    #[test]
    fn check_from_queen() {
        let board = board("k7/8/8/8/8/8/8/Q6K");
        assert!(is_in_check(&board, Color::Black));
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn no_check_when_line_is_blocked() {
        let board = board("k7/8/8/8/n7/8/8/Q6K");
        assert!(!is_in_check(&board, Color::Black));
    }
}
