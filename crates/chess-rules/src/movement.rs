//! Piece movement geometry.
//!
//! Everything in this module is blind to occupancy: the functions
//! describe where a piece could go on an otherwise empty board, which
//! squares a move would have to cross, and the fixed squares of the two
//! castles. The validator combines these answers with the actual board.

use chess_core::{Color, MoveKind, PieceKind, Position};

const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One square per offset, clipped to the board.
fn step_targets(from: Position, steps: &[(i8, i8)]) -> Vec<Position> {
    steps
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}

/// Every square along each direction up to the board edge.
fn ray_targets(from: Position, directions: &[(i8, i8)]) -> Vec<Position> {
    let mut targets = Vec::new();
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            targets.push(next);
            current = next;
        }
    }
    targets
}

/// Returns the squares a piece could move to on an empty board.
///
/// For pawns this is the forward push, including the double advance from
/// the pawn's starting row, and excludes diagonal captures. A pawn on
/// its promotion row has no targets.
pub fn move_targets(kind: PieceKind, color: Color, from: Position) -> Vec<Position> {
    match kind {
        PieceKind::Pawn => {
            let mut targets = Vec::new();
            let dir = color.forward();
            if let Some(one) = from.offset(dir, 0) {
                targets.push(one);
                if from.row() == color.pawn_row() {
                    if let Some(two) = one.offset(dir, 0) {
                        targets.push(two);
                    }
                }
            }
            targets
        }
        PieceKind::Knight => step_targets(from, &KNIGHT_JUMPS),
        PieceKind::Bishop => ray_targets(from, &DIAGONALS),
        PieceKind::Rook => ray_targets(from, &ORTHOGONALS),
        PieceKind::Queen => {
            let mut targets = ray_targets(from, &ORTHOGONALS);
            targets.extend(ray_targets(from, &DIAGONALS));
            targets
        }
        PieceKind::King => step_targets(from, &KING_STEPS),
    }
}

/// Returns the squares a piece could capture on, ignoring occupancy.
///
/// Only pawns capture differently from how they move: one square
/// diagonally forward. For every other kind this equals
/// [`move_targets`].
pub fn capture_targets(kind: PieceKind, color: Color, from: Position) -> Vec<Position> {
    match kind {
        PieceKind::Pawn => {
            let dir = color.forward();
            step_targets(from, &[(dir, -1), (dir, 1)])
        }
        _ => move_targets(kind, color, from),
    }
}

/// Returns true if `to` is in the piece's move pattern from `from`.
pub fn can_move(kind: PieceKind, color: Color, from: Position, to: Position) -> bool {
    move_targets(kind, color, from).contains(&to)
}

/// Returns true if `to` is in the piece's capture pattern from `from`.
pub fn can_capture(kind: PieceKind, color: Color, from: Position, to: Position) -> bool {
    capture_targets(kind, color, from).contains(&to)
}

/// Returns the squares that must be empty for the move to pass.
///
/// For sliders these are the squares strictly between `from` and `to`;
/// for a pawn double advance, the skipped square. Knights and kings
/// never have blocking squares, and neither does any one-step move.
pub fn requires_empty(kind: PieceKind, color: Color, from: Position, to: Position) -> Vec<Position> {
    match kind {
        PieceKind::Knight | PieceKind::King => Vec::new(),
        PieceKind::Pawn => {
            if from.col() == to.col() && (from.row() as i8 - to.row() as i8).abs() == 2 {
                from.offset(color.forward(), 0)
                    .map(|skipped| vec![skipped])
                    .unwrap_or_default()
            } else {
                Vec::new()
            }
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => between(from, to),
    }
}

/// Squares strictly between two positions sharing a row, column, or
/// diagonal. Empty when the positions share no line.
fn between(from: Position, to: Position) -> Vec<Position> {
    let row_span = (to.row() as i8 - from.row() as i8).abs();
    let col_span = (to.col() as i8 - from.col() as i8).abs();
    let aligned = from.row() == to.row() || from.col() == to.col() || row_span == col_span;
    if !aligned {
        return Vec::new();
    }

    let dr = (to.row() as i8 - from.row() as i8).signum();
    let dc = (to.col() as i8 - from.col() as i8).signum();
    let mut squares = Vec::new();
    let mut current = from;
    loop {
        match current.offset(dr, dc) {
            Some(next) if next != to => {
                squares.push(next);
                current = next;
            }
            _ => break,
        }
    }
    squares
}

/// The fixed squares taking part in one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleSquares {
    /// The king's starting square.
    pub king_home: Position,
    /// Where the king lands; moving here from home requests the castle.
    pub king_target: Position,
    /// The rook's starting square.
    pub rook_home: Position,
    /// Where the rook lands. The king crosses this square on the way.
    pub rook_target: Position,
    /// Squares between king and rook that must be empty.
    pub between: &'static [Position],
}

const WHITE_KING_SIDE: CastleSquares = CastleSquares {
    king_home: Position::at(7, 4),
    king_target: Position::at(7, 6),
    rook_home: Position::at(7, 7),
    rook_target: Position::at(7, 5),
    between: &[Position::at(7, 5), Position::at(7, 6)],
};

const WHITE_QUEEN_SIDE: CastleSquares = CastleSquares {
    king_home: Position::at(7, 4),
    king_target: Position::at(7, 2),
    rook_home: Position::at(7, 0),
    rook_target: Position::at(7, 3),
    between: &[Position::at(7, 1), Position::at(7, 2), Position::at(7, 3)],
};

const BLACK_KING_SIDE: CastleSquares = CastleSquares {
    king_home: Position::at(0, 4),
    king_target: Position::at(0, 6),
    rook_home: Position::at(0, 7),
    rook_target: Position::at(0, 5),
    between: &[Position::at(0, 5), Position::at(0, 6)],
};

const BLACK_QUEEN_SIDE: CastleSquares = CastleSquares {
    king_home: Position::at(0, 4),
    king_target: Position::at(0, 2),
    rook_home: Position::at(0, 0),
    rook_target: Position::at(0, 3),
    between: &[Position::at(0, 1), Position::at(0, 2), Position::at(0, 3)],
};

/// Returns the king-side castle squares for `color`.
pub const fn king_side(color: Color) -> CastleSquares {
    match color {
        Color::White => WHITE_KING_SIDE,
        Color::Black => BLACK_KING_SIDE,
    }
}

/// Returns the queen-side castle squares for `color`.
pub const fn queen_side(color: Color) -> CastleSquares {
    match color {
        Color::White => WHITE_QUEEN_SIDE,
        Color::Black => BLACK_QUEEN_SIDE,
    }
}

/// Identifies the castle requested by a king move to `to`, if any.
pub fn castle_for_target(color: Color, to: Position) -> Option<(MoveKind, CastleSquares)> {
    let king_side = king_side(color);
    let queen_side = queen_side(color);
    if to == king_side.king_target {
        Some((MoveKind::KingSideCastle, king_side))
    } else if to == queen_side.king_target {
        Some((MoveKind::QueenSideCastle, queen_side))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rook_targets() {
        let targets = move_targets(PieceKind::Rook, Color::White, Position::at(4, 4));
        assert_eq!(targets.len(), 14);
        assert!(targets.contains(&Position::at(4, 0)));
        assert!(targets.contains(&Position::at(0, 4)));
        assert!(!targets.contains(&Position::at(3, 3)));
    }

    #[test]
    fn bishop_targets() {
        let center = move_targets(PieceKind::Bishop, Color::White, Position::at(4, 4));
        assert_eq!(center.len(), 13);
        let corner = move_targets(PieceKind::Bishop, Color::White, Position::at(0, 0));
        assert_eq!(corner.len(), 7);
    }

    #[test]
    fn queen_targets() {
        let targets = move_targets(PieceKind::Queen, Color::White, Position::at(4, 4));
        assert_eq!(targets.len(), 27);
    }

    #[test]
    fn knight_targets() {
        let center = move_targets(PieceKind::Knight, Color::White, Position::at(4, 4));
        assert_eq!(center.len(), 8);
        let corner = move_targets(PieceKind::Knight, Color::White, Position::at(0, 0));
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&Position::at(1, 2)));
        assert!(corner.contains(&Position::at(2, 1)));
    }

    #[test]
    fn king_targets() {
        let center = move_targets(PieceKind::King, Color::White, Position::at(4, 4));
        assert_eq!(center.len(), 8);
        let corner = move_targets(PieceKind::King, Color::White, Position::at(7, 7));
        assert_eq!(corner.len(), 3);
    }

    #[test]
    fn pawn_pushes() {
        let start = move_targets(PieceKind::Pawn, Color::White, Position::at(6, 0));
        assert_eq!(start, vec![Position::at(5, 0), Position::at(4, 0)]);

        let advanced = move_targets(PieceKind::Pawn, Color::White, Position::at(5, 0));
        assert_eq!(advanced, vec![Position::at(4, 0)]);

        let black = move_targets(PieceKind::Pawn, Color::Black, Position::at(1, 3));
        assert_eq!(black, vec![Position::at(2, 3), Position::at(3, 3)]);
    }

    #[test]
    fn pawn_on_promotion_row_has_no_targets() {
        assert!(move_targets(PieceKind::Pawn, Color::White, Position::at(0, 4)).is_empty());
        assert!(capture_targets(PieceKind::Pawn, Color::White, Position::at(0, 4)).is_empty());
    }

    #[test]
    fn pawn_captures_diagonally() {
        let targets = capture_targets(PieceKind::Pawn, Color::White, Position::at(6, 4));
        assert_eq!(targets, vec![Position::at(5, 3), Position::at(5, 5)]);

        let edge = capture_targets(PieceKind::Pawn, Color::Black, Position::at(1, 0));
        assert_eq!(edge, vec![Position::at(2, 1)]);

        assert!(!can_capture(
            PieceKind::Pawn,
            Color::White,
            Position::at(6, 4),
            Position::at(5, 4)
        ));
        assert!(!can_move(
            PieceKind::Pawn,
            Color::White,
            Position::at(6, 4),
            Position::at(5, 5)
        ));
    }

    #[test]
    fn rook_cannot_move_diagonally() {
        assert!(!can_move(
            PieceKind::Rook,
            Color::White,
            Position::at(7, 0),
            Position::at(5, 2)
        ));
    }

    #[test]
    fn blocking_squares() {
        let rook_line = requires_empty(
            PieceKind::Rook,
            Color::White,
            Position::at(7, 0),
            Position::at(7, 7),
        );
        assert_eq!(rook_line.len(), 6);
        assert!(rook_line.contains(&Position::at(7, 1)));
        assert!(!rook_line.contains(&Position::at(7, 7)));

        let adjacent = requires_empty(
            PieceKind::Bishop,
            Color::White,
            Position::at(4, 4),
            Position::at(3, 3),
        );
        assert!(adjacent.is_empty());

        let knight = requires_empty(
            PieceKind::Knight,
            Color::White,
            Position::at(7, 1),
            Position::at(5, 2),
        );
        assert!(knight.is_empty());

        let double = requires_empty(
            PieceKind::Pawn,
            Color::White,
            Position::at(6, 4),
            Position::at(4, 4),
        );
        assert_eq!(double, vec![Position::at(5, 4)]);

        let single = requires_empty(
            PieceKind::Pawn,
            Color::White,
            Position::at(6, 4),
            Position::at(5, 4),
        );
        assert!(single.is_empty());
    }

    #[test]
    fn castle_squares_white() {
        let ks = king_side(Color::White);
        assert_eq!(ks.king_home, Position::at(7, 4));
        assert_eq!(ks.king_target, Position::at(7, 6));
        assert_eq!(ks.rook_home, Position::at(7, 7));
        assert_eq!(ks.rook_target, Position::at(7, 5));

        let qs = queen_side(Color::White);
        assert_eq!(qs.king_target, Position::at(7, 2));
        assert_eq!(qs.rook_home, Position::at(7, 0));
        assert_eq!(qs.rook_target, Position::at(7, 3));
        assert_eq!(qs.between.len(), 3);
    }

    #[test]
    fn castle_for_target_identifies_wing() {
        let (kind, squares) = castle_for_target(Color::Black, Position::at(0, 6)).unwrap();
        assert_eq!(kind, MoveKind::KingSideCastle);
        assert_eq!(squares.rook_home, Position::at(0, 7));

        let (kind, _) = castle_for_target(Color::White, Position::at(7, 2)).unwrap();
        assert_eq!(kind, MoveKind::QueenSideCastle);

        assert!(castle_for_target(Color::White, Position::at(7, 5)).is_none());
        assert!(castle_for_target(Color::White, Position::at(0, 6)).is_none());
    }

    fn any_kind() -> impl Strategy<Value = PieceKind> {
        (0usize..PieceKind::ALL.len()).prop_map(|i| PieceKind::ALL[i])
    }

    fn any_color() -> impl Strategy<Value = Color> {
        prop_oneof![Just(Color::White), Just(Color::Black)]
    }

    fn any_position() -> impl Strategy<Value = Position> {
        (0u8..8, 0u8..8).prop_map(|(row, col)| Position::at(row, col))
    }

    proptest! {
        #[test]
        fn targets_exclude_origin(
            kind in any_kind(),
            color in any_color(),
            from in any_position(),
        ) {
            prop_assert!(!move_targets(kind, color, from).contains(&from));
            prop_assert!(!capture_targets(kind, color, from).contains(&from));
        }

        #[test]
        fn non_pawns_capture_where_they_move(
            kind in any_kind(),
            color in any_color(),
            from in any_position(),
        ) {
            prop_assume!(kind != PieceKind::Pawn);
            prop_assert_eq!(
                move_targets(kind, color, from),
                capture_targets(kind, color, from)
            );
        }

        #[test]
        fn pawn_double_advance_only_from_start(
            color in any_color(),
            from in any_position(),
        ) {
            let doubles = move_targets(PieceKind::Pawn, color, from)
                .into_iter()
                .filter(|to| (to.row() as i8 - from.row() as i8).abs() == 2)
                .count();
            let expected = usize::from(from.row() == color.pawn_row());
            prop_assert_eq!(doubles, expected);
        }

        #[test]
        fn knight_jumps_are_symmetric(
            color in any_color(),
            a in any_position(),
            b in any_position(),
        ) {
            prop_assert_eq!(
                move_targets(PieceKind::Knight, color, a).contains(&b),
                move_targets(PieceKind::Knight, color, b).contains(&a)
            );
        }

        #[test]
        fn blocking_squares_exclude_endpoints(
            kind in any_kind(),
            color in any_color(),
            from in any_position(),
            to in any_position(),
        ) {
            for square in requires_empty(kind, color, from, to) {
                prop_assert_ne!(square, from);
                prop_assert_ne!(square, to);
            }
        }
    }
}
