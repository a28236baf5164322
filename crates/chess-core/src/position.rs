//! Board position representation.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A square on the board, addressed by row and column.
///
/// Rows run from 0 (Black's back rank, rank 8) to 7 (White's back rank,
/// rank 1). Columns run from 0 (the a-file, queen side) to 7 (the h-file,
/// king side). A `Position` is always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, returning `None` if either coordinate is
    /// outside `[0, 7]`.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Creates a position from coordinates known to be on the board.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `[0, 7]`.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "position out of bounds");
        Position { row, col }
    }

    /// Returns the row (0 = Black's back rank, 7 = White's back rank).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0 = a-file, 7 = h-file).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the position shifted by the given deltas, or `None` if the
    /// result would leave the board.
    #[inline]
    pub fn offset(self, row_delta: i8, col_delta: i8) -> Option<Self> {
        let row = self.row as i8 + row_delta;
        let col = self.col as i8 + col_delta;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Returns true if this position lies on the promotion row for `color`.
    #[inline]
    pub const fn is_promotion_row(self, color: Color) -> bool {
        self.row == color.promotion_row()
    }

    /// Parses a position from algebraic notation (e.g. "e4").
    ///
    /// Files a-h map to columns 0-7 and ranks 1-8 map to rows 7-0.
    /// Returns `None` for anything that is not a square on the board.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let row = 7 - (rank as u8 - b'1');
        Some(Position { row, col })
    }

    /// Returns the position in algebraic notation (e.g. "e4").
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'1' + (7 - self.row)) as char;
        format!("{}{}", file, rank)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_rejects_off_board() {
        assert!(Position::new(0, 0).is_some());
        assert!(Position::new(7, 7).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        let pos = Position::at(4, 4);
        assert_eq!(pos.offset(-1, 1), Some(Position::at(3, 5)));
        assert_eq!(pos.offset(0, 0), Some(pos));
        assert_eq!(Position::at(0, 0).offset(-1, 0), None);
        assert_eq!(Position::at(7, 7).offset(0, 1), None);
    }

    #[test]
    fn algebraic_round_trip() {
        let e4 = Position::from_algebraic("e4").unwrap();
        assert_eq!(e4, Position::at(4, 4));
        assert_eq!(e4.to_algebraic(), "e4");

        let a8 = Position::from_algebraic("a8").unwrap();
        assert_eq!(a8, Position::at(0, 0));

        let h1 = Position::from_algebraic("h1").unwrap();
        assert_eq!(h1, Position::at(7, 7));
    }

    #[test]
    fn algebraic_rejects_invalid() {
        assert!(Position::from_algebraic("i1").is_none());
        assert!(Position::from_algebraic("a9").is_none());
        assert!(Position::from_algebraic("e").is_none());
        assert!(Position::from_algebraic("e44").is_none());
        assert!(Position::from_algebraic("").is_none());
    }

    #[test]
    fn promotion_rows() {
        assert!(Position::at(0, 3).is_promotion_row(Color::White));
        assert!(!Position::at(7, 3).is_promotion_row(Color::White));
        assert!(Position::at(7, 3).is_promotion_row(Color::Black));
    }

    #[test]
    fn display_matches_algebraic() {
        assert_eq!(format!("{}", Position::at(6, 0)), "a2");
        assert_eq!(format!("{}", Position::at(0, 7)), "h8");
    }

    #[test]
    #[should_panic(expected = "position out of bounds")]
    fn at_panics_off_board() {
        let _ = Position::at(8, 0);
    }

    fn any_position() -> impl Strategy<Value = Position> {
        (0u8..8, 0u8..8).prop_map(|(row, col)| Position::at(row, col))
    }

    proptest! {
        #[test]
        fn algebraic_names_every_square(square in any_position()) {
            prop_assert_eq!(
                Position::from_algebraic(&square.to_algebraic()),
                Some(square)
            );
        }

        #[test]
        fn offset_reverses(square in any_position(), dr in -7i8..=7, dc in -7i8..=7) {
            if let Some(moved) = square.offset(dr, dc) {
                prop_assert_eq!(moved.offset(-dr, -dc), Some(square));
            }
        }
    }
}
