//! Board placement notation.
//!
//! Positions are described with the board field of FEN: eight rows from
//! Black's back rank down to White's, with digits for runs of empty
//! squares (e.g. "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"). Parsing
//! produces fresh piece entities; rendering lives with the board view.

use thiserror::Error;
use uuid::Uuid;

use crate::piece::{Piece, PieceKind};
use crate::position::Position;

/// The standard starting placement.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Errors that can occur when parsing a placement string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid placement: expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("invalid placement: row {row} covers {squares} squares, expected 8")]
    RowWidth { row: usize, squares: u32 },

    #[error("invalid placement: unknown piece character '{0}'")]
    UnknownPiece(char),
}

/// Parses a placement string into active pieces for `game_id`.
///
/// Rows in the string are ordered from row 0 (Black's back rank) to
/// row 7. Each piece gets a fresh id.
///
/// # Errors
///
/// Returns a [`NotationError`] if the string does not describe exactly
/// 8 rows of 8 squares built from FEN piece characters and digits.
pub fn parse_placement(game_id: Uuid, placement: &str) -> Result<Vec<Piece>, NotationError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(NotationError::RowCount(rows.len()));
    }

    let mut pieces = Vec::new();
    for (row_idx, row_str) in rows.iter().enumerate() {
        let mut col: u32 = 0;
        for c in row_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip;
            } else {
                let (kind, color) =
                    PieceKind::from_fen_char(c).ok_or(NotationError::UnknownPiece(c))?;
                if col >= 8 {
                    return Err(NotationError::RowWidth {
                        row: row_idx + 1,
                        squares: col + 1,
                    });
                }
                let position = Position::at(row_idx as u8, col as u8);
                pieces.push(Piece::new_active(game_id, kind, color, position));
                col += 1;
            }
        }
        if col != 8 {
            return Err(NotationError::RowWidth {
                row: row_idx + 1,
                squares: col,
            });
        }
    }

    Ok(pieces)
}

/// Returns the 32 pieces of the standard starting position for `game_id`.
pub fn initial_pieces(game_id: Uuid) -> Vec<Piece> {
    parse_placement(game_id, START_PLACEMENT).expect("standard starting placement is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn starting_position() {
        let game_id = Uuid::new_v4();
        let pieces = initial_pieces(game_id);
        assert_eq!(pieces.len(), 32);
        assert!(pieces.iter().all(|p| p.game_id == game_id && p.is_active()));

        let whites = pieces.iter().filter(|p| p.color == Color::White).count();
        assert_eq!(whites, 16);

        let white_king = pieces
            .iter()
            .find(|p| p.kind == PieceKind::King && p.color == Color::White)
            .unwrap();
        assert_eq!(white_king.position, Some(Position::at(7, 4)));

        let black_king = pieces
            .iter()
            .find(|p| p.kind == PieceKind::King && p.color == Color::Black)
            .unwrap();
        assert_eq!(black_king.position, Some(Position::at(0, 4)));

        assert!(pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Pawn && p.color == Color::White)
            .all(|p| p.position.unwrap().row() == 6));
        assert!(pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Pawn && p.color == Color::Black)
            .all(|p| p.position.unwrap().row() == 1));
    }

    #[test]
    fn sparse_placement() {
        let pieces = parse_placement(Uuid::new_v4(), "k7/8/8/8/8/8/2Q5/7K").unwrap();
        assert_eq!(pieces.len(), 3);

        let queen = pieces.iter().find(|p| p.kind == PieceKind::Queen).unwrap();
        assert_eq!(queen.color, Color::White);
        assert_eq!(queen.position, Some(Position::at(6, 2)));
    }

    #[test]
    fn empty_board() {
        let pieces = parse_placement(Uuid::new_v4(), "8/8/8/8/8/8/8/8").unwrap();
        assert!(pieces.is_empty());
    }

    #[test]
    fn rejects_wrong_row_count() {
        assert_eq!(
            parse_placement(Uuid::new_v4(), "8/8/8"),
            Err(NotationError::RowCount(3))
        );
    }

    #[test]
    fn rejects_wrong_row_width() {
        assert_eq!(
            parse_placement(Uuid::new_v4(), "ppppppp/8/8/8/8/8/8/8"),
            Err(NotationError::RowWidth { row: 1, squares: 7 })
        );
        assert_eq!(
            parse_placement(Uuid::new_v4(), "9/8/8/8/8/8/8/8"),
            Err(NotationError::RowWidth { row: 1, squares: 9 })
        );
    }

    #[test]
    fn rejects_unknown_piece() {
        assert_eq!(
            parse_placement(Uuid::new_v4(), "x7/8/8/8/8/8/8/8"),
            Err(NotationError::UnknownPiece('x'))
        );
    }
}
