//! Board occupancy view.

use std::collections::HashMap;

use chess_core::{Color, Piece, PieceKind, Position};

use crate::validate::ResolvedMove;

/// Read-only occupancy derived from a game's pieces.
///
/// Building a view checks the stored-state invariants: every active
/// piece stands on a square, inactive pieces stand on none, and no two
/// pieces share a square. A violated invariant means the game state is
/// corrupted, so the constructor panics rather than guessing.
#[derive(Debug, Clone)]
pub struct BoardView {
    squares: HashMap<Position, Piece>,
}

impl BoardView {
    /// Builds a view from a game's pieces. Inactive pieces are skipped.
    ///
    /// # Panics
    ///
    /// Panics if an active piece has no position, an inactive piece has
    /// one, or two active pieces occupy the same square.
    pub fn build(pieces: &[Piece]) -> Self {
        let mut squares = HashMap::new();
        for piece in pieces {
            match (piece.is_active(), piece.position) {
                (true, Some(position)) => {
                    if let Some(other) = squares.insert(position, piece.clone()) {
                        panic!(
                            "pieces {} and {} both occupy {}",
                            other.id, piece.id, position
                        );
                    }
                }
                (true, None) => panic!("active piece {} has no position", piece.id),
                (false, Some(_)) => panic!(
                    "{} piece {} still occupies a square",
                    piece.status.as_str(),
                    piece.id
                ),
                (false, None) => {}
            }
        }
        BoardView { squares }
    }

    /// Returns the piece on `position`, if any.
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.squares.get(&position)
    }

    /// Returns true if no piece stands on `position`.
    pub fn is_empty(&self, position: Position) -> bool {
        !self.squares.contains_key(&position)
    }

    /// Iterates over the occupied squares and the pieces on them.
    pub fn entries(&self) -> impl Iterator<Item = (Position, &Piece)> {
        self.squares.iter().map(|(position, piece)| (*position, piece))
    }

    /// Returns the square of the active king of `color`.
    ///
    /// # Panics
    ///
    /// Panics unless the board holds exactly one king of that color.
    pub fn king_square(&self, color: Color) -> Position {
        let mut kings = self
            .entries()
            .filter(|(_, piece)| piece.kind == PieceKind::King && piece.color == color);
        let (position, _) = kings
            .next()
            .unwrap_or_else(|| panic!("no active {} king on the board", color));
        if kings.next().is_some() {
            panic!("multiple active {} kings on the board", color);
        }
        position
    }

    /// Returns the board as a placement string (the FEN board field).
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for row in 0..8 {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0u32;
            for col in 0..8 {
                match self.piece_at(Position::at(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from_digit(empty, 10).expect("at most 8 empty squares"));
                            empty = 0;
                        }
                        out.push(piece.kind.to_fen_char(piece.color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from_digit(empty, 10).expect("at most 8 empty squares"));
            }
        }
        out
    }

    /// Returns a new view with `resolved` applied.
    ///
    /// This is how the validator probes a move for self-check before
    /// anything is committed; the underlying pieces are untouched.
    pub fn apply(&self, resolved: &ResolvedMove) -> BoardView {
        let mut squares = self.squares.clone();
        if let Some(captured) = &resolved.captured {
            let square = captured.position.expect("captured piece stands on a square");
            squares.remove(&square);
        }
        let mut mover = squares
            .remove(&resolved.from)
            .expect("resolved move starts on an occupied square");
        mover.move_to(resolved.to);
        squares.insert(resolved.to, mover);
        if let Some(relocation) = &resolved.rook {
            let rook_square = relocation
                .piece
                .position
                .expect("castling rook stands on a square");
            let mut rook = squares
                .remove(&rook_square)
                .expect("castling rook is on the board");
            rook.move_to(relocation.to);
            squares.insert(relocation.to, rook);
        }
        BoardView { squares }
    }
}

impl std::fmt::Display for BoardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            write!(f, "{}", 8 - row)?;
            for col in 0..8 {
                let c = self
                    .piece_at(Position::at(row, col))
                    .map(|piece| piece.kind.to_fen_char(piece.color))
                    .unwrap_or('.');
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
