//! Move records.
//!
//! Every accepted move is appended to a game's history as a [`MoveRecord`].
//! The history is append-only; replaying it from ply 1 reproduces the
//! game, and the validator consults it for en passant and castling rights.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::position::Position;

/// Classification of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MoveKind {
    /// A plain move or capture.
    Standard = 0,
    /// A pawn capturing the pawn that just passed it.
    EnPassant = 1,
    /// The king castling toward the h-file rook.
    KingSideCastle = 2,
    /// The king castling toward the a-file rook.
    QueenSideCastle = 3,
}

impl MoveKind {
    /// Returns the lowercase name used in storage and wire formats.
    pub const fn as_str(self) -> &'static str {
        match self {
            MoveKind::Standard => "standard",
            MoveKind::EnPassant => "en_passant",
            MoveKind::KingSideCastle => "king_side_castle",
            MoveKind::QueenSideCastle => "queen_side_castle",
        }
    }
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MoveKind::Standard => "standard",
            MoveKind::EnPassant => "en passant",
            MoveKind::KingSideCastle => "king-side castle",
            MoveKind::QueenSideCastle => "queen-side castle",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for MoveKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(MoveKind::Standard),
            "en_passant" => Ok(MoveKind::EnPassant),
            "king_side_castle" => Ok(MoveKind::KingSideCastle),
            "queen_side_castle" => Ok(MoveKind::QueenSideCastle),
            _ => Err(()),
        }
    }
}

/// One accepted move in a game's history.
///
/// For a castle the record describes the king's part of the move; the
/// rook relocation is implied by the kind. `taken_piece_id` is set for
/// captures, including en passant where the captured pawn does not stand
/// on the destination square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: Uuid,
    pub game_id: Uuid,
    pub piece_id: Uuid,
    pub from: Position,
    pub to: Position,
    pub taken_piece_id: Option<Uuid>,
    pub kind: MoveKind,
    /// Position in the game's history, starting at 1.
    pub ply: u32,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.kind != MoveKind::Standard {
            write!(f, " ({})", self.kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: Position, to: Position, kind: MoveKind) -> MoveRecord {
        MoveRecord {
            id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            piece_id: Uuid::new_v4(),
            from,
            to,
            taken_piece_id: None,
            kind,
            ply: 1,
        }
    }

    #[test]
    fn display_includes_kind() {
        let plain = record(Position::at(6, 4), Position::at(4, 4), MoveKind::Standard);
        assert_eq!(format!("{}", plain), "e2e4");

        let castle = record(Position::at(7, 4), Position::at(7, 6), MoveKind::KingSideCastle);
        assert_eq!(format!("{}", castle), "e1g1 (king-side castle)");
    }

    #[test]
    fn text_round_trip() {
        for kind in [
            MoveKind::Standard,
            MoveKind::EnPassant,
            MoveKind::KingSideCastle,
            MoveKind::QueenSideCastle,
        ] {
            assert_eq!(kind.as_str().parse::<MoveKind>(), Ok(kind));
        }
        assert!("castle".parse::<MoveKind>().is_err());
    }
}
