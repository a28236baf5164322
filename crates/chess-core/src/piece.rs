//! Chess piece representation.
//!
//! Pieces are persistent entities: capture and promotion never delete a
//! piece, they only change its status. A piece occupies a square exactly
//! while its status is [`PieceStatus::Active`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Color;
use crate::position::Position;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the FEN character for this kind with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece kind and color.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }

    /// Returns true if a pawn may promote to this kind.
    ///
    /// Promotion to a pawn or a king is never allowed.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Returns the lowercase name used in storage and wire formats.
    pub const fn as_str(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for PieceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pawn" => Ok(PieceKind::Pawn),
            "knight" => Ok(PieceKind::Knight),
            "bishop" => Ok(PieceKind::Bishop),
            "rook" => Ok(PieceKind::Rook),
            "queen" => Ok(PieceKind::Queen),
            "king" => Ok(PieceKind::King),
            _ => Err(()),
        }
    }
}

/// Lifecycle state of a piece entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PieceStatus {
    /// On the board, occupying a square.
    Active = 0,
    /// Captured by the opponent.
    Taken = 1,
    /// Left the board without being captured, e.g. a pawn replaced by
    /// its promotion piece.
    Removed = 2,
}

impl PieceStatus {
    /// Returns the lowercase name used in storage and wire formats.
    pub const fn as_str(self) -> &'static str {
        match self {
            PieceStatus::Active => "active",
            PieceStatus::Taken => "taken",
            PieceStatus::Removed => "removed",
        }
    }
}

impl std::str::FromStr for PieceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PieceStatus::Active),
            "taken" => Ok(PieceStatus::Taken),
            "removed" => Ok(PieceStatus::Removed),
            _ => Err(()),
        }
    }
}

/// A piece belonging to a game.
///
/// `position` is `Some` exactly while `status` is `Active`. The methods
/// below keep that pairing; code that mutates the fields directly is
/// responsible for preserving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: Uuid,
    pub game_id: Uuid,
    pub kind: PieceKind,
    pub color: Color,
    pub status: PieceStatus,
    pub position: Option<Position>,
}

impl Piece {
    /// Creates a new active piece on the given square with a fresh id.
    pub fn new_active(game_id: Uuid, kind: PieceKind, color: Color, position: Position) -> Self {
        Piece {
            id: Uuid::new_v4(),
            game_id,
            kind,
            color,
            status: PieceStatus::Active,
            position: Some(position),
        }
    }

    /// Returns true if the piece is on the board.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == PieceStatus::Active
    }

    /// Moves the piece to a new square.
    pub fn move_to(&mut self, position: Position) {
        self.position = Some(position);
    }

    /// Marks the piece as captured and takes it off the board.
    pub fn mark_taken(&mut self) {
        self.status = PieceStatus::Taken;
        self.position = None;
    }

    /// Marks the piece as removed and takes it off the board.
    pub fn mark_removed(&mut self) {
        self.status = PieceStatus::Removed;
        self.position = None;
    }
}
