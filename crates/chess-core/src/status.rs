//! Game status state machine.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::violation::RuleViolation;

/// The lifecycle state of a game.
///
/// A game starts in `WaitingForPlayers` and moves are only accepted in
/// the four active states (`WhiteTurn`, `BlackTurn`, `WhiteCheck`,
/// `BlackCheck`). The terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GameStatus {
    /// No player has been seated yet.
    WaitingForPlayers = 0,
    /// Black is seated, the white seat is open.
    WaitingForWhite = 1,
    /// White is seated, the black seat is open.
    WaitingForBlack = 2,
    WhiteTurn = 3,
    BlackTurn = 4,
    /// White is to move and the white king is attacked.
    WhiteCheck = 5,
    /// Black is to move and the black king is attacked.
    BlackCheck = 6,
    /// The player to move is checkmated.
    Checkmate = 7,
    /// The player to move has no legal move but is not in check.
    Stalemate = 8,
    /// Black resigned.
    WhiteVictory = 9,
    /// White resigned.
    BlackVictory = 10,
}

impl GameStatus {
    /// Returns the color whose move it is, or `None` when the game is
    /// waiting for players or finished.
    #[inline]
    pub const fn color_to_move(self) -> Option<Color> {
        match self {
            GameStatus::WhiteTurn | GameStatus::WhiteCheck => Some(Color::White),
            GameStatus::BlackTurn | GameStatus::BlackCheck => Some(Color::Black),
            _ => None,
        }
    }

    /// Returns true for states no move or resignation can leave.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate
                | GameStatus::Stalemate
                | GameStatus::WhiteVictory
                | GameStatus::BlackVictory
        )
    }

    /// Returns the plain turn state for `color`.
    #[inline]
    pub const fn turn_of(color: Color) -> Self {
        match color {
            Color::White => GameStatus::WhiteTurn,
            Color::Black => GameStatus::BlackTurn,
        }
    }

    /// Returns the check state for `color`.
    #[inline]
    pub const fn check_of(color: Color) -> Self {
        match color {
            Color::White => GameStatus::WhiteCheck,
            Color::Black => GameStatus::BlackCheck,
        }
    }

    /// Returns the victory state for `color`.
    #[inline]
    pub const fn victory_of(color: Color) -> Self {
        match color {
            Color::White => GameStatus::WhiteVictory,
            Color::Black => GameStatus::BlackVictory,
        }
    }

    /// Returns the status after seating a player on the `color` seat.
    ///
    /// Play begins with White's turn once both seats are filled. Seating
    /// is rejected when the seat is already taken or the game has started.
    pub fn with_player_seated(self, color: Color) -> Result<Self, RuleViolation> {
        match (self, color) {
            (GameStatus::WaitingForPlayers, Color::White) => Ok(GameStatus::WaitingForBlack),
            (GameStatus::WaitingForPlayers, Color::Black) => Ok(GameStatus::WaitingForWhite),
            (GameStatus::WaitingForWhite, Color::White) => Ok(GameStatus::WhiteTurn),
            (GameStatus::WaitingForBlack, Color::Black) => Ok(GameStatus::WhiteTurn),
            _ => Err(RuleViolation::GameNotActive),
        }
    }

    /// Returns the lowercase name used in storage and wire formats.
    pub const fn as_str(self) -> &'static str {
        match self {
            GameStatus::WaitingForPlayers => "waiting_for_players",
            GameStatus::WaitingForWhite => "waiting_for_white",
            GameStatus::WaitingForBlack => "waiting_for_black",
            GameStatus::WhiteTurn => "white_turn",
            GameStatus::BlackTurn => "black_turn",
            GameStatus::WhiteCheck => "white_check",
            GameStatus::BlackCheck => "black_check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::WhiteVictory => "white_victory",
            GameStatus::BlackVictory => "black_victory",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::WaitingForPlayers => "waiting for players",
            GameStatus::WaitingForWhite => "waiting for white",
            GameStatus::WaitingForBlack => "waiting for black",
            GameStatus::WhiteTurn => "white to move",
            GameStatus::BlackTurn => "black to move",
            GameStatus::WhiteCheck => "white in check",
            GameStatus::BlackCheck => "black in check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::WhiteVictory => "white wins",
            GameStatus::BlackVictory => "black wins",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for GameStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting_for_players" => Ok(GameStatus::WaitingForPlayers),
            "waiting_for_white" => Ok(GameStatus::WaitingForWhite),
            "waiting_for_black" => Ok(GameStatus::WaitingForBlack),
            "white_turn" => Ok(GameStatus::WhiteTurn),
            "black_turn" => Ok(GameStatus::BlackTurn),
            "white_check" => Ok(GameStatus::WhiteCheck),
            "black_check" => Ok(GameStatus::BlackCheck),
            "checkmate" => Ok(GameStatus::Checkmate),
            "stalemate" => Ok(GameStatus::Stalemate),
            "white_victory" => Ok(GameStatus::WhiteVictory),
            "black_victory" => Ok(GameStatus::BlackVictory),
            _ => Err(()),
        }
    }
}
