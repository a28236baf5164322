//! Rejection reasons for requested actions.

use thiserror::Error;

/// Why a requested action was rejected.
///
/// Validation never mutates state, so every rejection leaves the game
/// exactly as it was. The variants are ordered roughly as the checks run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    /// Source and destination are the same square.
    #[error("source and destination are the same square")]
    NoOpMove,

    /// A coordinate lies outside the board.
    #[error("square is outside the board")]
    OffBoard,

    /// No active piece stands on the source square.
    #[error("no piece on the source square")]
    EmptySource,

    /// The piece belongs to the player who is not on turn.
    #[error("it is not that player's turn")]
    WrongTurn,

    /// The destination holds a piece of the mover's own color.
    #[error("cannot capture a piece of the same color")]
    FriendlyCapture,

    /// The piece cannot reach the destination by its movement pattern.
    #[error("the piece cannot reach that square")]
    GeometricallyImpossible,

    /// Another piece blocks a square the move must pass through.
    #[error("another piece blocks the path")]
    PathBlocked,

    /// The en passant window is closed or was never open.
    #[error("en passant capture is not available")]
    IllegalEnPassant,

    /// A castling requirement does not hold.
    #[error("castling is not available")]
    IllegalCastle,

    /// The move would leave the mover's own king attacked.
    #[error("the move would leave the king in check")]
    SelfCheck,

    /// The piece is not a pawn on its promotion row, or the chosen kind
    /// is not allowed.
    #[error("the piece cannot be promoted")]
    NotPromotable,

    /// The game's status does not accept this action.
    #[error("the game does not accept this action in its current state")]
    GameNotActive,
}
