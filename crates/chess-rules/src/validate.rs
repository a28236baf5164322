//! Move validation.
//!
//! [`classify`] is a pure function over a board view, the game status,
//! and distilled history facts. It either names what the requested move
//! would do (its kind, the piece it captures, the rook it relocates) or
//! says why the move is rejected. Nothing in this module mutates game
//! state, so callers may probe any move they like.

use std::collections::HashSet;

use chess_core::{Color, GameStatus, MoveKind, Piece, PieceKind, Position, RuleViolation};
use uuid::Uuid;

use crate::board::BoardView;
use crate::check::{is_attacked, is_in_check};
use crate::movement;
use crate::movement::CastleSquares;

/// The most recent move of a game, as far as validation needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentMove {
    pub piece_id: Uuid,
    pub kind: PieceKind,
    pub color: Color,
    pub from: Position,
    pub to: Position,
}

impl RecentMove {
    /// Returns true if this was a pawn double advance, the only move
    /// that opens the en passant window.
    pub fn opens_en_passant(&self) -> bool {
        self.kind == PieceKind::Pawn
            && self.from.col() == self.to.col()
            && (self.from.row() as i8 - self.to.row() as i8).abs() == 2
    }
}

/// Everything validation needs to know about a game's history.
///
/// En passant looks at the last move only; castling needs to know which
/// pieces have ever moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFacts {
    /// The last move played, if any.
    pub last_move: Option<RecentMove>,
    /// Ids of every piece that has moved at least once.
    pub moved_pieces: HashSet<Uuid>,
}

impl HistoryFacts {
    /// Facts of a game with no moves yet.
    pub fn empty() -> Self {
        HistoryFacts::default()
    }

    /// Returns true if the piece has moved at least once.
    pub fn has_moved(&self, piece_id: Uuid) -> bool {
        self.moved_pieces.contains(&piece_id)
    }
}

/// The rook relocation that accompanies a castle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RookRelocation {
    /// The rook as it stands before the castle.
    pub piece: Piece,
    /// Where the rook lands.
    pub to: Position,
}

/// A move that passed validation, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMove {
    /// The moving piece as it stands before the move.
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    pub kind: MoveKind,
    /// The piece this move captures, as it stands before the move. For
    /// en passant it does not stand on `to`.
    pub captured: Option<Piece>,
    /// The rook relocation of a castle.
    pub rook: Option<RookRelocation>,
}

/// Validates a requested move and resolves what it would do.
///
/// The checks run in a fixed order, so a move that is wrong in several
/// ways always reports the same reason:
///
/// 1. the game must be in a state that accepts moves
/// 2. source and destination must differ
/// 3. an own piece must stand on the source square
/// 4. the destination must not hold an own piece
/// 5. the move must fit the piece's pattern, or be a well-formed en
///    passant capture or castle
/// 6. no piece may block the squares the move crosses
/// 7. the mover's own king must not be attacked afterwards
///
/// # Errors
///
/// Returns the [`RuleViolation`] describing the first failed check.
pub fn classify(
    board: &BoardView,
    status: GameStatus,
    history: &HistoryFacts,
    from: Position,
    to: Position,
) -> Result<ResolvedMove, RuleViolation> {
    let color = status.color_to_move().ok_or(RuleViolation::GameNotActive)?;
    if from == to {
        return Err(RuleViolation::NoOpMove);
    }
    let piece = board
        .piece_at(from)
        .ok_or(RuleViolation::EmptySource)?
        .clone();
    if piece.color != color {
        return Err(RuleViolation::WrongTurn);
    }

    let resolved = match board.piece_at(to) {
        Some(occupant) if occupant.color == piece.color => {
            return Err(RuleViolation::FriendlyCapture);
        }
        Some(occupant) => {
            if !movement::can_capture(piece.kind, piece.color, from, to) {
                return Err(RuleViolation::GeometricallyImpossible);
            }
            let captured = Some(occupant.clone());
            ResolvedMove {
                piece,
                from,
                to,
                kind: MoveKind::Standard,
                captured,
                rook: None,
            }
        }
        None => classify_to_empty(board, history, piece, from, to)?,
    };

    for square in movement::requires_empty(resolved.piece.kind, resolved.piece.color, from, to) {
        if !board.is_empty(square) {
            return Err(RuleViolation::PathBlocked);
        }
    }

    let after = board.apply(&resolved);
    if is_in_check(&after, color) {
        return Err(RuleViolation::SelfCheck);
    }

    Ok(resolved)
}

/// Classifies a move into an empty destination square: a quiet move, an
/// en passant capture, or a castle.
fn classify_to_empty(
    board: &BoardView,
    history: &HistoryFacts,
    piece: Piece,
    from: Position,
    to: Position,
) -> Result<ResolvedMove, RuleViolation> {
    // A pawn stepping diagonally into an empty square can only be an
    // en passant attempt.
    if piece.kind == PieceKind::Pawn && movement::can_capture(PieceKind::Pawn, piece.color, from, to)
    {
        let captured = Some(en_passant_victim(board, history, &piece, from, to)?);
        return Ok(ResolvedMove {
            piece,
            from,
            to,
            kind: MoveKind::EnPassant,
            captured,
            rook: None,
        });
    }

    // A king moving from its home square onto a castle target requests
    // the castle; such a move is never read as a plain king move.
    if piece.kind == PieceKind::King {
        if let Some((kind, squares)) = movement::castle_for_target(piece.color, to) {
            if from == squares.king_home {
                let rook = castle_rook(board, history, &piece, squares)?;
                return Ok(ResolvedMove {
                    piece,
                    from,
                    to,
                    kind,
                    captured: None,
                    rook: Some(RookRelocation {
                        piece: rook,
                        to: squares.rook_target,
                    }),
                });
            }
        }
    }

    if !movement::can_move(piece.kind, piece.color, from, to) {
        return Err(RuleViolation::GeometricallyImpossible);
    }
    Ok(ResolvedMove {
        piece,
        from,
        to,
        kind: MoveKind::Standard,
        captured: None,
        rook: None,
    })
}

/// Finds the pawn captured en passant, or says why there is none.
///
/// The window is a single ply wide: the last move of the game must have
/// been an enemy pawn double advance ending on the square the capturing
/// pawn passes, and that pawn must still stand there.
fn en_passant_victim(
    board: &BoardView,
    history: &HistoryFacts,
    pawn: &Piece,
    from: Position,
    to: Position,
) -> Result<Piece, RuleViolation> {
    let last = history
        .last_move
        .as_ref()
        .ok_or(RuleViolation::IllegalEnPassant)?;
    if last.color == pawn.color || !last.opens_en_passant() {
        return Err(RuleViolation::IllegalEnPassant);
    }
    let victim_square = Position::at(from.row(), to.col());
    if last.to != victim_square {
        return Err(RuleViolation::IllegalEnPassant);
    }
    let victim = board
        .piece_at(victim_square)
        .ok_or(RuleViolation::IllegalEnPassant)?;
    if victim.id != last.piece_id {
        return Err(RuleViolation::IllegalEnPassant);
    }
    Ok(victim.clone())
}

/// Checks every castle requirement and returns the involved rook.
///
/// The king and the rook must never have moved, the squares between
/// them must be empty, the king must not currently be in check, and the
/// square the king crosses must not be attacked. Whether the king's
/// landing square is attacked is left to the common self-check probe.
fn castle_rook(
    board: &BoardView,
    history: &HistoryFacts,
    king: &Piece,
    squares: CastleSquares,
) -> Result<Piece, RuleViolation> {
    if history.has_moved(king.id) {
        return Err(RuleViolation::IllegalCastle);
    }
    let rook = board
        .piece_at(squares.rook_home)
        .filter(|p| p.kind == PieceKind::Rook && p.color == king.color)
        .ok_or(RuleViolation::IllegalCastle)?;
    if history.has_moved(rook.id) {
        return Err(RuleViolation::IllegalCastle);
    }
    if squares.between.iter().any(|sq| !board.is_empty(*sq)) {
        return Err(RuleViolation::IllegalCastle);
    }
    if is_in_check(board, king.color) {
        return Err(RuleViolation::IllegalCastle);
    }
    if is_attacked(board, squares.rook_target, king.color.opposite()) {
        return Err(RuleViolation::IllegalCastle);
    }
    Ok(rook.clone())
}
