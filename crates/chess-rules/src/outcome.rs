//! Game outcome evaluation.
//!
//! After every executed move the game's next status is derived from the
//! position. The scan reuses [`classify`] for each candidate move, so
//! checkmate and stalemate can never disagree with what the validator
//! would actually accept.

use chess_core::{Color, GameStatus, PieceKind, Position};

use crate::board::BoardView;
use crate::check::is_in_check;
use crate::movement;
use crate::validate::{classify, HistoryFacts};

/// Returns true if `color` has at least one legal move.
pub fn has_legal_move(board: &BoardView, history: &HistoryFacts, color: Color) -> bool {
    let probe = GameStatus::turn_of(color);
    board
        .entries()
        .filter(|(_, piece)| piece.color == color)
        .any(|(from, piece)| {
            candidate_targets(piece.kind, piece.color, from)
                .into_iter()
                .any(|to| classify(board, probe, history, from, to).is_ok())
        })
}

/// Every destination a piece could conceivably be sent to, before the
/// rest of the position is considered.
///
/// Capture targets differ from move targets only for pawns, and the
/// castle targets only matter for a king on its home square.
fn candidate_targets(kind: PieceKind, color: Color, from: Position) -> Vec<Position> {
    let mut targets = movement::move_targets(kind, color, from);
    if kind == PieceKind::Pawn {
        targets.extend(movement::capture_targets(kind, color, from));
    }
    if kind == PieceKind::King && from == movement::king_side(color).king_home {
        targets.push(movement::king_side(color).king_target);
        targets.push(movement::queen_side(color).king_target);
    }
    targets
}

/// Derives the game status after `mover` completed a move.
///
/// The opponent is now to move: with no legal reply the game ends in
/// checkmate or stalemate, otherwise play continues in a plain turn or
/// check state.
pub fn evaluate_status(board: &BoardView, history: &HistoryFacts, mover: Color) -> GameStatus {
    let opponent = mover.opposite();
    let in_check = is_in_check(board, opponent);
    if !has_legal_move(board, history, opponent) {
        if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    } else if in_check {
        GameStatus::check_of(opponent)
    } else {
        GameStatus::turn_of(opponent)
    }
}

/// Re-evaluates an active game's status without passing the turn.
///
/// Promotion changes the board between moves: the same player stays to
/// move, but their situation may have become check, checkmate, or
/// stalemate. Waiting and finished states pass through unchanged.
pub fn refresh_status(board: &BoardView, history: &HistoryFacts, current: GameStatus) -> GameStatus {
    match current.color_to_move() {
        Some(to_move) => evaluate_status(board, history, to_move.opposite()),
        None => current,
    }
}
