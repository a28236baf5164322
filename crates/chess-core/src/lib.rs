//! Core types for the chess referee.
//!
//! This crate provides the fundamental types shared across the rule
//! engine and the referee service:
//! - [`Color`], [`Position`], and [`PieceKind`] for board vocabulary
//! - [`Piece`], [`Game`], and [`MoveRecord`] for persistent entities
//! - [`GameStatus`] for the game state machine
//! - [`RuleViolation`] for rejection reasons
//! - placement notation parsing

mod color;
mod game;
mod mov;
mod notation;
mod piece;
mod position;
mod status;
mod violation;

pub use color::Color;
pub use game::Game;
pub use mov::{MoveKind, MoveRecord};
pub use notation::{initial_pieces, parse_placement, NotationError, START_PLACEMENT};
pub use piece::{Piece, PieceKind, PieceStatus};
pub use position::Position;
pub use status::GameStatus;
pub use violation::RuleViolation;
