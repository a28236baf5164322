//! Pure chess rule validation.
//!
//! This crate decides legality and nothing else: it holds no game
//! state, never touches storage, and answers every question from the
//! arguments it is given. The service crate feeds it a board view and
//! history facts and executes whatever it resolves.
//!
//! - [`BoardView`] - occupancy derived from a game's pieces
//! - [`classify`] - validates one requested move and names its effects
//! - [`is_attacked`] / [`is_in_check`] - attack and check detection
//! - [`evaluate_status`] - the status a finished move leaves behind
//! - movement geometry for every piece kind, including the castle tables
//!
//! # Example
//!
//! ```
//! use chess_core::{initial_pieces, GameStatus, MoveKind, Position};
//! use chess_rules::{classify, BoardView, HistoryFacts};
//! use uuid::Uuid;
//!
//! let board = BoardView::build(&initial_pieces(Uuid::new_v4()));
//! let opening = classify(
//!     &board,
//!     GameStatus::WhiteTurn,
//!     &HistoryFacts::empty(),
//!     Position::at(6, 4),
//!     Position::at(4, 4),
//! )
//! .unwrap();
//! assert_eq!(opening.kind, MoveKind::Standard);
//! assert!(opening.captured.is_none());
//! ```

mod board;
mod check;
pub mod movement;
mod outcome;
mod validate;

pub use board::BoardView;
pub use check::{is_attacked, is_in_check};
pub use outcome::{evaluate_status, has_legal_move, refresh_status};
pub use validate::{classify, HistoryFacts, RecentMove, ResolvedMove, RookRelocation};
