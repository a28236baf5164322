//! Turn-based chess referee service.
//!
//! The referee owns persistent games in SQLite and guards them behind
//! the rules from `chess-rules`. Clients create games, seat players,
//! and submit moves; the referee validates each request, executes the
//! accepted ones atomically, tracks the game lifecycle through check,
//! checkmate, stalemate, and resignation, and broadcasts events to
//! subscribers.

pub mod config;
pub mod db;
pub mod events;
pub mod referee;
pub mod repo;

pub use events::{EventReceiver, EventSender, GameEvent};
pub use referee::{Referee, RefereeError};
