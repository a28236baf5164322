//! Game entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::GameStatus;

/// A single game of chess.
///
/// The pieces and move history belonging to a game are stored separately
/// and reference it by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub status: GameStatus,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl Game {
    /// Creates a game with a fresh id in the given state.
    pub fn new(status: GameStatus, created_at: String) -> Self {
        Game {
            id: Uuid::new_v4(),
            status,
            created_at,
        }
    }
}
