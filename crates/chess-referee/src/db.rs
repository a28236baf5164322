//! SQLite storage for the referee.
//!
//! Three tables back a game: `games` carries the lifecycle status,
//! `pieces` holds one row per piece entity for the whole life of the
//! game, and `moves` is the append-only history. Captured and removed
//! pieces keep their rows; only `status` and the position columns
//! change.

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Thread-safe handle to the referee database.
pub type DbPool = Arc<Mutex<Connection>>;

/// Initialize the database with the referee schema.
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file (use `:memory:` for tests)
///
/// # Errors
///
/// Returns an error if the database cannot be opened or schema creation fails.
pub fn init_db<P: AsRef<Path>>(path: P) -> SqliteResult<DbPool> {
    let conn = Connection::open(path)?;

    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS games (
            id TEXT PRIMARY KEY,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS pieces (
            id TEXT PRIMARY KEY,
            game_id TEXT NOT NULL REFERENCES games(id),
            kind TEXT NOT NULL,
            color TEXT NOT NULL,
            status TEXT NOT NULL,
            row INTEGER,
            col INTEGER
        );

        CREATE TABLE IF NOT EXISTS moves (
            id TEXT PRIMARY KEY,
            game_id TEXT NOT NULL REFERENCES games(id),
            piece_id TEXT NOT NULL REFERENCES pieces(id),
            from_row INTEGER NOT NULL,
            from_col INTEGER NOT NULL,
            to_row INTEGER NOT NULL,
            to_col INTEGER NOT NULL,
            taken_piece_id TEXT REFERENCES pieces(id),
            kind TEXT NOT NULL,
            ply INTEGER NOT NULL,
            UNIQUE(game_id, ply)
        );

        CREATE INDEX IF NOT EXISTS idx_pieces_game ON pieces(game_id);
        CREATE INDEX IF NOT EXISTS idx_moves_game ON moves(game_id);
        ",
    )?;

    Ok(Arc::new(Mutex::new(conn)))
}
