//! Game repository.

use chess_core::{Game, GameStatus};
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult, Row};
use uuid::Uuid;

/// Insert a newly created game.
pub fn insert(conn: &Connection, game: &Game) -> SqliteResult<()> {
    conn.execute(
        "INSERT INTO games (id, status, created_at) VALUES (?1, ?2, ?3)",
        (game.id.to_string(), game.status.as_str(), &game.created_at),
    )?;
    Ok(())
}

/// Get a game by id. Returns `None` if it doesn't exist.
pub fn get(conn: &Connection, id: Uuid) -> SqliteResult<Option<Game>> {
    let mut stmt = conn.prepare("SELECT id, status, created_at FROM games WHERE id = ?1")?;
    stmt.query_row([id.to_string()], map_row).optional()
}

/// Update a game's lifecycle status.
pub fn update_status(conn: &Connection, id: Uuid, status: GameStatus) -> SqliteResult<()> {
    conn.execute(
        "UPDATE games SET status = ?1 WHERE id = ?2",
        (status.as_str(), id.to_string()),
    )?;
    Ok(())
}

fn map_row(row: &Row) -> rusqlite::Result<Game> {
    let id: String = row.get(0)?;
    let status: String = row.get(1)?;
    Ok(Game {
        id: id.parse().expect("stored game id is a uuid"),
        status: status.parse().expect("stored game status is known"),
        created_at: row.get(2)?,
    })
}
