//! Piece repository.
//!
//! Rows are never deleted. Capture and promotion change `status` and
//! clear the position columns; the entity and its id survive for the
//! move history to reference.

use chess_core::{Piece, Position};
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult, Row};
use uuid::Uuid;

/// Insert one piece.
pub fn insert(conn: &Connection, piece: &Piece) -> SqliteResult<()> {
    conn.execute(
        "INSERT INTO pieces (id, game_id, kind, color, status, row, col)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            piece.id.to_string(),
            piece.game_id.to_string(),
            piece.kind.as_str(),
            piece.color.as_str(),
            piece.status.as_str(),
            piece.position.map(|p| p.row()),
            piece.position.map(|p| p.col()),
        ),
    )?;
    Ok(())
}

/// Insert a whole set of pieces, e.g. a starting placement.
pub fn insert_all(conn: &Connection, pieces: &[Piece]) -> SqliteResult<()> {
    for piece in pieces {
        insert(conn, piece)?;
    }
    Ok(())
}

/// Get a piece by id. Returns `None` if it doesn't exist.
pub fn get(conn: &Connection, id: Uuid) -> SqliteResult<Option<Piece>> {
    let mut stmt = conn.prepare(
        "SELECT id, game_id, kind, color, status, row, col FROM pieces WHERE id = ?1",
    )?;
    stmt.query_row([id.to_string()], map_row).optional()
}

/// All active pieces of a game, the material a board view is built from.
pub fn active_for_game(conn: &Connection, game_id: Uuid) -> SqliteResult<Vec<Piece>> {
    let mut stmt = conn.prepare(
        "SELECT id, game_id, kind, color, status, row, col
         FROM pieces WHERE game_id = ?1 AND status = 'active'",
    )?;
    let pieces = stmt
        .query_map([game_id.to_string()], map_row)?
        .filter_map(|r| r.ok())
        .collect();
    Ok(pieces)
}

/// Persist a piece's current kind, status, and position.
pub fn update(conn: &Connection, piece: &Piece) -> SqliteResult<()> {
    conn.execute(
        "UPDATE pieces SET kind = ?1, status = ?2, row = ?3, col = ?4 WHERE id = ?5",
        (
            piece.kind.as_str(),
            piece.status.as_str(),
            piece.position.map(|p| p.row()),
            piece.position.map(|p| p.col()),
            piece.id.to_string(),
        ),
    )?;
    Ok(())
}

fn map_row(row: &Row) -> rusqlite::Result<Piece> {
    let id: String = row.get(0)?;
    let game_id: String = row.get(1)?;
    let kind: String = row.get(2)?;
    let color: String = row.get(3)?;
    let status: String = row.get(4)?;
    let row_index: Option<u8> = row.get(5)?;
    let col_index: Option<u8> = row.get(6)?;

    let position = match (row_index, col_index) {
        (Some(r), Some(c)) => Some(Position::new(r, c).expect("stored position is on the board")),
        _ => None,
    };

    Ok(Piece {
        id: id.parse().expect("stored piece id is a uuid"),
        game_id: game_id.parse().expect("stored game id is a uuid"),
        kind: kind.parse().expect("stored piece kind is known"),
        color: color.parse().expect("stored color is known"),
        status: status.parse().expect("stored piece status is known"),
        position,
    })
}
