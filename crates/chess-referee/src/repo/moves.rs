//! Move history repository.

use std::collections::HashSet;

use chess_core::{MoveRecord, Position};
use chess_rules::RecentMove;
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult, Row};
use uuid::Uuid;

/// Append a move to a game's history.
pub fn insert(conn: &Connection, record: &MoveRecord) -> SqliteResult<()> {
    conn.execute(
        "INSERT INTO moves (id, game_id, piece_id, from_row, from_col, to_row, to_col, taken_piece_id, kind, ply)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        (
            record.id.to_string(),
            record.game_id.to_string(),
            record.piece_id.to_string(),
            record.from.row(),
            record.from.col(),
            record.to.row(),
            record.to.col(),
            record.taken_piece_id.map(|id| id.to_string()),
            record.kind.as_str(),
            record.ply,
        ),
    )?;
    Ok(())
}

/// Full history of a game, ordered by ply.
pub fn history(conn: &Connection, game_id: Uuid) -> SqliteResult<Vec<MoveRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, game_id, piece_id, from_row, from_col, to_row, to_col, taken_piece_id, kind, ply
         FROM moves WHERE game_id = ?1 ORDER BY ply",
    )?;
    let records = stmt
        .query_map([game_id.to_string()], map_row)?
        .filter_map(|r| r.ok())
        .collect();
    Ok(records)
}

/// The ply number the next move of a game will get, starting at 1.
pub fn next_ply(conn: &Connection, game_id: Uuid) -> SqliteResult<u32> {
    let mut stmt = conn.prepare("SELECT COALESCE(MAX(ply), 0) FROM moves WHERE game_id = ?1")?;
    let last: u32 = stmt.query_row([game_id.to_string()], |row| row.get(0))?;
    Ok(last + 1)
}

/// The most recent move of a game joined with its piece, shaped the way
/// validation consumes it. Returns `None` before the first move.
///
/// The join reads the piece's current kind. That is still the kind that
/// moved: promotion retires the pawn's row instead of rewriting it.
pub fn last_move(conn: &Connection, game_id: Uuid) -> SqliteResult<Option<RecentMove>> {
    let mut stmt = conn.prepare(
        "SELECT m.piece_id, p.kind, p.color, m.from_row, m.from_col, m.to_row, m.to_col
         FROM moves m JOIN pieces p ON p.id = m.piece_id
         WHERE m.game_id = ?1
         ORDER BY m.ply DESC LIMIT 1",
    )?;
    stmt.query_row([game_id.to_string()], |row| {
        let piece_id: String = row.get(0)?;
        let kind: String = row.get(1)?;
        let color: String = row.get(2)?;
        Ok(RecentMove {
            piece_id: piece_id.parse().expect("stored piece id is a uuid"),
            kind: kind.parse().expect("stored piece kind is known"),
            color: color.parse().expect("stored color is known"),
            from: stored_position(row.get(3)?, row.get(4)?),
            to: stored_position(row.get(5)?, row.get(6)?),
        })
    })
    .optional()
}

/// Ids of every piece that has moved in a game. Feeds castling rights.
pub fn moved_piece_ids(conn: &Connection, game_id: Uuid) -> SqliteResult<HashSet<Uuid>> {
    let mut stmt = conn.prepare("SELECT DISTINCT piece_id FROM moves WHERE game_id = ?1")?;
    let ids = stmt
        .query_map([game_id.to_string()], |row| row.get::<_, String>(0))?
        .filter_map(|r| r.ok())
        .map(|id| id.parse().expect("stored piece id is a uuid"))
        .collect();
    Ok(ids)
}

fn stored_position(row: u8, col: u8) -> Position {
    Position::new(row, col).expect("stored position is on the board")
}

fn map_row(row: &Row) -> rusqlite::Result<MoveRecord> {
    let id: String = row.get(0)?;
    let game_id: String = row.get(1)?;
    let piece_id: String = row.get(2)?;
    let taken_piece_id: Option<String> = row.get(7)?;
    let kind: String = row.get(8)?;

    Ok(MoveRecord {
        id: id.parse().expect("stored move id is a uuid"),
        game_id: game_id.parse().expect("stored game id is a uuid"),
        piece_id: piece_id.parse().expect("stored piece id is a uuid"),
        from: stored_position(row.get(3)?, row.get(4)?),
        to: stored_position(row.get(5)?, row.get(6)?),
        taken_piece_id: taken_piece_id.map(|id| id.parse().expect("stored piece id is a uuid")),
        kind: kind.parse().expect("stored move kind is known"),
        ply: row.get(9)?,
    })
}
