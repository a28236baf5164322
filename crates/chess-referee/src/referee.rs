//! The referee service.
//!
//! Orchestrates storage, rule validation, and notifications. Every
//! mutating operation runs inside one transaction on the shared
//! connection: validation reads a consistent snapshot, and a rejected
//! request leaves no trace in the database. Events go out only after
//! the transaction commits.

use chess_core::{
    initial_pieces, parse_placement, Color, Game, GameStatus, MoveRecord, NotationError, Piece,
    PieceKind, Position, RuleViolation,
};
use chess_rules::{classify, evaluate_status, refresh_status, BoardView, HistoryFacts, ResolvedMove};
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::DbPool;
use crate::events::{self, EventReceiver, EventSender, GameEvent};
use crate::repo;

/// Errors returned by referee operations.
#[derive(Debug, Error)]
pub enum RefereeError {
    /// The request was well-formed but against the rules of the game.
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("game {0} not found")]
    GameNotFound(Uuid),

    #[error("piece {0} not found")]
    PieceNotFound(Uuid),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// The referee: owns the database handle and the event channel.
pub struct Referee {
    db: DbPool,
    events: EventSender,
}

impl Referee {
    /// Create a referee over an initialized database.
    pub fn new(db: DbPool, event_capacity: usize) -> Self {
        Referee {
            db,
            events: events::channel(event_capacity),
        }
    }

    /// Subscribe to game events.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Create a game with the standard starting position, waiting for
    /// both players.
    pub fn create_game(&self) -> Result<Game, RefereeError> {
        let mut conn = self.db.lock().unwrap();
        let tx = conn.transaction()?;

        let game = Game::new(
            GameStatus::WaitingForPlayers,
            chrono::Utc::now().to_rfc3339(),
        );
        repo::games::insert(&tx, &game)?;
        repo::pieces::insert_all(&tx, &initial_pieces(game.id))?;
        tx.commit()?;

        info!(game_id = %game.id, "game created");
        self.emit(GameEvent::GameCreated { game_id: game.id });
        Ok(game)
    }

    /// Create a game from an arbitrary placement in the given state.
    ///
    /// When the state says someone is to move, the status is first
    /// re-evaluated against the position, so a placement with no legal
    /// reply is recorded as checkmate or stalemate right away.
    ///
    /// # Errors
    ///
    /// Returns [`RefereeError::Notation`] if the placement does not
    /// describe a board.
    pub fn create_game_with(
        &self,
        placement: &str,
        status: GameStatus,
    ) -> Result<Game, RefereeError> {
        let mut conn = self.db.lock().unwrap();
        let tx = conn.transaction()?;

        let mut game = Game::new(status, chrono::Utc::now().to_rfc3339());
        let pieces = parse_placement(game.id, placement)?;
        if game.status.color_to_move().is_some() {
            let board = BoardView::build(&pieces);
            game.status = refresh_status(&board, &HistoryFacts::empty(), game.status);
        }
        repo::games::insert(&tx, &game)?;
        repo::pieces::insert_all(&tx, &pieces)?;
        tx.commit()?;

        info!(game_id = %game.id, status = %game.status, "game created from placement");
        self.emit(GameEvent::GameCreated { game_id: game.id });
        Ok(game)
    }

    /// Seat a player on a color.
    ///
    /// The game becomes active once both seats are filled; seating
    /// order does not matter.
    pub fn seat_player(&self, game_id: Uuid, color: Color) -> Result<Game, RefereeError> {
        let mut conn = self.db.lock().unwrap();
        let tx = conn.transaction()?;

        let mut game = fetch_game(&tx, game_id)?;
        game.status = game.status.with_player_seated(color)?;
        repo::games::update_status(&tx, game_id, game.status)?;
        tx.commit()?;

        info!(game_id = %game_id, %color, status = %game.status, "player seated");
        self.emit(GameEvent::StatusChanged {
            game_id,
            status: game.status,
        });
        Ok(game)
    }

    /// Validate and execute one move.
    ///
    /// On success the move is appended to the history, the board state
    /// is updated, and the game status reflects the opponent's new
    /// situation: their turn, check, checkmate, or stalemate.
    ///
    /// # Errors
    ///
    /// Returns [`RefereeError::Rule`] with the first violated rule; a
    /// rejected move changes nothing.
    pub fn attempt_move(
        &self,
        game_id: Uuid,
        from: Position,
        to: Position,
    ) -> Result<MoveRecord, RefereeError> {
        let mut conn = self.db.lock().unwrap();
        let tx = conn.transaction()?;

        let game = fetch_game(&tx, game_id)?;
        let pieces = repo::pieces::active_for_game(&tx, game_id)?;
        let board = BoardView::build(&pieces);
        let facts = history_facts(&tx, game_id)?;

        let resolved = match classify(&board, game.status, &facts, from, to) {
            Ok(resolved) => resolved,
            Err(violation) => {
                debug!(game_id = %game_id, %from, %to, %violation, "move rejected");
                return Err(violation.into());
            }
        };

        let record = execute(&tx, game_id, &resolved)?;

        let after = repo::pieces::active_for_game(&tx, game_id)?;
        let board_after = BoardView::build(&after);
        let facts_after = history_facts(&tx, game_id)?;
        let status = evaluate_status(&board_after, &facts_after, resolved.piece.color);
        repo::games::update_status(&tx, game_id, status)?;
        tx.commit()?;

        info!(game_id = %game_id, mv = %record, %status, "move played");
        self.emit(GameEvent::MovePlayed {
            game_id,
            record: record.clone(),
            board: board_after.placement(),
        });
        self.emit(GameEvent::StatusChanged { game_id, status });
        Ok(record)
    }

    /// Replace a pawn standing on its promotion row with a new piece.
    ///
    /// The pawn entity is retired, not rewritten: it keeps its identity
    /// in the history while a fresh piece takes its square. The game
    /// status is then re-evaluated in place, since the new piece can
    /// give check or even mate without a move being played.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::NotPromotable`] unless an active pawn
    /// stands on its promotion row and the chosen kind is a knight,
    /// bishop, rook, or queen.
    pub fn promote(&self, piece_id: Uuid, kind: PieceKind) -> Result<Piece, RefereeError> {
        let mut conn = self.db.lock().unwrap();
        let tx = conn.transaction()?;

        let mut pawn =
            repo::pieces::get(&tx, piece_id)?.ok_or(RefereeError::PieceNotFound(piece_id))?;
        let game = fetch_game(&tx, pawn.game_id)?;
        if game.status.color_to_move().is_none() {
            return Err(RuleViolation::GameNotActive.into());
        }
        if !kind.is_promotion_target() || pawn.kind != PieceKind::Pawn || !pawn.is_active() {
            return Err(RuleViolation::NotPromotable.into());
        }
        let square = pawn.position.expect("active piece has a position");
        if !square.is_promotion_row(pawn.color) {
            return Err(RuleViolation::NotPromotable.into());
        }

        pawn.mark_removed();
        repo::pieces::update(&tx, &pawn)?;
        let piece = Piece::new_active(pawn.game_id, kind, pawn.color, square);
        repo::pieces::insert(&tx, &piece)?;

        let pieces = repo::pieces::active_for_game(&tx, pawn.game_id)?;
        let board = BoardView::build(&pieces);
        let facts = history_facts(&tx, pawn.game_id)?;
        let status = refresh_status(&board, &facts, game.status);
        if status != game.status {
            repo::games::update_status(&tx, pawn.game_id, status)?;
        }
        tx.commit()?;

        info!(game_id = %pawn.game_id, piece_id = %piece.id, %kind, "pawn promoted");
        self.emit(GameEvent::PiecePromoted {
            game_id: pawn.game_id,
            piece_id: piece.id,
            kind,
        });
        if status != game.status {
            self.emit(GameEvent::StatusChanged {
                game_id: pawn.game_id,
                status,
            });
        }
        Ok(piece)
    }

    /// End the game with a victory for the resigning player's opponent.
    pub fn resign(&self, game_id: Uuid, color: Color) -> Result<Game, RefereeError> {
        let mut conn = self.db.lock().unwrap();
        let tx = conn.transaction()?;

        let mut game = fetch_game(&tx, game_id)?;
        if game.status.color_to_move().is_none() {
            return Err(RuleViolation::GameNotActive.into());
        }
        game.status = GameStatus::victory_of(color.opposite());
        repo::games::update_status(&tx, game_id, game.status)?;
        tx.commit()?;

        info!(game_id = %game_id, %color, status = %game.status, "player resigned");
        self.emit(GameEvent::StatusChanged {
            game_id,
            status: game.status,
        });
        Ok(game)
    }

    /// Fetch a game.
    pub fn game(&self, game_id: Uuid) -> Result<Game, RefereeError> {
        let conn = self.db.lock().unwrap();
        fetch_game(&conn, game_id)
    }

    /// The active pieces of a game.
    pub fn active_pieces(&self, game_id: Uuid) -> Result<Vec<Piece>, RefereeError> {
        let conn = self.db.lock().unwrap();
        fetch_game(&conn, game_id)?;
        Ok(repo::pieces::active_for_game(&conn, game_id)?)
    }

    /// A game's full move history, ordered by ply.
    pub fn move_history(&self, game_id: Uuid) -> Result<Vec<MoveRecord>, RefereeError> {
        let conn = self.db.lock().unwrap();
        fetch_game(&conn, game_id)?;
        Ok(repo::moves::history(&conn, game_id)?)
    }

    /// The current board of a game.
    pub fn board(&self, game_id: Uuid) -> Result<BoardView, RefereeError> {
        let conn = self.db.lock().unwrap();
        fetch_game(&conn, game_id)?;
        let pieces = repo::pieces::active_for_game(&conn, game_id)?;
        Ok(BoardView::build(&pieces))
    }

    fn emit(&self, event: GameEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }
}

fn fetch_game(conn: &Connection, game_id: Uuid) -> Result<Game, RefereeError> {
    repo::games::get(conn, game_id)?.ok_or(RefereeError::GameNotFound(game_id))
}

fn history_facts(conn: &Connection, game_id: Uuid) -> Result<HistoryFacts, RefereeError> {
    Ok(HistoryFacts {
        last_move: repo::moves::last_move(conn, game_id)?,
        moved_pieces: repo::moves::moved_piece_ids(conn, game_id)?,
    })
}

/// Apply a resolved move to the stored pieces and append its record.
fn execute(
    conn: &Connection,
    game_id: Uuid,
    resolved: &ResolvedMove,
) -> Result<MoveRecord, RefereeError> {
    if let Some(captured) = &resolved.captured {
        let mut captured = captured.clone();
        captured.mark_taken();
        repo::pieces::update(conn, &captured)?;
    }

    let mut mover = resolved.piece.clone();
    mover.move_to(resolved.to);
    repo::pieces::update(conn, &mover)?;

    if let Some(relocation) = &resolved.rook {
        let mut rook = relocation.piece.clone();
        rook.move_to(relocation.to);
        repo::pieces::update(conn, &rook)?;
    }

    let record = MoveRecord {
        id: Uuid::new_v4(),
        game_id,
        piece_id: resolved.piece.id,
        from: resolved.from,
        to: resolved.to,
        taken_piece_id: resolved.captured.as_ref().map(|p| p.id),
        kind: resolved.kind,
        ply: repo::moves::next_ply(conn, game_id)?,
    };
    repo::moves::insert(conn, &record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    fn referee() -> Referee {
        Referee::new(init_db(":memory:").unwrap(), 16)
    }

    #[test]
    fn test_create_game_stores_full_starting_position() {
        let referee = referee();
        let game = referee.create_game().unwrap();

        assert_eq!(game.status, GameStatus::WaitingForPlayers);
        let pieces = referee.active_pieces(game.id).unwrap();
        assert_eq!(pieces.len(), 32);

        let board = referee.board(game.id).unwrap();
        assert_eq!(
            board.placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_create_game_with_re_evaluates_status() {
        let referee = referee();
        let game = referee
            .create_game_with("k7/2Q5/8/8/8/8/8/7K", GameStatus::BlackTurn)
            .unwrap();
        assert_eq!(game.status, GameStatus::Stalemate);
    }

    #[test]
    fn test_games_are_isolated() {
        let referee = referee();
        let first = referee.create_game().unwrap();
        let second = referee.create_game().unwrap();

        referee.seat_player(first.id, Color::White).unwrap();
        referee.seat_player(first.id, Color::Black).unwrap();
        referee
            .attempt_move(first.id, Position::at(6, 4), Position::at(4, 4))
            .unwrap();

        assert_eq!(referee.move_history(first.id).unwrap().len(), 1);
        assert!(referee.move_history(second.id).unwrap().is_empty());
        assert_eq!(
            referee.game(second.id).unwrap().status,
            GameStatus::WaitingForPlayers
        );
    }

    #[test]
    fn test_unknown_game_is_reported() {
        let referee = referee();
        let missing = Uuid::new_v4();

        match referee.game(missing) {
            Err(RefereeError::GameNotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected GameNotFound, got {:?}", other),
        }
    }
}
