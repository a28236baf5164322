//! Game event notifications.
//!
//! Observers subscribe to a broadcast channel and receive events after
//! the corresponding change is committed. Delivery is fire-and-forget:
//! a lagging or absent subscriber never affects the game state.

use chess_core::{GameStatus, MoveRecord, PieceKind};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events broadcast by the referee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A game was created and is waiting for players.
    GameCreated { game_id: Uuid },
    /// A move was validated and executed. Carries the board placement
    /// after the move so observers need no follow-up query.
    MovePlayed {
        game_id: Uuid,
        record: MoveRecord,
        board: String,
    },
    /// The game's lifecycle status changed.
    StatusChanged { game_id: Uuid, status: GameStatus },
    /// A pawn was replaced by its promotion piece.
    PiecePromoted {
        game_id: Uuid,
        piece_id: Uuid,
        kind: PieceKind,
    },
}

/// Sending half of the event channel.
pub type EventSender = broadcast::Sender<GameEvent>;

/// Receiving half of the event channel.
pub type EventReceiver = broadcast::Receiver<GameEvent>;

/// Create the broadcast channel game events go out on.
pub fn channel(capacity: usize) -> EventSender {
    let (tx, _rx) = broadcast::channel(capacity);
    tx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = GameEvent::StatusChanged {
            game_id: Uuid::nil(),
            status: GameStatus::WhiteCheck,
        };
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"type\":\"status_changed\""));
        assert!(json.contains("\"status\":\"white_check\""));
    }

    #[test]
    fn test_event_round_trip() {
        let event = GameEvent::GameCreated {
            game_id: Uuid::new_v4(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();

        match back {
            GameEvent::GameCreated { game_id } => match event {
                GameEvent::GameCreated { game_id: original } => assert_eq!(game_id, original),
                _ => unreachable!(),
            },
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_channel_delivers_to_subscriber() {
        let tx = channel(16);
        let mut rx = tx.subscribe();

        tx.send(GameEvent::GameCreated {
            game_id: Uuid::nil(),
        })
        .unwrap();

        let received = rx.try_recv().unwrap();
        assert!(matches!(received, GameEvent::GameCreated { .. }));
    }

    #[test]
    fn test_send_without_subscribers_is_an_error_not_a_panic() {
        let tx = channel(16);
        let result = tx.send(GameEvent::GameCreated {
            game_id: Uuid::nil(),
        });
        assert!(result.is_err());
    }
}
