//! Game store - persistence boundary for game records
//!
//! [`GameStore`] carries the operations a persistence backend offers: list
//! games, create a game for a user, patch a game, fetch one game, and track the
//! "current game" marker. [`MemoryStore`] keeps everything in process; there is
//! no network or authentication layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::core::TileBag;
use crate::session::GameSession;
use crate::types::TileKind;

/// A stored game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    pub user_id: u64,
    pub score: u32,
    pub moves: u32,
    pub finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Vec<Vec<TileKind>>>,
    /// Refill source at the time of the last save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag: Option<TileBag<TileKind>>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Vec<Vec<TileKind>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag: Option<TileBag<TileKind>>,
}

impl GamePatch {
    /// Everything a session can report about itself.
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            score: Some(session.score()),
            moves: Some(session.moves_made()),
            finished: Some(session.finished()),
            board: session.snapshot().board.filled_rows(),
            bag: Some(session.board().generator().clone()),
        }
    }

    fn apply(self, record: &mut GameRecord) {
        if let Some(score) = self.score {
            record.score = score;
        }
        if let Some(moves) = self.moves {
            record.moves = moves;
        }
        if let Some(finished) = self.finished {
            record.finished = finished;
        }
        if let Some(board) = self.board {
            record.board = Some(board);
        }
        if let Some(bag) = self.bag {
            record.bag = Some(bag);
        }
    }
}

pub trait GameStore {
    fn list_games(&self) -> Vec<GameRecord>;

    /// Create an empty game for `user_id` and mark it current.
    fn create_game(&mut self, user_id: u64) -> GameRecord;

    fn update_game(&mut self, id: u64, patch: GamePatch) -> Result<GameRecord, StoreError>;

    fn get_game(&self, id: u64) -> Result<GameRecord, StoreError>;

    fn current_game(&self) -> Option<u64>;

    fn clear_current(&mut self);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: BTreeMap<u64, GameRecord>,
    last_id: u64,
    current: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn list_games(&self) -> Vec<GameRecord> {
        self.games.values().cloned().collect()
    }

    fn create_game(&mut self, user_id: u64) -> GameRecord {
        self.last_id += 1;
        let record = GameRecord {
            id: self.last_id,
            user_id,
            score: 0,
            moves: 0,
            finished: false,
            board: None,
            bag: None,
        };
        self.games.insert(record.id, record.clone());
        self.current = Some(record.id);
        debug!(id = record.id, user_id, "game created");
        record
    }

    fn update_game(&mut self, id: u64, patch: GamePatch) -> Result<GameRecord, StoreError> {
        let record = self.games.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        patch.apply(record);
        Ok(record.clone())
    }

    fn get_game(&self, id: u64) -> Result<GameRecord, StoreError> {
        self.games.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn current_game(&self) -> Option<u64> {
        self.current
    }

    fn clear_current(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_ids_and_marks_current() {
        let mut store = MemoryStore::new();
        let a = store.create_game(10);
        let b = store.create_game(11);

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.current_game(), Some(2));
        assert_eq!(store.list_games().len(), 2);

        store.clear_current();
        assert_eq!(store.current_game(), None);
        assert_eq!(store.list_games().len(), 2);
    }

    #[test]
    fn test_update_patches_only_given_fields() {
        let mut store = MemoryStore::new();
        let game = store.create_game(1);

        let updated = store
            .update_game(
                game.id,
                GamePatch {
                    score: Some(42),
                    ..GamePatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.score, 42);
        assert_eq!(updated.moves, 0);
        assert!(!updated.finished);
        assert_eq!(store.get_game(game.id).unwrap(), updated);
    }

    #[test]
    fn test_unknown_id() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_game(5), Err(StoreError::NotFound(5)));
        assert_eq!(
            store.update_game(5, GamePatch::default()),
            Err(StoreError::NotFound(5))
        );
    }

    #[test]
    fn test_record_json_shape() {
        let record = GameRecord {
            id: 3,
            user_id: 9,
            score: 12,
            moves: 4,
            finished: true,
            board: Some(vec![vec![TileKind::Red, TileKind::Blue]]),
            bag: TileBag::new(TileKind::palette(3), 5),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["board"][0][1], "blue");
        assert_eq!(json["bag"]["palette"][2], "yellow");

        let back: GameRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);

        let patch: GamePatch = serde_json::from_str(r#"{"finished":true}"#).unwrap();
        assert_eq!(patch.finished, Some(true));
        assert_eq!(patch.score, None);
    }
}
