use serde::Serialize;

use crate::types::{Card, CardId, GameConfig, GameStatus, PlayerId, Players};

/// Read-only copy of a session for front ends
///
/// Reused across frames through [`GameState::snapshot_into`](crate::GameState::snapshot_into),
/// which keeps the vector allocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub session_id: u32,
    pub seed: u32,
    pub status: GameStatus,
    pub config: GameConfig,
    pub cards: Vec<Card>,
    pub flipped: Vec<CardId>,
    pub current_player: PlayerId,
    pub players: Players,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.session_id = 0;
        self.seed = 0;
        self.status = GameStatus::Idle;
        self.config = GameConfig::default();
        self.cards.clear();
        self.flipped.clear();
        self.current_player = PlayerId::One;
        self.players = Players::default();
        self.matched_pairs = 0;
        self.total_pairs = 0;
        self.start_time = None;
        self.end_time = None;
    }

    /// Whether a flip would currently be accepted on some card.
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing && self.flipped.len() < 2
    }

    pub fn card_index(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            session_id: 0,
            seed: 0,
            status: GameStatus::Idle,
            config: GameConfig::default(),
            cards: Vec::new(),
            flipped: Vec::new(),
            current_player: PlayerId::One,
            players: Players::default(),
            matched_pairs: 0,
            total_pairs: 0,
            start_time: None,
            end_time: None,
        }
    }
}
