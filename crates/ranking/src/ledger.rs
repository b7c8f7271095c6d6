//! Ranking ledger - category-scoped leaderboards over a key-value store
//!
//! All categories live in one JSON document under a single key:
//!
//! ```json
//! {"rankings":[{"id":"…","mode":"pitch","difficulty":"easy","isExtendedRules":false,
//!   "score":520,"clearTime":41.2,"accuracy":80.0,"date":1700000000000}]}
//! ```
//!
//! Every write re-sorts the whole collection by score and keeps the best
//! [`MAX_RANKINGS_PER_CATEGORY`] entries of each category; anything past that is
//! dropped for good.
//!
//! Storage failures never reach the caller. A failed read behaves like an empty
//! ledger and a failed write is dropped; both are logged with `warn!`. A document
//! that cannot be parsed also reads as empty, and the next write replaces it.

use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::store::KeyValueStore;
use crate::types::{
    NewRankingEntry, RankingCategory, RankingEntry, MAX_RANKINGS_PER_CATEGORY,
    RANKINGS_STORAGE_KEY,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RankingsDocument {
    #[serde(default)]
    rankings: Vec<RankingEntry>,
}

/// Persistent leaderboards, safe to share behind an `Arc`
pub struct RankingLedger<S> {
    store: S,
    key: String,
    max_per_category: usize,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> RankingLedger<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, RANKINGS_STORAGE_KEY)
    }

    /// Ledger stored under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            max_per_category: MAX_RANKINGS_PER_CATEGORY,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current entries. Only a store failure is an error; a malformed document
    /// is logged and read as empty.
    async fn load(&self) -> Result<Vec<RankingEntry>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<RankingsDocument>(&raw) {
            Ok(doc) => Ok(doc.rankings),
            Err(e) => {
                log::warn!("discarding malformed rankings document under {}: {e}", self.key);
                Ok(Vec::new())
            }
        }
    }

    async fn load_or_empty(&self) -> Vec<RankingEntry> {
        match self.load().await {
            Ok(rankings) => rankings,
            Err(e) => {
                log::warn!("failed to load rankings: {e:#}");
                Vec::new()
            }
        }
    }

    async fn save(&self, rankings: Vec<RankingEntry>) -> Result<()> {
        let raw = serde_json::to_string(&RankingsDocument { rankings })?;
        self.store.set(&self.key, raw).await
    }

    /// Record a finished game, stamping a fresh id and the current time
    pub async fn record(&self, entry: NewRankingEntry) -> RankingEntry {
        self.record_at(entry, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// [`record`](Self::record) with an explicit timestamp (unix milliseconds).
    ///
    /// The returned entry is produced even when it could not be persisted.
    pub async fn record_at(&self, entry: NewRankingEntry, date: i64) -> RankingEntry {
        let entry = entry.into_entry(uuid::Uuid::new_v4().to_string(), date);
        let _guard = self.write_lock.lock().await;

        // The store may still hold entries it failed to hand back.
        let mut rankings = match self.load().await {
            Ok(rankings) => rankings,
            Err(e) => {
                log::warn!("failed to load rankings, not saving {}: {e:#}", entry.id);
                return entry;
            }
        };

        rankings.push(entry.clone());
        let rankings = retain_top(rankings, self.max_per_category);
        log::debug!(
            "recorded {} in {} ({} entries total)",
            entry.score,
            entry.category(),
            rankings.len()
        );

        if let Err(e) = self.save(rankings).await {
            log::warn!("failed to save rankings: {e:#}");
        }
        entry
    }

    /// Best `limit` entries of a category, highest score first
    pub async fn query(&self, category: RankingCategory, limit: usize) -> Vec<RankingEntry> {
        let mut rankings: Vec<RankingEntry> = self
            .load_or_empty()
            .await
            .into_iter()
            .filter(|e| e.category() == category)
            .collect();
        rankings.sort_by(|a, b| b.score.cmp(&a.score));
        rankings.truncate(limit);
        rankings
    }

    /// 1-based position `score` would take among the category's retained entries
    ///
    /// Ties place the new score above the existing ones. Below everything on record
    /// yields `count + 1`.
    pub async fn rank(&self, score: u32, category: RankingCategory) -> usize {
        let rankings = self.query(category, self.max_per_category).await;
        match rankings.iter().position(|e| e.score <= score) {
            Some(index) => index + 1,
            None => rankings.len() + 1,
        }
    }

    /// True for an empty category or a score strictly above the current best.
    pub async fn is_high_score(&self, score: u32, category: RankingCategory) -> bool {
        match self.query(category, 1).await.first() {
            Some(top) => score > top.score,
            None => true,
        }
    }

    /// Drop every category.
    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.store.remove(&self.key).await {
            log::warn!("failed to clear rankings: {e:#}");
        }
    }
}

/// Sort descending by score and keep the best `max_per_category` of each category.
///
/// The sort is stable, so earlier entries win ties.
fn retain_top(mut rankings: Vec<RankingEntry>, max_per_category: usize) -> Vec<RankingEntry> {
    rankings.sort_by(|a, b| b.score.cmp(&a.score));
    let mut kept: HashMap<RankingCategory, usize> = HashMap::new();
    rankings.retain(|entry| {
        let count = kept.entry(entry.category()).or_insert(0);
        *count += 1;
        *count <= max_per_category
    });
    rankings
}
