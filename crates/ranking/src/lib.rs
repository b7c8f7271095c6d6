//! Ranking persistence - leaderboards per (mode, difficulty, rule-set)
//!
//! - [`store`]: the async key-value contract plus in-memory and file backends
//! - [`ledger`]: the [`RankingLedger`] with top-100 retention per category
//!
//! ```
//! use melody_memory_ranking::{MemoryStore, RankingLedger};
//! use melody_memory_types::{Difficulty, GameMode, NewRankingEntry, RankingCategory};
//!
//! # tokio_test::block_on(async {
//! let ledger = RankingLedger::new(MemoryStore::new());
//! let category = RankingCategory::new(GameMode::Pitch, Difficulty::Easy, false);
//! assert!(ledger.is_high_score(300, category).await);
//!
//! ledger
//!     .record(NewRankingEntry {
//!         mode: GameMode::Pitch,
//!         difficulty: Difficulty::Easy,
//!         is_extended_rules: false,
//!         score: 300,
//!         clear_time: 35.5,
//!         accuracy: 80.0,
//!     })
//!     .await;
//! assert_eq!(ledger.rank(250, category).await, 2);
//! # });
//! ```

pub mod ledger;
pub mod store;

pub use melody_memory_types as types;

pub use ledger::RankingLedger;
pub use store::{FileStore, KeyValueStore, MemoryStore};
