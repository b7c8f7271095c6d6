//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, session state and scoring.
//! It has **no dependencies** on audio, storage, or I/O, making it:
//!
//! - **Deterministic**: Same seed deals identical decks (card ids included)
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Drives any front end (console, GUI, headless)
//!
//! # Module Structure
//!
//! - [`deck`]: Shuffled pair generation for pitch and chord modes
//! - [`matcher`]: Exact and extended match validation
//! - [`game_state`]: Session state machine (flip, resolve, pause, finish)
//! - [`rng`]: Seeded LCG with Fisher-Yates shuffle
//! - [`scoring`]: Combo awards, time bonus, accuracy and the end-of-game summary
//! - [`format`]: Display labels for notes, chords, times and accuracy
//!
//! # Game Rules
//!
//! - **Pairs**: Each deck holds `pair_count` pairs; every card has exactly one
//!   intended partner
//! - **Exact match**: Same MIDI note, or same chord in the same inversion (100 points)
//! - **Extended match**: Same pitch class in another octave, or the same chord in
//!   another inversion, when extended rules are on (150 points)
//! - **Combos**: Consecutive matches by one player multiply points by
//!   `1.0 + 0.5 * (combo - 1)`
//! - **Two players**: A miss passes the turn; a match keeps it
//! - **Time bonus**: Single player only, 2 points per second under the target time
//!
//! # Example
//!
//! ```
//! use melody_memory_core::GameState;
//! use melody_memory_types::{GameAction, GameConfig, GameStatus};
//!
//! // Create and start a session
//! let mut game = GameState::new(GameConfig::default(), 12345);
//! assert!(game.apply_action(GameAction::Start));
//!
//! // Flip two cards and judge them
//! let first = game.cards()[0].id;
//! let second = game.cards()[1].id;
//! game.apply_action(GameAction::Flip(first));
//! game.apply_action(GameAction::Flip(second));
//! let outcome = game.resolve_match().unwrap();
//!
//! assert_eq!(game.player(outcome.player).attempts, 1);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```

pub mod deck;
pub mod error;
pub mod format;
pub mod game_state;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use melody_memory_types as types;

// Re-export commonly used types for convenience
pub use error::{DeckError, DeckResult};
pub use game_state::{now_ms, GameState, MatchOutcome};
pub use matcher::{validate, validate_with_rules};
pub use rng::SimpleRng;
pub use scoring::{
    accuracy, award_points, combo_multiplier, final_score, time_bonus, winner, ComboAward,
    GameResult, WinnerResult,
};
pub use snapshot::GameSnapshot;
