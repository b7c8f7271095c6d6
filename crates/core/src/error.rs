//! Deck generation errors.

use thiserror::Error;

use crate::types::GameMode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// More pairs were requested than there are distinct values to deal.
    ///
    /// The generator never repeats a value to make up the difference.
    #[error("cannot deal {requested} {mode:?} pairs from a pool of {available} distinct values")]
    PoolExhausted {
        mode: GameMode,
        requested: usize,
        available: usize,
    },

    /// Extended pitch decks reserve two pairs for the octave-spanning match.
    #[error("extended pitch decks need at least {required} pairs, got {requested}")]
    TooFewPairsForExtended { requested: usize, required: usize },
}

pub type DeckResult<T> = Result<T, DeckError>;
