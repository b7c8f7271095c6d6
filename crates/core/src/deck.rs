//! Deck module - builds the shuffled pairs for a session
//!
//! A deck always holds `2 * pair_count` cards. Which values are dealt depends on the
//! mode and rule-set:
//!
//! - **Pitch, exact**: distinct MIDI notes from C2..=C6, two identical cards each.
//! - **Pitch, extended**: one pitch class dealt in two different octaves (two exact
//!   pairs that also cross-match under extended rules), the rest as exact pitch pairs
//!   from the unused notes.
//! - **Chord, exact**: distinct (root, type) triads, both cards in root position.
//! - **Chord, extended**: same selection, the partner card in a random inversion.
//!
//! The finished deck is Fisher-Yates shuffled. Requests larger than the pool of
//! distinct values fail with [`DeckError`] instead of repeating values.

use crate::error::{DeckError, DeckResult};
use crate::rng::SimpleRng;
use crate::types::{
    Card, CardFace, ChordFace, ChordType, Difficulty, GameMode, Inversion, PitchFace,
    CHORD_ROOT_COUNT, PITCH_MAX, PITCH_MIN, PITCH_OCTAVES,
};

/// Pairs reserved by the octave-spanning step of extended pitch decks.
const OCTAVE_SPAN_PAIRS: usize = 2;

/// Build the deck for a difficulty from its static configuration.
pub fn generate(
    mode: GameMode,
    difficulty: Difficulty,
    is_extended_rules: bool,
    rng: &mut SimpleRng,
) -> DeckResult<Vec<Card>> {
    generate_pairs(mode, difficulty.config().pair_count, is_extended_rules, rng)
}

/// Build a shuffled deck of `pair_count` pairs.
pub fn generate_pairs(
    mode: GameMode,
    pair_count: usize,
    is_extended_rules: bool,
    rng: &mut SimpleRng,
) -> DeckResult<Vec<Card>> {
    let mut faces = Vec::with_capacity(pair_count * 2);
    match (mode, is_extended_rules) {
        (GameMode::Pitch, false) => exact_pitch_pairs(&pitch_pool(), pair_count, rng, &mut faces)?,
        (GameMode::Pitch, true) => extended_pitch_pairs(pair_count, rng, &mut faces)?,
        (GameMode::Chord, extended) => chord_pairs(pair_count, extended, rng, &mut faces)?,
    }

    let mut cards: Vec<Card> = faces
        .into_iter()
        .map(|face| Card::new(rng.next_card_id(), face))
        .collect();
    rng.shuffle(&mut cards);
    Ok(cards)
}

/// Number of distinct values a mode can deal pairs from.
pub fn pool_size(mode: GameMode) -> usize {
    match mode {
        GameMode::Pitch => (PITCH_MAX - PITCH_MIN + 1) as usize,
        GameMode::Chord => CHORD_ROOT_COUNT as usize * ChordType::ALL.len(),
    }
}

fn pitch_pool() -> Vec<u8> {
    (PITCH_MIN..=PITCH_MAX).collect()
}

fn chord_pool() -> Vec<(u8, ChordType)> {
    (0..CHORD_ROOT_COUNT)
        .flat_map(|root| ChordType::ALL.map(|t| (root, t)))
        .collect()
}

fn push_pair(out: &mut Vec<CardFace>, a: CardFace, b: CardFace) {
    out.push(a);
    out.push(b);
}

fn exact_pitch_pairs(
    pool: &[u8],
    pair_count: usize,
    rng: &mut SimpleRng,
    out: &mut Vec<CardFace>,
) -> DeckResult<()> {
    let picked = rng
        .sample(pool, pair_count)
        .ok_or(DeckError::PoolExhausted {
            mode: GameMode::Pitch,
            requested: pair_count,
            available: pool.len(),
        })?;

    for pitch in picked {
        let face = CardFace::Pitch(PitchFace::from_midi(pitch));
        push_pair(out, face, face);
    }
    Ok(())
}

fn extended_pitch_pairs(
    pair_count: usize,
    rng: &mut SimpleRng,
    out: &mut Vec<CardFace>,
) -> DeckResult<()> {
    if pair_count < OCTAVE_SPAN_PAIRS {
        return Err(DeckError::TooFewPairsForExtended {
            requested: pair_count,
            required: OCTAVE_SPAN_PAIRS,
        });
    }
    let available = pool_size(GameMode::Pitch);
    if pair_count > available {
        return Err(DeckError::PoolExhausted {
            mode: GameMode::Pitch,
            requested: pair_count,
            available,
        });
    }

    // Only octaves that keep the note inside the dealt range.
    let pitch_class = rng.next_range(12) as u8;
    let octaves: Vec<i8> = PITCH_OCTAVES
        .iter()
        .copied()
        .filter(|&o| (PITCH_MIN..=PITCH_MAX).contains(&octave_midi(o, pitch_class)))
        .collect();
    let span = rng
        .sample(&octaves, OCTAVE_SPAN_PAIRS)
        .ok_or(DeckError::PoolExhausted {
            mode: GameMode::Pitch,
            requested: OCTAVE_SPAN_PAIRS,
            available: octaves.len(),
        })?;

    let mut pool = pitch_pool();
    for octave in span {
        let pitch = octave_midi(octave, pitch_class);
        let face = CardFace::Pitch(PitchFace::from_midi(pitch));
        push_pair(out, face, face);
        pool.retain(|&p| p != pitch);
    }

    exact_pitch_pairs(&pool, pair_count - OCTAVE_SPAN_PAIRS, rng, out)
}

fn octave_midi(octave: i8, pitch_class: u8) -> u8 {
    ((octave as i16 + 1) * 12 + pitch_class as i16) as u8
}

fn chord_pairs(
    pair_count: usize,
    is_extended_rules: bool,
    rng: &mut SimpleRng,
    out: &mut Vec<CardFace>,
) -> DeckResult<()> {
    let pool = chord_pool();
    let picked = rng
        .sample(&pool, pair_count)
        .ok_or(DeckError::PoolExhausted {
            mode: GameMode::Chord,
            requested: pair_count,
            available: pool.len(),
        })?;

    for (root, chord_type) in picked {
        let partner = if is_extended_rules {
            Inversion::ALL[rng.next_range(3) as usize]
        } else {
            Inversion::Root
        };
        push_pair(
            out,
            CardFace::Chord(ChordFace::new(root, chord_type, Inversion::Root)),
            CardFace::Chord(ChordFace::new(root, chord_type, partner)),
        );
    }
    Ok(())
}
