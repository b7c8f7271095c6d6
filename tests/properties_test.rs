//! Property tests for deck generation, validation and scoring

use std::collections::HashMap;

use proptest::prelude::*;

use melody_memory::core::deck::generate;
use melody_memory::core::{accuracy, time_bonus, validate_with_rules, SimpleRng};
use melody_memory::types::{CardFace, Difficulty, GameMode};

fn mode_strategy() -> impl Strategy<Value = GameMode> {
    prop_oneof![Just(GameMode::Pitch), Just(GameMode::Chord)]
}

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Normal),
        Just(Difficulty::Hard)
    ]
}

fn face_counts(faces: impl Iterator<Item = CardFace>) -> HashMap<CardFace, usize> {
    let mut counts = HashMap::new();
    for face in faces {
        *counts.entry(face).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #[test]
    fn deck_size_matches_difficulty(
        seed in any::<u32>(),
        mode in mode_strategy(),
        difficulty in difficulty_strategy(),
        extended in any::<bool>(),
    ) {
        let deck = generate(mode, difficulty, extended, &mut SimpleRng::new(seed)).unwrap();
        prop_assert_eq!(deck.len(), 2 * difficulty.config().pair_count);
    }

    #[test]
    fn exact_decks_deal_each_value_twice(
        seed in any::<u32>(),
        mode in mode_strategy(),
        difficulty in difficulty_strategy(),
    ) {
        let deck = generate(mode, difficulty, false, &mut SimpleRng::new(seed)).unwrap();
        let counts = face_counts(deck.iter().map(|c| c.face));
        prop_assert_eq!(counts.len(), difficulty.config().pair_count);
        prop_assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn every_card_has_a_partner(
        seed in any::<u32>(),
        mode in mode_strategy(),
        difficulty in difficulty_strategy(),
        extended in any::<bool>(),
    ) {
        let deck = generate(mode, difficulty, extended, &mut SimpleRng::new(seed)).unwrap();
        for card in &deck {
            let partners = deck
                .iter()
                .filter(|other| validate_with_rules(card, other, extended).is_match)
                .count();
            prop_assert!(partners >= 1, "card {:?} has no partner", card.face);
        }
    }

    #[test]
    fn extended_pitch_decks_span_octaves(seed in any::<u32>(), difficulty in difficulty_strategy()) {
        let deck = generate(GameMode::Pitch, difficulty, true, &mut SimpleRng::new(seed)).unwrap();
        let notes: Vec<u8> = deck
            .iter()
            .filter_map(|c| match c.face {
                CardFace::Pitch(p) => Some(p.pitch),
                CardFace::Chord(_) => None,
            })
            .collect();
        let spans = notes
            .iter()
            .any(|&a| notes.iter().any(|&b| a != b && a % 12 == b % 12));
        prop_assert!(spans);
    }

    #[test]
    fn validation_is_symmetric_and_never_self_matches(
        seed in any::<u32>(),
        mode in mode_strategy(),
        extended in any::<bool>(),
        i in 0usize..24,
        j in 0usize..24,
    ) {
        let deck = generate(mode, Difficulty::Hard, extended, &mut SimpleRng::new(seed)).unwrap();
        let (a, b) = (&deck[i], &deck[j]);
        prop_assert_eq!(validate_with_rules(a, b, extended), validate_with_rules(b, a, extended));
        prop_assert!(!validate_with_rules(a, a, extended).is_match);
    }

    #[test]
    fn time_bonus_is_bounded(elapsed in 0.0f64..1000.0, difficulty in difficulty_strategy()) {
        let target = difficulty.config().target_time_secs;
        let bonus = time_bonus(elapsed, difficulty);
        prop_assert!(bonus <= target * 2);
        if elapsed >= target as f64 {
            prop_assert_eq!(bonus, 0);
        }
    }

    #[test]
    fn accuracy_measures_attempts_against_the_minimum(matched in 0u32..200, extra in 0u32..200) {
        let attempts = matched + extra;
        let value = accuracy(matched, attempts);
        prop_assert!((0.0..=100.0).contains(&value));
        if attempts > 0 && extra == 0 {
            prop_assert_eq!(value, 100.0);
        }
        prop_assert_eq!(accuracy(matched, 0), 0.0);
    }
}

#[test]
fn time_bonus_from_zero_is_twice_the_target() {
    for difficulty in Difficulty::ALL {
        assert_eq!(
            time_bonus(0.0, difficulty),
            difficulty.config().target_time_secs * 2
        );
    }
}
