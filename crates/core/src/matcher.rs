//! Match validation - decides whether two face-up cards form a pair
//!
//! Rules, in order:
//! 1. The same card instance twice is never a match.
//! 2. Cards of different modes never match.
//! 3. Pitch: equal MIDI note is exact; with extended rules an equal pitch class
//!    (any octave) is an extended match.
//! 4. Chord: root and type must agree. Equal inversion is exact; with extended rules
//!    any other inversion is an extended match.

use crate::types::{Card, CardFace, ChordFace, GameConfig, MatchResult, PitchFace};

/// Judge two cards under the session configuration.
///
/// Symmetric in its card arguments.
pub fn validate(a: &Card, b: &Card, config: &GameConfig) -> MatchResult {
    validate_with_rules(a, b, config.is_extended_rules)
}

/// Judge two cards with an explicit rule-set.
pub fn validate_with_rules(a: &Card, b: &Card, is_extended_rules: bool) -> MatchResult {
    if a.id == b.id {
        return MatchResult::NO_MATCH;
    }

    match (&a.face, &b.face) {
        (CardFace::Pitch(x), CardFace::Pitch(y)) => pitch_match(x, y, is_extended_rules),
        (CardFace::Chord(x), CardFace::Chord(y)) => chord_match(x, y, is_extended_rules),
        _ => MatchResult::NO_MATCH,
    }
}

fn pitch_match(a: &PitchFace, b: &PitchFace, is_extended_rules: bool) -> MatchResult {
    if a.pitch == b.pitch {
        MatchResult::EXACT
    } else if is_extended_rules && a.pitch_class == b.pitch_class {
        MatchResult::EXTENDED
    } else {
        MatchResult::NO_MATCH
    }
}

fn chord_match(a: &ChordFace, b: &ChordFace, is_extended_rules: bool) -> MatchResult {
    if a.root != b.root || a.chord_type != b.chord_type {
        return MatchResult::NO_MATCH;
    }

    // Extended rules drop the inversion constraint entirely.
    if a.inversion == b.inversion {
        MatchResult::EXACT
    } else if is_extended_rules {
        MatchResult::EXTENDED
    } else {
        MatchResult::NO_MATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::{
        ChordType, Inversion, MatchType, EXACT_MATCH_POINTS, EXTENDED_MATCH_POINTS,
    };

    fn pitch(rng: &mut SimpleRng, midi: u8) -> Card {
        Card::new(rng.next_card_id(), CardFace::Pitch(PitchFace::from_midi(midi)))
    }

    fn chord(rng: &mut SimpleRng, root: u8, t: ChordType, inv: Inversion) -> Card {
        Card::new(rng.next_card_id(), CardFace::Chord(ChordFace::new(root, t, inv)))
    }

    #[test]
    fn test_same_instance_never_matches() {
        let mut rng = SimpleRng::new(1);
        let c4 = pitch(&mut rng, 60);
        assert_eq!(validate_with_rules(&c4, &c4, false), MatchResult::NO_MATCH);
        assert_eq!(validate_with_rules(&c4, &c4, true), MatchResult::NO_MATCH);
    }

    #[test]
    fn test_exact_pitch() {
        let mut rng = SimpleRng::new(1);
        let a = pitch(&mut rng, 60);
        let b = pitch(&mut rng, 60);
        let r = validate_with_rules(&a, &b, false);
        assert!(r.is_match);
        assert_eq!(r.match_type, Some(MatchType::Exact));
        assert_eq!(r.points, EXACT_MATCH_POINTS);

        // Exact beats extended even when extended rules are on.
        assert_eq!(validate_with_rules(&a, &b, true), MatchResult::EXACT);
    }

    #[test]
    fn test_octave_pitch_needs_extended_rules() {
        let mut rng = SimpleRng::new(1);
        let c3 = pitch(&mut rng, 48);
        let c5 = pitch(&mut rng, 72);
        assert_eq!(validate_with_rules(&c3, &c5, false), MatchResult::NO_MATCH);

        let r = validate_with_rules(&c3, &c5, true);
        assert_eq!(r.match_type, Some(MatchType::Extended));
        assert_eq!(r.points, EXTENDED_MATCH_POINTS);

        let d5 = pitch(&mut rng, 74);
        assert_eq!(validate_with_rules(&c3, &d5, true), MatchResult::NO_MATCH);
    }

    #[test]
    fn test_chord_requires_root_and_type() {
        let mut rng = SimpleRng::new(2);
        let c_maj = chord(&mut rng, 0, ChordType::Major, Inversion::Root);
        let c_min = chord(&mut rng, 0, ChordType::Minor, Inversion::Root);
        let d_maj = chord(&mut rng, 2, ChordType::Major, Inversion::Root);
        assert_eq!(validate_with_rules(&c_maj, &c_min, true), MatchResult::NO_MATCH);
        assert_eq!(validate_with_rules(&c_maj, &d_maj, true), MatchResult::NO_MATCH);
    }

    #[test]
    fn test_chord_inversions() {
        let mut rng = SimpleRng::new(2);
        let root = chord(&mut rng, 7, ChordType::Minor, Inversion::Root);
        let root2 = chord(&mut rng, 7, ChordType::Minor, Inversion::Root);
        let second = chord(&mut rng, 7, ChordType::Minor, Inversion::Second);

        assert_eq!(validate_with_rules(&root, &root2, false), MatchResult::EXACT);
        assert_eq!(validate_with_rules(&root, &second, false), MatchResult::NO_MATCH);
        assert_eq!(validate_with_rules(&root, &second, true), MatchResult::EXTENDED);
    }

    #[test]
    fn test_mixed_modes_never_match() {
        let mut rng = SimpleRng::new(3);
        let note = pitch(&mut rng, 60);
        let triad = chord(&mut rng, 0, ChordType::Major, Inversion::Root);
        assert_eq!(validate_with_rules(&note, &triad, true), MatchResult::NO_MATCH);
        assert_eq!(validate_with_rules(&triad, &note, true), MatchResult::NO_MATCH);
    }

    #[test]
    fn test_validate_reads_config_rules() {
        let mut rng = SimpleRng::new(4);
        let a = pitch(&mut rng, 50);
        let b = pitch(&mut rng, 62);
        let mut config = GameConfig::default();
        assert!(!validate(&a, &b, &config).is_match);
        config.is_extended_rules = true;
        assert!(validate(&a, &b, &config).is_match);
    }
}
