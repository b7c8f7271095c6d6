//! Display formatting - human-readable labels for cards and results
//!
//! Display-only: nothing in the session logic reads these strings.
//!
//! | Notation | Note names | Major | Minor | 1st inv. | 2nd inv. |
//! |----------|------------|-------|-------|----------|----------|
//! | doremi | ド ド# レ ... シ | メジャー | マイナー | 第1転回 | 第2転回 |
//! | abc | C C# D ... B | maj | min | /1st | /2nd |

use crate::types::{Card, CardFace, ChordFace, ChordType, Inversion, Notation, PitchFace};

const DOREMI_NAMES: [&str; 12] = [
    "ド", "ド#", "レ", "レ#", "ミ", "ファ", "ファ#", "ソ", "ソ#", "ラ", "ラ#", "シ",
];

const ABC_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Name of a pitch class (taken modulo 12).
pub fn note_name(pitch_class: u8, notation: Notation) -> &'static str {
    let names = match notation {
        Notation::Doremi => &DOREMI_NAMES,
        Notation::Abc => &ABC_NAMES,
    };
    names[(pitch_class % 12) as usize]
}

pub fn chord_type_name(chord_type: ChordType, notation: Notation) -> &'static str {
    match (chord_type, notation) {
        (ChordType::Major, Notation::Doremi) => "メジャー",
        (ChordType::Major, Notation::Abc) => "maj",
        (ChordType::Minor, Notation::Doremi) => "マイナー",
        (ChordType::Minor, Notation::Abc) => "min",
    }
}

fn inversion_suffix(inversion: Inversion, notation: Notation) -> &'static str {
    match (inversion, notation) {
        (Inversion::Root, _) => "",
        (Inversion::First, Notation::Doremi) => "第1転回",
        (Inversion::First, Notation::Abc) => "/1st",
        (Inversion::Second, Notation::Doremi) => "第2転回",
        (Inversion::Second, Notation::Abc) => "/2nd",
    }
}

/// `ド4`, `C#3`, or just the note name without the octave.
pub fn format_pitch(face: &PitchFace, notation: Notation, show_octave: bool) -> String {
    let name = note_name(face.pitch_class, notation);
    if show_octave {
        format!("{name}{}", face.octave)
    } else {
        name.to_string()
    }
}

/// `Cmaj/1st`, `ラマイナー第2転回`. Chords carry no octave label.
pub fn format_chord(face: &ChordFace, notation: Notation) -> String {
    format!(
        "{}{}{}",
        note_name(face.root, notation),
        chord_type_name(face.chord_type, notation),
        inversion_suffix(face.inversion, notation)
    )
}

pub fn format_card(card: &Card, notation: Notation, show_octave: bool) -> String {
    match &card.face {
        CardFace::Pitch(p) => format_pitch(p, notation, show_octave),
        CardFace::Chord(c) => format_chord(c, notation),
    }
}

/// `MM:SS`, truncating fractional seconds. Minutes are not wrapped at an hour.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// One decimal place and a percent sign, e.g. `97.5%`.
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{accuracy:.1}%")
}
