//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with serde derives, so they can be used in any context
//! (session logic, ranking persistence, the console protocol).
//!
//! # Difficulty Table
//!
//! | Difficulty | Cards | Pairs | Grid | Target time |
//! |------------|-------|-------|------|-------------|
//! | easy | 8 | 4 | 2x4 | 60s |
//! | normal | 16 | 8 | 4x4 | 120s |
//! | hard | 24 | 12 | 4x6 | 180s |
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `EXACT_MATCH_POINTS` | 100 | Identical pitch or chord (same inversion) |
//! | `EXTENDED_MATCH_POINTS` | 150 | Same pitch class / same chord, other inversion |
//! | `TIME_BONUS_PER_SECOND` | 2 | Points per second left under the target time |
//! | `COMBO_BASE_MULTIPLIER` | 1.0 | Multiplier of the first match in a streak |
//! | `COMBO_INCREMENT_PER_COMBO` | 0.5 | Added per further consecutive match |
//!
//! # Examples
//!
//! ```
//! use melody_memory_types::{ChordFace, ChordType, Difficulty, GameMode, Inversion, PitchFace};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(GameMode::from_str("Chord"), Some(GameMode::Chord));
//!
//! // Difficulty drives the deck size
//! assert_eq!(Difficulty::Easy.config().pair_count, 4);
//!
//! // Pitch faces derive their class and octave from the MIDI number
//! let a4 = PitchFace::from_midi(69);
//! assert_eq!((a4.pitch_class, a4.octave), (9, 4));
//!
//! // Chord voicings are rotated per inversion
//! let c_first = ChordFace::new(0, ChordType::Major, Inversion::First);
//! assert_eq!(c_first.pitches, [64, 67, 72]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest MIDI note dealt in pitch mode (C2).
pub const PITCH_MIN: u8 = 36;

/// Highest MIDI note dealt in pitch mode (C6).
pub const PITCH_MAX: u8 = 72;

/// Octaves the extended pitch generator may pick from.
pub const PITCH_OCTAVES: [i8; 5] = [2, 3, 4, 5, 6];

/// MIDI number of the root of a root-position chord built on C (C4).
pub const CHORD_BASE_MIDI: u8 = 60;

/// Number of distinct chord roots (pitch classes).
pub const CHORD_ROOT_COUNT: u8 = 12;

/// Points for an exact match.
pub const EXACT_MATCH_POINTS: u32 = 100;

/// Points for a match accepted only under extended rules.
pub const EXTENDED_MATCH_POINTS: u32 = 150;

/// Time bonus awarded per second left under the difficulty's target time.
pub const TIME_BONUS_PER_SECOND: f64 = 2.0;

/// Combo multiplier of the first match in a streak.
pub const COMBO_BASE_MULTIPLIER: f64 = 1.0;

/// Multiplier added for every consecutive match after the first.
pub const COMBO_INCREMENT_PER_COMBO: f64 = 0.5;

/// Entries retained per ranking category.
pub const MAX_RANKINGS_PER_CATEGORY: usize = 100;

/// Storage key of the persisted ranking collection.
pub const RANKINGS_STORAGE_KEY: &str = "@melody_memory/rankings";

/// Which kind of card a deck is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Pitch,
    Chord,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pitch" => Some(GameMode::Pitch),
            "chord" => Some(GameMode::Chord),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Pitch => "pitch",
            GameMode::Chord => "chord",
        }
    }
}

/// Deck size and target time selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Static configuration for this difficulty.
    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                card_count: 8,
                pair_count: 4,
                grid: GridLayout { rows: 2, cols: 4 },
                target_time_secs: 60,
            },
            Difficulty::Normal => DifficultyConfig {
                card_count: 16,
                pair_count: 8,
                grid: GridLayout { rows: 4, cols: 4 },
                target_time_secs: 120,
            },
            Difficulty::Hard => DifficultyConfig {
                card_count: 24,
                pair_count: 12,
                grid: GridLayout { rows: 4, cols: 6 },
                target_time_secs: 180,
            },
        }
    }
}

/// Grid shape a front end lays the deck out in (display-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: u8,
    pub cols: u8,
}

/// Per-difficulty deck and timing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyConfig {
    pub card_count: usize,
    pub pair_count: usize,
    pub grid: GridLayout,
    pub target_time_secs: u32,
}

/// Note naming scheme used by front ends (display-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    Doremi,
    Abc,
}

impl Notation {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "doremi" => Some(Notation::Doremi),
            "abc" => Some(Notation::Abc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Notation::Doremi => "doremi",
            Notation::Abc => "abc",
        }
    }
}

/// Triad quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordType {
    Major,
    Minor,
}

impl ChordType {
    pub const ALL: [ChordType; 2] = [ChordType::Major, ChordType::Minor];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "major" | "maj" => Some(ChordType::Major),
            "minor" | "min" => Some(ChordType::Minor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChordType::Major => "major",
            ChordType::Minor => "minor",
        }
    }

    /// Semitone offsets of root, third and fifth.
    pub fn intervals(&self) -> [u8; 3] {
        match self {
            ChordType::Major => [0, 4, 7],
            ChordType::Minor => [0, 3, 7],
        }
    }
}

/// Chord inversion: how many times the lowest tone was moved up an octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inversion {
    Root,
    First,
    Second,
}

impl Inversion {
    pub const ALL: [Inversion; 3] = [Inversion::Root, Inversion::First, Inversion::Second];

    pub fn index(&self) -> u8 {
        match self {
            Inversion::Root => 0,
            Inversion::First => 1,
            Inversion::Second => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Inversion::Root),
            1 => Some(Inversion::First),
            2 => Some(Inversion::Second),
            _ => None,
        }
    }
}

impl Serialize for Inversion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for Inversion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = u8::deserialize(deserializer)?;
        Inversion::from_index(v).ok_or_else(|| serde::de::Error::custom("inversion must be 0, 1 or 2"))
    }
}

/// Unique identity of a single card instance.
///
/// Two cards of a pair carry the same musical content but distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub Uuid);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single note, identified by its MIDI number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchFace {
    pub pitch: u8,
    pub pitch_class: u8,
    pub octave: i8,
}

impl PitchFace {
    /// Build a face from a MIDI note (`pitch_class = pitch % 12`, `octave = pitch / 12 - 1`).
    pub fn from_midi(pitch: u8) -> Self {
        Self {
            pitch,
            pitch_class: pitch % 12,
            octave: (pitch / 12) as i8 - 1,
        }
    }
}

/// A triad voiced above C4 in the requested inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordFace {
    pub root: u8,
    #[serde(rename = "type")]
    pub chord_type: ChordType,
    pub inversion: Inversion,
    pub pitches: [u8; 3],
}

impl ChordFace {
    /// Build a face, deriving `pitches` from root, type and inversion.
    ///
    /// Each inversion step moves the lowest tone up by 12 semitones.
    pub fn new(root: u8, chord_type: ChordType, inversion: Inversion) -> Self {
        let root_midi = CHORD_BASE_MIDI + root % CHORD_ROOT_COUNT;
        let mut pitches = chord_type.intervals().map(|i| root_midi + i);
        for _ in 0..inversion.index() {
            pitches.rotate_left(1);
            pitches[2] += 12;
        }

        Self {
            root: root % CHORD_ROOT_COUNT,
            chord_type,
            inversion,
            pitches,
        }
    }
}

/// Musical content of a card; `mode` is the serialized discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CardFace {
    Pitch(PitchFace),
    Chord(ChordFace),
}

impl CardFace {
    pub fn mode(&self) -> GameMode {
        match self {
            CardFace::Pitch(_) => GameMode::Pitch,
            CardFace::Chord(_) => GameMode::Chord,
        }
    }

    /// MIDI notes sounded when the card is revealed.
    pub fn midi_notes(&self) -> &[u8] {
        match self {
            CardFace::Pitch(p) => std::slice::from_ref(&p.pitch),
            CardFace::Chord(c) => &c.pitches,
        }
    }
}

/// A card on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    #[serde(flatten)]
    pub face: CardFace,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    pub fn new(id: CardId, face: CardFace) -> Self {
        Self {
            id,
            face,
            is_flipped: false,
            is_matched: false,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.face.mode()
    }
}

/// Per-session settings chosen before a game starts.
///
/// Only `mode`, `difficulty`, `is_extended_rules` and `player_count` affect game logic;
/// the rest is carried for front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub notation: Notation,
    pub show_octave: bool,
    pub is_blind_mode: bool,
    pub is_extended_rules: bool,
    pub player_count: u8,
}

impl GameConfig {
    pub fn is_two_player(&self) -> bool {
        self.player_count == 2
    }

    /// Ranking category this configuration plays in.
    pub fn category(&self) -> RankingCategory {
        RankingCategory {
            mode: self.mode,
            difficulty: self.difficulty,
            is_extended_rules: self.is_extended_rules,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Pitch,
            difficulty: Difficulty::Normal,
            notation: Notation::Doremi,
            show_octave: true,
            is_blind_mode: false,
            is_extended_rules: false,
            player_count: 1,
        }
    }
}

/// Player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The opposing slot.
    pub fn other(&self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

impl Serialize for PlayerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            _ => Err(serde::de::Error::custom("player must be 1 or 2")),
        }
    }
}

/// Running tally for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub score: u32,
    pub matched_pairs: u32,
    pub attempts: u32,
    pub combo_count: u32,
}

/// Both player slots. Slot two is tracked even in single-player games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Players {
    pub player1: PlayerState,
    pub player2: PlayerState,
}

impl Players {
    pub fn get(&self, id: PlayerId) -> &PlayerState {
        match id {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    pub fn get_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        match id {
            PlayerId::One => &mut self.player1,
            PlayerId::Two => &mut self.player2,
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.player1.attempts + self.player2.attempts
    }
}

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Finished,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::Finished => "finished",
        }
    }
}

/// Which rule accepted a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Extended,
}

/// Verdict of the match validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub is_match: bool,
    pub match_type: Option<MatchType>,
    pub points: u32,
}

impl MatchResult {
    pub const NO_MATCH: MatchResult = MatchResult {
        is_match: false,
        match_type: None,
        points: 0,
    };

    pub const EXACT: MatchResult = MatchResult {
        is_match: true,
        match_type: Some(MatchType::Exact),
        points: EXACT_MATCH_POINTS,
    };

    pub const EXTENDED: MatchResult = MatchResult {
        is_match: true,
        match_type: Some(MatchType::Extended),
        points: EXTENDED_MATCH_POINTS,
    };
}

/// Outcome of a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Player(PlayerId),
    Tie,
}

impl Serialize for Winner {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Winner::Player(id) => id.serialize(serializer),
            Winner::Tie => serializer.serialize_str("tie"),
        }
    }
}

/// Actions accepted by the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Replace the configuration (no session reset)
    SetConfig(GameConfig),
    /// Deal a fresh deck and start playing
    Start,
    /// Turn a face-down card face up
    Flip(CardId),
    /// Judge the two face-up cards
    ResolveMatch,
    /// Turn unmatched face-up cards back down
    ResetFlipped,
    Pause,
    Resume,
    /// Force-finish the session
    End,
    /// Return to idle, keeping only the configuration
    Reset,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::SetConfig(_) => "setConfig",
            GameAction::Start => "start",
            GameAction::Flip(_) => "flip",
            GameAction::ResolveMatch => "resolveMatch",
            GameAction::ResetFlipped => "resetFlipped",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::End => "end",
            GameAction::Reset => "reset",
        }
    }
}

/// Leaderboard scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingCategory {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub is_extended_rules: bool,
}

impl RankingCategory {
    pub fn new(mode: GameMode, difficulty: Difficulty, is_extended_rules: bool) -> Self {
        Self {
            mode,
            difficulty,
            is_extended_rules,
        }
    }

    /// Stable grouping key, e.g. `pitch-normal-false`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RankingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.mode.as_str(),
            self.difficulty.as_str(),
            self.is_extended_rules
        )
    }
}

/// A persisted leaderboard row. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: String,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub is_extended_rules: bool,
    pub score: u32,
    /// Seconds from start to finish
    pub clear_time: f64,
    /// 0..=100
    pub accuracy: f64,
    /// Unix milliseconds
    pub date: i64,
}

impl RankingEntry {
    pub fn category(&self) -> RankingCategory {
        RankingCategory::new(self.mode, self.difficulty, self.is_extended_rules)
    }
}

/// A result to record; the ledger assigns `id` and `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRankingEntry {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub is_extended_rules: bool,
    pub score: u32,
    pub clear_time: f64,
    pub accuracy: f64,
}

impl NewRankingEntry {
    pub fn category(&self) -> RankingCategory {
        RankingCategory::new(self.mode, self.difficulty, self.is_extended_rules)
    }

    pub fn into_entry(self, id: String, date: i64) -> RankingEntry {
        RankingEntry {
            id,
            mode: self.mode,
            difficulty: self.difficulty,
            is_extended_rules: self.is_extended_rules,
            score: self.score,
            clear_time: self.clear_time,
            accuracy: self.accuracy,
            date,
        }
    }
}
