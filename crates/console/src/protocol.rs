//! Protocol module - line commands in, JSON messages out
//!
//! Commands are whitespace-separated words, one per line:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `config key=value ...` | Change settings (`mode`, `difficulty`, `notation`, `octave`, `blind`, `extended`, `players`) |
//! | `start` | Deal a new deck |
//! | `flip <index>` | Turn up the card at a board index |
//! | `resolve` | Judge two face-up cards |
//! | `hide` | Turn unmatched face-up cards back down |
//! | `pause` / `resume` / `end` / `reset` | Session lifecycle |
//! | `show` | Print the board |
//! | `rankings [limit]` | Leaderboard of the configured category |
//! | `quit` | Stop reading input |
//!
//! Every response is one JSON object per line, tagged by `"type"`.

use serde::Serialize;
use thiserror::Error;

use crate::core::format::{format_accuracy, format_card, format_time};
use crate::core::{GameResult, GameSnapshot, MatchOutcome};
use crate::types::{
    CardFace, CardId, Difficulty, GameConfig, GameMode, GameStatus, Notation, PlayerId, Players,
    RankingEntry,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("invalid {name}: `{value}`")]
    InvalidValue { name: String, value: String },
    #[error("unknown setting `{0}`")]
    UnknownSetting(String),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Config(Vec<(String, String)>),
    Start,
    Flip(usize),
    Resolve,
    Hide,
    Pause,
    Resume,
    End,
    Reset,
    Show,
    Rankings(Option<usize>),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Empty);
        };

        match head.to_ascii_lowercase().as_str() {
            "config" | "set" => {
                let mut pairs = Vec::new();
                for word in words {
                    let (key, value) = word.split_once('=').ok_or_else(|| {
                        ParseError::InvalidValue {
                            name: "setting".to_string(),
                            value: word.to_string(),
                        }
                    })?;
                    pairs.push((key.to_string(), value.to_string()));
                }
                Ok(Command::Config(pairs))
            }
            "start" | "restart" => Ok(Command::Start),
            "flip" | "f" => {
                let arg = words.next().ok_or(ParseError::MissingArgument {
                    command: "flip",
                    argument: "a card index",
                })?;
                arg.parse()
                    .map(Command::Flip)
                    .map_err(|_| ParseError::InvalidValue {
                        name: "card index".to_string(),
                        value: arg.to_string(),
                    })
            }
            "resolve" => Ok(Command::Resolve),
            "hide" => Ok(Command::Hide),
            "pause" => Ok(Command::Pause),
            "resume" => Ok(Command::Resume),
            "end" => Ok(Command::End),
            "reset" => Ok(Command::Reset),
            "show" | "board" => Ok(Command::Show),
            "rankings" | "ranking" => match words.next() {
                None => Ok(Command::Rankings(None)),
                Some(arg) => arg
                    .parse()
                    .map(|n| Command::Rankings(Some(n)))
                    .map_err(|_| ParseError::InvalidValue {
                        name: "limit".to_string(),
                        value: arg.to_string(),
                    }),
            },
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ParseError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

fn invalid(name: &str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Apply `key=value` settings on top of `base`. Nothing is applied if any pair is invalid.
pub fn apply_settings(
    base: GameConfig,
    pairs: &[(String, String)],
) -> Result<GameConfig, ParseError> {
    let mut config = base;
    for (key, value) in pairs {
        let key = key.as_str();
        let value = value.as_str();
        match key.to_ascii_lowercase().as_str() {
            "mode" => config.mode = GameMode::from_str(value).ok_or_else(|| invalid(key, value))?,
            "difficulty" => {
                config.difficulty =
                    Difficulty::from_str(value).ok_or_else(|| invalid(key, value))?
            }
            "notation" => {
                config.notation = Notation::from_str(value).ok_or_else(|| invalid(key, value))?
            }
            "octave" | "showoctave" => config.show_octave = parse_bool(key, value)?,
            "blind" | "isblindmode" => config.is_blind_mode = parse_bool(key, value)?,
            "extended" | "isextendedrules" => config.is_extended_rules = parse_bool(key, value)?,
            "players" | "playercount" => {
                config.player_count = match value {
                    "1" => 1,
                    "2" => 2,
                    _ => return Err(invalid(key, value)),
                }
            }
            _ => return Err(ParseError::UnknownSetting(key.to_string())),
        }
    }
    Ok(config)
}

/// One card as shown on the board
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub index: usize,
    pub id: CardId,
    pub is_flipped: bool,
    pub is_matched: bool,
    /// Present only while the card is face up (matched cards only in blind mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub status: GameStatus,
    pub config: GameConfig,
    pub current_player: PlayerId,
    pub players: Players,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub elapsed: String,
    pub cards: Vec<CardView>,
}

impl BoardView {
    pub fn from_snapshot(snap: &GameSnapshot, elapsed_secs: f64) -> Self {
        let config = snap.config;
        let cards = snap
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let visible = card.is_matched || (card.is_flipped && !config.is_blind_mode);
                let face_up = card.is_flipped || card.is_matched;
                CardView {
                    index,
                    id: card.id,
                    is_flipped: card.is_flipped,
                    is_matched: card.is_matched,
                    label: visible
                        .then(|| format_card(card, config.notation, config.show_octave)),
                    notes: face_up.then(|| face_notes(&card.face)),
                }
            })
            .collect();

        Self {
            status: snap.status,
            config,
            current_player: snap.current_player,
            players: snap.players,
            matched_pairs: snap.matched_pairs,
            total_pairs: snap.total_pairs,
            elapsed: format_time(elapsed_secs),
            cards,
        }
    }
}

fn face_notes(face: &CardFace) -> Vec<u8> {
    face.midi_notes().to_vec()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    #[serde(flatten)]
    pub outcome: MatchOutcome,
    /// Board positions of the judged cards, `null` if a card is no longer dealt.
    pub indices: [Option<usize>; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    #[serde(flatten)]
    pub result: GameResult,
    pub clear_time: String,
    pub accuracy_label: String,
    /// Single player only; checked before the score was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_high_score: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<RankingEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top: Vec<RankingEntry>,
}

impl ResultView {
    pub fn new(result: GameResult) -> Self {
        Self {
            clear_time: format_time(result.clear_time_secs),
            accuracy_label: format_accuracy(result.accuracy),
            result,
            is_high_score: None,
            rank: None,
            entry: None,
            top: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingsView {
    pub category: String,
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub message: String,
}

/// Messages written to stdout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Response {
    Snapshot(BoardView),
    Match(MatchView),
    Result(ResultView),
    Rankings(RankingsView),
    Error(ErrorView),
    Bye,
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(ErrorView {
            message: message.into(),
        })
    }

    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
