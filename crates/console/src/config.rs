//! Console configuration from environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MELODY_MEMORY_DATA_DIR` | `.melody-memory` | Directory of the ranking files |
//! | `MELODY_MEMORY_SEED` | random | Deck RNG seed (u32) |
//! | `MELODY_MEMORY_AUDIO` | `log` | `log` or `off` |
//! | `MELODY_MEMORY_RANKING_LIMIT` | `5` | Rows in ranking previews |

use std::path::PathBuf;

/// How audio cues are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioMode {
    Log,
    Off,
}

impl AudioMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "on" => Some(AudioMode::Log),
            "off" | "none" | "silent" => Some(AudioMode::Off),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub data_dir: PathBuf,
    /// `None` draws a random seed at startup.
    pub seed: Option<u32>,
    pub audio: AudioMode,
    pub ranking_limit: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".melody-memory"),
            seed: None,
            audio: AudioMode::Log,
            ranking_limit: 5,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let data_dir = var("MELODY_MEMORY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let seed = var("MELODY_MEMORY_SEED").and_then(|s| s.parse().ok());
        let audio = var("MELODY_MEMORY_AUDIO")
            .and_then(|s| AudioMode::from_str(&s))
            .unwrap_or(defaults.audio);
        let ranking_limit = var("MELODY_MEMORY_RANKING_LIMIT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.ranking_limit);

        Self {
            data_dir,
            seed,
            audio,
            ranking_limit,
        }
    }
}
