//! Headless console front end
//!
//! Reads line commands from stdin, drives one game session, and writes one JSON
//! message per line to stdout. Logs go to stderr so the output stays machine-readable.
//!
//! - [`config`]: environment configuration
//! - [`protocol`]: command parsing and response messages
//! - [`session`]: the driver around [`GameState`](crate::core::GameState)
//! - [`audio`]: audio cue service injected into the driver

pub mod audio;
pub mod config;
pub mod protocol;
pub mod session;

pub use melody_memory_core as core;
pub use melody_memory_ranking as ranking;
pub use melody_memory_types as types;

pub use audio::{AudioOutput, LogAudio, SilentAudio};
pub use config::{AudioMode, ConsoleConfig};
pub use protocol::{Command, Response};
pub use session::ConsoleSession;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use ranking::{FileStore, KeyValueStore, RankingLedger};

impl AudioOutput for Box<dyn AudioOutput> {
    fn play_note(&mut self, midi: u8) {
        (**self).play_note(midi)
    }

    fn play_chord(&mut self, midi_notes: &[u8]) {
        (**self).play_chord(midi_notes)
    }

    fn play_success(&mut self) {
        (**self).play_success()
    }

    fn play_fail(&mut self) {
        (**self).play_fail()
    }

    fn play_fanfare(&mut self) {
        (**self).play_fanfare()
    }
}

/// Feed `reader` lines to the session until `quit` or end of input.
pub async fn run<R, W, S, A>(
    session: &mut ConsoleSession<S, A>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: KeyValueStore,
    A: AudioOutput,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        for response in session.handle_line(&line).await {
            let mut out = response.to_line()?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
        }
        writer.flush().await?;
        if session.is_done() {
            break;
        }
    }
    Ok(())
}

/// Run a console session on stdin/stdout with file-backed rankings.
pub async fn run_stdio(config: ConsoleConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let ledger = Arc::new(RankingLedger::new(FileStore::new(&config.data_dir)));
    let audio: Box<dyn AudioOutput> = match config.audio {
        AudioMode::Log => Box::new(LogAudio::new()),
        AudioMode::Off => Box::new(SilentAudio),
    };

    log::info!(
        "console session: seed {seed}, rankings in {}",
        config.data_dir.display()
    );
    let mut session = ConsoleSession::new(seed, ledger, audio, config.ranking_limit);
    run(
        &mut session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
