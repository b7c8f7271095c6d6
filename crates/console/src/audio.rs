//! Audio cue service
//!
//! The session core never plays sound; the console driver owns one
//! [`AudioOutput`] for the process and calls it when cards are revealed and
//! matches resolved.

use crate::core::format::note_name;
use crate::types::Notation;

/// Sink for game sound cues.
pub trait AudioOutput: Send {
    fn play_note(&mut self, midi: u8);

    /// Notes sound together.
    fn play_chord(&mut self, midi_notes: &[u8]) {
        for &note in midi_notes {
            self.play_note(note);
        }
    }

    fn play_success(&mut self);
    fn play_fail(&mut self);
    /// Board cleared.
    fn play_fanfare(&mut self);
}

/// Sample file key of a MIDI note: `60` is `C4`, `61` is `Cs4`.
pub fn midi_sample_key(midi: u8) -> String {
    let name = note_name(midi % 12, Notation::Abc).replace('#', "s");
    let octave = (midi / 12) as i16 - 1;
    format!("{name}{octave}")
}

/// Equal-tempered frequency in Hz, A4 (69) = 440.
pub fn midi_frequency(midi: u8) -> f64 {
    440.0 * 2f64.powf((midi as f64 - 69.0) / 12.0)
}

/// Emits each cue as an `info!` record.
#[derive(Debug, Default)]
pub struct LogAudio {
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues emitted so far.
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioOutput for LogAudio {
    fn play_note(&mut self, midi: u8) {
        self.played += 1;
        log::info!(
            "audio: note {} ({:.2} Hz)",
            midi_sample_key(midi),
            midi_frequency(midi)
        );
    }

    fn play_success(&mut self) {
        self.played += 1;
        log::info!("audio: success");
    }

    fn play_fail(&mut self) {
        self.played += 1;
        log::info!("audio: fail");
    }

    fn play_fanfare(&mut self) {
        self.played += 1;
        log::info!("audio: fanfare");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioOutput for SilentAudio {
    fn play_note(&mut self, _midi: u8) {}
    fn play_success(&mut self) {}
    fn play_fail(&mut self) {}
    fn play_fanfare(&mut self) {}
}
