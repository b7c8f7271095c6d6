//! Console session driver
//!
//! Plays the part of the UI around one [`GameState`]: it hides mismatched cards
//! before the next flip, resolves as soon as two cards are up, plays audio
//! cues, and records single-player results in the ranking ledger.

use std::sync::Arc;

use crate::audio::AudioOutput;
use crate::core::{GameResult, GameState};
use crate::protocol::{
    apply_settings, BoardView, Command, MatchView, RankingsView, Response, ResultView,
};
use crate::ranking::{KeyValueStore, RankingLedger};
use crate::types::{CardFace, GameConfig, GameStatus, NewRankingEntry};

pub struct ConsoleSession<S, A> {
    state: GameState,
    ledger: Arc<RankingLedger<S>>,
    audio: A,
    ranking_limit: usize,
    done: bool,
}

impl<S: KeyValueStore, A: AudioOutput> ConsoleSession<S, A> {
    pub fn new(seed: u32, ledger: Arc<RankingLedger<S>>, audio: A, ranking_limit: usize) -> Self {
        Self {
            state: GameState::new(GameConfig::default(), seed),
            ledger,
            audio,
            ranking_limit,
            done: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Whether `quit` was received.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Parse and run one input line. Blank lines produce no output.
    pub async fn handle_line(&mut self, line: &str) -> Vec<Response> {
        if line.trim().is_empty() {
            return Vec::new();
        }
        match Command::parse(line) {
            Ok(command) => self.handle(command).await,
            Err(e) => {
                log::warn!("rejected command {:?}: {e}", line.trim());
                vec![Response::error(e.to_string())]
            }
        }
    }

    pub async fn handle(&mut self, command: Command) -> Vec<Response> {
        let mut out = Vec::new();
        match command {
            Command::Config(pairs) => match apply_settings(*self.state.config(), &pairs) {
                Ok(config) => {
                    self.state.set_config(config);
                    out.push(self.board());
                }
                Err(e) => out.push(Response::error(e.to_string())),
            },
            Command::Start => match self.state.start() {
                Ok(()) => out.push(self.board()),
                Err(e) => out.push(Response::error(e.to_string())),
            },
            Command::Flip(index) => self.flip(index, &mut out).await,
            Command::Resolve => {
                if !self.resolve(&mut out).await {
                    out.push(Response::error("two face-up cards are needed to resolve"));
                }
                out.push(self.board());
            }
            Command::Hide => {
                if self.state.reset_flipped() {
                    out.push(self.board());
                } else {
                    out.push(Response::error("no face-up cards to hide"));
                }
            }
            Command::Pause => self.transition(GameState::pause, "pause", &mut out),
            Command::Resume => self.transition(GameState::resume, "resume", &mut out),
            Command::End => {
                if self.state.status() == GameStatus::Idle {
                    out.push(Response::error("no game in progress to end"));
                } else if self.state.end() {
                    self.finish(&mut out).await;
                    out.push(self.board());
                } else {
                    out.push(Response::error("the session has already finished"));
                }
            }
            Command::Reset => {
                self.state.reset();
                out.push(self.board());
            }
            Command::Show => out.push(self.board()),
            Command::Rankings(limit) => {
                let limit = limit.unwrap_or(self.ranking_limit);
                out.push(self.rankings(limit).await);
            }
            Command::Quit => {
                self.done = true;
                out.push(Response::Bye);
            }
        }
        out
    }

    fn transition(
        &mut self,
        action: fn(&mut GameState) -> bool,
        name: &str,
        out: &mut Vec<Response>,
    ) {
        if action(&mut self.state) {
            out.push(self.board());
        } else {
            out.push(Response::error(format!(
                "cannot {name} while {}",
                self.state.status().as_str()
            )));
        }
    }

    async fn flip(&mut self, index: usize, out: &mut Vec<Response>) {
        let status = self.state.status();
        if status != GameStatus::Playing {
            out.push(Response::error(format!(
                "cards cannot be flipped while {}",
                status.as_str()
            )));
            return;
        }

        // Two cards still up means the last pair missed; turn them back first.
        if self.state.flipped_ids().len() == 2 {
            self.state.reset_flipped();
        }

        let Some(card) = self.state.card_at(index).copied() else {
            out.push(Response::error(format!(
                "no card at index {index} ({} on the board)",
                self.state.cards().len()
            )));
            return;
        };
        if !self.state.flip(card.id) {
            out.push(Response::error(format!("card {index} cannot be flipped")));
            return;
        }

        match &card.face {
            CardFace::Pitch(p) => self.audio.play_note(p.pitch),
            CardFace::Chord(c) => self.audio.play_chord(&c.pitches),
        }

        if self.state.flipped_ids().len() == 2 {
            self.resolve(out).await;
        }
        out.push(self.board());
    }

    async fn resolve(&mut self, out: &mut Vec<Response>) -> bool {
        let Some(outcome) = self.state.resolve_match() else {
            return false;
        };

        if outcome.result.is_match {
            self.audio.play_success();
        } else {
            self.audio.play_fail();
        }

        let cards = self.state.cards();
        let indices = outcome.cards.map(|id| cards.iter().position(|c| c.id == id));
        out.push(Response::Match(MatchView { outcome, indices }));

        if outcome.finished {
            self.finish(out).await;
        }
        true
    }

    async fn finish(&mut self, out: &mut Vec<Response>) {
        self.audio.play_fanfare();
        let result = GameResult::from_state(&self.state);
        let mut view = ResultView::new(result);
        let config = *self.state.config();

        // Only a session that actually started has a result worth ranking.
        if !config.is_two_player() && self.state.start_time().is_some() {
            let category = config.category();
            view.is_high_score = Some(self.ledger.is_high_score(result.final_score, category).await);

            let entry = self
                .ledger
                .record(NewRankingEntry {
                    mode: config.mode,
                    difficulty: config.difficulty,
                    is_extended_rules: config.is_extended_rules,
                    score: result.final_score,
                    clear_time: result.clear_time_secs,
                    accuracy: result.accuracy,
                })
                .await;
            view.rank = Some(self.ledger.rank(entry.score, category).await);
            view.entry = Some(entry);
            view.top = self.ledger.query(category, self.ranking_limit).await;
        }

        log::info!(
            "game finished: score {} ({} pairs, {})",
            result.final_score,
            self.state.matched_pairs(),
            view.clear_time
        );
        out.push(Response::Result(view));
    }

    async fn rankings(&self, limit: usize) -> Response {
        let category = self.state.config().category();
        Response::Rankings(RankingsView {
            category: category.key(),
            entries: self.ledger.query(category, limit).await,
        })
    }

    fn board(&self) -> Response {
        let elapsed = self.state.elapsed_secs_at(crate::core::now_ms());
        Response::Snapshot(BoardView::from_snapshot(&self.state.snapshot(), elapsed))
    }
}
