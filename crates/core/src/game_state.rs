//! Game state module - the authoritative session state machine
//!
//! Ties together the deck generator, match validator and combo scoring. All
//! transitions go through `&mut self`, so a session has exactly one writer.
//!
//! Lifecycle: `idle` → `playing` on [`GameState::start`] → `paused`/`playing` any
//! number of times → `finished` once every pair is matched (or on
//! [`GameState::end`]). [`GameState::reset`] returns to `idle` keeping only the
//! configuration.
//!
//! Misuse from the front end (resolving with fewer than two face-up cards, flipping a
//! matched card, ...) is ignored and reported as "nothing changed" rather than an error.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::deck;
use crate::error::DeckResult;
use crate::matcher::validate;
use crate::rng::SimpleRng;
use crate::scoring::award_points;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Result of judging the two face-up cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub cards: [CardId; 2],
    /// Player whose turn it was when the match was resolved.
    pub player: PlayerId,
    /// Player to move next (differs from `player` after a two-player miss).
    pub next_player: PlayerId,
    /// Acting player's streak after this attempt.
    pub combo: u32,
    pub multiplier: f64,
    pub points_awarded: u32,
    pub finished: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    cards: Vec<Card>,
    current_player: PlayerId,
    players: Players,
    /// Face-up cards awaiting resolution, in flip order.
    flipped: ArrayVec<CardId, 2>,
    matched_pairs: u32,
    total_pairs: u32,
    status: GameStatus,
    /// Unix milliseconds.
    start_time: Option<i64>,
    end_time: Option<i64>,
    rng: SimpleRng,
    seed: u32,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    /// Last resolution (consumed by observers).
    last_outcome: Option<MatchOutcome>,
}

impl GameState {
    /// Create an idle session with the given configuration and RNG seed
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self {
            config,
            cards: Vec::new(),
            current_player: PlayerId::One,
            players: Players::default(),
            flipped: ArrayVec::new(),
            matched_pairs: 0,
            total_pairs: 0,
            status: GameStatus::Idle,
            start_time: None,
            end_time: None,
            rng: SimpleRng::new(seed),
            seed,
            session_id: 0,
            last_outcome: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        self.players.get(id)
    }

    /// Ids of the face-up, unresolved cards in flip order.
    pub fn flipped_ids(&self) -> &[CardId] {
        &self.flipped
    }

    /// Face-up, unresolved cards in flip order.
    pub fn flipped_cards(&self) -> ArrayVec<&Card, 2> {
        self.flipped.iter().filter_map(|&id| self.card(id)).collect()
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<i64> {
        self.end_time
    }

    /// Seconds since start; frozen at the end time once finished.
    pub fn elapsed_secs_at(&self, now_ms: i64) -> f64 {
        match self.start_time {
            Some(start) => (self.end_time.unwrap_or(now_ms) - start).max(0) as f64 / 1000.0,
            None => 0.0,
        }
    }

    /// Seed the session was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn last_outcome(&self) -> Option<&MatchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Take and clear the last resolution.
    pub fn take_last_outcome(&mut self) -> Option<MatchOutcome> {
        self.last_outcome.take()
    }

    /// Replace the configuration. Allowed in any status; the session is not reset.
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    /// Deal a fresh deck and start playing
    pub fn start(&mut self) -> DeckResult<()> {
        self.start_at(now_ms())
    }

    /// [`start`](Self::start) with an explicit clock.
    ///
    /// On error the state is left untouched.
    pub fn start_at(&mut self, now_ms: i64) -> DeckResult<()> {
        let cards = deck::generate(
            self.config.mode,
            self.config.difficulty,
            self.config.is_extended_rules,
            &mut self.rng,
        )?;

        self.total_pairs = (cards.len() / 2) as u32;
        self.cards = cards;
        self.players = Players::default();
        self.current_player = PlayerId::One;
        self.flipped.clear();
        self.matched_pairs = 0;
        self.start_time = Some(now_ms);
        self.end_time = None;
        self.status = GameStatus::Playing;
        self.session_id = self.session_id.wrapping_add(1);
        self.last_outcome = None;

        log::debug!(
            "session {} started: {} {} extended={} players={} ({} pairs)",
            self.session_id,
            self.config.mode.as_str(),
            self.config.difficulty.as_str(),
            self.config.is_extended_rules,
            self.config.player_count,
            self.total_pairs
        );
        Ok(())
    }

    /// Turn a card face up
    ///
    /// Ignored for unknown, matched or already face-up cards, and when two cards are
    /// already face up. Status is not checked here; drivers gate flips on `Playing`.
    pub fn flip(&mut self, id: CardId) -> bool {
        if self.flipped.is_full() {
            return false;
        }

        let Some(card) = self.cards.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if card.is_matched || card.is_flipped {
            return false;
        }

        card.is_flipped = true;
        self.flipped.push(id);
        true
    }

    /// Judge the two face-up cards
    pub fn resolve_match(&mut self) -> Option<MatchOutcome> {
        self.resolve_match_at(now_ms())
    }

    /// [`resolve_match`](Self::resolve_match) with an explicit clock.
    ///
    /// Returns `None` (and changes nothing) unless exactly two cards are face up.
    pub fn resolve_match_at(&mut self, now_ms: i64) -> Option<MatchOutcome> {
        if self.flipped.len() != 2 {
            return None;
        }
        let ids = [self.flipped[0], self.flipped[1]];
        let first = *self.card(ids[0])?;
        let second = *self.card(ids[1])?;

        let result = validate(&first, &second, &self.config);
        let acting = self.current_player;

        let outcome = if result.is_match {
            for card in self.cards.iter_mut().filter(|c| ids.contains(&c.id)) {
                card.is_matched = true;
            }
            self.flipped.clear();
            self.matched_pairs += 1;

            let player = self.players.get_mut(acting);
            player.attempts += 1;
            player.matched_pairs += 1;
            player.combo_count += 1;
            let award = award_points(result.points, player.combo_count);
            player.score += award.total;
            let combo = player.combo_count;

            let finished = self.matched_pairs >= self.total_pairs;
            if finished {
                self.finish(now_ms);
            }

            MatchOutcome {
                result,
                cards: ids,
                player: acting,
                next_player: acting,
                combo,
                multiplier: award.multiplier,
                points_awarded: award.total,
                finished,
            }
        } else {
            let player = self.players.get_mut(acting);
            player.attempts += 1;
            player.combo_count = 0;

            // Cards stay face up until the front end calls `reset_flipped`.
            if self.config.is_two_player() {
                self.current_player = acting.other();
            }

            MatchOutcome {
                result,
                cards: ids,
                player: acting,
                next_player: self.current_player,
                combo: 0,
                multiplier: 0.0,
                points_awarded: 0,
                finished: false,
            }
        };

        log::debug!(
            "session {} player {} {:?}: +{} (combo {}), {}/{} pairs",
            self.session_id,
            acting.number(),
            outcome.result.match_type,
            outcome.points_awarded,
            outcome.combo,
            self.matched_pairs,
            self.total_pairs
        );
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    /// Turn unmatched face-up cards back down and clear the face-up list
    pub fn reset_flipped(&mut self) -> bool {
        if self.flipped.is_empty() {
            return false;
        }
        let flipped = std::mem::take(&mut self.flipped);
        for card in self
            .cards
            .iter_mut()
            .filter(|c| flipped.contains(&c.id) && !c.is_matched)
        {
            card.is_flipped = false;
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        true
    }

    /// Force-finish the session
    pub fn end(&mut self) -> bool {
        self.end_at(now_ms())
    }

    /// [`end`](Self::end) with an explicit clock. A finished session keeps its end time.
    pub fn end_at(&mut self, now_ms: i64) -> bool {
        if self.is_finished() {
            return false;
        }
        self.finish(now_ms);
        true
    }

    fn finish(&mut self, now_ms: i64) {
        if self.status == GameStatus::Finished {
            return;
        }
        self.status = GameStatus::Finished;
        self.end_time = Some(now_ms);
        log::debug!(
            "session {} finished after {:.1}s",
            self.session_id,
            self.elapsed_secs_at(now_ms)
        );
    }

    /// Return to idle, keeping only the configuration (and the RNG stream)
    pub fn reset(&mut self) {
        let config = self.config;
        let rng = self.rng.clone();
        let seed = self.seed;
        let session_id = self.session_id;

        *self = Self::new(config, seed);
        self.rng = rng;
        self.session_id = session_id;
    }

    /// Apply a game action
    ///
    /// Returns whether the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::SetConfig(config) => {
                self.set_config(config);
                true
            }
            GameAction::Start => match self.start() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("cannot start session: {err}");
                    false
                }
            },
            GameAction::Flip(id) => self.flip(id),
            GameAction::ResolveMatch => self.resolve_match().is_some(),
            GameAction::ResetFlipped => self.reset_flipped(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::End => self.end(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.session_id = self.session_id;
        out.seed = self.seed;
        out.status = self.status;
        out.config = self.config;
        out.cards.clear();
        out.cards.extend_from_slice(&self.cards);
        out.flipped.clear();
        out.flipped.extend_from_slice(&self.flipped);
        out.current_player = self.current_player;
        out.players = self.players;
        out.matched_pairs = self.matched_pairs;
        out.total_pairs = self.total_pairs;
        out.start_time = self.start_time;
        out.end_time = self.end_time;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

/// Wall clock in unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::validate_with_rules;

    const T0: i64 = 1_700_000_000_000;

    fn config(mode: GameMode, difficulty: Difficulty, extended: bool, players: u8) -> GameConfig {
        GameConfig {
            mode,
            difficulty,
            is_extended_rules: extended,
            player_count: players,
            ..GameConfig::default()
        }
    }

    fn started(config: GameConfig) -> GameState {
        let mut state = GameState::new(config, 12345);
        state.start_at(T0).unwrap();
        state
    }

    /// Ids of two cards that form an exact pair.
    fn exact_pair(state: &GameState) -> (CardId, CardId) {
        let cards = state.cards();
        for (i, a) in cards.iter().enumerate() {
            if a.is_matched {
                continue;
            }
            for b in &cards[i + 1..] {
                if !b.is_matched && a.face == b.face {
                    return (a.id, b.id);
                }
            }
        }
        panic!("no unmatched exact pair left");
    }

    /// Ids of two cards that do not match under the session rules.
    fn mismatch(state: &GameState) -> (CardId, CardId) {
        let cards = state.cards();
        for (i, a) in cards.iter().enumerate() {
            for b in &cards[i + 1..] {
                if !a.is_matched
                    && !b.is_matched
                    && !validate_with_rules(a, b, state.config().is_extended_rules).is_match
                {
                    return (a.id, b.id);
                }
            }
        }
        panic!("no mismatching cards left");
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default(), 12345);
        assert_eq!(state.status(), GameStatus::Idle);
        assert!(state.cards().is_empty());
        assert_eq!(state.current_player(), PlayerId::One);
        assert_eq!(state.total_pairs(), 0);
        assert_eq!(state.start_time(), None);
        assert_eq!(state.session_id(), 0);
    }

    #[test]
    fn test_start_deals_and_resets() {
        let state = started(config(GameMode::Pitch, Difficulty::Easy, false, 1));
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.cards().len(), 8);
        assert_eq!(state.total_pairs(), 4);
        assert_eq!(state.start_time(), Some(T0));
        assert_eq!(state.end_time(), None);
        assert_eq!(state.session_id(), 1);
    }

    #[test]
    fn test_restart_deals_new_deck_and_clears_progress() {
        let mut state = started(config(GameMode::Chord, Difficulty::Normal, false, 2));
        let (a, b) = exact_pair(&state);
        state.flip(a);
        state.flip(b);
        state.resolve_match_at(T0 + 1000);
        let first_deck: Vec<CardId> = state.cards().iter().map(|c| c.id).collect();

        state.start_at(T0 + 5000).unwrap();
        assert_eq!(state.players(), &Players::default());
        assert_eq!(state.matched_pairs(), 0);
        assert_eq!(state.start_time(), Some(T0 + 5000));
        assert_eq!(state.session_id(), 2);
        let second_deck: Vec<CardId> = state.cards().iter().map(|c| c.id).collect();
        assert_ne!(first_deck, second_deck);
    }

    #[test]
    fn test_flip_guards() {
        let mut state = GameState::new(config(GameMode::Pitch, Difficulty::Easy, false, 1), 7);
        let stray = CardId(uuid::Uuid::nil());
        assert!(!state.flip(stray), "unknown card on an empty board");

        state.start_at(T0).unwrap();
        let ids: Vec<CardId> = state.cards().iter().map(|c| c.id).collect();
        assert!(state.flip(ids[0]));
        assert!(!state.flip(ids[0]), "already face up");
        assert!(state.flip(ids[1]));
        assert!(!state.flip(ids[2]), "two cards already face up");
        assert_eq!(state.flipped_ids(), &[ids[0], ids[1]]);
        assert!(!state.flip(stray));
    }

    #[test]
    fn test_resolve_requires_two_cards() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Easy, false, 1));
        assert!(state.resolve_match_at(T0).is_none());

        let id = state.cards()[0].id;
        state.flip(id);
        assert!(state.resolve_match_at(T0).is_none());
        assert_eq!(state.player(PlayerId::One).attempts, 0);
    }

    #[test]
    fn test_match_scores_with_combo() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Easy, false, 1));

        let (a, b) = exact_pair(&state);
        state.flip(a);
        state.flip(b);
        let first = state.resolve_match_at(T0 + 1000).unwrap();
        assert!(first.result.is_match);
        assert_eq!(first.combo, 1);
        assert_eq!(first.points_awarded, 100);
        assert_eq!(state.matched_pairs(), 1);
        assert!(state.flipped_ids().is_empty());
        assert!(state.card(a).unwrap().is_matched);

        let (c, d) = exact_pair(&state);
        state.flip(c);
        state.flip(d);
        let second = state.resolve_match_at(T0 + 2000).unwrap();
        assert_eq!(second.combo, 2);
        assert_eq!(second.multiplier, 1.5);
        assert_eq!(second.points_awarded, 150);

        let p1 = state.player(PlayerId::One);
        assert_eq!(p1.score, 250);
        assert_eq!(p1.matched_pairs, 2);
        assert_eq!(p1.attempts, 2);
        assert_eq!(p1.combo_count, 2);
    }

    #[test]
    fn test_mismatch_resets_combo_and_keeps_cards_up() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Normal, false, 1));
        let (a, b) = exact_pair(&state);
        state.flip(a);
        state.flip(b);
        state.resolve_match_at(T0);

        let (x, y) = mismatch(&state);
        state.flip(x);
        state.flip(y);
        let outcome = state.resolve_match_at(T0).unwrap();
        assert!(!outcome.result.is_match);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(state.current_player(), PlayerId::One, "single player keeps the turn");
        assert_eq!(state.player(PlayerId::One).combo_count, 0);
        assert_eq!(state.player(PlayerId::One).attempts, 2);
        assert_eq!(state.flipped_ids().len(), 2);
        assert!(state.card(x).unwrap().is_flipped);

        assert!(state.reset_flipped());
        assert!(state.flipped_ids().is_empty());
        assert!(!state.card(x).unwrap().is_flipped);
        assert!(!state.card(y).unwrap().is_flipped);
        assert!(state.card(a).unwrap().is_flipped, "matched cards stay face up");
        assert!(!state.reset_flipped());
    }

    #[test]
    fn test_two_player_turns() {
        let mut state = started(config(GameMode::Chord, Difficulty::Normal, false, 2));

        let (x, y) = mismatch(&state);
        state.flip(x);
        state.flip(y);
        let miss = state.resolve_match_at(T0).unwrap();
        assert_eq!(miss.player, PlayerId::One);
        assert_eq!(miss.next_player, PlayerId::Two);
        assert_eq!(state.current_player(), PlayerId::Two);
        state.reset_flipped();

        let (a, b) = exact_pair(&state);
        state.flip(a);
        state.flip(b);
        let hit = state.resolve_match_at(T0).unwrap();
        assert_eq!(hit.player, PlayerId::Two);
        assert_eq!(state.current_player(), PlayerId::Two);
        assert_eq!(state.player(PlayerId::Two).score, 100);
        assert_eq!(state.player(PlayerId::One).attempts, 1);
    }

    #[test]
    fn test_miss_resets_only_acting_players_combo() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Hard, false, 2));

        // Player one builds a streak, then misses.
        for _ in 0..2 {
            let (a, b) = exact_pair(&state);
            state.flip(a);
            state.flip(b);
            state.resolve_match_at(T0);
        }
        let (x, y) = mismatch(&state);
        state.flip(x);
        state.flip(y);
        state.resolve_match_at(T0);
        state.reset_flipped();

        // Player two scores once, then misses; player one's reset streak is untouched.
        let (a, b) = exact_pair(&state);
        state.flip(a);
        state.flip(b);
        state.resolve_match_at(T0);
        assert_eq!(state.player(PlayerId::Two).combo_count, 1);
        assert_eq!(state.player(PlayerId::One).combo_count, 0);

        let (x, y) = mismatch(&state);
        state.flip(x);
        state.flip(y);
        state.resolve_match_at(T0);
        assert_eq!(state.player(PlayerId::Two).combo_count, 0);
        assert_eq!(state.current_player(), PlayerId::One);
    }

    #[test]
    fn test_clearing_the_board_finishes_once() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Easy, false, 1));
        for i in 0..4 {
            let (a, b) = exact_pair(&state);
            state.flip(a);
            state.flip(b);
            let outcome = state.resolve_match_at(T0 + 10_000 * (i + 1)).unwrap();
            assert_eq!(outcome.finished, i == 3);
        }
        assert_eq!(state.status(), GameStatus::Finished);
        assert_eq!(state.end_time(), Some(T0 + 40_000));
        assert_eq!(state.elapsed_secs_at(T0 + 999_999), 40.0);

        assert!(!state.end_at(T0 + 50_000));
        assert_eq!(state.end_time(), Some(T0 + 40_000));
        assert!(!state.flip(state.cards()[0].id));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = GameState::new(GameConfig::default(), 1);
        assert!(!state.pause(), "cannot pause an idle session");

        state.start_at(T0).unwrap();
        assert!(!state.resume());
        assert!(state.pause());
        assert_eq!(state.status(), GameStatus::Paused);
        assert!(!state.pause());
        let id = state.cards()[0].id;
        assert!(state.flip(id), "pause does not lock the board");
        assert!(state.resume());
        assert_eq!(state.flipped_ids(), &[id]);
        assert_eq!(state.status(), GameStatus::Playing);

        state.end_at(T0 + 1);
        assert!(!state.pause());
    }

    #[test]
    fn test_end_force_finishes() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Easy, false, 1));
        assert!(state.end_at(T0 + 3000));
        assert_eq!(state.status(), GameStatus::Finished);
        assert_eq!(state.end_time(), Some(T0 + 3000));
        assert!(state.matched_pairs() < state.total_pairs());
    }

    #[test]
    fn test_reset_keeps_only_config() {
        let cfg = config(GameMode::Chord, Difficulty::Hard, false, 2);
        let mut state = started(cfg);
        let (a, b) = exact_pair(&state);
        state.flip(a);
        state.flip(b);
        state.resolve_match_at(T0);

        state.reset();
        assert_eq!(state.status(), GameStatus::Idle);
        assert_eq!(state.config(), &cfg);
        assert!(state.cards().is_empty());
        assert_eq!(state.players(), &Players::default());
        assert_eq!(state.total_pairs(), 0);
        assert_eq!(state.start_time(), None);
    }

    #[test]
    fn test_set_config_does_not_reset() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Easy, false, 1));
        let chord = config(GameMode::Chord, Difficulty::Hard, false, 2);
        assert!(state.apply_action(GameAction::SetConfig(chord)));
        assert_eq!(state.config(), &chord);
        assert_eq!(state.cards().len(), 8);
        assert_eq!(state.status(), GameStatus::Playing);

        assert!(state.apply_action(GameAction::Start));
        assert_eq!(state.cards().len(), 24);
        assert!(state.cards().iter().all(|c| c.mode() == GameMode::Chord));
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = GameState::default();
        assert!(state.apply_action(GameAction::Start));
        let id = state.cards()[0].id;
        assert!(state.apply_action(GameAction::Flip(id)));
        assert!(!state.apply_action(GameAction::ResolveMatch));
        assert!(state.apply_action(GameAction::ResetFlipped));
        assert!(state.apply_action(GameAction::Pause));
        assert!(state.apply_action(GameAction::Resume));
        assert!(state.apply_action(GameAction::End));
        assert!(!state.apply_action(GameAction::End));
        assert!(state.apply_action(GameAction::Reset));
        assert_eq!(state.status(), GameStatus::Idle);
    }

    #[test]
    fn test_take_last_outcome() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Easy, false, 1));
        let (a, b) = exact_pair(&state);
        state.flip(a);
        state.flip(b);
        let outcome = state.resolve_match_at(T0).unwrap();
        assert_eq!(state.take_last_outcome(), Some(outcome));
        assert_eq!(state.take_last_outcome(), None);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = started(config(GameMode::Pitch, Difficulty::Easy, false, 1));
        let id = state.cards()[3].id;
        state.flip(id);

        let mut snap = GameSnapshot::default();
        state.snapshot_into(&mut snap);
        assert_eq!(snap.status, GameStatus::Playing);
        assert_eq!(snap.cards.as_slice(), state.cards());
        assert_eq!(snap.flipped, vec![id]);
        assert_eq!(snap.total_pairs, 4);
        assert!(snap.playable());

        state.reset();
        state.snapshot_into(&mut snap);
        assert!(snap.cards.is_empty());
        assert!(snap.flipped.is_empty());
        assert!(!snap.playable());
    }
}
