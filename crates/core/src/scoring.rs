//! Scoring module - combo awards, time bonus, final score and accuracy
//!
//! Notes:
//! - A streak's first match uses the base multiplier; each further consecutive
//!   match by the same player adds `COMBO_INCREMENT_PER_COMBO`.
//! - The time bonus is a single-player incentive only.
//! - Accuracy compares attempts against the minimum possible (one per matched
//!   pair), so `attempts == matched_pairs` is 100%.

use serde::Serialize;

use crate::game_state::GameState;
use crate::types::{
    Difficulty, PlayerId, Winner, COMBO_BASE_MULTIPLIER, COMBO_INCREMENT_PER_COMBO,
    TIME_BONUS_PER_SECOND,
};

/// Points awarded for one match
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboAward {
    /// Validator points before the multiplier.
    pub base_points: u32,
    /// Streak length including this match.
    pub combo: u32,
    pub multiplier: f64,
    pub total: u32,
}

/// Multiplier for the `combo`-th consecutive match (1-based).
pub fn combo_multiplier(combo: u32) -> f64 {
    let steps = combo.saturating_sub(1) as f64;
    COMBO_BASE_MULTIPLIER + steps * COMBO_INCREMENT_PER_COMBO
}

/// Apply the combo multiplier to validator points, rounding to the nearest point.
pub fn award_points(base_points: u32, combo: u32) -> ComboAward {
    let multiplier = combo_multiplier(combo);
    let total = (base_points as f64 * multiplier).round() as u32;
    ComboAward {
        base_points,
        combo,
        multiplier,
        total,
    }
}

/// Bonus for finishing under the difficulty's target time.
///
/// `floor((target - elapsed) * 2)`, and zero once the target is reached.
pub fn time_bonus(elapsed_secs: f64, difficulty: Difficulty) -> u32 {
    let target = difficulty.config().target_time_secs as f64;
    if elapsed_secs >= target {
        return 0;
    }
    ((target - elapsed_secs) * TIME_BONUS_PER_SECOND).floor().max(0.0) as u32
}

/// Seconds between start and end, if both were stamped.
pub fn clear_time_secs(state: &GameState) -> Option<f64> {
    match (state.start_time(), state.end_time()) {
        (Some(start), Some(end)) => Some((end - start).max(0) as f64 / 1000.0),
        _ => None,
    }
}

/// Score reported at the end of a session.
///
/// Two players: the current player's raw score. One player: player 1's score plus
/// the time bonus, or the raw score when the session was never timed.
pub fn final_score(state: &GameState) -> u32 {
    let config = state.config();
    if config.is_two_player() {
        return state.player(state.current_player()).score;
    }

    let base = state.player(PlayerId::One).score;
    match clear_time_secs(state) {
        Some(elapsed) => base + time_bonus(elapsed, config.difficulty),
        None => base,
    }
}

/// Percentage of the minimum attempts, rounded to one decimal.
pub fn accuracy(matched_pairs: u32, total_attempts: u32) -> f64 {
    if total_attempts == 0 {
        return 0.0;
    }
    let ratio = matched_pairs as f64 / total_attempts as f64 * 100.0;
    (ratio * 10.0).round() / 10.0
}

/// Two-player verdict with both raw scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinnerResult {
    pub winner: Winner,
    pub player1: u32,
    pub player2: u32,
}

/// Compare raw scores; equal scores are a tie.
pub fn winner(state: &GameState) -> WinnerResult {
    let player1 = state.player(PlayerId::One).score;
    let player2 = state.player(PlayerId::Two).score;
    let winner = if player1 > player2 {
        Winner::Player(PlayerId::One)
    } else if player2 > player1 {
        Winner::Player(PlayerId::Two)
    } else {
        Winner::Tie
    };

    WinnerResult {
        winner,
        player1,
        player2,
    }
}

/// End-of-game summary a front end shows and records
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub final_score: u32,
    pub base_score: u32,
    pub time_bonus: u32,
    pub clear_time_secs: f64,
    /// Player 1 accuracy (single player) or combined accuracy (two players).
    pub accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versus: Option<WinnerResult>,
}

impl GameResult {
    pub fn from_state(state: &GameState) -> Self {
        let config = state.config();
        let clear_time = clear_time_secs(state);
        let players = state.players();

        if config.is_two_player() {
            let matched = players.player1.matched_pairs + players.player2.matched_pairs;
            let score = final_score(state);
            return Self {
                final_score: score,
                base_score: score,
                time_bonus: 0,
                clear_time_secs: clear_time.unwrap_or(0.0),
                accuracy: accuracy(matched, players.total_attempts()),
                versus: Some(winner(state)),
            };
        }

        let base_score = players.player1.score;
        let bonus = clear_time
            .map(|elapsed| time_bonus(elapsed, config.difficulty))
            .unwrap_or(0);
        Self {
            final_score: base_score + bonus,
            base_score,
            time_bonus: bonus,
            clear_time_secs: clear_time.unwrap_or(0.0),
            accuracy: accuracy(players.player1.matched_pairs, players.player1.attempts),
            versus: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EXACT_MATCH_POINTS;

    #[test]
    fn test_combo_multipliers() {
        assert_eq!(combo_multiplier(1), 1.0);
        assert_eq!(combo_multiplier(2), 1.5);
        assert_eq!(combo_multiplier(3), 2.0);
        // A zero streak is treated like the first match.
        assert_eq!(combo_multiplier(0), 1.0);
    }

    #[test]
    fn test_award_points() {
        let first = award_points(EXACT_MATCH_POINTS, 1);
        assert_eq!(first.total, 100);
        assert_eq!(first.multiplier, 1.0);

        let second = award_points(EXACT_MATCH_POINTS, 2);
        assert_eq!(second.total, 150);

        let extended_third = award_points(150, 3);
        assert_eq!(extended_third.total, 300);
    }

    #[test]
    fn test_time_bonus() {
        assert_eq!(time_bonus(0.0, Difficulty::Easy), 120);
        assert_eq!(time_bonus(0.0, Difficulty::Normal), 240);
        assert_eq!(time_bonus(0.0, Difficulty::Hard), 360);

        assert_eq!(time_bonus(30.0, Difficulty::Easy), 60);
        // Fractional seconds floor after doubling.
        assert_eq!(time_bonus(59.3, Difficulty::Easy), 1);

        assert_eq!(time_bonus(60.0, Difficulty::Easy), 0);
        assert_eq!(time_bonus(500.0, Difficulty::Hard), 0);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(4, 4), 100.0);
        assert_eq!(accuracy(4, 8), 50.0);
        assert_eq!(accuracy(2, 3), 66.7);
        assert_eq!(accuracy(1, 3), 33.3);
        assert_eq!(accuracy(0, 5), 0.0);
    }
}
