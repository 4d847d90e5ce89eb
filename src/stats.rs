//! Score and play counter bookkeeping
//!
//! Two storages are kept: a long-lived one for the all-time high score, total
//! plays and the chosen difficulty, and a per-session one for the session's
//! best score and plays. Scores only ever go up; a lower score is ignored and
//! an invalid one is rejected.

use crate::persistence::{Storage, load_json, save_json};
use crate::sim::Difficulty;

const DIFFICULTY_KEY: &str = "difficulty";
const HIGH_SCORE_KEY: &str = "highScore";
const TIMES_PLAYED_KEY: &str = "timesPlayed";

/// A score that can't be recorded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreError {
    NotANumber,
    Negative(f64),
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber => write!(f, "score cannot be interpreted as a number"),
            Self::Negative(score) => write!(f, "negative score: {score}"),
        }
    }
}

impl std::error::Error for ScoreError {}

fn check_score(score: f64) -> Result<f64, ScoreError> {
    if score.is_nan() {
        return Err(ScoreError::NotANumber);
    }
    if score < 0.0 {
        return Err(ScoreError::Negative(score));
    }
    Ok(score)
}

/// What the game persists, and when
///
/// The controller only calls into this on pause (score) and stop (score and
/// play counters).
pub trait ScoreStore {
    /// Stored difficulty, if one was ever chosen
    fn difficulty(&self) -> Option<Difficulty>;

    fn set_difficulty(&mut self, difficulty: Difficulty);

    fn high_score(&self) -> f64;

    /// Raise the all-time high score; `Ok(false)` if `score` is lower
    fn update_high_score(&mut self, score: f64) -> Result<bool, ScoreError>;

    fn current_score(&self) -> f64;

    /// Raise the session best (and the all-time best with it)
    fn update_current_score(&mut self, score: f64) -> Result<bool, ScoreError>;

    fn total_times_played(&self) -> u64;

    fn times_played(&self) -> u64;

    /// Count a finished game; returns the session count
    fn inc_times_played(&mut self) -> u64;
}

/// `ScoreStore` over a local and a session storage
#[derive(Debug, Clone)]
pub struct GameStats<L: Storage, S: Storage> {
    local: L,
    session: S,
}

impl<L: Storage, S: Storage> GameStats<L, S> {
    /// Wrap the storages, initialising missing counters to 0
    pub fn new(mut local: L, mut session: S) -> Self {
        for key in [DIFFICULTY_KEY, HIGH_SCORE_KEY, TIMES_PLAYED_KEY] {
            if local.get_item(key).is_none() {
                local.set_item(key, "0");
            }
        }
        for key in [HIGH_SCORE_KEY, TIMES_PLAYED_KEY] {
            if session.get_item(key).is_none() {
                session.set_item(key, "0");
            }
        }
        Self { local, session }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn reset_high_score(&mut self) {
        save_json(&mut self.local, HIGH_SCORE_KEY, &0.0);
    }

    pub fn reset_total_times_played(&mut self) {
        save_json(&mut self.local, TIMES_PLAYED_KEY, &0u64);
    }

    pub fn reset_current_score(&mut self) {
        save_json(&mut self.session, HIGH_SCORE_KEY, &0.0);
    }

    pub fn reset_times_played(&mut self) {
        save_json(&mut self.session, TIMES_PLAYED_KEY, &0u64);
    }

    fn inc_total_times_played(&mut self) -> u64 {
        let total = self.total_times_played() + 1;
        save_json(&mut self.local, TIMES_PLAYED_KEY, &total);
        total
    }
}

impl<L: Storage, S: Storage> ScoreStore for GameStats<L, S> {
    fn difficulty(&self) -> Option<Difficulty> {
        match load_json::<u8>(&self.local, DIFFICULTY_KEY) {
            Some(0) | None => None,
            Some(level) => Some(Difficulty::from_level(level)),
        }
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        save_json(&mut self.local, DIFFICULTY_KEY, &difficulty.level());
    }

    fn high_score(&self) -> f64 {
        load_json(&self.local, HIGH_SCORE_KEY).unwrap_or(0.0)
    }

    fn update_high_score(&mut self, score: f64) -> Result<bool, ScoreError> {
        let score = check_score(score)?;
        if score < self.high_score() {
            return Ok(false);
        }
        save_json(&mut self.local, HIGH_SCORE_KEY, &score);
        Ok(true)
    }

    fn current_score(&self) -> f64 {
        load_json(&self.session, HIGH_SCORE_KEY).unwrap_or(0.0)
    }

    fn update_current_score(&mut self, score: f64) -> Result<bool, ScoreError> {
        let score = check_score(score)?;
        if score < self.current_score() {
            return Ok(false);
        }
        save_json(&mut self.session, HIGH_SCORE_KEY, &score);
        self.update_high_score(score)?;
        Ok(true)
    }

    fn total_times_played(&self) -> u64 {
        load_json(&self.local, TIMES_PLAYED_KEY).unwrap_or(0)
    }

    fn times_played(&self) -> u64 {
        load_json(&self.session, TIMES_PLAYED_KEY).unwrap_or(0)
    }

    fn inc_times_played(&mut self) -> u64 {
        let count = self.times_played() + 1;
        save_json(&mut self.session, TIMES_PLAYED_KEY, &count);
        self.inc_total_times_played();
        count
    }
}
