//! Data-driven game balance
//!
//! Speeds are coefficients: the actual px/ms speed is the coefficient times
//! the rounded mean arena side, so bigger screens get proportionally faster
//! obstacles.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    Parse(String),
    /// A value that must be positive and finite was not
    NotPositive(&'static str),
    /// A jitter range whose low end exceeds its high end
    InvertedRange(&'static str),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid tuning json: {e}"),
            Self::NotPositive(field) => write!(f, "{field} must be positive"),
            Self::InvertedRange(field) => write!(f, "{field} range is inverted"),
        }
    }
}

impl std::error::Error for TuningError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Obstacle speed coefficients ===
    pub dumb_speed: f64,
    pub easy_speed: f64,
    pub normal_speed: f64,
    pub tough_speed: f64,
    pub insane_speed: f64,

    // === Oscillation frequency multipliers (low, high) ===
    pub tough_jitter: (f64, f64),
    pub insane_jitter: (f64, f64),

    // === Scoring ===
    pub points_per_second: f64,
    /// Score text height as a multiple of its measured width
    pub score_text_aspect: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dumb_speed: 0.00035,
            easy_speed: 0.0005,
            normal_speed: 0.0005,
            tough_speed: 0.0006,
            insane_speed: 0.0008,

            tough_jitter: (0.8, 1.2),
            insane_jitter: (0.6, 1.6),

            points_per_second: POINTS_PER_SECOND,
            score_text_aspect: SCORE_TEXT_ASPECT,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning table; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("dumb_speed", self.dumb_speed),
            ("easy_speed", self.easy_speed),
            ("normal_speed", self.normal_speed),
            ("tough_speed", self.tough_speed),
            ("insane_speed", self.insane_speed),
            ("points_per_second", self.points_per_second),
            ("score_text_aspect", self.score_text_aspect),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NotPositive(field));
            }
        }

        for (field, (low, high)) in [
            ("tough_jitter", self.tough_jitter),
            ("insane_jitter", self.insane_jitter),
        ] {
            if !(low.is_finite() && high.is_finite() && low > 0.0) {
                return Err(TuningError::NotPositive(field));
            }
            if low > high {
                return Err(TuningError::InvertedRange(field));
            }
        }
        Ok(())
    }
}
