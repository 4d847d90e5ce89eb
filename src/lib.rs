//! Bounce - dodge the blocks
//!
//! Core modules:
//! - `sim`: Geometry, collision detection, motion policies and the tick step
//! - `game`: Frame-driven controller and its state machine
//! - `renderer`: Drawing collaborator interface
//! - `input`: Pointer input collaborator
//! - `persistence`: Key-value storage backends
//! - `stats`: Score and play counter bookkeeping
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance
//! - `platform`: Host frame scheduling

pub mod game;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use game::{Game, Shortcut};
pub use settings::Settings;
pub use stats::{GameStats, ScoreError, ScoreStore};
pub use tuning::Tuning;

use sim::Bounds;

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh interval (ms)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Player circle radius as a fraction of the smaller arena side
    pub const CIRCLE_RADIUS_FRACTION: f64 = 0.05;
    /// Square side as a fraction of the mean arena side
    pub const SQUARE_FRACTION: f64 = 0.15;
    /// Rectangle width as a fraction of the width-weighted arena side
    pub const RECT_WIDTH_FRACTION: f64 = 0.225;
    /// Rectangle height as a fraction of the height-weighted arena side
    pub const RECT_HEIGHT_FRACTION: f64 = 0.1;

    /// Score points awarded per second survived
    pub const POINTS_PER_SECOND: f64 = 2.0;
    /// Text height estimate relative to the measured text width
    pub const SCORE_TEXT_ASPECT: f64 = 1.5;
}

/// Round to the nearest integer with halves going toward +∞
///
/// `f64::round` sends -2.5 to -3; obstacle displacement needs -2 so that
/// movement is identical in both directions.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Base obstacle speed (px/ms) for an arena and a difficulty coefficient
#[inline]
pub fn base_speed(coefficient: f64, bounds: Bounds) -> f64 {
    coefficient * round_half_up((bounds.width + bounds.height) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49), 0.0);
    }

    #[test]
    fn test_base_speed() {
        let bounds = Bounds::new(800.0, 400.0);
        assert!((base_speed(0.00035, bounds) - 0.21).abs() < 1e-12);
    }
}
