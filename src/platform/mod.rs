//! Host frame scheduling
//!
//! The game advances only when the host calls `Game::frame`. In a browser
//! that's `requestAnimationFrame` (see `web`); headless runs and tests step
//! a `FrameClock` instead so every run is reproducible.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::FRAME_INTERVAL_MS;
use crate::game::Game;
use crate::input::InputSource;
use crate::renderer::Renderer;
use crate::stats::ScoreStore;

/// Source of frame timestamps (ms)
pub trait FrameClock {
    fn next_frame(&mut self) -> f64;
}

/// Clock that advances by a fixed step per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    now: f64,
    step: f64,
}

impl FixedStepClock {
    pub fn new(step: f64) -> Self {
        Self::starting_at(0.0, step)
    }

    pub fn starting_at(start: f64, step: f64) -> Self {
        Self { now: start, step }
    }

    /// Timestamp of the last frame handed out
    pub fn now(&self) -> f64 {
        self.now
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_MS)
    }
}

impl FrameClock for FixedStepClock {
    fn next_frame(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Drive `game` until it stops asking for frames or `max_frames` have run
///
/// `before_frame` is called with the frame index ahead of each frame, which
/// is where a host feeds input. Returns the number of frames run.
pub fn run_until_idle<R, I, S>(
    game: &mut Game<R, I, S>,
    clock: &mut dyn FrameClock,
    max_frames: usize,
    mut before_frame: impl FnMut(usize, &mut Game<R, I, S>),
) -> usize
where
    R: Renderer,
    I: InputSource,
    S: ScoreStore,
{
    let mut frames = 0;
    while frames < max_frames && game.needs_frame() {
        before_frame(frames, game);
        game.frame(clock.next_frame());
        frames += 1;
    }
    log::debug!("Ran {frames} frames, phase {:?}", game.phase());
    frames
}
