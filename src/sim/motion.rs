//! Obstacle motion policies
//!
//! One policy is chosen per game from the difficulty level and stays fixed
//! until the game is restarted. Each policy owns the per-obstacle motion
//! state (velocities or oscillators); the obstacles themselves belong to the
//! arena and are passed in on every tick.
//!
//! - Dumb/Easy: diagonal motion, reflecting off the arena walls
//! - Normal: diagonal motion, wrapping around the arena (torus)
//! - Tough/Insane: per-axis sinusoidal sweeps with seeded frequencies

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::circle_out_of_bounds;
use super::shape::{Bounds, Circle, Obstacle};
use crate::tuning::Tuning;
use crate::{base_speed, round_half_up};

/// Difficulty levels, numbered the way they are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Dumb = 1,
    Easy = 2,
    #[default]
    Normal = 3,
    Tough = 4,
    Insane = 5,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Dumb,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Tough,
        Difficulty::Insane,
    ];

    /// Map a stored level to a difficulty (unknown levels fall back to Normal)
    pub fn from_level(level: u8) -> Self {
        match level {
            1 => Difficulty::Dumb,
            2 => Difficulty::Easy,
            4 => Difficulty::Tough,
            5 => Difficulty::Insane,
            _ => Difficulty::Normal,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Dumb => "Dumb",
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Tough => "Tough",
            Difficulty::Insane => "Insane",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dumb" | "1" => Some(Difficulty::Dumb),
            "easy" | "2" => Some(Difficulty::Easy),
            "normal" | "3" => Some(Difficulty::Normal),
            "tough" | "4" => Some(Difficulty::Tough),
            "insane" | "5" => Some(Difficulty::Insane),
            _ => None,
        }
    }
}

/// Strategy that moves the obstacles and decides whether leaving the arena
/// loses the game
pub trait MotionPolicy: std::fmt::Debug {
    /// Difficulty this policy was built for
    fn difficulty(&self) -> Difficulty;

    /// Arena the policy keeps its obstacles in
    fn bounds(&self) -> Bounds;

    /// Advance every obstacle by `dt` milliseconds
    fn move_shapes(&mut self, obstacles: &mut [Obstacle], dt: f64);

    /// Whether the player circle has left the arena
    fn is_out_of_bounds(&self, circle: &Circle) -> bool {
        circle_out_of_bounds(circle, self.bounds())
    }
}

/// Clamp one axis back into `[0, limit - extent]`, negating `vel` on a hit
#[inline]
fn reflect_axis(pos: f64, extent: f64, limit: f64, vel: &mut f64) -> f64 {
    if pos < 0.0 {
        *vel = -*vel;
        0.0
    } else if pos + extent > limit {
        *vel = -*vel;
        limit - extent
    } else {
        pos
    }
}

/// Straight-line motion that bounces off the arena walls
///
/// Out-of-bounds positions are put back on the wall explicitly. Only flipping
/// the direction would leave the shape outside for another frame, where it
/// would flip again and jitter along the edge.
#[derive(Debug, Clone)]
pub struct Reflect {
    difficulty: Difficulty,
    bounds: Bounds,
    velocities: Vec<DVec2>,
    /// Dumb never ends a game for leaving the arena
    checks_bounds: bool,
}

impl Reflect {
    /// Every obstacle starts moving down-right at `speed` px/ms on both axes
    pub fn new(difficulty: Difficulty, bounds: Bounds, count: usize, speed: f64) -> Self {
        Self::with_velocities(difficulty, bounds, vec![DVec2::splat(speed); count])
    }

    pub fn with_velocities(difficulty: Difficulty, bounds: Bounds, velocities: Vec<DVec2>) -> Self {
        Self {
            difficulty,
            bounds,
            velocities,
            checks_bounds: difficulty != Difficulty::Dumb,
        }
    }

    pub fn dumb(bounds: Bounds, count: usize, tuning: &Tuning) -> Self {
        let speed = base_speed(tuning.dumb_speed, bounds);
        Self::new(Difficulty::Dumb, bounds, count, speed)
    }

    pub fn easy(bounds: Bounds, count: usize, tuning: &Tuning) -> Self {
        let speed = base_speed(tuning.easy_speed, bounds);
        Self::new(Difficulty::Easy, bounds, count, speed)
    }

    pub fn velocities(&self) -> &[DVec2] {
        &self.velocities
    }
}

impl MotionPolicy for Reflect {
    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn move_shapes(&mut self, obstacles: &mut [Obstacle], dt: f64) {
        let bounds = self.bounds;
        for (obstacle, vel) in obstacles.iter_mut().zip(self.velocities.iter_mut()) {
            // x = x0 + u*dt
            let pos = obstacle.pos();
            let x = pos.x + round_half_up(vel.x * dt);
            let y = pos.y + round_half_up(vel.y * dt);

            let x = reflect_axis(x, obstacle.width(), bounds.width, &mut vel.x);
            let y = reflect_axis(y, obstacle.height(), bounds.height, &mut vel.y);
            obstacle.move_to(DVec2::new(x, y));
        }
    }

    fn is_out_of_bounds(&self, circle: &Circle) -> bool {
        self.checks_bounds && circle_out_of_bounds(circle, self.bounds)
    }
}

/// Straight-line motion on a torus: leaving one edge re-enters at the other
#[derive(Debug, Clone)]
pub struct Wrap {
    bounds: Bounds,
    velocities: Vec<DVec2>,
}

impl Wrap {
    /// Even obstacles head down-right, odd ones down-left
    pub fn new(bounds: Bounds, count: usize, speed: f64) -> Self {
        let velocities = (0..count)
            .map(|i| {
                let dx = if i % 2 == 0 { speed } else { -speed };
                DVec2::new(dx, speed)
            })
            .collect();
        Self::with_velocities(bounds, velocities)
    }

    pub fn with_velocities(bounds: Bounds, velocities: Vec<DVec2>) -> Self {
        Self { bounds, velocities }
    }

    pub fn normal(bounds: Bounds, count: usize, tuning: &Tuning) -> Self {
        Self::new(bounds, count, base_speed(tuning.normal_speed, bounds))
    }

    pub fn velocities(&self) -> &[DVec2] {
        &self.velocities
    }
}

/// `(pos + delta) mod limit`, always in `[0, limit)`
#[inline]
fn wrap_axis(pos: f64, delta: f64, limit: f64) -> f64 {
    let wrapped = (pos + delta + limit).rem_euclid(limit);
    // rem_euclid can round up to `limit` for tiny negative inputs
    if wrapped >= limit { 0.0 } else { wrapped }
}

impl MotionPolicy for Wrap {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Normal
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn move_shapes(&mut self, obstacles: &mut [Obstacle], dt: f64) {
        let bounds = self.bounds;
        for (obstacle, vel) in obstacles.iter_mut().zip(self.velocities.iter()) {
            let pos = obstacle.pos();
            let x = wrap_axis(pos.x, round_half_up(vel.x * dt), bounds.width);
            let y = wrap_axis(pos.y, round_half_up(vel.y * dt), bounds.height);
            obstacle.move_to(DVec2::new(x, y));
        }
    }
}

/// One axis of a sinusoidal sweep: `amplitude * sin(omega * t + phase) + center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub center: f64,
    pub amplitude: f64,
    /// Angular frequency in rad/ms
    pub omega: f64,
    pub phase: f64,
}

impl Oscillator {
    /// Sweep the free range `[0, limit - extent]`, starting at `start`
    ///
    /// `speed` is the peak linear speed in px/ms before `factor` is applied.
    pub fn spanning(start: f64, extent: f64, limit: f64, speed: f64, factor: f64) -> Self {
        let half_range = ((limit - extent) / 2.0).max(0.0);
        if half_range == 0.0 {
            return Self {
                center: 0.0,
                amplitude: 0.0,
                omega: 0.0,
                phase: 0.0,
            };
        }

        let offset = ((start - half_range) / half_range).clamp(-1.0, 1.0);
        Self {
            center: half_range,
            amplitude: half_range,
            omega: speed * factor / half_range,
            phase: offset.asin(),
        }
    }

    pub fn position(&self, t: f64) -> f64 {
        self.amplitude * (self.omega * t + self.phase).sin() + self.center
    }
}

/// Per-axis sinusoidal motion with seeded, slightly mismatched frequencies
///
/// Mismatched x/y frequencies trace Lissajous curves, so the paths are hard to
/// predict but still stay inside the arena.
#[derive(Debug, Clone)]
pub struct Oscillate {
    difficulty: Difficulty,
    bounds: Bounds,
    /// (x, y) oscillators per obstacle
    axes: Vec<(Oscillator, Oscillator)>,
    /// Time since the policy was created (ms)
    elapsed: f64,
}

impl Oscillate {
    pub fn new(
        difficulty: Difficulty,
        bounds: Bounds,
        obstacles: &[Obstacle],
        speed: f64,
        jitter: (f64, f64),
        seed: u64,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (low, high) = jitter;
        let axes = obstacles
            .iter()
            .map(|obstacle| {
                let pos = obstacle.pos();
                let fx = if high > low { rng.random_range(low..high) } else { low };
                let fy = if high > low { rng.random_range(low..high) } else { low };
                (
                    Oscillator::spanning(pos.x, obstacle.width(), bounds.width, speed, fx),
                    Oscillator::spanning(pos.y, obstacle.height(), bounds.height, speed, fy),
                )
            })
            .collect();

        Self {
            difficulty,
            bounds,
            axes,
            elapsed: 0.0,
        }
    }

    pub fn tough(bounds: Bounds, obstacles: &[Obstacle], tuning: &Tuning, seed: u64) -> Self {
        let speed = base_speed(tuning.tough_speed, bounds);
        Self::new(Difficulty::Tough, bounds, obstacles, speed, tuning.tough_jitter, seed)
    }

    pub fn insane(bounds: Bounds, obstacles: &[Obstacle], tuning: &Tuning, seed: u64) -> Self {
        let speed = base_speed(tuning.insane_speed, bounds);
        Self::new(Difficulty::Insane, bounds, obstacles, speed, tuning.insane_jitter, seed)
    }

    pub fn oscillators(&self) -> &[(Oscillator, Oscillator)] {
        &self.axes
    }
}

impl MotionPolicy for Oscillate {
    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn move_shapes(&mut self, obstacles: &mut [Obstacle], dt: f64) {
        self.elapsed += dt;
        let t = self.elapsed;
        let bounds = self.bounds;
        for (obstacle, (ox, oy)) in obstacles.iter_mut().zip(self.axes.iter()) {
            let max_x = (bounds.width - obstacle.width()).max(0.0);
            let max_y = (bounds.height - obstacle.height()).max(0.0);
            let x = round_half_up(ox.position(t)).clamp(0.0, max_x);
            let y = round_half_up(oy.position(t)).clamp(0.0, max_y);
            obstacle.move_to(DVec2::new(x, y));
        }
    }
}

/// Build the policy for a difficulty
///
/// `obstacles` are the spawn positions; `seed` only matters for the
/// oscillating policies.
pub fn make_policy(
    difficulty: Difficulty,
    bounds: Bounds,
    obstacles: &[Obstacle],
    tuning: &Tuning,
    seed: u64,
) -> Box<dyn MotionPolicy> {
    let count = obstacles.len();
    let policy: Box<dyn MotionPolicy> = match difficulty {
        Difficulty::Dumb => Box::new(Reflect::dumb(bounds, count, tuning)),
        Difficulty::Easy => Box::new(Reflect::easy(bounds, count, tuning)),
        Difficulty::Normal => Box::new(Wrap::normal(bounds, count, tuning)),
        Difficulty::Tough => Box::new(Oscillate::tough(bounds, obstacles, tuning, seed)),
        Difficulty::Insane => Box::new(Oscillate::insane(bounds, obstacles, tuning, seed)),
    };
    log::debug!(
        "Built {} motion policy for {} obstacles in {}x{}",
        difficulty.as_str(),
        count,
        bounds.width,
        bounds.height
    );
    policy
}
