//! Single simulation step
//!
//! Moves the circle (if the input says so), advances the obstacles through
//! the active motion policy and checks the loss conditions. Drawing is left
//! to the caller, which compares the arena before and after the step.

use glam::DVec2;

use super::collision::has_collision;
use super::motion::MotionPolicy;
use super::state::Arena;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New circle center, if the player moved since the last tick
    pub circle_target: Option<DVec2>,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub circle_moved: bool,
    pub out_of_bounds: bool,
    pub collision: bool,
}

impl TickOutcome {
    /// The player lost on this tick
    pub fn is_loss(&self) -> bool {
        self.out_of_bounds || self.collision
    }
}

/// Advance the arena by `dt` milliseconds
pub fn tick(
    arena: &mut Arena,
    policy: &mut dyn MotionPolicy,
    candidates: &mut Vec<usize>,
    input: &TickInput,
    dt: f64,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    if let Some(target) = input.circle_target {
        arena.circle.move_to(target);
        outcome.circle_moved = true;
    }

    policy.move_shapes(&mut arena.obstacles, dt);

    // Bounds first: it's cheaper and either one ends the game
    outcome.out_of_bounds = policy.is_out_of_bounds(&arena.circle);
    if !outcome.out_of_bounds {
        outcome.collision = has_collision(&arena.circle, &arena.obstacles, candidates);
    }
    outcome
}

/// Score earned after `elapsed_ms` of play
pub fn score_for(elapsed_ms: f64, points_per_second: f64) -> u64 {
    ((elapsed_ms / 1000.0) * points_per_second).floor().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::motion::{Difficulty, Reflect, Wrap};
    use crate::sim::shape::{Bounds, Circle, Obstacle};

    fn small_arena() -> Arena {
        Arena::new(
            Bounds::new(200.0, 100.0),
            Circle::new(100.0, 50.0, 10.0),
            vec![Obstacle::square(0.0, 0.0, 20.0)],
        )
    }

    #[test]
    fn test_tick_moves_circle_and_obstacles() {
        let mut arena = small_arena();
        let mut policy =
            Reflect::with_velocities(Difficulty::Easy, arena.bounds, vec![DVec2::splat(0.1)]);
        let mut candidates = Vec::new();
        let input = TickInput {
            circle_target: Some(DVec2::new(120.0, 60.0)),
        };

        let outcome = tick(&mut arena, &mut policy, &mut candidates, &input, 100.0);

        assert!(outcome.circle_moved);
        assert!(!outcome.is_loss());
        assert_eq!(arena.circle.center, DVec2::new(120.0, 60.0));
        assert_eq!(arena.obstacles[0].pos(), DVec2::new(10.0, 10.0));
    }

    #[test]
    fn test_tick_detects_collision() {
        let mut arena = small_arena();
        let mut policy = Wrap::with_velocities(arena.bounds, vec![DVec2::ZERO]);
        let mut candidates = Vec::new();
        let input = TickInput {
            circle_target: Some(DVec2::new(25.0, 25.0)),
        };

        let outcome = tick(&mut arena, &mut policy, &mut candidates, &input, 16.0);
        assert!(outcome.collision);
        assert!(outcome.is_loss());
    }

    #[test]
    fn test_tick_out_of_bounds() {
        let mut arena = small_arena();
        let mut policy = Wrap::with_velocities(arena.bounds, vec![DVec2::ZERO]);
        let mut candidates = Vec::new();
        let input = TickInput {
            circle_target: Some(DVec2::new(195.0, 50.0)),
        };

        let outcome = tick(&mut arena, &mut policy, &mut candidates, &input, 16.0);
        assert!(outcome.out_of_bounds);
        assert!(!outcome.collision);
    }

    #[test]
    fn test_dumb_survives_leaving_arena() {
        let mut arena = small_arena();
        let mut policy =
            Reflect::with_velocities(Difficulty::Dumb, arena.bounds, vec![DVec2::ZERO]);
        let mut candidates = Vec::new();
        let input = TickInput {
            circle_target: Some(DVec2::new(195.0, 50.0)),
        };

        let outcome = tick(&mut arena, &mut policy, &mut candidates, &input, 16.0);
        assert!(!outcome.is_loss());
    }

    #[test]
    fn test_score_for() {
        assert_eq!(score_for(0.0, 2.0), 0);
        assert_eq!(score_for(499.0, 2.0), 0);
        assert_eq!(score_for(500.0, 2.0), 1);
        assert_eq!(score_for(10_250.0, 2.0), 20);
    }
}
