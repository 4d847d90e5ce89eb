//! Game phases, events and the arena contents

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::shape::{Bounds, Circle, Obstacle};
use crate::consts::*;
use crate::round_half_up;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Set up, waiting for start
    Ready,
    /// Active gameplay
    Running,
    /// Frozen, waiting for resume
    Paused,
    /// Run over; only setup/restart leave this phase
    Ended,
}

/// Notifications for menus and other listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Setup,
    Start,
    Pause,
    Resume,
    Stop,
    Restart,
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Setup => "setup",
            GameEvent::Start => "start",
            GameEvent::Pause => "pause",
            GameEvent::Resume => "resume",
            GameEvent::Stop => "stop",
            GameEvent::Restart => "restart",
        }
    }
}

/// Everything on the playing field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub bounds: Bounds,
    pub circle: Circle,
    pub obstacles: Vec<Obstacle>,
    /// Spawn coordinates: obstacle top-left corners, then the circle center
    original: Vec<DVec2>,
}

impl Arena {
    /// Create an arena and remember the spawn coordinates
    pub fn new(bounds: Bounds, circle: Circle, obstacles: Vec<Obstacle>) -> Self {
        let original = obstacles
            .iter()
            .map(|o| o.pos())
            .chain(std::iter::once(circle.center))
            .collect();
        Self {
            bounds,
            circle,
            obstacles,
            original,
        }
    }

    /// Standard layout for an arena of the given size
    pub fn standard(bounds: Bounds) -> Self {
        Self::new(bounds, spawn_circle(bounds), spawn_obstacles(bounds))
    }

    /// Standard layout on the top half of a canvas
    ///
    /// The bottom half holds the score and receives pointer input.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self::standard(Bounds::new(width, (height / 2.0).floor()))
    }

    /// Put every shape back where it spawned
    pub fn reposition(&mut self) {
        for (obstacle, pos) in self.obstacles.iter_mut().zip(self.original.iter()) {
            obstacle.move_to(*pos);
        }
        if let Some(center) = self.original.last() {
            self.circle.move_to(*center);
        }
    }

    pub fn original_positions(&self) -> &[DVec2] {
        &self.original
    }

    /// Score layer anchor: the middle of the arena-sized score area
    pub fn score_anchor(&self) -> DVec2 {
        DVec2::new(
            (self.bounds.width / 2.0).floor(),
            (self.bounds.height / 2.0).floor(),
        )
    }
}

/// Player circle centered in the arena
pub fn spawn_circle(bounds: Bounds) -> Circle {
    Circle::new(
        (bounds.width / 2.0).floor(),
        (bounds.height / 2.0).floor(),
        (CIRCLE_RADIUS_FRACTION * bounds.min_side()).floor(),
    )
}

/// Two squares in the top corners, two rectangles along the bottom
pub fn spawn_obstacles(bounds: Bounds) -> Vec<Obstacle> {
    let Bounds { width, height } = bounds;
    let square = (SQUARE_FRACTION * round_half_up((width + height) / 2.0)).floor();
    let rect_w = (RECT_WIDTH_FRACTION * round_half_up(0.8 * width + 0.2 * height)).floor();
    let rect_h = (RECT_HEIGHT_FRACTION * round_half_up(0.2 * width + 0.8 * height)).floor();
    let wide_w = (rect_w * 0.8).floor();
    let tall_h = (rect_h * 1.2).floor();

    vec![
        Obstacle::square(0.0, 0.0, square),
        Obstacle::square(width - square, 0.0, square),
        Obstacle::rect(0.0, height - rect_h, rect_w, rect_h),
        Obstacle::rect(width - wide_w, height - tall_h, wide_w, tall_h),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::has_collision;
    use crate::sim::shape::Edges;

    #[test]
    fn test_standard_layout() {
        let arena = Arena::for_canvas(800.0, 801.0);
        assert_eq!(arena.bounds, Bounds::new(800.0, 400.0));
        assert_eq!(arena.circle, Circle::new(400.0, 200.0, 20.0));
        assert_eq!(arena.obstacles.len(), 4);

        // 0.15 * 600 = 90
        assert_eq!(arena.obstacles[0], Obstacle::square(0.0, 0.0, 90.0));
        assert_eq!(arena.obstacles[1], Obstacle::square(710.0, 0.0, 90.0));
        for obstacle in &arena.obstacles {
            assert!(obstacle.left() >= 0.0 && obstacle.right() <= 800.0);
            assert!(obstacle.top() >= 0.0 && obstacle.bottom() <= 400.0);
        }
    }

    #[test]
    fn test_spawn_is_collision_free() {
        let arena = Arena::for_canvas(1280.0, 720.0);
        let mut candidates = Vec::new();
        assert!(!has_collision(&arena.circle, &arena.obstacles, &mut candidates));
    }

    #[test]
    fn test_reposition_restores_spawn() {
        let mut arena = Arena::standard(Bounds::new(300.0, 200.0));
        let before = arena.clone();

        arena.circle.move_to(DVec2::new(1.0, 2.0));
        for obstacle in &mut arena.obstacles {
            obstacle.move_to(DVec2::new(42.0, 42.0));
        }
        arena.reposition();

        assert_eq!(arena.circle, before.circle);
        assert_eq!(arena.obstacles, before.obstacles);
        assert_eq!(arena.original_positions().len(), arena.obstacles.len() + 1);
    }
}
