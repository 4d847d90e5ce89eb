//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws, reads input
//! devices or touches storage:
//! - Time only enters through explicit `dt` arguments
//! - Seeded RNG only
//! - Obstacles are processed in a stable order

pub mod collision;
pub mod motion;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, circle_intersects, circle_out_of_bounds, has_collision};
pub use motion::{Difficulty, MotionPolicy, Oscillate, Oscillator, Reflect, Wrap, make_policy};
pub use shape::{Bounds, Circle, Edges, Obstacle, Rect, Square};
pub use state::{Arena, GameEvent, GamePhase, spawn_circle, spawn_obstacles};
pub use tick::{TickInput, TickOutcome, score_for, tick};
