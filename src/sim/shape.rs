//! Positioned shapes and arena bounds
//!
//! Circles are positioned by their center, rectangles and squares by their
//! top-left corner. Edges are always derived from the current position, so a
//! shape can never report stale bounds after a move.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned edges of a shape's minimum bounding rectangle
pub trait Edges {
    /// Leftmost (smallest) x-coordinate
    fn left(&self) -> f64;
    /// Rightmost (biggest) x-coordinate
    fn right(&self) -> f64;
    /// Topmost (smallest) y-coordinate
    fn top(&self) -> f64;
    /// Bottommost (biggest) y-coordinate
    fn bottom(&self) -> f64;

    /// The bounding rectangle as a standalone `Rect`
    fn bounding_box(&self) -> Rect {
        Rect::new(
            self.left(),
            self.top(),
            self.right() - self.left(),
            self.bottom() - self.top(),
        )
    }
}

/// Width × height of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// A circle centered at `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            center: DVec2::new(x, y),
            radius,
        }
    }

    pub fn move_to(&mut self, center: DVec2) {
        self.center = center;
    }
}

impl Edges for Circle {
    fn left(&self) -> f64 {
        self.center.x - self.radius
    }
    fn right(&self) -> f64 {
        self.center.x + self.radius
    }
    fn top(&self) -> f64 {
        self.center.y - self.radius
    }
    fn bottom(&self) -> f64 {
        self.center.y + self.radius
    }
}

/// A rectangle with its top-left corner at `pos`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: DVec2,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            width,
            height,
        }
    }
}

impl Edges for Rect {
    fn left(&self) -> f64 {
        self.pos.x
    }
    fn right(&self) -> f64 {
        self.pos.x + self.width
    }
    fn top(&self) -> f64 {
        self.pos.y
    }
    fn bottom(&self) -> f64 {
        self.pos.y + self.height
    }
}

/// A square with its top-left corner at `pos`
///
/// Kept separate from `Rect` so a square can never be stretched into a
/// rectangle by a width-only update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub pos: DVec2,
    pub side: f64,
}

impl Square {
    pub fn new(x: f64, y: f64, side: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            side,
        }
    }
}

impl Edges for Square {
    fn left(&self) -> f64 {
        self.pos.x
    }
    fn right(&self) -> f64 {
        self.pos.x + self.side
    }
    fn top(&self) -> f64 {
        self.pos.y
    }
    fn bottom(&self) -> f64 {
        self.pos.y + self.side
    }
}

/// Something the player has to dodge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    Square(Square),
    Rect(Rect),
}

impl Obstacle {
    pub fn square(x: f64, y: f64, side: f64) -> Self {
        Obstacle::Square(Square::new(x, y, side))
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Obstacle::Rect(Rect::new(x, y, width, height))
    }

    /// Top-left corner
    pub fn pos(&self) -> DVec2 {
        match self {
            Obstacle::Square(s) => s.pos,
            Obstacle::Rect(r) => r.pos,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Obstacle::Square(s) => s.side,
            Obstacle::Rect(r) => r.width,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Obstacle::Square(s) => s.side,
            Obstacle::Rect(r) => r.height,
        }
    }

    /// Size along each axis as a vector
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.width(), self.height())
    }

    pub fn move_to(&mut self, pos: DVec2) {
        match self {
            Obstacle::Square(s) => s.pos = pos,
            Obstacle::Rect(r) => r.pos = pos,
        }
    }
}

impl Edges for Obstacle {
    fn left(&self) -> f64 {
        self.pos().x
    }
    fn right(&self) -> f64 {
        self.pos().x + self.width()
    }
    fn top(&self) -> f64 {
        self.pos().y
    }
    fn bottom(&self) -> f64 {
        self.pos().y + self.height()
    }
}
