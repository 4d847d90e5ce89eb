//! Drawing collaborator
//!
//! The game never touches pixels. It hands geometric descriptors to a
//! `Renderer`, which owns whatever surfaces the platform provides. Drawing is
//! split over layers so that moving shapes, the score and the pause overlay
//! can be cleared independently.

pub mod recording;

pub use recording::{DrawCall, RecordingRenderer};

use glam::DVec2;

use crate::sim::{Bounds, Circle, Edges, Obstacle, Rect};

/// Drawing surfaces, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Static background
    Back,
    /// Circle and obstacles
    Top,
    /// Score text
    Bottom,
    /// Pause overlay
    Pause,
}

pub trait Renderer {
    /// Clear the circle/obstacle and score layers
    fn clear(&mut self);

    fn draw_background(&mut self, bounds: Bounds);

    fn draw_circle(&mut self, circle: &Circle);

    fn draw_shapes(&mut self, obstacles: &[Obstacle]);

    /// Clear a rectangular region of one layer
    fn clear_rect(&mut self, layer: Layer, rect: &Rect);

    /// Draw the score centered on `anchor`
    fn draw_score(&mut self, text: &str, anchor: DVec2);

    /// Measured width of `text` in the score font
    fn text_width(&self, text: &str) -> f64;

    fn draw_pause_screen(&mut self);

    fn clear_pause_screen(&mut self);
}

/// Region to clear before redrawing a moved circle
pub fn circle_dirty_rect(circle: &Circle) -> Rect {
    circle.bounding_box()
}

/// Region to clear before redrawing the score
///
/// Text height can't be measured reliably, so it is estimated as
/// `width * aspect`. The box is snapped outward to whole pixels.
pub fn score_dirty_rect(anchor: DVec2, text_width: f64, aspect: f64) -> Rect {
    let height = text_width * aspect;
    Rect::new(
        (anchor.x - text_width / 2.0).floor(),
        (anchor.y - height / 2.0).floor(),
        text_width.ceil(),
        height.ceil(),
    )
}
