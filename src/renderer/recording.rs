//! Renderer that records draw calls instead of drawing
//!
//! Used by the headless binary and by tests to observe exactly what the game
//! asked to draw.

use glam::DVec2;

use super::{Layer, Renderer};
use crate::sim::{Bounds, Circle, Obstacle, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Background(Bounds),
    Circle(Circle),
    Shapes(Vec<Obstacle>),
    ClearRect(Layer, Rect),
    Score(String, DVec2),
    PauseScreen,
    ClearPauseScreen,
}

#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    /// Width of one character in the pretend score font
    pub glyph_width: f64,
    pub pause_visible: bool,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            glyph_width: 40.0,
            pause_visible: false,
        }
    }
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded calls
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(*c)).count()
    }

    /// Most recently drawn score text
    pub fn last_score(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            DrawCall::Score(text, _) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_background(&mut self, bounds: Bounds) {
        self.calls.push(DrawCall::Background(bounds));
    }

    fn draw_circle(&mut self, circle: &Circle) {
        self.calls.push(DrawCall::Circle(*circle));
    }

    fn draw_shapes(&mut self, obstacles: &[Obstacle]) {
        self.calls.push(DrawCall::Shapes(obstacles.to_vec()));
    }

    fn clear_rect(&mut self, layer: Layer, rect: &Rect) {
        self.calls.push(DrawCall::ClearRect(layer, *rect));
    }

    fn draw_score(&mut self, text: &str, anchor: DVec2) {
        log::trace!("score {text}");
        self.calls.push(DrawCall::Score(text.to_string(), anchor));
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.glyph_width
    }

    fn draw_pause_screen(&mut self) {
        self.pause_visible = true;
        self.calls.push(DrawCall::PauseScreen);
    }

    fn clear_pause_screen(&mut self) {
        self.pause_visible = false;
        self.calls.push(DrawCall::ClearPauseScreen);
    }
}
