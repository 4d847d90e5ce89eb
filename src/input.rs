//! Pointer input collaborator
//!
//! The circle follows the pointer while the left button is held, keeping the
//! offset it had when the button went down so it never jumps under the
//! cursor. Pointer events may arrive at any time; the game samples the result
//! once per frame.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;

use crate::sim::Circle;

/// Source of circle movement
pub trait InputSource {
    /// Begin listening for presses (game started)
    fn start(&mut self);

    /// Stop listening and drop any press in progress (game stopped)
    fn stop(&mut self);

    /// Reset per-game state (game set up)
    fn arm(&mut self) {}

    /// Whether a new target is waiting
    fn moved(&self) -> bool;

    /// Target circle center; clears the moved flag
    fn circle_pos(&mut self) -> DVec2;
}

impl<T: InputSource> InputSource for Rc<RefCell<T>> {
    fn start(&mut self) {
        self.borrow_mut().start();
    }

    fn stop(&mut self) {
        self.borrow_mut().stop();
    }

    fn arm(&mut self) {
        self.borrow_mut().arm();
    }

    fn moved(&self) -> bool {
        self.borrow().moved()
    }

    fn circle_pos(&mut self) -> DVec2 {
        self.borrow_mut().circle_pos()
    }
}

/// Mouse/touch drag input
#[derive(Debug, Clone, Default)]
pub struct PointerInput {
    /// Presses are only honoured while listening
    listening: bool,
    /// Button held: moves update the target
    tracking: bool,
    moved: bool,
    pointer: DVec2,
    /// Circle center minus pointer at press time
    offset: DVec2,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Left button pressed at `pointer`
    pub fn press(&mut self, pointer: DVec2, circle: &Circle) {
        if !self.listening {
            return;
        }
        self.offset = circle.center - pointer;
        self.pointer = pointer;
        self.tracking = true;
    }

    /// Left button released
    pub fn release(&mut self) {
        self.tracking = false;
    }

    pub fn pointer_moved(&mut self, pointer: DVec2) {
        if self.tracking {
            self.pointer = pointer;
            self.moved = true;
        }
    }

    /// Pointer came back onto the input surface
    ///
    /// Re-captures the offset so the circle doesn't jump to wherever the
    /// pointer re-entered. If the button was released while outside, the
    /// release was never seen, so tracking ends here.
    pub fn pointer_entered(&mut self, pointer: DVec2, circle: &Circle, button_down: bool) {
        if !self.tracking {
            return;
        }
        self.offset = circle.center - pointer;
        self.pointer = pointer;
        if !button_down {
            self.release();
        }
    }
}

impl InputSource for PointerInput {
    fn start(&mut self) {
        self.listening = true;
    }

    fn stop(&mut self) {
        self.release();
        self.listening = false;
    }

    fn arm(&mut self) {
        self.moved = false;
    }

    fn moved(&self) -> bool {
        self.moved
    }

    fn circle_pos(&mut self) -> DVec2 {
        self.moved = false;
        self.pointer + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_keeps_offset() {
        let circle = Circle::new(100.0, 50.0, 10.0);
        let mut input = PointerInput::new();
        input.start();

        input.press(DVec2::new(90.0, 300.0), &circle);
        assert!(!input.moved());

        input.pointer_moved(DVec2::new(95.0, 290.0));
        assert!(input.moved());
        assert_eq!(input.circle_pos(), DVec2::new(105.0, 40.0));
        assert!(!input.moved());
    }

    #[test]
    fn test_moves_without_press_are_ignored() {
        let circle = Circle::new(100.0, 50.0, 10.0);
        let mut input = PointerInput::new();
        input.start();
        input.pointer_moved(DVec2::new(1.0, 1.0));
        assert!(!input.moved());

        input.press(DVec2::ZERO, &circle);
        input.release();
        input.pointer_moved(DVec2::new(1.0, 1.0));
        assert!(!input.moved());
    }

    #[test]
    fn test_press_before_start_is_ignored() {
        let circle = Circle::new(100.0, 50.0, 10.0);
        let mut input = PointerInput::new();
        input.press(DVec2::ZERO, &circle);
        assert!(!input.is_tracking());
    }

    #[test]
    fn test_reenter_recaptures_offset_and_releases() {
        let circle = Circle::new(100.0, 50.0, 10.0);
        let mut input = PointerInput::new();
        input.start();
        input.press(DVec2::new(100.0, 50.0), &circle);

        input.pointer_entered(DVec2::new(0.0, 0.0), &circle, true);
        input.pointer_moved(DVec2::new(5.0, 5.0));
        assert_eq!(input.circle_pos(), DVec2::new(105.0, 55.0));

        input.pointer_entered(DVec2::new(0.0, 0.0), &circle, false);
        assert!(!input.is_tracking());
    }

    #[test]
    fn test_stop_drops_press() {
        let circle = Circle::new(100.0, 50.0, 10.0);
        let mut input = PointerInput::new();
        input.start();
        input.press(DVec2::ZERO, &circle);
        input.stop();
        assert!(!input.is_tracking());
    }

    #[test]
    fn test_shared_handle() {
        let shared = Rc::new(RefCell::new(PointerInput::new()));
        let mut handle = Rc::clone(&shared);
        handle.start();
        shared
            .borrow_mut()
            .press(DVec2::ZERO, &Circle::new(10.0, 10.0, 2.0));
        shared.borrow_mut().pointer_moved(DVec2::new(1.0, 0.0));
        assert!(handle.moved());
        assert_eq!(handle.circle_pos(), DVec2::new(11.0, 10.0));
    }
}
