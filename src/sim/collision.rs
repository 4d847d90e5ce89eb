//! Collision detection between the player circle and obstacles
//!
//! Two phases: a cheap bounding-box filter over every obstacle, then an exact
//! circle-vs-rectangle test over the survivors. The game only needs to know
//! whether a hit happened, so no contact point or normal is computed.

use super::shape::{Bounds, Circle, Edges, Obstacle};

/// Check whether two bounding boxes overlap (touching counts)
#[inline]
pub fn aabb_overlap<A: Edges + ?Sized, B: Edges + ?Sized>(a: &A, b: &B) -> bool {
    a.left() <= b.right() && a.right() >= b.left() && a.top() <= b.bottom() && a.bottom() >= b.top()
}

/// Exact circle-vs-rectangle test
///
/// Only valid for a rectangle whose bounding box already overlaps the
/// circle's: the side checks assume the broad phase has ruled out shapes far
/// away along the other axis.
pub fn circle_rect_intersects<R: Edges + ?Sized>(circle: &Circle, rect: &R) -> bool {
    let x = circle.center.x;
    let y = circle.center.y;
    let left = rect.left();
    let right = rect.right();
    let top = rect.top();
    let bottom = rect.bottom();

    // Sides: center inside the rectangle's vertical or horizontal strip
    let in_vertical_strip = left <= x && x <= right;
    let in_horizontal_strip = top <= y && y <= bottom;
    if (in_vertical_strip && (circle.bottom() >= top || circle.top() <= bottom))
        || (in_horizontal_strip && (circle.right() >= left || circle.left() <= right))
    {
        return true;
    }

    // Corners: top-left, top-right, bottom-left, bottom-right
    let xleft2 = (x - left) * (x - left);
    let xright2 = (x - right) * (x - right);
    let ytop2 = (y - top) * (y - top);
    let ybottom2 = (y - bottom) * (y - bottom);
    let radius = circle.radius;

    (xleft2 + ytop2).sqrt() <= radius
        || (xright2 + ytop2).sqrt() <= radius
        || (xleft2 + ybottom2).sqrt() <= radius
        || (xright2 + ybottom2).sqrt() <= radius
}

/// Broad and narrow phase for a single obstacle
pub fn circle_intersects<R: Edges + ?Sized>(circle: &Circle, rect: &R) -> bool {
    aabb_overlap(circle, rect) && circle_rect_intersects(circle, rect)
}

/// Check the circle against every obstacle
///
/// `candidates` is scratch space for the broad phase; it is cleared on entry
/// and keeps its allocation across calls.
pub fn has_collision(circle: &Circle, obstacles: &[Obstacle], candidates: &mut Vec<usize>) -> bool {
    candidates.clear();
    candidates.extend(
        obstacles
            .iter()
            .enumerate()
            .filter(|(_, obstacle)| aabb_overlap(circle, *obstacle))
            .map(|(i, _)| i),
    );

    candidates
        .iter()
        .any(|&i| circle_rect_intersects(circle, &obstacles[i]))
}

/// Check whether any part of the circle lies outside the arena
pub fn circle_out_of_bounds(circle: &Circle, bounds: Bounds) -> bool {
    circle.left() < 0.0
        || circle.right() > bounds.width
        || circle.top() < 0.0
        || circle.bottom() > bounds.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::Rect;

    #[test]
    fn test_aabb_touching_counts() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(aabb_overlap(&a, &b));

        let c = Rect::new(10.5, 0.0, 5.0, 5.0);
        assert!(!aabb_overlap(&a, &c));
    }

    #[test]
    fn test_side_collision() {
        // Center in the rectangle's horizontal strip, right edge reaches in
        let circle = Circle::new(50.0, 50.0, 10.0);
        let obstacles = [Obstacle::rect(55.0, 45.0, 20.0, 20.0)];
        let mut candidates = Vec::new();
        assert!(has_collision(&circle, &obstacles, &mut candidates));
        assert_eq!(candidates, vec![0]);
    }

    #[test]
    fn test_far_corner_misses() {
        // Nearest corner is sqrt(200) ≈ 14.14 away
        let circle = Circle::new(0.0, 0.0, 5.0);
        let obstacles = [Obstacle::rect(10.0, 10.0, 10.0, 10.0)];
        let mut candidates = Vec::new();
        assert!(!has_collision(&circle, &obstacles, &mut candidates));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_corner_exactly_on_radius_collides() {
        // Corner (13, 14) is exactly 5 away from (10, 10)
        let circle = Circle::new(10.0, 10.0, 5.0);
        let rect = Rect::new(13.0, 14.0, 10.0, 10.0);
        assert!(circle_intersects(&circle, &rect));
    }

    #[test]
    fn test_bounding_boxes_overlap_but_corner_misses() {
        // Boxes overlap at the corner region but the circle curves away
        let circle = Circle::new(10.0, 10.0, 5.0);
        let rect = Rect::new(14.0, 14.0, 10.0, 10.0);
        assert!(aabb_overlap(&circle, &rect));
        assert!(!circle_intersects(&circle, &rect));
    }

    #[test]
    fn test_degenerate_rect_is_a_line() {
        let circle = Circle::new(10.0, 10.0, 5.0);
        let line = Rect::new(15.0, 0.0, 0.0, 20.0);
        assert!(circle_intersects(&circle, &line));

        let far_line = Rect::new(15.5, 0.0, 0.0, 20.0);
        assert!(!circle_intersects(&circle, &far_line));
    }

    #[test]
    fn test_candidate_buffer_is_reused() {
        let circle = Circle::new(50.0, 50.0, 10.0);
        let obstacles = [
            Obstacle::square(0.0, 0.0, 10.0),
            Obstacle::rect(58.0, 58.0, 20.0, 20.0),
        ];
        let mut candidates = vec![7, 8, 9];
        let hit = has_collision(&circle, &obstacles, &mut candidates);
        // (58, 58) is ~11.3 from the center: boxes overlap, shapes don't
        assert!(!hit);
        assert_eq!(candidates, vec![1]);
    }

    #[test]
    fn test_out_of_bounds() {
        let bounds = Bounds::new(100.0, 50.0);
        assert!(!circle_out_of_bounds(&Circle::new(50.0, 25.0, 10.0), bounds));
        assert!(!circle_out_of_bounds(&Circle::new(10.0, 10.0, 10.0), bounds));
        assert!(circle_out_of_bounds(&Circle::new(9.0, 25.0, 10.0), bounds));
        assert!(circle_out_of_bounds(&Circle::new(50.0, 41.0, 10.0), bounds));
    }
}
