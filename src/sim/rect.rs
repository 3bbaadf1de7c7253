//! Axis-aligned rectangle geometry
//!
//! Every collider in a level (platform, goal, hazard, pickup) and the actor
//! itself is an axis-aligned rectangle in screen space:
//! - `pos`: top-left corner (y grows downward)
//! - `size`: width and height

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width (x) and height (y)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Left edge
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// True if both dimensions are strictly positive
    pub fn has_area(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    /// True if this rectangle lies entirely inside `[0, width] x [0, height]`
    pub fn inside_bounds(&self, width: f32, height: f32) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= width && self.bottom() <= height
    }

    /// Strict overlap of the horizontal spans (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Strict overlap of the vertical spans (touching edges don't count)
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps_x(&b));
        assert!(a.overlaps_y(&b));
    }

    #[test]
    fn test_inside_bounds() {
        assert!(Rect::new(0.0, 0.0, 800.0, 600.0).inside_bounds(800.0, 600.0));
        assert!(!Rect::new(790.0, 0.0, 20.0, 20.0).inside_bounds(800.0, 600.0));
        assert!(!Rect::new(-1.0, 0.0, 20.0, 20.0).inside_bounds(800.0, 600.0));
    }

    #[test]
    fn test_has_area() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).has_area());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).has_area());
    }
}
