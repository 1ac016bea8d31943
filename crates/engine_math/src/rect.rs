//! Integer screen-space rectangles.
//!
//! [`Rect`] is used for the camera viewport and for every draw destination
//! handed to the renderer backend.

use serde::{Deserialize, Serialize};

use glam::Vec2;

/// An axis-aligned rectangle in pixel coordinates.
///
/// `x`/`y` is the top-left corner; `w`/`h` are never expected to be
/// negative but are kept signed to match backend draw APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Rect {
    /// Create a rectangle from its corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle of the given size anchored at the origin.
    #[must_use]
    pub const fn from_size(w: i32, h: i32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Build a rectangle from a floating point position and size, rounding
    /// to the nearest pixel.
    #[must_use]
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        let p = position.round();
        let s = size.round();
        Self::new(p.x as i32, p.y as i32, s.x as i32, s.y as i32)
    }

    /// Right edge (exclusive), clamped to `i32::MAX`.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive), clamped to `i32::MAX`.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Returns `true` if the two rectangles share at least one pixel.
    #[must_use]
    pub const fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Move the rectangle by the given offset.
    #[must_use]
    pub const fn offset(mut self, dx: i32, dy: i32) -> Self {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_empty_never_intersects() {
        let camera = Rect::from_size(800, 600);
        assert!(!camera.intersects(&Rect::new(10, 10, 0, 5)));
    }

    #[test]
    fn test_from_position_size_rounds() {
        let r = Rect::from_position_size(Vec2::new(1.6, 2.4), Vec2::new(31.5, 32.0));
        assert_eq!(r, Rect::new(2, 2, 32, 32));
    }

    #[test]
    fn test_offset() {
        assert_eq!(Rect::new(1, 2, 3, 4).offset(-1, 3), Rect::new(0, 5, 3, 4));
    }

    #[test]
    fn test_huge_rect_edges_saturate() {
        let huge = Rect::new(1, 1, i32::MAX, i32::MAX);
        assert_eq!(huge.right(), i32::MAX);
        assert_eq!(huge.bottom(), i32::MAX);
        let camera = Rect::from_size(800, 600);
        assert!(huge.intersects(&camera));
        assert!(camera.intersects(&huge));
        assert_eq!(huge.offset(i32::MAX, 0).x, i32::MAX);
    }
}
