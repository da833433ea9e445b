//! Axis-aligned rectangles in source-image pixel coordinates.

use serde::Serialize;

/// A rectangle `{x, y, width, height}` inside a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width x height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Build from two corner coordinates, `(x0, y0)` inclusive and `(x1, y1)` exclusive.
    pub fn from_bounds(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow by `amount` on every side, clamped to a `width x height` image.
    pub fn padded(&self, amount: u32, width: u32, height: u32) -> Self {
        let x0 = self.x.saturating_sub(amount);
        let y0 = self.y.saturating_sub(amount);
        let x1 = (self.right() + amount).min(width);
        let y1 = (self.bottom() + amount).min(height);
        Self::from_bounds(x0, y0, x1, y1)
    }

    /// Clip against a `width x height` image.
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        let x0 = self.x.min(width);
        let y0 = self.y.min(height);
        Self::from_bounds(x0, y0, self.right().min(width), self.bottom().min(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Region::new(2, 3, 10, 20);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 23);
    }

    #[test]
    fn test_padded_inside() {
        let r = Region::new(10, 10, 5, 5).padded(2, 100, 100);
        assert_eq!(r, Region::new(8, 8, 9, 9));
    }

    #[test]
    fn test_padded_clamps_to_image() {
        let r = Region::new(1, 0, 98, 99).padded(2, 100, 100);
        assert_eq!(r, Region::new(0, 0, 100, 100));
    }

    #[test]
    fn test_clamped() {
        let r = Region::new(90, 90, 20, 20).clamped(100, 95);
        assert_eq!(r, Region::new(90, 90, 10, 5));
        assert!(Region::new(120, 0, 5, 5).clamped(100, 100).is_empty());
    }

    #[test]
    fn test_contains() {
        let r = Region::new(4, 4, 2, 2);
        assert!(r.contains(4, 4));
        assert!(r.contains(5, 5));
        assert!(!r.contains(6, 5));
        assert!(!r.contains(3, 4));
    }
}
