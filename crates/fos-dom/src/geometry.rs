//! Geometry
//!
//! DOMRect in viewport coordinates, as returned by getBoundingClientRect.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create empty rect
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Horizontal center
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Move by an offset
    pub fn translate(&self, dx: f64, dy: f64) -> DOMRect {
        DOMRect::from_xywh(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Check if point is inside
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Check if rects overlap (touching edges do not count)
    pub fn intersects(&self, other: &DOMRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest rect containing both
    pub fn union(&self, other: &DOMRect) -> DOMRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        DOMRect::from_xywh(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_rect() {
        let rect = DOMRect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.center_x(), 60.0);
    }

    #[test]
    fn test_intersects() {
        let rect1 = DOMRect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let rect2 = DOMRect::from_xywh(50.0, 50.0, 100.0, 100.0);
        let rect3 = DOMRect::from_xywh(100.0, 0.0, 50.0, 50.0);

        assert!(rect1.intersects(&rect2));
        assert!(!rect1.intersects(&rect3));
    }

    #[test]
    fn test_union() {
        let a = DOMRect::from_xywh(10.0, 10.0, 10.0, 10.0);
        let b = DOMRect::from_xywh(0.0, 30.0, 5.0, 5.0);
        assert_eq!(a.union(&b), DOMRect::from_xywh(0.0, 10.0, 20.0, 25.0));
    }
}
