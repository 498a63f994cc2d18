//! Rectangle and size primitives shared by every coordinate space.
//!
//! A [`Rect`] carries no notion of which space it lives in. Callers keep
//! track of that: normalized detector space (unit square, Y-up), capture
//! pixels (Y-up), or layer points (Y-down).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Width divided by height.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// True when either dimension is non-positive or not finite.
    ///
    /// Mapping and crop derivation are undefined for such sizes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Axis-aligned rectangle with an origin corner and a size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Rect {
    /// X coordinate of the origin corner
    pub x: f64,
    /// Y coordinate of the origin corner
    pub y: f64,
    /// Extent along X
    pub width: f64,
    /// Extent along Y
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with zero size.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Rectangle at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Unit square, the full frame in normalized space.
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Rectangle of the given size centered on `(cx, cy)`.
    pub fn centered_at(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x.max(self.x + self.width)
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y.max(self.y + self.height)
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Size of the rectangle.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Area covered, independent of the sign of width or height.
    #[inline]
    pub fn area(&self) -> f64 {
        (self.max_x() - self.min_x()) * (self.max_y() - self.min_y())
    }

    /// Whether `other` lies fully inside this rectangle. Shared edges count
    /// as inside.
    pub fn contains(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Overlapping region of two rectangles, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.min_x().max(other.min_x());
        let y1 = self.min_y().max(other.min_y());
        let x2 = self.max_x().min(other.max_x());
        let y2 = self.max_y().min(other.max_y());

        if x2 < x1 || y2 < y1 {
            return None;
        }
        Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
    }

    /// Flip between Y-up and Y-down conventions inside the unit square.
    #[inline]
    pub fn flipped_y(&self) -> Rect {
        Rect::new(self.x, 1.0 - self.y - self.height, self.width, self.height)
    }

    /// Mirror horizontally inside the unit square.
    #[inline]
    pub fn mirrored_x(&self) -> Rect {
        Rect::new(1.0 - self.x - self.width, self.y, self.width, self.height)
    }

    /// True when all four components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Translate the origin by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl Mul<Size> for Rect {
    type Output = Rect;

    fn mul(self, rhs: Size) -> Rect {
        Rect::new(
            self.x * rhs.width,
            self.y * rhs.height,
            self.width * rhs.width,
            self.height * rhs.height,
        )
    }
}

impl Div<Size> for Rect {
    type Output = Rect;

    fn div(self, rhs: Size) -> Rect {
        self * Size::new(1.0 / rhs.width, 1.0 / rhs.height)
    }
}

impl Mul<f64> for Rect {
    type Output = Rect;

    fn mul(self, rhs: f64) -> Rect {
        Rect::new(self.x * rhs, self.y * rhs, self.width * rhs, self.height * rhs)
    }
}

impl Div<f64> for Rect {
    type Output = Rect;

    fn div(self, rhs: f64) -> Rect {
        self * (1.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_ignores_sign() {
        let r = Rect::new(10.0, 10.0, -4.0, 5.0);
        assert_eq!(r.area(), 20.0);
        assert_eq!(r.min_x(), 6.0);
        assert_eq!(r.max_x(), 10.0);
    }

    #[test]
    fn test_contains_inclusive_edges() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 600.0);
        assert!(bounds.contains(&Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(bounds.contains(&Rect::new(100.0, 100.0, 50.0, 50.0)));
        assert!(!bounds.contains(&Rect::new(-1.0, 100.0, 50.0, 50.0)));
        assert!(!bounds.contains(&Rect::new(380.0, 100.0, 50.0, 50.0)));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersection(&Rect::new(20.0, 20.0, 1.0, 1.0)), None);
    }

    #[test]
    fn test_flip_and_mirror_are_involutions() {
        let r = Rect::new(0.1, 0.2, 0.3, 0.4);
        let flipped = r.flipped_y();
        assert!((flipped.y - 0.4).abs() < 1e-12);
        let back = flipped.flipped_y();
        assert!((back.y - r.y).abs() < 1e-12);

        let mirrored = r.mirrored_x();
        assert!((mirrored.x - 0.6).abs() < 1e-12);
        assert!((mirrored.mirrored_x().x - r.x).abs() < 1e-12);
    }

    #[test]
    fn test_scale_operators() {
        let r = Rect::new(0.25, 0.5, 0.5, 0.25);
        let px = r * Size::new(1920.0, 1080.0);
        assert_eq!(px, Rect::new(480.0, 540.0, 960.0, 270.0));
        let back = px / Size::new(1920.0, 1080.0);
        assert!((back.x - r.x).abs() < 1e-12);
        assert!((back.height - r.height).abs() < 1e-12);
        assert_eq!(Rect::new(1.0, 2.0, 3.0, 4.0) * 2.0, Rect::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(Rect::new(2.0, 4.0, 6.0, 8.0) / 2.0, Rect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::zero().is_empty());
        assert!(Size::new(f64::NAN, 10.0).is_empty());
        assert!(Size::new(10.0, -1.0).is_empty());
        assert!(!Size::new(400.0, 600.0).is_empty());
    }
}
