// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Point, Rect, Size, Vec2};

/// Axis along which a drawer travels.
///
/// The axis is fixed for the lifetime of a [`Drawer`](crate::Drawer). It selects
/// which scalar component of 2D translations, velocities and scroll offsets is
/// read and written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// The drawer moves along X.
    Horizontal,
    /// The drawer moves along Y.
    #[default]
    Vertical,
}

impl Axis {
    /// Returns the component of `v` along this axis.
    #[must_use]
    pub fn vec_component(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Returns the coordinate of `p` along this axis.
    #[must_use]
    pub fn point_component(self, p: Point) -> f64 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    /// Returns `p` with its coordinate along this axis replaced by `value`.
    ///
    /// The cross-axis coordinate is left untouched.
    #[must_use]
    pub fn with_point_component(self, p: Point, value: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(value, p.y),
            Self::Vertical => Point::new(p.x, value),
        }
    }

    /// Returns the extent of `size` along this axis.
    #[must_use]
    pub fn size_component(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Returns the extent of `rect` along this axis.
    #[must_use]
    pub fn rect_extent(self, rect: Rect) -> f64 {
        self.size_component(rect.size())
    }

    /// Leading inset (left or top) along this axis.
    #[must_use]
    pub fn leading_inset(self, insets: Insets) -> f64 {
        match self {
            Self::Horizontal => insets.x0,
            Self::Vertical => insets.y0,
        }
    }

    /// Trailing inset (right or bottom) along this axis.
    #[must_use]
    pub fn trailing_inset(self, insets: Insets) -> f64 {
        match self {
            Self::Horizontal => insets.x1,
            Self::Vertical => insets.y1,
        }
    }

    /// Builds a translation of `value` along this axis.
    #[must_use]
    pub fn translation(self, value: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(value, 0.0),
            Self::Vertical => Vec2::new(0.0, value),
        }
    }

    /// Returns `true` if `velocity` is dominated by this axis.
    ///
    /// Used for gesture arbitration: a horizontal drawer only claims a drag
    /// whose horizontal speed exceeds its vertical speed, and vice versa. Ties
    /// are claimed by neither axis.
    #[must_use]
    pub fn is_dominant(self, velocity: Vec2) -> bool {
        match self {
            Self::Horizontal => velocity.x.abs() > velocity.y.abs(),
            Self::Vertical => velocity.x.abs() < velocity.y.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_follow_axis() {
        let v = Vec2::new(3.0, -4.0);
        assert_eq!(Axis::Horizontal.vec_component(v), 3.0);
        assert_eq!(Axis::Vertical.vec_component(v), -4.0);

        let p = Point::new(10.0, 20.0);
        assert_eq!(Axis::Horizontal.point_component(p), 10.0);
        assert_eq!(Axis::Vertical.point_component(p), 20.0);
    }

    #[test]
    fn with_point_component_keeps_cross_axis() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(
            Axis::Horizontal.with_point_component(p, 5.0),
            Point::new(5.0, 20.0)
        );
        assert_eq!(
            Axis::Vertical.with_point_component(p, 5.0),
            Point::new(10.0, 5.0)
        );
    }

    #[test]
    fn insets_and_extents() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Axis::Horizontal.leading_inset(insets), 1.0);
        assert_eq!(Axis::Vertical.leading_inset(insets), 2.0);
        assert_eq!(Axis::Horizontal.trailing_inset(insets), 3.0);
        assert_eq!(Axis::Vertical.trailing_inset(insets), 4.0);

        let rect = Rect::new(0.0, 50.0, 320.0, 530.0);
        assert_eq!(Axis::Horizontal.rect_extent(rect), 320.0);
        assert_eq!(Axis::Vertical.rect_extent(rect), 480.0);
    }

    #[test]
    fn translation_is_axis_aligned() {
        assert_eq!(Axis::Horizontal.translation(7.0), Vec2::new(7.0, 0.0));
        assert_eq!(Axis::Vertical.translation(7.0), Vec2::new(0.0, 7.0));
    }

    #[test]
    fn dominance_arbitrates_between_axes() {
        let mostly_x = Vec2::new(-300.0, 40.0);
        let mostly_y = Vec2::new(20.0, 500.0);
        let diagonal = Vec2::new(100.0, -100.0);

        assert!(Axis::Horizontal.is_dominant(mostly_x));
        assert!(!Axis::Vertical.is_dominant(mostly_x));
        assert!(Axis::Vertical.is_dominant(mostly_y));
        assert!(!Axis::Horizontal.is_dominant(mostly_y));

        // Exact diagonals are claimed by neither axis.
        assert!(!Axis::Horizontal.is_dominant(diagonal));
        assert!(!Axis::Vertical.is_dominant(diagonal));
    }
}
