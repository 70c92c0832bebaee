// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elastic overscroll.
//!
//! While a drag pushes the drawer past its resting range, the excess is
//! compressed with a rational curve that approaches, but never reaches, a
//! configured bounce distance:
//!
//! ```text
//! smooth(x, bound) = -a² / (x + a) + a,   a = sign(x) · |bound|
//! ```
//!
//! which simplifies to `a·x / (x + a)`. The curve has slope `1` at the origin,
//! so the drawer tracks the finger exactly when it first leaves the range.

use crate::position::DrawerBounds;

/// Compresses an unbounded excess `x` into `(-|bound|, |bound|)`.
///
/// Only the magnitude of `bound` is used; the sign of the result follows `x`.
/// The curve is odd, strictly monotonic, passes through the origin and tends
/// to `±|bound|` as `x → ±∞`. A zero `bound` disables overscroll.
///
/// ```
/// use understory_drawer::smooth;
///
/// assert_eq!(smooth(0.0, 40.0), 0.0);
/// assert!(smooth(1.0e9, 40.0) < 40.0);
/// assert_eq!(smooth(-32.0, 40.0), -smooth(32.0, 40.0));
/// ```
#[must_use]
pub fn smooth(x: f64, bound: f64) -> f64 {
    let magnitude = bound.abs();
    if magnitude == 0.0 {
        return 0.0;
    }
    let a = if x < 0.0 { -magnitude } else { magnitude };
    -(a * a) / (x + a) + a
}

/// Applies elastic compression to `value` when it leaves `bounds`.
///
/// Values inside the bounds are returned unchanged. Values beyond a bound are
/// pulled back to `bound ± smooth(excess, max_bounce)`.
#[must_use]
pub fn rubber_band(value: f64, bounds: DrawerBounds, max_bounce: f64) -> f64 {
    if value > bounds.max {
        bounds.max + smooth(value - bounds.max, max_bounce)
    } else if value < bounds.min {
        bounds.min + smooth(value - bounds.min, -max_bounce)
    } else {
        value
    }
}
