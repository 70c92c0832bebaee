// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position model: closed/open values, intermediate steps and anchor resolution.

use smallvec::SmallVec;

/// Inline capacity for step lists; drawers rarely carry more than a few stops.
pub(crate) const INLINE_STEPS: usize = 4;

/// Ordered list of intermediate steps.
pub type Steps = SmallVec<[Step; INLINE_STEPS]>;

/// An intermediate resting position between the closed and open states.
///
/// The absolute value of a step is
/// `initial_value + offset + maximum_offset * multiplier`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Step {
    /// Fraction of the distance between the closed and open states,
    /// conceptually in `[0, 1]`.
    pub multiplier: f64,
    /// Fixed offset added after applying `multiplier`.
    pub offset: f64,
}

impl Step {
    /// Creates a step from a multiplier and an additional offset.
    #[must_use]
    pub const fn new(multiplier: f64, offset: f64) -> Self {
        Self { multiplier, offset }
    }

    /// Creates a step at `multiplier` of the open distance, with no extra offset.
    #[must_use]
    pub const fn fraction(multiplier: f64) -> Self {
        Self::new(multiplier, 0.0)
    }
}

/// Inclusive range of valid resting values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DrawerBounds {
    /// Smallest valid value.
    pub min: f64,
    /// Largest valid value.
    pub max: f64,
}

impl DrawerBounds {
    /// Returns `true` if `value` lies in `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps `value` into `[min, max]`.
    ///
    /// Unlike [`f64::clamp`] this never panics, even for degenerate bounds.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value > self.max {
            self.max
        } else if value < self.min {
            self.min
        } else {
            value
        }
    }
}

/// Scalar description of where a drawer may rest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionModel {
    /// Value of the closed state.
    pub initial_value: f64,
    /// Signed delta from `initial_value` to the fully open state.
    ///
    /// The sign encodes the opening direction.
    pub maximum_offset: f64,
    /// Intermediate steps, tested in order during anchor resolution.
    pub steps: Steps,
}

impl PositionModel {
    /// Creates a model without intermediate steps.
    #[must_use]
    pub fn new(initial_value: f64, maximum_offset: f64) -> Self {
        Self {
            initial_value,
            maximum_offset,
            steps: Steps::new(),
        }
    }

    /// Value of the fully open state.
    #[must_use]
    pub fn open_value(&self) -> f64 {
        self.initial_value + self.maximum_offset
    }

    /// Smallest resting value, `min(initial, initial + maximum_offset)`.
    #[must_use]
    pub fn min_translate(&self) -> f64 {
        self.initial_value.min(self.open_value())
    }

    /// Largest resting value, `max(initial, initial + maximum_offset)`.
    #[must_use]
    pub fn max_translate(&self) -> f64 {
        self.initial_value.max(self.open_value())
    }

    /// Snapshot of the current resting range.
    #[must_use]
    pub fn bounds(&self) -> DrawerBounds {
        DrawerBounds {
            min: self.min_translate(),
            max: self.max_translate(),
        }
    }

    /// Resolves a step into an absolute value.
    #[must_use]
    pub fn step_value(&self, step: &Step) -> f64 {
        self.initial_value + step.offset + self.maximum_offset * step.multiplier
    }

    /// Resolves the step at `index`, or `None` if out of range.
    #[must_use]
    pub fn step_value_at(&self, index: usize) -> Option<f64> {
        self.steps.get(index).map(|step| self.step_value(step))
    }

    /// Progress of `value` from closed (`0.0`) to open (`1.0`).
    ///
    /// Returns `NaN` when `maximum_offset` is zero.
    #[must_use]
    pub fn progress(&self, value: f64) -> f64 {
        if self.maximum_offset == 0.0 {
            return f64::NAN;
        }
        (value - self.initial_value) / self.maximum_offset
    }

    /// Returns the anchor nearest to `value`.
    ///
    /// The primary anchor is the open or closed bound, picked by comparing
    /// `value` with the midpoint (the closed-side bound wins at exactly the
    /// midpoint). Steps are then tested in order and replace the current
    /// candidate only when strictly closer, so on equal distances the primary
    /// anchor beats any step and an earlier step beats a later one.
    #[must_use]
    pub fn nearest_anchor(&self, value: f64) -> f64 {
        let midpoint = self.initial_value + self.maximum_offset / 2.0;
        let mut position = if value > midpoint {
            self.max_translate()
        } else {
            self.min_translate()
        };
        let mut min_delta = (position - value).abs();
        for step in &self.steps {
            let step_position = self.step_value(step);
            let delta = (step_position - value).abs();
            if delta < min_delta {
                position = step_position;
                min_delta = delta;
            }
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn model_with_steps() -> PositionModel {
        PositionModel {
            initial_value: 32.0,
            maximum_offset: 668.0,
            steps: smallvec![Step::fraction(0.0), Step::fraction(0.5), Step::fraction(1.0)],
        }
    }

    #[test]
    fn bounds_follow_sign_of_maximum_offset() {
        let opening_up = PositionModel::new(32.0, 668.0);
        assert_eq!(opening_up.min_translate(), 32.0);
        assert_eq!(opening_up.max_translate(), 700.0);

        let opening_down = PositionModel::new(-32.0, -668.0);
        assert_eq!(opening_down.min_translate(), -700.0);
        assert_eq!(opening_down.max_translate(), -32.0);
        assert_eq!(opening_down.open_value(), -700.0);
    }

    #[test]
    fn step_values_resolve() {
        let model = model_with_steps();
        assert_eq!(model.step_value_at(0), Some(32.0));
        assert_eq!(model.step_value_at(1), Some(366.0));
        assert_eq!(model.step_value_at(2), Some(700.0));
        assert_eq!(model.step_value_at(3), None);

        let offset_step = Step::new(0.5, -16.0);
        assert_eq!(model.step_value(&offset_step), 350.0);
    }

    #[test]
    fn progress_is_nan_without_travel() {
        let model = PositionModel::new(10.0, 0.0);
        assert!(model.progress(10.0).is_nan());

        let model = PositionModel::new(0.0, -200.0);
        assert_eq!(model.progress(-50.0), 0.25);
    }

    #[test]
    fn nearest_anchor_without_steps_picks_closer_bound() {
        let model = PositionModel::new(0.0, 100.0);
        assert_eq!(model.nearest_anchor(10.0), 0.0);
        assert_eq!(model.nearest_anchor(90.0), 100.0);
        // Exactly at the midpoint the closed side wins.
        assert_eq!(model.nearest_anchor(50.0), 0.0);
        // Overscroll still resolves to a bound.
        assert_eq!(model.nearest_anchor(130.0), 100.0);
        assert_eq!(model.nearest_anchor(-20.0), 0.0);
    }

    #[test]
    fn nearest_anchor_with_negative_offset() {
        let model = PositionModel::new(0.0, -100.0);
        assert_eq!(model.nearest_anchor(-10.0), 0.0);
        assert_eq!(model.nearest_anchor(-90.0), -100.0);
    }

    #[test]
    fn nearest_anchor_prefers_strictly_closer_step() {
        let model = model_with_steps();
        assert_eq!(model.nearest_anchor(340.0), 366.0);
        assert_eq!(model.nearest_anchor(600.0), 700.0);
        assert_eq!(model.nearest_anchor(100.0), 32.0);
    }

    #[test]
    fn primary_anchor_wins_ties_against_steps() {
        // Step at 25 is exactly as far from 12.5 as the closed bound at 0.
        let model = PositionModel {
            initial_value: 0.0,
            maximum_offset: 100.0,
            steps: smallvec![Step::fraction(0.25)],
        };
        assert_eq!(model.nearest_anchor(12.5), 0.0);
    }

    #[test]
    fn earlier_step_wins_ties_between_steps() {
        let model = PositionModel {
            initial_value: 0.0,
            maximum_offset: 100.0,
            steps: smallvec![Step::fraction(0.4), Step::fraction(0.6)],
        };
        assert_eq!(model.nearest_anchor(50.0), 40.0);
    }

    #[test]
    fn bounds_clamp_and_contain() {
        let bounds = DrawerBounds {
            min: -10.0,
            max: 10.0,
        };
        assert!(bounds.contains(-10.0));
        assert!(bounds.contains(10.0));
        assert!(!bounds.contains(10.5));
        assert_eq!(bounds.clamp(42.0), 10.0);
        assert_eq!(bounds.clamp(-42.0), -10.0);
        assert_eq!(bounds.clamp(3.0), 3.0);
    }
}
