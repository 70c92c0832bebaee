// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::position::{PositionModel, Step, Steps};

/// Default spring damping ratio for settle animations.
pub const DEFAULT_DAMPING_RATIO: f64 = 0.7;

/// Default animation speed, in value units per second squared.
///
/// Settle durations are `sqrt(distance / animation_speed)` seconds.
pub const DEFAULT_ANIMATION_SPEED: f64 = 600.0;

/// Construction-time configuration for a [`Drawer`](crate::Drawer).
///
/// ```
/// use understory_drawer::{DrawerConfig, Step};
///
/// let config = DrawerConfig::new(32.0, 668.0)
///     .with_steps([Step::fraction(0.3)])
///     .with_damping_ratio(0.9);
/// assert_eq!(config.animation_speed, 600.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DrawerConfig {
    /// Value of the closed state.
    pub initial_value: f64,
    /// Signed delta from the closed state to the fully open state.
    pub maximum_offset: f64,
    /// Intermediate resting positions.
    pub steps: Steps,
    /// Spring damping ratio: `1.0` settles without oscillation, values closer
    /// to `0.0` oscillate more.
    pub damping_ratio: f64,
    /// Controls settle duration; larger is faster.
    pub animation_speed: f64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            initial_value: 0.0,
            maximum_offset: 0.0,
            steps: Steps::new(),
            damping_ratio: DEFAULT_DAMPING_RATIO,
            animation_speed: DEFAULT_ANIMATION_SPEED,
        }
    }
}

impl DrawerConfig {
    /// Creates a configuration with default animation parameters and no steps.
    #[must_use]
    pub fn new(initial_value: f64, maximum_offset: f64) -> Self {
        Self {
            initial_value,
            maximum_offset,
            ..Self::default()
        }
    }

    /// Replaces the intermediate steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Sets the spring damping ratio.
    #[must_use]
    pub fn with_damping_ratio(mut self, damping_ratio: f64) -> Self {
        self.damping_ratio = damping_ratio;
        self
    }

    /// Sets the animation speed.
    #[must_use]
    pub fn with_animation_speed(mut self, animation_speed: f64) -> Self {
        self.animation_speed = animation_speed;
        self
    }

    pub(crate) fn position_model(&self) -> PositionModel {
        PositionModel {
            initial_value: self.initial_value,
            maximum_offset: self.maximum_offset,
            steps: self.steps.clone(),
        }
    }
}
