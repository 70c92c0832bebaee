// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::axis::Axis;
use crate::config::DrawerConfig;
use crate::delegate::DrawerDelegate;
use crate::error::DrawerError;
use crate::position::{DrawerBounds, PositionModel, Step};
use crate::receiver::ValueReceiver;
use crate::spring::SpringAnimation;

/// The coordinating engine for a single drawer.
///
/// A `Drawer` owns the [`PositionModel`], a [`ValueReceiver`] that renders the
/// value, and a [`DrawerDelegate`] that observes it. Imperative operations
/// ([`open`](Self::open), [`close`](Self::close), [`set_step`](Self::set_step))
/// live here; interactive input is translated by
/// [`DragHandler`](crate::DragHandler) and [`ScrollHandler`](crate::ScrollHandler),
/// which borrow the drawer for each event.
#[derive(Debug)]
pub struct Drawer<R, D = ()> {
    receiver: R,
    axis: Axis,
    position: PositionModel,
    damping_ratio: f64,
    animation_speed: f64,
    delegate: D,
}

impl<R: ValueReceiver> Drawer<R> {
    /// Creates a drawer without a delegate.
    pub fn new(receiver: R, axis: Axis, config: DrawerConfig) -> Self {
        if config.maximum_offset == 0.0 {
            log::warn!("drawer created with zero maximum offset; transition progress is undefined");
        }
        Self {
            receiver,
            axis,
            position: config.position_model(),
            damping_ratio: config.damping_ratio,
            animation_speed: config.animation_speed,
            delegate: (),
        }
    }
}

impl<R: ValueReceiver, D> Drawer<R, D> {
    /// Replaces the delegate, returning a drawer typed over the new one.
    pub fn with_delegate<D2: DrawerDelegate>(self, delegate: D2) -> Drawer<R, D2> {
        Drawer {
            receiver: self.receiver,
            axis: self.axis,
            position: self.position,
            damping_ratio: self.damping_ratio,
            animation_speed: self.animation_speed,
            delegate,
        }
    }

    /// The axis the drawer moves along.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The position model.
    #[must_use]
    pub fn position(&self) -> &PositionModel {
        &self.position
    }

    /// The value receiver.
    #[must_use]
    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    /// Mutable access to the value receiver.
    ///
    /// Writing through the receiver bypasses delegate notifications.
    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    /// The delegate.
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Mutable access to the delegate.
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// The value currently applied by the receiver.
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.receiver.current_value()
    }

    /// Whether gesture and scroll deltas are negated before use.
    #[must_use]
    pub fn inverse_received_offset(&self) -> bool {
        self.receiver.inverse_received_offset()
    }

    /// `-1.0` when deltas are negated, `1.0` otherwise.
    #[must_use]
    pub fn offset_sign(&self) -> f64 {
        if self.inverse_received_offset() {
            -1.0
        } else {
            1.0
        }
    }

    /// Value of the closed state.
    #[must_use]
    pub fn initial_value(&self) -> f64 {
        self.position.initial_value
    }

    /// Sets the value of the closed state.
    ///
    /// The current value is left untouched.
    pub fn set_initial_value(&mut self, initial_value: f64) {
        self.position.initial_value = initial_value;
    }

    /// Signed delta from the closed state to the fully open state.
    #[must_use]
    pub fn maximum_offset(&self) -> f64 {
        self.position.maximum_offset
    }

    /// Sets the signed delta from the closed state to the fully open state.
    pub fn set_maximum_offset(&mut self, maximum_offset: f64) {
        if maximum_offset == 0.0 {
            log::warn!("drawer maximum offset set to zero; transition progress is undefined");
        }
        self.position.maximum_offset = maximum_offset;
    }

    /// Intermediate steps.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.position.steps
    }

    /// Replaces the intermediate steps.
    pub fn set_steps(&mut self, steps: impl IntoIterator<Item = Step>) {
        self.position.steps = steps.into_iter().collect();
    }

    /// Spring damping ratio used for settle animations.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// Sets the spring damping ratio.
    pub fn set_damping_ratio(&mut self, damping_ratio: f64) {
        self.damping_ratio = damping_ratio;
    }

    /// Animation speed; settle durations are `sqrt(distance / speed)`.
    #[must_use]
    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }

    /// Sets the animation speed.
    pub fn set_animation_speed(&mut self, animation_speed: f64) {
        self.animation_speed = animation_speed;
    }

    /// Current resting range.
    #[must_use]
    pub fn bounds(&self) -> DrawerBounds {
        self.position.bounds()
    }

    /// Smallest resting value.
    #[must_use]
    pub fn min_translate(&self) -> f64 {
        self.position.min_translate()
    }

    /// Largest resting value.
    #[must_use]
    pub fn max_translate(&self) -> f64 {
        self.position.max_translate()
    }

    /// Progress from closed (`0.0`) to open (`1.0`).
    ///
    /// `NaN` when [`maximum_offset`](Self::maximum_offset) is zero; callers that
    /// drive visuals from it must guard.
    #[must_use]
    pub fn transition_progress(&self) -> f64 {
        self.position.progress(self.current_value())
    }

    /// The open, closed or step value nearest to the current value.
    ///
    /// See [`PositionModel::nearest_anchor`] for the tie-break.
    #[must_use]
    pub fn nearest_anchor_position(&self) -> f64 {
        self.position.nearest_anchor(self.current_value())
    }

    /// Settle duration, in seconds, for moving from the current value to `value`.
    #[must_use]
    pub fn animation_duration(&self, value: f64) -> f64 {
        if self.animation_speed.is_nan() || self.animation_speed <= 0.0 {
            log::warn!(
                "non-positive drawer animation speed {}; applying without duration",
                self.animation_speed
            );
            return 0.0;
        }
        libm::sqrt((self.current_value() - value).abs() / self.animation_speed)
    }
}

impl<R: ValueReceiver, D: DrawerDelegate> Drawer<R, D> {
    /// Moves to the fully open state.
    pub fn open(&mut self, animated: bool) {
        let value = self.position.open_value();
        log::debug!("opening drawer to {value}");
        self.set_value(value, animated);
    }

    /// Moves to the closed state.
    pub fn close(&mut self, animated: bool) {
        let value = self.position.initial_value;
        log::debug!("closing drawer to {value}");
        self.set_value(value, animated);
    }

    /// Moves to the step at `index`.
    ///
    /// Nothing changes if `index` is out of range.
    pub fn set_step(&mut self, index: usize, animated: bool) -> Result<(), DrawerError> {
        let Some(value) = self.position.step_value_at(index) else {
            let len = self.position.steps.len();
            log::warn!("ignoring drawer step {index}: only {len} steps configured");
            return Err(DrawerError::StepOutOfRange { index, len });
        };
        log::debug!("moving drawer to step {index} at {value}");
        self.set_value(value, animated);
        Ok(())
    }

    fn set_value(&mut self, value: f64, animated: bool) {
        if animated {
            self.set_with_animation(value, 0.0);
        } else {
            self.set(value);
        }
    }

    /// Applies `value` immediately and reports the new progress.
    pub fn set(&mut self, value: f64) {
        self.receiver.set(value);
        let progress = self.transition_progress();
        self.delegate.on_transition_progress(progress);
    }

    /// Animates to `value` with a spring seeded with `velocity`.
    pub fn set_with_animation(&mut self, value: f64, velocity: f64) {
        self.set_with_animation_and(value, velocity, || {});
    }

    /// Animates to `value`, running `under_animation` inside the same animation
    /// transaction once the value has been applied.
    ///
    /// Handlers use the callback to move a scroll offset in lockstep with the
    /// drawer.
    pub fn set_with_animation_and(
        &mut self,
        value: f64,
        velocity: f64,
        mut under_animation: impl FnMut(),
    ) {
        let spring = SpringAnimation::new(
            self.animation_duration(value),
            self.damping_ratio,
            velocity,
        );
        log::trace!("animating drawer to {value} with {spring:?}");
        let position = &self.position;
        let delegate = &mut self.delegate;
        self.receiver.set_animated(value, spring, &mut |applied: f64| {
            under_animation();
            delegate.on_transition_progress(position.progress(applied));
        });
    }

    /// Notifies the delegate that an interaction started moving the drawer.
    pub fn start_moving(&mut self) {
        self.delegate.on_start_moving();
    }

    /// Notifies the delegate that an interaction released the drawer.
    pub fn end_moving(&mut self) {
        self.delegate.on_end_moving();
    }
}
