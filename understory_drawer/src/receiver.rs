// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value receivers: the bridge between the drawer value and whatever renders it.
//!
//! A [`ValueReceiver`] reports the current drawer value and applies new ones,
//! optionally inside a spring animation. Two receivers ship with the crate:
//!
//! - [`TransformReceiver`] writes an axis-aligned translation to a
//!   [`TransformTarget`].
//! - [`ConstraintReceiver`] writes a constraint-like constant to a
//!   [`ConstraintTarget`] and asks it to lay out.
//!
//! Both hold a [`Weak`] reference to their target. Once the host drops the
//! target, the receiver becomes inert: `set` calls are ignored instead of
//! faulting.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use kurbo::Affine;

use crate::axis::Axis;
use crate::spring::SpringAnimation;

/// Sink for drawer values.
pub trait ValueReceiver {
    /// The value currently applied.
    fn current_value(&self) -> f64;

    /// Whether raw gesture and scroll deltas must be negated before they are
    /// added to the drawer value.
    ///
    /// This is needed when the receiver grows in the opposite direction to the
    /// gesture, for example a constraint pinned to a trailing edge.
    fn inverse_received_offset(&self) -> bool {
        false
    }

    /// Applies `value` immediately.
    fn set(&mut self, value: f64);

    /// Applies `value` under a spring animation.
    ///
    /// `under_animation` must run exactly once, after `value` has been applied,
    /// inside the same animation transaction. It receives the value actually
    /// committed, which is what [`current_value`](Self::current_value) reports
    /// afterwards and may differ from `value` (a detached target, for example).
    /// The default implementation has no animation primitive and applies both
    /// immediately.
    fn set_animated(
        &mut self,
        value: f64,
        spring: SpringAnimation,
        under_animation: &mut dyn FnMut(f64),
    ) {
        let _ = spring;
        self.set(value);
        under_animation(self.current_value());
    }
}

impl<R: ValueReceiver + ?Sized> ValueReceiver for Box<R> {
    fn current_value(&self) -> f64 {
        (**self).current_value()
    }

    fn inverse_received_offset(&self) -> bool {
        (**self).inverse_received_offset()
    }

    fn set(&mut self, value: f64) {
        (**self).set(value);
    }

    fn set_animated(
        &mut self,
        value: f64,
        spring: SpringAnimation,
        under_animation: &mut dyn FnMut(f64),
    ) {
        (**self).set_animated(value, spring, under_animation);
    }
}

/// Host spring animation primitive.
///
/// Implementations open an animation transaction described by `spring`, run
/// `changes` exactly once inside it, and return. Model values committed by
/// `changes` are final immediately; the host animates their presentation on
/// its own clock. Starting a new animation while another is in flight must
/// supersede the older one.
pub trait SpringAnimator {
    /// Runs `changes` inside a spring animation.
    fn animate(&mut self, spring: SpringAnimation, changes: &mut dyn FnMut());
}

/// Something that can be moved with an affine transform.
pub trait TransformTarget {
    /// Replaces the target's transform.
    fn set_transform(&mut self, transform: Affine);
}

/// Something positioned by a single layout constant.
pub trait ConstraintTarget {
    /// The current constant.
    fn constant(&self) -> f64;

    /// Replaces the constant.
    fn set_constant(&mut self, constant: f64);

    /// Runs any pending layout so the new constant becomes visible.
    fn layout_if_needed(&mut self) {}
}

/// Drives a [`TransformTarget`] with an axis-aligned translation.
///
/// The receiver owns the drawer value; the target only sees the resulting
/// transform. A value of exactly `0.0` writes [`Affine::IDENTITY`].
pub struct TransformReceiver<T> {
    target: Weak<RefCell<T>>,
    axis: Axis,
    current_value: f64,
    animator: Option<Box<dyn SpringAnimator>>,
}

impl<T: TransformTarget> TransformReceiver<T> {
    /// Creates a receiver that moves `target` along `axis`.
    #[must_use]
    pub fn new(target: &Rc<RefCell<T>>, axis: Axis) -> Self {
        Self {
            target: Rc::downgrade(target),
            axis,
            current_value: 0.0,
            animator: None,
        }
    }

    /// Uses `animator` for animated updates.
    #[must_use]
    pub fn with_animator(mut self, animator: impl SpringAnimator + 'static) -> Self {
        self.animator = Some(Box::new(animator));
        self
    }

    /// Returns `true` while the target is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.target.strong_count() > 0
    }
}

fn apply_transform<T: TransformTarget>(
    target: &Weak<RefCell<T>>,
    axis: Axis,
    current_value: &mut f64,
    value: f64,
) {
    let Some(target) = target.upgrade() else {
        return;
    };
    let Ok(mut target) = target.try_borrow_mut() else {
        log::warn!("transform target is already borrowed; dropping drawer value {value}");
        return;
    };
    *current_value = value;
    let transform = if value == 0.0 {
        Affine::IDENTITY
    } else {
        Affine::translate(axis.translation(value))
    };
    target.set_transform(transform);
}

impl<T: TransformTarget> ValueReceiver for TransformReceiver<T> {
    fn current_value(&self) -> f64 {
        self.current_value
    }

    fn set(&mut self, value: f64) {
        apply_transform(&self.target, self.axis, &mut self.current_value, value);
    }

    fn set_animated(
        &mut self,
        value: f64,
        spring: SpringAnimation,
        under_animation: &mut dyn FnMut(f64),
    ) {
        let Self {
            target,
            axis,
            current_value,
            animator,
        } = self;
        let mut changes = || {
            apply_transform(target, *axis, current_value, value);
            under_animation(*current_value);
        };
        match animator {
            Some(animator) => animator.animate(spring, &mut changes),
            None => changes(),
        }
    }
}

impl<T> fmt::Debug for TransformReceiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformReceiver")
            .field("attached", &(self.target.strong_count() > 0))
            .field("axis", &self.axis)
            .field("current_value", &self.current_value)
            .field("animated", &self.animator.is_some())
            .finish_non_exhaustive()
    }
}

/// Drives a [`ConstraintTarget`] by rewriting its constant.
///
/// The current value is read back from the target, so a detached target
/// reports `0.0`.
pub struct ConstraintReceiver<C> {
    target: Weak<RefCell<C>>,
    inverted: bool,
    animator: Option<Box<dyn SpringAnimator>>,
}

impl<C: ConstraintTarget> ConstraintReceiver<C> {
    /// Creates a receiver for `target`.
    ///
    /// Pass `inverted = true` when the constant grows from right to left or from
    /// bottom to top, so that gesture deltas are negated.
    #[must_use]
    pub fn new(target: &Rc<RefCell<C>>, inverted: bool) -> Self {
        Self {
            target: Rc::downgrade(target),
            inverted,
            animator: None,
        }
    }

    /// Uses `animator` for animated updates.
    #[must_use]
    pub fn with_animator(mut self, animator: impl SpringAnimator + 'static) -> Self {
        self.animator = Some(Box::new(animator));
        self
    }

    /// Returns `true` while the target is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.target.strong_count() > 0
    }
}

fn read_constant<C: ConstraintTarget>(target: &Weak<RefCell<C>>) -> f64 {
    target
        .upgrade()
        .and_then(|target| target.try_borrow().ok().map(|target| target.constant()))
        .unwrap_or(0.0)
}

fn apply_constant<C: ConstraintTarget>(target: &Weak<RefCell<C>>, value: f64) {
    let Some(target) = target.upgrade() else {
        return;
    };
    let Ok(mut target) = target.try_borrow_mut() else {
        log::warn!("constraint target is already borrowed; dropping drawer value {value}");
        return;
    };
    target.set_constant(value);
    target.layout_if_needed();
}

impl<C: ConstraintTarget> ValueReceiver for ConstraintReceiver<C> {
    fn current_value(&self) -> f64 {
        read_constant(&self.target)
    }

    fn inverse_received_offset(&self) -> bool {
        self.inverted
    }

    fn set(&mut self, value: f64) {
        apply_constant(&self.target, value);
    }

    fn set_animated(
        &mut self,
        value: f64,
        spring: SpringAnimation,
        under_animation: &mut dyn FnMut(f64),
    ) {
        let target = &self.target;
        let mut changes = || {
            apply_constant(target, value);
            under_animation(read_constant(target));
        };
        match &mut self.animator {
            Some(animator) => animator.animate(spring, &mut changes),
            None => changes(),
        }
    }
}

impl<C> fmt::Debug for ConstraintReceiver<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintReceiver")
            .field("attached", &(self.target.strong_count() > 0))
            .field("inverted", &self.inverted)
            .field("animated", &self.animator.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::Vec2;

    #[derive(Default)]
    struct Panel {
        transforms: Vec<Affine>,
    }

    impl TransformTarget for Panel {
        fn set_transform(&mut self, transform: Affine) {
            self.transforms.push(transform);
        }
    }

    #[derive(Default)]
    struct Anchor {
        constant: f64,
        layouts: usize,
    }

    impl ConstraintTarget for Anchor {
        fn constant(&self) -> f64 {
            self.constant
        }

        fn set_constant(&mut self, constant: f64) {
            self.constant = constant;
        }

        fn layout_if_needed(&mut self) {
            self.layouts += 1;
        }
    }

    struct CountingAnimator {
        springs: Rc<RefCell<Vec<SpringAnimation>>>,
    }

    impl SpringAnimator for CountingAnimator {
        fn animate(&mut self, spring: SpringAnimation, changes: &mut dyn FnMut()) {
            self.springs.borrow_mut().push(spring);
            changes();
        }
    }

    #[test]
    fn transform_receiver_translates_along_axis() {
        let panel = Rc::new(RefCell::new(Panel::default()));
        let mut receiver = TransformReceiver::new(&panel, Axis::Horizontal);

        receiver.set(120.0);
        receiver.set(0.0);

        assert_eq!(receiver.current_value(), 0.0);
        let panel = panel.borrow();
        assert_eq!(
            panel.transforms,
            [Affine::translate(Vec2::new(120.0, 0.0)), Affine::IDENTITY]
        );
    }

    #[test]
    fn transform_receiver_goes_inert_when_target_dropped() {
        let panel = Rc::new(RefCell::new(Panel::default()));
        let mut receiver = TransformReceiver::new(&panel, Axis::Vertical);
        receiver.set(10.0);
        drop(panel);

        assert!(!receiver.is_attached());
        receiver.set(50.0);
        assert_eq!(receiver.current_value(), 10.0);
    }

    #[test]
    fn constraint_receiver_reads_back_constant_and_lays_out() {
        let anchor = Rc::new(RefCell::new(Anchor::default()));
        let mut receiver = ConstraintReceiver::new(&anchor, true);

        assert!(receiver.inverse_received_offset());
        receiver.set(64.0);

        assert_eq!(receiver.current_value(), 64.0);
        assert_eq!(anchor.borrow().layouts, 1);
    }

    #[test]
    fn constraint_receiver_reports_zero_when_detached() {
        let anchor = Rc::new(RefCell::new(Anchor::default()));
        let mut receiver = ConstraintReceiver::new(&anchor, false);
        receiver.set(64.0);
        drop(anchor);

        assert_eq!(receiver.current_value(), 0.0);
        receiver.set(10.0);
        assert_eq!(receiver.current_value(), 0.0);
    }

    #[test]
    fn animated_set_runs_changes_inside_animator() {
        let springs = Rc::new(RefCell::new(Vec::new()));
        let anchor = Rc::new(RefCell::new(Anchor::default()));
        let mut receiver = ConstraintReceiver::new(&anchor, false).with_animator(CountingAnimator {
            springs: springs.clone(),
        });

        let mut callbacks = 0;
        let spring = SpringAnimation::new(0.25, 0.7, 1.5);
        receiver.set_animated(300.0, spring, &mut |applied| {
            assert_eq!(applied, 300.0);
            callbacks += 1;
        });

        assert_eq!(callbacks, 1);
        assert_eq!(receiver.current_value(), 300.0);
        assert_eq!(springs.borrow().as_slice(), &[spring]);
    }

    #[test]
    fn animated_set_without_animator_is_immediate() {
        let panel = Rc::new(RefCell::new(Panel::default()));
        let mut receiver = TransformReceiver::new(&panel, Axis::Vertical);

        let mut seen = None;
        receiver.set_animated(
            -40.0,
            SpringAnimation::new(0.2, 1.0, 0.0),
            &mut |applied| seen = Some(applied),
        );

        assert_eq!(seen, Some(-40.0));
        assert_eq!(receiver.current_value(), -40.0);
        assert_eq!(
            panel.borrow().transforms.last(),
            Some(&Affine::translate(Vec2::new(0.0, -40.0)))
        );
    }

    #[test]
    fn boxed_receiver_forwards() {
        let anchor = Rc::new(RefCell::new(Anchor::default()));
        let mut receiver: Box<dyn ValueReceiver> = Box::new(ConstraintReceiver::new(&anchor, true));
        receiver.set(12.0);
        assert_eq!(receiver.current_value(), 12.0);
        assert!(receiver.inverse_received_offset());
    }
}
