// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// Receives drawer notifications.
///
/// Every method has a no-op default, so implementers only override what they
/// need. `()` is the delegate used when none is configured.
pub trait DrawerDelegate {
    /// The drawer value changed.
    ///
    /// `progress` runs from `0.0` (closed) to `1.0` (open) and may leave that
    /// range during elastic overscroll. It is `NaN` when the drawer has no
    /// travel. For animated changes this is called inside the animation
    /// transaction, so dependent visuals (a dimming overlay, for example)
    /// animate along with the drawer.
    fn on_transition_progress(&mut self, progress: f64) {
        let _ = progress;
    }

    /// A user interaction started moving the drawer.
    fn on_start_moving(&mut self) {}

    /// A user interaction released the drawer.
    fn on_end_moving(&mut self) {}
}

impl DrawerDelegate for () {}

/// A drawer notification, as recorded by `Vec<DrawerEvent>`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawerEvent {
    /// See [`DrawerDelegate::on_transition_progress`].
    TransitionProgress(f64),
    /// See [`DrawerDelegate::on_start_moving`].
    StartMoving,
    /// See [`DrawerDelegate::on_end_moving`].
    EndMoving,
}

/// Records every notification in order.
///
/// Handy for hosts that prefer draining an event queue over callbacks.
impl DrawerDelegate for Vec<DrawerEvent> {
    fn on_transition_progress(&mut self, progress: f64) {
        self.push(DrawerEvent::TransitionProgress(progress));
    }

    fn on_start_moving(&mut self) {
        self.push(DrawerEvent::StartMoving);
    }

    fn on_end_moving(&mut self) {
        self.push(DrawerEvent::EndMoving);
    }
}
