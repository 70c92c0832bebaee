// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direct-manipulation drags.
//!
//! [`DragHandler`] follows a pan gesture 1:1 while it is held, compresses any
//! overscroll elastically, and on release settles to an anchor with a
//! velocity-aware spring.
//!
//! ## Usage
//!
//! 1) Ask [`DragHandler::should_begin`] whether the drawer should claim a new
//!    pan at all. This keeps a horizontal drawer from fighting a vertical
//!    scroll view for the same touch.
//! 2) Feed each [`DragEvent`] of the claimed gesture to [`DragHandler::handle`].
//!    Hosts without a native pan recognizer can produce these events with a
//!    [`PanTracker`](crate::PanTracker).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use understory_drawer::{Axis, DragEvent, DragHandler, Drawer, DrawerConfig, ValueReceiver};
//!
//! struct Offset(f64);
//!
//! impl ValueReceiver for Offset {
//!     fn current_value(&self) -> f64 {
//!         self.0
//!     }
//!     fn set(&mut self, value: f64) {
//!         self.0 = value;
//!     }
//! }
//!
//! let mut drawer = Drawer::new(Offset(0.0), Axis::Horizontal, DrawerConfig::new(0.0, 300.0));
//! let mut drag = DragHandler::new();
//!
//! drag.handle(&mut drawer, DragEvent::began());
//! drag.handle(&mut drawer, DragEvent::changed(Vec2::new(120.0, 4.0), Vec2::ZERO));
//! assert_eq!(drawer.current_value(), 120.0);
//!
//! // A quick flick towards the open side settles fully open.
//! drag.handle(&mut drawer, DragEvent::ended(Vec2::new(120.0, 4.0), Vec2::new(1800.0, 0.0)));
//! assert_eq!(drawer.current_value(), 300.0);
//! ```

use kurbo::Vec2;

use crate::axis::Axis;
use crate::delegate::DrawerDelegate;
use crate::drawer::Drawer;
use crate::elastic::rubber_band;
use crate::receiver::ValueReceiver;
use crate::session::InteractionSession;

/// Default maximum elastic overscroll distance.
pub const DEFAULT_MAX_BOUNCES_OFFSET: f64 = 40.0;

/// Release velocity, in thousands of value units per second, above which a
/// drag settles at the far bound instead of the nearest anchor.
pub(crate) const FLICK_VELOCITY: f64 = 1.0;

/// Phase of a pan gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// The gesture was recognised.
    Began,
    /// The pointer moved.
    Changed,
    /// The pointer was released.
    Ended,
    /// The gesture was interrupted; handled like [`DragPhase::Ended`].
    Cancelled,
}

/// A pan gesture sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragEvent {
    /// Gesture phase.
    pub phase: DragPhase,
    /// Total translation since the gesture began.
    pub translation: Vec2,
    /// Pointer velocity in points per second.
    pub velocity: Vec2,
}

impl DragEvent {
    /// A [`DragPhase::Began`] event.
    #[must_use]
    pub fn began() -> Self {
        Self {
            phase: DragPhase::Began,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    /// A [`DragPhase::Changed`] event.
    #[must_use]
    pub fn changed(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: DragPhase::Changed,
            translation,
            velocity,
        }
    }

    /// A [`DragPhase::Ended`] event.
    #[must_use]
    pub fn ended(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: DragPhase::Ended,
            translation,
            velocity,
        }
    }

    /// A [`DragPhase::Cancelled`] event.
    #[must_use]
    pub fn cancelled(translation: Vec2) -> Self {
        Self {
            phase: DragPhase::Cancelled,
            translation,
            velocity: Vec2::ZERO,
        }
    }
}

/// Translates pan gestures into drawer movement.
#[derive(Clone, Debug)]
pub struct DragHandler {
    max_bounces_offset: f64,
    session: Option<InteractionSession>,
}

impl Default for DragHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DragHandler {
    /// Creates a handler with the default overscroll distance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_bounces_offset: DEFAULT_MAX_BOUNCES_OFFSET,
            session: None,
        }
    }

    /// Sets the maximum distance the drawer may be dragged past its bounds.
    ///
    /// The overscroll approaches this distance but never reaches it.
    #[must_use]
    pub fn with_max_bounces_offset(mut self, max_bounces_offset: f64) -> Self {
        self.max_bounces_offset = max_bounces_offset;
        self
    }

    /// Maximum elastic overscroll distance.
    #[must_use]
    pub fn max_bounces_offset(&self) -> f64 {
        self.max_bounces_offset
    }

    /// Sets the maximum elastic overscroll distance.
    pub fn set_max_bounces_offset(&mut self, max_bounces_offset: f64) {
        self.max_bounces_offset = max_bounces_offset;
    }

    /// The session of the gesture in flight, if any.
    #[must_use]
    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// Returns `true` if a pan starting with `velocity` belongs to a drawer
    /// moving along `axis`.
    #[must_use]
    pub fn should_begin(&self, axis: Axis, velocity: Vec2) -> bool {
        axis.is_dominant(velocity)
    }

    /// Handles one gesture event.
    pub fn handle<R: ValueReceiver, D: DrawerDelegate>(
        &mut self,
        drawer: &mut Drawer<R, D>,
        event: DragEvent,
    ) {
        match event.phase {
            DragPhase::Began => self.began(drawer),
            DragPhase::Changed => self.changed(drawer, event.translation),
            DragPhase::Ended | DragPhase::Cancelled => self.ended(drawer, event.velocity),
        }
    }

    /// Opens a session and notifies the delegate.
    pub fn began<R: ValueReceiver, D: DrawerDelegate>(&mut self, drawer: &mut Drawer<R, D>) {
        let session = InteractionSession::capture(drawer);
        log::trace!("drag began at {}", session.start_value);
        self.session = Some(session);
        drawer.start_moving();
    }

    /// Moves the drawer 1:1 with `translation`, compressing any overscroll.
    pub fn changed<R: ValueReceiver, D: DrawerDelegate>(
        &mut self,
        drawer: &mut Drawer<R, D>,
        translation: Vec2,
    ) {
        let session = self.ensure_session(drawer);
        let delta = drawer.axis().vec_component(translation) * drawer.offset_sign();
        let value = rubber_band(
            session.start_value + delta,
            session.bounds,
            self.max_bounces_offset,
        );
        drawer.set(value);
    }

    /// Settles the drawer and closes the session.
    ///
    /// A release faster than one thousand units per second towards either
    /// bound settles at that bound; slower releases settle at the nearest
    /// anchor.
    pub fn ended<R: ValueReceiver, D: DrawerDelegate>(
        &mut self,
        drawer: &mut Drawer<R, D>,
        velocity: Vec2,
    ) {
        let session = self.ensure_session(drawer);
        self.session = None;

        let velocity = drawer.axis().vec_component(velocity) / 1000.0 * drawer.offset_sign();
        let target = if velocity > FLICK_VELOCITY {
            session.bounds.max
        } else if velocity < -FLICK_VELOCITY {
            session.bounds.min
        } else {
            drawer.nearest_anchor_position()
        };
        log::debug!("drag released with velocity {velocity}; settling at {target}");
        drawer.set_with_animation(target, velocity);
        drawer.end_moving();
    }

    fn ensure_session<R: ValueReceiver, D>(
        &mut self,
        drawer: &Drawer<R, D>,
    ) -> InteractionSession {
        *self.session.get_or_insert_with(|| {
            log::debug!("drag event without a began phase; capturing a session now");
            InteractionSession::capture(drawer)
        })
    }
}
