// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: headless coordination for draggable drawers and sheets.
//!
//! A drawer is a panel that slides along one axis between a closed and an open
//! position, optionally resting at intermediate steps. This crate owns the
//! single authoritative drawer value and decides how pointer drags and
//! scroll-view interaction change it. It does not draw anything: the value is
//! pushed to a [`ValueReceiver`] that the host renders however it likes.
//!
//! The moving parts:
//!
//! - [`Drawer`] holds the [`PositionModel`] (initial value, maximum offset,
//!   steps), the receiver and an optional [`DrawerDelegate`]. It offers the
//!   imperative operations: [`Drawer::open`], [`Drawer::close`],
//!   [`Drawer::set_step`].
//! - [`DragHandler`] follows a pan gesture, compresses overscroll with an
//!   elastic curve ([`rubber_band`]) and settles on release to the nearest
//!   anchor or, after a flick, to the bound in the flick's direction.
//! - [`ScrollHandler`] lets a scrollable list double as the drag surface. It
//!   arbitrates whether the finger scrolls the content or moves the drawer,
//!   according to a [`StickingMode`] and a [`ScrollDirection`].
//! - [`PanTracker`] turns raw pointer positions into [`DragEvent`]s for hosts
//!   without a native pan recognizer.
//!
//! Animated changes are described by a [`SpringAnimation`] (duration, damping
//! ratio, initial velocity). Receivers either run it with their own animation
//! system or snap to the target; [`SpringAnimation::value_at`] evaluates the
//! curve for hosts that want to step it themselves.
//!
//! ## Receivers
//!
//! Two receivers ship with the crate, both holding their target weakly so a
//! torn-down view simply stops receiving values:
//!
//! - [`TransformReceiver`] writes the value as a translation along the axis.
//! - [`ConstraintReceiver`] writes the value into a layout constant, optionally
//!   inverted for constraints measured from the opposite edge.
//!
//! When a receiver reports [`ValueReceiver::inverse_received_offset`], gesture
//! and scroll deltas are negated before they reach the drawer.
//!
//! ## Example
//!
//! ```
//! use understory_drawer::{Axis, Drawer, DrawerConfig, DrawerEvent, Step, ValueReceiver};
//!
//! #[derive(Default)]
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
//! let config = DrawerConfig::new(32.0, 668.0).with_steps([Step::fraction(0.5)]);
//! let mut drawer = Drawer::new(Offset::default(), Axis::Vertical, config)
//!     .with_delegate(Vec::<DrawerEvent>::new());
//!
//! drawer.set_step(0, false).unwrap();
//! assert_eq!(drawer.current_value(), 366.0);
//!
//! drawer.open(false);
//! assert_eq!(drawer.current_value(), 700.0);
//! assert_eq!(drawer.transition_progress(), 1.0);
//!
//! drawer.close(false);
//! assert_eq!(drawer.current_value(), 32.0);
//! assert_eq!(drawer.delegate().last(), Some(&DrawerEvent::TransitionProgress(0.0)));
//!
//! // Unknown steps are reported, not ignored silently.
//! assert!(drawer.set_step(3, false).is_err());
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with the standard library.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade; no logger
//! is installed by this crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod config;
mod delegate;
mod drag;
mod drawer;
mod elastic;
mod error;
mod pan;
mod position;
mod receiver;
mod scroll;
mod session;
mod spring;

pub use axis::Axis;
pub use config::{DEFAULT_ANIMATION_SPEED, DEFAULT_DAMPING_RATIO, DrawerConfig};
pub use delegate::{DrawerDelegate, DrawerEvent};
pub use drag::{DEFAULT_MAX_BOUNCES_OFFSET, DragEvent, DragHandler, DragPhase};
pub use drawer::Drawer;
pub use elastic::{rubber_band, smooth};
pub use error::DrawerError;
pub use pan::{PanTracker, VELOCITY_WINDOW_MS};
pub use position::{DrawerBounds, PositionModel, Step, Steps};
pub use receiver::{
    ConstraintReceiver, ConstraintTarget, SpringAnimator, TransformReceiver, TransformTarget,
    ValueReceiver,
};
pub use scroll::{
    ScrollDirection, ScrollHandler, ScrollSession, ScrollSurface, StickingMode, maximum_offset,
    minimum_offset,
};
pub use session::InteractionSession;
pub use spring::SpringAnimation;
