// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::drawer::Drawer;
use crate::position::DrawerBounds;
use crate::receiver::ValueReceiver;

/// State captured when an interaction begins.
///
/// Handlers compute every candidate value relative to this snapshot, so
/// changing the drawer's bounds mid-gesture does not disturb the gesture in
/// flight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractionSession {
    /// Drawer value when the interaction began.
    pub start_value: f64,
    /// Resting range when the interaction began.
    pub bounds: DrawerBounds,
}

impl InteractionSession {
    /// Snapshots `drawer`.
    #[must_use]
    pub fn capture<R: ValueReceiver, D>(drawer: &Drawer<R, D>) -> Self {
        Self {
            start_value: drawer.current_value(),
            bounds: drawer.bounds(),
        }
    }
}
