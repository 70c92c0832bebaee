// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan tracking: turn raw pointer positions into drawer drag events.
//!
//! Hosts with a native pan recognizer can build [`DragEvent`]s directly. Hosts
//! that only see pointer down/move/up can use [`PanTracker`]:
//!
//! 1) Call [`PanTracker::start`] on pointer down.
//! 2) Call [`PanTracker::update`] on each pointer move to get a
//!    [`DragPhase::Changed`] event with the total translation and the current
//!    velocity.
//! 3) Call [`PanTracker::end`] on pointer up, or [`PanTracker::cancel`] if the
//!    pointer is lost.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_drawer::{DragPhase, PanTracker};
//!
//! let mut pan = PanTracker::default();
//! pan.start(Point::new(10.0, 20.0), 0);
//!
//! let event = pan.update(Point::new(40.0, 20.0), 16).unwrap();
//! assert_eq!(event.phase, DragPhase::Changed);
//! assert_eq!(event.translation, Vec2::new(30.0, 0.0));
//!
//! let event = pan.end(Point::new(60.0, 20.0), 32).unwrap();
//! assert_eq!(event.phase, DragPhase::Ended);
//! assert_eq!(event.velocity, Vec2::new(1562.5, 0.0));
//! assert!(!pan.is_tracking());
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::drag::{DragEvent, DragPhase};

/// Samples older than this, relative to the newest one, are ignored when
/// estimating velocity.
pub const VELOCITY_WINDOW_MS: u64 = 100;

#[derive(Copy, Clone, Debug, PartialEq)]
struct PanSample {
    pos: Point,
    time_ms: u64,
}

/// Tracks a single pointer pan.
#[derive(Clone, Debug, Default)]
pub struct PanTracker {
    start_pos: Option<Point>,
    samples: SmallVec<[PanSample; 8]>,
}

impl PanTracker {
    /// Starts tracking a pan from `pos`, discarding any previous pan.
    pub fn start(&mut self, pos: Point, time_ms: u64) -> DragEvent {
        self.start_pos = Some(pos);
        self.samples.clear();
        self.samples.push(PanSample { pos, time_ms });
        DragEvent::began()
    }

    /// Records a pointer move, returning a [`DragPhase::Changed`] event.
    ///
    /// Returns `None` when no pan is being tracked.
    pub fn update(&mut self, pos: Point, time_ms: u64) -> Option<DragEvent> {
        let translation = self.record(pos, time_ms)?;
        Some(DragEvent::changed(translation, self.velocity()))
    }

    /// Records the release, returning a [`DragPhase::Ended`] event and
    /// resetting the tracker.
    ///
    /// Returns `None` when no pan is being tracked.
    pub fn end(&mut self, pos: Point, time_ms: u64) -> Option<DragEvent> {
        let translation = self.record(pos, time_ms)?;
        let event = DragEvent::ended(translation, self.velocity());
        self.reset();
        Some(event)
    }

    /// Abandons the pan, returning a [`DragPhase::Cancelled`] event at the last
    /// known translation.
    ///
    /// Returns `None` when no pan is being tracked.
    pub fn cancel(&mut self) -> Option<DragEvent> {
        let translation = self.translation()?;
        self.reset();
        Some(DragEvent::cancelled(translation))
    }

    /// Total offset from the start position to the last recorded position.
    #[must_use]
    pub fn translation(&self) -> Option<Vec2> {
        let start = self.start_pos?;
        self.samples.last().map(|last| last.pos - start)
    }

    /// Pointer velocity in points per second.
    ///
    /// Measured between the newest sample and the oldest sample no more than
    /// [`VELOCITY_WINDOW_MS`] older. Zero when no time has elapsed.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let Some(newest) = self.samples.last() else {
            return Vec2::ZERO;
        };
        let cutoff = newest.time_ms.saturating_sub(VELOCITY_WINDOW_MS);
        let Some(oldest) = self.samples.iter().find(|s| s.time_ms >= cutoff) else {
            return Vec2::ZERO;
        };
        let elapsed_ms = newest.time_ms - oldest.time_ms;
        if elapsed_ms == 0 {
            return Vec2::ZERO;
        }
        (newest.pos - oldest.pos) * 1000.0 / elapsed_ms as f64
    }

    /// Returns `true` while a pan is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }

    fn record(&mut self, pos: Point, time_ms: u64) -> Option<Vec2> {
        let start = self.start_pos?;
        // Out-of-order timestamps are clamped so elapsed time never goes negative.
        let time_ms = self
            .samples
            .last()
            .map_or(time_ms, |last| time_ms.max(last.time_ms));
        let cutoff = time_ms.saturating_sub(VELOCITY_WINDOW_MS);
        self.samples.retain(|s| s.time_ms >= cutoff);
        self.samples.push(PanSample { pos, time_ms });
        Some(pos - start)
    }

    fn reset(&mut self) {
        self.start_pos = None;
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tracker_is_idle() {
        let mut pan = PanTracker::default();
        assert!(!pan.is_tracking());
        assert_eq!(pan.translation(), None);
        assert_eq!(pan.velocity(), Vec2::ZERO);
        assert_eq!(pan.update(Point::new(1.0, 1.0), 10), None);
        assert_eq!(pan.end(Point::new(1.0, 1.0), 10), None);
        assert_eq!(pan.cancel(), None);
    }

    #[test]
    fn start_emits_began() {
        let mut pan = PanTracker::default();
        let event = pan.start(Point::new(5.0, 5.0), 100);
        assert_eq!(event.phase, DragPhase::Began);
        assert!(pan.is_tracking());
        assert_eq!(pan.translation(), Some(Vec2::ZERO));
    }

    #[test]
    fn translation_is_total_from_start() {
        let mut pan = PanTracker::default();
        pan.start(Point::new(100.0, 100.0), 0);
        pan.update(Point::new(110.0, 95.0), 10);
        let event = pan.update(Point::new(130.0, 90.0), 20).unwrap();
        assert_eq!(event.translation, Vec2::new(30.0, -10.0));
    }

    #[test]
    fn velocity_uses_recent_window_only() {
        let mut pan = PanTracker::default();
        pan.start(Point::ZERO, 0);
        // Slow start...
        pan.update(Point::new(0.0, 10.0), 500);
        // ...then a fast flick over the last 100 ms.
        pan.update(Point::new(0.0, 60.0), 550);
        let event = pan.update(Point::new(0.0, 110.0), 600).unwrap();

        // Window covers samples at 500, 550 and 600 ms: 100 points in 0.1 s.
        assert_eq!(event.velocity, Vec2::new(0.0, 1000.0));
    }

    #[test]
    fn same_timestamp_has_zero_velocity() {
        let mut pan = PanTracker::default();
        pan.start(Point::ZERO, 40);
        let event = pan.update(Point::new(10.0, 0.0), 40).unwrap();
        assert_eq!(event.velocity, Vec2::ZERO);
    }

    #[test]
    fn out_of_order_timestamps_are_clamped() {
        let mut pan = PanTracker::default();
        pan.start(Point::ZERO, 100);
        let event = pan.update(Point::new(10.0, 0.0), 90).unwrap();
        assert_eq!(event.velocity, Vec2::ZERO);
        assert_eq!(event.translation, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn end_resets_and_reports_release_velocity() {
        let mut pan = PanTracker::default();
        pan.start(Point::ZERO, 0);
        pan.update(Point::new(-20.0, 0.0), 20);
        let event = pan.end(Point::new(-40.0, 0.0), 40).unwrap();

        assert_eq!(event.phase, DragPhase::Ended);
        assert_eq!(event.translation, Vec2::new(-40.0, 0.0));
        assert_eq!(event.velocity, Vec2::new(-1000.0, 0.0));
        assert!(!pan.is_tracking());
    }

    #[test]
    fn cancel_keeps_last_translation() {
        let mut pan = PanTracker::default();
        pan.start(Point::new(1.0, 2.0), 0);
        pan.update(Point::new(4.0, 6.0), 16);

        let event = pan.cancel().unwrap();
        assert_eq!(event.phase, DragPhase::Cancelled);
        assert_eq!(event.translation, Vec2::new(3.0, 4.0));
        assert_eq!(event.velocity, Vec2::ZERO);
        assert!(!pan.is_tracking());
    }

    #[test]
    fn start_overwrites_previous_pan() {
        let mut pan = PanTracker::default();
        pan.start(Point::ZERO, 0);
        pan.update(Point::new(50.0, 50.0), 10);

        pan.start(Point::new(200.0, 200.0), 1_000);
        let event = pan.update(Point::new(205.0, 200.0), 1_010).unwrap();
        assert_eq!(event.translation, Vec2::new(5.0, 0.0));
    }
}
