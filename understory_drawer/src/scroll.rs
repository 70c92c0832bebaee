// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll coordination: let a scrollable surface double as the drawer's drag
//! surface.
//!
//! [`ScrollHandler`] sits between a host scroll view and a [`Drawer`]. It
//! mirrors the three drag callbacks hosts typically expose, and decides at
//! each step whether the finger should scroll the content or move the drawer:
//!
//! - [`ScrollHandler::will_begin_dragging`] when the user starts dragging the
//!   content.
//! - [`ScrollHandler::did_scroll`] for every content offset change.
//! - [`ScrollHandler::will_end_dragging`] when the finger lifts, with the
//!   release velocity and the proposed deceleration target.
//!
//! Who moves first is governed by a [`StickingMode`]. Which content edge the
//! drawer is attached to is governed by a [`ScrollDirection`].
//!
//! Offsets written back to the surface are remembered, and the notification
//! that echoes such a correction is ignored, so the handler never reacts to its
//! own writes.

use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::axis::Axis;
use crate::delegate::DrawerDelegate;
use crate::drag::FLICK_VELOCITY;
use crate::drawer::Drawer;
use crate::receiver::ValueReceiver;
use crate::session::InteractionSession;

/// Host scroll view, as seen by a [`ScrollHandler`].
///
/// All geometry is in the surface's content coordinate space: `bounds` is the
/// visible rectangle (its origin tracks the content offset) and
/// `touch_location` is expressed in the same space.
///
/// When the handler moves the content through
/// [`set_content_offset`](Self::set_content_offset), the host is expected to
/// report the change back through [`ScrollHandler::did_scroll`] like any other
/// offset change; that one notification is ignored. A host that does not echo
/// its own writes loses the next notification only if it lands on exactly the
/// written offset, which moves nothing anyway.
pub trait ScrollSurface {
    /// Current content offset.
    fn content_offset(&self) -> Point;

    /// Moves the content without animation.
    fn set_content_offset(&mut self, offset: Point);

    /// Size of the scrollable content.
    fn content_size(&self) -> Size;

    /// Insets around the content.
    fn content_inset(&self) -> Insets;

    /// Visible rectangle in content coordinates.
    fn bounds(&self) -> Rect;

    /// Location of the active touch, if the surface is being touched.
    fn touch_location(&self) -> Option<Point>;
}

/// Smallest content offset along `axis`.
#[must_use]
pub fn minimum_offset<S: ScrollSurface + ?Sized>(surface: &S, axis: Axis) -> f64 {
    -axis.leading_inset(surface.content_inset())
}

/// Largest content offset along `axis`.
#[must_use]
pub fn maximum_offset<S: ScrollSurface + ?Sized>(surface: &S, axis: Axis) -> f64 {
    axis.size_component(surface.content_size()) + axis.trailing_inset(surface.content_inset())
        - axis.rect_extent(surface.bounds())
}

/// When scroll input is redirected to the drawer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum StickingMode {
    /// Move the drawer instead of scrolling, keeping the content pinned to its
    /// reference edge until the drawer reaches a bound.
    #[default]
    ScrollStart,
    /// Scroll normally; move the drawer only once the content reaches its
    /// reference edge.
    ///
    /// Use this when a half-open drawer should scroll its content first and
    /// only expand once the finger hits the edge.
    TouchOnEdge,
    /// [`StickingMode::TouchOnEdge`] while opening,
    /// [`StickingMode::ScrollStart`] while closing.
    TouchOnEdgeForOpen,
}

/// Which content edge the drawer is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScrollDirection {
    /// The minimum-offset edge (top or left), as in an ordinary list.
    #[default]
    Forward,
    /// The maximum-offset edge (bottom or right), for lists that start at
    /// their end.
    Backward,
}

impl ScrollDirection {
    /// The content offset that counts as "at the edge".
    #[must_use]
    pub fn reference_offset<S: ScrollSurface + ?Sized>(self, surface: &S, axis: Axis) -> f64 {
        match self {
            Self::Forward => minimum_offset(surface, axis),
            Self::Backward => maximum_offset(surface, axis),
        }
    }

    /// Returns `true` if `offset` is at or beyond `edge`, outside the content.
    fn is_at_or_past_edge(self, offset: f64, edge: f64) -> bool {
        match self {
            Self::Forward => offset <= edge,
            Self::Backward => offset >= edge,
        }
    }

    /// Returns `true` if `offset` has scrolled past `edge` into the content.
    fn is_inside_content(self, offset: f64, edge: f64) -> bool {
        match self {
            Self::Forward => offset > edge,
            Self::Backward => offset < edge,
        }
    }
}

/// State of the scroll interaction in flight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollSession {
    /// Snapshot taken when dragging began.
    pub interaction: InteractionSession,
    /// Content offset at which control last passed to the drawer.
    pub last_offset_on_edge: f64,
    /// Set once a release target has been decided; later scroll notifications
    /// are ignored.
    pub ignore_scroll_changes: bool,
    pending_correction: Option<f64>,
}

impl ScrollSession {
    fn new(interaction: InteractionSession, last_offset_on_edge: f64) -> Self {
        Self {
            interaction,
            last_offset_on_edge,
            ignore_scroll_changes: false,
            pending_correction: None,
        }
    }

    /// Candidate drawer value for the content being at `offset`.
    fn candidate(&self, current: f64, offset: f64, sign: f64) -> f64 {
        current - (offset - self.last_offset_on_edge) * sign
    }

    /// The drawer is between its start and minimum while the content sits at
    /// its reference edge: keep opening through the edge.
    fn is_opening_state(
        &self,
        direction: ScrollDirection,
        edge: f64,
        candidate: f64,
        offset: f64,
    ) -> bool {
        let within_opening_range =
            candidate >= self.interaction.bounds.min && candidate <= self.interaction.start_value;
        within_opening_range
            && (direction.is_at_or_past_edge(offset, edge) || self.last_offset_on_edge == edge)
    }

    /// The touch is on the surface and the drawer is heading back towards
    /// where it started: give control back to the content.
    fn is_closing_state<S: ScrollSurface + ?Sized>(
        &self,
        direction: ScrollDirection,
        surface: &S,
        current: f64,
        candidate: f64,
        sign: f64,
    ) -> bool {
        let start = self.interaction.start_value * sign;
        let current = current * sign;
        let candidate = candidate * sign;
        let moved_to_close = match direction {
            ScrollDirection::Forward => start <= current || start <= candidate,
            ScrollDirection::Backward => start >= current || start >= candidate,
        };
        let touching = surface
            .touch_location()
            .is_some_and(|location| surface.bounds().contains(location));
        touching && moved_to_close
    }

    /// Writes `offset` to the surface and remembers it so the echoing
    /// notification is ignored.
    fn pin_offset<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S, axis: Axis, offset: f64) {
        let current = surface.content_offset();
        if axis.point_component(current) == offset {
            return;
        }
        self.pending_correction = Some(offset);
        surface.set_content_offset(axis.with_point_component(current, offset));
    }
}

/// Arbitrates between scrolling content and moving the drawer.
#[derive(Clone, Debug, Default)]
pub struct ScrollHandler {
    sticking_mode: StickingMode,
    direction: ScrollDirection,
    session: Option<ScrollSession>,
}

impl ScrollHandler {
    /// Creates a handler.
    #[must_use]
    pub fn new(sticking_mode: StickingMode, direction: ScrollDirection) -> Self {
        Self {
            sticking_mode,
            direction,
            session: None,
        }
    }

    /// Current sticking mode.
    #[must_use]
    pub fn sticking_mode(&self) -> StickingMode {
        self.sticking_mode
    }

    /// Sets the sticking mode; takes effect at the next drag.
    pub fn set_sticking_mode(&mut self, sticking_mode: StickingMode) {
        self.sticking_mode = sticking_mode;
    }

    /// Current scroll direction.
    #[must_use]
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Sets the scroll direction; takes effect at the next drag.
    pub fn set_direction(&mut self, direction: ScrollDirection) {
        self.direction = direction;
    }

    /// The current or most recent scroll session.
    #[must_use]
    pub fn session(&self) -> Option<&ScrollSession> {
        self.session.as_ref()
    }

    /// The user started dragging the surface.
    ///
    /// In [`StickingMode::ScrollStart`], content that is not at its reference
    /// edge is handed to the drawer first: the drawer animates by as much of
    /// the scrolled distance as its bounds allow, and the content offset is
    /// moved in the same animation so the drag starts from a consistent
    /// baseline.
    pub fn will_begin_dragging<R, D, S>(&mut self, drawer: &mut Drawer<R, D>, surface: &mut S)
    where
        R: ValueReceiver,
        D: DrawerDelegate,
        S: ScrollSurface + ?Sized,
    {
        let axis = drawer.axis();
        let offset = axis.point_component(surface.content_offset());
        let interaction = InteractionSession::capture(drawer);
        drawer.start_moving();

        let session = match self.sticking_mode {
            StickingMode::TouchOnEdge | StickingMode::TouchOnEdgeForOpen => {
                ScrollSession::new(interaction, offset)
            }
            StickingMode::ScrollStart => {
                let edge = self.direction.reference_offset(surface, axis);
                let mut session = ScrollSession::new(interaction, edge);
                if offset != edge {
                    let sign = drawer.offset_sign();
                    let current = drawer.current_value();
                    let target = interaction
                        .bounds
                        .clamp(session.candidate(current, offset, sign));
                    // Whatever the drawer cannot absorb stays on the content.
                    let remaining_offset = offset - (current - target) * sign;
                    if target != current {
                        log::trace!(
                            "handing scrolled distance to the drawer: {current} -> {target}, offset {offset} -> {remaining_offset}"
                        );
                        drawer.set_with_animation_and(target, 0.0, || {
                            session.pin_offset(surface, axis, remaining_offset);
                        });
                    }
                }
                session
            }
        };
        log::trace!(
            "scroll drag began at offset {offset}, edge offset {}",
            session.last_offset_on_edge
        );
        self.session = Some(session);
    }

    /// The content offset changed.
    ///
    /// Moves the drawer by the scrolled distance where the sticking mode
    /// allows it, pinning the content in place while the drawer absorbs the
    /// motion.
    pub fn did_scroll<R, D, S>(&mut self, drawer: &mut Drawer<R, D>, surface: &mut S)
    where
        R: ValueReceiver,
        D: DrawerDelegate,
        S: ScrollSurface + ?Sized,
    {
        let mode = self.sticking_mode;
        let direction = self.direction;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.ignore_scroll_changes {
            return;
        }

        let axis = drawer.axis();
        let offset = axis.point_component(surface.content_offset());
        if session.pending_correction.take() == Some(offset) {
            return;
        }

        let sign = drawer.offset_sign();
        let current = drawer.current_value();
        let edge = direction.reference_offset(surface, axis);
        let mut candidate = session.candidate(current, offset, sign);

        if mode == StickingMode::TouchOnEdgeForOpen
            && session.is_opening_state(direction, edge, candidate, offset)
        {
            session.last_offset_on_edge = edge;
        } else if mode != StickingMode::ScrollStart
            && session.is_closing_state(direction, surface, current, candidate, sign)
        {
            log::trace!("scroll returned control to the content at offset {offset}");
            session.last_offset_on_edge = offset;
            drawer.set(session.interaction.start_value);
            return;
        }

        let bounds = session.interaction.bounds;
        if candidate > bounds.max {
            candidate = bounds.max;
        } else if candidate < bounds.min {
            candidate = bounds.min;
        } else {
            // The drawer absorbs the motion; the content stays put.
            let pinned = session.last_offset_on_edge;
            session.pin_offset(surface, axis, pinned);
        }
        drawer.set(candidate);
    }

    /// The user lifted their finger.
    ///
    /// `velocity` is the release velocity of the content offset in points per
    /// second. `target_offset` is the deceleration target proposed by the host;
    /// it is rewritten when the drawer keeps the content pinned.
    ///
    /// The delegate is notified of the end of movement on every path with a
    /// session, including releases the content keeps for itself (scrolled
    /// inside the content, or handed back to the list). Each
    /// [`will_begin_dragging`](Self::will_begin_dragging) is thus paired with
    /// exactly one `on_end_moving`.
    pub fn will_end_dragging<R, D, S>(
        &mut self,
        drawer: &mut Drawer<R, D>,
        surface: &mut S,
        velocity: Vec2,
        target_offset: &mut Point,
    ) where
        R: ValueReceiver,
        D: DrawerDelegate,
        S: ScrollSurface + ?Sized,
    {
        let mode = self.sticking_mode;
        let direction = self.direction;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.ignore_scroll_changes = true;

        let axis = drawer.axis();
        let offset = axis.point_component(surface.content_offset());
        let edge = direction.reference_offset(surface, axis);

        if mode == StickingMode::ScrollStart && direction.is_inside_content(offset, edge) {
            log::trace!("scroll released inside content; letting it decelerate");
            drawer.end_moving();
            return;
        }

        let sign = drawer.offset_sign();
        let current = drawer.current_value();
        let candidate = session.candidate(current, offset, sign);
        if mode != StickingMode::ScrollStart
            && session.is_closing_state(direction, surface, current, candidate, sign)
            && (mode != StickingMode::TouchOnEdgeForOpen
                || !session.is_opening_state(direction, edge, candidate, offset))
        {
            log::trace!("scroll released while handing control back; letting it decelerate");
            drawer.end_moving();
            return;
        }

        let velocity = axis.vec_component(velocity) / 1000.0;
        let bounds = session.interaction.bounds;
        let opens = match direction {
            ScrollDirection::Forward => velocity,
            ScrollDirection::Backward => -velocity,
        };
        let target = if opens >= FLICK_VELOCITY {
            bounds.max
        } else if opens <= -FLICK_VELOCITY {
            bounds.min
        } else {
            if mode != StickingMode::ScrollStart {
                let pinned = session.last_offset_on_edge;
                session.pin_offset(surface, axis, pinned);
            }
            drawer.nearest_anchor_position()
        };
        if mode == StickingMode::ScrollStart {
            *target_offset = axis.with_point_component(*target_offset, session.last_offset_on_edge);
        }

        log::debug!("scroll released with velocity {velocity}; settling at {target}");
        drawer.set_with_animation(target, velocity);
        drawer.end_moving();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Surface {
        offset: Point,
        size: Size,
        inset: Insets,
        viewport: Size,
    }

    impl ScrollSurface for Surface {
        fn content_offset(&self) -> Point {
            self.offset
        }

        fn set_content_offset(&mut self, offset: Point) {
            self.offset = offset;
        }

        fn content_size(&self) -> Size {
            self.size
        }

        fn content_inset(&self) -> Insets {
            self.inset
        }

        fn bounds(&self) -> Rect {
            Rect::from_origin_size(self.offset, self.viewport)
        }

        fn touch_location(&self) -> Option<Point> {
            None
        }
    }

    fn surface() -> Surface {
        Surface {
            offset: Point::ZERO,
            size: Size::new(320.0, 2_000.0),
            inset: Insets::new(0.0, 20.0, 0.0, 40.0),
            viewport: Size::new(320.0, 600.0),
        }
    }

    #[test]
    fn offset_limits_account_for_insets() {
        let surface = surface();
        assert_eq!(minimum_offset(&surface, Axis::Vertical), -20.0);
        assert_eq!(maximum_offset(&surface, Axis::Vertical), 1_440.0);
        assert_eq!(maximum_offset(&surface, Axis::Horizontal), 0.0);
    }

    #[test]
    fn reference_offset_follows_direction() {
        let surface = surface();
        assert_eq!(
            ScrollDirection::Forward.reference_offset(&surface, Axis::Vertical),
            -20.0
        );
        assert_eq!(
            ScrollDirection::Backward.reference_offset(&surface, Axis::Vertical),
            1_440.0
        );
    }

    #[test]
    fn edge_predicates_follow_direction() {
        assert!(ScrollDirection::Forward.is_at_or_past_edge(-30.0, -20.0));
        assert!(ScrollDirection::Forward.is_at_or_past_edge(-20.0, -20.0));
        assert!(!ScrollDirection::Forward.is_at_or_past_edge(0.0, -20.0));
        assert!(ScrollDirection::Forward.is_inside_content(0.0, -20.0));

        assert!(ScrollDirection::Backward.is_at_or_past_edge(1_500.0, 1_440.0));
        assert!(ScrollDirection::Backward.is_inside_content(1_000.0, 1_440.0));
    }

    #[test]
    fn pin_offset_skips_redundant_writes() {
        let mut surface = surface();
        let mut session = ScrollSession::new(
            InteractionSession {
                start_value: 0.0,
                bounds: crate::position::DrawerBounds { min: 0.0, max: 1.0 },
            },
            0.0,
        );

        session.pin_offset(&mut surface, Axis::Vertical, 0.0);
        assert_eq!(session.pending_correction, None);

        session.pin_offset(&mut surface, Axis::Vertical, -20.0);
        assert_eq!(session.pending_correction, Some(-20.0));
        assert_eq!(surface.offset, Point::new(0.0, -20.0));
    }
}
