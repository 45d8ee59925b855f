#![forbid(unsafe_code)]

//! Free shifting of the presented surface with one or two fingers.
//!
//! A [`PanningController`] accepts pan events carrying exactly its required
//! touch count. Each event moves the surface (or its wrapper) by the delta
//! since the previous event, as long as the moved frame stays inside the
//! container inset by the configured gaps. A move that would leave that
//! region is dropped whole; there is no partial clamp.
//!
//! After every accepted move the surface's center is written to the shared
//! config as a relative position within the allowed center area, so later
//! layout passes keep the surface where the user left it.

use slidekit_core::geometry::{Point, Rect, Size};
use slidekit_core::gesture::{PanEvent, PanPhase};
use slidekit_core::host::Surface;
use slidekit_core::slide_debug;

use crate::config::SharedConfig;
use crate::util;

/// Result of feeding one event to a [`PanningController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanOutcome {
    /// Moved; carries the new relative position.
    Moved(Point),
    /// The move would have left the allowed region.
    Blocked,
    /// Wrong touch count, not attached, or no movement.
    Ignored,
    /// Gesture ended or was cancelled.
    Ended,
}

/// Drags the presented surface around inside the container.
#[derive(Debug)]
pub struct PanningController {
    config: SharedConfig,
    touches: u8,
    attached: bool,
    last_translation: Point,
}

impl PanningController {
    #[must_use]
    pub fn new(config: SharedConfig, touches: u8) -> Self {
        Self {
            config,
            touches,
            attached: false,
            last_translation: Point::ZERO,
        }
    }

    #[must_use]
    pub fn single_finger(config: SharedConfig) -> Self {
        Self::new(config, 1)
    }

    #[must_use]
    pub fn two_finger(config: SharedConfig) -> Self {
        Self::new(config, 2)
    }

    #[inline]
    pub fn required_touches(&self) -> u8 {
        self.touches
    }

    /// Start accepting events. A second attach is ignored.
    pub fn attach(&mut self) {
        if self.attached {
            slide_debug!(target: "slidekit.panning", "panning already attached, skipping");
            return;
        }
        slide_debug!(target: "slidekit.panning", touches = self.touches, "attaching");
        self.attached = true;
        self.last_translation = Point::ZERO;
    }

    pub fn detach(&mut self) {
        if self.attached {
            slide_debug!(target: "slidekit.panning", "detaching");
        }
        self.attached = false;
        self.last_translation = Point::ZERO;
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether `event` has the touch count this controller tracks.
    #[inline]
    pub fn accepts(&self, event: &PanEvent) -> bool {
        event.touches == self.touches
    }

    /// The container inset by the configured gaps.
    pub fn allowed_area(&self, container: Rect) -> Rect {
        let config = self.config.borrow();
        container.inset_by(config.horizontal_gap, config.vertical_gap)
    }

    /// Region the surface's center may occupy.
    pub fn allowed_center_area(&self, container: Rect, surface: Size) -> Rect {
        let config = self.config.borrow();
        util::allowed_center_area(container, surface, config.horizontal_gap, config.vertical_gap)
    }

    /// Frame-to-frame delta of a cumulative translation.
    ///
    /// `Began` starts from zero, so the first delta is the whole translation.
    pub fn take_delta(&mut self, event: &PanEvent) -> Point {
        if event.phase == PanPhase::Began {
            self.last_translation = Point::ZERO;
        }
        let delta = event.translation - self.last_translation;
        self.last_translation = event.translation;
        delta
    }

    /// Feed one pan event.
    ///
    /// With a wrapper, the wrapper is moved and the surface keeps its frame
    /// inside it; `wrapper` is the wrapper's frame in container space.
    pub fn handle_pan(
        &mut self,
        event: &PanEvent,
        surface: &mut dyn Surface,
        container: Rect,
        wrapper: Option<&mut Rect>,
    ) -> PanOutcome {
        if !self.attached || !self.accepts(event) {
            return PanOutcome::Ignored;
        }
        if event.phase.is_terminal() {
            self.last_translation = Point::ZERO;
            return PanOutcome::Ended;
        }

        let delta = self.take_delta(event);
        if delta == Point::ZERO {
            return PanOutcome::Ignored;
        }

        let wrapper_offset = wrapper.as_deref().map_or(Point::ZERO, Rect::origin);
        let frame = surface.frame().offset(wrapper_offset);
        let moved = frame.offset(delta);
        let allowed = self.allowed_area(container);
        if !allowed.contains_rect(&moved) {
            slide_debug!(target: "slidekit.panning", ?delta, "move leaves allowed region, dropped");
            return PanOutcome::Blocked;
        }

        match wrapper {
            Some(w) => *w = w.offset(delta),
            None => surface.set_frame(surface.frame().offset(delta)),
        }

        let area = self.allowed_center_area(container, moved.size());
        let relative = util::relative_center_position(area, moved.center());
        self.config.borrow_mut().set_relative_position(Some(relative));
        slide_debug!(target: "slidekit.panning", rel_x = relative.x, rel_y = relative.y, "panned");
        PanOutcome::Moved(relative)
    }
}
