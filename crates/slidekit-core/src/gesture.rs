#![forbid(unsafe_code)]

//! Pan gesture events as the host delivers them.
//!
//! Touch tracking stays on the host side. Whatever recognizes the pan reports
//! each update as a [`PanEvent`] carrying the *cumulative* translation since
//! the gesture's reference point, the way platform pan recognizers do.
//! Consumers that want frame-to-frame deltas keep the previous translation
//! themselves.
//!
//! # Invariants
//!
//! 1. A gesture reports `Began` once, then any number of `Changed`, then one
//!    terminal phase.
//! 2. `velocity` is `None` when the source cannot estimate it.

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Pan events
// ---------------------------------------------------------------------------

/// Lifecycle phase of a continuous pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl PanPhase {
    /// Ended or Cancelled.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// One pan gesture update as delivered to the transition engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    /// Cumulative translation since the gesture's reference point.
    pub translation: Point,
    /// Points per second, if the source can estimate it.
    pub velocity: Option<Point>,
    /// Number of tracked touch points.
    pub touches: u8,
}

impl PanEvent {
    /// Create a single-touch event without velocity.
    pub const fn new(phase: PanPhase, translation: Point) -> Self {
        Self {
            phase,
            translation,
            velocity: None,
            touches: 1,
        }
    }

    pub const fn began(x: f64, y: f64) -> Self {
        Self::new(PanPhase::Began, Point::new(x, y))
    }

    pub const fn changed(x: f64, y: f64) -> Self {
        Self::new(PanPhase::Changed, Point::new(x, y))
    }

    pub const fn ended(x: f64, y: f64) -> Self {
        Self::new(PanPhase::Ended, Point::new(x, y))
    }

    pub const fn cancelled(x: f64, y: f64) -> Self {
        Self::new(PanPhase::Cancelled, Point::new(x, y))
    }

    /// Attach a velocity estimate.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: Point) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Set the touch count.
    #[must_use]
    pub const fn with_touches(mut self, touches: u8) -> Self {
        self.touches = touches;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
