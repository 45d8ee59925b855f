#![forbid(unsafe_code)]

//! Default time-based interruptible animator.
//!
//! [`PropertyAnimator`] owns a linear time fraction in `[0, 1]`; the
//! surface's frame is interpolated by that fraction directly so a scrubbed
//! surface stays under the finger. It is the animator the transition driver
//! builds for every transition; hosts with their own animation engines may
//! implement [`InterruptibleAnimator`] instead.
//!
//! # State Machine
//!
//! ```text
//!            start/pause/scrub          fraction reaches target
//! Inactive ───────────────────▶ Active ─────────────────────────▶ Inactive
//!                                  │                                (reports End/Start)
//!                                  └──stop──▶ Stopped (silent)
//! ```
//!
//! # Invariants
//!
//! 1. Completion is reported exactly once per run.
//! 2. A paused animator never advances.
//! 3. A zero-duration animator completes on its first running tick.
//!
//! # Failure Modes
//!
//! - A non-finite `duration_factor` is treated as 1.0.

use std::time::Duration;

use super::{AnimatingPosition, AnimatorState, InterruptibleAnimator};

/// Time-based scrubbable animator.
#[derive(Debug, Clone)]
pub struct PropertyAnimator {
    duration: Duration,
    state: AnimatorState,
    running: bool,
    reversed: bool,
    fraction: f64,
    /// Fraction per second while running.
    rate: f64,
    inert: bool,
}

impl PropertyAnimator {
    /// Create an inactive animator.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: AnimatorState::Inactive,
            running: false,
            reversed: false,
            fraction: 0.0,
            rate: nominal_rate(duration),
            inert: false,
        }
    }

    /// An animator with no animations attached.
    ///
    /// Handed out when a host asks for an animator that could not be built.
    /// It finishes at `End` on its first running tick, so a transition driven
    /// by it still completes.
    #[must_use]
    pub fn inert() -> Self {
        Self {
            inert: true,
            ..Self::new(Duration::ZERO)
        }
    }

    /// Whether this is an [`inert`](Self::inert) animator.
    #[inline]
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    fn activate(&mut self) {
        self.state = AnimatorState::Active;
    }
}

fn nominal_rate(duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs > 0.0 { 1.0 / secs } else { f64::INFINITY }
}

impl InterruptibleAnimator for PropertyAnimator {
    fn state(&self) -> AnimatorState {
        self.state
    }

    fn is_running(&self) -> bool {
        self.state == AnimatorState::Active && self.running
    }

    fn fraction_complete(&self) -> f64 {
        self.fraction
    }

    fn set_fraction_complete(&mut self, fraction: f64) {
        if self.state == AnimatorState::Stopped {
            return;
        }
        self.activate();
        self.running = false;
        self.fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    fn is_reversed(&self) -> bool {
        self.reversed
    }

    fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    fn start(&mut self) {
        if self.state == AnimatorState::Stopped {
            return;
        }
        self.activate();
        self.rate = nominal_rate(self.duration);
        self.running = true;
    }

    fn pause(&mut self) {
        if self.state == AnimatorState::Stopped {
            return;
        }
        self.activate();
        self.running = false;
    }

    fn continue_animation(&mut self, duration_factor: f64) {
        if self.state == AnimatorState::Stopped {
            return;
        }
        let factor = if duration_factor.is_finite() {
            duration_factor.max(0.0)
        } else {
            1.0
        };
        let remaining = if self.reversed {
            self.fraction
        } else {
            1.0 - self.fraction
        };
        let secs = self.duration.as_secs_f64() * factor;
        self.rate = if secs > 0.0 && remaining > 0.0 {
            remaining / secs
        } else {
            f64::INFINITY
        };
        self.activate();
        self.running = true;
    }

    fn stop(&mut self) {
        self.state = AnimatorState::Stopped;
        self.running = false;
    }

    fn tick(&mut self, dt: Duration) -> Option<AnimatingPosition> {
        if !self.is_running() {
            return None;
        }
        let step = if self.rate.is_infinite() {
            f64::INFINITY
        } else {
            self.rate * dt.as_secs_f64()
        };
        let (next, done) = if self.reversed {
            let next = self.fraction - step;
            (next.max(0.0), next <= 0.0)
        } else {
            let next = self.fraction + step;
            (next.min(1.0), next >= 1.0)
        };
        self.fraction = next;
        if !done {
            return None;
        }
        self.running = false;
        self.state = AnimatorState::Inactive;
        Some(if self.reversed {
            AnimatingPosition::Start
        } else {
            AnimatingPosition::End
        })
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}
