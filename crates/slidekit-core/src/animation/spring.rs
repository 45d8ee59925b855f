#![forbid(unsafe_code)]

//! Critically damped spring for animated re-layout.
//!
//! When a presented surface changes size the presentation controller eases
//! its frame toward the new layout with a [`Spring`]. The spring moves a
//! normalized value from 0 to 1 with damping ratio 1, so the frame never
//! overshoots its target. The response is the undamped period of the
//! spring; the position is evaluated in closed form,
//!
//!   x(t) = 1 - (1 + ωt)·e^(-ωt),   ω = 2π / response
//!
//! so frame rate has no effect on the curve.
//!
//! # Invariants
//!
//! 1. `value()` is in `[0.0, 1.0]` and never decreases.
//! 2. Once at rest the value is exactly 1 and further ticks are no-ops.

use std::f64::consts::TAU;
use std::time::Duration;

/// Remaining distance below which the spring snaps to rest.
const REST_DISTANCE: f64 = 0.001;

/// Critically damped 0 → 1 spring.
#[derive(Debug, Clone)]
pub struct Spring {
    omega: f64,
    elapsed: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring whose undamped period is `response`.
    #[must_use]
    pub fn critical(response: Duration) -> Self {
        let secs = response.as_secs_f64().max(0.001);
        Self {
            omega: TAU / secs,
            elapsed: 0.0,
            at_rest: false,
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        self.elapsed += dt.as_secs_f64();
        if 1.0 - self.position() < REST_DISTANCE {
            self.at_rest = true;
        }
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Normalized progress toward the target.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.at_rest {
            1.0
        } else {
            self.position().clamp(0.0, 1.0)
        }
    }

    fn position(&self) -> f64 {
        let wt = self.omega * self.elapsed;
        1.0 - (1.0 + wt) * (-wt).exp()
    }
}
