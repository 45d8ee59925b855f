#![forbid(unsafe_code)]

//! Time-based animation primitives.
//!
//! - [`InterruptibleAnimator`]: a scrubbable, reversible, pausable animator
//!   whose completion is reported exactly once. The transition engine drives
//!   interactive transitions through this contract.
//! - [`PropertyAnimator`]: the default time-based implementation.
//! - [`spring::Spring`]: a critically damped curve for animated re-layout.

pub mod animator;
pub mod spring;

use std::time::Duration;

pub use animator::PropertyAnimator;
pub use spring::Spring;

// ---------------------------------------------------------------------------
// Interruptible animator contract
// ---------------------------------------------------------------------------

/// Lifecycle of an interruptible animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimatorState {
    /// Not started, or finished and ready to run again.
    #[default]
    Inactive,
    /// Started or scrubbed; may be running or paused.
    Active,
    /// Stopped without completing; completion will not be reported.
    Stopped,
}

/// Where an animator ended up when it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatingPosition {
    Start,
    End,
    Current,
}

/// Scrubbable, reversible animator.
///
/// # Invariants
///
/// 1. `fraction_complete()` is always in `[0.0, 1.0]`.
/// 2. `tick` returns `Some(position)` at most once per run; later ticks return
///    `None` until the animator is started again.
/// 3. `set_fraction_complete` pauses the animator.
pub trait InterruptibleAnimator {
    fn state(&self) -> AnimatorState;

    /// Active and advancing on `tick`.
    fn is_running(&self) -> bool;

    /// Linear time fraction in `[0.0, 1.0]`.
    fn fraction_complete(&self) -> f64;

    /// Scrub to `fraction` (clamped) and pause.
    fn set_fraction_complete(&mut self, fraction: f64);

    fn is_reversed(&self) -> bool;

    /// When reversed, running moves the fraction toward 0.
    fn set_reversed(&mut self, reversed: bool);

    /// Start (or resume) at nominal speed.
    fn start(&mut self);

    /// Become active and freeze at the current fraction.
    fn pause(&mut self);

    /// Resume so the remaining distance takes `duration * duration_factor`.
    fn continue_animation(&mut self, duration_factor: f64);

    /// Stop without reporting completion.
    fn stop(&mut self);

    /// Advance by `dt`; returns the finishing position exactly once.
    fn tick(&mut self, dt: Duration) -> Option<AnimatingPosition>;

    fn duration(&self) -> Duration;
}
