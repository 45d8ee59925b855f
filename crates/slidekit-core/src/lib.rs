#![forbid(unsafe_code)]

//! Core: geometry, pan gestures, interruptible animators, and host contracts.
//!
//! # Role in slidekit
//! `slidekit-core` is the leaf layer. It owns the floating-point geometry the
//! transition engine computes with, the pan-gesture model that feeds it, the
//! time-based animator it scrubs, and the traits a host view hierarchy
//! implements so the engine can move a surface around.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Point`], [`geometry::Size`], [`geometry::Rect`],
//!   [`geometry::Insets`] in points, origin at top-left.
//! - **Gestures**: [`gesture::PanEvent`], the host-delivered pan update with
//!   its phase and cumulative translation.
//! - **Animation**: the [`animation::InterruptibleAnimator`] contract, its
//!   default [`animation::PropertyAnimator`], easing curves and a spring.
//! - **Host contracts**: [`host::TransitionContext`] and [`host::Surface`].
//! - **Diagnostics**: a process-wide gate in front of `tracing`.
//!
//! # How it fits in the system
//! The `slidekit` crate builds the transition state machine on top of these
//! primitives. Nothing here knows about presentations or dismissals.

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod logging;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use logging::{diagnostics_enabled, set_diagnostics_enabled};
