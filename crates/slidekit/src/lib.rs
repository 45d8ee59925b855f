#![forbid(unsafe_code)]

//! Slidekit: interruptible, gesture-driven slide-in modal transitions.
//!
//! A presented surface slides in from a screen edge, sits on a dimming
//! backdrop, and slides back out. Either transition can be driven by a timer
//! or scrubbed by a pan gesture, reversed halfway, and committed or cancelled
//! on release.
//!
//! # Key Components
//!
//! - [`SlidePresentationManager`] - host entry point; one per presentable surface
//! - [`PresentationController`] - backdrop, wrapper, keyboard and per-transition slots
//! - [`AnimationDriver`] - geometry and the animator for one transition
//! - [`InteractionController`] - pan gestures to transition percentage
//! - [`PanningController`] - free shifting of the presented surface
//! - [`TransitionConfig`] - tunables plus the runtime state the engine writes
//!
//! # Role in slidekit
//! This crate is the state machine. Geometry, gestures, animators and the
//! host traits come from `slidekit-core` and are re-exported here so hosts
//! depend on one crate.
//!
//! # Example
//!
//! ```ignore
//! let mut manager = SlidePresentationManager::new(TransitionConfig::new());
//! manager.present(&mut ctx, &mut surface, true);
//! while manager.tick(frame_dt, &mut ctx, &mut surface).is_none() {}
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod manager;
pub mod panning;
pub mod presentation;
pub mod util;

pub use slidekit_core::animation::{InterruptibleAnimator, PropertyAnimator};
pub use slidekit_core::geometry::{Insets, Point, Rect, Size};
pub use slidekit_core::gesture::{PanEvent, PanPhase};
pub use slidekit_core::host;
pub use slidekit_core::host::{ContainerMetrics, KeyboardEvent, KeyboardEventKind, Surface, TransitionContext};
pub use slidekit_core::{diagnostics_enabled, set_diagnostics_enabled};

pub use config::{
    BackdropConfig, HorizontalAnchor, Operation, PanMode, Rgb, SharedConfig, SlideOrigin,
    TransitionConfig, VerticalAnchor,
};
pub use driver::{AnimationDriver, TransitionOutcome};
pub use error::ConfigError;
pub use interaction::{InteractionController, InteractionEvent};
pub use manager::{Phase, SlidePresentationManager};
pub use panning::{PanOutcome, PanningController};
pub use presentation::PresentationController;
