#![forbid(unsafe_code)]

//! Contracts a host view hierarchy implements.
//!
//! The transition engine never holds on to host objects. Every operation that
//! needs the host receives `&mut dyn TransitionContext` and/or
//! `&mut dyn Surface` for the duration of the call.
//!
//! # Invariants
//!
//! 1. The engine calls [`TransitionContext::complete_transition`] exactly once
//!    per configured transition.
//! 2. Frames are in the container's coordinate space.

use crate::geometry::{Insets, Rect, Size};

/// Per-transition context provided by the host.
pub trait TransitionContext {
    /// Bounds of the view that hosts the transition.
    fn container_frame(&self) -> Rect;

    /// Frame the presented surface occupies when fully on screen, if known.
    fn final_frame(&self) -> Option<Rect>;

    /// Whether the host has recorded a cancellation for this transition.
    fn transition_was_cancelled(&self) -> bool;

    /// Report the end of the transition. Called exactly once.
    fn complete_transition(&mut self, success: bool);

    /// Record that the interactive transition was cancelled.
    ///
    /// From then on `transition_was_cancelled` reports true.
    fn cancel_interactive_transition(&mut self);

    /// Interactive progress notification.
    fn update_interactive_transition(&mut self, _percent: f64) {}

    /// Record that the interactive transition will finish.
    fn finish_interactive_transition(&mut self) {}

    /// Add the presented surface to the container.
    fn insert_presented(&mut self) {}
}

/// Axis constraints for an intrinsic-size probe.
///
/// A required axis must be fitted to the target length; an unconstrained axis
/// asks for the surface's most compact length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRequest {
    pub target: Size,
    pub width_required: bool,
    pub height_required: bool,
}

impl FitRequest {
    /// Neither axis constrained.
    pub const fn unconstrained(target: Size) -> Self {
        Self {
            target,
            width_required: false,
            height_required: false,
        }
    }

    #[must_use]
    pub const fn require_width(mut self) -> Self {
        self.width_required = true;
        self
    }

    #[must_use]
    pub const fn require_height(mut self) -> Self {
        self.height_required = true;
        self
    }
}

/// The presented view, as the engine sees it.
pub trait Surface {
    fn frame(&self) -> Rect;

    fn set_frame(&mut self, frame: Rect);

    fn set_hidden(&mut self, hidden: bool);

    /// Round the corners and clip to them.
    fn set_corner_radius(&mut self, _radius: f64) {}

    /// Intrinsic size under the given constraints.
    fn fitting_size(&self, request: FitRequest) -> Size;
}

/// Container geometry for layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerMetrics {
    pub bounds: Rect,
    pub safe_area: Insets,
}

impl ContainerMetrics {
    pub const fn new(bounds: Rect, safe_area: Insets) -> Self {
        Self { bounds, safe_area }
    }

    /// Bounds minus the safe-area insets.
    #[must_use]
    pub fn safe_rect(&self) -> Rect {
        self.bounds.inset(self.safe_area)
    }
}

/// Keyboard notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardEventKind {
    WillShow,
    DidShow,
    WillHide,
    DidHide,
    WillChangeFrame,
    DidChangeFrame,
}

/// A keyboard notification with the keyboard's end frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardEvent {
    pub kind: KeyboardEventKind,
    pub frame: Rect,
}

impl KeyboardEvent {
    pub const fn new(kind: KeyboardEventKind, frame: Rect) -> Self {
        Self { kind, frame }
    }
}
