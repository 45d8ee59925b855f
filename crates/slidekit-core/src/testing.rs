#![forbid(unsafe_code)]

//! Recording host doubles for tests.
//!
//! Available with the `test-helpers` feature.

use std::cell::RefCell;

use crate::geometry::{Rect, Size};
use crate::host::{FitRequest, Surface, TransitionContext};

/// A [`TransitionContext`] that records every call made on it.
///
/// `cancel_interactive_transition` also flips `cancelled`, mirroring hosts
/// that derive `transition_was_cancelled` from the interactive outcome.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    pub container: Rect,
    pub final_frame: Option<Rect>,
    pub cancelled: bool,
    pub completions: Vec<bool>,
    pub cancel_calls: usize,
    pub finish_calls: usize,
    pub updates: Vec<f64>,
    pub inserts: usize,
}

impl RecordingContext {
    #[must_use]
    pub fn new(container: Rect) -> Self {
        Self {
            container,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_final_frame(mut self, frame: Rect) -> Self {
        self.final_frame = Some(frame);
        self
    }

    /// The single completion result, if exactly one was reported.
    #[must_use]
    pub fn completed_once(&self) -> Option<bool> {
        match self.completions.as_slice() {
            [one] => Some(*one),
            _ => None,
        }
    }
}

impl TransitionContext for RecordingContext {
    fn container_frame(&self) -> Rect {
        self.container
    }

    fn final_frame(&self) -> Option<Rect> {
        self.final_frame
    }

    fn transition_was_cancelled(&self) -> bool {
        self.cancelled
    }

    fn complete_transition(&mut self, success: bool) {
        self.completions.push(success);
    }

    fn cancel_interactive_transition(&mut self) {
        self.cancel_calls += 1;
        self.cancelled = true;
    }

    fn update_interactive_transition(&mut self, percent: f64) {
        self.updates.push(percent);
    }

    fn finish_interactive_transition(&mut self) {
        self.finish_calls += 1;
    }

    fn insert_presented(&mut self) {
        self.inserts += 1;
    }
}

/// A [`Surface`] with a preferred content size that reflows when its width
/// is constrained.
#[derive(Debug, Default)]
pub struct TestSurface {
    pub frame: Rect,
    pub hidden: bool,
    pub corner_radius: Option<f64>,
    /// Size reported for an unconstrained probe.
    pub preferred: Size,
    pub frames_set: usize,
    probes: RefCell<Vec<FitRequest>>,
}

impl TestSurface {
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_preferred(mut self, preferred: Size) -> Self {
        self.preferred = preferred;
        self
    }

    /// Every fitting probe seen so far, in order.
    #[must_use]
    pub fn probes(&self) -> Vec<FitRequest> {
        self.probes.borrow().clone()
    }
}

impl Surface for TestSurface {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.frames_set += 1;
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn set_corner_radius(&mut self, radius: f64) {
        self.corner_radius = Some(radius);
    }

    fn fitting_size(&self, request: FitRequest) -> Size {
        self.probes.borrow_mut().push(request);
        let p = self.preferred;
        let width = if request.width_required {
            request.target.width
        } else {
            p.width
        };
        let height = if request.height_required {
            request.target.height
        } else if request.width_required && width > 0.0 && p.width > width {
            p.height * p.width / width
        } else {
            p.height
        };
        Size::new(width, height)
    }
}
