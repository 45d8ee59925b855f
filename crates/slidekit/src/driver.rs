#![forbid(unsafe_code)]

//! Animation driver: geometry and the animator behind one transition.
//!
//! An [`AnimationDriver`] is built for a single present or dismiss. On first
//! use it computes the start and end frames from the container, the
//! presented frame and the effective slide origin, moves the surface to the
//! start frame and builds a linear [`PropertyAnimator`]. The same animator
//! then serves both the timed (non-interactive) path and the percent-driven
//! interactive path.
//!
//! # Invariants
//!
//! 1. The animator is built at most once per transition: configuration is a
//!    no-op while `configured` is set.
//! 2. The completion runs exactly once per configured animator; it is taken
//!    out of an `Option` before it runs.
//! 3. After completion the driver is unconfigured, not in progress, and holds
//!    no animator.
//! 4. The dismissed frame is the presented frame moved exactly off screen
//!    along the origin axis.
//!
//! # Failure Modes
//!
//! - No presented frame available: configuration is skipped with a warning.
//!   A host that then asks for the animator receives an inert fallback and
//!   the next `tick` completes the transition.

use std::time::Duration;

use slidekit_core::animation::{
    AnimatingPosition, AnimatorState, InterruptibleAnimator, PropertyAnimator,
};
use slidekit_core::geometry::Rect;
use slidekit_core::host::{Surface, TransitionContext};
use slidekit_core::{slide_debug, slide_error, slide_warn};

use crate::config::{Operation, SharedConfig, SlideOrigin};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Frames of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionGeometry {
    pub start_frame: Rect,
    pub end_frame: Rect,
    /// Fully on screen.
    pub presented_frame: Rect,
    /// Exactly off screen at the origin edge.
    pub dismissed_frame: Rect,
}

impl TransitionGeometry {
    /// Compute the frames for `op` sliding along `origin`.
    #[must_use]
    pub fn compute(op: Operation, origin: SlideOrigin, container: Rect, presented: Rect) -> Self {
        let mut dismissed = presented;
        match origin.resolved() {
            SlideOrigin::Leading => dismissed.x = -presented.width,
            SlideOrigin::Trailing => dismissed.x = container.width,
            SlideOrigin::Top => dismissed.y = -presented.height,
            _ => dismissed.y = container.height,
        }
        let (start_frame, end_frame) = match op {
            Operation::Present => (dismissed, presented),
            Operation::Dismiss => (presented, dismissed),
        };
        Self {
            start_frame,
            end_frame,
            presented_frame: presented,
            dismissed_frame: dismissed,
        }
    }

    /// Frame at fraction `t` of the way from start to end.
    #[inline]
    #[must_use]
    pub fn frame_at(&self, t: f64) -> Rect {
        self.start_frame.lerp(&self.end_frame, t)
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Coarse driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverState {
    Unconfigured,
    /// Geometry computed, animator built, not yet active.
    Configured,
    /// Animator active (running or paused mid-scrub).
    Running,
}

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub operation: Operation,
    /// The value passed to `complete_transition`.
    pub completed: bool,
    pub position: AnimatingPosition,
}

#[derive(Debug, Clone, Copy)]
struct PendingCompletion {
    start_frame: Rect,
}

/// Drives the surface between its start and end frames for one transition.
#[derive(Debug)]
pub struct AnimationDriver {
    operation: Operation,
    config: SharedConfig,
    duration: Duration,
    animator: Option<PropertyAnimator>,
    fallback: PropertyAnimator,
    fallback_owed: bool,
    geometry: TransitionGeometry,
    container: Rect,
    origin: SlideOrigin,
    configured: bool,
    animation_in_progress: bool,
    completion: Option<PendingCompletion>,
    animator_builds: usize,
}

impl AnimationDriver {
    /// Create an unconfigured driver for `operation`.
    #[must_use]
    pub fn new(operation: Operation, config: SharedConfig) -> Self {
        let duration = config.borrow().duration;
        slide_debug!(target: "slidekit.driver", op = %operation, "driver created");
        Self {
            operation,
            config,
            duration,
            animator: None,
            fallback: PropertyAnimator::inert(),
            fallback_owed: false,
            geometry: TransitionGeometry::default(),
            container: Rect::default(),
            origin: SlideOrigin::Auto,
            configured: false,
            animation_in_progress: false,
            completion: None,
            animator_builds: 0,
        }
    }

    #[inline]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn geometry(&self) -> &TransitionGeometry {
        &self.geometry
    }

    /// The origin the current geometry was computed for.
    #[inline]
    pub fn origin(&self) -> SlideOrigin {
        self.origin
    }

    #[inline]
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// True once the animator has been started or scrubbed, until completion.
    #[inline]
    pub fn animation_in_progress(&self) -> bool {
        self.animation_in_progress
    }

    /// Number of animators built over this driver's life.
    #[inline]
    pub fn animator_builds(&self) -> usize {
        self.animator_builds
    }

    pub fn state(&self) -> DriverState {
        if !self.configured {
            DriverState::Unconfigured
        } else if self
            .animator
            .as_ref()
            .is_some_and(|a| a.state() == AnimatorState::Active)
        {
            DriverState::Running
        } else {
            DriverState::Configured
        }
    }

    /// Linear time fraction of the live animator.
    pub fn fraction_complete(&self) -> Option<f64> {
        self.animator.as_ref().map(|a| a.fraction_complete())
    }

    /// Record the transition duration. Idempotent.
    pub fn setup(&mut self, duration: Duration) {
        if self.duration != duration {
            slide_debug!(target: "slidekit.driver", op = %self.operation, ?duration, "setup");
        }
        self.duration = duration;
    }

    /// Compute geometry and build the animator, once per transition.
    ///
    /// Returns whether the driver is configured afterwards.
    pub fn configure_animations(
        &mut self,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
    ) -> bool {
        if self.configured {
            slide_debug!(target: "slidekit.driver", op = %self.operation, "already configured, skipping");
            return true;
        }

        // A dismissal leaves from wherever the surface sits now, which a
        // pan may have moved away from the layout frame.
        let presented = match self.operation {
            Operation::Present => ctx.final_frame(),
            Operation::Dismiss => {
                let current = surface.frame();
                if current.is_empty() {
                    ctx.final_frame()
                } else {
                    Some(current)
                }
            }
        };
        let Some(presented) = presented else {
            slide_warn!(target: "slidekit.driver", op = %self.operation, "no final frame for presented surface");
            return false;
        };

        let (origin, corner_radius, use_wrapper) = {
            let config = self.config.borrow();
            (
                config.effective_origin(),
                config.corner_radius,
                config.use_wrapper_container,
            )
        };
        self.container = ctx.container_frame();
        self.origin = origin;
        self.geometry = TransitionGeometry::compute(self.operation, origin, self.container, presented);
        slide_debug!(
            target: "slidekit.driver",
            op = %self.operation,
            origin = %origin,
            start = ?self.geometry.start_frame,
            end = ?self.geometry.end_frame,
            "computed start/end frames"
        );

        if self.operation == Operation::Present {
            if !use_wrapper {
                ctx.insert_presented();
            }
            if corner_radius > 0.0 {
                surface.set_corner_radius(corner_radius);
            }
        }
        surface.set_frame(self.geometry.start_frame);

        self.animator = Some(PropertyAnimator::new(self.duration));
        self.animator_builds += 1;
        self.completion = Some(PendingCompletion {
            start_frame: self.geometry.start_frame,
        });
        self.configured = true;
        true
    }

    /// Configure, then run the animator at nominal speed.
    pub fn start(&mut self, ctx: &mut dyn TransitionContext, surface: &mut dyn Surface) {
        slide_debug!(target: "slidekit.driver", op = %self.operation, "start");
        self.configure_animations(ctx, surface);
        match self.animator.as_mut() {
            Some(animator) => {
                animator.start();
                self.animation_in_progress = true;
            }
            None => self.fallback_owed = true,
        }
    }

    /// Configure, then hand out the animator that drives this transition.
    ///
    /// When no animator could be built an inert one is returned instead and
    /// the next [`tick`](Self::tick) completes the transition.
    pub fn interruptible_animator(
        &mut self,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
    ) -> &mut dyn InterruptibleAnimator {
        self.configure_animations(ctx, surface);
        match self.animator.as_mut() {
            Some(animator) => animator,
            None => {
                slide_error!(
                    target: "slidekit.driver",
                    op = %self.operation,
                    "interruptible animator should exist but does not; returning inert animator"
                );
                self.fallback_owed = true;
                &mut self.fallback
            }
        }
    }

    /// Freeze the animator at its current fraction for interactive scrubbing.
    pub fn pause(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.pause();
            self.animation_in_progress = true;
        }
    }

    /// Scrub to `fraction` and move the surface there.
    pub fn scrub(&mut self, fraction: f64, surface: &mut dyn Surface) {
        let Some(animator) = self.animator.as_mut() else {
            return;
        };
        animator.set_fraction_complete(fraction);
        self.animation_in_progress = true;
        surface.set_frame(self.geometry.frame_at(animator.fraction_complete()));
    }

    /// Continue toward the end frame over the remaining share of the duration.
    pub fn continue_forward(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.set_reversed(false);
            let remaining = 1.0 - animator.fraction_complete();
            animator.continue_animation(remaining);
            self.animation_in_progress = true;
        }
    }

    /// Reverse toward the start frame over the elapsed share of the duration.
    pub fn continue_reversed(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.set_reversed(true);
            let remaining = animator.fraction_complete();
            animator.continue_animation(remaining);
            self.animation_in_progress = true;
        }
    }

    /// Recompute geometry for a new origin while the animator sits at 0.
    ///
    /// The current surface frame becomes the presented frame. Ignored once
    /// the animator has moved.
    pub fn retarget(&mut self, origin: SlideOrigin, surface: &mut dyn Surface) {
        if !self.configured {
            return;
        }
        let at_start = self
            .animator
            .as_ref()
            .is_some_and(|a| !a.is_running() && a.fraction_complete() == 0.0);
        if !at_start {
            slide_debug!(target: "slidekit.driver", op = %self.operation, "retarget ignored, animator has moved");
            return;
        }
        let presented = match self.operation {
            Operation::Present => self.geometry.presented_frame,
            Operation::Dismiss => surface.frame(),
        };
        self.origin = origin;
        self.geometry = TransitionGeometry::compute(self.operation, origin, self.container, presented);
        if let Some(pending) = self.completion.as_mut() {
            pending.start_frame = self.geometry.start_frame;
        }
        surface.set_frame(self.geometry.start_frame);
        slide_debug!(target: "slidekit.driver", op = %self.operation, origin = %origin, "retargeted");
    }

    /// Advance the animator, move the surface, and run the completion when
    /// the animator finishes.
    pub fn tick(
        &mut self,
        dt: Duration,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
    ) -> Option<TransitionOutcome> {
        if self.fallback_owed {
            self.fallback_owed = false;
            let completed = !ctx.transition_was_cancelled();
            slide_debug!(target: "slidekit.driver", op = %self.operation, completed, "completing through inert animator");
            ctx.complete_transition(completed);
            return Some(TransitionOutcome {
                operation: self.operation,
                completed,
                position: AnimatingPosition::End,
            });
        }

        let animator = self.animator.as_mut()?;
        // A paused animator leaves the surface alone; scrubbing placed it.
        let running = animator.is_running();
        let finished = animator.tick(dt);
        if running {
            surface.set_frame(self.geometry.frame_at(animator.fraction_complete()));
        }
        let position = finished?;
        self.complete(position, ctx, surface)
    }

    fn complete(
        &mut self,
        position: AnimatingPosition,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
    ) -> Option<TransitionOutcome> {
        let pending = self.completion.take()?;
        let cancelled = ctx.transition_was_cancelled();
        if cancelled {
            surface.set_frame(pending.start_frame);
        } else {
            surface.set_hidden(self.operation == Operation::Dismiss);
        }
        self.animation_in_progress = false;
        self.configured = false;
        self.animator = None;
        slide_debug!(
            target: "slidekit.driver",
            op = %self.operation,
            completed = !cancelled,
            ?position,
            "calling complete_transition"
        );
        ctx.complete_transition(!cancelled);
        Some(TransitionOutcome {
            operation: self.operation,
            completed: !cancelled,
            position,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TransitionConfig, shared};
    use slidekit_core::geometry::Point;
    use slidekit_core::testing::{RecordingContext, TestSurface};

    const MS_16: Duration = Duration::from_millis(16);
    const CONTAINER: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);
    const PRESENTED: Rect = Rect::new(40.0, 200.0, 320.0, 400.0);

    fn driver(op: Operation, origin: SlideOrigin) -> AnimationDriver {
        AnimationDriver::new(op, shared(TransitionConfig::new().slide_origin(origin)))
    }

    fn run_to_end(
        d: &mut AnimationDriver,
        ctx: &mut RecordingContext,
        s: &mut TestSurface,
    ) -> Option<TransitionOutcome> {
        for _ in 0..200 {
            if let Some(out) = d.tick(MS_16, ctx, s) {
                return Some(out);
            }
        }
        None
    }

    // --- Geometry ---

    #[test]
    fn dismissed_frame_per_origin() {
        let cases = [
            (SlideOrigin::Leading, Rect::new(-320.0, 200.0, 320.0, 400.0)),
            (SlideOrigin::Trailing, Rect::new(400.0, 200.0, 320.0, 400.0)),
            (SlideOrigin::Top, Rect::new(40.0, -400.0, 320.0, 400.0)),
            (SlideOrigin::Bottom, Rect::new(40.0, 800.0, 320.0, 400.0)),
            (SlideOrigin::Auto, Rect::new(40.0, 800.0, 320.0, 400.0)),
            (SlideOrigin::None, Rect::new(40.0, 800.0, 320.0, 400.0)),
        ];
        for (origin, expected) in cases {
            let g = TransitionGeometry::compute(Operation::Present, origin, CONTAINER, PRESENTED);
            assert_eq!(g.dismissed_frame, expected, "{origin}");
            assert_eq!(g.start_frame, expected);
            assert_eq!(g.end_frame, PRESENTED);
        }
    }

    #[test]
    fn dismiss_geometry_is_inverse_of_present() {
        for origin in [
            SlideOrigin::Leading,
            SlideOrigin::Trailing,
            SlideOrigin::Top,
            SlideOrigin::Bottom,
        ] {
            let p = TransitionGeometry::compute(Operation::Present, origin, CONTAINER, PRESENTED);
            let d = TransitionGeometry::compute(Operation::Dismiss, origin, CONTAINER, PRESENTED);
            assert_eq!(p.start_frame, d.end_frame);
            assert_eq!(p.end_frame, d.start_frame);
        }
    }

    // --- Configuration ---

    #[test]
    fn configure_is_idempotent() {
        let mut d = driver(Operation::Present, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(PRESENTED);
        let mut s = TestSurface::new(Rect::default());
        assert!(d.configure_animations(&mut ctx, &mut s));
        assert!(d.configure_animations(&mut ctx, &mut s));
        let _ = d.interruptible_animator(&mut ctx, &mut s);
        assert_eq!(d.animator_builds(), 1);
        assert_eq!(ctx.inserts, 1);
        assert_eq!(d.state(), DriverState::Configured);
    }

    #[test]
    fn configure_places_surface_at_start_and_rounds_corners() {
        let config = shared(
            TransitionConfig::new()
                .slide_origin(SlideOrigin::Top)
                .corner_radius(12.0),
        );
        let mut d = AnimationDriver::new(Operation::Present, config);
        let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(PRESENTED);
        let mut s = TestSurface::new(Rect::default());
        d.configure_animations(&mut ctx, &mut s);
        assert_eq!(s.frame, Rect::new(40.0, -400.0, 320.0, 400.0));
        assert_eq!(s.corner_radius, Some(12.0));
    }

    #[test]
    fn wrapper_container_skips_insert() {
        let config = shared(TransitionConfig::new().use_wrapper_container(true));
        let mut d = AnimationDriver::new(Operation::Present, config);
        let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(PRESENTED);
        let mut s = TestSurface::new(Rect::default());
        d.configure_animations(&mut ctx, &mut s);
        assert_eq!(ctx.inserts, 0);
        assert_eq!(s.corner_radius, None);
    }

    #[test]
    fn dismiss_uses_surface_frame_without_final_frame() {
        let mut d = driver(Operation::Dismiss, SlideOrigin::Leading);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(PRESENTED);
        assert!(d.configure_animations(&mut ctx, &mut s));
        assert_eq!(d.geometry().start_frame, PRESENTED);
        assert_eq!(d.geometry().end_frame.x, -320.0);
    }

    #[test]
    fn dismiss_leaves_from_dragged_frame_not_layout_frame() {
        let mut d = driver(Operation::Dismiss, SlideOrigin::Leading);
        let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(PRESENTED);
        let dragged = PRESENTED.offset(Point::new(-60.0, 25.0));
        let mut s = TestSurface::new(dragged);
        assert!(d.configure_animations(&mut ctx, &mut s));
        assert_eq!(d.geometry().start_frame, dragged);
        assert_eq!(s.frame, dragged);
    }

    #[test]
    fn runtime_origin_overrides_configured_origin() {
        let config = shared(TransitionConfig::new().slide_origin(SlideOrigin::Bottom));
        config
            .borrow_mut()
            .set_runtime_slide_origin(Some(SlideOrigin::Trailing));
        let mut d = AnimationDriver::new(Operation::Dismiss, config);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(PRESENTED);
        d.configure_animations(&mut ctx, &mut s);
        assert_eq!(d.origin(), SlideOrigin::Trailing);
        assert_eq!(d.geometry().end_frame.x, 400.0);
    }

    // --- Timed run ---

    #[test]
    fn start_runs_to_completion_once() {
        let mut d = driver(Operation::Present, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(PRESENTED);
        let mut s = TestSurface::new(Rect::default());
        d.start(&mut ctx, &mut s);
        assert!(d.animation_in_progress());
        assert_eq!(d.state(), DriverState::Running);

        let out = run_to_end(&mut d, &mut ctx, &mut s).unwrap();
        assert!(out.completed);
        assert_eq!(out.position, AnimatingPosition::End);
        assert_eq!(ctx.completed_once(), Some(true));
        assert_eq!(s.frame, PRESENTED);
        assert!(!s.hidden);
        assert!(!d.is_configured());
        assert!(!d.animation_in_progress());
        assert_eq!(d.state(), DriverState::Unconfigured);

        assert!(d.tick(MS_16, &mut ctx, &mut s).is_none());
        assert_eq!(ctx.completions.len(), 1);
    }

    #[test]
    fn dismiss_completion_hides_surface() {
        let mut d = driver(Operation::Dismiss, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(PRESENTED);
        d.start(&mut ctx, &mut s);
        run_to_end(&mut d, &mut ctx, &mut s).unwrap();
        assert!(s.hidden);
        assert_eq!(s.frame.y, 800.0);
    }

    #[test]
    fn cancelled_completion_restores_start_frame() {
        let mut d = driver(Operation::Dismiss, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(PRESENTED);
        let animator = d.interruptible_animator(&mut ctx, &mut s);
        animator.set_fraction_complete(0.3);
        ctx.cancelled = true;
        d.continue_reversed();
        let out = run_to_end(&mut d, &mut ctx, &mut s).unwrap();
        assert!(!out.completed);
        assert_eq!(out.position, AnimatingPosition::Start);
        assert_eq!(ctx.completed_once(), Some(false));
        assert_eq!(s.frame, PRESENTED);
        assert!(!s.hidden);
    }

    // --- Interactive ---

    #[test]
    fn scrub_moves_surface_linearly() {
        let mut d = driver(Operation::Dismiss, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(PRESENTED);
        d.configure_animations(&mut ctx, &mut s);
        assert!(!d.animation_in_progress());
        d.scrub(0.5, &mut s);
        assert!(d.animation_in_progress());
        assert_eq!(s.frame.y, 500.0);
        assert_eq!(d.fraction_complete(), Some(0.5));
        // paused: ticking does not move it
        assert!(d.tick(MS_16, &mut ctx, &mut s).is_none());
        assert_eq!(s.frame.y, 500.0);
    }

    #[test]
    fn continue_forward_finishes() {
        let mut d = driver(Operation::Dismiss, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(PRESENTED);
        d.configure_animations(&mut ctx, &mut s);
        d.scrub(0.7, &mut s);
        d.continue_forward();
        let out = run_to_end(&mut d, &mut ctx, &mut s).unwrap();
        assert!(out.completed);
        assert!(s.hidden);
    }

    #[test]
    fn retarget_at_zero_recomputes_geometry() {
        let mut d = driver(Operation::Dismiss, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(PRESENTED);
        d.configure_animations(&mut ctx, &mut s);
        d.pause();
        s.frame = PRESENTED.offset(slidekit_core::geometry::Point::new(-10.0, 0.0));
        d.retarget(SlideOrigin::Leading, &mut s);
        assert_eq!(d.origin(), SlideOrigin::Leading);
        assert_eq!(d.geometry().start_frame.x, 30.0);
        assert_eq!(d.geometry().end_frame.x, -320.0);
    }

    #[test]
    fn edge_retarget_ignored_after_scrub() {
        let mut d = driver(Operation::Dismiss, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(PRESENTED);
        d.configure_animations(&mut ctx, &mut s);
        d.scrub(0.2, &mut s);
        d.retarget(SlideOrigin::Leading, &mut s);
        assert_eq!(d.origin(), SlideOrigin::Bottom);
    }

    // --- Protocol violations ---

    #[test]
    fn edge_missing_final_frame_falls_back_to_inert_animator() {
        let mut d = driver(Operation::Present, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(Rect::default());
        {
            let animator = d.interruptible_animator(&mut ctx, &mut s);
            assert_eq!(animator.duration(), Duration::ZERO);
        }
        assert!(!d.is_configured());
        let out = d.tick(MS_16, &mut ctx, &mut s).unwrap();
        assert!(out.completed);
        assert_eq!(ctx.completed_once(), Some(true));
        assert!(d.tick(MS_16, &mut ctx, &mut s).is_none());
    }

    #[test]
    fn edge_start_without_frame_still_completes() {
        let mut d = driver(Operation::Present, SlideOrigin::Bottom);
        let mut ctx = RecordingContext::new(CONTAINER);
        let mut s = TestSurface::new(Rect::default());
        d.start(&mut ctx, &mut s);
        assert!(d.tick(MS_16, &mut ctx, &mut s).is_some());
        assert_eq!(ctx.completions, vec![true]);
    }

    #[test]
    fn setup_updates_duration() {
        let mut d = driver(Operation::Present, SlideOrigin::Bottom);
        assert_eq!(d.duration(), Duration::from_millis(300));
        d.setup(Duration::from_millis(500));
        d.setup(Duration::from_millis(500));
        assert_eq!(d.duration(), Duration::from_millis(500));
    }
}
