#![forbid(unsafe_code)]

//! Interaction controller: turns pan gestures into a percent-driven transition.
//!
//! One [`InteractionController`] serves either the present or the dismiss
//! direction. The host feeds it [`PanEvent`]s through
//! [`handle_pan`](InteractionController::handle_pan); the controller decides
//! when a gesture starts a transition, scrubs the [`AnimationDriver`] while
//! the finger moves, and commits or cancels on release.
//!
//! # State Machine
//!
//! ```text
//!          Began/Changed, direction matches
//! Idle ─────────────────────────────────────▶ InProgress
//!  ▲                                            │ Changed: scrub
//!  └──── Ended/Cancelled: finish or cancel ─────┘
//! ```
//!
//! # Routing modes
//!
//! - **Standard**: the cumulative translation along the configured origin's
//!   axis is the transition percentage.
//! - **Free drag** (a panning hand-off is installed): the surface follows the
//!   finger inside the allowed center area. Crossing an edge of that area
//!   makes the crossed edge the transition's origin and starts the dismissal;
//!   movement past the edge is the percentage; moving back inside clears the
//!   override and resumes free drag.
//!
//! # Invariants
//!
//! 1. The begin hook never runs for a gesture that did not pass the
//!    direction gate (standard) or cross an edge (free drag).
//! 2. A release decides exactly once: finish when the percentage is at least
//!    [`COMMIT_THRESHOLD`], cancel otherwise (NaN cancels).
//! 3. After a successful dismiss the recognizer is detached; a present
//!    controller keeps its recognizer.
//! 4. `runtime_slide_origin` is cleared on every free-drag release.

use std::fmt;
use std::rc::Rc;

use slidekit_core::geometry::{Point, Rect};
use slidekit_core::gesture::{PanEvent, PanPhase};
use slidekit_core::host::{Surface, TransitionContext};
use slidekit_core::{slide_debug, slide_info};

use crate::config::{Operation, SharedConfig, SlideOrigin};
use crate::driver::AnimationDriver;
use crate::panning::PanningController;
use crate::util::{self, COMMIT_THRESHOLD};

/// Called when a gesture starts an interactive transition. The host is
/// expected to start the matching present or dismiss.
pub type BeginHook = Box<dyn FnMut(Operation)>;

/// Dismisses the presented surface when no begin hook is installed.
///
/// Runs from inside gesture handling; a host that owns the manager should
/// defer the actual `dismiss` call until the handler returns.
pub type DismissAction = Rc<dyn Fn()>;

/// What a pan event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    /// Nothing to do for this event.
    Ignored,
    /// The movement did not match the transition's direction.
    Rejected,
    /// An interactive transition was requested.
    Began,
    /// Free drag moved the surface.
    Moved,
    /// The transition was scrubbed to this percentage.
    Updated(f64),
    /// Released past the threshold; the transition runs to its end.
    Finished,
    /// Released short of the threshold; the transition reverses.
    Cancelled,
}

/// Host collaborators available for one event.
///
/// Before the host has started the transition only the container (if any)
/// is known; afterwards the driver, context and surface are all present.
#[derive(Default)]
pub struct InteractionLink<'a> {
    pub driver: Option<&'a mut AnimationDriver>,
    pub ctx: Option<&'a mut dyn TransitionContext>,
    pub surface: Option<&'a mut dyn Surface>,
    /// Container bounds, used when no context is available.
    pub container: Option<Rect>,
}

impl<'a> InteractionLink<'a> {
    /// A link with every collaborator present.
    pub fn connected(
        driver: &'a mut AnimationDriver,
        ctx: &'a mut dyn TransitionContext,
        surface: &'a mut dyn Surface,
    ) -> Self {
        Self {
            driver: Some(driver),
            ctx: Some(ctx),
            surface: Some(surface),
            container: None,
        }
    }

    /// Only a surface and its container: free drag before any transition.
    pub fn detached(surface: &'a mut dyn Surface, container: Rect) -> Self {
        Self {
            surface: Some(surface),
            container: Some(container),
            ..Self::default()
        }
    }

    fn container_frame(&self) -> Rect {
        self.ctx
            .as_deref()
            .map(|ctx| ctx.container_frame())
            .or(self.container)
            .unwrap_or_default()
    }

    fn animation_in_progress(&self) -> bool {
        self.driver
            .as_deref()
            .is_some_and(AnimationDriver::animation_in_progress)
    }

    fn host_cancelled(&self) -> bool {
        self.ctx
            .as_deref()
            .is_some_and(|ctx| ctx.transition_was_cancelled())
    }
}

/// Per-gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionSession {
    pub in_progress: bool,
    pub captured_start_frame: Rect,
    pub captured_end_frame: Rect,
    /// Edge crossed by a free drag.
    pub pan_dismiss_direction: Option<SlideOrigin>,
    /// Surface frame pinned at the crossed edge.
    anchor_frame: Rect,
    /// Translation accumulated past the crossed edge.
    overshoot: Point,
    last_percent: f64,
}

/// Drives a present or dismiss transition from pan gestures.
pub struct InteractionController {
    operation: Operation,
    config: SharedConfig,
    session: InteractionSession,
    begin_hook: Option<BeginHook>,
    dismiss_action: Option<DismissAction>,
    panning: Option<PanningController>,
    recognizer_attached: bool,
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("operation", &self.operation)
            .field("session", &self.session)
            .field("begin_hook", &self.begin_hook.is_some())
            .field("dismiss_action", &self.dismiss_action.is_some())
            .field("panning", &self.panning)
            .field("recognizer_attached", &self.recognizer_attached)
            .finish()
    }
}

impl InteractionController {
    #[must_use]
    pub fn new(operation: Operation, config: SharedConfig) -> Self {
        Self {
            operation,
            config,
            session: InteractionSession::default(),
            begin_hook: None,
            dismiss_action: None,
            panning: None,
            recognizer_attached: false,
        }
    }

    /// Set the fallback used to dismiss when no begin hook is installed.
    #[must_use]
    pub fn with_dismiss_action(mut self, action: DismissAction) -> Self {
        self.dismiss_action = Some(action);
        self
    }

    #[inline]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[inline]
    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    #[inline]
    pub fn is_in_progress(&self) -> bool {
        self.session.in_progress
    }

    #[inline]
    pub fn pan_dismiss_direction(&self) -> Option<SlideOrigin> {
        self.session.pan_dismiss_direction
    }

    // --- recognizer ---------------------------------------------------------

    /// Start accepting gestures, optionally with a begin hook.
    pub fn attach(&mut self, begin_hook: Option<BeginHook>) {
        slide_debug!(target: "slidekit.interaction", op = %self.operation, hook = begin_hook.is_some(), "attaching recognizer");
        self.begin_hook = begin_hook;
        self.recognizer_attached = true;
    }

    /// Stop accepting gestures.
    pub fn detach(&mut self) {
        if self.recognizer_attached {
            slide_debug!(target: "slidekit.interaction", op = %self.operation, "removing recognizer");
        }
        self.recognizer_attached = false;
    }

    #[inline]
    pub fn recognizer_attached(&self) -> bool {
        self.recognizer_attached
    }

    /// Route free-drag gestures through this controller.
    pub fn hand_off_panning(&mut self, panning: PanningController) {
        slide_debug!(target: "slidekit.interaction", op = %self.operation, "panning handed off to interaction");
        self.panning = Some(panning);
    }

    #[inline]
    pub fn has_panning_hand_off(&self) -> bool {
        self.panning.is_some()
    }

    // --- percent-driven contract ---------------------------------------------

    /// The host started the interactive transition.
    ///
    /// Forces the driver's configuration, captures its frames for the
    /// percentage math and pauses the animator at its current fraction.
    pub fn start_interactive_transition(
        &mut self,
        ctx: &mut dyn TransitionContext,
        driver: &mut AnimationDriver,
        surface: &mut dyn Surface,
    ) {
        slide_debug!(target: "slidekit.interaction", op = %self.operation, "start interactive transition");
        driver.interruptible_animator(ctx, surface);
        driver.pause();
        let geometry = driver.geometry();
        self.session.captured_start_frame = geometry.start_frame;
        self.session.captured_end_frame = geometry.end_frame;
    }

    /// Scrub to `percent`.
    pub fn update(&mut self, percent: f64, link: &mut InteractionLink<'_>) {
        if let Some(ctx) = link.ctx.as_deref_mut() {
            ctx.update_interactive_transition(percent);
        }
        if let (Some(driver), Some(surface)) = (link.driver.as_deref_mut(), link.surface.as_deref_mut()) {
            driver.scrub(percent, surface);
        }
    }

    /// Reverse toward the start over the elapsed share of the duration.
    pub fn cancel(&mut self, link: &mut InteractionLink<'_>) {
        if let Some(driver) = link.driver.as_deref_mut() {
            driver.continue_reversed();
        }
    }

    /// Continue to the end over the remaining share of the duration.
    pub fn finish(&mut self, link: &mut InteractionLink<'_>) {
        if let Some(ctx) = link.ctx.as_deref_mut() {
            ctx.finish_interactive_transition();
        }
        if let Some(driver) = link.driver.as_deref_mut() {
            driver.continue_forward();
        }
    }

    // --- gesture handling ------------------------------------------------------

    /// Feed one pan event.
    pub fn handle_pan(&mut self, event: &PanEvent, mut link: InteractionLink<'_>) -> InteractionEvent {
        if !self.recognizer_attached {
            return InteractionEvent::Ignored;
        }
        if self.panning.is_some() {
            self.handle_free_drag(event, &mut link)
        } else {
            self.handle_standard(event, &mut link)
        }
    }

    fn presented_frame(&self) -> Rect {
        match self.operation {
            Operation::Present => self.session.captured_end_frame,
            Operation::Dismiss => self.session.captured_start_frame,
        }
    }

    fn handle_standard(&mut self, event: &PanEvent, link: &mut InteractionLink<'_>) -> InteractionEvent {
        let origin = self.config.borrow().slide_origin;
        let presented = self.presented_frame();
        let container = link.container_frame();
        let scalar = util::scalar(event.translation, origin, self.operation);
        let percent = util::percentage(scalar, origin, presented, container, self.operation);

        match event.phase {
            PanPhase::Began if self.session.in_progress => {
                slide_debug!(target: "slidekit.interaction", op = %self.operation, "interaction already in progress");
                InteractionEvent::Ignored
            }
            PanPhase::Began => self.try_begin(event.translation, origin),
            PanPhase::Changed if !self.session.in_progress => self.try_begin(event.translation, origin),
            PanPhase::Changed => {
                if !link.animation_in_progress() || !percent.is_finite() {
                    return InteractionEvent::Ignored;
                }
                slide_debug!(target: "slidekit.interaction", op = %self.operation, percent, "updating");
                self.session.last_percent = percent;
                self.update(percent, link);
                InteractionEvent::Updated(percent)
            }
            PanPhase::Ended | PanPhase::Cancelled => {
                if !self.session.in_progress {
                    slide_debug!(target: "slidekit.interaction", op = %self.operation, "release without interaction, skipping");
                    return InteractionEvent::Ignored;
                }
                let percent = self.projected(percent, event, origin, presented, container);
                self.release(percent, link)
            }
        }
    }

    fn try_begin(&mut self, translation: Point, origin: SlideOrigin) -> InteractionEvent {
        if !util::direction_matches(translation, origin, self.operation) {
            slide_debug!(target: "slidekit.interaction", op = %self.operation, origin = %origin, "translation does not match origin");
            return InteractionEvent::Rejected;
        }
        self.session = InteractionSession {
            in_progress: true,
            ..InteractionSession::default()
        };
        self.notify_begin();
        InteractionEvent::Began
    }

    fn notify_begin(&mut self) {
        slide_debug!(target: "slidekit.interaction", op = %self.operation, "starting interaction");
        if let Some(hook) = self.begin_hook.as_mut() {
            hook(self.operation);
        } else if self.operation == Operation::Dismiss {
            if let Some(action) = &self.dismiss_action {
                slide_debug!(target: "slidekit.interaction", "no begin hook, calling dismiss action");
                action();
            }
        }
    }

    /// Release percentage, optionally projected along the release velocity.
    fn projected(
        &self,
        percent: f64,
        event: &PanEvent,
        origin: SlideOrigin,
        presented: Rect,
        container: Rect,
    ) -> f64 {
        let Some(horizon) = self.config.borrow().velocity_projection else {
            return percent;
        };
        let Some(velocity) = event.velocity else {
            return percent;
        };
        let velocity_scalar = util::scalar(velocity, origin, self.operation);
        let travel = util::travel_distance(origin, presented, container);
        util::projected_percentage(percent, velocity_scalar, travel, horizon)
    }

    fn release(&mut self, percent: f64, link: &mut InteractionLink<'_>) -> InteractionEvent {
        // The host flag is logged only; the threshold alone decides.
        let host_cancelled = link.host_cancelled();
        if host_cancelled {
            slide_info!(target: "slidekit.interaction", op = %self.operation, "host reports the transition as cancelled");
        }

        if !(percent >= COMMIT_THRESHOLD) {
            slide_debug!(target: "slidekit.interaction", op = %self.operation, percent, "cancelling");
            if let Some(ctx) = link.ctx.as_deref_mut() {
                ctx.cancel_interactive_transition();
            }
            self.cancel(link);
            self.session = InteractionSession::default();
            return InteractionEvent::Cancelled;
        }

        slide_debug!(target: "slidekit.interaction", op = %self.operation, percent, "finishing");
        self.finish(link);
        self.session = InteractionSession::default();
        if !host_cancelled && self.operation == Operation::Dismiss {
            self.detach();
        }
        InteractionEvent::Finished
    }

    // --- free drag ---------------------------------------------------------------

    fn handle_free_drag(&mut self, event: &PanEvent, link: &mut InteractionLink<'_>) -> InteractionEvent {
        let Some(panning) = self.panning.as_mut() else {
            return InteractionEvent::Ignored;
        };
        if !panning.accepts(event) {
            return InteractionEvent::Ignored;
        }
        let delta = panning.take_delta(event);
        let container = link.container_frame();

        match event.phase {
            PanPhase::Began if self.session.in_progress => {
                slide_debug!(target: "slidekit.interaction", op = %self.operation, "interaction already in progress");
                InteractionEvent::Ignored
            }
            PanPhase::Began | PanPhase::Changed => match self.session.pan_dismiss_direction {
                None => self.drag_free(delta, container, link),
                Some(origin) => self.drag_past_edge(origin, delta, container, link),
            },
            PanPhase::Ended | PanPhase::Cancelled => self.release_free_drag(event, container, link),
        }
    }

    fn center_area(&self, container: Rect, frame: Rect) -> Rect {
        match self.panning.as_ref() {
            Some(panning) => panning.allowed_center_area(container, frame.size()),
            None => {
                let config = self.config.borrow();
                util::allowed_center_area(container, frame.size(), config.horizontal_gap, config.vertical_gap)
            }
        }
    }

    fn drag_free(&mut self, delta: Point, container: Rect, link: &mut InteractionLink<'_>) -> InteractionEvent {
        let Some(surface) = link.surface.as_deref_mut() else {
            return InteractionEvent::Ignored;
        };
        let frame = surface.frame();
        let area = self.center_area(container, frame);
        let center = frame.center() + delta;
        let nearest = util::smallest_direction(area, center);

        if nearest.margin >= 0.0 {
            surface.set_frame(frame.with_center(center));
            let relative = util::relative_center_position(area, center);
            self.config.borrow_mut().set_relative_position(Some(relative));
            return InteractionEvent::Moved;
        }

        let origin = nearest.origin;
        let anchor = frame.with_center(nearest.clamped_center);
        surface.set_frame(anchor);
        self.session.pan_dismiss_direction = Some(origin);
        self.session.anchor_frame = anchor;
        self.session.overshoot = center - nearest.clamped_center;
        self.config.borrow_mut().set_runtime_slide_origin(Some(origin));
        slide_debug!(target: "slidekit.interaction", op = %self.operation, origin = %origin, "crossed edge, setting runtime origin");

        if !self.session.in_progress {
            self.session.in_progress = true;
            self.notify_begin();
            return InteractionEvent::Began;
        }

        // Crossed again within one gesture; the transition already exists.
        if let (Some(driver), Some(surface)) = (link.driver.as_deref_mut(), link.surface.as_deref_mut()) {
            driver.retarget(origin, surface);
            let geometry = driver.geometry();
            self.session.captured_start_frame = geometry.start_frame;
            self.session.captured_end_frame = geometry.end_frame;
        }
        self.scrub_overshoot(origin, container, link)
    }

    fn drag_past_edge(
        &mut self,
        origin: SlideOrigin,
        delta: Point,
        container: Rect,
        link: &mut InteractionLink<'_>,
    ) -> InteractionEvent {
        self.session.overshoot += delta;
        if util::outward_distance(self.session.overshoot, origin) > 0.0 {
            return self.scrub_overshoot(origin, container, link);
        }

        slide_debug!(target: "slidekit.interaction", op = %self.operation, "back inside, clearing runtime origin");
        if link.animation_in_progress() {
            self.update(0.0, link);
        }
        let anchor = self.session.anchor_frame;
        let area = self.center_area(container, anchor);
        let center = util::smallest_direction(area, anchor.center() + self.session.overshoot).clamped_center;
        if let Some(surface) = link.surface.as_deref_mut() {
            surface.set_frame(anchor.with_center(center));
        }
        self.session.pan_dismiss_direction = None;
        self.session.overshoot = Point::ZERO;
        self.session.last_percent = 0.0;
        self.config.borrow_mut().set_runtime_slide_origin(None);
        InteractionEvent::Moved
    }

    fn scrub_overshoot(
        &mut self,
        origin: SlideOrigin,
        container: Rect,
        link: &mut InteractionLink<'_>,
    ) -> InteractionEvent {
        let distance = util::outward_distance(self.session.overshoot, origin);
        let travel = util::travel_distance(origin, self.session.anchor_frame, container);
        let percent = distance / travel;
        if !(percent > 0.0) || !percent.is_finite() {
            return InteractionEvent::Ignored;
        }
        self.session.last_percent = percent;
        if !self.session.in_progress || !link.animation_in_progress() {
            return InteractionEvent::Ignored;
        }
        slide_debug!(target: "slidekit.interaction", op = %self.operation, percent, "updating past edge");
        self.update(percent, link);
        InteractionEvent::Updated(percent)
    }

    fn release_free_drag(
        &mut self,
        event: &PanEvent,
        container: Rect,
        link: &mut InteractionLink<'_>,
    ) -> InteractionEvent {
        let direction = self.session.pan_dismiss_direction;
        self.config.borrow_mut().set_runtime_slide_origin(None);
        if !self.session.in_progress {
            self.session = InteractionSession::default();
            return InteractionEvent::Ignored;
        }

        let percent = match direction {
            Some(origin) => {
                let anchor = self.session.anchor_frame;
                self.projected(self.session.last_percent, event, origin, anchor, container)
            }
            None => {
                // Released inside after re-entry: reversing must land where
                // the surface is now, not back at the edge.
                if let (Some(driver), Some(surface)) = (link.driver.as_deref_mut(), link.surface.as_deref_mut()) {
                    let origin = driver.origin();
                    driver.retarget(origin, surface);
                }
                0.0
            }
        };
        self.release(percent, link)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
