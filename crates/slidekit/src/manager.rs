#![forbid(unsafe_code)]

//! Entry point for hosts: one [`SlidePresentationManager`] per presentable
//! surface.
//!
//! The manager answers the host's transition queries (which presentation
//! controller, which driver, whether an interaction is live) and offers
//! [`present`](SlidePresentationManager::present) /
//! [`dismiss`](SlidePresentationManager::dismiss) shortcuts that run the
//! whole sequence. Every frame the host calls
//! [`tick`](SlidePresentationManager::tick) while a transition is active,
//! including while the user scrubs it, so the backdrop follows along.
//!
//! # Lifecycle
//!
//! ```text
//!   present ──▶ Presenting ──tick: completed──▶ Presented ──dismiss──▶ Dismissing
//!      ▲            │ tick: cancelled                ▲                      │
//!      └────────────┘ (controller dropped)           └── tick: cancelled ───┤
//!      ▲                                                                    │
//!      └──────────────────────── tick: completed (slots cleared) ◀──────────┘
//! ```
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `animate_transition` without a driver | Error logged, transition completes with `false` |
//! | `interruptible_animator` without a driver | Inert animator; next tick completes |
//! | `present` while a transition is active or already presented | Warning logged, returns `false` |
//! | `dismiss` with nothing presented | Warning logged, returns `false` |

use std::time::Duration;

use slidekit_core::animation::{AnimatingPosition, InterruptibleAnimator, PropertyAnimator};
use slidekit_core::geometry::Rect;
use slidekit_core::gesture::PanEvent;
use slidekit_core::host::{ContainerMetrics, KeyboardEvent, Surface, TransitionContext};
use slidekit_core::{slide_debug, slide_error, slide_warn};

use crate::config::{Operation, SharedConfig, TransitionConfig, shared};
use crate::driver::{AnimationDriver, TransitionOutcome};
use crate::interaction::{BeginHook, DismissAction, InteractionController, InteractionEvent, InteractionLink};
use crate::panning::PanOutcome;
use crate::presentation::PresentationController;

/// Where the manager is in the present/dismiss cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Presenting,
    Presented,
    Dismissing,
}

/// Owns the config and every controller for one presentable surface.
pub struct SlidePresentationManager {
    config: SharedConfig,
    present_interaction: Option<InteractionController>,
    presentation: Option<PresentationController>,
    active: Option<Operation>,
    presented: bool,
    dismiss_action: Option<DismissAction>,
    fallback: PropertyAnimator,
    fallback_owed: Option<Operation>,
}

impl std::fmt::Debug for SlidePresentationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidePresentationManager")
            .field("config", &self.config)
            .field("present_interaction", &self.present_interaction)
            .field("presentation", &self.presentation)
            .field("active", &self.active)
            .field("presented", &self.presented)
            .field("dismiss_action", &self.dismiss_action.is_some())
            .field("fallback_owed", &self.fallback_owed)
            .finish()
    }
}

impl Default for SlidePresentationManager {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}

impl SlidePresentationManager {
    #[must_use]
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config: shared(config),
            present_interaction: None,
            presentation: None,
            active: None,
            presented: false,
            dismiss_action: None,
            fallback: PropertyAnimator::inert(),
            fallback_owed: None,
        }
    }

    /// Action that dismisses the surface on a backdrop tap or a dismiss
    /// gesture without a begin hook.
    ///
    /// The action runs while this manager is mutably borrowed, so it must
    /// not call [`dismiss`](Self::dismiss) directly. Queue the request and
    /// call `dismiss` once the current event has returned.
    #[must_use]
    pub fn with_dismiss_action(mut self, action: DismissAction) -> Self {
        self.dismiss_action = Some(action);
        self
    }

    /// The config shared by every component of this manager.
    #[inline]
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match (self.active, self.presented) {
            (Some(Operation::Present), _) => Phase::Presenting,
            (Some(Operation::Dismiss), _) => Phase::Dismissing,
            (None, true) => Phase::Presented,
            (None, false) => Phase::Idle,
        }
    }

    #[inline]
    pub fn active_operation(&self) -> Option<Operation> {
        self.active
    }

    #[inline]
    pub fn presentation(&self) -> Option<&PresentationController> {
        self.presentation.as_ref()
    }

    #[inline]
    pub fn presentation_mut(&mut self) -> Option<&mut PresentationController> {
        self.presentation.as_mut()
    }

    #[inline]
    pub fn present_interaction(&self) -> Option<&InteractionController> {
        self.present_interaction.as_ref()
    }

    /// Current backdrop opacity; 0 when nothing is presented.
    pub fn backdrop_opacity(&self) -> f64 {
        self.presentation
            .as_ref()
            .map_or(0.0, |pc| pc.backdrop().opacity())
    }

    // --- transitioning-delegate surface ----------------------------------------

    /// Let pans on a host view start an interactive presentation.
    ///
    /// Only one attachment is supported; later calls are ignored and return
    /// `false`.
    pub fn attach_present_interaction(&mut self, begin_hook: Option<BeginHook>) -> bool {
        if self.present_interaction.is_some() {
            slide_debug!(target: "slidekit.manager", "present interaction already exists, not attaching");
            return false;
        }
        if !self.config.borrow().interactive_present_enabled {
            slide_debug!(target: "slidekit.manager", "interactive present disabled, not attaching");
            return false;
        }
        let mut ic = InteractionController::new(Operation::Present, self.config.clone());
        ic.attach(begin_hook);
        self.present_interaction = Some(ic);
        true
    }

    /// Create the presentation controller for a new presentation.
    pub fn presentation_controller_for_presented(&mut self) -> &mut PresentationController {
        slide_debug!(target: "slidekit.manager", "creating presentation controller");
        let mut pc = PresentationController::new(self.config.clone());
        if let Some(action) = &self.dismiss_action {
            pc = pc.with_dismiss_action(action.clone());
        }
        self.presentation.insert(pc)
    }

    /// Create a fresh driver for `op` and store it for the transition.
    pub fn animation_controller(&mut self, op: Operation) -> &mut AnimationDriver {
        if self.presentation.is_none() {
            slide_warn!(target: "slidekit.manager", op = %op, "driver requested before presentation controller");
            self.presentation_controller_for_presented();
        }
        let config = self.config.clone();
        let pc = self
            .presentation
            .get_or_insert_with(|| PresentationController::new(config.clone()));
        let driver = AnimationDriver::new(op, config);
        let slots = pc.slots_mut();
        match op {
            Operation::Present => slots.present_driver.insert(driver),
            Operation::Dismiss => slots.dismiss_driver.insert(driver),
        }
    }

    /// Whether `op` should run interactively: only while its interaction
    /// controller has a gesture in progress.
    pub fn interaction_controller_available(&self, op: Operation) -> bool {
        let ic = match op {
            Operation::Present => self.present_interaction.as_ref(),
            Operation::Dismiss => self
                .presentation
                .as_ref()
                .and_then(|pc| pc.slots().dismiss_interaction.as_ref()),
        };
        let available = ic.is_some_and(InteractionController::is_in_progress);
        slide_debug!(target: "slidekit.manager", op = %op, available, "interaction controller query");
        available
    }

    /// Duration of `op`'s transition.
    pub fn transition_duration(&self, op: Operation) -> Duration {
        self.driver(op)
            .map_or_else(|| self.config.borrow().duration, AnimationDriver::duration)
    }

    /// Run `op`'s transition non-interactively.
    pub fn animate_transition(
        &mut self,
        op: Operation,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
    ) {
        match self.driver_mut(op) {
            Some(driver) => driver.start(ctx, surface),
            None => {
                slide_error!(target: "slidekit.manager", op = %op, "animation driver should exist but does not; completing unsuccessfully");
                ctx.complete_transition(false);
                if self.active == Some(op) {
                    self.finish_transition(TransitionOutcome {
                        operation: op,
                        completed: false,
                        position: AnimatingPosition::Start,
                    });
                }
            }
        }
    }

    /// The animator driving `op`, or an inert one when no driver exists.
    pub fn interruptible_animator(
        &mut self,
        op: Operation,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
    ) -> &mut dyn InterruptibleAnimator {
        if self.driver(op).is_none() {
            slide_error!(target: "slidekit.manager", op = %op, "animation driver should exist but does not; returning inert animator");
            self.fallback_owed = Some(op);
            if self.active.is_none() {
                self.active = Some(op);
            }
            return &mut self.fallback;
        }
        let pc = self.presentation.as_mut();
        match pc.and_then(|pc| pc.slots_mut().driver_mut(op)) {
            Some(driver) => driver.interruptible_animator(ctx, surface),
            None => &mut self.fallback,
        }
    }

    /// Hand `op`'s driver to its interaction controller.
    ///
    /// Returns `false` when either is missing.
    pub fn start_interactive_transition(
        &mut self,
        op: Operation,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
    ) -> bool {
        let Some(pc) = self.presentation.as_mut() else {
            return false;
        };
        let slots = pc.slots_mut();
        let (ic, driver) = match op {
            Operation::Present => (self.present_interaction.as_mut(), slots.present_driver.as_mut()),
            Operation::Dismiss => (slots.dismiss_interaction.as_mut(), slots.dismiss_driver.as_mut()),
        };
        match (ic, driver) {
            (Some(ic), Some(driver)) => {
                ic.start_interactive_transition(ctx, driver, surface);
                true
            }
            _ => {
                slide_warn!(target: "slidekit.manager", op = %op, "cannot start interactive transition");
                false
            }
        }
    }

    fn driver(&self, op: Operation) -> Option<&AnimationDriver> {
        self.presentation.as_ref().and_then(|pc| pc.slots().driver(op))
    }

    fn driver_mut(&mut self, op: Operation) -> Option<&mut AnimationDriver> {
        self.presentation
            .as_mut()
            .and_then(|pc| pc.slots_mut().driver_mut(op))
    }

    // --- shortcuts ---------------------------------------------------------------

    /// Present the surface: install chrome, create the driver, then run it
    /// interactively if a present gesture is in progress or timed otherwise.
    ///
    /// Without `animated` the transition completes on the next tick.
    pub fn present(
        &mut self,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
        animated: bool,
    ) -> bool {
        let _span = tracing::debug_span!("slidekit.present", animated).entered();
        if let Some(active) = self.active {
            slide_warn!(target: "slidekit.manager", active = %active, "present while a transition is active, ignoring");
            return false;
        }
        if self.presented {
            slide_warn!(target: "slidekit.manager", "present while already presented, ignoring");
            return false;
        }
        let container = ctx.container_frame();
        self.presentation_controller_for_presented()
            .presentation_transition_will_begin(animated, container);
        self.begin(Operation::Present, ctx, surface, animated);
        true
    }

    /// Dismiss the surface, interactively if a dismiss gesture is in
    /// progress.
    pub fn dismiss(
        &mut self,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
        animated: bool,
    ) -> bool {
        let _span = tracing::debug_span!("slidekit.dismiss", animated).entered();
        if let Some(active) = self.active {
            slide_warn!(target: "slidekit.manager", active = %active, "dismiss while a transition is active, ignoring");
            return false;
        }
        let Some(pc) = self.presentation.as_mut().filter(|_| self.presented) else {
            slide_warn!(target: "slidekit.manager", "dismiss with nothing presented, ignoring");
            return false;
        };
        pc.dismissal_transition_will_begin(animated);
        self.begin(Operation::Dismiss, ctx, surface, animated);
        true
    }

    fn begin(
        &mut self,
        op: Operation,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
        animated: bool,
    ) {
        self.active = Some(op);
        let duration = if animated {
            self.config.borrow().duration
        } else {
            Duration::ZERO
        };
        self.animation_controller(op).setup(duration);
        if self.interaction_controller_available(op) {
            self.start_interactive_transition(op, ctx, surface);
        } else {
            self.animate_transition(op, ctx, surface);
        }
    }

    /// Advance the active transition by `dt`.
    ///
    /// Returns the outcome on the tick the transition completes; the
    /// presentation controller's did-end hook has run by then.
    pub fn tick(
        &mut self,
        dt: Duration,
        ctx: &mut dyn TransitionContext,
        surface: &mut dyn Surface,
    ) -> Option<TransitionOutcome> {
        let op = self.active?;
        let outcome = if self.fallback_owed.take().is_some() {
            let completed = !ctx.transition_was_cancelled();
            slide_debug!(target: "slidekit.manager", op = %op, completed, "completing through inert animator");
            ctx.complete_transition(completed);
            TransitionOutcome {
                operation: op,
                completed,
                position: AnimatingPosition::End,
            }
        } else {
            let pc = self.presentation.as_mut()?;
            let driver = pc.slots_mut().driver_mut(op)?;
            let outcome = driver.tick(dt, ctx, surface);
            let fraction = driver.fraction_complete();
            match outcome {
                Some(outcome) => outcome,
                None => {
                    if let Some(fraction) = fraction {
                        pc.backdrop_mut().track(fraction);
                    }
                    return None;
                }
            }
        };

        self.finish_transition(outcome);
        Some(outcome)
    }

    fn finish_transition(&mut self, outcome: TransitionOutcome) {
        let _span = tracing::debug_span!(
            "slidekit.transition_end",
            op = %outcome.operation,
            completed = outcome.completed
        )
        .entered();
        self.active = None;
        self.config.borrow_mut().set_runtime_slide_origin(None);
        let Some(pc) = self.presentation.as_mut() else {
            return;
        };
        match (outcome.operation, outcome.completed) {
            (Operation::Present, true) => {
                pc.presentation_transition_did_end(true);
                self.presented = true;
            }
            (Operation::Present, false) => {
                pc.presentation_transition_did_end(false);
                slide_debug!(target: "slidekit.manager", "presentation cancelled, dropping controller");
                self.presentation = None;
            }
            (Operation::Dismiss, completed) => {
                pc.dismissal_transition_did_end(completed);
                pc.slots_mut().dismiss_driver = None;
                self.presented = !completed;
            }
        }
    }

    // --- gestures -------------------------------------------------------------------

    /// Feed a pan on the present-gesture view.
    ///
    /// Before the transition exists only `container` is used; once
    /// [`present`](Self::present) has run, pass the context and surface too.
    pub fn handle_present_pan<'h>(
        &'h mut self,
        event: &PanEvent,
        container: Rect,
        ctx: Option<&'h mut dyn TransitionContext>,
        surface: Option<&'h mut dyn Surface>,
    ) -> InteractionEvent {
        let Some(ic) = self.present_interaction.as_mut() else {
            return InteractionEvent::Ignored;
        };
        let driver = match self.active {
            Some(Operation::Present) => self
                .presentation
                .as_mut()
                .and_then(|pc| pc.slots_mut().present_driver.as_mut()),
            _ => None,
        };
        let link = InteractionLink {
            driver,
            ctx,
            surface,
            container: Some(container),
        };
        ic.handle_pan(event, link)
    }

    /// Feed a pan on the presented surface to the dismiss interaction.
    pub fn handle_dismiss_pan<'h>(
        &'h mut self,
        event: &PanEvent,
        container: Rect,
        ctx: Option<&'h mut dyn TransitionContext>,
        surface: Option<&'h mut dyn Surface>,
    ) -> InteractionEvent {
        let dismissing = self.active == Some(Operation::Dismiss);
        let Some(pc) = self.presentation.as_mut() else {
            return InteractionEvent::Ignored;
        };
        let slots = pc.slots_mut();
        let Some(ic) = slots.dismiss_interaction.as_mut() else {
            return InteractionEvent::Ignored;
        };
        let driver = if dismissing {
            slots.dismiss_driver.as_mut()
        } else {
            None
        };
        let link = InteractionLink {
            driver,
            ctx,
            surface,
            container: Some(container),
        };
        ic.handle_pan(event, link)
    }

    /// Feed a pan to the standalone shift controller.
    pub fn handle_shift_pan(&mut self, event: &PanEvent, surface: &mut dyn Surface) -> PanOutcome {
        match self.presentation.as_mut() {
            Some(pc) => pc.handle_view_pan(event, surface),
            None => PanOutcome::Ignored,
        }
    }

    // --- host events ----------------------------------------------------------------

    /// The backdrop was tapped. Returns whether a dismissal was requested.
    pub fn backdrop_tapped(&mut self) -> bool {
        if self.active.is_some() || !self.presented {
            return false;
        }
        self.presentation
            .as_mut()
            .is_some_and(PresentationController::backdrop_tapped)
    }

    /// Forward a keyboard notification. Returns whether layout is needed.
    pub fn handle_keyboard(&mut self, event: KeyboardEvent) -> bool {
        self.presentation
            .as_mut()
            .is_some_and(|pc| pc.handle_keyboard(event))
    }

    /// Layout pass for the container.
    pub fn container_will_layout(&mut self, metrics: ContainerMetrics, surface: &mut dyn Surface) {
        match self.presentation.as_mut() {
            Some(pc) => pc.container_will_layout(metrics, surface),
            None => slide_debug!(target: "slidekit.manager", "layout with nothing presented"),
        }
    }

    /// Re-fit the presented surface, optionally animated.
    pub fn update_size(&mut self, surface: &mut dyn Surface, animated: bool) {
        if let Some(pc) = self.presentation.as_mut() {
            pc.update_size(surface, animated);
        }
    }

    /// Advance an animated [`update_size`](Self::update_size).
    pub fn tick_layout(&mut self, dt: Duration, surface: &mut dyn Surface) -> bool {
        self.presentation
            .as_mut()
            .is_some_and(|pc| pc.tick_layout(dt, surface))
    }
}
