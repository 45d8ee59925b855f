#![forbid(unsafe_code)]

//! Presentation controller: chrome and per-transition state around one
//! presented surface.
//!
//! The controller owns everything that exists only while a surface is
//! presented: the backdrop, the optional wrapper container, keyboard
//! observation, the dismiss interaction, view panning, and the drivers of
//! the transitions in flight. The transition-scoped parts live in one
//! [`TransitionSlots`] bundle that is replaced wholesale once a dismissal
//! completes.
//!
//! # Lifecycle
//!
//! ```text
//! presentation_transition_will_begin ─▶ (present runs) ─▶ presentation_transition_did_end
//!                                                                   │
//! dismissal_transition_did_end ◀─ (dismiss runs) ◀─ dismissal_transition_will_begin
//! ```
//!
//! # Invariants
//!
//! 1. After a completed dismissal every slot is empty, the backdrop and
//!    wrapper are gone, and keyboard observation has stopped.
//! 2. A cancelled dismissal leaves the backdrop fully shown and every
//!    installed controller in place.
//! 3. Single-finger shift and edge-drag dismiss are never both live as
//!    separate recognizers.

use std::time::Duration;

use slidekit_core::animation::Spring;
use slidekit_core::geometry::Rect;
use slidekit_core::gesture::PanEvent;
use slidekit_core::host::{ContainerMetrics, KeyboardEvent, KeyboardEventKind, Surface};
use slidekit_core::{slide_debug, slide_info, slide_warn};

use crate::config::{BackdropConfig, Operation, SharedConfig};
use crate::driver::AnimationDriver;
use crate::interaction::{DismissAction, InteractionController};
use crate::layout;
use crate::panning::{PanOutcome, PanningController};

/// Nominal duration of an animated [`update_size`](PresentationController::update_size).
pub const RESIZE_RESPONSE: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Controllers and drivers that live for one present/dismiss round trip.
#[derive(Debug, Default)]
pub struct TransitionSlots {
    pub present_driver: Option<AnimationDriver>,
    pub dismiss_driver: Option<AnimationDriver>,
    pub dismiss_interaction: Option<InteractionController>,
    pub panning: Option<PanningController>,
}

impl TransitionSlots {
    /// Whether every slot is empty.
    pub fn is_clear(&self) -> bool {
        self.present_driver.is_none()
            && self.dismiss_driver.is_none()
            && self.dismiss_interaction.is_none()
            && self.panning.is_none()
    }

    pub fn driver(&self, op: Operation) -> Option<&AnimationDriver> {
        match op {
            Operation::Present => self.present_driver.as_ref(),
            Operation::Dismiss => self.dismiss_driver.as_ref(),
        }
    }

    pub fn driver_mut(&mut self, op: Operation) -> Option<&mut AnimationDriver> {
        match op {
            Operation::Present => self.present_driver.as_mut(),
            Operation::Dismiss => self.dismiss_driver.as_mut(),
        }
    }
}

// ---------------------------------------------------------------------------
// Backdrop
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f64,
    to: f64,
}

/// Dimming layer behind the presented surface.
///
/// `alpha` is the layer's visibility in `[0, 1]`; the rendered opacity is
/// `alpha * config.opacity`. While a fade is attached, alpha follows the
/// transition's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    config: BackdropConfig,
    installed: bool,
    alpha: f64,
    fade: Option<Fade>,
}

impl Backdrop {
    #[must_use]
    pub fn new(config: BackdropConfig) -> Self {
        Self {
            config,
            installed: false,
            alpha: 0.0,
            fade: None,
        }
    }

    pub fn install(&mut self) {
        if self.installed {
            slide_debug!(target: "slidekit.presentation", "backdrop already installed");
            return;
        }
        self.installed = true;
        self.alpha = 0.0;
        self.fade = None;
    }

    pub fn uninstall(&mut self) {
        if !self.installed {
            slide_debug!(target: "slidekit.presentation", "backdrop not installed");
        }
        self.installed = false;
        self.alpha = 0.0;
        self.fade = None;
    }

    #[inline]
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    #[inline]
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Rendered opacity.
    pub fn opacity(&self) -> f64 {
        self.alpha * self.config.opacity
    }

    /// Move toward `to`, tracking the transition when `animated`.
    pub fn fade_to(&mut self, to: f64, animated: bool) {
        if animated {
            self.fade = Some(Fade { from: self.alpha, to });
        } else {
            self.alpha = to;
            self.fade = None;
        }
    }

    /// Follow transition progress in `[0, 1]`.
    pub fn track(&mut self, progress: f64) {
        if let Some(fade) = self.fade {
            let t = progress.clamp(0.0, 1.0);
            self.alpha = fade.from + (fade.to - fade.from) * t;
        }
    }

    /// Settle the fade at its target, or back at its start when cancelled.
    pub fn end_fade(&mut self, cancelled: bool) {
        if let Some(fade) = self.fade.take() {
            self.alpha = if cancelled { fade.from } else { fade.to };
        }
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.fade = None;
    }
}

// ---------------------------------------------------------------------------
// Resize animation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Resize {
    from: Rect,
    to: Rect,
    spring: Spring,
}

// ---------------------------------------------------------------------------
// PresentationController
// ---------------------------------------------------------------------------

/// Chrome and per-transition state for one presented surface.
#[derive(Debug)]
pub struct PresentationController {
    config: SharedConfig,
    slots: TransitionSlots,
    backdrop: Backdrop,
    wrapper: Option<Rect>,
    observing_keyboard: bool,
    metrics: Option<ContainerMetrics>,
    dismiss_action: Option<DismissActionSlot>,
    resize: Option<Resize>,
}

/// Wrapper so the controller stays `Debug`.
#[derive(Clone)]
struct DismissActionSlot(DismissAction);

impl std::fmt::Debug for DismissActionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DismissAction")
    }
}

impl PresentationController {
    #[must_use]
    pub fn new(config: SharedConfig) -> Self {
        let backdrop = Backdrop::new(config.borrow().backdrop);
        Self {
            config,
            slots: TransitionSlots::default(),
            backdrop,
            wrapper: None,
            observing_keyboard: false,
            metrics: None,
            dismiss_action: None,
            resize: None,
        }
    }

    /// Action run to dismiss the surface (backdrop taps, dismiss gestures).
    #[must_use]
    pub fn with_dismiss_action(mut self, action: DismissAction) -> Self {
        self.dismiss_action = Some(DismissActionSlot(action));
        self
    }

    #[inline]
    pub fn slots(&self) -> &TransitionSlots {
        &self.slots
    }

    #[inline]
    pub fn slots_mut(&mut self) -> &mut TransitionSlots {
        &mut self.slots
    }

    #[inline]
    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    #[inline]
    pub fn backdrop_mut(&mut self) -> &mut Backdrop {
        &mut self.backdrop
    }

    /// Wrapper frame in container space, while a wrapper is installed.
    #[inline]
    pub fn wrapper(&self) -> Option<Rect> {
        self.wrapper
    }

    #[inline]
    pub fn is_observing_keyboard(&self) -> bool {
        self.observing_keyboard
    }

    /// Metrics from the last layout pass.
    #[inline]
    pub fn metrics(&self) -> Option<ContainerMetrics> {
        self.metrics
    }

    pub fn set_metrics(&mut self, metrics: ContainerMetrics) {
        self.metrics = Some(metrics);
    }

    /// Container bounds from the last layout pass.
    pub fn container_bounds(&self) -> Option<Rect> {
        self.metrics.map(|m| m.bounds)
    }

    // --- presentation ----------------------------------------------------------

    /// Install chrome before the present transition runs.
    ///
    /// With `animated` the backdrop fades in with the transition's progress;
    /// otherwise it snaps to fully shown. A wrapper starts out covering
    /// `container`, the transition's container frame, until the first layout
    /// pass resizes it.
    pub fn presentation_transition_will_begin(&mut self, animated: bool, container: Rect) {
        let (keyboard, backdrop, wrapper) = {
            let config = self.config.borrow();
            (config.keyboard_avoidance, config.backdrop_enabled, config.use_wrapper_container)
        };
        slide_debug!(target: "slidekit.presentation", animated, "presentation will begin");

        if keyboard {
            self.observing_keyboard = true;
        }
        if backdrop {
            self.backdrop.install();
            self.backdrop.fade_to(1.0, animated);
        }
        if wrapper {
            self.wrapper = Some(self.container_bounds().unwrap_or(container));
        }
    }

    /// Install the dismiss interaction and panning once the surface is up.
    pub fn presentation_transition_did_end(&mut self, completed: bool) {
        slide_debug!(target: "slidekit.presentation", completed, "presentation did end");
        self.backdrop.end_fade(!completed);
        if !completed {
            return;
        }

        let routing = self.config.borrow().resolved_pan_routing();
        if routing.dismiss_interaction {
            self.install_interactive_dismiss();
        }
        if routing.single_finger_suppressed {
            slide_info!(
                target: "slidekit.presentation",
                "single-finger shift collides with interactive dismiss; ignoring it, consider two-finger shift"
            );
        }
        if routing.hand_off_to_dismiss {
            self.install_panning_with_interaction();
        }
        if let Some(touches) = routing.view_panning_touches {
            self.install_view_panning(touches);
        }

        self.slots.present_driver = None;
    }

    fn install_interactive_dismiss(&mut self) {
        if self.slots.dismiss_interaction.is_some() {
            slide_debug!(target: "slidekit.presentation", "dismiss interaction already exists, skipping");
            return;
        }
        let mut ic = InteractionController::new(Operation::Dismiss, self.config.clone());
        if let Some(DismissActionSlot(action)) = &self.dismiss_action {
            ic = ic.with_dismiss_action(action.clone());
        }
        ic.attach(None);
        self.slots.dismiss_interaction = Some(ic);
    }

    fn install_panning_with_interaction(&mut self) {
        let panning = PanningController::single_finger(self.config.clone());
        match self.slots.dismiss_interaction.as_mut() {
            Some(ic) => ic.hand_off_panning(panning),
            None => slide_warn!(target: "slidekit.presentation", "no dismiss interaction to hand panning to"),
        }
    }

    fn install_view_panning(&mut self, touches: u8) {
        if let Some(mut old) = self.slots.panning.take() {
            old.detach();
        }
        let mut panning = PanningController::new(self.config.clone(), touches);
        panning.attach();
        self.slots.panning = Some(panning);
    }

    // --- dismissal -------------------------------------------------------------

    /// Fade the backdrop out alongside the dismissal.
    pub fn dismissal_transition_will_begin(&mut self, animated: bool) {
        slide_debug!(target: "slidekit.presentation", animated, "dismissal will begin");
        if !self.backdrop.is_installed() {
            slide_debug!(target: "slidekit.presentation", "no backdrop");
            return;
        }
        self.backdrop.fade_to(0.0, animated);
    }

    /// Tear down after a completed dismissal; restore the backdrop otherwise.
    pub fn dismissal_transition_did_end(&mut self, completed: bool) {
        slide_debug!(target: "slidekit.presentation", completed, "dismissal did end");
        if !completed {
            self.backdrop.end_fade(true);
            if self.backdrop.is_installed() {
                self.backdrop.set_alpha(1.0);
            }
            return;
        }

        self.observing_keyboard = false;
        self.backdrop.uninstall();
        if let Some(panning) = self.slots.panning.as_mut() {
            panning.detach();
        }
        self.wrapper = None;
        self.resize = None;
        slide_debug!(target: "slidekit.presentation", "resetting per-transition slots");
        self.slots = TransitionSlots::default();
        self.config.borrow_mut().set_runtime_slide_origin(None);
    }

    // --- host events -------------------------------------------------------------

    /// The backdrop was tapped. Returns whether a dismissal was requested.
    pub fn backdrop_tapped(&mut self) -> bool {
        if !self.backdrop.is_installed() || !self.backdrop.config().dismiss_on_tap {
            return false;
        }
        slide_debug!(target: "slidekit.presentation", "backdrop tapped, dismissing");
        if let Some(DismissActionSlot(action)) = &self.dismiss_action {
            action();
        }
        true
    }

    /// React to a keyboard notification. Returns whether layout is needed.
    pub fn handle_keyboard(&mut self, event: KeyboardEvent) -> bool {
        if !self.observing_keyboard {
            return false;
        }
        match event.kind {
            KeyboardEventKind::DidShow => {
                slide_debug!(target: "slidekit.presentation", frame = ?event.frame, "keyboard did show");
                self.config.borrow_mut().set_keyboard_frame(Some(event.frame));
                true
            }
            KeyboardEventKind::DidHide => {
                slide_debug!(target: "slidekit.presentation", "keyboard did hide");
                self.config.borrow_mut().set_keyboard_frame(None);
                true
            }
            _ => false,
        }
    }

    /// Feed a pan event to the standalone panning controller, if installed.
    pub fn handle_view_pan(&mut self, event: &PanEvent, surface: &mut dyn Surface) -> PanOutcome {
        let container = self.container_bounds().unwrap_or_default();
        let Some(panning) = self.slots.panning.as_mut() else {
            return PanOutcome::Ignored;
        };
        panning.handle_pan(event, surface, container, self.wrapper.as_mut())
    }

    /// Frame the surface should occupy in `metrics`.
    pub fn frame_of_presented_view(&self, metrics: &ContainerMetrics, surface: &dyn Surface) -> Rect {
        layout::frame_of_presented_view(&self.config.borrow(), metrics, surface)
    }

    /// Layout pass: place the surface and size the wrapper to the container.
    pub fn container_will_layout(&mut self, metrics: ContainerMetrics, surface: &mut dyn Surface) {
        self.metrics = Some(metrics);
        let frame = self.frame_of_presented_view(&metrics, surface);
        if let Some(wrapper) = self.wrapper.as_mut() {
            *wrapper = metrics.bounds;
        }
        self.resize = None;
        surface.set_frame(frame);
    }

    /// Re-run layout, animating toward the new frame with a critically
    /// damped spring when `animated`.
    pub fn update_size(&mut self, surface: &mut dyn Surface, animated: bool) {
        let Some(metrics) = self.metrics else {
            slide_debug!(target: "slidekit.presentation", "update_size before first layout, skipping");
            return;
        };
        if !animated {
            self.container_will_layout(metrics, surface);
            return;
        }
        let to = self.frame_of_presented_view(&metrics, surface);
        if let Some(wrapper) = self.wrapper.as_mut() {
            *wrapper = metrics.bounds;
        }
        self.resize = Some(Resize {
            from: surface.frame(),
            to,
            spring: Spring::critical(RESIZE_RESPONSE),
        });
    }

    #[inline]
    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Advance an animated resize. Returns whether it is still running.
    pub fn tick_layout(&mut self, dt: Duration, surface: &mut dyn Surface) -> bool {
        let Some(resize) = self.resize.as_mut() else {
            return false;
        };
        resize.spring.tick(dt);
        if resize.spring.is_at_rest() {
            surface.set_frame(resize.to);
            self.resize = None;
            slide_debug!(target: "slidekit.presentation", "update_size animation completed");
            return false;
        }
        surface.set_frame(resize.from.lerp(&resize.to, resize.spring.value()));
        true
    }
}
