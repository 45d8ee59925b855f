#![forbid(unsafe_code)]

//! End-to-end transition cycles through the public manager API.
//!
//! Covers:
//! (1) scalar sign convention for every origin and both operations
//! (2) percentage endpoints at 0 and at the travel distance
//! (3) dismissed frames sit exactly off screen at each edge
//! (4) a wrong-direction gesture never begins a dismissal
//! (5) commit at 0.7 finishes once; cancel at 0.3 never finishes
//! (6) configuring a driver twice builds one animator
//! (7) free drag crossing an edge and coming back
//! (8) a completed dismissal leaves no per-transition state behind
//!
//! Run:
//!   cargo test -p slidekit --test transition_cycle

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use slidekit::driver::TransitionGeometry;
use slidekit::interaction::InteractionEvent;
use slidekit::presentation::TransitionSlots;
use slidekit::util::{percentage, scalar, smallest_direction, travel_distance};
use slidekit::{
    AnimationDriver, Operation, PanEvent, PanMode, Phase, Point, Rect, SlideOrigin,
    SlidePresentationManager, TransitionConfig,
};
use slidekit_core::testing::{RecordingContext, TestSurface};
use tracing_subscriber::layer::SubscriberExt;

const MS_16: Duration = Duration::from_millis(16);
const CONTAINER: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);
const SHEET: Rect = Rect::new(0.0, 400.0, 400.0, 400.0);
const CARD: Rect = Rect::new(100.0, 300.0, 200.0, 200.0);

const ORIGINS: [SlideOrigin; 4] = [
    SlideOrigin::Top,
    SlideOrigin::Bottom,
    SlideOrigin::Leading,
    SlideOrigin::Trailing,
];

// ============================================================================
// Helpers
// ============================================================================

/// Unit drag that reveals a surface sliding in from `origin`.
fn reveal(origin: SlideOrigin) -> Point {
    match origin {
        SlideOrigin::Top => Point::new(0.0, 1.0),
        SlideOrigin::Leading => Point::new(1.0, 0.0),
        SlideOrigin::Trailing => Point::new(-1.0, 0.0),
        _ => Point::new(0.0, -1.0),
    }
}

fn scaled(p: Point, by: f64) -> Point {
    Point::new(p.x * by, p.y * by)
}

fn settle(
    m: &mut SlidePresentationManager,
    ctx: &mut RecordingContext,
    surface: &mut TestSurface,
) -> bool {
    for _ in 0..200 {
        if let Some(outcome) = m.tick(MS_16, ctx, surface) {
            return outcome.completed;
        }
    }
    panic!("transition did not complete");
}

/// A manager with `frame` presented, plus the surface it presented.
fn presented(config: TransitionConfig, frame: Rect) -> (SlidePresentationManager, TestSurface) {
    let mut m = SlidePresentationManager::new(config);
    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(frame);
    let mut surface = TestSurface::new(Rect::default());
    assert!(m.present(&mut ctx, &mut surface, true));
    assert!(settle(&mut m, &mut ctx, &mut surface));
    assert_eq!(ctx.completed_once(), Some(true));
    (m, surface)
}

// ============================================================================
// Pure geometry
// ============================================================================

#[test]
fn scalar_sign_convention_for_every_origin() {
    for origin in ORIGINS {
        let toward_reveal = scaled(reveal(origin), 25.0);
        let toward_conceal = scaled(reveal(origin), -25.0);
        assert!(scalar(toward_reveal, origin, Operation::Present) > 0.0, "{origin}");
        assert!(scalar(toward_conceal, origin, Operation::Present) <= 0.0, "{origin}");
        assert!(scalar(toward_conceal, origin, Operation::Dismiss) > 0.0, "{origin}");
        assert!(scalar(toward_reveal, origin, Operation::Dismiss) <= 0.0, "{origin}");
    }
}

#[test]
fn percentage_spans_zero_to_one_over_travel() {
    for origin in ORIGINS {
        for op in [Operation::Present, Operation::Dismiss] {
            assert_eq!(percentage(0.0, origin, CARD, CONTAINER, op), 0.0);
            let travel = travel_distance(origin, CARD, CONTAINER);
            let full = percentage(travel, origin, CARD, CONTAINER, op);
            assert!((full - 1.0).abs() < 1e-12, "{origin} {op}: {full}");
        }
    }
}

#[test]
fn dismissed_frames_sit_just_off_screen() {
    let expected = [
        (SlideOrigin::Leading, Rect::new(-200.0, 300.0, 200.0, 200.0)),
        (SlideOrigin::Trailing, Rect::new(400.0, 300.0, 200.0, 200.0)),
        (SlideOrigin::Top, Rect::new(100.0, -200.0, 200.0, 200.0)),
        (SlideOrigin::Bottom, Rect::new(100.0, 800.0, 200.0, 200.0)),
    ];
    for (origin, frame) in expected {
        let g = TransitionGeometry::compute(Operation::Dismiss, origin, CONTAINER, CARD);
        assert_eq!(g.dismissed_frame, frame, "{origin}");
        assert_eq!(g.end_frame, frame);
        let g = TransitionGeometry::compute(Operation::Present, origin, CONTAINER, CARD);
        assert_eq!(g.start_frame, frame);
    }
}

// ============================================================================
// Interactive dismissal
// ============================================================================

#[test]
fn wrong_direction_never_begins_dismissal() {
    let dismissals = Rc::new(Cell::new(0));
    let counter = dismissals.clone();
    let mut m = SlidePresentationManager::new(TransitionConfig::new().slide_origin(SlideOrigin::Bottom))
        .with_dismiss_action(Rc::new(move || counter.set(counter.get() + 1)));
    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(SHEET);
    let mut surface = TestSurface::new(Rect::default());
    assert!(m.present(&mut ctx, &mut surface, false));
    assert!(settle(&mut m, &mut ctx, &mut surface));

    let up = [
        PanEvent::began(0.0, -20.0),
        PanEvent::changed(0.0, -60.0),
        PanEvent::ended(0.0, -60.0),
    ];
    for event in up {
        let out = m.handle_dismiss_pan(&event, CONTAINER, None, None);
        assert!(matches!(out, InteractionEvent::Rejected | InteractionEvent::Ignored), "{out:?}");
    }
    assert!(!m.interaction_controller_available(Operation::Dismiss));
    assert_eq!(dismissals.get(), 0);
    assert_eq!(m.phase(), Phase::Presented);
}

fn drag_and_release(release_at: f64) -> (SlidePresentationManager, RecordingContext, TestSurface) {
    let (mut m, mut surface) = presented(TransitionConfig::new().slide_origin(SlideOrigin::Bottom), SHEET);
    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(SHEET);

    let out = m.handle_dismiss_pan(&PanEvent::began(0.0, 10.0), CONTAINER, None, None);
    assert_eq!(out, InteractionEvent::Began);
    assert!(m.dismiss(&mut ctx, &mut surface, true));
    assert_eq!(m.phase(), Phase::Dismissing);

    let y = release_at * 400.0;
    let out = m.handle_dismiss_pan(&PanEvent::changed(0.0, y), CONTAINER, Some(&mut ctx), Some(&mut surface));
    assert!(matches!(out, InteractionEvent::Updated(p) if (p - release_at).abs() < 1e-9));
    assert!((surface.frame.y - (400.0 + y)).abs() < 1e-9);
    m.tick(MS_16, &mut ctx, &mut surface);
    let alpha = m.presentation().unwrap().backdrop().alpha();
    assert!((alpha - (1.0 - release_at)).abs() < 1e-9);

    m.handle_dismiss_pan(&PanEvent::ended(0.0, y), CONTAINER, Some(&mut ctx), Some(&mut surface));
    (m, ctx, surface)
}

#[test]
fn release_at_seventy_percent_commits_once() {
    let (mut m, mut ctx, mut surface) = drag_and_release(0.7);
    assert_eq!(ctx.finish_calls, 1);
    assert_eq!(ctx.cancel_calls, 0);
    assert!(settle(&mut m, &mut ctx, &mut surface));
    assert_eq!(ctx.completed_once(), Some(true));
    assert!(surface.hidden);
    assert_eq!(surface.frame, Rect::new(0.0, 800.0, 400.0, 400.0));
    assert_eq!(m.phase(), Phase::Idle);
    assert!(m.presentation().unwrap().slots().is_clear());
}

#[test]
fn release_at_thirty_percent_cancels() {
    let (mut m, mut ctx, mut surface) = drag_and_release(0.3);
    assert_eq!(ctx.cancel_calls, 1);
    assert_eq!(ctx.finish_calls, 0);
    assert!(!settle(&mut m, &mut ctx, &mut surface));
    assert_eq!(ctx.completed_once(), Some(false));
    assert_eq!(surface.frame, SHEET);
    assert!(!surface.hidden);
    let pc = m.presentation().unwrap();
    assert_eq!(pc.backdrop().alpha(), 1.0);
    assert!(pc.slots().dismiss_interaction.is_some());

    // the surface can still be dismissed afterwards
    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(SHEET);
    assert!(m.dismiss(&mut ctx, &mut surface, true));
    assert!(settle(&mut m, &mut ctx, &mut surface));
}

// ============================================================================
// Driver idempotence
// ============================================================================

#[test]
fn configuring_twice_builds_one_animator() {
    let m = SlidePresentationManager::default();
    let mut driver = AnimationDriver::new(Operation::Present, m.config().clone());
    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(SHEET);
    let mut surface = TestSurface::new(Rect::default());
    assert!(driver.configure_animations(&mut ctx, &mut surface));
    assert!(driver.configure_animations(&mut ctx, &mut surface));
    assert_eq!(driver.animator_builds(), 1);
    assert_eq!(ctx.inserts, 1);
}

// ============================================================================
// Free drag
// ============================================================================

fn free_drag_manager() -> (SlidePresentationManager, TestSurface) {
    presented(
        TransitionConfig::new()
            .pan_mode(PanMode::SingleFingerShiftToDismiss)
            .allow_single_finger_with_interactive_dismiss(true),
        CARD,
    )
}

#[test]
fn free_drag_edge_crossing_sets_and_clears_override() {
    let (mut m, mut surface) = free_drag_manager();
    // center area (140,140)-(260,660); the card's center starts at (200,400)
    let area = Rect::new(140.0, 140.0, 120.0, 520.0);
    let probe = smallest_direction(area, Point::new(139.0, 400.0));
    assert_eq!(probe.origin, SlideOrigin::Leading);
    assert!(probe.margin < 0.0);

    let out = m.handle_dismiss_pan(&PanEvent::began(-61.0, 0.0), CONTAINER, None, Some(&mut surface));
    assert_eq!(out, InteractionEvent::Began);
    let ic = m.presentation().unwrap().slots().dismiss_interaction.as_ref().unwrap();
    assert_eq!(ic.pan_dismiss_direction(), Some(SlideOrigin::Leading));
    assert_eq!(m.config().borrow().effective_origin(), SlideOrigin::Leading);

    let out = m.handle_dismiss_pan(&PanEvent::changed(-59.0, 0.0), CONTAINER, None, Some(&mut surface));
    assert_eq!(out, InteractionEvent::Moved);
    let ic = m.presentation().unwrap().slots().dismiss_interaction.as_ref().unwrap();
    assert_eq!(ic.pan_dismiss_direction(), None);
    assert_eq!(m.config().borrow().runtime_slide_origin(), None);
    assert_eq!(surface.frame.x, 41.0);
}

#[test]
fn free_drag_past_edge_dismisses_toward_crossed_edge() {
    let (mut m, mut surface) = free_drag_manager();
    // the host still reports the layout frame, not the dragged one
    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(CARD);

    let out = m.handle_dismiss_pan(&PanEvent::began(-30.0, 0.0), CONTAINER, None, Some(&mut surface));
    assert_eq!(out, InteractionEvent::Moved);
    assert_eq!(surface.frame.x, 70.0);
    // center 170 -> 130: ten points past the leading edge
    let out = m.handle_dismiss_pan(&PanEvent::changed(-70.0, 0.0), CONTAINER, None, Some(&mut surface));
    assert_eq!(out, InteractionEvent::Began);
    assert_eq!(surface.frame.x, 40.0);
    assert!(m.dismiss(&mut ctx, &mut surface, true));
    assert_eq!(surface.frame.x, 40.0);

    let out = m.handle_dismiss_pan(&PanEvent::changed(-180.0, 0.0), CONTAINER, Some(&mut ctx), Some(&mut surface));
    assert_eq!(out, InteractionEvent::Updated(0.5));
    assert_eq!(surface.frame.x, -80.0);
    let out = m.handle_dismiss_pan(&PanEvent::ended(-180.0, 0.0), CONTAINER, Some(&mut ctx), Some(&mut surface));
    assert_eq!(out, InteractionEvent::Finished);
    assert_eq!(m.config().borrow().runtime_slide_origin(), None);

    assert!(settle(&mut m, &mut ctx, &mut surface));
    assert_eq!(surface.frame.x, -200.0);
    assert!(surface.hidden);
    // the dragged position is remembered for the next presentation
    assert!(m.config().borrow().relative_position().is_some());
}

// ============================================================================
// Cleanup
// ============================================================================

#[test]
fn completed_dismissal_resets_to_fresh_state() {
    let config = TransitionConfig::new()
        .pan_mode(PanMode::TwoFingerShift)
        .keyboard_avoidance(true)
        .use_wrapper_container(true);
    let (mut m, mut surface) = presented(config, SHEET);
    let after_first_present = format!("{:?}", m.presentation().unwrap().slots());
    assert!(m.presentation().unwrap().slots().panning.is_some());

    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(SHEET);
    assert!(m.dismiss(&mut ctx, &mut surface, false));
    assert!(settle(&mut m, &mut ctx, &mut surface));

    let pc = m.presentation().unwrap();
    assert!(pc.slots().is_clear());
    assert_eq!(format!("{:?}", pc.slots()), format!("{:?}", TransitionSlots::default()));
    assert!(!pc.backdrop().is_installed());
    assert!(pc.wrapper().is_none());
    assert!(!pc.is_observing_keyboard());
    assert_eq!(m.config().borrow().runtime_slide_origin(), None);

    // a second cycle starts from the same state as the first
    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(SHEET);
    surface.hidden = false;
    assert!(m.present(&mut ctx, &mut surface, true));
    assert!(settle(&mut m, &mut ctx, &mut surface));
    assert_eq!(format!("{:?}", m.presentation().unwrap().slots()), after_first_present);
    assert_eq!(ctx.completed_once(), Some(true));
}

// ============================================================================
// Diagnostics
// ============================================================================

struct LevelCapture(Arc<Mutex<Vec<tracing::Level>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        self.0.lock().unwrap().push(*event.metadata().level());
    }
}

#[test]
fn missing_driver_is_reported_as_error() {
    slidekit::set_diagnostics_enabled(true);
    let levels = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(LevelCapture(levels.clone()));

    let mut m = SlidePresentationManager::default();
    let mut ctx = RecordingContext::new(CONTAINER).with_final_frame(SHEET);
    let mut surface = TestSurface::new(Rect::default());
    tracing::subscriber::with_default(subscriber, || {
        m.animate_transition(Operation::Present, &mut ctx, &mut surface);
    });

    assert!(levels.lock().unwrap().contains(&tracing::Level::ERROR));
    assert_eq!(ctx.completed_once(), Some(false));
}
