#![forbid(unsafe_code)]

//! Gesture-to-progress math.
//!
//! Pure functions that turn pan translations into directional scalars and
//! completion percentages, and that describe the region the surface's center
//! may occupy during a free drag.
//!
//! # Sign conventions
//!
//! For a *present*, motion away from the origin edge is positive: dragging
//! down presents a `Top` surface, dragging up presents a `Bottom` one. A
//! *dismiss* negates the scalar, so dragging toward the origin edge is
//! positive.
//!
//! # Failure Modes
//!
//! - Travel distances of zero produce non-finite percentages. Callers treat
//!   anything that is not `>= 0.5` (including NaN) as "not enough to commit".
//! - A zero-sized allowed center area reports relative position 0.5 on that
//!   axis.

use std::time::Duration;

use slidekit_core::geometry::{Point, Rect, Size};

use crate::config::{Operation, SlideOrigin};

/// Progress at or above which a released gesture commits.
pub const COMMIT_THRESHOLD: f64 = 0.5;

/// Signed translation along the origin's axis.
///
/// The axis must strictly dominate: equal magnitudes, or motion mostly along
/// the other axis, yield 0.
#[must_use]
pub fn scalar(translation: Point, origin: SlideOrigin, op: Operation) -> f64 {
    let vert = translation.y.abs() > translation.x.abs();
    let horz = translation.x.abs() > translation.y.abs();
    let rc = match origin.resolved() {
        SlideOrigin::Top if vert => translation.y,
        SlideOrigin::Leading if horz => translation.x,
        SlideOrigin::Trailing if horz => -translation.x,
        SlideOrigin::Bottom if vert => -translation.y,
        _ => 0.0,
    };
    match op {
        Operation::Present => rc,
        Operation::Dismiss => -rc,
    }
}

/// Whether `translation` moves in the direction that advances `op`.
#[inline]
#[must_use]
pub fn direction_matches(translation: Point, origin: SlideOrigin, op: Operation) -> bool {
    scalar(translation, origin, op) > 0.0
}

/// Distance the surface travels between its off-screen and presented frames.
///
/// Measured from the container edge at the origin to the far side of the
/// presented frame.
#[must_use]
pub fn travel_distance(origin: SlideOrigin, presented: Rect, container: Rect) -> f64 {
    match origin.resolved() {
        SlideOrigin::Top => presented.max_y(),
        SlideOrigin::Leading => presented.max_x(),
        SlideOrigin::Trailing => container.max_x() - presented.min_x(),
        _ => container.max_y() - presented.min_y(),
    }
}

/// Completion percentage for a directional scalar.
///
/// `op` only matters through the sign already folded into `scalar`; the
/// travel distance is the same for present and dismiss.
#[must_use]
pub fn percentage(
    scalar: f64,
    origin: SlideOrigin,
    presented: Rect,
    container: Rect,
    _op: Operation,
) -> f64 {
    scalar / travel_distance(origin, presented, container)
}

/// Release percentage with the velocity projected `horizon` ahead.
#[must_use]
pub fn projected_percentage(
    percent: f64,
    velocity_scalar: f64,
    travel: f64,
    horizon: Duration,
) -> f64 {
    percent + velocity_scalar * horizon.as_secs_f64() / travel
}

/// Distance `overshoot` reaches past the `origin` edge (positive = outward).
#[must_use]
pub fn outward_distance(overshoot: Point, origin: SlideOrigin) -> f64 {
    match origin.resolved() {
        SlideOrigin::Top => -overshoot.y,
        SlideOrigin::Leading => -overshoot.x,
        SlideOrigin::Trailing => overshoot.x,
        _ => overshoot.y,
    }
}

// ---------------------------------------------------------------------------
// Free-drag regions
// ---------------------------------------------------------------------------

/// Region the surface's center may occupy: the container inset by the gaps,
/// then by half the surface size.
#[must_use]
pub fn allowed_center_area(container: Rect, surface: Size, horizontal_gap: f64, vertical_gap: f64) -> Rect {
    container
        .inset_by(horizontal_gap, vertical_gap)
        .inset_by(surface.width / 2.0, surface.height / 2.0)
}

/// Position of `center` within `area`, `(0, 0)` top-left to `(1, 1)` bottom-right.
#[must_use]
pub fn relative_center_position(area: Rect, center: Point) -> Point {
    let axis = |pos: f64, min: f64, len: f64| {
        if len > 0.0 { (pos - min) / len } else { 0.5 }
    };
    Point::new(
        axis(center.x, area.min_x(), area.width),
        axis(center.y, area.min_y(), area.height),
    )
}

/// Inverse of [`relative_center_position`].
#[must_use]
pub fn center_for_relative_position(area: Rect, relative: Point) -> Point {
    Point::new(
        area.min_x() + relative.x * area.width,
        area.min_y() + relative.y * area.height,
    )
}

/// The closest edge of an allowed center area, as seen from a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalMargin {
    /// Distance to that edge; negative once the center is past it.
    pub margin: f64,
    pub origin: SlideOrigin,
    /// `center` with the crossed axis pinned to the edge when `margin < 0`.
    pub clamped_center: Point,
}

/// Find the edge of `area` closest to `center`.
///
/// Candidates are evaluated leading, trailing, top, bottom; a later candidate
/// replaces the current one only when strictly smaller.
#[must_use]
pub fn smallest_direction(area: Rect, center: Point) -> DirectionalMargin {
    let candidates = [
        (center.x - area.min_x(), SlideOrigin::Leading),
        (area.max_x() - center.x, SlideOrigin::Trailing),
        (center.y - area.min_y(), SlideOrigin::Top),
        (area.max_y() - center.y, SlideOrigin::Bottom),
    ];

    let (mut margin, mut origin) = candidates[0];
    for &(m, o) in &candidates[1..] {
        if m < margin {
            margin = m;
            origin = o;
        }
    }

    let mut clamped_center = center;
    if margin < 0.0 {
        match origin {
            SlideOrigin::Leading => clamped_center.x = area.min_x(),
            SlideOrigin::Trailing => clamped_center.x = area.max_x(),
            SlideOrigin::Top => clamped_center.y = area.min_y(),
            _ => clamped_center.y = area.max_y(),
        }
    }

    DirectionalMargin {
        margin,
        origin,
        clamped_center,
    }
}
