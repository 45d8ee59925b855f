#![forbid(unsafe_code)]

//! Placement of the presented surface inside its container.
//!
//! Two modes, picked by `layout_compressed`:
//!
//! - **Expanded**: the safe area inset by the gaps, shortened from the bottom
//!   by the keyboard while keyboard avoidance is on.
//! - **Compressed**: the surface's intrinsic size, placed in that same
//!   region by the anchors, or centered at the relative position a drag left
//!   behind.
//!
//! # Fitting
//!
//! The intrinsic size is probed one axis at a time: unconstrained first; if
//! the width overflows, again with the width required (otherwise, if the
//! height overflows, with the height required); if a corrected probe still
//! overflows, once more with both axes required.

use slidekit_core::geometry::{Insets, Rect, Size};
use slidekit_core::host::{ContainerMetrics, FitRequest, Surface};

use crate::config::{HorizontalAnchor, TransitionConfig, VerticalAnchor};
use crate::util;

/// Frame the surface should occupy for the current config.
#[must_use]
pub fn frame_of_presented_view(
    config: &TransitionConfig,
    metrics: &ContainerMetrics,
    surface: &dyn Surface,
) -> Rect {
    if config.layout_compressed {
        compressed_frame(config, metrics, surface)
    } else {
        expanded_frame(config, metrics)
    }
}

/// Safe area inset by the gaps, minus the keyboard overlap.
#[must_use]
pub fn expanded_frame(config: &TransitionConfig, metrics: &ContainerMetrics) -> Rect {
    let inset = metrics
        .safe_rect()
        .inset_by(config.horizontal_gap, config.vertical_gap);
    match keyboard_inset(config) {
        Some(bottom) => inset.inset(Insets::new(0.0, 0.0, bottom, 0.0)),
        None => inset,
    }
}

/// The keyboard's height minus the vertical gap, when avoidance applies.
fn keyboard_inset(config: &TransitionConfig) -> Option<f64> {
    if !config.keyboard_avoidance {
        return None;
    }
    config
        .keyboard_frame()
        .map(|kb| (kb.height - config.vertical_gap).max(0.0))
}

/// Intrinsic-size frame, anchored or at the dragged position.
#[must_use]
pub fn compressed_frame(
    config: &TransitionConfig,
    metrics: &ContainerMetrics,
    surface: &dyn Surface,
) -> Rect {
    let safe = metrics.safe_rect();
    let region = expanded_frame(config, metrics);
    let max = Size::new(
        (safe.width - 2.0 * config.horizontal_gap).max(0.0),
        (safe.height - 2.0 * config.vertical_gap).max(0.0),
    );
    let size = fit_size(surface, max);

    if let Some(relative) = config.relative_position() {
        let centers = region.inset_by(size.width / 2.0, size.height / 2.0);
        let center = util::center_for_relative_position(centers, relative);
        return Rect::from_size(size.width, size.height).with_center(center);
    }

    let x = match config.anchor_horizontal {
        HorizontalAnchor::Leading => region.min_x(),
        HorizontalAnchor::Trailing => region.max_x() - size.width,
        HorizontalAnchor::Auto | HorizontalAnchor::None | HorizontalAnchor::Middle => {
            region.min_x() + (region.width - size.width) / 2.0
        }
    };
    let y = match config.anchor_vertical {
        VerticalAnchor::Top => region.min_y(),
        VerticalAnchor::Bottom => region.max_y() - size.height,
        VerticalAnchor::Auto | VerticalAnchor::None | VerticalAnchor::Middle => {
            region.min_y() + (region.height - size.height) / 2.0
        }
    };
    Rect::new(x, y, size.width, size.height)
}

/// Probe the surface's intrinsic size against `max`.
#[must_use]
pub fn fit_size(surface: &dyn Surface, max: Size) -> Size {
    let probe = FitRequest::unconstrained(max);
    let mut size = surface.fitting_size(probe);

    let corrected = if size.width > max.width {
        size = surface.fitting_size(probe.require_width());
        true
    } else if size.height > max.height {
        size = surface.fitting_size(probe.require_height());
        true
    } else {
        false
    };

    if corrected && (size.width > max.width || size.height > max.height) {
        size = surface.fitting_size(probe.require_width().require_height());
    }
    size
}
