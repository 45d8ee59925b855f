#![forbid(unsafe_code)]

//! Transition configuration.
//!
//! One [`TransitionConfig`] lives for the lifetime of a
//! [`SlidePresentationManager`](crate::manager::SlidePresentationManager) and
//! is shared by every component of that manager through [`SharedConfig`].
//! Most fields are tunables set by the host before presenting; three are
//! runtime state written by the engine itself:
//!
//! - `runtime_slide_origin`: the edge a free drag crossed. Overrides
//!   `slide_origin` for the rest of that transition.
//! - `relative_position`: where the user last dragged the surface, read back
//!   by every later layout pass.
//! - `keyboard_frame`: the on-screen keyboard, while shown.
//!
//! # Invariants
//!
//! 1. `effective_origin()` is `runtime_slide_origin` when set, else
//!    `slide_origin`.
//! 2. `relative_position`, when set, lies in `[0, 1]²`.
//! 3. Single-finger shift never races an edge-drag dismiss: see
//!    [`TransitionConfig::resolved_pan_routing`].
//!
//! # File loading
//!
//! With the `config-file` feature, tunables load from TOML or JSON. Runtime
//! state is never (de)serialized.

use std::cell::RefCell;
use std::fmt;
#[cfg(feature = "config-file")]
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use slidekit_core::geometry::{Point, Rect};

use crate::error::ConfigError;

/// Config shared by one manager's components.
pub type SharedConfig = Rc<RefCell<TransitionConfig>>;

/// Wrap a config for sharing.
#[must_use]
pub fn shared(config: TransitionConfig) -> SharedConfig {
    Rc::new(RefCell::new(config))
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Whether a transition brings the surface on screen or takes it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Present,
    Dismiss,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Dismiss => "dismiss",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The screen edge the surface slides in from.
///
/// `Auto` and `None` behave like `Bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "snake_case"))]
pub enum SlideOrigin {
    #[default]
    Auto,
    None,
    Top,
    Bottom,
    Leading,
    Trailing,
}

impl SlideOrigin {
    /// Debug name with a leading dot, e.g. `.leading`.
    pub const fn debug_name(self) -> &'static str {
        match self {
            Self::Auto => ".auto",
            Self::None => ".none",
            Self::Top => ".top",
            Self::Bottom => ".bottom",
            Self::Leading => ".leading",
            Self::Trailing => ".trailing",
        }
    }

    /// The concrete edge used for geometry: `Auto`/`None` map to `Bottom`.
    pub const fn resolved(self) -> Self {
        match self {
            Self::Auto | Self::None => Self::Bottom,
            other => other,
        }
    }

    /// Leading or trailing.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Leading | Self::Trailing)
    }
}

impl fmt::Display for SlideOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.debug_name())
    }
}

/// Horizontal anchor for the compressed layout. `Auto`/`None` center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "snake_case"))]
pub enum HorizontalAnchor {
    #[default]
    Auto,
    None,
    Leading,
    Middle,
    Trailing,
}

/// Vertical anchor for the compressed layout. `Auto`/`None` center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "snake_case"))]
pub enum VerticalAnchor {
    #[default]
    Auto,
    None,
    Top,
    Middle,
    Bottom,
}

/// Free repositioning of the presented surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "snake_case"))]
pub enum PanMode {
    #[default]
    None,
    /// One finger drags the surface; dragging it past an edge dismisses.
    SingleFingerShiftToDismiss,
    /// Two fingers drag the surface.
    TwoFingerShift,
}

// ---------------------------------------------------------------------------
// Backdrop
// ---------------------------------------------------------------------------

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Backdrop appearance and behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct BackdropConfig {
    /// Backdrop color.
    pub color: Rgb,
    /// Opacity of the fully shown backdrop, in `[0.0, 1.0]`.
    pub opacity: f64,
    /// Tapping the backdrop dismisses the presented surface.
    pub dismiss_on_tap: bool,
}

impl BackdropConfig {
    /// Create a new backdrop config.
    pub fn new(color: Rgb, opacity: f64) -> Self {
        Self {
            color,
            opacity,
            ..Self::default()
        }
    }

    /// Set backdrop color.
    #[must_use]
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Set backdrop opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Enable or disable tap-to-dismiss.
    #[must_use]
    pub fn dismiss_on_tap(mut self, enabled: bool) -> Self {
        self.dismiss_on_tap = enabled;
        self
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            opacity: 0.4,
            dismiss_on_tap: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Pan routing
// ---------------------------------------------------------------------------

/// Which recognizers to install once a presentation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanRouting {
    /// Install the edge-drag dismiss interaction.
    pub dismiss_interaction: bool,
    /// Hand single-finger free drag to the dismiss interaction.
    pub hand_off_to_dismiss: bool,
    /// Install a standalone panning controller with this touch count.
    pub view_panning_touches: Option<u8>,
    /// Single-finger shift was requested but suppressed by edge-drag dismiss.
    pub single_finger_suppressed: bool,
}

// ---------------------------------------------------------------------------
// TransitionConfig
// ---------------------------------------------------------------------------

/// Tunables for one manager's transitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct TransitionConfig {
    /// Presentation and dismissal duration. Default: 300ms.
    #[cfg_attr(feature = "config-file", serde(with = "duration_ms"))]
    pub duration: Duration,
    /// Edge to slide in from. Default: `Auto` (bottom).
    pub slide_origin: SlideOrigin,
    /// Corner radius applied to the surface on present; 0 disables.
    pub corner_radius: f64,
    /// Size the surface to its content instead of filling the safe area.
    pub layout_compressed: bool,
    /// Gap between the surface and the safe area's left/right edges. Default: 40.
    pub horizontal_gap: f64,
    /// Gap between the surface and the safe area's top/bottom edges. Default: 40.
    pub vertical_gap: f64,
    pub anchor_horizontal: HorizontalAnchor,
    pub anchor_vertical: VerticalAnchor,
    /// Edge-drag dismiss. Default: true.
    pub interactive_dismiss_enabled: bool,
    /// Edge-drag present. Default: true.
    pub interactive_present_enabled: bool,
    pub pan_mode: PanMode,
    /// Let single-finger shift coexist with edge-drag dismiss by routing it
    /// through the dismiss interaction. Default: false.
    pub allow_single_finger_with_interactive_dismiss: bool,
    /// Install a backdrop behind the surface. Default: true.
    pub backdrop_enabled: bool,
    pub backdrop: BackdropConfig,
    /// Shrink the layout by the keyboard's height while it is shown.
    pub keyboard_avoidance: bool,
    /// Wrap the surface in a full-container view so panning moves the
    /// wrapper instead of relayouting the surface.
    pub use_wrapper_container: bool,
    /// Project release velocity this far ahead when deciding commit vs.
    /// cancel. `None` uses the position alone.
    #[cfg_attr(feature = "config-file", serde(with = "opt_duration_ms"))]
    pub velocity_projection: Option<Duration>,

    #[cfg_attr(feature = "config-file", serde(skip))]
    runtime_slide_origin: Option<SlideOrigin>,
    #[cfg_attr(feature = "config-file", serde(skip))]
    relative_position: Option<Point>,
    #[cfg_attr(feature = "config-file", serde(skip))]
    keyboard_frame: Option<Rect>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            slide_origin: SlideOrigin::Auto,
            corner_radius: 0.0,
            layout_compressed: false,
            horizontal_gap: 40.0,
            vertical_gap: 40.0,
            anchor_horizontal: HorizontalAnchor::Auto,
            anchor_vertical: VerticalAnchor::Auto,
            interactive_dismiss_enabled: true,
            interactive_present_enabled: true,
            pan_mode: PanMode::None,
            allow_single_finger_with_interactive_dismiss: false,
            backdrop_enabled: true,
            backdrop: BackdropConfig::default(),
            keyboard_avoidance: false,
            use_wrapper_container: false,
            velocity_projection: None,
            runtime_slide_origin: None,
            relative_position: None,
            keyboard_frame: None,
        }
    }
}

impl TransitionConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    // --- builders -----------------------------------------------------------

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn slide_origin(mut self, origin: SlideOrigin) -> Self {
        self.slide_origin = origin;
        self
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub fn layout_compressed(mut self, compressed: bool) -> Self {
        self.layout_compressed = compressed;
        self
    }

    /// Set both layout gaps.
    #[must_use]
    pub fn gaps(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_gap = horizontal;
        self.vertical_gap = vertical;
        self
    }

    #[must_use]
    pub fn anchors(mut self, horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        self.anchor_horizontal = horizontal;
        self.anchor_vertical = vertical;
        self
    }

    #[must_use]
    pub fn interactive_dismiss(mut self, enabled: bool) -> Self {
        self.interactive_dismiss_enabled = enabled;
        self
    }

    #[must_use]
    pub fn interactive_present(mut self, enabled: bool) -> Self {
        self.interactive_present_enabled = enabled;
        self
    }

    #[must_use]
    pub fn pan_mode(mut self, mode: PanMode) -> Self {
        self.pan_mode = mode;
        self
    }

    #[must_use]
    pub fn allow_single_finger_with_interactive_dismiss(mut self, allow: bool) -> Self {
        self.allow_single_finger_with_interactive_dismiss = allow;
        self
    }

    #[must_use]
    pub fn backdrop_enabled(mut self, enabled: bool) -> Self {
        self.backdrop_enabled = enabled;
        self
    }

    #[must_use]
    pub fn backdrop(mut self, backdrop: BackdropConfig) -> Self {
        self.backdrop = backdrop;
        self
    }

    #[must_use]
    pub fn keyboard_avoidance(mut self, enabled: bool) -> Self {
        self.keyboard_avoidance = enabled;
        self
    }

    #[must_use]
    pub fn use_wrapper_container(mut self, enabled: bool) -> Self {
        self.use_wrapper_container = enabled;
        self
    }

    #[must_use]
    pub fn velocity_projection(mut self, horizon: Option<Duration>) -> Self {
        self.velocity_projection = horizon;
        self
    }

    // --- runtime state ------------------------------------------------------

    /// The origin geometry uses right now.
    #[inline]
    pub fn effective_origin(&self) -> SlideOrigin {
        self.runtime_slide_origin.unwrap_or(self.slide_origin)
    }

    #[inline]
    pub fn runtime_slide_origin(&self) -> Option<SlideOrigin> {
        self.runtime_slide_origin
    }

    pub(crate) fn set_runtime_slide_origin(&mut self, origin: Option<SlideOrigin>) {
        self.runtime_slide_origin = origin;
    }

    /// Last dragged center position, normalized to the allowed center area.
    #[inline]
    pub fn relative_position(&self) -> Option<Point> {
        self.relative_position
    }

    pub(crate) fn set_relative_position(&mut self, position: Option<Point>) {
        self.relative_position = position.map(|p| Point::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0)));
    }

    /// Forget the dragged position; the next layout uses the anchors.
    pub fn reset_relative_position(&mut self) {
        self.relative_position = None;
    }

    #[inline]
    pub fn keyboard_frame(&self) -> Option<Rect> {
        self.keyboard_frame
    }

    pub(crate) fn set_keyboard_frame(&mut self, frame: Option<Rect>) {
        self.keyboard_frame = frame;
    }

    /// Resolve `pan_mode` against `interactive_dismiss_enabled`.
    ///
    /// Edge-drag dismiss wins over single-finger shift unless
    /// `allow_single_finger_with_interactive_dismiss` routes the shift
    /// through the dismiss interaction.
    pub fn resolved_pan_routing(&self) -> PanRouting {
        let mut routing = PanRouting {
            dismiss_interaction: self.interactive_dismiss_enabled,
            ..PanRouting::default()
        };
        match self.pan_mode {
            PanMode::None => {}
            PanMode::SingleFingerShiftToDismiss => {
                if !self.interactive_dismiss_enabled {
                    routing.view_panning_touches = Some(1);
                } else if self.allow_single_finger_with_interactive_dismiss {
                    routing.hand_off_to_dismiss = true;
                } else {
                    routing.single_finger_suppressed = true;
                }
            }
            PanMode::TwoFingerShift => routing.view_panning_touches = Some(2),
        }
        routing
    }

    // --- loading --------------------------------------------------------------

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.horizontal_gap.is_finite() || self.horizontal_gap < 0.0 {
            errors.push(format!(
                "horizontal_gap must be finite and >= 0, got {}",
                self.horizontal_gap
            ));
        }
        if !self.vertical_gap.is_finite() || self.vertical_gap < 0.0 {
            errors.push(format!(
                "vertical_gap must be finite and >= 0, got {}",
                self.vertical_gap
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            errors.push(format!(
                "corner_radius must be finite and >= 0, got {}",
                self.corner_radius
            ));
        }
        if !(0.0..=1.0).contains(&self.backdrop.opacity) {
            errors.push(format!(
                "backdrop.opacity must be in [0, 1], got {}",
                self.backdrop.opacity
            ));
        }
        if self.velocity_projection == Some(Duration::ZERO) {
            errors.push("velocity_projection must be > 0 when set".into());
        }

        errors
    }

    /// `self` if [`validate`](Self::validate) finds nothing, else the errors.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

#[cfg(feature = "config-file")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(feature = "config-file")]
mod opt_duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(d).map(|ms| ms.map(Duration::from_millis))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = TransitionConfig::default();
        assert_eq!(c.duration, Duration::from_millis(300));
        assert_eq!(c.slide_origin, SlideOrigin::Auto);
        assert_eq!(c.horizontal_gap, 40.0);
        assert_eq!(c.vertical_gap, 40.0);
        assert!(c.backdrop_enabled);
        assert_eq!(c.backdrop.color, Rgb::BLACK);
        assert_eq!(c.backdrop.opacity, 0.4);
        assert!(c.backdrop.dismiss_on_tap);
        assert!(c.interactive_dismiss_enabled);
        assert!(c.interactive_present_enabled);
        assert_eq!(c.pan_mode, PanMode::None);
        assert!(c.validate().is_empty());
    }

    #[test]
    fn effective_origin_prefers_runtime_override() {
        let mut c = TransitionConfig::new().slide_origin(SlideOrigin::Top);
        assert_eq!(c.effective_origin(), SlideOrigin::Top);
        c.set_runtime_slide_origin(Some(SlideOrigin::Leading));
        assert_eq!(c.effective_origin(), SlideOrigin::Leading);
        c.set_runtime_slide_origin(None);
        assert_eq!(c.effective_origin(), SlideOrigin::Top);
    }

    #[test]
    fn origin_resolution_and_names() {
        assert_eq!(SlideOrigin::Auto.resolved(), SlideOrigin::Bottom);
        assert_eq!(SlideOrigin::None.resolved(), SlideOrigin::Bottom);
        assert_eq!(SlideOrigin::Top.resolved(), SlideOrigin::Top);
        assert_eq!(SlideOrigin::Trailing.to_string(), ".trailing");
        assert!(SlideOrigin::Leading.is_horizontal());
        assert!(!SlideOrigin::Bottom.is_horizontal());
        assert_eq!(Operation::Dismiss.to_string(), "dismiss");
    }

    #[test]
    fn relative_position_is_clamped_and_resettable() {
        let mut c = TransitionConfig::default();
        c.set_relative_position(Some(Point::new(1.5, -0.2)));
        assert_eq!(c.relative_position(), Some(Point::new(1.0, 0.0)));
        c.reset_relative_position();
        assert_eq!(c.relative_position(), None);
    }

    // --- Pan routing ---

    #[test]
    fn single_finger_suppressed_by_interactive_dismiss() {
        let r = TransitionConfig::new()
            .pan_mode(PanMode::SingleFingerShiftToDismiss)
            .resolved_pan_routing();
        assert!(r.dismiss_interaction);
        assert!(r.single_finger_suppressed);
        assert!(!r.hand_off_to_dismiss);
        assert_eq!(r.view_panning_touches, None);
    }

    #[test]
    fn single_finger_override_hands_off() {
        let r = TransitionConfig::new()
            .pan_mode(PanMode::SingleFingerShiftToDismiss)
            .allow_single_finger_with_interactive_dismiss(true)
            .resolved_pan_routing();
        assert!(r.hand_off_to_dismiss);
        assert!(!r.single_finger_suppressed);
        assert_eq!(r.view_panning_touches, None);
    }

    #[test]
    fn single_finger_without_dismiss_installs_view_panning() {
        let r = TransitionConfig::new()
            .interactive_dismiss(false)
            .pan_mode(PanMode::SingleFingerShiftToDismiss)
            .resolved_pan_routing();
        assert!(!r.dismiss_interaction);
        assert_eq!(r.view_panning_touches, Some(1));
    }

    #[test]
    fn two_finger_always_installs_view_panning() {
        let r = TransitionConfig::new()
            .pan_mode(PanMode::TwoFingerShift)
            .resolved_pan_routing();
        assert!(r.dismiss_interaction);
        assert_eq!(r.view_panning_touches, Some(2));
    }

    // --- Validation ---

    #[test]
    fn validate_reports_each_problem() {
        let c = TransitionConfig::new()
            .gaps(-1.0, f64::NAN)
            .corner_radius(-2.0)
            .backdrop(BackdropConfig::default().opacity(1.5))
            .velocity_projection(Some(Duration::ZERO));
        let errors = c.validate();
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(matches!(c.validated(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validated_passes_good_config() {
        assert!(TransitionConfig::default().validated().is_ok());
    }

    #[test]
    fn shared_config_sees_writes() {
        let cfg = shared(TransitionConfig::default());
        let other = Rc::clone(&cfg);
        cfg.borrow_mut().set_keyboard_frame(Some(Rect::new(0.0, 500.0, 400.0, 300.0)));
        assert_eq!(
            other.borrow().keyboard_frame(),
            Some(Rect::new(0.0, 500.0, 400.0, 300.0))
        );
    }

    // --- File loading ---

    #[cfg(feature = "config-file")]
    #[test]
    fn toml_partial_uses_defaults() {
        let c = TransitionConfig::from_toml_str(
            r#"
            duration = 450
            slide_origin = "leading"
            pan_mode = "two_finger_shift"

            [backdrop]
            opacity = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(c.duration, Duration::from_millis(450));
        assert_eq!(c.slide_origin, SlideOrigin::Leading);
        assert_eq!(c.pan_mode, PanMode::TwoFingerShift);
        assert_eq!(c.backdrop.opacity, 0.25);
        assert!(c.backdrop.dismiss_on_tap);
        assert_eq!(c.horizontal_gap, 40.0);
        assert_eq!(c.runtime_slide_origin(), None);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn json_roundtrip_skips_runtime_state() {
        let mut c = TransitionConfig::new()
            .slide_origin(SlideOrigin::Top)
            .velocity_projection(Some(Duration::from_millis(120)));
        c.set_relative_position(Some(Point::new(0.5, 0.5)));
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("relative_position"));
        let back = TransitionConfig::from_json_str(&json).unwrap();
        assert_eq!(back.slide_origin, SlideOrigin::Top);
        assert_eq!(back.velocity_projection, Some(Duration::from_millis(120)));
        assert_eq!(back.relative_position(), None);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn toml_file_roundtrip() {
        use std::io::Write as _;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "corner_radius = 12.0\nlayout_compressed = true").unwrap();
        let c = TransitionConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(c.corner_radius, 12.0);
        assert!(c.layout_compressed);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn edge_missing_file_is_io_error() {
        let err = TransitionConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn edge_bad_toml_is_parse_error() {
        let err = TransitionConfig::from_toml_str("duration = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
