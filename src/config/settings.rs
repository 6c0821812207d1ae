//! Persisted preference and window-state types for Folio
//!
//! These are the typed values stored under the keys in [`super::keys`].
//! Each one tolerates partial or stale JSON through `#[serde(default)]`
//! and is clamped into range by `sanitize` after loading.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// Display label for the settings panel.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    /// All selectable themes, in display order.
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::System]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preferences
// ─────────────────────────────────────────────────────────────────────────────

/// Global user preferences shared by every window.
///
/// Changing these through the settings panel triggers a settings reload on
/// all live windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Zoom change per zoom-in/zoom-out step, in percent
    pub zoom_step: u32,

    /// Open files into the current window when it is untitled and unmodified
    pub reuse_untitled_window: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            zoom_step: 10,
            reuse_untitled_window: true,
        }
    }
}

impl Preferences {
    /// Minimum allowed zoom step.
    pub const MIN_ZOOM_STEP: u32 = 5;
    /// Maximum allowed zoom step.
    pub const MAX_ZOOM_STEP: u32 = 100;

    /// Clamp values that may have been hand-edited into nonsense.
    pub fn sanitize(&mut self) {
        self.zoom_step = self
            .zoom_step
            .clamp(Self::MIN_ZOOM_STEP, Self::MAX_ZOOM_STEP);
    }

    /// Deserialize from a JSON value and sanitize.
    pub fn from_value_sanitized(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut prefs: Self = serde_json::from_value(value)?;
        prefs.sanitize();
        Ok(prefs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    /// Window width in logical pixels
    pub width: f32,
    /// Window height in logical pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 1000.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

impl WindowGeometry {
    /// Minimum window dimension.
    pub const MIN_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_SIZE: f32 = 10000.0;

    /// Clamp the dimensions to a usable range.
    pub fn sanitize(&mut self) {
        self.width = self.width.clamp(Self::MIN_SIZE, Self::MAX_SIZE);
        self.height = self.height.clamp(Self::MIN_SIZE, Self::MAX_SIZE);
    }

    /// Geometry shifted by `offset` on both axes, if the result fits inside
    /// `monitor` (when known). Returns `None` if there is no position to shift
    /// from or the shifted window would spill off the monitor.
    pub fn offset_within(&self, offset: f32, monitor: Option<[f32; 2]>) -> Option<Self> {
        let (x, y) = (self.x? + offset, self.y? + offset);
        if let Some([mw, mh]) = monitor {
            if x + self.width > mw || y + self.height > mh {
                return None;
            }
        }
        Some(Self {
            x: Some(x),
            y: Some(y),
            ..*self
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Toolbar and status bar layout of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowLayout {
    /// Whether the main toolbar is shown
    pub show_toolbar: bool,
    /// Whether the status bar is shown
    pub show_status_bar: bool,
}

impl Default for WindowLayout {
    fn default() -> Self {
        Self {
            show_toolbar: true,
            show_status_bar: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.zoom_step, 10);
        assert!(prefs.reuse_untitled_window);
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<Theme>("\"system\"").unwrap(),
            Theme::System
        );
    }

    #[test]
    fn test_preferences_partial_json_uses_defaults() {
        let prefs =
            Preferences::from_value_sanitized(serde_json::json!({ "theme": "dark" })).unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.zoom_step, 10);
        assert!(prefs.reuse_untitled_window);
    }

    #[test]
    fn test_preferences_sanitize_zoom_step() {
        let low = Preferences::from_value_sanitized(serde_json::json!({ "zoom_step": 1 })).unwrap();
        assert_eq!(low.zoom_step, Preferences::MIN_ZOOM_STEP);

        let high =
            Preferences::from_value_sanitized(serde_json::json!({ "zoom_step": 500 })).unwrap();
        assert_eq!(high.zoom_step, Preferences::MAX_ZOOM_STEP);
    }

    #[test]
    fn test_preferences_wrong_type_is_error() {
        let result = Preferences::from_value_sanitized(serde_json::json!({ "zoom_step": "big" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_geometry_sanitize() {
        let mut geometry = WindowGeometry {
            width: 10.0,
            height: 50000.0,
            ..WindowGeometry::default()
        };
        geometry.sanitize();
        assert_eq!(geometry.width, WindowGeometry::MIN_SIZE);
        assert_eq!(geometry.height, WindowGeometry::MAX_SIZE);
    }

    #[test]
    fn test_geometry_roundtrip_without_position() {
        let geometry = WindowGeometry::default();
        let json = serde_json::to_value(geometry).unwrap();
        assert!(json.get("x").is_none());
        let back: WindowGeometry = serde_json::from_value(json).unwrap();
        assert_eq!(back, geometry);
    }

    #[test]
    fn test_offset_within_monitor() {
        let geometry = WindowGeometry {
            width: 400.0,
            height: 300.0,
            x: Some(10.0),
            y: Some(20.0),
            maximized: false,
        };
        let moved = geometry.offset_within(80.0, Some([1920.0, 1080.0])).unwrap();
        assert_eq!(moved.x, Some(90.0));
        assert_eq!(moved.y, Some(100.0));
        assert_eq!(moved.width, 400.0);

        assert!(geometry.offset_within(80.0, Some([450.0, 1080.0])).is_none());
        assert!(geometry.offset_within(80.0, None).is_some());
    }

    #[test]
    fn test_offset_requires_position() {
        assert!(WindowGeometry::default().offset_within(80.0, None).is_none());
    }

    #[test]
    fn test_layout_defaults() {
        let layout: WindowLayout = serde_json::from_str("{}").unwrap();
        assert_eq!(layout, WindowLayout::default());
        assert!(layout.show_toolbar);
        assert!(layout.show_status_bar);
    }
}
