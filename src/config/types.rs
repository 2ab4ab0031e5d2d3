//! Configuration type definitions.

use super::enums::{ColorSpec, RegionPolicy};
use crate::draw::Color;
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool and style the overlay starts with. Users can change
/// these values at runtime using keybindings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool active when the overlay opens
    #[serde(default = "default_tool")]
    pub default_tool: Tool,

    /// Default color for every tool - either a named color (red, green, blue, yellow,
    /// orange, pink, white, black) or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default line width in pixels (valid range: 1.0 - 40.0)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Default font size for text in points (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            default_color: default_color(),
            default_thickness: default_thickness(),
            default_font_size: default_font_size(),
        }
    }
}

/// Style override for a single tool. Unset fields fall back to `[drawing]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ToolStyleConfig {
    #[serde(default)]
    pub color: Option<ColorSpec>,

    /// Line width in pixels (valid range: 1.0 - 40.0)
    #[serde(default)]
    pub thickness: Option<f64>,
}

/// Per-tool style overrides.
///
/// ```toml
/// [tools.highlighter]
/// color = [255, 255, 0, 102]
/// thickness = 16.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    #[serde(default)]
    pub pen: ToolStyleConfig,
    #[serde(default = "default_highlighter_style")]
    pub highlighter: ToolStyleConfig,
    #[serde(default)]
    pub arrow: ToolStyleConfig,
    #[serde(default)]
    pub line: ToolStyleConfig,
    #[serde(default)]
    pub rectangle: ToolStyleConfig,
    #[serde(default)]
    pub circle: ToolStyleConfig,
    #[serde(default)]
    pub text: ToolStyleConfig,
    #[serde(default)]
    pub counter: ToolStyleConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            pen: ToolStyleConfig::default(),
            highlighter: default_highlighter_style(),
            arrow: ToolStyleConfig::default(),
            line: ToolStyleConfig::default(),
            rectangle: ToolStyleConfig::default(),
            circle: ToolStyleConfig::default(),
            text: ToolStyleConfig::default(),
            counter: ToolStyleConfig::default(),
        }
    }
}

impl ToolsConfig {
    /// Override for `tool`; the selection tool has none.
    pub fn get(&self, tool: Tool) -> Option<&ToolStyleConfig> {
        match tool {
            Tool::Pen => Some(&self.pen),
            Tool::Highlighter => Some(&self.highlighter),
            Tool::Arrow => Some(&self.arrow),
            Tool::Line => Some(&self.line),
            Tool::Rectangle => Some(&self.rectangle),
            Tool::Circle => Some(&self.circle),
            Tool::Text => Some(&self.text),
            Tool::Counter => Some(&self.counter),
            Tool::Select => None,
        }
    }

    pub(super) fn iter_mut(&mut self) -> impl Iterator<Item = (&'static str, &mut ToolStyleConfig)> {
        [
            ("pen", &mut self.pen),
            ("highlighter", &mut self.highlighter),
            ("arrow", &mut self.arrow),
            ("line", &mut self.line),
            ("rectangle", &mut self.rectangle),
            ("circle", &mut self.circle),
            ("text", &mut self.text),
            ("counter", &mut self.counter),
        ]
        .into_iter()
    }
}

/// Fade mode settings.
///
/// In fade mode annotations stay opaque for half the duration, then fade out
/// and disappear. Freehand strokes leave a short trail instead.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FadeConfig {
    /// Start with fade mode enabled
    #[serde(default)]
    pub enabled: bool,

    /// Seconds until an annotation disappears (valid range: 0.25 - 30.0)
    #[serde(default = "default_fade_duration")]
    pub duration_seconds: f64,

    /// Redraw interval while something is fading, in milliseconds (valid range: 4 - 100)
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            duration_seconds: default_fade_duration(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

/// Selection and hit-testing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    /// Extra slack in pixels around strokes and outlines (valid range: 0.0 - 20.0)
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,

    /// Whether a drag rectangle selects objects it touches or only those it encloses
    #[serde(default)]
    pub region_policy: RegionPolicy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: default_hit_tolerance(),
            region_policy: RegionPolicy::default(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_tool() -> Tool {
    Tool::Pen
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_thickness() -> f64 {
    3.0
}

fn default_font_size() -> f64 {
    32.0
}

fn default_highlighter_style() -> ToolStyleConfig {
    let Color { r, g, b, a } = crate::draw::color::HIGHLIGHTER_YELLOW;
    let byte = |v: f64| (v * 255.0).round() as u8;
    ToolStyleConfig {
        color: Some(ColorSpec::Rgba([byte(r), byte(g), byte(b), byte(a)])),
        thickness: Some(16.0),
    }
}

fn default_fade_duration() -> f64 {
    crate::fade::DEFAULT_FADE_DURATION
}

fn default_frame_interval() -> u64 {
    16
}

fn default_hit_tolerance() -> f64 {
    crate::selection::DEFAULT_HIT_TOLERANCE
}
