//! Configuration file support for overscribe.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/overscribe/config.toml`. Settings include drawing defaults,
//! per-tool styles, fade timing, selection tolerance and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, RegionPolicy};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{DrawingConfig, FadeConfig, SelectionConfig, ToolStyleConfig, ToolsConfig};

use crate::draw::Color;
use crate::input::Tool;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const THICKNESS_RANGE: (f64, f64) = (1.0, 40.0);
const FONT_SIZE_RANGE: (f64, f64) = (8.0, 72.0);

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "arrow"
/// default_color = "red"
/// default_thickness = 3.0
///
/// [tools.highlighter]
/// thickness = 20.0
///
/// [fade]
/// enabled = true
/// duration_seconds = 1.25
///
/// [selection]
/// hit_tolerance = 3.0
/// region_policy = "contains"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Starting tool and default style
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Per-tool color and width overrides
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Fade mode timing
    #[serde(default)]
    pub fade: FadeConfig,

    /// Hit-testing and rubber-band selection
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Out-of-range values are clamped to the nearest valid value and a
    /// warning is logged. Non-finite values fall back to the default.
    ///
    /// Validated ranges:
    /// - `default_thickness` and per-tool `thickness`: 1.0 - 40.0
    /// - `default_font_size`: 8.0 - 72.0
    /// - `fade.duration_seconds`: 0.25 - 30.0
    /// - `fade.frame_interval_ms`: 4 - 100
    /// - `selection.hit_tolerance`: 0.0 - 20.0
    pub fn validate_and_clamp(&mut self) {
        let defaults = Config::default();

        self.drawing.default_thickness = clamp_setting(
            "default_thickness",
            self.drawing.default_thickness,
            THICKNESS_RANGE,
            defaults.drawing.default_thickness,
        );

        let fallback = self.drawing.default_thickness;
        for (name, style) in self.tools.iter_mut() {
            if let Some(thickness) = style.thickness {
                style.thickness = Some(clamp_setting(
                    &format!("tools.{name}.thickness"),
                    thickness,
                    THICKNESS_RANGE,
                    fallback,
                ));
            }
        }

        self.drawing.default_font_size = clamp_setting(
            "default_font_size",
            self.drawing.default_font_size,
            FONT_SIZE_RANGE,
            defaults.drawing.default_font_size,
        );

        self.fade.duration_seconds = clamp_setting(
            "fade duration_seconds",
            self.fade.duration_seconds,
            (0.25, 30.0),
            defaults.fade.duration_seconds,
        );

        if !(4..=100).contains(&self.fade.frame_interval_ms) {
            log::warn!(
                "Invalid fade frame_interval_ms {}, clamping to 4-100 range",
                self.fade.frame_interval_ms
            );
            self.fade.frame_interval_ms = self.fade.frame_interval_ms.clamp(4, 100);
        }

        self.selection.hit_tolerance = clamp_setting(
            "hit_tolerance",
            self.selection.hit_tolerance,
            (0.0, 20.0),
            defaults.selection.hit_tolerance,
        );
    }

    /// Resolved color and width for `tool`, falling back to `[drawing]`.
    pub fn tool_style(&self, tool: Tool) -> (Color, f64) {
        let override_style = self.tools.get(tool);
        let color = override_style
            .and_then(|style| style.color.as_ref())
            .unwrap_or(&self.drawing.default_color)
            .to_color();
        let thickness = override_style
            .and_then(|style| style.thickness)
            .unwrap_or(self.drawing.default_thickness);
        (color, thickness)
    }

    /// Redraw interval the host should use while anything fades.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.fade.frame_interval_ms)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/overscribe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("overscribe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Clamps a float setting into `min..=max`; NaN and infinities become `fallback`.
fn clamp_setting(name: &str, value: f64, (min, max): (f64, f64), fallback: f64) -> f64 {
    if !value.is_finite() {
        log::warn!("Invalid {name} {value}, using {fallback:.2}");
        return fallback;
    }
    if !(min..=max).contains(&value) {
        log::warn!("Invalid {name} {value:.2}, clamping to {min:.2}-{max:.2} range");
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};
    use std::io::Write;

    fn parse(toml_str: &str) -> Config {
        let mut config: Config = toml::from_str(toml_str).unwrap();
        config.validate_and_clamp();
        config
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("");
        assert_eq!(config.drawing.default_tool, Tool::Pen);
        assert_eq!(config.drawing.default_thickness, 3.0);
        assert!(!config.fade.enabled);
        assert_eq!(config.fade.duration_seconds, 1.25);
        assert_eq!(config.selection.hit_tolerance, 3.0);
        assert_eq!(config.selection.region_policy, RegionPolicy::Intersects);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse(
            r#"
            [drawing]
            default_thickness = 90.0
            default_font_size = 2.0

            [tools.pen]
            thickness = 0.1

            [fade]
            duration_seconds = 100.0
            frame_interval_ms = 1

            [selection]
            hit_tolerance = -4.0
            "#,
        );
        assert_eq!(config.drawing.default_thickness, 40.0);
        assert_eq!(config.drawing.default_font_size, 8.0);
        assert_eq!(config.tools.pen.thickness, Some(1.0));
        assert_eq!(config.fade.duration_seconds, 30.0);
        assert_eq!(config.fade.frame_interval_ms, 4);
        assert_eq!(config.selection.hit_tolerance, 0.0);
    }

    #[test]
    fn non_finite_values_fall_back_to_defaults() {
        let config = parse(
            r#"
            [drawing]
            default_thickness = nan
            default_font_size = inf

            [tools.pen]
            thickness = -inf

            [fade]
            duration_seconds = nan

            [selection]
            hit_tolerance = nan
            "#,
        );
        assert_eq!(config.drawing.default_thickness, 3.0);
        assert_eq!(config.drawing.default_font_size, 32.0);
        assert_eq!(config.tools.pen.thickness, Some(3.0));
        assert_eq!(config.fade.duration_seconds, 1.25);
        assert_eq!(config.selection.hit_tolerance, 3.0);
    }

    #[test]
    fn tool_style_falls_back_to_drawing_defaults() {
        let config = parse(
            r#"
            [drawing]
            default_color = "blue"
            default_thickness = 5.0

            [tools.arrow]
            color = [255, 0, 0]
            "#,
        );
        assert_eq!(config.tool_style(Tool::Arrow), (RED, 5.0));
        assert_eq!(config.tool_style(Tool::Line), (BLUE, 5.0));
        let (highlight, width) = config.tool_style(Tool::Highlighter);
        assert!(highlight.a < 1.0);
        assert_eq!(width, 16.0);
    }

    #[test]
    fn region_policy_parses_kebab_case() {
        let config = parse("[selection]\nregion_policy = \"contains\"\n");
        assert_eq!(config.selection.region_policy, RegionPolicy::Contains);
    }

    #[test]
    fn load_from_reads_file_and_reports_syntax_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let missing = Config::load_from(&path).unwrap();
        assert_eq!(missing.drawing.default_thickness, 3.0);

        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[fade]\nenabled = true").unwrap();
        assert!(Config::load_from(&path).unwrap().fade.enabled);

        fs::write(&path, "[fade\nenabled = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_lists_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["drawing", "tools", "fade", "selection", "keybindings"] {
            assert!(properties.contains_key(section), "{section}");
        }
    }
}
