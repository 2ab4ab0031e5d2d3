//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a rubber-band rectangle decides which objects it selects.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RegionPolicy {
    /// Any overlap between the object bounds and the rectangle selects it
    #[default]
    Intersects,
    /// The object bounds must lie entirely inside the rectangle
    Contains,
}

/// Color specification - either a named color or RGB(A) values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
///
/// # With alpha
/// color = [255, 255, 0, 102]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
    /// RGBA color as [red, green, blue, alpha] where each component is 0-255
    Rgba([u8; 4]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Named colors are mapped to predefined RGBA values using `util::name_to_color()`.
    /// Unknown color names default to red with a warning. Byte arrays are converted from
    /// 0-255 range to 0.0-1.0 range; RGB arrays are fully opaque.
    pub fn to_color(&self) -> Color {
        let channel = |v: u8| v as f64 / 255.0;
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::new(channel(*r), channel(*g), channel(*b), 1.0),
            ColorSpec::Rgba([r, g, b, a]) => {
                Color::new(channel(*r), channel(*g), channel(*b), channel(*a))
            }
        }
    }
}
