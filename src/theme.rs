//! Colors, palettes and the color-scale selector.
//!
//! Everything here is immutable data: the named Tableau colors, the
//! qualitative tab10 palette used for categories and the sequential
//! plasma scale used for numeric values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Error;

/// Opaque 8-bit RGB color. Serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear blend towards `other`, `t` in [0, 1].
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Relative luminance (Rec. 709 weights), 0..1
    pub fn luminance(self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Named Tableau 10 colors
pub mod tableau {
    use super::Color;

    pub const BLUE: Color = Color::rgb(0x50, 0x7A, 0xA6);
    pub const ORANGE: Color = Color::rgb(0xF0, 0x8E, 0x39);
    pub const RED: Color = Color::rgb(0xDF, 0x58, 0x5C);
    pub const TEAL: Color = Color::rgb(0x78, 0xB7, 0xB2);
    pub const GREEN: Color = Color::rgb(0x5B, 0xA0, 0x53);
    pub const YELLOW: Color = Color::rgb(0xEC, 0xC8, 0x54);
    pub const PURPLE: Color = Color::rgb(0xAF, 0x7B, 0xA1);
    pub const PINK: Color = Color::rgb(0xFD, 0x9E, 0xA9);
    pub const BROWN: Color = Color::rgb(0x9A, 0x74, 0x60);
    pub const GRAY: Color = Color::rgb(0xBA, 0xB0, 0xAC);
}

/// Drawing defaults
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(255, 255, 255);
    pub const EDGE: Color = Color::rgb(0xBA, 0xB0, 0xAC); // tableau gray
    pub const VERTEX_BORDER: Color = Color::rgb(0x66, 0x66, 0x66);
    pub const VERTEX: Color = super::tableau::GREEN;
}

/// Qualitative 10-color palette for categorical labels (tab10).
pub const CATEGORY_PALETTE: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// Plasma sampled at t = 0.0, 0.1, ..., 1.0; intermediate values interpolate.
const PLASMA_STOPS: [Color; 11] = [
    Color::rgb(0x0d, 0x08, 0x87),
    Color::rgb(0x41, 0x04, 0x9d),
    Color::rgb(0x6a, 0x00, 0xa8),
    Color::rgb(0x8f, 0x0d, 0xa4),
    Color::rgb(0xb1, 0x2a, 0x90),
    Color::rgb(0xcc, 0x47, 0x78),
    Color::rgb(0xe1, 0x64, 0x62),
    Color::rgb(0xf2, 0x84, 0x4b),
    Color::rgb(0xfc, 0xa6, 0x36),
    Color::rgb(0xfc, 0xce, 0x25),
    Color::rgb(0xf0, 0xf9, 0x21),
];

/// Sequential plasma scale, `t` clamped to [0, 1].
pub fn plasma(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let last = PLASMA_STOPS.len() - 1;
    let pos = t * last as f64;
    let i = (pos.floor() as usize).min(last - 1);
    PLASMA_STOPS[i].lerp(PLASMA_STOPS[i + 1], pos - i as f64)
}

/// Palette entry for the category at `rank` (wraps after 10).
pub fn category_color(rank: usize) -> Color {
    CATEGORY_PALETTE[rank % CATEGORY_PALETTE.len()]
}

/// How vertex colors are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorScale {
    /// Every vertex gets the single default color
    #[default]
    Constant,
    /// Per-vertex scalar mapped through plasma
    Numeric,
    /// Per-vertex class label mapped through the qualitative palette
    Categorical,
}

impl ColorScale {
    pub const ALL: &'static [ColorScale] =
        &[ColorScale::Constant, ColorScale::Numeric, ColorScale::Categorical];

    pub fn label(self) -> &'static str {
        match self {
            ColorScale::Constant => "constant",
            ColorScale::Numeric => "numeric",
            ColorScale::Categorical => "categorical",
        }
    }

    pub fn needs_values(self) -> bool {
        !matches!(self, ColorScale::Constant)
    }
}

impl fmt::Display for ColorScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColorScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "constant" => Ok(ColorScale::Constant),
            "numeric" => Ok(ColorScale::Numeric),
            "cate" | "categorical" => Ok(ColorScale::Categorical),
            other => Err(Error::UnknownColorScale(other.to_string())),
        }
    }
}

impl TryFrom<String> for ColorScale {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorScale> for String {
    fn from(scale: ColorScale) -> Self {
        scale.label().to_string()
    }
}

/// Map scalars through plasma, normalized by their own min/max.
///
/// A zero range (or a single value) maps everything to the low end.
pub fn numeric_colors(values: &[f64]) -> Vec<Color> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        });
    let span = max - min;
    values
        .iter()
        .map(|&v| {
            if span > 0.0 && span.is_finite() {
                plasma((v - min) / span)
            } else {
                plasma(0.0)
            }
        })
        .collect()
}

/// Rank of each value among the sorted distinct values of `labels`.
pub fn category_ranks(labels: &[f64]) -> Vec<usize> {
    let mut distinct: Vec<f64> = labels.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup_by(|a, b| a.total_cmp(b).is_eq());
    labels
        .iter()
        .map(|v| {
            distinct
                .binary_search_by(|probe| probe.total_cmp(v))
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(feature = "gui")]
impl From<Color> for egui::Color32 {
    fn from(c: Color) -> Self {
        egui::Color32::from_rgb(c.r, c.g, c.b)
    }
}

/// Color with an opacity in [0, 1] for egui painters.
#[cfg(feature = "gui")]
pub fn with_alpha(c: Color, alpha: f64) -> egui::Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

/// Plain light egui Visuals: white canvas, no shadows.
#[cfg(feature = "gui")]
pub fn figure_visuals() -> egui::Visuals {
    let bg: egui::Color32 = colors::BACKGROUND.into();

    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.extreme_bg_color = bg;

    // No shadows - flat design
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
