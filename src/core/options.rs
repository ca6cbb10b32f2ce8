//! Plot configuration.
//!
//! `PlotOptions` deserializes from partial JSON: every missing field falls
//! back to its default.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::edges::EdgeStyle;
use super::error::Error;
use super::figure::FigureSize;
use crate::theme::{colors, Color, ColorScale};

/// Vertex marker shape. Parses from matplotlib-style codes (`o`, `s`, `^`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Marker {
    #[default]
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    Diamond,
    Plus,
    Cross,
}

impl Marker {
    pub const ALL: &'static [Marker] = &[
        Marker::Circle,
        Marker::Square,
        Marker::TriangleUp,
        Marker::TriangleDown,
        Marker::Diamond,
        Marker::Plus,
        Marker::Cross,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Marker::Circle => "o",
            Marker::Square => "s",
            Marker::TriangleUp => "^",
            Marker::TriangleDown => "v",
            Marker::Diamond => "D",
            Marker::Plus => "+",
            Marker::Cross => "x",
        }
    }

    /// Line-only markers have no fill area.
    pub fn is_filled(self) -> bool {
        !matches!(self, Marker::Plus | Marker::Cross)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Marker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "o" | "circle" => Ok(Marker::Circle),
            "s" | "square" => Ok(Marker::Square),
            "^" | "triangle" | "triangle_up" => Ok(Marker::TriangleUp),
            "v" | "triangle_down" => Ok(Marker::TriangleDown),
            "D" | "d" | "diamond" => Ok(Marker::Diamond),
            "+" | "plus" => Ok(Marker::Plus),
            "x" | "cross" => Ok(Marker::Cross),
            other => Err(Error::UnknownMarker(other.to_string())),
        }
    }
}

impl TryFrom<String> for Marker {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Marker> for String {
    fn from(marker: Marker) -> Self {
        marker.code().to_string()
    }
}

/// Styling and output options for `plot_network`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub marker: Marker,
    /// Vertex color in constant mode
    pub vertex_color: Color,
    pub color_scale: ColorScale,
    /// Marker area in points squared
    pub vertex_size: f64,
    /// Marker border width in points
    pub vertex_linewidth: f64,
    pub vertex_edge_color: Color,
    pub edge_linewidth: f64,
    pub edge_color: Color,
    pub edge_alpha: f64,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    /// Output file name; nothing is saved when unset
    pub out_file_name: Option<String>,
    pub out_dir: PathBuf,
    pub figure: FigureSize,
    /// Open a window with the result (needs the `gui` feature)
    pub show: bool,
    pub title: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            marker: Marker::Circle,
            vertex_color: colors::VERTEX,
            color_scale: ColorScale::Constant,
            vertex_size: 80.0,
            vertex_linewidth: 1.5,
            vertex_edge_color: colors::VERTEX_BORDER,
            edge_linewidth: 1.0,
            edge_color: colors::EDGE,
            edge_alpha: 0.5,
            xlim: None,
            ylim: None,
            out_file_name: None,
            out_dir: PathBuf::from("./images/"),
            figure: FigureSize::default(),
            show: true,
            title: "nw-draw".to_string(),
        }
    }
}

impl PlotOptions {
    pub fn edge_style(&self) -> EdgeStyle {
        EdgeStyle {
            color: self.edge_color,
            width: self.edge_linewidth,
            alpha: self.edge_alpha,
        }
    }

    /// Full output path, if a file name is configured.
    pub fn out_path(&self) -> Option<PathBuf> {
        self.out_file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| self.out_dir.join(name))
    }

    /// Merge a JSON object of overrides on top of these options.
    pub fn merged_with_json(&self, overrides: &str) -> Result<Self, serde_json::Error> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(overrides)?;
        if let (Some(base_map), serde_json::Value::Object(patch_map)) =
            (base.as_object_mut(), patch)
        {
            for (key, value) in patch_map {
                base_map.insert(key, value);
            }
        }
        serde_json::from_value(base)
    }
}
