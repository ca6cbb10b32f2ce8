//! Backend-agnostic canvas model.
//!
//! A `Figure` is an ordered stack of layers plus axis limits. Renderers draw
//! layers in ascending z-order, so edges (z=1) end up beneath vertices (z=2).

use serde::{Deserialize, Serialize};

use super::options::Marker;
use crate::theme::Color;

pub const EDGE_Z_ORDER: i32 = 1;
pub const VERTEX_Z_ORDER: i32 = 2;

/// Fraction of the data range added on each side by automatic limits.
const AUTO_MARGIN: f64 = 0.05;

/// Canvas size in inches plus resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width_in: 4.0,
            height_in: 4.0,
            dpi: 100.0,
        }
    }
}

impl FigureSize {
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round().max(1.0) as u32,
            (self.height_in * self.dpi).round().max(1.0) as u32,
        )
    }

    /// Typographic points to pixels at this resolution.
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: [f64; 2],
    pub to: [f64; 2],
}

/// Batch of line segments sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCollection {
    pub segments: Vec<Segment>,
    pub color: Color,
    /// Width in points
    pub width: f64,
    pub alpha: f64,
    pub z_order: i32,
}

/// Batch of markers; `colors` is parallel to `points`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCollection {
    pub points: Vec<[f64; 2]>,
    pub colors: Vec<Color>,
    pub marker: Marker,
    /// Marker area in points squared
    pub size: f64,
    /// Border width in points
    pub border_width: f64,
    pub border_color: Color,
    pub z_order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Lines(LineCollection),
    Markers(MarkerCollection),
}

impl Layer {
    pub fn z_order(&self) -> i32 {
        match self {
            Layer::Lines(lines) => lines.z_order,
            Layer::Markers(markers) => markers.z_order,
        }
    }

    fn extend_bounds(&self, bounds: &mut Option<Bounds>) {
        let mut add = |p: [f64; 2]| {
            if !(p[0].is_finite() && p[1].is_finite()) {
                return;
            }
            *bounds = Some(match *bounds {
                Some(mut b) => {
                    b.include(p);
                    b
                }
                None => Bounds::at(p),
            });
        };
        match self {
            Layer::Lines(lines) => {
                for s in &lines.segments {
                    add(s.from);
                    add(s.to);
                }
            }
            Layer::Markers(markers) => markers.points.iter().copied().for_each(&mut add),
        }
    }
}

/// Axis-aligned data bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Bounds {
    fn at(p: [f64; 2]) -> Self {
        Self {
            x: (p[0], p[0]),
            y: (p[1], p[1]),
        }
    }

    fn include(&mut self, p: [f64; 2]) {
        self.x = (self.x.0.min(p[0]), self.x.1.max(p[0]));
        self.y = (self.y.0.min(p[1]), self.y.1.max(p[1]));
    }
}

/// The drawing surface edges and vertices are composited onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub size: FigureSize,
    pub layers: Vec<Layer>,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
    /// Ticks and frame; network diagrams hide them
    pub axes_visible: bool,
}

impl Figure {
    pub fn new(size: FigureSize) -> Self {
        Self {
            size,
            layers: Vec::new(),
            x_limits: None,
            y_limits: None,
            axes_visible: true,
        }
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Layers in drawing order (stable for equal z).
    pub fn layers_by_z(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.iter().collect();
        layers.sort_by_key(|l| l.z_order());
        layers
    }

    pub fn line_collections(&self) -> impl Iterator<Item = &LineCollection> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Lines(lines) => Some(lines),
            Layer::Markers(_) => None,
        })
    }

    pub fn marker_collections(&self) -> impl Iterator<Item = &MarkerCollection> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Markers(markers) => Some(markers),
            Layer::Lines(_) => None,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.line_collections().map(|l| l.segments.len()).sum()
    }

    pub fn marker_count(&self) -> usize {
        self.marker_collections().map(|m| m.points.len()).sum()
    }

    /// Set explicit limits; `None` keeps automatic scaling on that axis.
    pub fn set_limits(&mut self, x: Option<(f64, f64)>, y: Option<(f64, f64)>) {
        self.x_limits = x;
        self.y_limits = y;
    }

    pub fn hide_axes(&mut self) {
        self.axes_visible = false;
    }

    /// Bounds of everything drawn, ignoring non-finite coordinates.
    pub fn data_bounds(&self) -> Option<Bounds> {
        let mut bounds = None;
        for layer in &self.layers {
            layer.extend_bounds(&mut bounds);
        }
        bounds
    }

    /// Effective axis limits: explicit where set, otherwise data bounds with a margin.
    pub fn limits(&self) -> Bounds {
        let data = self.data_bounds();
        Bounds {
            x: self.x_limits.unwrap_or_else(|| auto_range(data.map(|b| b.x))),
            y: self.y_limits.unwrap_or_else(|| auto_range(data.map(|b| b.y))),
        }
    }
}

fn auto_range(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((lo, hi)) if hi - lo <= 0.0 => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let pad = (hi - lo) * AUTO_MARGIN;
            (lo - pad, hi + pad)
        }
    }
}
