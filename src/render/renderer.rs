//! plotters renderer for `Figure`.
//!
//! Edges are drawn in data space through a chart context. Markers are drawn
//! in pixel space so their size follows the figure dpi, not the axis range.

use std::path::Path;

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::trace;

use crate::core::{Error, Figure, Layer, LineCollection, Marker, MarkerCollection, Result};
use crate::theme::{self, colors};

/// Padding around the axes in points (tight layout with hidden axes)
const LAYOUT_PAD_PT: f64 = 10.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bitmap,
    Svg,
}

impl OutputFormat {
    /// Pick a backend from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png" | "jpg" | "jpeg" | "bmp") => Ok(OutputFormat::Bitmap),
            Some("svg") => Ok(OutputFormat::Svg),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Write `figure` to `path`, overwriting any existing file.
pub fn save_figure(figure: &Figure, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    let size = figure.size.pixels();
    trace!(path = %path.display(), ?format, width = size.0, height = size.1, "Rendering figure");

    match format {
        OutputFormat::Bitmap => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_figure(figure, &root)
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(figure, &root)
        }
    }
}

fn render_err(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

fn rgb(c: theme::Color) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn draw_figure<DB: DrawingBackend>(figure: &Figure, root: &DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&rgb(colors::BACKGROUND)).map_err(render_err)?;

    let limits = figure.limits();
    let margin = figure.size.points_to_pixels(LAYOUT_PAD_PT).round() as u32;
    let mut chart = ChartBuilder::on(root)
        .margin(margin)
        .build_cartesian_2d(limits.x.0..limits.x.1, limits.y.0..limits.y.1)
        .map_err(render_err)?;

    if figure.axes_visible {
        chart
            .plotting_area()
            .draw(&Rectangle::new(
                [(limits.x.0, limits.y.0), (limits.x.1, limits.y.1)],
                BLACK.stroke_width(1),
            ))
            .map_err(render_err)?;
    }

    for layer in figure.layers_by_z() {
        match layer {
            Layer::Lines(lines) => {
                let width = px(figure, lines.width).max(1.0) as u32;
                draw_lines(&mut chart, lines, width)?;
            }
            Layer::Markers(markers) => {
                let in_view = |p: &[f64; 2]| {
                    within(p[0], limits.x) && within(p[1], limits.y)
                };
                let radius = px(figure, markers.size.max(0.0).sqrt() / 2.0);
                let border = px(figure, markers.border_width);
                for (point, &color) in markers.points.iter().zip(&markers.colors) {
                    if !in_view(point) {
                        continue;
                    }
                    let center = chart.backend_coord(&(point[0], point[1]));
                    draw_marker(root, markers, center, radius, border, color)?;
                }
            }
        }
    }

    root.present().map_err(render_err)
}

fn px(figure: &Figure, points: f64) -> f64 {
    figure.size.points_to_pixels(points)
}

fn within(v: f64, (a, b): (f64, f64)) -> bool {
    v.is_finite() && v >= a.min(b) && v <= a.max(b)
}

fn draw_lines<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    lines: &LineCollection,
    width: u32,
) -> Result<()> {
    let style = ShapeStyle {
        color: rgb(lines.color).mix(lines.alpha),
        filled: false,
        stroke_width: width,
    };
    chart
        .draw_series(lines.segments.iter().map(|s| {
            PathElement::new(vec![(s.from[0], s.from[1]), (s.to[0], s.to[1])], style)
        }))
        .map_err(render_err)?;
    Ok(())
}

/// Polygon corners for area markers, in pixel space (y grows downwards).
fn outline(marker: Marker, (cx, cy): (i32, i32), r: i32) -> Vec<(i32, i32)> {
    match marker {
        Marker::Square => vec![
            (cx - r, cy - r),
            (cx + r, cy - r),
            (cx + r, cy + r),
            (cx - r, cy + r),
        ],
        Marker::TriangleUp => vec![(cx, cy - r), (cx + r, cy + r), (cx - r, cy + r)],
        Marker::TriangleDown => vec![(cx - r, cy - r), (cx + r, cy - r), (cx, cy + r)],
        Marker::Diamond => vec![(cx, cy - r), (cx + r, cy), (cx, cy + r), (cx - r, cy)],
        Marker::Plus => vec![(cx - r, cy), (cx + r, cy), (cx, cy - r), (cx, cy + r)],
        Marker::Cross => vec![
            (cx - r, cy - r),
            (cx + r, cy + r),
            (cx + r, cy - r),
            (cx - r, cy + r),
        ],
        Marker::Circle => Vec::new(),
    }
}

fn draw_marker<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    markers: &MarkerCollection,
    center: (i32, i32),
    radius: f64,
    border: f64,
    color: theme::Color,
) -> Result<()> {
    let r = radius.round().max(1.0) as i32;
    let fill = rgb(color).filled();
    let border_style = rgb(markers.border_color).stroke_width(border.round() as u32);
    let has_border = border.round() >= 1.0;

    match markers.marker {
        Marker::Circle => {
            root.draw(&Circle::new(center, r, fill)).map_err(render_err)?;
            if has_border {
                root.draw(&Circle::new(center, r, border_style)).map_err(render_err)?;
            }
        }
        Marker::Plus | Marker::Cross => {
            // line markers take the vertex color as their stroke
            let stroke = rgb(color).stroke_width(border.round().max(1.0) as u32);
            for pair in outline(markers.marker, center, r).chunks(2) {
                root.draw(&PathElement::new(pair.to_vec(), stroke)).map_err(render_err)?;
            }
        }
        marker => {
            let corners = outline(marker, center, r);
            root.draw(&Polygon::new(corners.clone(), fill)).map_err(render_err)?;
            if has_border {
                let mut closed = corners;
                closed.push(closed[0]);
                root.draw(&PathElement::new(closed, border_style)).map_err(render_err)?;
            }
        }
    }
    Ok(())
}
