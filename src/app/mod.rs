//! Native window showing a network figure.
//!
//! The figure is drawn with egui_plot: one `Line` per edge segment and one
//! `Points` series per vertex color. Axes, grid and interaction are off so
//! the window shows the same diagram the file renderer writes.

use eframe::egui;
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, PlotUi, Points};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::core::{Error, Figure, Layer, LineCollection, Marker, MarkerCollection, Result};
use crate::theme::{self, figure_visuals};

/// Open a window with `figure` and block until it is closed.
pub fn show_figure(figure: &Figure, title: &str) -> Result<()> {
    let (width, height) = figure.size.pixels();
    info!(title, width, height, "Opening figure window");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([width as f32, height as f32]),
        ..Default::default()
    };
    let viewer = FigureViewer::new(figure.clone());

    eframe::run_native(
        title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(figure_visuals());
            Ok(Box::new(viewer))
        }),
    )
    .map_err(|e| Error::Display(e.to_string()))
}

/// egui app holding one finished figure.
pub struct FigureViewer {
    figure: Figure,
    /// Vertex groups, computed once: egui repaints every frame
    groups: Vec<Vec<MarkerGroup>>,
}

/// Vertices of one layer sharing a color.
#[derive(Debug, Clone, PartialEq)]
struct MarkerGroup {
    color: theme::Color,
    points: Vec<[f64; 2]>,
}

impl FigureViewer {
    pub fn new(figure: Figure) -> Self {
        let groups = figure
            .layers_by_z()
            .into_iter()
            .filter_map(|layer| match layer {
                Layer::Markers(markers) => Some(group_by_color(markers)),
                Layer::Lines(_) => None,
            })
            .collect();
        Self { figure, groups }
    }

    fn render_figure(&self, ui: &mut egui::Ui) {
        let limits = self.figure.limits();
        let axes = self.figure.axes_visible;

        Plot::new("network")
            .show_axes([axes, axes])
            .show_grid(false)
            .show_background(false)
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .set_margin_fraction(egui::Vec2::ZERO)
            .include_x(limits.x.0)
            .include_x(limits.x.1)
            .include_y(limits.y.0)
            .include_y(limits.y.1)
            .show(ui, |plot_ui| {
                let mut markers = self.groups.iter();
                for layer in self.figure.layers_by_z() {
                    match layer {
                        Layer::Lines(lines) => self.plot_lines(plot_ui, lines),
                        Layer::Markers(collection) => {
                            if let Some(groups) = markers.next() {
                                self.plot_markers(plot_ui, collection, groups);
                            }
                        }
                    }
                }
            });
    }

    fn plot_lines(&self, plot_ui: &mut PlotUi, lines: &LineCollection) {
        let color = theme::with_alpha(lines.color, lines.alpha);
        let width = self.figure.size.points_to_pixels(lines.width) as f32;
        for s in &lines.segments {
            let points = PlotPoints::from(vec![s.from, s.to]);
            plot_ui.line(Line::new(points).color(color).width(width));
        }
    }

    fn plot_markers(
        &self,
        plot_ui: &mut PlotUi,
        markers: &MarkerCollection,
        groups: &[MarkerGroup],
    ) {
        let size = &self.figure.size;
        let radius = size.points_to_pixels(markers.size.max(0.0).sqrt() / 2.0) as f32;
        let shape = marker_shape(markers.marker);

        for group in groups {
            plot_ui.points(
                Points::new(PlotPoints::from(group.points.clone()))
                    .shape(shape)
                    .radius(radius)
                    .filled(markers.marker.is_filled())
                    .color(group.color),
            );
        }

        // Outline pass on top of the fills
        if markers.marker.is_filled() && markers.border_width > 0.0 {
            let all: Vec<[f64; 2]> = groups.iter().flat_map(|g| g.points.iter().copied()).collect();
            plot_ui.points(
                Points::new(PlotPoints::from(all))
                    .shape(shape)
                    .radius(radius)
                    .filled(false)
                    .color(markers.border_color),
            );
        }
    }
}

impl eframe::App for FigureViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::colors::BACKGROUND.into()))
            .show(ctx, |ui| self.render_figure(ui));
    }
}

fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Circle => MarkerShape::Circle,
        Marker::Square => MarkerShape::Square,
        Marker::TriangleUp => MarkerShape::Up,
        Marker::TriangleDown => MarkerShape::Down,
        Marker::Diamond => MarkerShape::Diamond,
        Marker::Plus => MarkerShape::Plus,
        Marker::Cross => MarkerShape::Cross,
    }
}

/// Split markers into per-color groups, keeping first-seen color order.
fn group_by_color(markers: &MarkerCollection) -> Vec<MarkerGroup> {
    let mut index: HashMap<theme::Color, usize> = HashMap::new();
    let mut groups: Vec<MarkerGroup> = Vec::new();
    for (&point, &color) in markers.points.iter().zip(&markers.colors) {
        let slot = *index.entry(color).or_insert_with(|| {
            groups.push(MarkerGroup {
                color,
                points: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].points.push(point);
    }
    debug!(markers = markers.points.len(), groups = groups.len(), "Grouped markers by color");
    groups
}
