//! nw-draw - node-link network diagrams
//!
//! Draws vertices as markers and edges as line segments from plain arrays:
//! - positions: one `[x, y]` per vertex
//! - edges: `[source, target]` vertex index pairs
//!
//! Vertices can be colored by a constant, a numeric attribute (plasma scale)
//! or a categorical label (10-color qualitative palette), and restricted by a
//! per-vertex filter. The result is a [`Figure`] that can be shown in a
//! window (`gui` feature) and saved as PNG/JPEG/BMP or SVG.
//!
//! ```no_run
//! use nw_draw::{plot_network, PlotOptions, PlotRequest};
//!
//! let positions = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
//! let edges = [[0, 1], [1, 2]];
//! let options = PlotOptions {
//!     out_file_name: Some("triangle.png".into()),
//!     ..PlotOptions::default()
//! };
//! let figure = plot_network(&PlotRequest::new(&positions, &edges), &options)?;
//! assert_eq!(figure.segment_count(), 2);
//! # Ok::<(), nw_draw::Error>(())
//! ```

pub mod core;
pub mod plot;
pub mod render;
pub mod theme;

#[cfg(feature = "gui")]
pub mod app;

pub use crate::core::{
    draw_edges, project_edges, EdgeProjection, EdgeStyle, Error, Figure, FigureSize, Layer,
    Marker, PlotOptions, Result,
};
pub use plot::{plot_network, vertex_colors, PlotRequest};
pub use render::{save_figure, OutputFormat};
pub use theme::{Color, ColorScale};

#[cfg(feature = "gui")]
pub use app::show_figure;
