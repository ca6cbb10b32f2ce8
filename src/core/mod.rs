//! Platform-agnostic core - canvas model, edge projection and options.
//!
//! Nothing in here touches a window or a file.

pub mod edges;
pub mod error;
pub mod figure;
pub mod options;

pub use edges::{draw_edges, project_edges, EdgeProjection, EdgeStyle};
pub use error::{Error, Result};
pub use figure::{
    Bounds, Figure, FigureSize, Layer, LineCollection, MarkerCollection, Segment, EDGE_Z_ORDER,
    VERTEX_Z_ORDER,
};
pub use options::{Marker, PlotOptions};
