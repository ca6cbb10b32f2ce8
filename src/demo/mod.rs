//! Demo inputs - everything a graph library would normally supply.
//!
//! Graph loading, a force-directed layout and vertex metrics, just enough
//! to feed `plot_network` with realistic data.

pub mod graph;
pub mod layout;
pub mod metrics;

pub use graph::{sample_tree, Graph};
pub use layout::force_layout;
pub use metrics::{above_median, blocks_by_thirds, pagerank};
