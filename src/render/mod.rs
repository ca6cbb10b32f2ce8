//! File output for network figures.
//!
//! Draws a `Figure` with plotters; the extension of the output path picks
//! the backend.

mod renderer;

pub use renderer::{save_figure, OutputFormat};
