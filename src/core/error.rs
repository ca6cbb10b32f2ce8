//! Error type shared by every rendering operation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building, displaying or saving a network figure.
///
/// Every error aborts the call that raised it; nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// A per-vertex array does not match the number of positions
    #[error("{what} has {actual} entries but there are {expected} vertices")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An edge endpoint is not a valid vertex index
    #[error("edge {edge} references vertex {vertex}, but only {vertex_count} vertices exist")]
    EdgeOutOfRange {
        edge: usize,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("color scale '{0}' needs one color value per vertex")]
    MissingColorValues(crate::theme::ColorScale),

    #[error("unknown color scale: {0}")]
    UnknownColorScale(String),

    #[error("unknown marker: {0}")]
    UnknownMarker(String),

    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    #[error("unsupported output format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Drawing backend failure
    #[error("render error: {0}")]
    Render(String),

    /// Window/event-loop failure
    #[error("display error: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check a per-vertex array length against the vertex count.
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            what,
            expected,
            actual,
        })
    }
}
