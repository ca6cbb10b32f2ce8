//! Graph sources for the demo: a JSON file or a generated sample tree.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Edge list plus optional precomputed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub vertex_count: usize,
    pub edges: Vec<[usize; 2]>,
    pub positions: Option<Vec<[f64; 2]>>,
}

/// On-disk format: `{"edges": [[0, 1], ...], "positions": [[x, y], ...]}`
#[derive(Debug, Deserialize)]
struct GraphFile {
    edges: Vec<[usize; 2]>,
    #[serde(default)]
    positions: Option<Vec<[f64; 2]>>,
    /// Lets isolated trailing vertices exist without positions
    #[serde(default)]
    vertices: Option<usize>,
}

impl Graph {
    pub fn from_json(text: &str) -> Result<Self> {
        let file: GraphFile = serde_json::from_str(text).context("invalid graph JSON")?;
        let from_edges = file
            .edges
            .iter()
            .flat_map(|e| e.iter().copied())
            .max()
            .map_or(0, |max| max + 1);
        let from_positions = file.positions.as_ref().map_or(0, Vec::len);
        let vertex_count = file.vertices.unwrap_or(0).max(from_edges).max(from_positions);

        if let Some(positions) = &file.positions {
            if positions.len() != vertex_count {
                bail!(
                    "graph has {} vertices but {} positions",
                    vertex_count,
                    positions.len()
                );
            }
        }

        Ok(Self {
            vertex_count,
            edges: file.edges,
            positions: file.positions,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read graph file {}", path.display()))?;
        let graph = Self::from_json(&text)
            .with_context(|| format!("failed to parse graph file {}", path.display()))?;
        debug!(
            path = %path.display(),
            vertices = graph.vertex_count,
            edges = graph.edges.len(),
            has_layout = graph.positions.is_some(),
            "Graph loaded"
        );
        Ok(graph)
    }
}

/// Random tree with `n` vertices (deterministic).
pub fn sample_tree(n: usize) -> Graph {
    let edges = (1..n)
        .map(|i| {
            let target = (rand_simple(i) * i as f64) as usize;
            [i, target]
        })
        .collect();
    Graph {
        vertex_count: n,
        edges,
        positions: None,
    }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
    let x = ((seed + 1) * 9301 + 49297) % 233280;
    (x as f64) / 233280.0
}
