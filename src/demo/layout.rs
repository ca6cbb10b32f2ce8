//! Force-directed layout via the `force_graph` engine.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use tracing::debug;

/// Simulation time step per iteration
const STEP_DT: f32 = 0.035;
const INITIAL_RADIUS: f64 = 100.0;

/// Run `steps` simulation ticks and return one position per vertex.
///
/// Vertices start evenly spaced on a circle, so the result is deterministic.
pub fn force_layout(vertex_count: usize, edges: &[[usize; 2]], steps: usize) -> Vec<[f64; 2]> {
    let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
        force_charge: 150.0,
        force_spring: 0.05,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    });

    let indices: Vec<DefaultNodeIdx> = (0..vertex_count)
        .map(|i| {
            let angle = i as f64 * 2.0 * PI / vertex_count as f64;
            graph.add_node(NodeData {
                x: (INITIAL_RADIUS * angle.cos()) as f32,
                y: (INITIAL_RADIUS * angle.sin()) as f32,
                mass: 10.0,
                is_anchor: false,
                user_data: i,
            })
        })
        .collect();

    for &[source, target] in edges {
        if let (Some(&src), Some(&tgt)) = (indices.get(source), indices.get(target)) {
            graph.add_edge(src, tgt, EdgeData::default());
        }
    }

    for _ in 0..steps {
        graph.update(STEP_DT);
    }

    let mut positions = vec![[0.0; 2]; vertex_count];
    graph.visit_nodes(|node| {
        positions[node.data.user_data] = [node.x() as f64, node.y() as f64];
    });
    debug!(vertices = vertex_count, edges = edges.len(), steps, "Layout finished");
    positions
}
