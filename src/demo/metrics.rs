//! Vertex metrics used to color the demo plots.

/// PageRank on the undirected graph (power iteration).
///
/// Dangling vertices spread their rank uniformly. Returns an empty vector
/// for an empty graph.
pub fn pagerank(vertex_count: usize, edges: &[[usize; 2]], damping: f64) -> Vec<f64> {
    const MAX_ITER: usize = 100;
    const TOLERANCE: f64 = 1.0e-10;

    if vertex_count == 0 {
        return Vec::new();
    }
    let n = vertex_count as f64;

    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for &[s, t] in edges {
        if s < vertex_count && t < vertex_count {
            neighbors[s].push(t);
            neighbors[t].push(s);
        }
    }

    let mut rank = vec![1.0 / n; vertex_count];
    for _ in 0..MAX_ITER {
        let dangling: f64 = (0..vertex_count)
            .filter(|&v| neighbors[v].is_empty())
            .map(|v| rank[v])
            .sum();
        let base = (1.0 - damping) / n + damping * dangling / n;

        let mut next = vec![base; vertex_count];
        for (v, adj) in neighbors.iter().enumerate() {
            let share = damping * rank[v] / adj.len().max(1) as f64;
            for &u in adj {
                next[u] += share;
            }
        }

        let delta: f64 = next.iter().zip(&rank).map(|(a, b)| (a - b).abs()).sum();
        rank = next;
        if delta < TOLERANCE * n {
            break;
        }
    }
    rank
}

/// Three contiguous blocks in vertex order: the first `n / 3` vertices get
/// 0, the last `n / 3` get 2 and the middle remainder gets 1.
///
/// With fewer than three vertices both outer blocks are empty, so every
/// vertex lands in block 1.
pub fn blocks_by_thirds(vertex_count: usize) -> Vec<f64> {
    let third = vertex_count / 3;
    (0..vertex_count)
        .map(|i| {
            if i < third {
                0.0
            } else if i >= vertex_count - third {
                2.0
            } else {
                1.0
            }
        })
        .collect()
}

/// Include vertices whose value is strictly above the median.
pub fn above_median(values: &[f64]) -> Vec<bool> {
    let median = median(values);
    values.iter().map(|&v| v > median).collect()
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
