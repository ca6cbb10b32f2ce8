//! Edge renderer: projects an edge list onto vertex positions.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::{check_len, Error, Result};
use super::figure::{Figure, Layer, LineCollection, Segment, EDGE_Z_ORDER};
use crate::theme::{colors, Color};

/// Line style shared by every edge segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: Color,
    /// Width in points
    pub width: f64,
    pub alpha: f64,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: colors::EDGE,
            width: 1.0,
            alpha: 0.5,
        }
    }
}

/// Segments to draw plus the vertex filter that applies afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeProjection {
    pub segments: Vec<Segment>,
    /// `None` when no filter was supplied
    pub vertex_filter: Option<Vec<bool>>,
}

/// Turn edges into segments.
///
/// With a filter, an edge survives only if both endpoints are included. The
/// returned filter is a fresh copy: every vertex, whether or not an edge
/// touches it, keeps the inclusion flag it came in with.
///
/// # Errors
///
/// `EdgeOutOfRange` for any endpoint past the position array (checked for
/// every edge, filtered or not) and `ShapeMismatch` for a filter of the
/// wrong length.
pub fn project_edges(
    positions: &[[f64; 2]],
    edges: &[[usize; 2]],
    vertex_filter: Option<&[bool]>,
) -> Result<EdgeProjection> {
    let vertex_count = positions.len();
    if let Some(filter) = vertex_filter {
        check_len("vertex filter", vertex_count, filter.len())?;
    }

    let mut segments = Vec::with_capacity(edges.len());
    for (edge, &[source, target]) in edges.iter().enumerate() {
        for vertex in [source, target] {
            if vertex >= vertex_count {
                return Err(Error::EdgeOutOfRange {
                    edge,
                    vertex,
                    vertex_count,
                });
            }
        }

        let visible = vertex_filter.map_or(true, |f| f[source] && f[target]);
        if visible {
            segments.push(Segment {
                from: positions[source],
                to: positions[target],
            });
        }
    }

    trace!(
        edges = edges.len(),
        segments = segments.len(),
        filtered = vertex_filter.is_some(),
        "Projected edges"
    );

    Ok(EdgeProjection {
        segments,
        vertex_filter: vertex_filter.map(<[bool]>::to_vec),
    })
}

/// Draw edges onto `figure` beneath vertex markers and return the effective
/// vertex filter for the vertex pass.
pub fn draw_edges(
    figure: &mut Figure,
    positions: &[[f64; 2]],
    edges: &[[usize; 2]],
    style: &EdgeStyle,
    vertex_filter: Option<&[bool]>,
) -> Result<Option<Vec<bool>>> {
    let EdgeProjection {
        segments,
        vertex_filter,
    } = project_edges(positions, edges, vertex_filter)?;

    figure.add_layer(Layer::Lines(LineCollection {
        segments,
        color: style.color,
        width: style.width,
        alpha: style.alpha,
        z_order: EDGE_Z_ORDER,
    }));

    Ok(vertex_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::figure::{FigureSize, VERTEX_Z_ORDER};
    use proptest::prelude::*;

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [5.0, 5.0]]
    }

    const CYCLE: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];

    #[test]
    fn test_no_filter_draws_every_edge() {
        let proj = project_edges(&square(), &CYCLE, None).unwrap();
        assert_eq!(proj.segments.len(), 4);
        assert_eq!(
            proj.segments[1],
            Segment {
                from: [1.0, 0.0],
                to: [1.0, 1.0],
            }
        );
        assert!(proj.vertex_filter.is_none());
    }

    #[test]
    fn test_filter_requires_both_endpoints() {
        let filter = [true, true, false, true, true];
        let proj = project_edges(&square(), &CYCLE, Some(&filter)).unwrap();
        // [1,2] and [2,3] touch the excluded vertex 2
        assert_eq!(proj.segments.len(), 2);
        assert_eq!(proj.segments[0].from, [0.0, 0.0]);
        assert_eq!(proj.segments[1].from, [0.0, 1.0]);
    }

    #[test]
    fn test_returned_filter_keeps_input_values() {
        // vertex 4 is touched by no edge, vertex 2 is touched but excluded
        let filter = [true, false, false, true, false];
        let proj = project_edges(&square(), &CYCLE, Some(&filter)).unwrap();
        assert_eq!(proj.vertex_filter.as_deref(), Some(&filter[..]));
    }

    #[test]
    fn test_all_true_matches_unfiltered() {
        let all = [true; 5];
        let filtered = project_edges(&square(), &CYCLE, Some(&all)).unwrap();
        let unfiltered = project_edges(&square(), &CYCLE, None).unwrap();
        assert_eq!(filtered.segments, unfiltered.segments);
    }

    #[test]
    fn test_all_false_draws_nothing() {
        let none = [false; 5];
        let proj = project_edges(&square(), &CYCLE, Some(&none)).unwrap();
        assert!(proj.segments.is_empty());
    }

    #[test]
    fn test_out_of_range_edge() {
        let err = project_edges(&square(), &[[0, 1], [2, 9]], None).unwrap_err();
        assert!(matches!(
            err,
            Error::EdgeOutOfRange { edge: 1, vertex: 9, vertex_count: 5 }
        ));
    }

    #[test]
    fn test_out_of_range_checked_even_when_filtered() {
        let filter = [false; 5];
        let res = project_edges(&square(), &[[7, 0]], Some(&filter));
        assert!(matches!(res, Err(Error::EdgeOutOfRange { vertex: 7, .. })));
    }

    #[test]
    fn test_filter_length_mismatch() {
        let res = project_edges(&square(), &CYCLE, Some(&[true, true]));
        assert!(matches!(
            res,
            Err(Error::ShapeMismatch { expected: 5, actual: 2, .. })
        ));
    }

    #[test]
    fn test_draw_edges_adds_low_z_layer() {
        let mut fig = Figure::new(FigureSize::default());
        let style = EdgeStyle::default();
        let mask = draw_edges(&mut fig, &square(), &CYCLE, &style, None).unwrap();
        assert!(mask.is_none());
        assert_eq!(fig.segment_count(), 4);
        let lines = fig.line_collections().next().unwrap();
        assert_eq!(lines.z_order, EDGE_Z_ORDER);
        assert!(lines.z_order < VERTEX_Z_ORDER);
        assert_eq!(lines.alpha, 0.5);
        assert_eq!(lines.color, colors::EDGE);
    }

    fn graph() -> impl Strategy<Value = (usize, Vec<[usize; 2]>)> {
        (1usize..40).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(prop::array::uniform2(0..n), 0..80),
            )
        })
    }

    proptest! {
        #[test]
        fn segments_equal_edges_without_filter((n, edges) in graph()) {
            let positions: Vec<[f64; 2]> = (0..n).map(|i| [i as f64, 0.0]).collect();
            let proj = project_edges(&positions, &edges, None).unwrap();
            prop_assert_eq!(proj.segments.len(), edges.len());
        }

        #[test]
        fn segment_drawn_iff_both_endpoints_included(
            (n, edges) in graph(),
            seed in any::<u64>(),
        ) {
            let positions: Vec<[f64; 2]> = (0..n).map(|i| [i as f64, i as f64]).collect();
            let filter: Vec<bool> = (0..n).map(|i| (seed >> (i % 64)) & 1 == 1).collect();
            let proj = project_edges(&positions, &edges, Some(&filter)).unwrap();
            let expected: Vec<Segment> = edges
                .iter()
                .filter(|[s, t]| filter[*s] && filter[*t])
                .map(|&[s, t]| Segment {
                    from: positions[s],
                    to: positions[t],
                })
                .collect();
            prop_assert_eq!(proj.segments, expected);
            prop_assert_eq!(proj.vertex_filter, Some(filter));
        }
    }
}
