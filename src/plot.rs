//! Figure renderer: the `plot_network` entry point.
//!
//! Builds a figure from positions and edges, draws edges first, then the
//! vertices that survive the filter, then displays and optionally saves it.

use std::fs;

use tracing::{debug, info};

use crate::core::error::check_len;
use crate::core::{
    draw_edges, Error, Figure, Layer, MarkerCollection, PlotOptions, Result, VERTEX_Z_ORDER,
};
use crate::render::save_figure;
use crate::theme::{category_color, category_ranks, numeric_colors, Color, ColorScale};

/// Graph data for one plot. All per-vertex slices are parallel to `positions`.
#[derive(Debug, Clone, Copy)]
pub struct PlotRequest<'a> {
    pub positions: &'a [[f64; 2]],
    pub edges: &'a [[usize; 2]],
    /// Scalar or class label per vertex, used by numeric/categorical scales
    pub color_values: Option<&'a [f64]>,
    pub vertex_filter: Option<&'a [bool]>,
}

impl<'a> PlotRequest<'a> {
    pub fn new(positions: &'a [[f64; 2]], edges: &'a [[usize; 2]]) -> Self {
        Self {
            positions,
            edges,
            color_values: None,
            vertex_filter: None,
        }
    }

    pub fn with_color_values(mut self, values: &'a [f64]) -> Self {
        self.color_values = Some(values);
        self
    }

    pub fn with_vertex_filter(mut self, filter: &'a [bool]) -> Self {
        self.vertex_filter = Some(filter);
        self
    }

    fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        if let Some(values) = self.color_values {
            check_len("color values", n, values.len())?;
        }
        if let Some(filter) = self.vertex_filter {
            check_len("vertex filter", n, filter.len())?;
        }
        Ok(())
    }
}

/// Render a node-link diagram.
///
/// Returns the finished figure after it has been displayed (when
/// `options.show`) and written to `options.out_path()` (when set).
pub fn plot_network(request: &PlotRequest<'_>, options: &PlotOptions) -> Result<Figure> {
    request.validate()?;
    let n = request.positions.len();

    let mut figure = Figure::new(options.figure);

    let all_included;
    let filter: &[bool] = match request.vertex_filter {
        Some(filter) => filter,
        None => {
            all_included = vec![true; n];
            &all_included
        }
    };

    let mask = draw_edges(
        &mut figure,
        request.positions,
        request.edges,
        &options.edge_style(),
        Some(filter),
    )?
    .unwrap_or_else(|| filter.to_vec());

    let points: Vec<[f64; 2]> = request
        .positions
        .iter()
        .zip(&mask)
        .filter(|(_, &keep)| keep)
        .map(|(&p, _)| p)
        .collect();
    let colors = vertex_colors(
        options.color_scale,
        options.vertex_color,
        request.color_values,
        &mask,
    )?;

    debug!(
        vertices = n,
        plotted = points.len(),
        edges = request.edges.len(),
        segments = figure.segment_count(),
        scale = %options.color_scale,
        "Network figure built"
    );

    figure.add_layer(Layer::Markers(MarkerCollection {
        points,
        colors,
        marker: options.marker,
        size: options.vertex_size,
        border_width: options.vertex_linewidth,
        border_color: options.vertex_edge_color,
        z_order: VERTEX_Z_ORDER,
    }));
    figure.set_limits(options.xlim, options.ylim);
    figure.hide_axes();

    if options.show {
        present(&figure, &options.title)?;
    }

    if let Some(path) = options.out_path() {
        if !options.out_dir.as_os_str().is_empty() {
            fs::create_dir_all(&options.out_dir)?;
        }
        save_figure(&figure, &path)?;
        info!(path = %path.display(), "Figure saved");
    }

    Ok(figure)
}

/// One color per included vertex, in vertex order.
///
/// Categorical ranks come from the full label array so a label keeps its
/// color whatever the filter hides.
pub fn vertex_colors(
    scale: ColorScale,
    uniform: Color,
    values: Option<&[f64]>,
    mask: &[bool],
) -> Result<Vec<Color>> {
    let values: &[f64] = if scale.needs_values() {
        let values = values.ok_or(Error::MissingColorValues(scale))?;
        check_len("color values", mask.len(), values.len())?;
        values
    } else {
        &[]
    };

    let colors = match scale {
        ColorScale::Constant => {
            let included = mask.iter().filter(|&&keep| keep).count();
            vec![uniform; included]
        }
        ColorScale::Numeric => {
            let subset: Vec<f64> = values
                .iter()
                .zip(mask)
                .filter(|(_, &keep)| keep)
                .map(|(&v, _)| v)
                .collect();
            numeric_colors(&subset)
        }
        ColorScale::Categorical => category_ranks(values)
            .into_iter()
            .zip(mask)
            .filter(|(_, &keep)| keep)
            .map(|(rank, _)| category_color(rank))
            .collect(),
    };
    Ok(colors)
}

#[cfg(feature = "gui")]
fn present(figure: &Figure, title: &str) -> Result<()> {
    crate::app::show_figure(figure, title)
}

#[cfg(not(feature = "gui"))]
fn present(_figure: &Figure, title: &str) -> Result<()> {
    tracing::warn!(title, "Built without the gui feature, skipping display");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Marker, EDGE_Z_ORDER};
    use crate::theme::{colors, plasma, CATEGORY_PALETTE};

    const TRIANGLE: [[f64; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    const PATH: [[usize; 2]; 2] = [[0, 1], [1, 2]];

    fn quiet() -> PlotOptions {
        PlotOptions {
            show: false,
            ..PlotOptions::default()
        }
    }

    fn markers(fig: &Figure) -> &MarkerCollection {
        fig.marker_collections().next().unwrap()
    }

    #[test]
    fn test_end_to_end_triangle() {
        let fig = plot_network(&PlotRequest::new(&TRIANGLE, &PATH), &quiet()).unwrap();
        assert_eq!(fig.segment_count(), 2);
        assert_eq!(fig.marker_count(), 3);
        assert_eq!(markers(&fig).points, TRIANGLE.to_vec());
        assert!(!fig.axes_visible);
        let order: Vec<i32> = fig.layers_by_z().iter().map(|l| l.z_order()).collect();
        assert_eq!(order, vec![EDGE_Z_ORDER, VERTEX_Z_ORDER]);
    }

    #[test]
    fn test_all_true_filter_same_as_none() {
        let all = [true; 3];
        let plain = plot_network(&PlotRequest::new(&TRIANGLE, &PATH), &quiet()).unwrap();
        let filtered = plot_network(
            &PlotRequest::new(&TRIANGLE, &PATH).with_vertex_filter(&all),
            &quiet(),
        )
        .unwrap();
        assert_eq!(plain, filtered);
    }

    #[test]
    fn test_all_false_filter_plots_nothing() {
        let none = [false; 3];
        let fig = plot_network(
            &PlotRequest::new(&TRIANGLE, &PATH).with_vertex_filter(&none),
            &quiet(),
        )
        .unwrap();
        assert_eq!(fig.segment_count(), 0);
        assert_eq!(fig.marker_count(), 0);
    }

    #[test]
    fn test_filter_keeps_isolated_included_vertex() {
        let positions = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [4.0, 4.0]];
        let filter = [true, true, false, true];
        let fig = plot_network(
            &PlotRequest::new(&positions, &PATH).with_vertex_filter(&filter),
            &quiet(),
        )
        .unwrap();
        assert_eq!(fig.segment_count(), 1);
        assert_eq!(markers(&fig).points, vec![[0.0, 0.0], [1.0, 0.0], [4.0, 4.0]]);
    }

    #[test]
    fn test_constant_mode_ignores_values() {
        let values = [0.1, 0.9, 0.5];
        let opts = PlotOptions {
            vertex_color: colors::VERTEX_BORDER,
            ..quiet()
        };
        let fig = plot_network(
            &PlotRequest::new(&TRIANGLE, &PATH).with_color_values(&values),
            &opts,
        )
        .unwrap();
        assert_eq!(markers(&fig).colors, vec![colors::VERTEX_BORDER; 3]);
    }

    #[test]
    fn test_numeric_mode_filtered_in_order() {
        let positions = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]];
        let values = [5.0, 100.0, 1.0, 3.0];
        let filter = [true, false, true, true];
        let opts = PlotOptions {
            color_scale: ColorScale::Numeric,
            ..quiet()
        };
        let fig = plot_network(
            &PlotRequest::new(&positions, &[])
                .with_color_values(&values)
                .with_vertex_filter(&filter),
            &opts,
        )
        .unwrap();
        let m = markers(&fig);
        assert_eq!(m.points, vec![[0.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
        // the excluded outlier does not stretch the scale
        assert_eq!(m.colors[0], plasma(1.0));
        assert_eq!(m.colors[1], plasma(0.0));
        assert_eq!(m.colors[2], plasma(0.5));
    }

    #[test]
    fn test_categorical_mode_distinct_and_stable() {
        let positions: Vec<[f64; 2]> = (0..10).map(|i| [i as f64, 0.0]).collect();
        let labels: Vec<f64> = (0..10).rev().map(|i| (i * 3) as f64).collect();
        let opts = PlotOptions {
            color_scale: ColorScale::Categorical,
            ..quiet()
        };
        let request = PlotRequest::new(&positions, &[]).with_color_values(&labels);
        let first = plot_network(&request, &opts).unwrap();
        let second = plot_network(&request, &opts).unwrap();
        let colors = &markers(&first).colors;
        assert_eq!(colors, &markers(&second).colors);
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
        // smallest label takes the first palette entry
        assert_eq!(colors[9], CATEGORY_PALETTE[0]);
    }

    #[test]
    fn test_categorical_color_survives_filtering() {
        let positions = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
        let labels = [0.0, 1.0, 2.0];
        let filter = [false, true, true];
        let opts = PlotOptions {
            color_scale: ColorScale::Categorical,
            ..quiet()
        };
        let fig = plot_network(
            &PlotRequest::new(&positions, &[])
                .with_color_values(&labels)
                .with_vertex_filter(&filter),
            &opts,
        )
        .unwrap();
        assert_eq!(markers(&fig).colors, vec![CATEGORY_PALETTE[1], CATEGORY_PALETTE[2]]);
    }

    #[test]
    fn test_missing_values_for_numeric() {
        let opts = PlotOptions {
            color_scale: ColorScale::Numeric,
            ..quiet()
        };
        let res = plot_network(&PlotRequest::new(&TRIANGLE, &PATH), &opts);
        assert!(matches!(res, Err(Error::MissingColorValues(ColorScale::Numeric))));
    }

    #[test]
    fn test_vertex_colors_checks_values_only_when_needed() {
        let mask = [true, false, true];
        let uniform = vertex_colors(ColorScale::Constant, colors::VERTEX, Some(&[1.0][..]), &mask);
        assert_eq!(uniform.unwrap(), vec![colors::VERTEX; 2]);

        let res = vertex_colors(ColorScale::Categorical, colors::VERTEX, None, &mask);
        assert!(matches!(res, Err(Error::MissingColorValues(ColorScale::Categorical))));

        let res = vertex_colors(ColorScale::Numeric, colors::VERTEX, Some(&[1.0][..]), &mask);
        assert!(matches!(res, Err(Error::ShapeMismatch { expected: 3, actual: 1, .. })));
    }

    #[test]
    fn test_shape_errors() {
        let res = plot_network(
            &PlotRequest::new(&TRIANGLE, &PATH).with_color_values(&[1.0]),
            &quiet(),
        );
        assert!(matches!(res, Err(Error::ShapeMismatch { what: "color values", .. })));

        let res = plot_network(
            &PlotRequest::new(&TRIANGLE, &PATH).with_vertex_filter(&[true; 4]),
            &quiet(),
        );
        assert!(matches!(res, Err(Error::ShapeMismatch { what: "vertex filter", .. })));

        let res = plot_network(&PlotRequest::new(&TRIANGLE, &[[0, 3]]), &quiet());
        assert!(matches!(res, Err(Error::EdgeOutOfRange { .. })));
    }

    #[test]
    fn test_style_and_limits_carried() {
        let opts = PlotOptions {
            marker: Marker::Diamond,
            vertex_size: 20.0,
            xlim: Some((-2.0, 2.0)),
            ..quiet()
        };
        let fig = plot_network(&PlotRequest::new(&TRIANGLE, &PATH), &opts).unwrap();
        let m = markers(&fig);
        assert_eq!(m.marker, Marker::Diamond);
        assert_eq!(m.size, 20.0);
        assert_eq!(m.border_color, colors::VERTEX_BORDER);
        assert_eq!(fig.limits().x, (-2.0, 2.0));
    }

    #[test]
    fn test_saves_into_new_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("nested").join("images");
        let opts = PlotOptions {
            out_file_name: Some("test.png".to_string()),
            out_dir: out_dir.clone(),
            ..quiet()
        };
        let request = PlotRequest::new(&TRIANGLE, &PATH);
        plot_network(&request, &opts).unwrap();
        assert!(out_dir.join("test.png").is_file());

        // second call overwrites without error
        plot_network(&request, &opts).unwrap();
        assert!(out_dir.join("test.png").is_file());
    }

    #[test]
    fn test_out_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("taken");
        fs::write(&out_dir, b"not a directory").unwrap();
        let opts = PlotOptions {
            out_file_name: Some("t.png".to_string()),
            out_dir,
            ..quiet()
        };
        let res = plot_network(&PlotRequest::new(&TRIANGLE, &PATH), &opts);
        assert!(matches!(res, Err(Error::Io(_))));
    }

    #[test]
    fn test_no_file_name_skips_saving() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("unused");
        let opts = PlotOptions {
            out_dir: out_dir.clone(),
            ..quiet()
        };
        plot_network(&PlotRequest::new(&TRIANGLE, &PATH), &opts).unwrap();
        assert!(!out_dir.exists());
    }
}
