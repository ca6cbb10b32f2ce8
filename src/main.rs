//! Demo CLI: draws a sample network four ways
//!
//! Run with: cargo run --features cli -- --save --no-show

mod demo;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nw_draw::{plot_network, ColorScale, PlotOptions, PlotRequest};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use demo::{above_median, blocks_by_thirds, force_layout, pagerank, sample_tree, Graph};

#[derive(Parser, Debug)]
#[command(name = "nw-draw", about = "Draw node-link diagrams of a network")]
struct Args {
    /// JSON graph file; a random sample tree is used when omitted
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Vertex count of the sample tree
    #[arg(long, default_value_t = 105)]
    vertices: usize,

    /// Force simulation ticks when the graph has no layout
    #[arg(long, default_value_t = 500)]
    layout_steps: usize,

    /// JSON file with plot option overrides
    #[arg(long)]
    options: Option<PathBuf>,

    #[arg(long, default_value = "./images/")]
    out_dir: PathBuf,

    /// Write each figure to out-dir
    #[arg(long)]
    save: bool,

    /// Skip the display windows
    #[arg(long)]
    no_show: bool,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,nw_draw=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let graph = match &args.graph {
        Some(path) => Graph::load(path)?,
        None => sample_tree(args.vertices),
    };
    let positions = match &graph.positions {
        Some(p) => p.clone(),
        None => force_layout(graph.vertex_count, &graph.edges, args.layout_steps),
    };
    info!(
        vertices = graph.vertex_count,
        edges = graph.edges.len(),
        "Graph ready"
    );

    let mut base = PlotOptions {
        out_dir: args.out_dir.clone(),
        show: !args.no_show,
        ..PlotOptions::default()
    };
    if let Some(path) = &args.options {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {}", path.display()))?;
        base = base
            .merged_with_json(&text)
            .with_context(|| format!("invalid options file {}", path.display()))?;
    }

    let ranks = pagerank(graph.vertex_count, &graph.edges, 0.85);
    let blocks = blocks_by_thirds(graph.vertex_count);
    let top_half = above_median(&ranks);

    let request = PlotRequest::new(&positions, &graph.edges);
    let runs = [
        ("default", ColorScale::Constant, request),
        ("pagerank", ColorScale::Numeric, request.with_color_values(&ranks)),
        ("blocks", ColorScale::Categorical, request.with_color_values(&blocks)),
        (
            "filtered",
            ColorScale::Numeric,
            request
                .with_color_values(&ranks)
                .with_vertex_filter(&top_half),
        ),
    ];

    for (name, scale, request) in runs {
        let options = PlotOptions {
            color_scale: scale,
            title: format!("nw-draw: {name}"),
            out_file_name: args.save.then(|| format!("{name}.png")),
            ..base.clone()
        };
        let figure = plot_network(&request, &options)
            .with_context(|| format!("failed to draw the {name} plot"))?;
        info!(
            plot = name,
            segments = figure.segment_count(),
            markers = figure.marker_count(),
            "Plot done"
        );
    }

    Ok(())
}
