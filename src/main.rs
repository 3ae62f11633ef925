//! `dagraph` command line: build synthetic DAGs and time every traversal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::Serialize;

use dagraph::observability::init_logging;
use dagraph::{Direction, Graph, GraphConfig, GraphStats, Order};

#[derive(Parser)]
#[command(name = "dagraph", version, about = "In-memory DAG container toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a layered DAG and time every traversal kind from its first root
    Stress {
        /// Number of layers
        #[arg(long, default_value_t = 8)]
        layers: u64,
        /// Vertices per layer
        #[arg(long, default_value_t = 200)]
        width: u64,
        /// Children per vertex in the next layer
        #[arg(long, default_value_t = 2)]
        fanout: u64,
        /// Stop each traversal after this many yielded vertices
        #[arg(long, default_value_t = 1_000_000)]
        limit: usize,
        /// Only run traversals in this direction (descend/down, ascend/up)
        #[arg(long, value_parser = parse_direction)]
        direction: Option<Direction>,
        /// Skip the cycle probe on insertion
        #[arg(long)]
        no_cycle_check: bool,
        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration as YAML
    Config {
        /// YAML config file to validate and echo
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Shape of the synthetic graph.
#[derive(Debug, Clone, Copy)]
struct Layout {
    layers: u64,
    width: u64,
    fanout: u64,
}

#[derive(Serialize)]
struct StressReport {
    stats: GraphStats,
    build_ms: f64,
    root: Option<u64>,
    traversals: Vec<TraversalTiming>,
}

#[derive(Serialize)]
struct TraversalTiming {
    direction: Direction,
    order: Order,
    with_level: bool,
    yielded: usize,
    max_depth: usize,
    ms: f64,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Stress {
            layers,
            width,
            fanout,
            limit,
            direction,
            no_cycle_check,
            config,
        } => load_config(config.as_ref()).and_then(|mut cfg| {
            if no_cycle_check {
                cfg.cycle_detection = false;
            }
            let layout = Layout {
                layers,
                width,
                fanout,
            };
            run_stress(cfg, layout, direction, limit)
        }),
        Command::Config { config } => load_config(config.as_ref())
            .and_then(|cfg| cfg.to_yaml_string().map_err(|e| e.to_string()))
            .map(|yaml| print!("{yaml}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::FAILURE
        }
    }
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::from_str_loose(s).ok_or_else(|| format!("unknown direction {s:?}"))
}

fn load_config(path: Option<&PathBuf>) -> Result<GraphConfig, String> {
    match path {
        Some(p) => GraphConfig::load(p).map_err(|e| format!("{}: {e}", p.display())),
        None => Ok(GraphConfig::default()),
    }
}

/// Layer `l` holds ids `l * width .. (l + 1) * width`; vertex `i` links to
/// `fanout` consecutive vertices (mod width) in the next layer.
fn build_layered(graph: &mut Graph<u64>, layout: Layout) -> Result<(), String> {
    let Layout {
        layers,
        width,
        fanout,
    } = layout;
    if width == 0 {
        return Err("--width must be positive".into());
    }
    // every id below is < layers * width
    layers
        .checked_mul(width)
        .ok_or_else(|| format!("--layers {layers} x --width {width} overflows vertex ids"))?;

    for layer in 0..layers.saturating_sub(1) {
        for i in 0..width {
            let parent = layer * width + i;
            let next = (layer + 1) * width;
            let children = (0..fanout.min(width)).map(|k| next + (i + k) % width);
            graph
                .add_edges_one_to_many(parent, children)
                .map_err(|e| e.to_string())?;
        }
    }
    if layers == 1 {
        for i in 0..width {
            graph.add_node(i);
        }
    }
    Ok(())
}

/// Drain one traversal through its fallible view so a bounded work-list
/// overflow is reported instead of truncating the count.
fn time_traversal(
    graph: &Graph<u64>,
    from: u64,
    direction: Direction,
    order: Order,
    with_level: bool,
    limit: usize,
) -> Result<TraversalTiming, String> {
    let started = Instant::now();
    let mut yielded = 0;
    let mut max_depth = 0;

    let walk = graph
        .traverse_with_level(&from, direction, order)
        .map_err(|e| e.to_string())?;
    for item in walk.try_iter().take(limit) {
        let (_, depth) = item.map_err(|e| e.to_string())?;
        yielded += 1;
        if with_level {
            max_depth = max_depth.max(depth);
        }
    }

    let ms = started.elapsed().as_secs_f64() * 1e3;
    tracing::info!(
        direction = direction.as_str(),
        order = order.as_str(),
        with_level,
        yielded,
        ms,
        "traversal finished"
    );
    Ok(TraversalTiming {
        direction,
        order,
        with_level,
        yielded,
        max_depth,
        ms,
    })
}

fn run_stress(
    config: GraphConfig,
    layout: Layout,
    only: Option<Direction>,
    limit: usize,
) -> Result<(), String> {
    tracing::info!(
        layers = layout.layers,
        width = layout.width,
        fanout = layout.fanout,
        cycle_detection = config.cycle_detection,
        "building layered DAG"
    );

    let mut graph = Graph::with_config(config);
    let started = Instant::now();
    build_layered(&mut graph, layout)?;
    let build_ms = started.elapsed().as_secs_f64() * 1e3;
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        build_ms,
        "graph built"
    );

    let root = graph.parentless().next().copied();
    let leaf = graph.childless().next().copied();
    let mut traversals = Vec::new();

    for direction in [Direction::Descend, Direction::Ascend] {
        if only.is_some_and(|d| d != direction) {
            continue;
        }
        let from = match direction {
            Direction::Descend => root,
            Direction::Ascend => leaf,
        };
        let Some(from) = from else { continue };

        for order in [Order::DepthFirst, Order::BreadthFirst] {
            for with_level in [false, true] {
                traversals.push(time_traversal(
                    &graph, from, direction, order, with_level, limit,
                )?);
            }
        }
    }

    let report = StressReport {
        stats: graph.stats(),
        build_ms,
        root,
        traversals,
    };
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
