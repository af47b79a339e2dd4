//! # Butterfly-walk CLI
//!
//! Command-line interface for the butterfly-walk library.
//! Loads a road dataset and prints the shortest walking route between two
//! intersections.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use butterfly_walk::{
    load_graph, ColumnRef, EngineOptions, Graph, LoaderConfig, Preset, Route,
    ShortestPathEngine, VertexId,
};
use clap::Parser;
use log::{error, info, LevelFilter};

mod cli;

/// Command-line interface for butterfly-walk
#[derive(Parser)]
#[command(name = "butterfly-walk")]
#[command(about = "Shortest walking routes over road-segment data (Bellman-Ford)")]
#[command(long_about = "Finds the shortest walking route between two intersections:
  butterfly-walk roads.csv --from 53980 --to 30783
  butterfly-walk roads.csv --from 1 --to 4 --json
  butterfly-walk VT_Road_Centerline.csv --preset vt-road-centerline --from 53980 --to 30783

Column Mapping:
  By default the header row must contain start, end, name and distance.
  --config layout.toml             # read the layout from a TOML file
  --distance-column ArcMiles       # pick a column by header name
  --start-column 60                # or by zero-based position")]
#[command(version = env!("BUTTERFLY_VERSION"))]
struct Cli {
    /// Road segment file, one road per row
    input: PathBuf,

    /// Intersection id to start from
    #[arg(long, allow_hyphen_values = true, required_unless_present = "dry_run")]
    from: Option<VertexId>,

    /// Intersection id to walk to
    #[arg(long, allow_hyphen_values = true, required_unless_present = "dry_run")]
    to: Option<VertexId>,

    /// TOML file describing the input layout
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in input layout: "default" or "vt-road-centerline"
    #[arg(long)]
    preset: Option<Preset>,

    /// Column holding the start intersection id (name or index)
    #[arg(long)]
    start_column: Option<ColumnRef>,

    /// Column holding the end intersection id (name or index)
    #[arg(long)]
    end_column: Option<ColumnRef>,

    /// Column holding the street name (name or index)
    #[arg(long)]
    label_column: Option<ColumnRef>,

    /// Column holding the road length (name or index)
    #[arg(long)]
    distance_column: Option<ColumnRef>,

    /// Field delimiter
    #[arg(long)]
    delimiter: Option<char>,

    /// The input has no header row (columns must be given by index)
    #[arg(long)]
    no_headers: bool,

    /// Relax table columns in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,

    /// Load the graph and report its size without routing
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the loader configuration from file, preset and flag overrides
fn resolve_config(cli: &Cli) -> Result<LoaderConfig> {
    let mut config = match (&cli.config, cli.preset) {
        (Some(path), _) => LoaderConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        (None, Some(preset)) => preset.config(),
        (None, None) => LoaderConfig::default(),
    };

    if let Some(column) = &cli.start_column {
        config.columns.start = column.clone();
    }
    if let Some(column) = &cli.end_column {
        config.columns.end = column.clone();
    }
    if let Some(column) = &cli.label_column {
        config.columns.label = column.clone();
    }
    if let Some(column) = &cli.distance_column {
        config.columns.distance = column.clone();
    }
    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
        config.delimiter_byte()?;
    }
    if cli.no_headers {
        config.has_headers = false;
    }
    if cli.parallel {
        config.parallel = true;
    }

    Ok(config)
}

fn main() {
    if let Err(e) = run() {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let mut logger = env_logger::Builder::from_default_env();
    logger.target(env_logger::Target::Stderr);
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    if cli.verbose {
        eprintln!("🦋 Butterfly-walk v{} starting...", env!("BUTTERFLY_VERSION"));
    }

    let config = resolve_config(&cli)?;
    let graph = load_graph(&cli.input, &config)
        .with_context(|| format!("Failed to load roads from {}", cli.input.display()))?;

    if cli.dry_run {
        eprintln!("🔍 [DRY RUN] Loaded {}", cli.input.display());
        println!(
            "Graph: {} intersections, {} directed roads",
            graph.vertex_count(),
            graph.edge_count()
        );
        return Ok(());
    }

    let (Some(from), Some(to)) = (cli.from, cli.to) else {
        anyhow::bail!("--from and --to are required unless --dry-run is given");
    };

    let route = find_route(&graph, from, to, config.parallel)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        print_route(&route);
    }

    Ok(())
}

/// Run one query with a progress bar over the table columns
fn find_route(graph: &Graph, from: VertexId, to: VertexId, parallel: bool) -> Result<Route> {
    // Reject an unknown destination before the expensive part
    graph.require_index(to)?;

    let columns = graph.vertex_count().saturating_sub(1) as u64;
    let progress_manager =
        cli::ProgressManager::new(columns, &format!("🚶 Computing distances from {from}"));
    let options = EngineOptions {
        parallel,
        progress: Some(progress_manager.callback()),
    };

    let start = Instant::now();
    let engine = ShortestPathEngine::with_options(graph, options);
    let table = engine.compute_distances(from)?;
    progress_manager.pb.finish_and_clear();
    info!(
        "Distance table ({} x {}) filled in {:.2}s",
        table.vertex_count(),
        table.vertex_count(),
        start.elapsed().as_secs_f64()
    );

    Ok(engine.reconstruct_path(to, &table)?)
}

fn print_route(route: &Route) {
    match route {
        Route::Found {
            source,
            destination,
            legs,
            total_distance,
        } => {
            println!("Walking route from {source} to {destination}:");
            for (i, leg) in legs.iter().enumerate() {
                println!("  {}. {} ({})", i + 1, leg.name, leg.distance);
            }
            println!("Distance: {total_distance}");
        }
        Route::NoPath { .. } => println!("{route}"),
    }
}
