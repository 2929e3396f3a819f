//! Training chart generator.
//!
//! Loads a training log, groups attempts by exercise, rep range and effort,
//! and prints the dashboard model as JSON for a plotting front end.
//!
//! Usage:
//! ```bash
//! # Default log (data/training-data.csv), sorted by ID
//! cargo run --bin training-charts
//!
//! # Sort by timestamp with plain hover labels
//! cargo run --bin training-charts -- --sort timestamp --labels plain
//!
//! # Custom log and tab order
//! cargo run --bin training-charts -- --data log.parquet --exercises D,S --pretty
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use training_charts::chart::LabelStyle;
use training_charts::loader::TrainingLog;
use training_charts::partition::ExerciseOrder;
use training_charts::sequence::SortPolicy;
use training_charts::Engine;

#[derive(Parser)]
#[command(
    name = "training-charts",
    about = "Assemble training progress charts from a lift log",
    long_about = "Group lift attempts by exercise, rep range and effort rating, and print plot-ready chart specs as JSON"
)]
struct Args {
    /// Training log (.csv or .parquet)
    #[arg(long, default_value = "data/training-data.csv")]
    data: PathBuf,

    /// Sequence order within a chart: `id` or `timestamp`
    #[arg(long, default_value = "id")]
    sort: SortPolicy,

    /// Hover label style: `rich` or `plain`
    #[arg(long, default_value = "rich")]
    labels: LabelStyle,

    /// Comma-separated exercise codes, one tab each
    #[arg(long, value_delimiter = ',', default_value = "S,B,D")]
    exercises: Vec<String>,

    /// Dashboard title
    #[arg(long)]
    title: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut builder = Engine::builder()
        .sort_policy(args.sort)
        .label_style(args.labels)
        .exercise_order(ExerciseOrder::new(args.exercises));
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    let engine = builder.build().context("invalid engine configuration")?;

    let log = TrainingLog::load(&args.data)
        .with_context(|| format!("failed to load training log {}", args.data.display()))?;
    let dashboard = engine
        .dashboard(log.batches())
        .with_context(|| format!("cannot build charts from {}", args.data.display()))?;

    info!(
        tabs = dashboard.tabs.len(),
        charts = dashboard.tabs.iter().map(|t| t.chart_count()).sum::<usize>(),
        dropped_rows = dashboard.dropped_rows,
        "dashboard assembled"
    );

    let json = dashboard.to_json(args.pretty)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
