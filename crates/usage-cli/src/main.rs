//! Utilization report aggregator CLI
//!
//! Reads every `cell_<name>_util.txt` report in a directory and writes the
//! combined resource usage as CSV next to them.

use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use usage_core::{export_all, parse_report, scan_directory, MatrixBuilder, ReportLayout};

#[derive(Parser)]
#[command(name = "usage-cli")]
#[command(about = "Aggregate per-cell Vivado utilization reports into CSV", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing cell_<name>_util.txt reports
    directory: Option<PathBuf>,

    /// JSON file overriding the report layout (border, separator, table offset, column labels)
    #[arg(short, long)]
    layout: Option<PathBuf>,
}

fn main() {
    setup_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default "info")
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> usage_core::Result<()> {
    let cli = Cli::parse();

    let Some(directory) = cli.directory else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let layout = match &cli.layout {
        Some(path) => ReportLayout::load(path)?,
        None => ReportLayout::default(),
    };

    cmd_aggregate(&directory, &layout)
}

fn cmd_aggregate(directory: &Path, layout: &ReportLayout) -> usage_core::Result<()> {
    let scan_result = scan_directory(directory)?;
    info!(
        directory = %directory.display(),
        reports = scan_result.reports.len(),
        "scanned for utilization reports"
    );

    let mut builder = MatrixBuilder::new();
    for report in &scan_result.reports {
        info!(path = %report.path.display(), "parsing");
        let table = parse_report(&report.path, &report.entity, layout)?;
        builder.merge(table)?;
    }

    info!(cells = builder.entity_count(), "merged all reports");
    let matrix = builder.finish()?;
    let result = export_all(&matrix, directory)?;

    println!(
        "Aggregated {} cells and {} resources",
        matrix.row_count(),
        matrix.column_count()
    );
    println!("Results written to: {}", result.matrix.display());
    println!("Transposed results written to: {}", result.transposed.display());

    Ok(())
}
