use satsnap::config::SnapshotConfig;
use satsnap::{logging, pipeline};

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "satsnap",
    about = "Merge element sets and satellite catalog files into one propagated snapshot"
)]
struct Cli {
    /// Element set or satellite catalog files, processed in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output artifact path (overrides the configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Default log level (RUST_LOG still applies)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => SnapshotConfig::from_file(path)?,
        None => SnapshotConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize logging
    let _logging_guard = logging::init_logging(config.log_dir.as_deref(), "satsnap", &config.log_level)?;

    tracing::info!("satsnap starting with {} input files", cli.files.len());

    let report = pipeline::run(&config, &cli.files)?;

    tracing::info!(
        "Wrote {} entries in {} sets to {} (reference epoch {} ms, {} with owner)",
        report.total_entries(),
        report.sets.len(),
        report.output_path.display(),
        report.reference_epoch_ms,
        report.owners,
    );
    for (set, count) in &report.sets {
        tracing::debug!("  {}: {} entries", set, count);
    }

    Ok(())
}
