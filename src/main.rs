use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// Use library instead of local modules
use payroll_stats::{run, ScanConfig, VERSION};

/// Salary statistics report for a funcionarios/areas input file
#[derive(Parser, Debug)]
#[command(name = "payroll-stats", version)]
struct Cli {
    /// Path to the input file
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    debug!("payroll-stats {} started", VERSION);

    let config = ScanConfig::from_env().context("Invalid PAYROLL_BLOCKS")?;
    debug!("scanning with {} blocks", config.blocks);

    let stdout = BufWriter::new(io::stdout());
    let stats = run(&cli.input, &config, stdout)
        .with_context(|| format!("Failed to build report for {}", cli.input.display()))?;

    info!("✓ {}", stats.summary());

    Ok(())
}
