use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use shaward_core::Reconciler;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod output;

use output::{OutputWriter, RESULT_FATAL, ScanOutput};

/// Shaward - sidecar SHA-256 digest records
///
/// Writes a `<name>.sha256` record for every file in a directory that does
/// not have one yet, and checks every file that does.
#[derive(Parser)]
#[command(name = "shaward")]
#[command(about = "Detect file corruption with sidecar SHA-256 records", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory to scan (defaults to SHAWARD_DIR env var or the current directory)
    dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Log filter used when `RUST_LOG` is not set.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "error" }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let output = OutputWriter::new(cli.json);
    match cmd_scan(cli.dir, &output) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            output.write_error(&err, RESULT_FATAL);
            ExitCode::from(RESULT_FATAL)
        }
    }
}

fn cmd_scan(dir: Option<PathBuf>, output: &OutputWriter) -> Result<u8> {
    // Determine directory: CLI arg > SHAWARD_DIR env var > current directory
    let dir = match dir.or_else(|| std::env::var_os("SHAWARD_DIR").map(PathBuf::from)) {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let reconciler = Reconciler::new();
    let scanned_at = Utc::now();
    let report = reconciler
        .scan_directory(&dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    let data = ScanOutput::new(&dir, reconciler.algorithm(), &report, scanned_at);
    output.write(&data, || output::render_text(&dir, &report))?;

    Ok(data.result_code)
}
