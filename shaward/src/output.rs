//! Output formatting for scan results.
//!
//! Renders a [`ScanReport`] either as human-readable text or as a single JSON
//! document.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shaward_core::{Algorithm, FileReport, Outcome, ScanReport, ScanSummary};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

/// Every file was created or confirmed.
pub const RESULT_OK: u8 = 0;
/// The scan could not run at all.
pub const RESULT_FATAL: u8 = 1;
/// At least one record did not match.
pub const RESULT_MISMATCH: u8 = 2;
/// No mismatches, but some files could not be checked.
pub const RESULT_FILE_ERRORS: u8 = 3;

const SEPARATOR: &str = "======================================";

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writer for command output with format abstraction.
pub struct OutputWriter {
    format: OutputFormat,
    stdout: io::Stdout,
}

impl OutputWriter {
    /// Create a new OutputWriter.
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            stdout: io::stdout(),
        }
    }

    /// Write output using the configured format.
    ///
    /// The `text_fn` closure is called only in text mode to generate the
    /// human-readable output.
    pub fn write<T: Serialize>(&self, data: &T, text_fn: impl FnOnce() -> String) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                writeln!(&self.stdout, "{}", json)?;
            }
            OutputFormat::Text => {
                let text = text_fn();
                if !text.is_empty() {
                    write!(&self.stdout, "{}", text)?;
                }
            }
        }
        Ok(())
    }

    /// Write an error message to stderr.
    ///
    /// In JSON mode, writes a JSON error object with success=false.
    /// In text mode, writes the error message directly.
    pub fn write_error(&self, error: &anyhow::Error, result_code: u8) {
        match self.format {
            OutputFormat::Json => {
                let error_output = ErrorOutput {
                    success: false,
                    result_code,
                    error: format!("{:#}", error),
                };
                if let Ok(json) = serde_json::to_string_pretty(&error_output) {
                    let _ = writeln!(io::stderr(), "{}", json);
                }
            }
            OutputFormat::Text => {
                let _ = writeln!(io::stderr(), "Error: {:#}", error);
            }
        }
    }
}

/// Map a finished scan to a result code.
pub fn result_code(report: &ScanReport) -> u8 {
    if report.summary.mismatched > 0 {
        RESULT_MISMATCH
    } else if report.failed() > 0 {
        RESULT_FILE_ERRORS
    } else {
        RESULT_OK
    }
}

/// Human-readable rendering of a scan.
///
/// Confirmed files stay quiet; everything else gets one line, followed by
/// the summary counters.
pub fn render_text(dir: &Path, report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Directory: {}", dir.display());

    for file in &report.files {
        match &file.outcome {
            Outcome::Created { .. } => {
                let _ = writeln!(out, "Generated digest record for {}", file.name);
            }
            Outcome::Confirmed { .. } => {}
            Outcome::Mismatched { .. } => {
                let _ = writeln!(out, "Checksum mismatch: {}", file.name);
            }
            Outcome::Failed { stage, reason } => {
                let _ = writeln!(out, "Failed ({}) {}: {}", stage, file.name, reason);
            }
        }
    }

    let summary = &report.summary;
    let _ = writeln!(out, "{}", SEPARATOR);
    let _ = writeln!(out, "Records created: {}", summary.created);
    let _ = writeln!(out, "Checksums confirmed: {}", summary.confirmed);
    let _ = writeln!(out, "Checksums mismatched: {}", summary.mismatched);
    let failed = report.failed();
    if failed > 0 {
        let _ = writeln!(out, "Files not checked: {}", failed);
    }
    out
}

// ============================================================================
// Data Transfer Objects (DTOs) for JSON output
// ============================================================================

/// Error output structure.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub success: bool,
    pub result_code: u8,
    pub error: String,
}

/// One processed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl From<&FileReport> for FileInfo {
    fn from(report: &FileReport) -> Self {
        Self {
            name: report.name.clone(),
            path: report.path.display().to_string(),
            outcome: report.outcome.clone(),
        }
    }
}

/// Output for a scan.
#[derive(Debug, Serialize)]
pub struct ScanOutput {
    pub success: bool,
    pub result_code: u8,
    pub directory: String,
    pub algorithm: String,
    pub scanned_at: DateTime<Utc>,
    pub summary: ScanSummary,
    pub failed: usize,
    pub files: Vec<FileInfo>,
}

impl ScanOutput {
    pub fn new(
        dir: &Path,
        algorithm: Algorithm,
        report: &ScanReport,
        scanned_at: DateTime<Utc>,
    ) -> Self {
        let result_code = result_code(report);
        Self {
            success: result_code == RESULT_OK,
            result_code,
            directory: dir.display().to_string(),
            algorithm: algorithm.as_str().to_string(),
            scanned_at,
            summary: report.summary,
            failed: report.failed(),
            files: report.files.iter().map(FileInfo::from).collect(),
        }
    }
}
