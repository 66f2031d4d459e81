//! Per-file reconciliation of digests against their records.
//!
//! Each eligible file moves through
//! `Eligible -> DigestComputed -> {RecordMissing | RecordPresent}` and ends in
//! one of `Created`, `Confirmed` or `Mismatched`. Any I/O failure on the way
//! ends the file in `Failed` instead, which leaves the counters alone.

use crate::digest::{Algorithm, Digest, DigestEngine, Sha256Engine};
use crate::error::{Error, Result};
use crate::filter;
use crate::listing::{self, FileEntry};
use crate::record::RecordStore;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Counters for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Records written for files seen for the first time.
    pub created: usize,
    /// Files whose digest matched their record.
    pub confirmed: usize,
    /// Files whose digest differed from their record.
    pub mismatched: usize,
}

/// Where a per-file failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Opening or reading the file itself.
    Digest,
    /// Reading an existing record.
    RecordRead,
    /// Writing a new record.
    RecordWrite,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::Digest => "digest",
            FailureStage::RecordRead => "record_read",
            FailureStage::RecordWrite => "record_write",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state of one eligible file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// No record existed; one was written.
    Created { digest: Digest },
    /// The record matched the current content.
    Confirmed { digest: Digest },
    /// The record differs from the current content. The record is left as is.
    Mismatched { expected: Digest, actual: Digest },
    /// The file was abandoned for this run.
    Failed { stage: FailureStage, reason: String },
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub name: String,
    pub outcome: Outcome,
}

/// Result of a whole scan: counters plus one report per eligible file, in
/// processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub summary: ScanSummary,
    pub files: Vec<FileReport>,
}

impl ScanReport {
    /// Add a file report and update the counters.
    pub fn push(&mut self, report: FileReport) {
        match report.outcome {
            Outcome::Created { .. } => self.summary.created += 1,
            Outcome::Confirmed { .. } => self.summary.confirmed += 1,
            Outcome::Mismatched { .. } => self.summary.mismatched += 1,
            Outcome::Failed { .. } => {}
        }
        self.files.push(report);
    }

    /// Number of files abandoned because of I/O errors.
    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, Outcome::Failed { .. }))
            .count()
    }

    /// Reports for files whose record did not match.
    pub fn mismatches(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, Outcome::Mismatched { .. }))
    }

    /// Returns true if every processed file was created or confirmed.
    pub fn is_clean(&self) -> bool {
        self.summary.mismatched == 0 && self.failed() == 0
    }
}

/// Drives digesting and record keeping for a set of entries.
#[derive(Debug, Clone)]
pub struct Reconciler<E = Sha256Engine> {
    engine: E,
    records: RecordStore,
}

impl Default for Reconciler<Sha256Engine> {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler<Sha256Engine> {
    /// Create a reconciler using SHA-256.
    pub fn new() -> Self {
        Self::with_engine(Sha256Engine)
    }
}

impl<E: DigestEngine> Reconciler<E> {
    /// Create a reconciler around a specific digest engine.
    pub fn with_engine(engine: E) -> Self {
        let records = RecordStore::new(engine.algorithm());
        Self { engine, records }
    }

    /// The algorithm in use.
    pub fn algorithm(&self) -> Algorithm {
        self.engine.algorithm()
    }

    /// The record store in use.
    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// List `dir` and reconcile every entry in it.
    ///
    /// Fails only if the directory cannot be listed; per-file problems are
    /// reported in the returned [`ScanReport`].
    pub fn scan_directory(&self, dir: &Path) -> Result<ScanReport> {
        info!("Scanning directory: {}", dir.display());
        let entries = listing::list_directory(dir)?;
        let report = self.reconcile(entries);
        info!(
            created = report.summary.created,
            confirmed = report.summary.confirmed,
            mismatched = report.summary.mismatched,
            failed = report.failed(),
            "Scan finished"
        );
        Ok(report)
    }

    /// Reconcile a sequence of entries, one at a time.
    pub fn reconcile<I>(&self, entries: I) -> ScanReport
    where
        I: IntoIterator<Item = FileEntry>,
    {
        let mut report = ScanReport::default();
        for entry in entries {
            if let Some(file_report) = self.reconcile_file(&entry) {
                report.push(file_report);
            }
        }
        report
    }

    /// Reconcile a single entry. Returns `None` for ineligible entries.
    pub fn reconcile_file(&self, entry: &FileEntry) -> Option<FileReport> {
        let eligibility = filter::classify(entry);
        if !eligibility.is_eligible() {
            debug!(file = %entry.name, reason = eligibility.as_str(), "Skipping");
            return None;
        }

        let outcome = match self.check(entry) {
            Ok(outcome) => outcome,
            Err((stage, err)) => {
                warn!(file = %entry.name, stage = %stage, "{}", err);
                Outcome::Failed {
                    stage,
                    reason: err.to_string(),
                }
            }
        };

        Some(FileReport {
            path: entry.path.clone(),
            name: entry.name.clone(),
            outcome,
        })
    }

    fn check(&self, entry: &FileEntry) -> std::result::Result<Outcome, (FailureStage, Error)> {
        let actual = self
            .engine
            .digest_file(&entry.path)
            .map_err(|e| (FailureStage::Digest, e))?;

        let record_path = self.records.record_path_for(&entry.path);

        if !self.records.exists(&record_path) {
            self.records
                .write(&record_path, &actual)
                .map_err(|e| (FailureStage::RecordWrite, e))?;
            info!(file = %entry.name, digest = %actual, "Generated digest record");
            return Ok(Outcome::Created { digest: actual });
        }

        let expected = self
            .records
            .read(&record_path)
            .map_err(|e| (FailureStage::RecordRead, e))?;

        if expected == actual {
            debug!(file = %entry.name, "Digest confirmed");
            return Ok(Outcome::Confirmed { digest: actual });
        }

        if !expected.is_well_formed(self.algorithm()) {
            warn!(
                record = %record_path.display(),
                "Digest record does not hold a {} digest",
                self.algorithm()
            );
        }
        info!(file = %entry.name, %expected, %actual, "Checksum mismatch");
        Ok(Outcome::Mismatched { expected, actual })
    }
}
