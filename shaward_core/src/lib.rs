//! # Shaward Core
//!
//! Integrity checking with sidecar SHA-256 digest records.
//!
//! Every regular file in a directory gets a companion `<name>.sha256` file
//! holding the hex digest of its content. The first scan writes these
//! records; later scans recompute each digest and compare it with the stored
//! one, reporting files whose content changed since the record was written.
//!
//! ## Features
//!
//! - Streaming SHA-256 digests, rendered as lowercase hex
//! - Plain-text records next to the files they describe
//! - Records are never rewritten once they exist
//! - Small checksum artifacts and `desktop.ini` are left alone
//!
//! ## Example
//!
//! ```no_run
//! use shaward_core::Reconciler;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = Reconciler::new().scan_directory(Path::new("./photos"))?;
//!
//! for file in report.mismatches() {
//!     println!("checksum mismatch: {}", file.name);
//! }
//! println!(
//!     "{} created, {} confirmed, {} mismatched",
//!     report.summary.created, report.summary.confirmed, report.summary.mismatched
//! );
//! # Ok(())
//! # }
//! ```

mod digest;
mod error;
mod filter;
mod listing;
mod reconcile;
mod record;

pub use digest::{Algorithm, Digest, DigestEngine, SHA256_SIZE, Sha256Engine, compute_digest};
pub use error::{Error, Result};
pub use filter::{
    DESKTOP_INI, Eligibility, IGNORED_EXTENSIONS, SMALL_ARTIFACT_THRESHOLD, classify, is_eligible,
    is_ignored_extension,
};
pub use listing::{FileEntry, list_directory};
pub use reconcile::{FailureStage, FileReport, Outcome, Reconciler, ScanReport, ScanSummary};
pub use record::{RECORD_SUFFIX, RecordStore};
