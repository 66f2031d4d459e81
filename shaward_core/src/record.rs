//! Sidecar digest records.
//!
//! The record for `dir/name` lives at `dir/name.sha256` and holds the bare
//! hex digest. Records are never locked; a scan is the only writer.

use crate::digest::{Algorithm, Digest};
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to a file's path to name its SHA-256 record.
pub const RECORD_SUFFIX: &str = ".sha256";

/// Reads and writes digest records next to the files they describe.
#[derive(Debug, Clone, Copy)]
pub struct RecordStore {
    algorithm: Algorithm,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(Algorithm::Sha256)
    }
}

impl RecordStore {
    /// Create a store for records of `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    /// The suffix appended to file paths.
    pub fn suffix(&self) -> &'static str {
        self.algorithm.record_suffix()
    }

    /// Path of the record for `file_path`.
    ///
    /// The suffix is appended, never substituted for an existing extension.
    pub fn record_path_for(&self, file_path: &Path) -> PathBuf {
        let mut record: OsString = file_path.as_os_str().to_owned();
        record.push(self.suffix());
        PathBuf::from(record)
    }

    /// Whether a record exists at `record_path`.
    ///
    /// Only a definite "not found" counts as absent. If existence cannot be
    /// determined the record is treated as present, so the following read
    /// reports the problem instead of a write clobbering the record.
    pub fn exists(&self, record_path: &Path) -> bool {
        !matches!(record_path.try_exists(), Ok(false))
    }

    /// Read a stored digest. Surrounding whitespace is dropped.
    ///
    /// Content that is not valid UTF-8 is read lossily; it can only ever
    /// compare as a mismatch.
    pub fn read(&self, record_path: &Path) -> Result<Digest> {
        let content = fs::read(record_path).map_err(|e| Error::record_read(record_path, e))?;
        Ok(Digest::from_record(&String::from_utf8_lossy(&content)))
    }

    /// Write `digest` as the record content, creating the file if needed.
    pub fn write(&self, record_path: &Path, digest: &Digest) -> Result<()> {
        fs::write(record_path, digest.as_str()).map_err(|e| Error::record_write(record_path, e))
    }
}
