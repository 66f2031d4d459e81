//! Error types for shaward_core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using shaward_core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning a directory.
///
/// Only [`Error::DirectoryRead`] aborts a scan. The remaining variants are
/// caught per file and surface as failed outcomes in the scan report.
#[derive(Error, Debug)]
pub enum Error {
    /// The directory being scanned could not be listed.
    #[error("Cannot read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened for digesting.
    #[error("Cannot open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read failed part way through digesting a file.
    #[error("Cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing digest record could not be read.
    #[error("Cannot read digest record {path}: {source}")]
    RecordRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A new digest record could not be written.
    #[error("Cannot write digest record {path}: {source}")]
    RecordWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a DirectoryRead error.
    pub fn directory_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    /// Create a FileOpen error.
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a FileRead error.
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a RecordRead error.
    pub fn record_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::RecordRead {
            path: path.into(),
            source,
        }
    }

    /// Create a RecordWrite error.
    pub fn record_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::RecordWrite {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error should stop the whole scan.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DirectoryRead { .. })
    }
}

/// Convert a listing error from the walker, keeping the underlying I/O cause
/// when there is one.
pub(crate) fn from_walk_error(root: impl Into<PathBuf>, err: ignore::Error) -> Error {
    let source = match err.io_error() {
        Some(io_err) => std::io::Error::new(io_err.kind(), io_err.to_string()),
        None => std::io::Error::other(err.to_string()),
    };
    Error::directory_read(root, source)
}
