//! Digest computation using SHA-256.

use crate::error::{Error, Result};
use serde::Serialize;
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// SHA-256 output size in bytes.
pub const SHA256_SIZE: usize = 32;

/// Read buffer used while streaming a file through the hasher.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// SHA-256 with 256-bit output.
    Sha256,
}

impl Algorithm {
    /// Returns the string representation of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
        }
    }

    /// Digest size in bytes.
    pub fn output_size(&self) -> usize {
        match self {
            Algorithm::Sha256 => SHA256_SIZE,
        }
    }

    /// Length of the hex rendering of a digest.
    pub fn hex_len(&self) -> usize {
        self.output_size() * 2
    }

    /// Suffix appended to a file's path to name its digest record.
    pub fn record_suffix(&self) -> &'static str {
        match self {
            Algorithm::Sha256 => crate::record::RECORD_SUFFIX,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A digest rendered as a hex string.
///
/// Digests read back from records are kept verbatim (after trimming), so a
/// `Digest` is not guaranteed to be well formed. Comparison is exact string
/// equality.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Wrap raw digest bytes as lowercase hex.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Digest(hex::encode(bytes))
    }

    /// Take the content of a digest record, ignoring surrounding whitespace.
    pub fn from_record(content: &str) -> Self {
        Digest(content.trim().to_string())
    }

    /// The hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this looks like a lowercase hex digest for `algorithm`.
    pub fn is_well_formed(&self, algorithm: Algorithm) -> bool {
        self.0.len() == algorithm.hex_len()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.0)
    }
}

/// Something that turns a byte stream into a [`Digest`].
pub trait DigestEngine {
    /// The algorithm this engine implements.
    fn algorithm(&self) -> Algorithm;

    /// Consume `reader` to the end and return its digest.
    fn digest_reader(&self, reader: &mut dyn Read) -> io::Result<Digest>;

    /// Hash the contents of a file.
    ///
    /// The file is streamed through a fixed-size buffer and closed before
    /// returning, on success or failure.
    fn digest_file(&self, path: &Path) -> Result<Digest> {
        let mut file = File::open(path).map_err(|e| Error::file_open(path, e))?;
        self.digest_reader(&mut file)
            .map_err(|e| Error::file_read(path, e))
    }
}

/// SHA-256 digest engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Engine;

impl Sha256Engine {
    /// Hash raw bytes.
    pub fn digest_bytes(&self, data: &[u8]) -> Digest {
        Digest::from_bytes(&Sha256::digest(data))
    }
}

impl DigestEngine for Sha256Engine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sha256
    }

    fn digest_reader(&self, reader: &mut dyn Read) -> io::Result<Digest> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..n]);
        }
        Ok(Digest::from_bytes(&hasher.finalize()))
    }
}

/// Compute the SHA-256 digest of a file.
pub fn compute_digest(path: &Path) -> Result<Digest> {
    Sha256Engine.digest_file(path)
}
