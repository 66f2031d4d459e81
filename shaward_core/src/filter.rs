//! Rules deciding which directory entries get a digest record.

use crate::listing::FileEntry;

/// Extensions of digest and checksum artifacts. Small files carrying one of
/// these are assumed to be records, not content.
pub const IGNORED_EXTENSIONS: &[&str] = &[
    "md5",
    "md4",
    "sha1",
    "sha256",
    "sha384",
    "sha512",
    "ripemd160",
    "panama",
    "tiger",
    "md2",
    "adler32",
    "crc32",
    "checksum",
];

/// Files with an ignored extension are only skipped below this size.
pub const SMALL_ARTIFACT_THRESHOLD: u64 = 1024;

/// Windows folder settings file, never checked.
pub const DESKTOP_INI: &str = "desktop.ini";

/// Result of classifying an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// The entry is processed.
    Eligible,
    /// The entry is a directory.
    Directory,
    /// The entry is `desktop.ini`.
    PlatformArtifact,
    /// The entry is a small file with a checksum extension.
    ChecksumArtifact,
}

impl Eligibility {
    /// Returns true if the entry should be processed.
    pub fn is_eligible(&self) -> bool {
        *self == Eligibility::Eligible
    }

    /// Short reason for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "eligible",
            Eligibility::Directory => "directory",
            Eligibility::PlatformArtifact => "platform artifact",
            Eligibility::ChecksumArtifact => "checksum artifact",
        }
    }
}

/// Returns true if `extension` (without the leading dot) is in the ignore set.
pub fn is_ignored_extension(extension: &str) -> bool {
    IGNORED_EXTENSIONS
        .iter()
        .any(|ignored| ignored.eq_ignore_ascii_case(extension))
}

/// Classify an entry. The first matching exclusion wins.
pub fn classify(entry: &FileEntry) -> Eligibility {
    if entry.is_dir {
        return Eligibility::Directory;
    }
    if entry.name == DESKTOP_INI {
        return Eligibility::PlatformArtifact;
    }
    if is_ignored_extension(&entry.extension) && entry.size < SMALL_ARTIFACT_THRESHOLD {
        return Eligibility::ChecksumArtifact;
    }
    Eligibility::Eligible
}

/// Returns true if the entry should be digested.
pub fn is_eligible(entry: &FileEntry) -> bool {
    classify(entry).is_eligible()
}
