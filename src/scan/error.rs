//! Scan precondition errors.

use core::fmt;

/// A scan request that violates the scanner's preconditions.
///
/// These are caller bugs rather than data conditions: the scan loops never
/// fail once started. Checking them up front keeps every load in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The first byte the scan would read lies at or past the end of the
    /// buffer.
    StartOutOfBounds {
        /// Absolute offset of the first byte the scan would read.
        position: usize,
        /// Buffer length.
        len: usize,
    },

    /// A two-anchor key whose `key_offset` is outside `1..=16`.
    InvalidKeyOffset {
        /// The offending value.
        key_offset: usize,
    },

    /// A double-anchor scan was given a key with only one anchor.
    MissingSecondAnchor,

    /// A single-anchor scan was given a key with two anchors.
    UnexpectedSecondAnchor,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartOutOfBounds { position, len } => write!(
                f,
                "scan would start at byte {} of a {}-byte buffer",
                position, len
            ),
            Self::InvalidKeyOffset { key_offset } => {
                write!(f, "key offset {} outside 1..=16", key_offset)
            }
            Self::MissingSecondAnchor => write!(f, "double-anchor scan needs two anchors"),
            Self::UnexpectedSecondAnchor => {
                write!(f, "single-anchor scan given a two-anchor key")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScanError {}
