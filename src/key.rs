//! Scan key table.
//!
//! A key carries one or two anchor bytes plus the facts the scan loops need
//! about the literal they were taken from: how long its confirmation window
//! is and whether it is case-insensitive. Keys are normally built by the
//! enclosing literal engine; [`ScanKey::from_literal`] covers the common
//! "anchor on the last byte(s)" choice.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scan::ScanError;

/// Largest supported distance between the two anchors.
///
/// The double-anchor loop carries `key_offset - 1` bits of anchor0 state from
/// one vector to the next, which must fit in the narrowest (16-lane) mask.
pub const MAX_KEY_OFFSET: usize = 16;

/// Anchors and confirmation parameters for one literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanKey {
    /// First (or only) anchor byte.
    pub anchor0: u8,
    /// Second anchor byte, present only for two-anchor keys.
    pub anchor1: Option<u8>,
    /// Bytes spanned by the anchor pair: `anchor1` sits `key_offset - 1`
    /// bytes after `anchor0` (2 = adjacent, 1 = same byte).
    pub key_offset: usize,
    /// Length of the confirmation window the consumer checks after a hit.
    /// The anchors sit at the end of this window.
    pub validation_len: usize,
    /// Fold ASCII case when comparing alphabetic anchors.
    pub case_insensitive: bool,
}

impl ScanKey {
    /// Key with a single anchor byte.
    pub fn single(anchor: u8) -> Self {
        Self {
            anchor0: anchor,
            anchor1: None,
            key_offset: 1,
            validation_len: 1,
            case_insensitive: false,
        }
    }

    /// Key with two anchors spanning `key_offset` bytes (2 means adjacent).
    pub fn double(anchor0: u8, anchor1: u8, key_offset: usize) -> Self {
        Self {
            anchor0,
            anchor1: Some(anchor1),
            key_offset,
            validation_len: key_offset.max(1),
            case_insensitive: false,
        }
    }

    /// Derive a key from a literal: its last byte, or its last two bytes.
    ///
    /// The whole literal becomes the confirmation window. Returns `None` for
    /// an empty literal.
    ///
    /// ```
    /// use noodle::ScanKey;
    ///
    /// let key = ScanKey::from_literal(b"needle", false).unwrap();
    /// assert_eq!(key.anchor0, b'l');
    /// assert_eq!(key.anchor1, Some(b'e'));
    /// assert_eq!(key.anchor_offset(), 4);
    /// ```
    pub fn from_literal(literal: &[u8], nocase: bool) -> Option<Self> {
        let key = match *literal {
            [] => return None,
            [only] => Self::single(only),
            [.., a, b] => Self::double(a, b, 2),
        };
        Some(
            key.with_validation_len(literal.len())
                .with_case_insensitive(nocase),
        )
    }

    /// Set the confirmation window length.
    pub fn with_validation_len(mut self, len: usize) -> Self {
        self.validation_len = len;
        self
    }

    /// Set case-insensitive matching.
    pub fn with_case_insensitive(mut self, nocase: bool) -> Self {
        self.case_insensitive = nocase;
        self
    }

    /// Number of anchors (1 or 2).
    #[inline]
    pub fn anchor_count(&self) -> usize {
        if self.anchor1.is_some() {
            2
        } else {
            1
        }
    }

    /// Position of `anchor0` inside the confirmation window.
    ///
    /// A scan starting at `start` begins looking for `anchor0` at
    /// `start + anchor_offset()`, and a hit at offset `p` corresponds to a
    /// window starting at `p - anchor_offset()`.
    #[inline]
    pub fn anchor_offset(&self) -> usize {
        match self.anchor1 {
            None => self.validation_len.max(1) - 1,
            Some(_) => self.validation_len.saturating_sub(self.key_offset),
        }
    }

    /// Whether the consumer has to look past the anchors to accept a hit.
    ///
    /// True when the confirmation window is longer than the matched anchors,
    /// or when two anchors leave unchecked bytes between them.
    #[inline]
    pub fn needs_validation(&self) -> bool {
        match self.anchor1 {
            None => self.validation_len > 1,
            Some(_) => self.key_offset > 2 || self.validation_len > self.key_offset.max(1),
        }
    }

    /// Check the key invariants.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.anchor1.is_some() && !(1..=MAX_KEY_OFFSET).contains(&self.key_offset) {
            return Err(ScanError::InvalidKeyOffset {
                key_offset: self.key_offset,
            });
        }
        Ok(())
    }
}
