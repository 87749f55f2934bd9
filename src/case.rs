//! ASCII case folding for anchor bytes.
//!
//! Upper- and lowercase ASCII letters differ only in bit 5 (`0x20`). A
//! case-insensitive anchor is stored with that bit cleared, and every
//! haystack lane is ANDed with `!0x20` before the equality compare, so `a`
//! and `A` both land on `A`.
//!
//! Folding is only applied to alphabetic anchors. A non-alphabetic anchor has
//! no case variant, and clearing bit 5 would make it collide with an
//! unrelated byte (`'1' & !0x20` is `0x11`, so the control byte `0x11` would
//! match too), so
//! case-insensitivity is switched off for it even when requested.

use crate::lane::LaneVector;

/// The bit that distinguishes ASCII upper and lower case.
pub const CASE_BIT: u8 = 0x20;

/// Comparison key and lane mask for one anchor byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseFold {
    key: u8,
    mask: u8,
}

impl CaseFold {
    /// Derive the fold for `byte`. `nocase` is ignored for non-alphabetic bytes.
    #[inline]
    pub const fn new(byte: u8, nocase: bool) -> Self {
        if nocase && byte.is_ascii_alphabetic() {
            Self {
                key: byte & !CASE_BIT,
                mask: !CASE_BIT,
            }
        } else {
            Self {
                key: byte,
                mask: 0xFF,
            }
        }
    }

    /// Anchor byte as compared against masked lanes.
    #[inline]
    pub const fn key(self) -> u8 {
        self.key
    }

    /// Per-lane mask applied before comparison (`0xFF` when case-sensitive).
    #[inline]
    pub const fn mask(self) -> u8 {
        self.mask
    }

    /// Whether folding is in effect after the alphabetic check.
    #[inline]
    pub const fn is_case_insensitive(self) -> bool {
        self.mask != 0xFF
    }

    /// Scalar version of the lane rule.
    #[inline]
    pub const fn matches(self, byte: u8) -> bool {
        byte & self.mask == self.key
    }

    /// Lane-replicated `(key, mask)` vectors.
    #[inline]
    pub fn vectors<V: LaneVector>(self) -> (V, V) {
        (V::splat(self.key), V::splat(self.mask))
    }
}
