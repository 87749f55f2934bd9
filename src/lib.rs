//! # Noodle
//!
//! Vectorized literal scanner for one- and two-anchor keys.
//!
//! This crate is the innermost loop of a literal prefilter: given a key of one
//! or two anchor bytes it reports every buffer offset where the key occurs,
//! comparing a whole lane vector (16, 32 or 64 bytes) per step instead of
//! walking the buffer byte by byte. Everything a full matcher does around it
//! (deriving keys from literals, confirming the rest of a literal, juggling
//! many literals at once) lives in the caller.
//!
//! ## Module Organization
//!
//! - [`lane`] - Fixed-width lane vectors and their equality bitmasks
//! - [`boundary`] - First/last differing lane within one vector compare
//! - [`case`] - ASCII case folding of anchor bytes
//! - [`key`] - The scan key table
//! - [`scan`] - Single- and double-anchor scan loops
//!
//! ## Quick Start
//!
//! ```
//! use noodle::{scan, MatchAction, ScanKey, ScanOutcome};
//!
//! let key = ScanKey::single(b'X');
//! let mut offsets = Vec::new();
//! let outcome = scan(&key, b"abcXbcXXbc", 0, &mut |offset: usize, _needs_validation: bool| {
//!     offsets.push(offset);
//!     MatchAction::Continue
//! })
//! .unwrap();
//!
//! assert_eq!(outcome, ScanOutcome::Completed);
//! assert_eq!(offsets, [3, 6, 7]);
//! ```
//!
//! ## Features
//!
//! Lane strategies (for benchmarking):
//! - Default: widest SIMD tier enabled at build time (`-C target-feature`)
//! - `portable-lanes` - Use the scalar lane vector everywhere
//! - `portable-bits` - Use broadword bit scans instead of ctz/clz intrinsics
//!
//! Other features:
//! - `tracing` - Trace-level events from the scan loops
//! - `serde` - Serialization support for [`ScanKey`]

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// Trace events compile to nothing unless the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
macro_rules! scan_trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! scan_trace {
    ($($arg:tt)*) => {};
}

// =============================================================================
// Core modules
// =============================================================================

/// Lane vectors and equality bitmasks.
pub mod lane;

/// Lane-boundary locator for vector-at-a-time comparisons.
pub mod boundary;

/// ASCII case folding of anchor bytes.
pub mod case;

/// Internal utilities (not part of public API).
#[cfg(any(test, feature = "portable-bits"))]
pub(crate) mod util;

// =============================================================================
// Scanner
// =============================================================================

/// Scan key table.
pub mod key;

/// Single- and double-anchor scan loops.
pub mod scan;

// =============================================================================
// Public re-exports
// =============================================================================

pub use boundary::{first_boundary, first_mismatch, last_boundary, last_mismatch};
pub use case::CaseFold;
pub use key::ScanKey;
pub use lane::{LaneMask, LaneVector, NativeVector, NATIVE_WIDTH};
pub use scan::{
    scan, scan_double, scan_double_with, scan_single, scan_single_with, MatchAction,
    MatchConsumer, ScanError, ScanOutcome,
};
