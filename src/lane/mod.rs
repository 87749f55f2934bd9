//! Fixed-width lane vectors.
//!
//! A lane vector holds 16, 32 or 64 bytes ("lanes") that are compared in
//! parallel. Every implementation produces the same [`LaneMask`] for the same
//! bytes, so the scan loops are written once against [`LaneVector`] and
//! instantiated per hardware tier.
//!
//! | Type             | Lanes | Availability                              |
//! |------------------|-------|-------------------------------------------|
//! | [`Portable16`]   | 16    | everywhere                                |
//! | [`Portable32`]   | 32    | everywhere                                |
//! | [`Portable64`]   | 64    | everywhere                                |
//! | `Sse2Vector`     | 16    | x86_64                                    |
//! | `Avx2Vector`     | 32    | x86_64 built with `avx2`                  |
//! | `Avx512Vector`   | 64    | x86_64 built with `avx512f` + `avx512bw`  |
//! | `NeonVector`     | 16    | aarch64 built with `neon`                 |
//!
//! The width used by [`crate::scan`] is fixed at build time through
//! [`NativeVector`]; there is no per-call dispatch.

mod mask;
mod portable;

#[cfg(target_arch = "x86_64")]
mod x86;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;

pub use mask::LaneMask;
pub use portable::{Portable16, Portable32, Portable64, PortableVector};

#[cfg(target_arch = "x86_64")]
pub use x86::Sse2Vector;

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub use x86::Avx2Vector;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx512f",
    target_feature = "avx512bw"
))]
pub use x86::Avx512Vector;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use neon::NeonVector;

/// Widest lane count of any implementation.
pub const MAX_LANES: usize = 64;

/// A fixed-width vector of byte lanes.
///
/// Loads take slices rather than raw pointers: a load panics if fewer than
/// `WIDTH` bytes are available, the same way slice indexing does, and never
/// reads past the slice. Short tails go through [`LaneVector::load_partial`].
pub trait LaneVector: Copy {
    /// Number of byte lanes.
    const WIDTH: usize;

    /// Equality bitmask type (one bit per lane).
    type Mask: LaneMask;

    /// Vector with `byte` in every lane.
    fn splat(byte: u8) -> Self;

    /// Load `WIDTH` bytes from a `WIDTH`-aligned address.
    ///
    /// Misaligned input is still read correctly (via an unaligned load) but
    /// trips a debug assertion, since it means the caller lost track of
    /// alignment.
    fn load_aligned(bytes: &[u8]) -> Self;

    /// Load `WIDTH` bytes from any address.
    fn load_unaligned(bytes: &[u8]) -> Self;

    /// Load up to `WIDTH` bytes; missing lanes are zero.
    ///
    /// The bytes are staged in a zeroed stack block first, so this never
    /// touches memory outside `bytes`. Callers mask off the zero lanes.
    #[inline]
    fn load_partial(bytes: &[u8]) -> Self {
        let n = bytes.len().min(Self::WIDTH);
        let mut block = [0u8; MAX_LANES];
        block[..n].copy_from_slice(&bytes[..n]);
        Self::load_unaligned(&block[..Self::WIDTH])
    }

    /// Lane-wise bitwise AND.
    fn and(self, other: Self) -> Self;

    /// Bit `i` set where lane `i` of `self` equals lane `i` of `other`.
    fn eq_mask(self, other: Self) -> Self::Mask;
}

// =============================================================================
// Build-time width selection
// =============================================================================

/// Lane vector used by the non-generic entry points.
#[cfg(feature = "portable-lanes")]
pub type NativeVector = Portable16;

#[cfg(all(
    not(feature = "portable-lanes"),
    target_arch = "x86_64",
    target_feature = "avx512f",
    target_feature = "avx512bw"
))]
pub type NativeVector = Avx512Vector;

#[cfg(all(
    not(feature = "portable-lanes"),
    target_arch = "x86_64",
    target_feature = "avx2",
    not(all(target_feature = "avx512f", target_feature = "avx512bw"))
))]
pub type NativeVector = Avx2Vector;

#[cfg(all(
    not(feature = "portable-lanes"),
    target_arch = "x86_64",
    not(target_feature = "avx2"),
    not(all(target_feature = "avx512f", target_feature = "avx512bw"))
))]
pub type NativeVector = Sse2Vector;

#[cfg(all(
    not(feature = "portable-lanes"),
    target_arch = "aarch64",
    target_feature = "neon"
))]
pub type NativeVector = NeonVector;

// Fallback to portable lanes for non-SIMD platforms (e.g., 32-bit x86, WASM, etc.)
#[cfg(all(
    not(feature = "portable-lanes"),
    not(target_arch = "x86_64"),
    not(all(target_arch = "aarch64", target_feature = "neon"))
))]
pub type NativeVector = Portable16;

/// Lane count of [`NativeVector`].
pub const NATIVE_WIDTH: usize = <NativeVector as LaneVector>::WIDTH;
