//! x86_64 SIMD lane vectors.
//!
//! - SSE2: 16 lanes, always available on x86_64
//! - AVX2: 32 lanes, requires building with `-C target-feature=+avx2`
//! - AVX-512: 64 lanes, requires `avx512f` and `avx512bw` at build time
//!
//! The tier is a build-time decision (see [`crate::lane::NativeVector`]), so
//! these types only exist when their instructions are statically enabled and
//! the intrinsics below can never run on a CPU that lacks them.

use core::arch::x86_64::*;

use super::LaneVector;

// =============================================================================
// SSE2 (16 lanes)
// =============================================================================

/// 16-lane vector backed by an SSE2 register.
#[derive(Clone, Copy)]
pub struct Sse2Vector(__m128i);

impl LaneVector for Sse2Vector {
    const WIDTH: usize = 16;
    type Mask = u16;

    #[inline]
    fn splat(byte: u8) -> Self {
        // SAFETY: SSE2 is part of the x86_64 baseline.
        unsafe { Self(_mm_set1_epi8(byte as i8)) }
    }

    #[inline]
    fn load_aligned(bytes: &[u8]) -> Self {
        let bytes = &bytes[..Self::WIDTH];
        if bytes.as_ptr().align_offset(Self::WIDTH) != 0 {
            debug_assert!(false, "misaligned 16-byte load");
            return Self::load_unaligned(bytes);
        }
        // SAFETY: 16 readable bytes at a 16-byte aligned address.
        unsafe { Self(_mm_load_si128(bytes.as_ptr() as *const __m128i)) }
    }

    #[inline]
    fn load_unaligned(bytes: &[u8]) -> Self {
        let bytes = &bytes[..Self::WIDTH];
        // SAFETY: 16 readable bytes, no alignment requirement.
        unsafe { Self(_mm_loadu_si128(bytes.as_ptr() as *const __m128i)) }
    }

    #[inline]
    fn and(self, other: Self) -> Self {
        unsafe { Self(_mm_and_si128(self.0, other.0)) }
    }

    #[inline]
    fn eq_mask(self, other: Self) -> u16 {
        unsafe { _mm_movemask_epi8(_mm_cmpeq_epi8(self.0, other.0)) as u16 }
    }
}

// =============================================================================
// AVX2 (32 lanes)
// =============================================================================

/// 32-lane vector backed by an AVX2 register.
#[cfg(target_feature = "avx2")]
#[derive(Clone, Copy)]
pub struct Avx2Vector(__m256i);

#[cfg(target_feature = "avx2")]
impl LaneVector for Avx2Vector {
    const WIDTH: usize = 32;
    type Mask = u32;

    #[inline]
    fn splat(byte: u8) -> Self {
        // SAFETY: AVX2 is enabled for the whole build.
        unsafe { Self(_mm256_set1_epi8(byte as i8)) }
    }

    #[inline]
    fn load_aligned(bytes: &[u8]) -> Self {
        let bytes = &bytes[..Self::WIDTH];
        if bytes.as_ptr().align_offset(Self::WIDTH) != 0 {
            debug_assert!(false, "misaligned 32-byte load");
            return Self::load_unaligned(bytes);
        }
        // SAFETY: 32 readable bytes at a 32-byte aligned address.
        unsafe { Self(_mm256_load_si256(bytes.as_ptr() as *const __m256i)) }
    }

    #[inline]
    fn load_unaligned(bytes: &[u8]) -> Self {
        let bytes = &bytes[..Self::WIDTH];
        // SAFETY: 32 readable bytes, no alignment requirement.
        unsafe { Self(_mm256_loadu_si256(bytes.as_ptr() as *const __m256i)) }
    }

    #[inline]
    fn and(self, other: Self) -> Self {
        unsafe { Self(_mm256_and_si256(self.0, other.0)) }
    }

    #[inline]
    fn eq_mask(self, other: Self) -> u32 {
        unsafe { _mm256_movemask_epi8(_mm256_cmpeq_epi8(self.0, other.0)) as u32 }
    }
}

// =============================================================================
// AVX-512 (64 lanes)
// =============================================================================

/// 64-lane vector backed by an AVX-512 register.
///
/// The byte compare writes straight into a mask register, so no movemask
/// step is needed.
#[cfg(all(target_feature = "avx512f", target_feature = "avx512bw"))]
#[derive(Clone, Copy)]
pub struct Avx512Vector(__m512i);

#[cfg(all(target_feature = "avx512f", target_feature = "avx512bw"))]
impl LaneVector for Avx512Vector {
    const WIDTH: usize = 64;
    type Mask = u64;

    #[inline]
    fn splat(byte: u8) -> Self {
        // SAFETY: AVX-512F/BW are enabled for the whole build.
        unsafe { Self(_mm512_set1_epi8(byte as i8)) }
    }

    #[inline]
    fn load_aligned(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.as_ptr().align_offset(Self::WIDTH), 0);
        // Unaligned loads cost the same as aligned ones on aligned addresses.
        Self::load_unaligned(bytes)
    }

    #[inline]
    fn load_unaligned(bytes: &[u8]) -> Self {
        let bytes = &bytes[..Self::WIDTH];
        // SAFETY: 64 readable bytes, no alignment requirement.
        unsafe { Self(_mm512_loadu_epi8(bytes.as_ptr() as *const i8)) }
    }

    #[inline]
    fn and(self, other: Self) -> Self {
        unsafe { Self(_mm512_and_si512(self.0, other.0)) }
    }

    #[inline]
    fn eq_mask(self, other: Self) -> u64 {
        unsafe { _mm512_cmpeq_epi8_mask(self.0, other.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::check_against_portable;
    use super::super::{Portable16, MAX_LANES};
    use super::*;

    #[test]
    fn test_sse2_matches_portable() {
        check_against_portable::<Sse2Vector, Portable16>();
    }

    #[test]
    fn test_sse2_movemask_bit_order() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0xFF;
        bytes[15] = 0xFF;
        let v = Sse2Vector::load_unaligned(&bytes);
        assert_eq!(v.eq_mask(Sse2Vector::splat(0xFF)), 0x8001);
    }

    #[test]
    fn test_sse2_load_aligned() {
        #[repr(align(64))]
        struct Block([u8; MAX_LANES]);

        let block = Block([b'k'; MAX_LANES]);
        let v = Sse2Vector::load_aligned(&block.0[16..]);
        assert_eq!(v.eq_mask(Sse2Vector::splat(b'k')), 0xFFFF);
    }

    #[cfg(target_feature = "avx2")]
    #[test]
    fn test_avx2_matches_portable() {
        check_against_portable::<Avx2Vector, super::super::Portable32>();
    }

    #[cfg(all(target_feature = "avx512f", target_feature = "avx512bw"))]
    #[test]
    fn test_avx512_matches_portable() {
        check_against_portable::<Avx512Vector, super::super::Portable64>();
    }
}
