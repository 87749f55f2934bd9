//! NEON lane vector for ARM64.
//!
//! NEON has no movemask instruction, so the equality mask is rebuilt from the
//! compare result: keep the high bit of each lane, shift it to its lane index
//! within each 8-lane half, then horizontally add each half into one byte.

use core::arch::aarch64::*;

use super::LaneVector;

/// 16-lane vector backed by a NEON register.
#[derive(Clone, Copy)]
pub struct NeonVector(uint8x16_t);

/// Extract a bitmask from the high bit of each byte in a NEON vector.
/// Returns a u16 where bit i is set if byte i has its high bit set.
#[inline]
fn neon_movemask(v: uint8x16_t) -> u16 {
    // SAFETY: NEON is enabled for the whole build.
    unsafe {
        let high_bits = vshrq_n_u8::<7>(v);

        // Shift amounts: [0,1,2,3,4,5,6,7, 0,1,2,3,4,5,6,7]
        let shift_amounts: [i8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 5, 6, 7];
        let shifts = vld1q_s8(shift_amounts.as_ptr());
        let shifted = vshlq_u8(high_bits, shifts);

        let low = vaddv_u8(vget_low_u8(shifted)) as u16;
        let high = vaddv_u8(vget_high_u8(shifted)) as u16;

        low | (high << 8)
    }
}

impl LaneVector for NeonVector {
    const WIDTH: usize = 16;
    type Mask = u16;

    #[inline]
    fn splat(byte: u8) -> Self {
        unsafe { Self(vdupq_n_u8(byte)) }
    }

    #[inline]
    fn load_aligned(bytes: &[u8]) -> Self {
        // NEON loads have no alignment variants.
        debug_assert_eq!(bytes.as_ptr().align_offset(Self::WIDTH), 0);
        Self::load_unaligned(bytes)
    }

    #[inline]
    fn load_unaligned(bytes: &[u8]) -> Self {
        let bytes = &bytes[..Self::WIDTH];
        // SAFETY: 16 readable bytes.
        unsafe { Self(vld1q_u8(bytes.as_ptr())) }
    }

    #[inline]
    fn and(self, other: Self) -> Self {
        unsafe { Self(vandq_u8(self.0, other.0)) }
    }

    #[inline]
    fn eq_mask(self, other: Self) -> u16 {
        neon_movemask(unsafe { vceqq_u8(self.0, other.0) })
    }
}
