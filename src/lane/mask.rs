//! Equality bitmasks, one bit per byte lane.
//!
//! A mask is as wide as the vector that produced it: `u16` for 16 lanes,
//! `u32` for 32, `u64` for 64. Bit `i` describes lane `i`.

use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, Not, Shl, Shr};

/// Bitmask produced by a lane-wise vector comparison.
///
/// Bit scans are backed by the `ctz`/`clz` intrinsics unless the
/// `portable-bits` feature selects the broadword versions. Both give the same
/// 0-based results, and report `BITS` for an all-zero mask.
pub trait LaneMask:
    Copy
    + Eq
    + Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// Number of lanes (bits) in the mask.
    const BITS: u32;

    /// No lane set.
    const ZERO: Self;

    /// Every lane set. Marks "no boundary" for the boundary locator.
    const ALL_ONES: Self;

    /// Partial-load mask with the low `n` lanes set.
    ///
    /// `n` is clamped to `BITS`.
    fn low_lanes(n: usize) -> Self;

    /// Count trailing zero bits (`BITS` when zero).
    fn ctz(self) -> u32;

    /// Count leading zero bits (`BITS` when zero).
    fn clz(self) -> u32;

    /// Widen to `u64` (for tracing and tests).
    fn to_u64(self) -> u64;

    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Index of the lowest set bit, clearing that bit.
    ///
    /// The mask must not be zero.
    #[inline]
    fn find_and_clear_lsb(&mut self) -> u32 {
        debug_assert!(!self.is_zero());
        let pos = self.ctz();
        *self = *self & !(Self::low_lanes(1) << pos);
        pos
    }
}

macro_rules! impl_lane_mask {
    ($ty:ty) => {
        impl LaneMask for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const ALL_ONES: Self = <$ty>::MAX;

            #[inline]
            fn low_lanes(n: usize) -> Self {
                if n >= Self::BITS as usize {
                    Self::ALL_ONES
                } else {
                    ((1 as $ty) << n) - 1
                }
            }

            #[cfg(not(feature = "portable-bits"))]
            #[inline]
            fn ctz(self) -> u32 {
                self.trailing_zeros()
            }

            #[cfg(feature = "portable-bits")]
            #[inline]
            fn ctz(self) -> u32 {
                crate::util::broadword::ctz64(self as u64).min(Self::BITS)
            }

            #[cfg(not(feature = "portable-bits"))]
            #[inline]
            fn clz(self) -> u32 {
                self.leading_zeros()
            }

            #[cfg(feature = "portable-bits")]
            #[inline]
            fn clz(self) -> u32 {
                crate::util::broadword::clz64(self as u64) - (64 - Self::BITS)
            }

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    };
}

impl_lane_mask!(u16);
impl_lane_mask!(u32);
impl_lane_mask!(u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_lanes() {
        assert_eq!(<u16 as LaneMask>::low_lanes(0), 0);
        assert_eq!(<u16 as LaneMask>::low_lanes(5), 0b1_1111);
        assert_eq!(<u16 as LaneMask>::low_lanes(16), 0xFFFF);
        assert_eq!(<u16 as LaneMask>::low_lanes(40), 0xFFFF);
        assert_eq!(<u32 as LaneMask>::low_lanes(31), 0x7FFF_FFFF);
        assert_eq!(<u64 as LaneMask>::low_lanes(64), u64::MAX);
        assert_eq!(<u64 as LaneMask>::low_lanes(63), u64::MAX >> 1);
    }

    #[test]
    fn test_bit_scans_on_zero() {
        assert_eq!(LaneMask::ctz(0u16), 16);
        assert_eq!(LaneMask::clz(0u16), 16);
        assert_eq!(LaneMask::ctz(0u32), 32);
        assert_eq!(LaneMask::clz(0u32), 32);
        assert_eq!(LaneMask::ctz(0u64), 64);
        assert_eq!(LaneMask::clz(0u64), 64);
    }

    #[test]
    fn test_bit_scans() {
        assert_eq!(LaneMask::ctz(0b1000u16), 3);
        assert_eq!(LaneMask::clz(0b1000u16), 12);
        assert_eq!(LaneMask::clz(0x8000_0000u32), 0);
        assert_eq!(LaneMask::ctz(1u64 << 63), 63);
    }

    #[test]
    fn test_find_and_clear_lsb_walks_in_order() {
        let mut z: u32 = 0b1001_0110;
        let mut seen = Vec::new();
        while !z.is_zero() {
            seen.push(z.find_and_clear_lsb());
        }
        assert_eq!(seen, [1, 2, 4, 7]);
        assert_eq!(z, 0);
    }

    #[test]
    fn test_find_and_clear_lsb_top_lane() {
        let mut z: u64 = 1 << 63;
        assert_eq!(z.find_and_clear_lsb(), 63);
        assert!(z.is_zero());
    }
}
