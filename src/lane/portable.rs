//! Portable scalar lane vectors.
//!
//! Plain byte arrays with the same bit semantics as the SIMD tiers. Used on
//! targets without a supported instruction set, with the `portable-lanes`
//! feature, and as the reference in tests.

use super::LaneVector;

/// Scalar lane vector of `N` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortableVector<const N: usize>([u8; N]);

/// 16 lanes, `u16` masks.
pub type Portable16 = PortableVector<16>;

/// 32 lanes, `u32` masks.
pub type Portable32 = PortableVector<32>;

/// 64 lanes, `u64` masks.
pub type Portable64 = PortableVector<64>;

impl<const N: usize> PortableVector<N> {
    #[inline]
    fn from_slice(bytes: &[u8]) -> Self {
        let mut lanes = [0u8; N];
        lanes.copy_from_slice(&bytes[..N]);
        Self(lanes)
    }
}

macro_rules! impl_portable {
    ($n:literal, $mask:ty) => {
        impl LaneVector for PortableVector<$n> {
            const WIDTH: usize = $n;
            type Mask = $mask;

            #[inline]
            fn splat(byte: u8) -> Self {
                Self([byte; $n])
            }

            #[inline]
            fn load_aligned(bytes: &[u8]) -> Self {
                debug_assert_eq!(bytes.as_ptr().align_offset($n), 0);
                Self::from_slice(bytes)
            }

            #[inline]
            fn load_unaligned(bytes: &[u8]) -> Self {
                Self::from_slice(bytes)
            }

            #[inline]
            fn and(self, other: Self) -> Self {
                let mut lanes = self.0;
                for (lane, rhs) in lanes.iter_mut().zip(other.0) {
                    *lane &= rhs;
                }
                Self(lanes)
            }

            #[inline]
            fn eq_mask(self, other: Self) -> $mask {
                let mut mask: $mask = 0;
                for i in 0..$n {
                    mask |= ((self.0[i] == other.0[i]) as $mask) << i;
                }
                mask
            }
        }
    };
}

impl_portable!(16, u16);
impl_portable!(32, u32);
impl_portable!(64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_mask_bit_order() {
        let mut bytes = [b'.'; 16];
        bytes[0] = b'x';
        bytes[9] = b'x';
        bytes[15] = b'x';
        let v = Portable16::load_unaligned(&bytes);
        assert_eq!(v.eq_mask(Portable16::splat(b'x')), 0b1000_0010_0000_0001);
    }

    #[test]
    fn test_eq_mask_all_lanes() {
        let v = Portable64::splat(7);
        assert_eq!(v.eq_mask(Portable64::splat(7)), u64::MAX);
        assert_eq!(v.eq_mask(Portable64::splat(8)), 0);
    }

    #[test]
    fn test_and_clears_case_bit() {
        let v = Portable32::load_unaligned(b"aAbBzZ09aAbBzZ09aAbBzZ09aAbBzZ09");
        let folded = v.and(Portable32::splat(0xDF));
        let mask = folded.eq_mask(Portable32::splat(b'A'));
        assert_eq!(mask & 0xFF, 0b0000_0011);
    }

    #[test]
    fn test_load_reads_only_width() {
        let bytes: Vec<u8> = (0..40).collect();
        let v = Portable32::load_unaligned(&bytes[3..]);
        assert_eq!(v.eq_mask(Portable32::splat(3)), 1);
        assert_eq!(v.eq_mask(Portable32::splat(34)), 1 << 31);
        assert_eq!(v.eq_mask(Portable32::splat(35)), 0);
    }
}
