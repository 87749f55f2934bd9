//! Broadword (SWAR) bit scans.
//!
//! Portable replacements for the `trailing_zeros` / `leading_zeros`
//! intrinsics, selected with the `portable-bits` feature. Results are
//! identical to the intrinsic versions for every input, including zero.

const L8: u64 = 0x0101_0101_0101_0101;
const M1: u64 = 0x5555_5555_5555_5555;
const M2: u64 = 0x3333_3333_3333_3333;
const M4: u64 = 0x0F0F_0F0F_0F0F_0F0F;

/// Population count using the classic SWAR reduction.
#[inline]
pub(crate) const fn popcount64(x: u64) -> u32 {
    let x = x - ((x >> 1) & M1);
    let x = (x & M2) + ((x >> 2) & M2);
    let x = (x + (x >> 4)) & M4;
    (x.wrapping_mul(L8) >> 56) as u32
}

/// Count trailing zero bits. Returns 64 for zero.
#[inline]
pub(crate) const fn ctz64(x: u64) -> u32 {
    if x == 0 {
        return 64;
    }
    // Isolate the lowest set bit, turn everything below it into ones.
    popcount64((x & x.wrapping_neg()) - 1)
}

/// Count leading zero bits. Returns 64 for zero.
#[inline]
pub(crate) const fn clz64(x: u64) -> u32 {
    // Smear the highest set bit downwards, then count what is left.
    let mut x = x;
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x |= x >> 16;
    x |= x >> 32;
    64 - popcount64(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popcount64() {
        assert_eq!(popcount64(0), 0);
        assert_eq!(popcount64(u64::MAX), 64);
        assert_eq!(popcount64(0xAAAA_AAAA_AAAA_AAAA), 32);
        assert_eq!(popcount64(1 << 63), 1);
    }

    #[test]
    fn test_ctz64_matches_intrinsic() {
        for shift in 0..64 {
            let x = 1u64 << shift;
            assert_eq!(ctz64(x), x.trailing_zeros());
            assert_eq!(ctz64(x | (x << 1)), x.trailing_zeros());
        }
        assert_eq!(ctz64(0), 64);
    }

    #[test]
    fn test_clz64_matches_intrinsic() {
        for shift in 0..64 {
            let x = 1u64 << shift;
            assert_eq!(clz64(x), x.leading_zeros());
            assert_eq!(clz64(x | 1), x.leading_zeros());
        }
        assert_eq!(clz64(0), 64);
    }
}
