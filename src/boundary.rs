//! Lane-boundary locator.
//!
//! Given the equality mask of two vectors compared lane by lane, find the
//! first or last lane where they differ. A zero bit is a boundary; an
//! all-ones mask means the vectors are identical and there is no boundary in
//! this load.
//!
//! [`first_mismatch`] and [`last_mismatch`] build on these to compare two
//! byte regions a whole vector at a time, stopping inside the vector where
//! they first diverge.

use crate::lane::{LaneMask, LaneVector, NativeVector};

/// Index of the lowest zero bit of `z`, or `None` if every bit is set.
///
/// ```
/// use noodle::first_boundary;
///
/// assert_eq!(first_boundary(0xFFFFu16), None);
/// assert_eq!(first_boundary(0xFFF7u16), Some(3));
/// ```
#[inline]
pub fn first_boundary<M: LaneMask>(z: M) -> Option<u32> {
    if z == M::ALL_ONES {
        return None;
    }
    let pos = (!z).ctz();
    debug_assert!(pos < M::BITS);
    Some(pos)
}

/// Index (from the low end) of the highest zero bit of `z`, or `None` if
/// every bit is set.
///
/// ```
/// use noodle::last_boundary;
///
/// assert_eq!(last_boundary(u64::MAX), None);
/// assert_eq!(last_boundary(0x7FFF_FFFFu32), Some(31));
/// ```
#[inline]
pub fn last_boundary<M: LaneMask>(z: M) -> Option<u32> {
    if z == M::ALL_ONES {
        return None;
    }
    let pos = M::BITS - 1 - (!z).clz();
    debug_assert!(pos < M::BITS);
    Some(pos)
}

/// Index of the first byte where `a` and `b` differ.
///
/// Only the common prefix `min(a.len(), b.len())` is compared; a length
/// difference alone is not a mismatch.
#[inline]
pub fn first_mismatch(a: &[u8], b: &[u8]) -> Option<usize> {
    first_mismatch_with::<NativeVector>(a, b)
}

/// [`first_mismatch`] with an explicit lane vector.
pub fn first_mismatch_with<V: LaneVector>(a: &[u8], b: &[u8]) -> Option<usize> {
    let len = a.len().min(b.len());
    let w = V::WIDTH;
    let mut pos = 0;

    while len - pos >= w {
        let z = V::load_unaligned(&a[pos..]).eq_mask(V::load_unaligned(&b[pos..]));
        if let Some(lane) = first_boundary(z) {
            return Some(pos + lane as usize);
        }
        pos += w;
    }

    if pos != len {
        let tail = len - pos;
        // Lanes past the tail count as equal.
        let z = V::load_partial(&a[pos..len]).eq_mask(V::load_partial(&b[pos..len]))
            | !V::Mask::low_lanes(tail);
        if let Some(lane) = first_boundary(z) {
            return Some(pos + lane as usize);
        }
    }

    None
}

/// Index of the last byte where `a` and `b` differ.
///
/// Compares the common prefix `min(a.len(), b.len())`, walking backwards
/// from its end.
#[inline]
pub fn last_mismatch(a: &[u8], b: &[u8]) -> Option<usize> {
    last_mismatch_with::<NativeVector>(a, b)
}

/// [`last_mismatch`] with an explicit lane vector.
pub fn last_mismatch_with<V: LaneVector>(a: &[u8], b: &[u8]) -> Option<usize> {
    let len = a.len().min(b.len());
    let w = V::WIDTH;
    let mut end = len;

    while end >= w {
        let start = end - w;
        let z = V::load_unaligned(&a[start..]).eq_mask(V::load_unaligned(&b[start..]));
        if let Some(lane) = last_boundary(z) {
            return Some(start + lane as usize);
        }
        end = start;
    }

    if end != 0 {
        let z = V::load_partial(&a[..end]).eq_mask(V::load_partial(&b[..end]))
            | !V::Mask::low_lanes(end);
        if let Some(lane) = last_boundary(z) {
            return Some(lane as usize);
        }
    }

    None
}
