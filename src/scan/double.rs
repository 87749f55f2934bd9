//! Double-anchor scan loop.
//!
//! Each chunk yields two equality masks: `z1` for `anchor0` and `z2` for
//! `anchor1`. With `gap = key_offset - 1`, a hit is a lane `i` where `z2` is
//! set and `anchor0` matched `gap` lanes earlier:
//!
//! ```text
//! z = ((z1 << gap) | carry) & z2
//! ```
//!
//! Lanes shifted out of the top of `z1` belong to pairs whose `anchor1` falls
//! in the next chunk. They are kept in `carry` (the top `gap` valid lanes of
//! `z1`) and ORed into the low lanes of the next chunk. A set bit at lane `i`
//! is reported at `i - gap`, the position of `anchor0`.

use super::{report_lanes, MatchAction, MatchConsumer, ScanOutcome};
use crate::case::CaseFold;
use crate::lane::{LaneMask, LaneVector};

/// Per-scan comparison state.
struct PairMatcher<V: LaneVector> {
    key0: V,
    mask0: V,
    key1: V,
    mask1: V,
    gap: u32,
    carry: V::Mask,
}

impl<V: LaneVector> PairMatcher<V> {
    fn new(folds: [CaseFold; 2], gap: u32) -> Self {
        let (key0, mask0) = folds[0].vectors::<V>();
        let (key1, mask1) = folds[1].vectors::<V>();
        Self {
            key0,
            mask0,
            key1,
            mask1,
            gap,
            carry: V::Mask::ZERO,
        }
    }

    /// Combined mask for a chunk whose first `valid` lanes are in range, and
    /// carry update for the chunk starting `valid` bytes later.
    #[inline]
    fn step(&mut self, chars: V, valid: usize) -> V::Mask {
        let lanes = V::Mask::low_lanes(valid);
        let z1 = chars.and(self.mask0).eq_mask(self.key0) & lanes;
        let z2 = chars.and(self.mask1).eq_mask(self.key1) & lanes;
        let z = ((z1 << self.gap) | self.carry) & z2;
        self.carry = next_carry(z1, self.carry, valid as u32, self.gap);
        z
    }
}

/// Carry for the chunk that starts `consumed` lanes after the current one.
///
/// Bit `j` of the result means `anchor0` matched `gap - j` bytes before the
/// next chunk starts. When fewer than `gap` lanes were consumed, part of the
/// old carry is still pending and shifts down instead of being replaced.
#[inline]
fn next_carry<M: LaneMask>(z1: M, carry: M, consumed: u32, gap: u32) -> M {
    if gap == 0 {
        return M::ZERO;
    }
    let keep = M::low_lanes(gap as usize);
    if consumed >= gap {
        (z1 >> (consumed - gap)) & keep
    } else {
        ((carry >> consumed) | (z1 << (gap - consumed))) & keep
    }
}

/// Scan `haystack[from..]` for `anchor0` followed `gap` bytes later by
/// `anchor1`.
///
/// `from` must be inside `haystack` (checked by the caller).
pub(super) fn scan_double_main<V, C>(
    haystack: &[u8],
    from: usize,
    folds: [CaseFold; 2],
    gap: u32,
    needs_validation: bool,
    consumer: &mut C,
) -> ScanOutcome
where
    V: LaneVector,
    C: MatchConsumer + ?Sized,
{
    debug_assert!(from < haystack.len());
    debug_assert!((gap as usize) < V::WIDTH);
    let mut pairs = PairMatcher::<V>::new(folds, gap);
    let back = gap as usize;
    let w = V::WIDTH;
    let len = haystack.len();
    let mut d = from;

    if len - d >= w {
        // Reach vector aligned boundaries
        let head = haystack[d..].as_ptr().align_offset(w);
        if head != 0 && head < w {
            let z = pairs.step(V::load_unaligned(&haystack[d..]), head);
            scan_trace!(phase = "prologue", d, mask = z.to_u64());
            if report_lanes(z, d, back, needs_validation, consumer) == MatchAction::Halt {
                return ScanOutcome::Halted;
            }
            d += head;
        }

        while len - d >= w {
            let z = pairs.step(V::load_aligned(&haystack[d..d + w]), w);
            if report_lanes(z, d, back, needs_validation, consumer) == MatchAction::Halt {
                return ScanOutcome::Halted;
            }
            d += w;
        }
    }

    // finish off tail
    if d != len {
        let tail = len - d;
        let z = pairs.step(V::load_partial(&haystack[d..]), tail);
        scan_trace!(phase = "epilogue", d, tail, mask = z.to_u64());
        if report_lanes(z, d, back, needs_validation, consumer) == MatchAction::Halt {
            return ScanOutcome::Halted;
        }
    }

    ScanOutcome::Completed
}
