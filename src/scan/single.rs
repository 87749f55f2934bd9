//! Single-anchor scan loop.

use super::{report_lanes, MatchAction, MatchConsumer, ScanOutcome};
use crate::case::CaseFold;
use crate::lane::{LaneMask, LaneVector};

/// Scan `haystack[from..]` for one anchor byte.
///
/// `from` must be inside `haystack` (checked by the caller).
pub(super) fn scan_single_main<V, C>(
    haystack: &[u8],
    from: usize,
    fold: CaseFold,
    needs_validation: bool,
    consumer: &mut C,
) -> ScanOutcome
where
    V: LaneVector,
    C: MatchConsumer + ?Sized,
{
    debug_assert!(from < haystack.len());
    let (key, case_mask) = fold.vectors::<V>();
    let w = V::WIDTH;
    let len = haystack.len();
    let mut d = from;

    if len - d >= w {
        // Reach vector aligned boundaries
        let head = haystack[d..].as_ptr().align_offset(w);
        if head != 0 && head < w {
            let chars = V::load_unaligned(&haystack[d..]).and(case_mask);
            let z = chars.eq_mask(key) & V::Mask::low_lanes(head);
            scan_trace!(phase = "prologue", d, mask = z.to_u64());
            if report_lanes(z, d, 0, needs_validation, consumer) == MatchAction::Halt {
                return ScanOutcome::Halted;
            }
            d += head;
        }

        while len - d >= w {
            let chars = V::load_aligned(&haystack[d..d + w]).and(case_mask);
            let z = chars.eq_mask(key);
            if report_lanes(z, d, 0, needs_validation, consumer) == MatchAction::Halt {
                return ScanOutcome::Halted;
            }
            d += w;
        }
    }

    // finish off tail
    if d != len {
        let tail = len - d;
        let chars = V::load_partial(&haystack[d..]).and(case_mask);
        let z = chars.eq_mask(key) & V::Mask::low_lanes(tail);
        scan_trace!(phase = "epilogue", d, tail, mask = z.to_u64());
        if report_lanes(z, d, 0, needs_validation, consumer) == MatchAction::Halt {
            return ScanOutcome::Halted;
        }
    }

    ScanOutcome::Completed
}
