//! Single- and double-anchor scan loops.
//!
//! Both loops walk the buffer in three phases:
//!
//! 1. **Prologue**: one unaligned load up to the next `WIDTH`-aligned
//!    address, masked to the bytes before that boundary.
//! 2. **Main**: aligned full-width loads.
//! 3. **Epilogue**: the remaining tail (fewer than `WIDTH` bytes), loaded
//!    through a zero-filled block and masked to the valid lanes.
//!
//! A buffer shorter than one vector skips straight to the epilogue. Every
//! set bit of the resulting equality mask is reported to a [`MatchConsumer`]
//! in increasing offset order; the consumer can halt the scan at any hit,
//! after which no further bytes are loaded.
//!
//! The vector width is fixed at build time ([`NativeVector`]); the `_with`
//! variants take it as a type parameter instead.

mod double;
mod error;
mod single;

pub use error::ScanError;

use crate::case::CaseFold;
use crate::key::ScanKey;
use crate::lane::{LaneMask, LaneVector, NativeVector};

/// Consumer's verdict after a reported hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    /// Keep scanning.
    Continue,
    /// Stop the scan now.
    Halt,
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The whole buffer was scanned.
    Completed,
    /// The consumer returned [`MatchAction::Halt`].
    Halted,
}

/// Receives candidate offsets from a scan.
///
/// `offset` is the absolute buffer position of `anchor0`.
/// `needs_validation` is set when the key's confirmation window extends past
/// the anchors the scanner checked, so the hit is only a candidate.
pub trait MatchConsumer {
    fn on_match(&mut self, offset: usize, needs_validation: bool) -> MatchAction;
}

impl<F> MatchConsumer for F
where
    F: FnMut(usize, bool) -> MatchAction,
{
    #[inline]
    fn on_match(&mut self, offset: usize, needs_validation: bool) -> MatchAction {
        self(offset, needs_validation)
    }
}

/// Scan `haystack` from `start` for `key`, choosing the single- or
/// double-anchor loop by the key's anchor count.
pub fn scan<C>(
    key: &ScanKey,
    haystack: &[u8],
    start: usize,
    consumer: &mut C,
) -> Result<ScanOutcome, ScanError>
where
    C: MatchConsumer + ?Sized,
{
    if key.anchor1.is_some() {
        scan_double(key, haystack, start, consumer)
    } else {
        scan_single(key, haystack, start, consumer)
    }
}

/// Report every offset holding the key's single anchor.
///
/// The first byte examined is `start + key.anchor_offset()`, which must lie
/// inside `haystack`.
#[inline]
pub fn scan_single<C>(
    key: &ScanKey,
    haystack: &[u8],
    start: usize,
    consumer: &mut C,
) -> Result<ScanOutcome, ScanError>
where
    C: MatchConsumer + ?Sized,
{
    scan_single_with::<NativeVector, C>(key, haystack, start, consumer)
}

/// [`scan_single`] with an explicit lane vector.
pub fn scan_single_with<V, C>(
    key: &ScanKey,
    haystack: &[u8],
    start: usize,
    consumer: &mut C,
) -> Result<ScanOutcome, ScanError>
where
    V: LaneVector,
    C: MatchConsumer + ?Sized,
{
    if key.anchor1.is_some() {
        return Err(ScanError::UnexpectedSecondAnchor);
    }
    let from = scan_origin(key, haystack, start)?;

    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("scan_single", width = V::WIDTH, len = haystack.len(), from)
        .entered();

    let fold = CaseFold::new(key.anchor0, key.case_insensitive);
    Ok(single::scan_single_main::<V, C>(
        haystack,
        from,
        fold,
        key.needs_validation(),
        consumer,
    ))
}

/// Report every offset `i` where `anchor0` sits at `i` and `anchor1` at
/// `i + key_offset - 1`.
///
/// The first `anchor0` position examined is `start + key.anchor_offset()`,
/// which must lie inside `haystack`.
#[inline]
pub fn scan_double<C>(
    key: &ScanKey,
    haystack: &[u8],
    start: usize,
    consumer: &mut C,
) -> Result<ScanOutcome, ScanError>
where
    C: MatchConsumer + ?Sized,
{
    scan_double_with::<NativeVector, C>(key, haystack, start, consumer)
}

/// [`scan_double`] with an explicit lane vector.
pub fn scan_double_with<V, C>(
    key: &ScanKey,
    haystack: &[u8],
    start: usize,
    consumer: &mut C,
) -> Result<ScanOutcome, ScanError>
where
    V: LaneVector,
    C: MatchConsumer + ?Sized,
{
    let anchor1 = key.anchor1.ok_or(ScanError::MissingSecondAnchor)?;
    key.validate()?;
    let from = scan_origin(key, haystack, start)?;

    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!(
        "scan_double",
        width = V::WIDTH,
        len = haystack.len(),
        from,
        key_offset = key.key_offset
    )
    .entered();

    let folds = [
        CaseFold::new(key.anchor0, key.case_insensitive),
        CaseFold::new(anchor1, key.case_insensitive),
    ];
    Ok(double::scan_double_main::<V, C>(
        haystack,
        from,
        folds,
        (key.key_offset - 1) as u32,
        key.needs_validation(),
        consumer,
    ))
}

/// First byte the scan reads, checked against the buffer.
fn scan_origin(key: &ScanKey, haystack: &[u8], start: usize) -> Result<usize, ScanError> {
    let position = start.saturating_add(key.anchor_offset());
    if position >= haystack.len() {
        return Err(ScanError::StartOutOfBounds {
            position,
            len: haystack.len(),
        });
    }
    Ok(position)
}

/// Report each set lane of `z`, lowest first.
///
/// Lane `i` maps to offset `base + i - back`; `back` is the anchor distance
/// for double-anchor masks (which mark `anchor1`) and zero otherwise.
#[inline]
fn report_lanes<M, C>(
    mut z: M,
    base: usize,
    back: usize,
    needs_validation: bool,
    consumer: &mut C,
) -> MatchAction
where
    M: LaneMask,
    C: MatchConsumer + ?Sized,
{
    while !z.is_zero() {
        let lane = z.find_and_clear_lsb() as usize;
        let offset = base + lane - back;
        scan_trace!(offset, needs_validation, "candidate");
        if consumer.on_match(offset, needs_validation) == MatchAction::Halt {
            scan_trace!(offset, "halted by consumer");
            return MatchAction::Halt;
        }
    }
    MatchAction::Continue
}
