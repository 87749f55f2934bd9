//! Internal utilities for bit manipulation.
//!
//! This module contains the low-level bit scans backing [`crate::LaneMask`].
//! Most users should not need to use these directly.

pub(crate) mod broadword;
