//! Core types for segment-scoped version lookup

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Dense document position within a segment (0..slot_count)
///
/// Slots are assigned in write order and never reordered, so a higher slot
/// is always a later write. Duplicate-identifier resolution relies on this
/// ordering, not on version values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot(pub u32);

impl Slot {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document version for optimistic locking
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(pub u64);

impl Version {
    pub fn new(v: u64) -> Self {
        Self(v)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of one in-memory segment instance
///
/// Allocated at segment construction and never reused within the process.
/// Two segments with identical content still carry distinct keys, so a
/// reopened segment can never inherit a stale cached lookup structure.
/// Keys are process-local and must not be persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentKey(u64);

static NEXT_SEGMENT_KEY: AtomicU64 = AtomicU64::new(0);

impl SegmentKey {
    /// Allocate a fresh key. Called once per segment constructed.
    pub fn allocate() -> Self {
        Self(NEXT_SEGMENT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
