//! Identifier field representations
//!
//! A segment exposes its identifier field in one of two shapes:
//!
//! - a sorted enumeration of distinct identifiers, each with its occurrence
//!   slots (the general case; duplicates arise when a document is rewritten
//!   inside one write buffer before it is frozen), or
//! - a direct map guaranteeing one slot per identifier (stores that dedupe
//!   at write time).
//!
//! The lookup layer branches on this shape exactly once, when its per-segment
//! structure is built.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::segment::types::Slot;

/// One slot per identifier, point lookups without an ordered dictionary
pub type DirectIdMap = HashMap<Vec<u8>, Slot>;

/// Whole-field view of a segment's identifier field, consumed once at
/// lookup-structure build time
pub enum IdentifierSource<'a> {
    /// Distinct identifiers in strictly ascending byte order, each with its
    /// occurrence slots in ascending slot order.
    Sorted(Box<dyn Iterator<Item = (&'a [u8], &'a [Slot])> + 'a>),
    /// Direct one-slot-per-identifier map, shared with the segment.
    Direct(Arc<DirectIdMap>),
}

/// Sorted identifier column for in-memory segments
///
/// Entries are distinct identifier values in ascending byte order; each
/// carries its occurrence slots ascending (slot order is write order).
#[derive(Clone, Debug, Default)]
pub struct SortedIdColumn {
    entries: Vec<IdEntry>,
}

#[derive(Clone, Debug)]
struct IdEntry {
    value: Vec<u8>,
    slots: Vec<Slot>,
}

impl SortedIdColumn {
    /// Group identifiers appearing in write order: the i-th element becomes
    /// slot i's identifier.
    pub fn from_write_order<I, B>(ids: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let mut grouped: BTreeMap<Vec<u8>, Vec<Slot>> = BTreeMap::new();
        for (slot, id) in ids.into_iter().enumerate() {
            grouped
                .entry(id.into())
                .or_default()
                .push(Slot::new(slot as u32));
        }
        let entries = grouped
            .into_iter()
            .map(|(value, slots)| IdEntry { value, slots })
            .collect();
        Self { entries }
    }

    /// Iterate `(identifier, occurrence slots)` in ascending identifier
    /// order, slots ascending within each entry.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[Slot])> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.value.as_slice(), entry.slots.as_slice()))
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
