//! Segment abstraction and the in-memory segment
//!
//! The lookup layer reads segments through the [`Segment`] trait and never
//! mutates them. `MemorySegment` is the crate's own immutable segment,
//! assembled by `MemorySegmentBuilder` from documents in write order.

use std::sync::Arc;

use crate::error::{Result, VerdexError};
use crate::segment::ident::{DirectIdMap, IdentifierSource, SortedIdColumn};
use crate::segment::types::{SegmentKey, Slot, Version};
use crate::segment::versions::VersionColumn;

/// An immutable, fully built container of documents
///
/// Contract:
/// - slots are dense, zero-based, assigned in write order and never
///   reordered after the segment is frozen;
/// - the identifier field and the version field describe the same slots;
/// - nothing reachable from `&self` changes after construction. Deletions
///   live outside the segment, in [`LiveDocs`](crate::segment::LiveDocs).
pub trait Segment: Send + Sync {
    /// Identity of this segment instance; the lookup-cache key.
    fn key(&self) -> SegmentKey;

    /// Number of document slots.
    fn slot_count(&self) -> u32;

    /// One-pass view of the identifier field.
    fn identifiers(&self) -> IdentifierSource<'_>;

    /// Version at `slot`, `None` when the version field has no value there.
    fn version(&self, slot: Slot) -> Option<Version>;
}

#[derive(Debug)]
enum IdColumn {
    Sorted(SortedIdColumn),
    Direct(Arc<DirectIdMap>),
}

/// Immutable in-memory segment
#[derive(Debug)]
pub struct MemorySegment {
    key: SegmentKey,
    slot_count: u32,
    ids: IdColumn,
    versions: VersionColumn,
}

impl MemorySegment {
    /// Assemble a segment from pre-built columns.
    ///
    /// The columns are taken as given; if they disagree about which slots
    /// exist, lookups surface that as
    /// [`InconsistentSegment`](VerdexError::InconsistentSegment).
    pub fn from_parts(ids: SortedIdColumn, versions: VersionColumn, slot_count: u32) -> Self {
        Self {
            key: SegmentKey::allocate(),
            slot_count,
            ids: IdColumn::Sorted(ids),
            versions,
        }
    }

    /// Number of distinct identifiers.
    pub fn distinct_ids(&self) -> usize {
        match &self.ids {
            IdColumn::Sorted(column) => column.len(),
            IdColumn::Direct(map) => map.len(),
        }
    }
}

impl Segment for MemorySegment {
    fn key(&self) -> SegmentKey {
        self.key
    }

    fn slot_count(&self) -> u32 {
        self.slot_count
    }

    fn identifiers(&self) -> IdentifierSource<'_> {
        match &self.ids {
            IdColumn::Sorted(column) => IdentifierSource::Sorted(Box::new(column.iter())),
            IdColumn::Direct(map) => IdentifierSource::Direct(Arc::clone(map)),
        }
    }

    fn version(&self, slot: Slot) -> Option<Version> {
        self.versions.get(slot)
    }
}

/// Builder accumulating documents in write order
#[derive(Default)]
pub struct MemorySegmentBuilder {
    ids: Vec<Vec<u8>>,
    versions: VersionColumn,
}

impl MemorySegmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and return the slot it was assigned.
    pub fn append(&mut self, id: impl Into<Vec<u8>>, version: Version) -> Slot {
        let slot = Slot::new(self.ids.len() as u32);
        self.ids.push(id.into());
        self.versions.push(Some(version));
        slot
    }

    /// Number of documents appended so far.
    pub fn doc_count(&self) -> u32 {
        self.ids.len() as u32
    }

    /// Freeze into a segment with the sorted identifier encoding.
    /// Duplicate identifiers keep every occurrence.
    pub fn build(self) -> MemorySegment {
        let slot_count = self.ids.len() as u32;
        MemorySegment {
            key: SegmentKey::allocate(),
            slot_count,
            ids: IdColumn::Sorted(SortedIdColumn::from_write_order(self.ids)),
            versions: self.versions,
        }
    }

    /// Freeze into a segment with the direct one-slot-per-identifier
    /// encoding. A repeated identifier is rejected, since the direct map
    /// could only keep one of its slots.
    pub fn build_direct(self) -> Result<MemorySegment> {
        let slot_count = self.ids.len() as u32;
        let mut map = DirectIdMap::with_capacity(self.ids.len());
        for (i, id) in self.ids.into_iter().enumerate() {
            let slot = Slot::new(i as u32);
            if map.insert(id, slot).is_some() {
                return Err(VerdexError::DuplicateIdentifier { slot });
            }
        }
        Ok(MemorySegment {
            key: SegmentKey::allocate(),
            slot_count,
            ids: IdColumn::Direct(Arc::new(map)),
            versions: self.versions,
        })
    }
}
