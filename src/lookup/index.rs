//! Per-segment version index
//!
//! Maps identifier byte-strings to their occurrence slots within one
//! immutable segment and answers point lookups under the duplicate and
//! liveness rules. Built once per segment instance and cached by
//! [`LookupCache`](crate::lookup::LookupCache); valid for as long as the
//! segment it was built from.

use std::sync::Arc;

use fst::Map;
use tracing::{debug, warn};

use crate::error::{Result, VerdexError};
use crate::lookup::resolver::DocIdAndVersion;
use crate::segment::{DirectIdMap, IdentifierSource, LiveDocs, Segment, SegmentKey, Slot};

/// Lookup structure over one segment's identifier field
///
/// Two encodings, chosen by the shape the segment exposes:
///
/// - `Sorted`: an FST from identifier bytes to an ordinal, plus a flat slot
///   pool sliced per ordinal (occurrence slots ascending).
/// - `Direct`: the segment's own one-slot-per-identifier map, shared.
///
/// Both answer the same contract: the only slot ever eligible for an
/// identifier is its highest occurrence slot. Liveness applies to that slot
/// alone; earlier occurrences are superseded writes, not fallbacks.
#[derive(Debug)]
pub struct VersionIndex {
    /// Identity of the segment this index was built from.
    segment: SegmentKey,
    ids: IdIndex,
}

#[derive(Debug)]
enum IdIndex {
    Sorted {
        /// identifier bytes -> ordinal into `offsets`
        fst: Map<Vec<u8>>,
        /// per-ordinal `[start, end)` into `slots`; length = distinct ids + 1
        offsets: Vec<u32>,
        /// occurrence slots, ascending within each ordinal's range
        slots: Vec<Slot>,
    },
    Direct(Arc<DirectIdMap>),
}

impl VersionIndex {
    /// Build the index for `segment`. Linear in the segment's document
    /// count; the cost is paid once per segment instance.
    pub fn build(segment: &dyn Segment) -> Result<Self> {
        let key = segment.key();
        let ids = match segment.identifiers() {
            IdentifierSource::Sorted(entries) => {
                let mut builder = fst::MapBuilder::memory();
                let mut offsets: Vec<u32> = vec![0];
                let mut slots: Vec<Slot> = Vec::new();
                for (ordinal, (id, occurrences)) in entries.enumerate() {
                    debug_assert!(
                        !occurrences.is_empty(),
                        "identifier enumerated with no occurrence slots"
                    );
                    builder.insert(id, ordinal as u64).map_err(|source| match source {
                        fst::Error::Fst(
                            fst::raw::Error::OutOfOrder { .. }
                            | fst::raw::Error::DuplicateKey { .. },
                        ) => VerdexError::UnsortedIdentifiers { segment: key },
                        source => VerdexError::IdentifierIndex {
                            segment: key,
                            source,
                        },
                    })?;
                    slots.extend_from_slice(occurrences);
                    offsets.push(slots.len() as u32);
                }
                let bytes = builder.into_inner().map_err(|source| {
                    VerdexError::IdentifierIndex {
                        segment: key,
                        source,
                    }
                })?;
                let fst = Map::new(bytes).map_err(|source| VerdexError::IdentifierIndex {
                    segment: key,
                    source,
                })?;
                IdIndex::Sorted {
                    fst,
                    offsets,
                    slots,
                }
            }
            IdentifierSource::Direct(map) => IdIndex::Direct(map),
        };

        let index = Self { segment: key, ids };
        debug!(
            "built version index for segment {}: {} identifiers over {} slots",
            key,
            index.distinct_ids(),
            segment.slot_count()
        );
        Ok(index)
    }

    /// Identity of the segment this index belongs to.
    pub fn segment_key(&self) -> SegmentKey {
        self.segment
    }

    /// Number of distinct identifiers in the segment.
    pub fn distinct_ids(&self) -> usize {
        match &self.ids {
            IdIndex::Sorted { offsets, .. } => offsets.len() - 1,
            IdIndex::Direct(map) => map.len(),
        }
    }

    /// Whether the segment contains `id` at all, live or not.
    pub fn contains(&self, id: &[u8]) -> bool {
        !self.occurrences(id).is_empty()
    }

    /// Occurrence slots for `id` in ascending slot order, empty when the
    /// identifier is absent.
    pub fn occurrences(&self, id: &[u8]) -> &[Slot] {
        match &self.ids {
            IdIndex::Sorted {
                fst,
                offsets,
                slots,
            } => {
                let ordinal = match fst.get(id) {
                    Some(ordinal) => ordinal as usize,
                    None => return &[],
                };
                let start = offsets[ordinal] as usize;
                let end = offsets[ordinal + 1] as usize;
                &slots[start..end]
            }
            IdIndex::Direct(map) => match map.get(id) {
                Some(slot) => std::slice::from_ref(slot),
                None => &[],
            },
        }
    }

    /// The only slot eligible to be current for `id`: its highest
    /// occurrence slot. Liveness is not applied here.
    pub fn candidate(&self, id: &[u8]) -> Option<Slot> {
        self.occurrences(id).last().copied()
    }

    /// Resolve `id` within this segment.
    ///
    /// Returns the candidate slot's entry if that slot is live, `None` when
    /// the identifier is absent or its candidate is tombstoned. A candidate
    /// with no version value is a fatal inconsistency between the segment's
    /// identifier and version fields, never treated as not-found.
    pub fn lookup(
        &self,
        id: &[u8],
        live_docs: Option<&LiveDocs>,
        segment: &Arc<dyn Segment>,
    ) -> Result<Option<DocIdAndVersion>> {
        debug_assert_eq!(
            segment.key(),
            self.segment,
            "version index consulted with a segment other than the one it was built from"
        );

        let candidate = match self.candidate(id) {
            Some(slot) => slot,
            None => return Ok(None),
        };

        if let Some(live) = live_docs {
            if !live.is_live(candidate) {
                // The top occurrence is tombstoned. Earlier occurrences of
                // the same identifier are superseded writes, never an answer.
                return Ok(None);
            }
        }

        match segment.version(candidate) {
            Some(version) => Ok(Some(DocIdAndVersion {
                segment: Arc::clone(segment),
                slot: candidate,
                version,
            })),
            None => {
                warn!(
                    "segment {}: slot {} is indexed under an identifier but has no version value",
                    self.segment, candidate
                );
                Err(VerdexError::InconsistentSegment {
                    segment: self.segment,
                    slot: candidate,
                })
            }
        }
    }
}
