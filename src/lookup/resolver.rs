//! Cross-segment version resolution
//!
//! Walks a caller-supplied, newest-first list of segment snapshots and
//! returns the first live hit. The caller owns recency order and the set of
//! visible segments; this layer never reorders them and never merges hits
//! across segments.
//!
//! One resolver serves one identifier field. Stores with several identifier
//! fields run one resolver per field, which keeps their caches independent.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::lookup::cache::LookupCache;
use crate::segment::{LiveDocs, Segment, SegmentKey, Slot, Version};

/// One visible segment plus the liveness snapshot taken for this request
///
/// `live_docs = None` means every slot is live. The pair is fixed at request
/// start; deletions applied afterwards are not observed by the request.
#[derive(Clone)]
pub struct SegmentSnapshot {
    segment: Arc<dyn Segment>,
    live_docs: Option<Arc<LiveDocs>>,
}

impl SegmentSnapshot {
    pub fn new(segment: Arc<dyn Segment>, live_docs: Option<Arc<LiveDocs>>) -> Self {
        Self { segment, live_docs }
    }

    pub fn segment(&self) -> &Arc<dyn Segment> {
        &self.segment
    }

    pub fn live_docs(&self) -> Option<&LiveDocs> {
        self.live_docs.as_deref()
    }
}

/// A resolved live occurrence: exactly one slot in one segment
#[derive(Clone)]
pub struct DocIdAndVersion {
    /// Segment the hit came from. The result holds its own reference, so it
    /// stays readable even if the segment leaves the visible set.
    pub segment: Arc<dyn Segment>,
    /// Slot within that segment.
    pub slot: Slot,
    /// Version stored at that slot.
    pub version: Version,
}

impl fmt::Debug for DocIdAndVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocIdAndVersion")
            .field("segment", &self.segment.key())
            .field("slot", &self.slot)
            .field("version", &self.version)
            .finish()
    }
}

impl PartialEq for DocIdAndVersion {
    fn eq(&self, other: &Self) -> bool {
        self.segment.key() == other.segment.key()
            && self.slot == other.slot
            && self.version == other.version
    }
}

impl Eq for DocIdAndVersion {}

/// Cross-segment resolver for real-time get and optimistic-concurrency
/// write checks
///
/// Owns the lookup cache; per-segment indexes are built lazily on first
/// lookup and dropped on [`release`](Self::release).
#[derive(Default)]
pub struct VersionResolver {
    cache: LookupCache,
}

impl VersionResolver {
    pub fn new() -> Self {
        Self {
            cache: LookupCache::new(),
        }
    }

    /// Find the current entry for `id`.
    ///
    /// `segments` must be ordered newest first. The first live hit wins and
    /// older segments are not consulted, so at most one occurrence is
    /// returned even when several segments contain the identifier.
    pub fn resolve(
        &self,
        id: &[u8],
        segments: &[SegmentSnapshot],
    ) -> Result<Option<DocIdAndVersion>> {
        for snapshot in segments {
            let index = self.cache.get_or_build(snapshot.segment.as_ref())?;
            if let Some(hit) = index.lookup(id, snapshot.live_docs(), &snapshot.segment)? {
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }

    /// Version-only form of [`resolve`](Self::resolve), for write paths that
    /// compare versions without touching the document.
    pub fn resolve_version(
        &self,
        id: &[u8],
        segments: &[SegmentSnapshot],
    ) -> Result<Option<Version>> {
        Ok(self.resolve(id, segments)?.map(|hit| hit.version))
    }

    /// Drop the cached index for a segment that left the visible set.
    /// Returns whether an index was cached. In-flight resolutions already
    /// holding the index finish against it.
    pub fn release(&self, key: SegmentKey) -> bool {
        self.cache.evict(key)
    }

    /// Drop every cached index (the owning reader closed).
    pub fn release_all(&self) {
        self.cache.clear();
    }

    /// Number of segments with a cached index.
    pub fn cached_segments(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{MemorySegmentBuilder, Version};

    fn snapshot(docs: &[(&[u8], u64)]) -> SegmentSnapshot {
        let mut builder = MemorySegmentBuilder::new();
        for (id, version) in docs {
            builder.append(*id, Version::new(*version));
        }
        SegmentSnapshot::new(Arc::new(builder.build()), None)
    }

    #[test]
    fn test_newest_first_wins_regardless_of_version() {
        let newer = snapshot(&[(b"x", 5)]);
        let older = snapshot(&[(b"x", 9)]);
        let resolver = VersionResolver::new();

        // recency order decides, not version magnitude
        let hit = resolver
            .resolve(b"x", &[newer.clone(), older.clone()])
            .unwrap()
            .unwrap();
        assert_eq!(hit.version, Version::new(5));
        assert_eq!(hit.segment.key(), newer.segment().key());

        let hit = resolver.resolve(b"x", &[older.clone(), newer]).unwrap().unwrap();
        assert_eq!(hit.version, Version::new(9));
        assert_eq!(hit.segment.key(), older.segment().key());
    }

    #[test]
    fn test_falls_through_to_older_segments() {
        let newer = snapshot(&[(b"a", 1)]);
        let older = snapshot(&[(b"b", 2)]);
        let resolver = VersionResolver::new();

        let hit = resolver.resolve(b"b", &[newer, older]).unwrap().unwrap();
        assert_eq!(hit.version, Version::new(2));
        assert_eq!(resolver.cached_segments(), 2);
    }

    #[test]
    fn test_resolve_version_projection() {
        let snap = snapshot(&[(b"6", 87)]);
        let resolver = VersionResolver::new();

        assert_eq!(
            resolver.resolve_version(b"6", &[snap.clone()]).unwrap(),
            Some(Version::new(87))
        );
        assert_eq!(resolver.resolve_version(b"7", &[snap]).unwrap(), None);
    }

    #[test]
    fn test_release_and_release_all() {
        let snap_a = snapshot(&[(b"a", 1)]);
        let snap_b = snapshot(&[(b"b", 2)]);
        let resolver = VersionResolver::new();
        resolver.resolve(b"a", &[snap_a.clone(), snap_b.clone()]).unwrap();
        assert_eq!(resolver.cached_segments(), 2);

        assert!(resolver.release(snap_a.segment().key()));
        assert_eq!(resolver.cached_segments(), 1);

        resolver.release_all();
        assert_eq!(resolver.cached_segments(), 0);

        // resolving again rebuilds what it needs
        assert!(resolver.resolve(b"b", &[snap_a, snap_b]).unwrap().is_some());
        assert_eq!(resolver.cached_segments(), 2);
    }

    #[test]
    fn test_empty_segment_list() {
        let resolver = VersionResolver::new();
        assert!(resolver.resolve(b"6", &[]).unwrap().is_none());
    }
}
