//! Lookup cache keyed by segment identity
//!
//! A [`VersionIndex`] stays valid for the whole lifetime of its segment
//! instance, so the cache holds one entry per [`SegmentKey`] and only drops
//! it when the owning store says the segment left the visible set. Size is
//! bounded by the number of open segments; there is no capacity policy and
//! no expiry.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::lookup::index::VersionIndex;
use crate::segment::{Segment, SegmentKey};

/// Cache of built per-segment version indexes
#[derive(Default)]
pub struct LookupCache {
    entries: DashMap<SegmentKey, Arc<VersionIndex>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Get the index for `segment`, building it on first use.
    ///
    /// Two threads racing on a cold entry may both build; the losing insert
    /// is discarded and every caller observes the winner. A partially built
    /// index is never published.
    pub fn get_or_build(&self, segment: &dyn Segment) -> Result<Arc<VersionIndex>> {
        if let Some(entry) = self.entries.get(&segment.key()) {
            return Ok(Arc::clone(&entry));
        }
        let built = Arc::new(VersionIndex::build(segment)?);
        let entry = self.entries.entry(segment.key()).or_insert(built);
        Ok(Arc::clone(&entry))
    }

    /// Cached index for `key`, `None` when absent. Never builds.
    pub fn get(&self, key: SegmentKey) -> Option<Arc<VersionIndex>> {
        self.entries.get(&key).map(|entry| Arc::clone(&entry))
    }

    /// Drop the entry for a segment that left the visible set. In-flight
    /// lookups holding the index keep it alive until they finish.
    pub fn evict(&self, key: SegmentKey) -> bool {
        let evicted = self.entries.remove(&key).is_some();
        if evicted {
            debug!("evicted version index for segment {}", key);
        }
        evicted
    }

    /// Drop every entry (the owning reader closed).
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: SegmentKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
