//! Liveness bitset over segment slots
//!
//! The owning store applies deletions by clearing bits here; segments stay
//! immutable and lookups only consult the bitset. A set bit means the slot
//! is live (not tombstoned). Lookups handed no bitset treat every slot as
//! live.

use roaring::RoaringBitmap;

use crate::segment::types::Slot;

/// Per-segment liveness bitset: set bit = live slot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiveDocs {
    live: RoaringBitmap,
}

impl LiveDocs {
    /// Every slot dead.
    pub fn none() -> Self {
        Self {
            live: RoaringBitmap::new(),
        }
    }

    /// All `slot_count` slots live.
    pub fn all(slot_count: u32) -> Self {
        let mut live = RoaringBitmap::new();
        live.insert_range(0..slot_count);
        Self { live }
    }

    /// Exactly the listed slots live.
    pub fn of(slots: &[Slot]) -> Self {
        let mut live = RoaringBitmap::new();
        for slot in slots {
            live.insert(slot.as_u32());
        }
        Self { live }
    }

    /// Mark a slot live.
    pub fn set_live(&mut self, slot: Slot) {
        self.live.insert(slot.as_u32());
    }

    /// Tombstone a slot.
    pub fn delete(&mut self, slot: Slot) {
        self.live.remove(slot.as_u32());
    }

    pub fn is_live(&self, slot: Slot) -> bool {
        self.live.contains(slot.as_u32())
    }

    /// Number of live slots.
    pub fn live_count(&self) -> u64 {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl From<RoaringBitmap> for LiveDocs {
    fn from(live: RoaringBitmap) -> Self {
        Self { live }
    }
}
