//! Columnar per-slot version storage
//!
//! Random-access slot -> version values for one segment. Absence is kept
//! explicit: a slot whose identifier is indexed but whose version value is
//! missing is an inconsistency the lookup path surfaces as an error rather
//! than papering over.

use roaring::RoaringBitmap;

use crate::segment::types::{Slot, Version};

/// Version values indexed by slot, with explicit missing values
#[derive(Clone, Debug, Default)]
pub struct VersionColumn {
    values: Vec<Option<Version>>,
    /// Slots with no version value
    missing: RoaringBitmap,
}

impl VersionColumn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the value for the next slot.
    pub fn push(&mut self, version: Option<Version>) {
        if version.is_none() {
            self.missing.insert(self.values.len() as u32);
        }
        self.values.push(version);
    }

    /// Version at `slot`, `None` when the value is missing or the slot is
    /// out of range.
    pub fn get(&self, slot: Slot) -> Option<Version> {
        self.values.get(slot.as_usize()).copied().flatten()
    }

    /// Whether `slot` is covered by the column but carries no value.
    pub fn is_missing(&self, slot: Slot) -> bool {
        self.missing.contains(slot.as_u32())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Option<Version>> for VersionColumn {
    fn from_iter<I: IntoIterator<Item = Option<Version>>>(iter: I) -> Self {
        let mut column = Self::new();
        for version in iter {
            column.push(version);
        }
        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut column = VersionColumn::new();
        column.push(Some(Version::new(10)));
        column.push(None);
        column.push(Some(Version::new(30)));

        assert_eq!(column.len(), 3);
        assert_eq!(column.get(Slot::new(0)), Some(Version::new(10)));
        assert_eq!(column.get(Slot::new(1)), None);
        assert_eq!(column.get(Slot::new(2)), Some(Version::new(30)));
    }

    #[test]
    fn test_missing_vs_out_of_range() {
        let column: VersionColumn = vec![Some(Version::new(1)), None].into_iter().collect();

        assert!(column.is_missing(Slot::new(1)));
        assert!(!column.is_missing(Slot::new(0)));
        // out of range is not "missing", the slot simply does not exist
        assert!(!column.is_missing(Slot::new(9)));
        assert_eq!(column.get(Slot::new(9)), None);
    }

    #[test]
    fn test_empty_column() {
        let column = VersionColumn::new();
        assert!(column.is_empty());
        assert_eq!(column.get(Slot::new(0)), None);
    }
}
