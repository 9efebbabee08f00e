pub mod error;
pub mod lookup;
pub mod segment;

pub use error::{Result, VerdexError};
pub use lookup::{DocIdAndVersion, LookupCache, SegmentSnapshot, VersionIndex, VersionResolver};
pub use segment::{
    DirectIdMap, IdentifierSource, LiveDocs, MemorySegment, MemorySegmentBuilder, Segment,
    SegmentKey, Slot, SortedIdColumn, Version, VersionColumn,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
