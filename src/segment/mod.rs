//! Segment model consumed by the version-lookup layer
//!
//! Segments are immutable once frozen; deletions are tracked outside them
//! and supplied per request.
//!
//! # Architecture
//!
//! - `Segment`: read surface the lookup layer depends on (identity,
//!   identifier field, version field)
//! - `MemorySegment` / `MemorySegmentBuilder`: the crate's in-memory segment
//! - `LiveDocs`: externally owned liveness bitset, consulted but never
//!   written by lookups
//! - `SortedIdColumn`, `DirectIdMap`, `VersionColumn`: column building blocks

mod types;
mod ident;
mod versions;
mod live;
mod reader;

pub use types::*;
pub use ident::*;
pub use versions::*;
pub use live::*;
pub use reader::*;
