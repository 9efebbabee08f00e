//! Version lookup: per-segment indexes, the cache over them, and the
//! cross-segment resolver
//!
//! # Architecture
//!
//! - `VersionIndex`: identifier -> occurrence slots for one segment
//! - `LookupCache`: one index per live segment instance, built lazily
//! - `VersionResolver`: newest-first walk across segments, first live hit
//!   wins

mod index;
mod cache;
mod resolver;

pub use index::*;
pub use cache::*;
pub use resolver::*;
