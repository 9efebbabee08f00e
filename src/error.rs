use thiserror::Error;

use crate::segment::{SegmentKey, Slot};

/// Main error type for verdex operations
///
/// Every variant reports segment corruption or a broken builder contract.
/// None of them are transient: retrying the same lookup against the same
/// segment instance fails the same way.
#[derive(Error, Debug)]
pub enum VerdexError {
    /// The identifier field and the version field of a segment disagree: a
    /// slot is indexed under an identifier but carries no version value.
    #[error("inconsistent segment {segment}: slot {slot} is indexed but has no version value")]
    InconsistentSegment { segment: SegmentKey, slot: Slot },

    /// The segment's identifier enumeration was not strictly ascending in
    /// byte order.
    #[error("segment {segment}: identifier enumeration is not in strictly ascending byte order")]
    UnsortedIdentifiers { segment: SegmentKey },

    /// Building or loading the identifier dictionary failed.
    #[error("segment {segment}: identifier dictionary is corrupt: {source}")]
    IdentifierIndex {
        segment: SegmentKey,
        source: fst::Error,
    },

    /// An identifier appeared twice while building a one-slot-per-identifier
    /// segment.
    #[error("duplicate identifier at slot {slot} in a one-slot-per-identifier segment")]
    DuplicateIdentifier { slot: Slot },
}

impl VerdexError {
    /// The segment implicated by this error, if one exists yet.
    ///
    /// `DuplicateIdentifier` is raised while a segment is still being
    /// built, before it has an identity.
    pub fn segment(&self) -> Option<SegmentKey> {
        match self {
            Self::InconsistentSegment { segment, .. } => Some(*segment),
            Self::UnsortedIdentifiers { segment } => Some(*segment),
            Self::IdentifierIndex { segment, .. } => Some(*segment),
            Self::DuplicateIdentifier { .. } => None,
        }
    }
}

/// Result type alias for verdex operations
pub type Result<T> = std::result::Result<T, VerdexError>;
