//! Error type for index-set operations.
//!
//! Every fallible operation on an index-set reports exactly one of these
//! conditions to its caller. A failed mutating call leaves the collection
//! (and its grouping cache) as it was before the call.

/// Represents the distinguishable failure conditions of index-set operations.
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::{IndexSetError, IndexSetNd};
///
/// let result = IndexSetNd::from_tuples([("F1", 1), ("F1", 1), ("F2", 1)]);
/// assert_eq!(result.unwrap_err(), IndexSetError::DuplicateElement);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSetError {
    /// An element failed a shape check (for example a non-tuple where a tuple is required).
    InvalidElementType {
        /// The kind of element that was required.
        expected: &'static str,
        /// The kind of element that was supplied.
        found: &'static str,
    },
    /// A tuple element's length disagrees with the established tuple width.
    InconsistentTupleWidth {
        /// The established (or first seen) tuple width.
        expected: usize,
        /// The offending tuple length.
        found: usize,
    },
    /// The operation would introduce an element that is already present.
    DuplicateElement,
    /// The element targeted by `remove` or `index_of` is absent.
    ElementNotFound,
    /// A position index is beyond the bounds of the collection.
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The length of the collection at the time of the call.
        len: usize,
    },
    /// `subset` or `squeeze` was invoked on a collection with no elements.
    EmptyCollection,
    /// A non-wildcard pattern value is itself a collection.
    NonScalarPatternValue {
        /// Position of the offending value within the pattern.
        position: usize,
    },
    /// The pattern does not supply exactly one value per tuple dimension.
    PatternLengthMismatch {
        /// The tuple width.
        expected: usize,
        /// The number of pattern values supplied.
        found: usize,
    },
    /// The pattern is entirely wildcards or contains no wildcard.
    AllWildcardsOrNoWildcards {
        /// `true` when every value was a wildcard, `false` when none was.
        all_wildcards: bool,
    },
    /// `squeeze` was called without any dimension index.
    NoDimensionsGiven,
    /// One or more dimension indices are not below the tuple width.
    DimensionIndexOutOfRange {
        /// The offending dimension indices, in the order given.
        invalid: Vec<usize>,
        /// The tuple width.
        width: usize,
    },
    /// `squeeze` was asked to keep every dimension.
    AllDimensionsGiven {
        /// The tuple width.
        width: usize,
    },
    /// Sorting failed because some elements cannot be ordered against each other.
    IncomparableElements,
    /// A sequence of display names does not match the number of dimensions it labels.
    NameCountMismatch {
        /// The number of dimensions being labelled.
        expected: usize,
        /// The number of names supplied.
        found: usize,
    },
    /// A sparse-subset check received a number of factor sets different from the tuple width.
    FactorCountMismatch {
        /// The tuple width.
        expected: usize,
        /// The number of factor sets supplied.
        found: usize,
    },
}

impl std::fmt::Display for IndexSetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidElementType { expected, found } => {
                write!(formatter, "input introduced {found} element(s), expected {expected}")
            }
            Self::InconsistentTupleWidth { expected, found } => write!(
                formatter,
                "input introduced tuple element(s) of length {found} (should be {expected})"
            ),
            Self::DuplicateElement => write!(formatter, "input introduced duplicate element(s)"),
            Self::ElementNotFound => write!(formatter, "element not in index-set"),
            Self::IndexOutOfRange { index, len } => write!(
                formatter,
                "position index {index} out of range for index-set of length {len}"
            ),
            Self::EmptyCollection => write!(formatter, "index-set is empty"),
            Self::NonScalarPatternValue { position } => write!(
                formatter,
                "pattern value at position {position} must be a scalar (no collections)"
            ),
            Self::PatternLengthMismatch { expected, found } => write!(
                formatter,
                "pattern has {found} value(s) but tuple elements have length {expected}"
            ),
            Self::AllWildcardsOrNoWildcards { all_wildcards: true } => {
                write!(formatter, "pattern cannot have all wildcards")
            }
            Self::AllWildcardsOrNoWildcards {
                all_wildcards: false,
            } => write!(formatter, "pattern cannot have no wildcards"),
            Self::NoDimensionsGiven => write!(formatter, "dimension indices are required"),
            Self::DimensionIndexOutOfRange { invalid, width } => write!(
                formatter,
                "dimension indices {invalid:?} are invalid for tuple elements of length {width}"
            ),
            Self::AllDimensionsGiven { width } => write!(
                formatter,
                "squeeze does not work with all {width} dimension indices; use the index-set directly"
            ),
            Self::IncomparableElements => {
                write!(formatter, "index-set has elements that cannot be compared")
            }
            Self::NameCountMismatch { expected, found } => write!(
                formatter,
                "expected {expected} name(s) for the labelled dimensions, got {found}"
            ),
            Self::FactorCountMismatch { expected, found } => write!(
                formatter,
                "expected {expected} factor index-set(s) (one per dimension), got {found}"
            ),
        }
    }
}

impl std::error::Error for IndexSetError {}
