//! Ordered, duplicate-free index-sets.
//!
//! This module provides the containers used to declare the index-sets of an
//! optimization model:
//!
//! - [`OrderedUniqueSequence`]: list-like ordering with a set-like uniqueness
//!   invariant, generic over the element type and a [`SequenceHooks`] extension
//! - [`IndexSet1D`]: index-set of scalar elements with an optional display name
//! - [`IndexSetNd`]: index-set of fixed-width [`Tuple`] elements with a lazily
//!   built grouping cache behind [`IndexSetNd::subset`] and [`IndexSetNd::squeeze`]
//!
//! # Examples
//!
//! ```rust
//! use opti_sets::index_set::{IndexSetNd, Tuple};
//! use opti_sets::pattern;
//!
//! let arcs = IndexSetNd::from_tuples([
//!     (0, 7, "A"),
//!     (0, 8, "B"),
//!     (0, 9, "B"),
//!     (1, 7, "A"),
//!     (1, 8, "B"),
//! ])
//! .unwrap();
//!
//! let matched = arcs.subset(&pattern![0, "*", "B"]).unwrap();
//! assert_eq!(
//!     matched.to_vec(),
//!     vec![Tuple::from((0, 8, "B")), Tuple::from((0, 9, "B"))]
//! );
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

#[cfg(feature = "arc")]
use std::sync::Arc as Shared;

#[cfg(not(feature = "arc"))]
use std::rc::Rc as Shared;

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which makes
/// the index-sets `Send`. Otherwise it is `std::rc::Rc`.
pub type ReferenceCounter<T> = Shared<T>;

// =============================================================================
// Hasher Selection
// =============================================================================

#[cfg(feature = "fxhash")]
pub(crate) type BuildHasher = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type BuildHasher = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type BuildHasher = std::collections::hash_map::RandomState;

/// Hash set used for membership tests.
pub(crate) type FastHashSet<T> = std::collections::HashSet<T, BuildHasher>;

/// Hash map used for grouping and dictionary storage.
pub(crate) type FastHashMap<K, V> = std::collections::HashMap<K, V, BuildHasher>;

mod error;
mod grouping;
mod n_dim;
mod one_dim;
mod pattern;
mod scalar;
mod sequence;
mod set_ops;
mod tuple;
mod validation;

pub use error::IndexSetError;
pub use grouping::Subset;
pub use n_dim::IndexSetNd;
pub use n_dim::Squeezed;
pub use n_dim::TupleLayout;
pub use one_dim::IndexSet1D;
pub use one_dim::Name;
pub use pattern::PatternValue;
pub use pattern::WILDCARD;
pub use scalar::Datum;
pub use scalar::Scalar;
pub use scalar::ScalarValue;
pub use sequence::OrderedUniqueSequence;
pub use sequence::Plain;
pub use sequence::SequenceHooks;
pub use tuple::Tuple;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::{FastHashMap, FastHashSet, ReferenceCounter, Scalar};
    use rstest::rstest;

    #[rstest]
    fn test_shared_members_are_not_copied() {
        let members: ReferenceCounter<[Scalar]> =
            ReferenceCounter::from(vec![Scalar::from(1), Scalar::from("A")]);
        let shared = ReferenceCounter::clone(&members);
        assert!(ReferenceCounter::ptr_eq(&members, &shared));
    }

    #[rstest]
    fn test_fast_hash_aliases_default_construct() {
        let mut members: FastHashSet<Scalar> = FastHashSet::default();
        let mut positions: FastHashMap<Scalar, usize> = FastHashMap::default();
        members.insert(Scalar::from("A"));
        positions.insert(Scalar::from("A"), 0);
        assert!(members.contains(&Scalar::from("A")));
        assert_eq!(positions.get(&Scalar::from("A")), Some(&0));
    }
}
