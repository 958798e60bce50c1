//! # opti-sets
//!
//! Ordered, duplicate-free index-sets and parameter dictionaries for building
//! mathematical-optimization models.
//!
//! ## Overview
//!
//! - **Index-sets**: [`IndexSet1D`](index_set::IndexSet1D) for scalar
//!   elements and [`IndexSetNd`](index_set::IndexSetNd) for fixed-width tuple
//!   elements, both list-like in order and set-like in uniqueness
//! - **Cached queries**: wildcard [`subset`](index_set::IndexSetNd::subset)
//!   and dimension [`squeeze`](index_set::IndexSetNd::squeeze) on
//!   `IndexSetNd`, answered from a grouping cache that is built lazily and
//!   dropped on every structural mutation
//! - **Parameter dictionaries**: [`ParamDict`](param_dict::ParamDict) values
//!   keyed by index-set elements, with the key-set kept in sync
//!
//! ## Feature Flags
//!
//! - `param-dict` (default): Parameter dictionaries
//! - `arc`: Use `Arc` instead of `Rc` for shared data, making index-sets `Send`
//! - `fxhash`: Hash with `rustc-hash`
//! - `ahash`: Hash with `ahash`
//! - `serde`: Serialization of scalars, tuples and index-sets
//! - `full`: Enable `param-dict` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use opti_sets::prelude::*;
//! use opti_sets::pattern;
//!
//! let shipments = IndexSetNd::product([
//!     Datum::column(["chair", "desk"]),
//!     Datum::column(["WH-A", "WH-B"]),
//!     Datum::column(1..=2),
//! ])
//! .unwrap();
//!
//! let chairs_in_period_1 = shipments.subset(&pattern!["chair", "*", 1]).unwrap();
//! assert_eq!(chairs_in_period_1.len(), 2);
//!
//! let warehouses = shipments.squeeze(&[1]).unwrap();
//! assert_eq!(warehouses.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use opti_sets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::index_set::{
        Datum, IndexSet1D, IndexSetError, IndexSetNd, OrderedUniqueSequence, PatternValue, Scalar,
        ScalarValue, Squeezed, Subset, Tuple, WILDCARD,
    };

    #[cfg(feature = "param-dict")]
    pub use crate::param_dict::{ParamDict, ParamDict1D, ParamDictNd};
}

pub mod index_set;

#[cfg(feature = "param-dict")]
pub mod param_dict;
