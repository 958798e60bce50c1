//! N-dimensional index-sets of fixed-width tuples.
//!
//! [`IndexSetNd`] stores [`Tuple`] elements of one common width and answers
//! two kinds of queries through a lazily built grouping cache:
//!
//! - [`subset`](IndexSetNd::subset): elements matching a wildcard pattern
//! - [`squeeze`](IndexSetNd::squeeze): distinct projections onto some dimensions
//!
//! The first query on a combination of dimensions scans the set once and
//! groups it; later queries on the same combination are hash lookups. Any
//! structural mutation (push, extend, insert, set, range replacement,
//! removal, pop, clear, sort, reverse) drops the whole cache.
//!
//! # Examples
//!
//! ```rust
//! use opti_sets::index_set::{IndexSetNd, Scalar, Squeezed, Tuple};
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
//! let Squeezed::OneDim(origins) = arcs.squeeze(&[0]).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(origins.as_slice(), &[Scalar::from(0), Scalar::from(1)]);
//!
//! let Squeezed::MultiDim(legs) = arcs.squeeze(&[1, 2]).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(
//!     legs.to_vec(),
//!     vec![Tuple::from((7, "A")), Tuple::from((8, "B")), Tuple::from((9, "B"))]
//! );
//! ```

use std::cell::RefCell;
use std::fmt;

use itertools::Itertools;

use super::error::IndexSetError;
use super::grouping::{Dimensions, GroupCache, Grouping, Subset};
use super::one_dim::IndexSet1D;
use super::pattern::PatternValue;
use super::scalar::{Datum, Scalar};
use super::sequence::{OrderedUniqueSequence, SequenceHooks};
use super::tuple::Tuple;
use super::ReferenceCounter;
use super::validation;

// =============================================================================
// TupleLayout
// =============================================================================

/// Shape state of an [`IndexSetNd`]: the established tuple width, optional
/// per-dimension names and the grouping cache.
///
/// The width is set by the first stored batch and cleared whenever the set
/// becomes empty.
#[derive(Clone, Debug, Default)]
pub struct TupleLayout {
    width: Option<usize>,
    names: Option<Vec<String>>,
    cache: RefCell<GroupCache>,
}

impl SequenceHooks<Tuple> for TupleLayout {
    const KIND: &'static str = "IndexSetNd";

    fn check(&self, incoming: &[Tuple]) -> Result<(), IndexSetError> {
        validation::ensure_width(incoming, self.width).map(|_| ())
    }

    fn admitted(&mut self, incoming: &[Tuple]) {
        if self.width.is_none() {
            self.width = incoming.first().map(Tuple::len);
        }
    }

    fn changed(&mut self, remaining: usize) {
        self.cache.get_mut().invalidate();
        if remaining == 0 {
            self.width = None;
        }
    }

    fn labels(&self) -> Option<String> {
        self.names.as_ref().map(|names| names.join(", "))
    }

    fn fresh(&self) -> Self {
        Self {
            width: None,
            names: self.names.clone(),
            cache: RefCell::default(),
        }
    }
}

// =============================================================================
// IndexSetNd
// =============================================================================

/// Ordered, duplicate-free index-set of tuples sharing one width.
///
/// Positional and set-like operations come from [`OrderedUniqueSequence`];
/// this alias adds tuple-width validation, dimension names, and the cached
/// [`subset`](Self::subset) and [`squeeze`](Self::squeeze) queries.
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::{IndexSetError, IndexSetNd, Tuple};
///
/// let mut set = IndexSetNd::from_tuples([("F1", 1), ("F2", 1)]).unwrap();
/// assert_eq!(set.width(), Some(2));
///
/// assert_eq!(
///     set.push(Tuple::from(("F3", 1, 0))),
///     Err(IndexSetError::InconsistentTupleWidth { expected: 2, found: 3 })
/// );
///
/// set.clear();
/// assert_eq!(set.width(), None);
/// set.push(Tuple::from(("F3", 1, 0))).unwrap();
/// assert_eq!(set.width(), Some(3));
/// ```
pub type IndexSetNd = OrderedUniqueSequence<Tuple, TupleLayout>;

/// Result of [`IndexSetNd::squeeze`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Squeezed {
    /// Projection onto a single dimension.
    OneDim(IndexSet1D<Scalar>),
    /// Projection onto two or more dimensions.
    MultiDim(IndexSetNd),
}

impl Squeezed {
    /// Returns the number of distinct projected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::OneDim(set) => set.len(),
            Self::MultiDim(set) => set.len(),
        }
    }

    /// Returns `true` if there are no projected keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the one-dimensional projection, if this is one.
    #[must_use]
    pub fn into_one_dim(self) -> Option<IndexSet1D<Scalar>> {
        match self {
            Self::OneDim(set) => Some(set),
            Self::MultiDim(_) => None,
        }
    }

    /// Returns the multi-dimensional projection, if this is one.
    #[must_use]
    pub fn into_multi_dim(self) -> Option<IndexSetNd> {
        match self {
            Self::OneDim(_) => None,
            Self::MultiDim(set) => Some(set),
        }
    }
}

impl fmt::Display for Squeezed {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneDim(set) => write!(formatter, "{set}"),
            Self::MultiDim(set) => write!(formatter, "{set}"),
        }
    }
}

impl OrderedUniqueSequence<Tuple, TupleLayout> {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Creates an index-set from tuple-like elements.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::InconsistentTupleWidth`] if the elements do
    /// not share one width, or [`IndexSetError::DuplicateElement`] on a
    /// duplicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::{IndexSetError, IndexSetNd};
    ///
    /// let result = IndexSetNd::from_tuples([("F1", 1, 0), ("F2", 1, 0)]);
    /// assert!(result.is_ok());
    /// ```
    pub fn from_tuples<I, E>(elements: I) -> Result<Self, IndexSetError>
    where
        I: IntoIterator<Item = E>,
        E: Into<Tuple>,
    {
        Self::try_from_vec(elements.into_iter().map(Into::into).collect())
    }

    /// Creates an index-set from untyped data.
    ///
    /// Every datum must be a tuple of scalars. A batch made entirely of
    /// collections is coerced into tuples first.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::InvalidElementType`] for a non-tuple element
    /// or a tuple with a non-scalar member, then the same errors as
    /// [`from_tuples`](Self::from_tuples).
    pub fn from_data(data: Vec<Datum>) -> Result<Self, IndexSetError> {
        let elements = validation::coerce_collections(data)
            .into_iter()
            .map(validation::into_tuple)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from_vec(elements)
    }

    /// Creates the Cartesian product of two or more factors.
    ///
    /// Each row of the product is flattened recursively, so a factor whose
    /// values are tuples contributes all of their members. A single factor is
    /// treated like [`from_data`](Self::from_data); no factor gives an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::DuplicateElement`] if a factor repeats a value,
    /// or [`IndexSetError::InconsistentTupleWidth`] if the flattened rows
    /// differ in width.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::{Datum, IndexSetNd, Tuple};
    ///
    /// let set = IndexSetNd::product([
    ///     Datum::column(["F1", "F2", "F3"]),
    ///     Datum::column(0..2),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(set.len(), 6);
    /// assert_eq!(set.get(1).unwrap(), &Tuple::from(("F1", 1)));
    /// ```
    pub fn product<I>(factors: I) -> Result<Self, IndexSetError>
    where
        I: IntoIterator<Item = Vec<Datum>>,
    {
        let mut factors: Vec<Vec<Datum>> = factors.into_iter().collect();
        match factors.len() {
            0 => Ok(Self::new()),
            1 => Self::from_data(factors.remove(0)),
            _ => {
                let elements = factors
                    .iter()
                    .map(|factor| factor.iter())
                    .multi_cartesian_product()
                    .map(|row| Tuple::from(Datum::tuple(row.into_iter().cloned()).flatten()))
                    .collect();
                Self::try_from_vec(elements)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    /// Returns the established tuple width, or `None` while the set is empty.
    #[inline]
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.hooks().width
    }

    /// Returns the per-dimension display names, if any.
    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        self.hooks().names.as_deref()
    }

    /// Sets or clears the per-dimension display names.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::NameCountMismatch`] if a width is established
    /// and the number of names differs from it.
    pub fn set_names<I, S>(&mut self, names: Option<I>) -> Result<(), IndexSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Option<Vec<String>> =
            names.map(|names| names.into_iter().map(Into::into).collect());
        if let (Some(names), Some(width)) = (&names, self.width()) {
            validation::ensure_name_count(width, names.len())?;
        }
        self.hooks_mut().names = names;
        Ok(())
    }

    /// Returns this index-set carrying `names`.
    ///
    /// # Errors
    ///
    /// Same as [`set_names`](Self::set_names).
    pub fn with_names<I, S>(mut self, names: I) -> Result<Self, IndexSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_names(Some(names))?;
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Returns the elements matching `pattern`.
    ///
    /// `pattern` holds one value per dimension; [`PatternValue::Wildcard`]
    /// (written `"*"` with the [`pattern!`](crate::pattern) macro) matches any
    /// value. A valid pattern that matches nothing yields an empty [`Subset`].
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`IndexSetError::EmptyCollection`] if the set has no elements
    /// - [`IndexSetError::NonScalarPatternValue`] if a value is a tuple or collection
    /// - [`IndexSetError::PatternLengthMismatch`] if `pattern.len()` differs from the width
    /// - [`IndexSetError::AllWildcardsOrNoWildcards`] if the pattern narrows on
    ///   no dimension or on all of them
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::{IndexSetError, IndexSetNd, Tuple};
    /// use opti_sets::pattern;
    ///
    /// let set = IndexSetNd::from_tuples([(0, "A"), (1, "B")]).unwrap();
    ///
    /// assert_eq!(set.subset(&pattern!["*", "B"]).unwrap().to_vec(), vec![Tuple::from((1, "B"))]);
    /// assert_eq!(
    ///     set.subset(&pattern!["*", "*"]).unwrap_err(),
    ///     IndexSetError::AllWildcardsOrNoWildcards { all_wildcards: true }
    /// );
    /// ```
    pub fn subset(&self, pattern: &[PatternValue]) -> Result<Subset, IndexSetError> {
        let width = self.width().ok_or(IndexSetError::EmptyCollection)?;
        validation::ensure_scalar_pattern(pattern)?;
        validation::ensure_pattern_shape(pattern, width)?;

        let (dimensions, key): (Dimensions, Vec<Scalar>) = pattern
            .iter()
            .enumerate()
            .filter_map(|(dimension, value)| match value {
                PatternValue::Value(Datum::Scalar(scalar)) => Some((dimension, scalar.clone())),
                _ => None,
            })
            .unzip();
        let grouping = self.grouping(&dimensions);
        let slot = grouping.slot_of(&Tuple::from(key));
        Ok(Subset::new(grouping, slot))
    }

    /// Returns the distinct projections of the elements onto `dimensions`,
    /// in first-occurrence order.
    ///
    /// One dimension yields [`Squeezed::OneDim`]; two or more yield
    /// [`Squeezed::MultiDim`]. A dimension may be repeated.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`IndexSetError::EmptyCollection`] if the set has no elements
    /// - [`IndexSetError::NoDimensionsGiven`] if `dimensions` is empty
    /// - [`IndexSetError::DimensionIndexOutOfRange`] listing every index not below the width
    /// - [`IndexSetError::AllDimensionsGiven`] if as many indices as the width are given
    pub fn squeeze(&self, dimensions: &[usize]) -> Result<Squeezed, IndexSetError> {
        self.squeeze_checked::<&str>(dimensions, None)
    }

    /// Same as [`squeeze`](Self::squeeze), naming the dimensions of the result.
    ///
    /// # Errors
    ///
    /// The errors of [`squeeze`](Self::squeeze), then
    /// [`IndexSetError::NameCountMismatch`] unless there is one name per
    /// dimension index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::IndexSetNd;
    ///
    /// let set = IndexSetNd::from_tuples([("chair", "WH-A", 1), ("desk", "WH-B", 1)]).unwrap();
    /// let products = set.squeeze_named(&[0], &["PRODUCT"]).unwrap();
    ///
    /// assert_eq!(products.to_string(), "IndexSet1D: (PRODUCT)\n[\"chair\", \"desk\"]");
    /// ```
    pub fn squeeze_named<S: AsRef<str>>(
        &self,
        dimensions: &[usize],
        names: &[S],
    ) -> Result<Squeezed, IndexSetError> {
        self.squeeze_checked(dimensions, Some(names))
    }

    fn squeeze_checked<S: AsRef<str>>(
        &self,
        dimensions: &[usize],
        names: Option<&[S]>,
    ) -> Result<Squeezed, IndexSetError> {
        let width = self.width().ok_or(IndexSetError::EmptyCollection)?;
        validation::ensure_projection(dimensions, width)?;
        if let Some(names) = names {
            validation::ensure_name_count(dimensions.len(), names.len())?;
        }

        let grouping = self.grouping(dimensions);
        if let [_] = dimensions {
            let mut set = IndexSet1D::try_from_vec(
                grouping.keys().iter().map(|key| key[0].clone()).collect(),
            )?;
            set.set_name(names.map(|names| names[0].as_ref().to_owned()));
            Ok(Squeezed::OneDim(set))
        } else {
            let mut set = Self::try_from_vec(grouping.keys().to_vec())?;
            if let Some(names) = names {
                set.set_names(Some(names.iter().map(|name| name.as_ref().to_owned())))?;
            }
            Ok(Squeezed::MultiDim(set))
        }
    }

    /// Returns `true` if every value in dimension `i` belongs to `factors[i]`,
    /// for every dimension.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::EmptyCollection`] if the set has no elements,
    /// or [`IndexSetError::FactorCountMismatch`] unless there is one factor
    /// per dimension.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::{IndexSet1D, IndexSetNd, Scalar};
    ///
    /// let routes = IndexSetNd::from_tuples([("A", 1), ("B", 2)]).unwrap();
    /// let sites = IndexSet1D::try_from_vec(vec![Scalar::from("A"), Scalar::from("B")]).unwrap();
    /// let days = IndexSet1D::try_from_vec(vec![Scalar::from(1), Scalar::from(2)]).unwrap();
    ///
    /// assert!(routes.is_within(&[sites, days]).unwrap());
    /// ```
    pub fn is_within(&self, factors: &[IndexSet1D<Scalar>]) -> Result<bool, IndexSetError> {
        let width = self.width().ok_or(IndexSetError::EmptyCollection)?;
        if factors.len() != width {
            return Err(IndexSetError::FactorCountMismatch {
                expected: width,
                found: factors.len(),
            });
        }
        Ok(factors.iter().enumerate().all(|(dimension, factor)| {
            self.grouping(&[dimension])
                .keys()
                .iter()
                .all(|key| factor.contains(&key[0]))
        }))
    }

    /// Returns `true` if a grouping on `dimensions` is currently cached.
    ///
    /// A grouping is cached by the first [`subset`](Self::subset) or
    /// [`squeeze`](Self::squeeze) on its dimensions and dropped by the next
    /// structural mutation.
    #[must_use]
    pub fn is_grouping_cached(&self, dimensions: &[usize]) -> bool {
        self.hooks().cache.borrow().contains(dimensions)
    }

    /// Returns the number of cached groupings.
    #[must_use]
    pub fn cached_grouping_count(&self) -> usize {
        self.hooks().cache.borrow().len()
    }

    /// Returns the grouping on `dimensions`, which must be valid for the width.
    pub(crate) fn grouping(&self, dimensions: &[usize]) -> ReferenceCounter<Grouping> {
        self.hooks()
            .cache
            .borrow_mut()
            .get_or_build(self.as_slice(), dimensions)
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(IndexSetNd: Send);

static_assertions::assert_not_impl_any!(IndexSetNd: Sync);

// =============================================================================
// Tests
// =============================================================================
