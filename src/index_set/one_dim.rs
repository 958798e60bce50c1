//! One-dimensional index-sets.

use super::scalar::ScalarValue;
use super::sequence::{OrderedUniqueSequence, SequenceHooks};

/// Optional display name of a one-dimensional index-set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Name(Option<String>);

impl<T: ScalarValue> SequenceHooks<T> for Name {
    const KIND: &'static str = "IndexSet1D";

    fn labels(&self) -> Option<String> {
        self.0.clone()
    }

    fn fresh(&self) -> Self {
        self.clone()
    }
}

/// Ordered, duplicate-free index-set of scalar elements, with an optional name.
///
/// Elements are leaf values ([`ScalarValue`](super::ScalarValue)): integers,
/// strings, dates, or [`Scalar`](super::Scalar) for heterogeneous data (which
/// is what [`IndexSetNd::squeeze`](super::IndexSetNd::squeeze) produces).
/// Tuple elements belong in an [`IndexSetNd`](super::IndexSetNd) instead.
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::IndexSet1D;
///
/// let cities = IndexSet1D::try_from_vec(vec!["Delhi", "Mumbai"])
///     .unwrap()
///     .with_name("CITY");
///
/// assert_eq!(cities.name(), Some("CITY"));
/// assert_eq!(
///     cities.to_string(),
///     "IndexSet1D: (CITY)\n[\"Delhi\", \"Mumbai\"]"
/// );
/// ```
pub type IndexSet1D<T> = OrderedUniqueSequence<T, Name>;

impl<T: ScalarValue> OrderedUniqueSequence<T, Name> {
    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.hooks().0.as_deref()
    }

    /// Sets or clears the display name.
    pub fn set_name<S: Into<String>>(&mut self, name: Option<S>) {
        self.hooks_mut().0 = name.map(Into::into);
    }

    /// Returns this index-set carrying `name`.
    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.set_name(Some(name));
        self
    }
}
