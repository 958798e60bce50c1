//! Fixed-length tuple elements.

use std::fmt;
use std::ops::Index;

use super::ReferenceCounter;
use super::scalar::{Datum, Scalar};

/// An element of an [`IndexSetNd`](super::IndexSetNd): an ordered group of
/// [`Scalar`] values.
///
/// Cloning a `Tuple` is O(1); the scalars are shared between clones, so the
/// same element can sit in the ordered sequence, the membership set and any
/// number of cached groupings without being copied.
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::{Scalar, Tuple};
///
/// let element = Tuple::from(("chair", "WH-A", 2));
/// assert_eq!(element.len(), 3);
/// assert_eq!(element[2], Scalar::from(2));
/// assert_eq!(element.project(&[0, 2]), Tuple::from(("chair", 2)));
/// assert_eq!(format!("{element:?}"), "(\"chair\", \"WH-A\", 2)");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Tuple(ReferenceCounter<[Scalar]>);

impl Tuple {
    /// Creates a tuple from its scalar members.
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Scalar>,
    {
        Self(members.into_iter().collect())
    }

    /// Returns the number of dimensions of this tuple.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the tuple has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the member at `dimension`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, dimension: usize) -> Option<&Scalar> {
        self.0.get(dimension)
    }

    /// Returns the members as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    /// Returns an iterator over the members.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.0.iter()
    }

    /// Returns the sub-tuple of values at the given dimension indices, in the
    /// order the indices are given.
    ///
    /// A single index yields a 1-tuple.
    ///
    /// # Panics
    ///
    /// Panics if any index is not below [`Tuple::len`]. Callers validate
    /// indices against the owning index-set's width first.
    #[must_use]
    pub fn project(&self, dimensions: &[usize]) -> Self {
        Self(
            dimensions
                .iter()
                .map(|&dimension| self.0[dimension].clone())
                .collect(),
        )
    }
}

impl Index<usize> for Tuple {
    type Output = Scalar;

    #[inline]
    fn index(&self, dimension: usize) -> &Self::Output {
        &self.0[dimension]
    }
}

/// Lexicographic by member; `None` as soon as two members at the same
/// position are of different scalar variants.
impl PartialOrd for Tuple {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Scalar;
    type IntoIter = std::slice::Iter<'a, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        let mut first = true;
        for member in self.0.iter() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{member:?}")?;
        }
        if self.0.len() == 1 {
            write!(formatter, ",")?;
        }
        write!(formatter, ")")
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        let mut first = true;
        for member in self.0.iter() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{member}")?;
        }
        write!(formatter, ")")
    }
}

impl From<Vec<Scalar>> for Tuple {
    #[inline]
    fn from(members: Vec<Scalar>) -> Self {
        Self(ReferenceCounter::from(members))
    }
}

impl<const N: usize> From<[Scalar; N]> for Tuple {
    #[inline]
    fn from(members: [Scalar; N]) -> Self {
        Self::new(members)
    }
}

impl FromIterator<Scalar> for Tuple {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Tuple> for Datum {
    fn from(tuple: Tuple) -> Self {
        Self::Tuple(tuple.iter().cloned().map(Self::Scalar).collect())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tuple {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tuple {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<Scalar>::deserialize(deserializer).map(Self::from)
    }
}

// =============================================================================
// Conversions from Rust tuples
// =============================================================================

macro_rules! impl_tuple_from {
    ($(($($member:ident . $position:tt),+)),* $(,)?) => {
        $(
            impl<$($member),+> From<($($member,)+)> for Tuple
            where
                $($member: Into<Scalar>),+
            {
                fn from(value: ($($member,)+)) -> Self {
                    Self::from(vec![$(value.$position.into()),+])
                }
            }

            impl<$($member),+> From<($($member,)+)> for Datum
            where
                $($member: Into<Datum>),+
            {
                fn from(value: ($($member,)+)) -> Self {
                    Self::Tuple(vec![$(value.$position.into()),+])
                }
            }
        )*
    };
}

impl_tuple_from!(
    (A.0),
    (A.0, B.1),
    (A.0, B.1, C.2),
    (A.0, B.1, C.2, D.3),
    (A.0, B.1, C.2, D.3, E.4),
    (A.0, B.1, C.2, D.3, E.4, F.5),
);
