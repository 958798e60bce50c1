//! Set algebra on ordered unique sequences.
//!
//! Results list the surviving elements of `self` first, in `self` order, then
//! the elements contributed by `other`, in `other` order. They keep the
//! metadata of `self` (name or dimension names) with a fresh grouping cache.
//!
//! Operator sugar is provided on references:
//!
//! | Operator | Method                                                       |
//! |----------|--------------------------------------------------------------|
//! | `&a \| &b` | [`union`](OrderedUniqueSequence::union)                    |
//! | `&a & &b`  | [`intersection`](OrderedUniqueSequence::intersection)      |
//! | `&a - &b`  | [`difference`](OrderedUniqueSequence::difference)          |
//! | `&a ^ &b`  | [`symmetric_difference`](OrderedUniqueSequence::symmetric_difference) |
//!
//! `union` and `symmetric_difference` can bring in elements of `other`, which
//! are validated against the shape rules of `self`, so they (and their
//! operators) return a `Result`.

use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Sub};

use super::error::IndexSetError;
use super::sequence::{OrderedUniqueSequence, SequenceHooks};

impl<T, H> OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    /// Returns the elements of `self` followed by the elements of `other`
    /// not in `self`.
    ///
    /// # Errors
    ///
    /// Returns the shape error reported by the hooks of `self` for an element
    /// of `other` (for example a tuple of another width).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::IndexSet1D;
    ///
    /// let left = IndexSet1D::try_from_vec(vec![1, 2, 3]).unwrap();
    /// let right = IndexSet1D::try_from_vec(vec![4, 3, 5]).unwrap();
    ///
    /// assert_eq!(left.union(&right).unwrap().as_slice(), &[1, 2, 3, 4, 5]);
    /// assert_eq!((&left | &right).unwrap(), left.union(&right).unwrap());
    /// ```
    pub fn union(&self, other: &Self) -> Result<Self, IndexSetError> {
        let mut result = self.derived_from(self.to_vec());
        result.extend(
            other
                .iter()
                .filter(|element| !self.contains(*element))
                .cloned(),
        )?;
        Ok(result)
    }

    /// Returns the elements of `self` that are also in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::IndexSet1D;
    ///
    /// let left = IndexSet1D::try_from_vec(vec![3, 1, 2]).unwrap();
    /// let right = IndexSet1D::try_from_vec(vec![2, 3, 4]).unwrap();
    ///
    /// assert_eq!((&left & &right).as_slice(), &[3, 2]);
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.derived_from(
            self.iter()
                .filter(|element| other.contains(*element))
                .cloned()
                .collect(),
        )
    }

    /// Returns the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.derived_from(
            self.iter()
                .filter(|element| !other.contains(*element))
                .cloned()
                .collect(),
        )
    }

    /// Returns the elements in exactly one of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Same as [`union`](Self::union).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::IndexSet1D;
    ///
    /// let left = IndexSet1D::try_from_vec(vec!["a", "b", "c"]).unwrap();
    /// let right = IndexSet1D::try_from_vec(vec!["d", "b"]).unwrap();
    ///
    /// assert_eq!((&left ^ &right).unwrap().as_slice(), &["a", "c", "d"]);
    /// ```
    pub fn symmetric_difference(&self, other: &Self) -> Result<Self, IndexSetError> {
        let mut result = self.difference(other);
        result.extend(
            other
                .iter()
                .filter(|element| !self.contains(*element))
                .cloned(),
        )?;
        Ok(result)
    }

    /// Returns `true` if `self` and `other` have no element in common.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        !smaller.iter().any(|element| larger.contains(element))
    }
}

// =============================================================================
// Operator sugar
// =============================================================================

impl<T, H> BitOr for &OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    type Output = Result<OrderedUniqueSequence<T, H>, IndexSetError>;

    fn bitor(self, other: Self) -> Self::Output {
        self.union(other)
    }
}

impl<T, H> BitAnd for &OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    type Output = OrderedUniqueSequence<T, H>;

    fn bitand(self, other: Self) -> Self::Output {
        self.intersection(other)
    }
}

impl<T, H> Sub for &OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    type Output = OrderedUniqueSequence<T, H>;

    fn sub(self, other: Self) -> Self::Output {
        self.difference(other)
    }
}

impl<T, H> BitXor for &OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    type Output = Result<OrderedUniqueSequence<T, H>, IndexSetError>;

    fn bitxor(self, other: Self) -> Self::Output {
        self.symmetric_difference(other)
    }
}
