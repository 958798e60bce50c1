//! Ordered sequence with a uniqueness invariant.
//!
//! This module provides [`OrderedUniqueSequence`], the base container of every
//! index-set in this crate.
//!
//! # Overview
//!
//! `OrderedUniqueSequence` pairs two views of the same elements:
//! - an ordered `Vec` that defines iteration order and positions
//! - a hash set that provides O(1) membership tests and set comparisons
//!
//! The two always hold exactly the same elements, with no duplicates. Every
//! mutating operation validates its whole input before touching either view,
//! so a failed call is a no-op.
//!
//! # Extension
//!
//! Element-shape rules and mutation side effects are delegated to a
//! [`SequenceHooks`] implementation chosen by the type parameter `H`:
//!
//! | Alias                                   | Hooks                          | Adds                                  |
//! |-----------------------------------------|--------------------------------|---------------------------------------|
//! | `OrderedUniqueSequence<T>`              | [`Plain`]                      | nothing                               |
//! | [`IndexSet1D<T>`](super::IndexSet1D)    | [`Name`](super::Name)          | display name                          |
//! | [`IndexSetNd`](super::IndexSetNd)       | [`TupleLayout`](super::TupleLayout) | tuple width, names, grouping cache |
//!
//! # Time Complexity
//!
//! | Operation        | Complexity          |
//! |------------------|---------------------|
//! | `contains`       | O(1) expected       |
//! | `get`            | O(1)                |
//! | `push`           | O(1) amortized      |
//! | `extend`         | O(k)                |
//! | `insert`         | O(n)                |
//! | `remove`         | O(n)                |
//! | `index_of`       | O(n)                |
//! | `is_subset`      | O(n)                |
//!
//! # Examples
//!
//! ```rust
//! use opti_sets::index_set::{IndexSetError, OrderedUniqueSequence};
//!
//! let mut sequence: OrderedUniqueSequence<i32> =
//!     OrderedUniqueSequence::try_from_vec(vec![3, 1, 2]).unwrap();
//! assert_eq!(sequence.push(1), Err(IndexSetError::DuplicateElement));
//! assert_eq!(sequence.as_slice(), &[3, 1, 2]);
//!
//! sequence.push(5).unwrap();
//! sequence.sort();
//! assert_eq!(sequence.as_slice(), &[1, 2, 3, 5]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::iter::Rev;
use std::ops::{Bound, Range, RangeBounds};

use super::error::IndexSetError;
use super::validation;
use super::{BuildHasher, FastHashSet};

// =============================================================================
// Hooks
// =============================================================================

/// Extension seam of [`OrderedUniqueSequence`].
///
/// The sequence calls these hooks around every mutation:
///
/// 1. [`check`](SequenceHooks::check) on each batch of incoming elements,
///    before anything is modified. An error aborts the mutation.
/// 2. [`admitted`](SequenceHooks::admitted) with the same batch once it has
///    been stored.
/// 3. [`changed`](SequenceHooks::changed) after every structural mutation
///    (insertion, removal, replacement, reordering, clearing).
pub trait SequenceHooks<T>: Clone + Default {
    /// Type name used in display headers.
    const KIND: &'static str;

    /// Validates a batch of incoming elements against the current shape rules.
    ///
    /// # Errors
    ///
    /// Returns the shape violation found in `incoming`.
    fn check(&self, incoming: &[T]) -> Result<(), IndexSetError> {
        let _ = incoming;
        Ok(())
    }

    /// Records shape state established by a stored batch.
    fn admitted(&mut self, incoming: &[T]) {
        let _ = incoming;
    }

    /// Reacts to a structural mutation; `remaining` is the new element count.
    fn changed(&mut self, remaining: usize) {
        let _ = remaining;
    }

    /// Returns the label part of the display header, if any.
    fn labels(&self) -> Option<String> {
        None
    }

    /// Returns a copy of the metadata without any content-derived state.
    ///
    /// Used when a new collection is derived from this one (concatenation,
    /// set algebra).
    #[must_use]
    fn fresh(&self) -> Self {
        Self::default()
    }
}

/// Hooks that impose no element rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Plain;

impl<T> SequenceHooks<T> for Plain {
    const KIND: &'static str = "OrderedUniqueSequence";
}

// =============================================================================
// OrderedUniqueSequence
// =============================================================================

/// An ordered, duplicate-free, mutable sequence.
///
/// Supports list-like positional operations (`get`, `set`, `insert`,
/// `remove_at`, `pop`, range replacement, `sort`, `reverse`) and set-like
/// comparisons. Comparison operators follow set semantics and are only defined
/// between sequences of the same element and hook types:
///
/// | Operator | Meaning              |
/// |----------|----------------------|
/// | `a < b`  | proper subset        |
/// | `a <= b` | subset or equal      |
/// | `a == b` | same elements        |
/// | `a > b`  | proper superset      |
/// | `a >= b` | superset or equal    |
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Clone`, `Eq` and `Hash`.
/// * `H` - The [`SequenceHooks`] extension. Defaults to [`Plain`].
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::OrderedUniqueSequence;
///
/// let small: OrderedUniqueSequence<i32> = OrderedUniqueSequence::try_from_vec(vec![2, 1]).unwrap();
/// let large: OrderedUniqueSequence<i32> =
///     OrderedUniqueSequence::try_from_vec(vec![1, 2, 3]).unwrap();
///
/// assert!(small < large);
/// assert!(large >= small);
/// assert!(small.is_subset(&large));
/// ```
#[derive(Clone)]
pub struct OrderedUniqueSequence<T, H = Plain> {
    order: Vec<T>,
    members: FastHashSet<T>,
    hooks: H,
}

impl<T, H> OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    /// Creates a new empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hooks(H::default())
    }

    /// Creates a sequence from a vector of elements.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::DuplicateElement`] if `elements` contains a
    /// duplicate, or the shape error reported by the hooks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::{IndexSetError, OrderedUniqueSequence};
    ///
    /// let result: Result<OrderedUniqueSequence<i32>, _> =
    ///     OrderedUniqueSequence::try_from_vec(vec![1, 2, 1]);
    /// assert_eq!(result.unwrap_err(), IndexSetError::DuplicateElement);
    /// ```
    pub fn try_from_vec(elements: Vec<T>) -> Result<Self, IndexSetError> {
        Self::try_from_vec_with(elements, H::default())
    }

    pub(crate) fn with_hooks(hooks: H) -> Self {
        Self {
            order: Vec::new(),
            members: FastHashSet::with_hasher(BuildHasher::default()),
            hooks,
        }
    }

    pub(crate) fn try_from_vec_with(elements: Vec<T>, hooks: H) -> Result<Self, IndexSetError> {
        let mut sequence = Self::with_hooks(hooks);
        sequence.extend(elements)?;
        Ok(sequence)
    }

    pub(crate) const fn hooks(&self) -> &H {
        &self.hooks
    }

    pub(crate) const fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Returns a copy of this sequence whose hooks carry no content-derived state.
    pub(crate) fn derived_from(&self, elements: Vec<T>) -> Self {
        let mut hooks = self.hooks.fresh();
        hooks.admitted(&elements);
        let members = elements.iter().cloned().collect();
        Self {
            order: elements,
            members,
            hooks,
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if the sequence contains `element`. O(1) expected.
    #[inline]
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.members.contains(element)
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, IndexSetError> {
        self.order.get(index).ok_or(IndexSetError::IndexOutOfRange {
            index,
            len: self.order.len(),
        })
    }

    /// Returns the elements addressed by `range` as a plain slice.
    ///
    /// Bounds beyond the length are clamped, so this never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::OrderedUniqueSequence;
    ///
    /// let sequence: OrderedUniqueSequence<i32> =
    ///     OrderedUniqueSequence::try_from_vec(vec![10, 20, 30]).unwrap();
    /// assert_eq!(sequence.get_range(1..), &[20, 30]);
    /// assert_eq!(sequence.get_range(2..10), &[30]);
    /// ```
    #[must_use]
    pub fn get_range<R: RangeBounds<usize>>(&self, range: R) -> &[T] {
        &self.order[clamp_range(&range, self.order.len())]
    }

    /// Returns the first element, if any.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.order.first()
    }

    /// Returns the last element, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.order.last()
    }

    /// Returns all elements in order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.order
    }

    /// Returns an iterator over the elements in order.
    ///
    /// Each call yields a fresh iterator.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.order.iter()
    }

    /// Returns an iterator over the elements in reverse order.
    #[inline]
    pub fn iter_reversed(&self) -> Rev<std::slice::Iter<'_, T>> {
        self.order.iter().rev()
    }

    /// Returns the position of `element`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::ElementNotFound`] if `element` is absent.
    pub fn index_of<Q>(&self, element: &Q) -> Result<usize, IndexSetError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of_within(element, ..)
    }

    /// Returns the position of `element`, searching only positions inside `range`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::ElementNotFound`] if `element` is not found
    /// inside `range`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::{IndexSetError, OrderedUniqueSequence};
    ///
    /// let sequence: OrderedUniqueSequence<char> =
    ///     OrderedUniqueSequence::try_from_vec(vec!['a', 'b', 'c']).unwrap();
    /// assert_eq!(sequence.index_of_within(&'c', 1..), Ok(2));
    /// assert_eq!(
    ///     sequence.index_of_within(&'a', 1..),
    ///     Err(IndexSetError::ElementNotFound)
    /// );
    /// ```
    pub fn index_of_within<Q, R>(&self, element: &Q, range: R) -> Result<usize, IndexSetError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        R: RangeBounds<usize>,
    {
        if !self.members.contains(element) {
            return Err(IndexSetError::ElementNotFound);
        }
        let bounds = clamp_range(&range, self.order.len());
        let offset = bounds.start;
        self.order[bounds]
            .iter()
            .position(|item| item.borrow() == element)
            .map(|position| position + offset)
            .ok_or(IndexSetError::ElementNotFound)
    }

    /// Returns the elements as a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.order.clone()
    }

    /// Consumes the sequence and returns its elements in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.order
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Appends an element to the end.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::DuplicateElement`] if `element` is already
    /// present, or the shape error reported by the hooks. The sequence is
    /// unchanged on failure.
    pub fn push(&mut self, element: T) -> Result<(), IndexSetError> {
        let position = self.order.len();
        self.insert(position, element)
    }

    /// Appends every element of `elements`, in order.
    ///
    /// The batch is validated as a whole: a duplicate within the batch or
    /// against existing elements rejects all of it.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::DuplicateElement`] or the shape error reported
    /// by the hooks. The sequence is unchanged on failure.
    pub fn extend<I>(&mut self, elements: I) -> Result<(), IndexSetError>
    where
        I: IntoIterator<Item = T>,
    {
        let incoming: Vec<T> = elements.into_iter().collect();
        if incoming.is_empty() {
            return Ok(());
        }
        self.ensure_admissible(&incoming, &[])?;
        self.members.extend(incoming.iter().cloned());
        self.hooks.admitted(&incoming);
        self.order.extend(incoming);
        self.hooks.changed(self.order.len());
        Ok(())
    }

    /// Inserts an element at `index`, shifting later elements right.
    ///
    /// An `index` past the end appends.
    ///
    /// # Errors
    ///
    /// Same as [`push`](Self::push).
    pub fn insert(&mut self, index: usize, element: T) -> Result<(), IndexSetError> {
        self.ensure_admissible(std::slice::from_ref(&element), &[])?;
        let index = index.min(self.order.len());
        self.members.insert(element.clone());
        self.hooks.admitted(std::slice::from_ref(&element));
        self.order.insert(index, element);
        self.hooks.changed(self.order.len());
        Ok(())
    }

    /// Returns a new sequence holding these elements followed by `other`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::DuplicateElement`] if the result would contain
    /// a duplicate, or the shape error reported by the hooks. `self` is never
    /// modified.
    pub fn concat<I>(&self, other: I) -> Result<Self, IndexSetError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut result = self.derived_from(self.order.clone());
        result.extend(other)?;
        Ok(result)
    }

    /// Appends `other` in place; equivalent to [`extend`](Self::extend).
    ///
    /// # Errors
    ///
    /// Same as [`extend`](Self::extend).
    pub fn concat_in_place<I>(&mut self, other: I) -> Result<(), IndexSetError>
    where
        I: IntoIterator<Item = T>,
    {
        self.extend(other)
    }

    // -------------------------------------------------------------------------
    // Replacement
    // -------------------------------------------------------------------------

    /// Replaces the element at `index`, returning the old element.
    ///
    /// Assigning an element equal to the one already at `index` succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::IndexOutOfRange`] if `index >= len`,
    /// [`IndexSetError::DuplicateElement`] if `element` is present at another
    /// position, or the shape error reported by the hooks. The sequence is
    /// unchanged on failure.
    pub fn set(&mut self, index: usize, element: T) -> Result<T, IndexSetError> {
        let len = self.order.len();
        let current = self
            .order
            .get(index)
            .ok_or(IndexSetError::IndexOutOfRange { index, len })?;
        self.ensure_admissible(
            std::slice::from_ref(&element),
            std::slice::from_ref(current),
        )?;
        let old = std::mem::replace(&mut self.order[index], element.clone());
        self.members.remove(&old);
        self.members.insert(element.clone());
        self.hooks.admitted(std::slice::from_ref(&element));
        self.hooks.changed(self.order.len());
        Ok(old)
    }

    /// Replaces the elements addressed by `range` with `elements`, returning
    /// the replaced elements.
    ///
    /// The replacement may be longer or shorter than the range. Bounds beyond
    /// the length are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::DuplicateElement`] if the resulting sequence
    /// would contain a duplicate, or the shape error reported by the hooks.
    /// The sequence is unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opti_sets::index_set::OrderedUniqueSequence;
    ///
    /// let mut sequence: OrderedUniqueSequence<i32> =
    ///     OrderedUniqueSequence::try_from_vec(vec![1, 2, 3, 4]).unwrap();
    /// let replaced = sequence.set_range(1..3, [3, 2, 9]).unwrap();
    ///
    /// assert_eq!(replaced, vec![2, 3]);
    /// assert_eq!(sequence.as_slice(), &[1, 3, 2, 9, 4]);
    /// ```
    pub fn set_range<R, I>(&mut self, range: R, elements: I) -> Result<Vec<T>, IndexSetError>
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = T>,
    {
        let bounds = clamp_range(&range, self.order.len());
        let incoming: Vec<T> = elements.into_iter().collect();
        self.ensure_admissible(&incoming, &self.order[bounds.clone()])?;
        let replaced: Vec<T> = self
            .order
            .splice(bounds, incoming.iter().cloned())
            .collect();
        for element in &replaced {
            self.members.remove(element);
        }
        self.members.extend(incoming.iter().cloned());
        self.hooks.admitted(&incoming);
        self.hooks.changed(self.order.len());
        Ok(replaced)
    }

    // -------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, IndexSetError> {
        let len = self.order.len();
        if index >= len {
            return Err(IndexSetError::IndexOutOfRange { index, len });
        }
        let element = self.order.remove(index);
        self.members.remove(&element);
        self.hooks.changed(self.order.len());
        Ok(element)
    }

    /// Removes and returns the elements addressed by `range`.
    ///
    /// Bounds beyond the length are clamped, so this never fails.
    pub fn remove_range<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<T> {
        let bounds = clamp_range(&range, self.order.len());
        if bounds.is_empty() {
            return Vec::new();
        }
        let removed: Vec<T> = self.order.drain(bounds).collect();
        for element in &removed {
            self.members.remove(element);
        }
        self.hooks.changed(self.order.len());
        removed
    }

    /// Removes `element`, returning the stored element.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::ElementNotFound`] if `element` is absent.
    pub fn remove<Q>(&mut self, element: &Q) -> Result<T, IndexSetError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.index_of(element)?;
        self.remove_at(index)
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::IndexOutOfRange`] if the sequence is empty.
    pub fn pop(&mut self) -> Result<T, IndexSetError> {
        match self.order.len() {
            0 => Err(IndexSetError::IndexOutOfRange { index: 0, len: 0 }),
            len => self.remove_at(len - 1),
        }
    }

    /// Removes and returns the element at `index`; equivalent to
    /// [`remove_at`](Self::remove_at).
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::IndexOutOfRange`] if `index >= len`.
    pub fn pop_at(&mut self, index: usize) -> Result<T, IndexSetError> {
        self.remove_at(index)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
        self.hooks.changed(0);
    }

    // -------------------------------------------------------------------------
    // Reordering
    // -------------------------------------------------------------------------

    /// Sorts the elements in ascending natural order.
    ///
    /// See [`try_sort`](Self::try_sort) for element types whose order is partial.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.order.sort();
        self.hooks.changed(self.order.len());
    }

    /// Sorts the elements by their partial order, descending if `reverse`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::IncomparableElements`] if any two elements
    /// cannot be compared. The order is unchanged on failure.
    pub fn try_sort(&mut self, reverse: bool) -> Result<(), IndexSetError>
    where
        T: PartialOrd,
    {
        self.try_sort_by(PartialOrd::partial_cmp, reverse)
    }

    /// Sorts the elements with a fallible comparator, descending if `reverse`.
    ///
    /// The sort is stable.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::IncomparableElements`] if `compare` returns
    /// `None` for any pair. The order is unchanged on failure.
    pub fn try_sort_by<F>(&mut self, mut compare: F, reverse: bool) -> Result<(), IndexSetError>
    where
        F: FnMut(&T, &T) -> Option<Ordering>,
    {
        let order = &self.order;
        let positions = try_merge_sort(
            &(0..order.len()).collect::<Vec<_>>(),
            &mut |left: usize, right: usize| {
                let ordering = compare(&order[left], &order[right])?;
                Some(if reverse { ordering.reverse() } else { ordering })
            },
        )
        .ok_or(IndexSetError::IncomparableElements)?;
        let sorted = positions
            .into_iter()
            .map(|position| self.order[position].clone())
            .collect();
        self.order = sorted;
        self.hooks.changed(self.order.len());
        Ok(())
    }

    /// Sorts the elements by a key, descending if `reverse`.
    ///
    /// The sort is stable.
    pub fn sort_by_key<K, F>(&mut self, mut key: F, reverse: bool)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        if reverse {
            self.order.sort_by(|left, right| key(right).cmp(&key(left)));
        } else {
            self.order.sort_by_key(key);
        }
        self.hooks.changed(self.order.len());
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        self.order.reverse();
        self.hooks.changed(self.order.len());
    }

    // -------------------------------------------------------------------------
    // Set comparisons
    // -------------------------------------------------------------------------

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.members.len() <= other.members.len()
            && self.members.iter().all(|element| other.members.contains(element))
    }

    /// Returns `true` if `self` is a subset of `other` and not equal to it.
    #[must_use]
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.members.len() < other.members.len() && self.is_subset(other)
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and not equal to it.
    #[must_use]
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Checks that `incoming` may be stored once `vacated` has been removed.
    fn ensure_admissible(&self, incoming: &[T], vacated: &[T]) -> Result<(), IndexSetError> {
        self.hooks.check(incoming)?;
        validation::ensure_unique(incoming)?;
        let vacated: FastHashSet<&T> = vacated.iter().collect();
        if incoming
            .iter()
            .any(|element| self.members.contains(element) && !vacated.contains(element))
        {
            return Err(IndexSetError::DuplicateElement);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.order.len() == self.members.len()
            && self.order.iter().all(|element| self.members.contains(element))
    }
}

/// Resolves `range` against a sequence of length `len`, clamping both bounds.
fn clamp_range<R: RangeBounds<usize>>(range: &R, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };
    let end = end.min(len);
    start.min(end)..end
}

/// Stable merge sort of `positions` that gives up on the first incomparable pair.
///
/// The comparator is never assumed to be a total order, so an inconsistent
/// comparator yields some permutation instead of a panic.
fn try_merge_sort<F>(positions: &[usize], compare: &mut F) -> Option<Vec<usize>>
where
    F: FnMut(usize, usize) -> Option<Ordering>,
{
    if positions.len() <= 1 {
        return Some(positions.to_vec());
    }
    let (left, right) = positions.split_at(positions.len() / 2);
    let left = try_merge_sort(left, compare)?;
    let right = try_merge_sort(right, compare)?;

    let mut merged = Vec::with_capacity(positions.len());
    let (mut left_index, mut right_index) = (0, 0);
    while left_index < left.len() && right_index < right.len() {
        if compare(right[right_index], left[left_index])? == Ordering::Less {
            merged.push(right[right_index]);
            right_index += 1;
        } else {
            merged.push(left[left_index]);
            left_index += 1;
        }
    }
    merged.extend_from_slice(&left[left_index..]);
    merged.extend_from_slice(&right[right_index..]);
    Some(merged)
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T, H> Default for OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H> TryFrom<Vec<T>> for OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    type Error = IndexSetError;

    fn try_from(elements: Vec<T>) -> Result<Self, Self::Error> {
        Self::try_from_vec(elements)
    }
}

impl<T, H> PartialEq for OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl<T, H> Eq for OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
}

impl<T, H> PartialOrd for OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.members.len().cmp(&other.members.len()) {
            Ordering::Less if self.is_subset(other) => Some(Ordering::Less),
            Ordering::Greater if other.is_subset(self) => Some(Ordering::Greater),
            Ordering::Equal if self.members == other.members => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl<T: fmt::Debug, H> fmt::Debug for OrderedUniqueSequence<T, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.order.iter()).finish()
    }
}

impl<T, H> fmt::Display for OrderedUniqueSequence<T, H>
where
    T: Clone + Eq + Hash + fmt::Debug,
    H: SequenceHooks<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hooks.labels() {
            Some(labels) => writeln!(formatter, "{}: ({labels})", H::KIND)?,
            None => writeln!(formatter, "{}:", H::KIND)?,
        }
        write!(formatter, "{:?}", self.order)
    }
}

impl<'a, T, H> IntoIterator for &'a OrderedUniqueSequence<T, H> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl<T, H> IntoIterator for OrderedUniqueSequence<T, H> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

#[cfg(feature = "serde")]
impl<T, H> serde::Serialize for OrderedUniqueSequence<T, H>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.order.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, H> serde::Deserialize<'de> for OrderedUniqueSequence<T, H>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
    H: SequenceHooks<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Self::try_from_vec(elements).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
