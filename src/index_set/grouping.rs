//! Dimension-wise grouping of tuple elements and its memoization cache.
//!
//! A [`Grouping`] partitions the elements of an index-set by their projected
//! key on a fixed combination of dimensions. The [`GroupCache`] keeps one
//! grouping per dimension combination until the next structural mutation of
//! the owning set, which drops every entry at once.

use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

use super::tuple::Tuple;
use super::{BuildHasher, FastHashMap, ReferenceCounter};

/// Dimension-index combination used as cache key.
pub(crate) type Dimensions = SmallVec<[usize; 4]>;

// =============================================================================
// Grouping
// =============================================================================

/// Elements grouped by their projected key.
///
/// Keys are kept in first-occurrence order; members of each group keep the
/// relative order they have in the owning set.
#[derive(Debug)]
pub(crate) struct Grouping {
    keys: Vec<Tuple>,
    members: Vec<Vec<Tuple>>,
    slots: FastHashMap<Tuple, usize>,
}

impl Grouping {
    /// Scans `elements` once and groups them by their projection onto `dimensions`.
    ///
    /// Every dimension index must be below the width of every element.
    pub(crate) fn build(elements: &[Tuple], dimensions: &[usize]) -> Self {
        let mut grouping = Self {
            keys: Vec::new(),
            members: Vec::new(),
            slots: FastHashMap::with_hasher(BuildHasher::default()),
        };
        for element in elements {
            let key = element.project(dimensions);
            let slot = match grouping.slots.get(&key) {
                Some(&slot) => slot,
                None => {
                    let slot = grouping.keys.len();
                    grouping.slots.insert(key.clone(), slot);
                    grouping.keys.push(key);
                    grouping.members.push(Vec::new());
                    slot
                }
            };
            grouping.members[slot].push(element.clone());
        }
        grouping
    }

    /// Returns the distinct projected keys in first-occurrence order.
    pub(crate) fn keys(&self) -> &[Tuple] {
        &self.keys
    }

    /// Returns the slot of the group whose key is `key`.
    pub(crate) fn slot_of(&self, key: &Tuple) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Returns the number of groups.
    pub(crate) fn group_count(&self) -> usize {
        self.keys.len()
    }

    fn members(&self, slot: usize) -> &[Tuple] {
        &self.members[slot]
    }
}

// =============================================================================
// GroupCache
// =============================================================================

/// Memoized groupings keyed by dimension combination.
#[derive(Clone, Debug, Default)]
pub(crate) struct GroupCache {
    entries: FastHashMap<Dimensions, ReferenceCounter<Grouping>>,
}

impl GroupCache {
    /// Returns the grouping on `dimensions`, building and storing it on a miss.
    pub(crate) fn get_or_build(
        &mut self,
        elements: &[Tuple],
        dimensions: &[usize],
    ) -> ReferenceCounter<Grouping> {
        if let Some(grouping) = self.entries.get(dimensions) {
            log::trace!("grouping cache hit dimensions={dimensions:?}");
            return ReferenceCounter::clone(grouping);
        }
        let grouping = ReferenceCounter::new(Grouping::build(elements, dimensions));
        log::debug!(
            "built grouping dimensions={:?} groups={} elements={}",
            dimensions,
            grouping.group_count(),
            elements.len()
        );
        self.entries.insert(
            Dimensions::from_slice(dimensions),
            ReferenceCounter::clone(&grouping),
        );
        grouping
    }

    /// Drops every cached grouping.
    pub(crate) fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            log::trace!("invalidated {} cached grouping(s)", self.entries.len());
            self.entries.clear();
        }
    }

    /// Returns `true` if a grouping on `dimensions` is cached.
    pub(crate) fn contains(&self, dimensions: &[usize]) -> bool {
        self.entries.contains_key(dimensions)
    }

    /// Returns the number of cached groupings.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

// =============================================================================
// Subset
// =============================================================================

/// Elements matched by [`IndexSetNd::subset`](super::IndexSetNd::subset).
///
/// A `Subset` shares the cached group it was read from, so obtaining it does
/// not copy any element. It dereferences to `[Tuple]` and stays valid (as a
/// snapshot) after the owning set is mutated.
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::{IndexSetNd, Tuple};
/// use opti_sets::pattern;
///
/// let set = IndexSetNd::from_tuples([(0, "A"), (1, "B"), (0, "C")]).unwrap();
/// let matched = set.subset(&pattern![0, "*"]).unwrap();
///
/// assert_eq!(matched.len(), 2);
/// assert_eq!(matched[1], Tuple::from((0, "C")));
/// assert!(set.subset(&pattern![7, "*"]).unwrap().is_empty());
/// ```
#[derive(Clone)]
pub struct Subset {
    grouping: ReferenceCounter<Grouping>,
    slot: Option<usize>,
}

impl Subset {
    pub(crate) const fn new(grouping: ReferenceCounter<Grouping>, slot: Option<usize>) -> Self {
        Self { grouping, slot }
    }

    /// Returns the matched elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Tuple] {
        match self.slot {
            Some(slot) => self.grouping.members(slot),
            None => &[],
        }
    }

    /// Copies the matched elements into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Tuple> {
        self.as_slice().to_vec()
    }
}

impl Deref for Subset {
    type Target = [Tuple];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a Subset {
    type Item = &'a Tuple;
    type IntoIter = std::slice::Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl PartialEq for Subset {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Subset {}

impl PartialEq<[Tuple]> for Subset {
    fn eq(&self, other: &[Tuple]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<Vec<Tuple>> for Subset {
    fn eq(&self, other: &Vec<Tuple>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl fmt::Debug for Subset {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.as_slice()).finish()
    }
}
