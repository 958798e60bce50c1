//! Parameter dictionaries keyed by index-set elements.
//!
//! A [`ParamDict`] stores one value per key and owns an index-set of its keys
//! as the authoritative key order. Every key insertion or removal is mirrored
//! into that key-set, so the two never diverge, and N-dimensional dictionaries
//! can answer wildcard queries through the key-set's grouping cache.
//!
//! # Examples
//!
//! ```rust
//! use opti_sets::index_set::Tuple;
//! use opti_sets::param_dict::ParamDictNd;
//! use opti_sets::pattern;
//!
//! let mut cost = ParamDictNd::from_pairs([
//!     (Tuple::from(("Delhi", "Pune")), 12.0),
//!     (Tuple::from(("Delhi", "Agra")), 4.5),
//!     (Tuple::from(("Pune", "Agra")), 15.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(cost.subset_values(&pattern!["Delhi", "*"]).unwrap(), vec![&12.0, &4.5]);
//! assert_eq!(cost.lookup(&Tuple::from(("Agra", "Pune"))), 0.0);
//!
//! cost.remove(&Tuple::from(("Delhi", "Pune")));
//! assert_eq!(cost.subset_keys(&pattern!["Delhi", "*"]).unwrap().len(), 1);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::index_set::{
    IndexSetError, Name, OrderedUniqueSequence, PatternValue, ScalarValue, SequenceHooks, Subset,
    Tuple, TupleLayout,
};
use crate::index_set::{BuildHasher, FastHashMap};

/// Dictionary whose keys are mirrored into an ordered unique key-set.
///
/// Iteration follows key insertion order. Overwriting the value of an
/// existing key keeps its position.
///
/// # Type Parameters
///
/// * `K` - The key type.
/// * `V` - The value type.
/// * `H` - The [`SequenceHooks`] of the key-set, which decide the key rules
///   (for example the common tuple width of [`ParamDictNd`] keys).
#[derive(Clone)]
pub struct ParamDict<K, V, H> {
    keys: OrderedUniqueSequence<K, H>,
    values: FastHashMap<K, V>,
    value_name: Option<String>,
}

/// Parameter dictionary with scalar keys.
pub type ParamDict1D<K, V = f64> = ParamDict<K, V, Name>;

/// Parameter dictionary with tuple keys of one common width.
pub type ParamDictNd<V = f64> = ParamDict<Tuple, V, TupleLayout>;

impl<K, V, H> ParamDict<K, V, H>
where
    K: Clone + Eq + Hash,
    H: SequenceHooks<K>,
{
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: OrderedUniqueSequence::new(),
            values: FastHashMap::with_hasher(BuildHasher::default()),
            value_name: None,
        }
    }

    /// Creates a dictionary from key-value pairs, in order.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::DuplicateElement`] if a key repeats, or the
    /// shape error of the key-set (for example
    /// [`IndexSetError::InconsistentTupleWidth`]).
    pub fn from_pairs<I>(pairs: I) -> Result<Self, IndexSetError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let (keys, values): (Vec<K>, Vec<V>) = pairs.into_iter().unzip();
        let key_set = OrderedUniqueSequence::try_from_vec(keys)?;
        let values = key_set.iter().cloned().zip(values).collect();
        Ok(Self {
            keys: key_set,
            values,
            value_name: None,
        })
    }

    /// Stores `value` under `key`, returning the previous value if the key existed.
    ///
    /// A new key is appended to the key-set before the value is stored.
    ///
    /// # Errors
    ///
    /// Returns the key-set's error for a new key it rejects; the dictionary is
    /// unchanged in that case.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, IndexSetError> {
        if let Some(slot) = self.values.get_mut(&key) {
            return Ok(Some(std::mem::replace(slot, value)));
        }
        self.keys.push(key.clone())?;
        self.values.insert(key, value);
        Ok(None)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.values.get_mut(key)
    }

    /// Returns the value stored under `key`, or `V::default()` (zero for
    /// numbers) if absent.
    #[must_use]
    pub fn lookup(&self, key: &K) -> V
    where
        V: Clone + Default,
    {
        self.values.get(key).cloned().unwrap_or_default()
    }

    /// Returns the value under `key`, inserting `default` first if the key is absent.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn get_or_insert(&mut self, key: K, default: V) -> Result<&mut V, IndexSetError> {
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone())?;
        }
        Ok(self.values.entry(key).or_insert(default))
    }

    /// Returns `true` if a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.values.remove(key)?;
        let mirrored = self.keys.remove(key);
        debug_assert!(mirrored.is_ok(), "key-set out of sync with values");
        Some(value)
    }

    /// Removes and returns the most recently inserted key and its value.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let key = self.keys.pop().ok()?;
        let value = self.values.remove(&key)?;
        Some((key, value))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.values.clear();
        self.keys.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns an iterator over the entries in key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> {
        self.keys
            .iter()
            .filter_map(|key| self.values.get(key).map(|value| (key, value)))
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> std::slice::Iter<'_, K> {
        self.keys.iter()
    }

    /// Returns an iterator over the values in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns the key-set.
    #[must_use]
    pub const fn key_set(&self) -> &OrderedUniqueSequence<K, H> {
        &self.keys
    }

    /// Returns the display name of the values, if any.
    #[must_use]
    pub fn value_name(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    /// Sets or clears the display name of the values.
    pub fn set_value_name<S: Into<String>>(&mut self, name: Option<S>) {
        self.value_name = name.map(Into::into);
    }

    /// Returns this dictionary with the values named `name`.
    #[must_use]
    pub fn with_value_name<S: Into<String>>(mut self, name: S) -> Self {
        self.set_value_name(Some(name));
        self
    }

    fn fmt_entries(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Scalar keys
// =============================================================================

impl<K: ScalarValue, V> ParamDict<K, V, Name> {
    /// Returns the display name of the keys, if any.
    #[must_use]
    pub fn key_name(&self) -> Option<&str> {
        self.keys.name()
    }

    /// Sets or clears the display name of the keys.
    pub fn set_key_name<S: Into<String>>(&mut self, name: Option<S>) {
        self.keys.set_name(name);
    }
}

impl<K, V> fmt::Display for ParamDict<K, V, Name>
where
    K: ScalarValue + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.key_name(), self.value_name()) {
            (Some(key_name), Some(value_name)) => {
                writeln!(formatter, "ParamDict1D: {key_name} -> {value_name}")?;
            }
            _ => writeln!(formatter, "ParamDict1D:")?,
        }
        self.fmt_entries(formatter)
    }
}

// =============================================================================
// Tuple keys
// =============================================================================

impl<V> ParamDict<Tuple, V, TupleLayout> {
    /// Returns the per-dimension display names of the keys, if any.
    #[must_use]
    pub fn key_names(&self) -> Option<&[String]> {
        self.keys.names()
    }

    /// Sets or clears the per-dimension display names of the keys.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::NameCountMismatch`] if the number of names
    /// differs from the key width.
    pub fn set_key_names<I, S>(&mut self, names: Option<I>) -> Result<(), IndexSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.set_names(names)
    }

    /// Returns the keys matching `pattern`, in key order.
    ///
    /// # Errors
    ///
    /// The errors of [`IndexSetNd::subset`](crate::index_set::IndexSetNd::subset).
    pub fn subset_keys(&self, pattern: &[PatternValue]) -> Result<Subset, IndexSetError> {
        self.keys.subset(pattern)
    }

    /// Returns the values of the keys matching `pattern`, in key order.
    ///
    /// # Errors
    ///
    /// The errors of [`IndexSetNd::subset`](crate::index_set::IndexSetNd::subset).
    pub fn subset_values(&self, pattern: &[PatternValue]) -> Result<Vec<&V>, IndexSetError> {
        Ok(self
            .keys
            .subset(pattern)?
            .iter()
            .filter_map(|key| self.values.get(key))
            .collect())
    }
}

impl<V: fmt::Debug> fmt::Display for ParamDict<Tuple, V, TupleLayout> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.key_names(), self.value_name()) {
            (Some(key_names), Some(value_name)) => writeln!(
                formatter,
                "ParamDictNd: ({}) -> {value_name}",
                key_names.join(", ")
            )?,
            _ => writeln!(formatter, "ParamDictNd:")?,
        }
        self.fmt_entries(formatter)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K, V, H> Default for ParamDict<K, V, H>
where
    K: Clone + Eq + Hash,
    H: SequenceHooks<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> fmt::Debug for ParamDict<K, V, H>
where
    K: Clone + Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    H: SequenceHooks<K>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_entries(formatter)
    }
}
