//! Scalar leaf values and the tagged input variant.
//!
//! [`Scalar`] is the leaf type stored in every [`Tuple`](super::Tuple)
//! dimension: booleans, integers, strings, dates and timestamps. Strings are
//! scalars, never collections.
//!
//! [`Datum`] carries heterogeneous, not-yet-validated input (for example rows
//! extracted from a tabular source) into [`IndexSetNd`](super::IndexSetNd)
//! constructors, which validate it into tuples.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use chrono::{NaiveDate, NaiveDateTime};

use super::ReferenceCounter;

/// A single leaf value of an index-set element.
///
/// Values of the same variant are ordered naturally. Values of different
/// variants are unordered: `partial_cmp` returns `None`, which makes sorting
/// a heterogeneous index-set fail with
/// [`IndexSetError::IncomparableElements`](super::IndexSetError::IncomparableElements).
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::Scalar;
///
/// let city = Scalar::from("Delhi");
/// let period = Scalar::from(3);
///
/// assert_eq!(city.as_str(), Some("Delhi"));
/// assert_eq!(period.as_int(), Some(3));
/// assert!(Scalar::from(1) < Scalar::from(2));
/// assert_eq!(city.partial_cmp(&period), None);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A string label.
    Str(ReferenceCounter<str>),
    /// A calendar date.
    Date(NaiveDate),
    /// A date and time without timezone.
    DateTime(NaiveDateTime),
}

impl Scalar {
    /// Returns the integer value, if this is an `Int`.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string value, if this is a `Str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns a short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "str",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => Some(left.cmp(right)),
            (Self::Int(left), Self::Int(right)) => Some(left.cmp(right)),
            (Self::Str(left), Self::Str(right)) => Some(left.cmp(right)),
            (Self::Date(left), Self::Date(right)) => Some(left.cmp(right)),
            (Self::DateTime(left), Self::DateTime(right)) => Some(left.cmp(right)),
            _ => None,
        }
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Str(value) => write!(formatter, "{:?}", &**value),
            Self::Date(value) => write!(formatter, "{value}"),
            Self::DateTime(value) => write!(formatter, "{value}"),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Str(value) => write!(formatter, "{value}"),
            Self::Date(value) => write!(formatter, "{value}"),
            Self::DateTime(value) => write!(formatter, "{value}"),
        }
    }
}

/// Raw input value for index-set construction.
///
/// `Tuple` and `Collection` are distinguished the same way a tuple and a list
/// are: a `Tuple` is used as an element directly, while a batch made entirely
/// of `Collection` values is coerced into tuples element by element.
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::{Datum, Scalar};
///
/// let nested = Datum::tuple([Datum::from(0), Datum::tuple([Datum::from(1), Datum::from("x")])]);
/// assert_eq!(
///     nested.flatten(),
///     vec![Scalar::from(0), Scalar::from(1), Scalar::from("x")]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Datum {
    /// A single leaf value.
    Scalar(Scalar),
    /// An ordered, fixed group of values.
    Tuple(Vec<Self>),
    /// Any other collection of values (list-like).
    Collection(Vec<Self>),
}

impl Datum {
    /// Builds a `Tuple` datum from its members.
    pub fn tuple<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Tuple(members.into_iter().collect())
    }

    /// Builds a `Collection` datum from its members.
    pub fn collection<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Collection(members.into_iter().collect())
    }

    /// Builds a column of scalar data, one datum per value.
    ///
    /// This is the usual shape of a factor passed to
    /// [`IndexSetNd::product`](super::IndexSetNd::product).
    pub fn column<I, S>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        values.into_iter().map(|value| Self::Scalar(value.into())).collect()
    }

    /// Returns `true` if this is a single leaf value.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns a short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Tuple(_) => "tuple",
            Self::Collection(_) => "collection",
        }
    }

    /// Recursively flattens nested tuples and collections into their scalars.
    #[must_use]
    pub fn flatten(self) -> Vec<Scalar> {
        let mut scalars = Vec::new();
        self.flatten_into(&mut scalars);
        scalars
    }

    fn flatten_into(self, scalars: &mut Vec<Scalar>) {
        match self {
            Self::Scalar(scalar) => scalars.push(scalar),
            Self::Tuple(members) | Self::Collection(members) => {
                for member in members {
                    member.flatten_into(scalars);
                }
            }
        }
    }
}

impl From<Scalar> for Datum {
    #[inline]
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

macro_rules! impl_scalar_from {
    ($($source:ty => $variant:ident via $convert:expr),* $(,)?) => {
        $(
            impl From<$source> for Scalar {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$variant($convert(value))
                }
            }

            impl From<$source> for Datum {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_scalar_from!(
    bool => Bool via std::convert::identity,
    i8 => Int via i64::from,
    i16 => Int via i64::from,
    i32 => Int via i64::from,
    i64 => Int via std::convert::identity,
    u8 => Int via i64::from,
    u16 => Int via i64::from,
    u32 => Int via i64::from,
    &str => Str via ReferenceCounter::<str>::from,
    String => Str via ReferenceCounter::<str>::from,
    ReferenceCounter<str> => Str via std::convert::identity,
    NaiveDate => Date via std::convert::identity,
    NaiveDateTime => DateTime via std::convert::identity,
);

/// Leaf element type of an [`IndexSet1D`](super::IndexSet1D).
///
/// Implemented for [`Scalar`] and the primitive types that convert into it.
/// Tuples and collections are not leaves, so an `IndexSet1D` of them cannot
/// be built; use [`IndexSetNd`](super::IndexSetNd) for tuple elements.
pub trait ScalarValue: Clone + Eq + Hash {}

macro_rules! impl_scalar_value {
    ($($leaf:ty),* $(,)?) => {
        $(impl ScalarValue for $leaf {})*
    };
}

impl_scalar_value!(
    Scalar,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    &str,
    String,
    ReferenceCounter<str>,
    NaiveDate,
    NaiveDateTime,
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_scalar_same_variant_ordering() {
        assert!(Scalar::from(1) < Scalar::from(2));
        assert!(Scalar::from("a") < Scalar::from("b"));
        let early = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(Scalar::from(early) < Scalar::from(late));
    }

    #[rstest]
    fn test_scalar_mixed_variants_are_unordered() {
        assert_eq!(Scalar::from(1).partial_cmp(&Scalar::from("1")), None);
        assert_ne!(Scalar::from(1), Scalar::from("1"));
    }

    #[rstest]
    fn test_scalar_debug_quotes_strings() {
        assert_eq!(format!("{:?}", Scalar::from("A")), "\"A\"");
        assert_eq!(format!("{}", Scalar::from("A")), "A");
        assert_eq!(format!("{:?}", Scalar::from(7)), "7");
    }

    #[rstest]
    fn test_datum_flatten_nested() {
        let datum = Datum::tuple([
            Datum::from(0),
            Datum::tuple([
                Datum::from(1),
                Datum::from(2),
                Datum::collection([Datum::from(3), Datum::from(4)]),
            ]),
        ]);
        let flattened: Vec<Option<i64>> = datum.flatten().iter().map(Scalar::as_int).collect();
        assert_eq!(flattened, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
    }

    #[rstest]
    fn test_datum_flatten_keeps_strings_whole() {
        let datum = Datum::tuple([Datum::from("ab"), Datum::from("cd")]);
        assert_eq!(datum.flatten(), vec![Scalar::from("ab"), Scalar::from("cd")]);
    }

    #[rstest]
    fn test_datum_column() {
        let column = Datum::column(0..3);
        assert_eq!(column.len(), 3);
        assert!(column.iter().all(Datum::is_scalar));
    }
}
