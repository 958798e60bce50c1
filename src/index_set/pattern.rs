//! Wildcard patterns for [`IndexSetNd::subset`](super::IndexSetNd::subset).

use chrono::{NaiveDate, NaiveDateTime};

use super::ReferenceCounter;
use super::scalar::{Datum, Scalar};

/// The wildcard token. Matches any value in its dimension.
pub const WILDCARD: &str = "*";

/// One position of a subset pattern.
///
/// Converting the string `"*"` yields [`PatternValue::Wildcard`]; every other
/// value converts to [`PatternValue::Value`]. Use [`PatternValue::literal`] to
/// match the string `"*"` itself.
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::PatternValue;
///
/// assert!(PatternValue::from("*").is_wildcard());
/// assert!(!PatternValue::from("A").is_wildcard());
/// assert!(!PatternValue::literal("*").is_wildcard());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternValue {
    /// Matches any value.
    Wildcard,
    /// Matches exactly this value. Must be a scalar.
    Value(Datum),
}

impl PatternValue {
    /// Builds a pattern value that matches `value` literally, even if it is `"*"`.
    pub fn literal<S: Into<Scalar>>(value: S) -> Self {
        Self::Value(Datum::Scalar(value.into()))
    }

    /// Returns `true` for [`PatternValue::Wildcard`].
    #[inline]
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl From<&str> for PatternValue {
    fn from(value: &str) -> Self {
        if value == WILDCARD {
            Self::Wildcard
        } else {
            Self::Value(Datum::from(value))
        }
    }
}

impl From<Datum> for PatternValue {
    fn from(value: Datum) -> Self {
        Self::Value(value)
    }
}

macro_rules! impl_pattern_value_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for PatternValue {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::Value(Datum::from(value))
                }
            }
        )*
    };
}

impl_pattern_value_from!(
    Scalar,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    String,
    ReferenceCounter<str>,
    NaiveDate,
    NaiveDateTime,
);

/// Builds a `Vec<PatternValue>` for [`IndexSetNd::subset`](crate::index_set::IndexSetNd::subset).
///
/// Each argument is converted with `PatternValue::from`, so `"*"` becomes a
/// wildcard.
///
/// # Examples
///
/// ```rust
/// use opti_sets::index_set::PatternValue;
/// use opti_sets::pattern;
///
/// let pattern = pattern![0, "*", "B"];
/// assert_eq!(pattern.len(), 3);
/// assert_eq!(pattern[1], PatternValue::Wildcard);
/// ```
#[macro_export]
macro_rules! pattern {
    ($($value:expr),* $(,)?) => {
        ::std::vec![$($crate::index_set::PatternValue::from($value)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_wildcard_conversion() {
        assert_eq!(PatternValue::from(WILDCARD), PatternValue::Wildcard);
        assert_eq!(
            PatternValue::literal(WILDCARD),
            PatternValue::Value(Datum::from("*"))
        );
    }

    #[rstest]
    fn test_pattern_macro_mixes_types() {
        let pattern = crate::pattern![1, "*", "x", true];
        assert_eq!(
            pattern,
            vec![
                PatternValue::Value(Datum::from(1)),
                PatternValue::Wildcard,
                PatternValue::Value(Datum::from("x")),
                PatternValue::Value(Datum::from(true)),
            ]
        );
    }
}
