//! Validator predicates shared by the index-set types.
//!
//! Each rule is a separate function returning `Result<(), IndexSetError>` (or
//! the validated value), so that the constructors and query operations can
//! chain them in the order they report errors.

use std::hash::Hash;

use super::error::IndexSetError;
use super::pattern::PatternValue;
use super::scalar::Datum;
use super::tuple::Tuple;
use super::{BuildHasher, FastHashSet};

/// Fails if `batch` holds the same element twice.
pub(crate) fn ensure_unique<T: Hash + Eq>(batch: &[T]) -> Result<(), IndexSetError> {
    let mut seen = FastHashSet::with_capacity_and_hasher(batch.len(), BuildHasher::default());
    if batch.iter().all(|element| seen.insert(element)) {
        Ok(())
    } else {
        Err(IndexSetError::DuplicateElement)
    }
}

/// Converts a datum into a tuple element.
///
/// Only a `Datum::Tuple` whose members are all scalars qualifies.
pub(crate) fn into_tuple(datum: Datum) -> Result<Tuple, IndexSetError> {
    match datum {
        Datum::Tuple(members) => members
            .into_iter()
            .map(|member| match member {
                Datum::Scalar(scalar) => Ok(scalar),
                other => Err(IndexSetError::InvalidElementType {
                    expected: "scalar tuple member",
                    found: other.kind(),
                }),
            })
            .collect(),
        other => Err(IndexSetError::InvalidElementType {
            expected: "tuple",
            found: other.kind(),
        }),
    }
}

/// Re-tags every element as a tuple when the whole batch is made of collections.
///
/// A mixed batch is returned unchanged, leaving [`into_tuple`] to reject the
/// collections in it.
pub(crate) fn coerce_collections(batch: Vec<Datum>) -> Vec<Datum> {
    let all_collections =
        !batch.is_empty() && batch.iter().all(|datum| matches!(datum, Datum::Collection(_)));
    if !all_collections {
        return batch;
    }
    batch
        .into_iter()
        .map(|datum| match datum {
            Datum::Collection(members) => Datum::Tuple(members),
            other => other,
        })
        .collect()
}

/// Checks that every tuple in `batch` has the same length as `established`,
/// or, when no width is established yet, as the first tuple of the batch.
///
/// Returns the width the batch conforms to, or `None` for an empty batch
/// without an established width.
pub(crate) fn ensure_width(
    batch: &[Tuple],
    established: Option<usize>,
) -> Result<Option<usize>, IndexSetError> {
    let Some(expected) = established.or_else(|| batch.first().map(Tuple::len)) else {
        return Ok(None);
    };
    match batch.iter().find(|tuple| tuple.len() != expected) {
        Some(tuple) => Err(IndexSetError::InconsistentTupleWidth {
            expected,
            found: tuple.len(),
        }),
        None => Ok(Some(expected)),
    }
}

/// Fails on the first non-wildcard pattern value that is not a scalar.
pub(crate) fn ensure_scalar_pattern(pattern: &[PatternValue]) -> Result<(), IndexSetError> {
    match pattern
        .iter()
        .position(|value| matches!(value, PatternValue::Value(datum) if !datum.is_scalar()))
    {
        Some(position) => Err(IndexSetError::NonScalarPatternValue { position }),
        None => Ok(()),
    }
}

/// Fails unless `pattern` has one value per dimension and narrows on at least
/// one but not all of them.
pub(crate) fn ensure_pattern_shape(
    pattern: &[PatternValue],
    width: usize,
) -> Result<(), IndexSetError> {
    if pattern.len() != width {
        return Err(IndexSetError::PatternLengthMismatch {
            expected: width,
            found: pattern.len(),
        });
    }
    let wildcards = pattern.iter().filter(|value| value.is_wildcard()).count();
    if wildcards == pattern.len() {
        Err(IndexSetError::AllWildcardsOrNoWildcards {
            all_wildcards: true,
        })
    } else if wildcards == 0 {
        Err(IndexSetError::AllWildcardsOrNoWildcards {
            all_wildcards: false,
        })
    } else {
        Ok(())
    }
}

/// Validates the dimension indices of a projection onto some, but not all,
/// dimensions of tuples of length `width`.
pub(crate) fn ensure_projection(dimensions: &[usize], width: usize) -> Result<(), IndexSetError> {
    if dimensions.is_empty() {
        return Err(IndexSetError::NoDimensionsGiven);
    }
    ensure_dimensions_in_range(dimensions, width)?;
    if dimensions.len() == width {
        return Err(IndexSetError::AllDimensionsGiven { width });
    }
    Ok(())
}

/// Fails with every dimension index that is not below `width`.
pub(crate) fn ensure_dimensions_in_range(
    dimensions: &[usize],
    width: usize,
) -> Result<(), IndexSetError> {
    let invalid: Vec<usize> = dimensions
        .iter()
        .copied()
        .filter(|&dimension| dimension >= width)
        .collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(IndexSetError::DimensionIndexOutOfRange { invalid, width })
    }
}

/// Fails unless exactly `expected` names were supplied.
pub(crate) const fn ensure_name_count(expected: usize, found: usize) -> Result<(), IndexSetError> {
    if expected == found {
        Ok(())
    } else {
        Err(IndexSetError::NameCountMismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_set::Scalar;
    use rstest::rstest;

    #[rstest]
    fn test_ensure_unique() {
        assert_eq!(ensure_unique(&[1, 2, 3]), Ok(()));
        assert_eq!(
            ensure_unique(&[1, 2, 1]),
            Err(IndexSetError::DuplicateElement)
        );
        assert_eq!(ensure_unique::<i32>(&[]), Ok(()));
    }

    #[rstest]
    fn test_into_tuple_accepts_scalar_members() {
        let tuple = into_tuple(Datum::from((1, "x"))).unwrap();
        assert_eq!(tuple, Tuple::from((1, "x")));
    }

    #[rstest]
    #[case(Datum::from(1), "tuple", "scalar")]
    #[case(Datum::collection([Datum::from(1)]), "tuple", "collection")]
    #[case(Datum::from(((1, 2), 3)), "scalar tuple member", "tuple")]
    fn test_into_tuple_rejects(
        #[case] datum: Datum,
        #[case] expected: &'static str,
        #[case] found: &'static str,
    ) {
        assert_eq!(
            into_tuple(datum),
            Err(IndexSetError::InvalidElementType { expected, found })
        );
    }

    #[rstest]
    fn test_coerce_collections_all_or_nothing() {
        let coerced = coerce_collections(vec![
            Datum::collection([Datum::from(1), Datum::from(2)]),
            Datum::collection([Datum::from(3), Datum::from(4)]),
        ]);
        assert!(coerced.iter().all(|datum| matches!(datum, Datum::Tuple(_))));

        let mixed = coerce_collections(vec![
            Datum::collection([Datum::from(1)]),
            Datum::from((2,)),
        ]);
        assert!(matches!(mixed[0], Datum::Collection(_)));
    }

    #[rstest]
    #[case(None, Ok(Some(2)))]
    #[case(Some(2), Ok(Some(2)))]
    #[case(Some(3), Err(IndexSetError::InconsistentTupleWidth { expected: 3, found: 2 }))]
    fn test_ensure_width(
        #[case] established: Option<usize>,
        #[case] expected: Result<Option<usize>, IndexSetError>,
    ) {
        let batch = [Tuple::from((1, 2)), Tuple::from((3, 4))];
        assert_eq!(ensure_width(&batch, established), expected);
    }

    #[rstest]
    fn test_ensure_width_reports_first_mismatch() {
        let batch = [Tuple::from(("F1", 1)), Tuple::from(("F2", 1, 2))];
        assert_eq!(
            ensure_width(&batch, None),
            Err(IndexSetError::InconsistentTupleWidth {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(ensure_width(&[], None), Ok(None));
    }

    #[rstest]
    fn test_ensure_scalar_pattern() {
        let pattern = [
            PatternValue::Wildcard,
            PatternValue::Value(Datum::from(1)),
            PatternValue::Value(Datum::from((1, 2))),
        ];
        assert_eq!(
            ensure_scalar_pattern(&pattern),
            Err(IndexSetError::NonScalarPatternValue { position: 2 })
        );
        assert_eq!(ensure_scalar_pattern(&pattern[..2]), Ok(()));
    }

    #[rstest]
    #[case(vec![PatternValue::Wildcard, PatternValue::Wildcard], Err(IndexSetError::AllWildcardsOrNoWildcards { all_wildcards: true }))]
    #[case(vec![PatternValue::from(0), PatternValue::from(1)], Err(IndexSetError::AllWildcardsOrNoWildcards { all_wildcards: false }))]
    #[case(vec![PatternValue::from(0), PatternValue::from(1), PatternValue::from(2)], Err(IndexSetError::PatternLengthMismatch { expected: 2, found: 3 }))]
    #[case(vec![PatternValue::from(0), PatternValue::Wildcard], Ok(()))]
    fn test_ensure_pattern_shape(
        #[case] pattern: Vec<PatternValue>,
        #[case] expected: Result<(), IndexSetError>,
    ) {
        assert_eq!(ensure_pattern_shape(&pattern, 2), expected);
    }

    #[rstest]
    #[case(&[], Err(IndexSetError::NoDimensionsGiven))]
    #[case(&[0, 3, 5], Err(IndexSetError::DimensionIndexOutOfRange { invalid: vec![3, 5], width: 3 }))]
    #[case(&[2, 0, 1], Err(IndexSetError::AllDimensionsGiven { width: 3 }))]
    #[case(&[0, 0, 0], Err(IndexSetError::AllDimensionsGiven { width: 3 }))]
    #[case(&[2, 0], Ok(()))]
    #[case(&[1, 1], Ok(()))]
    fn test_ensure_projection(
        #[case] dimensions: &[usize],
        #[case] expected: Result<(), IndexSetError>,
    ) {
        assert_eq!(ensure_projection(dimensions, 3), expected);
    }

    #[rstest]
    fn test_ensure_name_count() {
        assert_eq!(ensure_name_count(2, 2), Ok(()));
        assert_eq!(
            ensure_name_count(2, 1),
            Err(IndexSetError::NameCountMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[rstest]
    fn test_into_tuple_keeps_member_order() {
        let tuple = into_tuple(Datum::from(("b", "a", 3))).unwrap();
        let members: Vec<&Scalar> = tuple.iter().collect();
        assert_eq!(
            members,
            vec![&Scalar::from("b"), &Scalar::from("a"), &Scalar::from(3)]
        );
    }
}
