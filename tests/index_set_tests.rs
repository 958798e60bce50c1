//! Integration tests for `IndexSet1D` and `IndexSetNd`.

use opti_sets::index_set::{
    Datum, IndexSet1D, IndexSetError, IndexSetNd, OrderedUniqueSequence, PatternValue, Scalar,
    Squeezed, Tuple,
};
use opti_sets::pattern;
use rstest::{fixture, rstest};

#[fixture]
fn arcs() -> IndexSetNd {
    IndexSetNd::from_tuples([
        (0, 7, "A"),
        (0, 8, "B"),
        (0, 9, "B"),
        (1, 7, "A"),
        (1, 8, "B"),
    ])
    .unwrap()
}

fn tuples<const N: usize, E: Into<Tuple>>(elements: [E; N]) -> Vec<Tuple> {
    elements.into_iter().map(Into::into).collect()
}

// =============================================================================
// subset
// =============================================================================

#[rstest]
fn test_subset_single_fixed_dimension(arcs: IndexSetNd) {
    let matched = arcs.subset(&pattern![0, "*", "*"]).unwrap();
    assert_eq!(matched, tuples([(0, 7, "A"), (0, 8, "B"), (0, 9, "B")]));
}

#[rstest]
fn test_subset_two_fixed_dimensions(arcs: IndexSetNd) {
    let matched = arcs.subset(&pattern![0, "*", "B"]).unwrap();
    assert_eq!(matched, tuples([(0, 8, "B"), (0, 9, "B")]));
}

#[rstest]
fn test_subset_without_match_is_empty(arcs: IndexSetNd) {
    let matched = arcs.subset(&pattern![5, "*", "A"]).unwrap();
    assert!(matched.is_empty());
}

#[rstest]
fn test_subset_on_empty_set() {
    let set = IndexSetNd::new();
    assert_eq!(
        set.subset(&pattern![0, "*"]).unwrap_err(),
        IndexSetError::EmptyCollection
    );
}

#[rstest]
#[case(pattern!["*", "*"], IndexSetError::AllWildcardsOrNoWildcards { all_wildcards: true })]
#[case(pattern![0, 1], IndexSetError::AllWildcardsOrNoWildcards { all_wildcards: false })]
#[case(pattern![0, 1, 2], IndexSetError::PatternLengthMismatch { expected: 2, found: 3 })]
#[case(pattern!["*"], IndexSetError::PatternLengthMismatch { expected: 2, found: 1 })]
fn test_subset_rejects_malformed_pattern(
    #[case] pattern: Vec<PatternValue>,
    #[case] expected: IndexSetError,
) {
    let set = IndexSetNd::product([Datum::column(0..2), Datum::column(0..2)]).unwrap();
    assert_eq!(set.subset(&pattern).unwrap_err(), expected);
}

#[rstest]
fn test_subset_literal_star_value() {
    let set = IndexSetNd::from_tuples([("*", 1), ("x", 1)]).unwrap();
    let matched = set
        .subset(&[PatternValue::literal("*"), PatternValue::Wildcard])
        .unwrap();
    assert_eq!(matched, tuples([("*", 1)]));
}

#[rstest]
fn test_subset_reflects_append_after_query() {
    let mut set = IndexSetNd::product([Datum::column(0..2), Datum::column(0..2)]).unwrap();
    assert_eq!(
        set.subset(&pattern![0, "*"]).unwrap(),
        tuples([(0, 0), (0, 1)])
    );

    set.push(Tuple::from((0, 9))).unwrap();

    assert_eq!(
        set.subset(&pattern![0, "*"]).unwrap(),
        tuples([(0, 0), (0, 1), (0, 9)])
    );
}

#[rstest]
fn test_subset_reflects_removal_after_query(arcs: IndexSetNd) {
    let mut set = arcs;
    let before = set.subset(&pattern!["*", "*", "B"]).unwrap();
    set.remove(&Tuple::from((0, 9, "B"))).unwrap();
    let after = set.subset(&pattern!["*", "*", "B"]).unwrap();

    assert_eq!(before.len(), 3);
    assert_eq!(after, tuples([(0, 8, "B"), (1, 8, "B")]));
}

#[rstest]
fn test_subset_reflects_sort_after_query(arcs: IndexSetNd) {
    let mut set = arcs;
    set.subset(&pattern!["*", 7, "*"]).unwrap();
    set.try_sort(true).unwrap();
    assert_eq!(
        set.subset(&pattern!["*", 7, "*"]).unwrap(),
        tuples([(1, 7, "A"), (0, 7, "A")])
    );
}

// =============================================================================
// squeeze
// =============================================================================

#[rstest]
fn test_squeeze_one_dimension(arcs: IndexSetNd) {
    let squeezed = arcs.squeeze(&[0]).unwrap();
    let Squeezed::OneDim(origins) = squeezed else {
        panic!("expected a one-dimensional projection");
    };
    assert_eq!(origins.as_slice(), &[Scalar::from(0), Scalar::from(1)]);
    assert_eq!(origins.name(), None);
}

#[rstest]
fn test_squeeze_two_dimensions(arcs: IndexSetNd) {
    let squeezed = arcs.squeeze(&[1, 2]).unwrap().into_multi_dim().unwrap();
    assert_eq!(squeezed.to_vec(), tuples([(7, "A"), (8, "B"), (9, "B")]));
    assert_eq!(squeezed.width(), Some(2));
}

#[rstest]
fn test_squeeze_follows_dimension_order(arcs: IndexSetNd) {
    let squeezed = arcs.squeeze(&[2, 0]).unwrap().into_multi_dim().unwrap();
    assert_eq!(
        squeezed.to_vec(),
        tuples([("A", 0), ("B", 0), ("A", 1), ("B", 1)])
    );
}

#[rstest]
#[case(&[], IndexSetError::NoDimensionsGiven)]
#[case(&[0, 4, 3], IndexSetError::DimensionIndexOutOfRange { invalid: vec![4, 3], width: 3 })]
#[case(&[0, 1, 2], IndexSetError::AllDimensionsGiven { width: 3 })]
fn test_squeeze_rejects_dimensions(
    arcs: IndexSetNd,
    #[case] dimensions: &[usize],
    #[case] expected: IndexSetError,
) {
    assert_eq!(arcs.squeeze(dimensions).unwrap_err(), expected);
}

#[rstest]
fn test_squeeze_on_empty_set() {
    assert_eq!(
        IndexSetNd::new().squeeze(&[]).unwrap_err(),
        IndexSetError::EmptyCollection
    );
}

#[rstest]
fn test_squeeze_reflects_clear_and_refill(arcs: IndexSetNd) {
    let mut set = arcs;
    assert_eq!(set.squeeze(&[0]).unwrap().len(), 2);
    set.clear();
    assert_eq!(set.squeeze(&[0]), Err(IndexSetError::EmptyCollection));

    set.extend(tuples([(5, 6), (5, 7)])).unwrap();
    let origins = set.squeeze(&[0]).unwrap().into_one_dim().unwrap();
    assert_eq!(origins.as_slice(), &[Scalar::from(5)]);
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_product_of_two_columns() {
    let set = IndexSetNd::product([Datum::column(["F1", "F2", "F3"]), Datum::column(0..2)])
        .unwrap();
    assert_eq!(
        set.to_vec(),
        tuples([
            ("F1", 0),
            ("F1", 1),
            ("F2", 0),
            ("F2", 1),
            ("F3", 0),
            ("F3", 1)
        ])
    );
}

#[rstest]
fn test_product_with_empty_factor_is_empty() {
    let set = IndexSetNd::product([Datum::column(["F1"]), Datum::column(0..0)]).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.width(), None);
}

#[rstest]
fn test_duplicate_construction_fails() {
    assert_eq!(
        IndexSetNd::from_tuples([("F1", 1), ("F1", 1), ("F2", 1)]).unwrap_err(),
        IndexSetError::DuplicateElement
    );
}

#[rstest]
fn test_width_mismatch_construction_fails() {
    let result = IndexSetNd::from_data(vec![Datum::from(("F1", 1)), Datum::from(("F2", 1, 2))]);
    assert_eq!(
        result.unwrap_err(),
        IndexSetError::InconsistentTupleWidth {
            expected: 2,
            found: 3
        }
    );
}

#[rstest]
fn test_from_data_rejects_mixed_collections() {
    let result = IndexSetNd::from_data(vec![
        Datum::collection([Datum::from(1), Datum::from(2)]),
        Datum::from((3, 4)),
    ]);
    assert_eq!(
        result.unwrap_err(),
        IndexSetError::InvalidElementType {
            expected: "tuple",
            found: "collection"
        }
    );
}

// =============================================================================
// Sequence semantics
// =============================================================================

#[rstest]
fn test_failed_extend_is_no_op() {
    let mut set = IndexSet1D::try_from_vec(vec![1, 2, 3]).unwrap();
    assert_eq!(set.extend([4, 5, 2]), Err(IndexSetError::DuplicateElement));
    assert_eq!(set.extend([4, 4]), Err(IndexSetError::DuplicateElement));
    assert_eq!(set.as_slice(), &[1, 2, 3]);
    assert!(!set.contains(&4));
}

#[rstest]
fn test_failed_concat_in_place_is_no_op() {
    let mut set = IndexSet1D::try_from_vec(vec!['a', 'b']).unwrap();
    assert_eq!(
        set.concat_in_place(['c', 'a']),
        Err(IndexSetError::DuplicateElement)
    );
    assert_eq!(set.as_slice(), &['a', 'b']);
}

#[rstest]
#[case(0, Ok(1))]
#[case(2, Ok(3))]
#[case(3, Err(IndexSetError::IndexOutOfRange { index: 3, len: 3 }))]
fn test_get(#[case] index: usize, #[case] expected: Result<i32, IndexSetError>) {
    let set = IndexSet1D::try_from_vec(vec![1, 2, 3]).unwrap();
    assert_eq!(set.get(index).copied(), expected);
}

#[rstest]
fn test_insert_past_end_appends() {
    let mut set = IndexSet1D::try_from_vec(vec![1, 2]).unwrap();
    set.insert(10, 3).unwrap();
    set.insert(0, 0).unwrap();
    assert_eq!(set.as_slice(), &[0, 1, 2, 3]);
}

#[rstest]
fn test_pop_and_remove() {
    let mut set = IndexSet1D::try_from_vec(vec!["x", "y", "z"]).unwrap();
    assert_eq!(set.pop(), Ok("z"));
    assert_eq!(set.pop_at(0), Ok("x"));
    assert_eq!(set.remove(&"q"), Err(IndexSetError::ElementNotFound));
    assert_eq!(set.remove(&"y"), Ok("y"));
    assert_eq!(
        set.pop(),
        Err(IndexSetError::IndexOutOfRange { index: 0, len: 0 })
    );
}

#[rstest]
fn test_index_of() {
    let set = IndexSet1D::try_from_vec(vec![10, 20, 30, 40]).unwrap();
    assert_eq!(set.index_of(&30), Ok(2));
    assert_eq!(set.index_of(&99), Err(IndexSetError::ElementNotFound));
    assert_eq!(set.index_of_within(&30, 1..3), Ok(2));
    assert_eq!(
        set.index_of_within(&40, 1..3),
        Err(IndexSetError::ElementNotFound)
    );
}

#[rstest]
fn test_iteration_is_restartable() {
    let set = IndexSet1D::try_from_vec(vec![1, 2, 3]).unwrap();
    let forward: Vec<i32> = set.iter().copied().collect();
    let again: Vec<i32> = set.iter().copied().collect();
    let backward: Vec<i32> = set.iter_reversed().copied().collect();
    assert_eq!(forward, again);
    assert_eq!(backward, vec![3, 2, 1]);
}

#[rstest]
fn test_sort_heterogeneous_scalars_fails() {
    let mut set = IndexSet1D::try_from_vec(vec![Scalar::from(2), Scalar::from("a")]).unwrap();
    assert_eq!(set.try_sort(false), Err(IndexSetError::IncomparableElements));
    assert_eq!(set.as_slice(), &[Scalar::from(2), Scalar::from("a")]);
}

#[rstest]
#[case(50)]
#[case(64)]
#[case(257)]
fn test_sort_many_mixed_scalars_fails_without_reordering(#[case] count: i64) {
    let elements: Vec<Scalar> = (0..count)
        .map(|value| {
            if value % 7 == 3 {
                Scalar::from(format!("s{value}"))
            } else {
                Scalar::from(count - value)
            }
        })
        .collect();
    let mut set = IndexSet1D::try_from_vec(elements.clone()).unwrap();
    assert_eq!(set.try_sort(false), Err(IndexSetError::IncomparableElements));
    assert_eq!(set.try_sort(true), Err(IndexSetError::IncomparableElements));
    assert_eq!(set.to_vec(), elements);
}

#[rstest]
fn test_sort_many_mixed_tuples_fails_and_keeps_cache_usable() {
    let elements: Vec<Tuple> = (0..60)
        .map(|value| {
            if value % 10 == 0 {
                Tuple::from((format!("p{value}"), value))
            } else {
                Tuple::from((value % 13, value))
            }
        })
        .collect();
    let mut set = IndexSetNd::from_tuples(elements.clone()).unwrap();
    let before = set.subset(&pattern!["*", 20]).unwrap().to_vec();

    assert_eq!(set.try_sort(false), Err(IndexSetError::IncomparableElements));
    assert_eq!(set.to_vec(), elements);
    assert_eq!(set.subset(&pattern!["*", 20]).unwrap().to_vec(), before);
}

#[rstest]
fn test_try_sort_many_scalars_descending() {
    let elements: Vec<Scalar> = (0..80).map(|value| Scalar::from((value * 29) % 83)).collect();
    let mut set = IndexSet1D::try_from_vec(elements).unwrap();
    set.try_sort(true).unwrap();

    let values: Vec<i64> = set.iter().map(|value| value.as_int().unwrap()).collect();
    assert!(values.windows(2).all(|pair| pair[0] > pair[1]));
}

#[rstest]
fn test_sort_by_key_descending() {
    let mut set = IndexSet1D::try_from_vec(vec!["bb", "a", "ccc"]).unwrap();
    set.sort_by_key(|value| value.len(), true);
    assert_eq!(set.as_slice(), &["ccc", "bb", "a"]);
}

#[rstest]
fn test_set_comparisons() {
    let small: OrderedUniqueSequence<i32> = OrderedUniqueSequence::try_from_vec(vec![1, 2]).unwrap();
    let large: OrderedUniqueSequence<i32> = OrderedUniqueSequence::try_from_vec(vec![3, 2, 1]).unwrap();
    let same: OrderedUniqueSequence<i32> = OrderedUniqueSequence::try_from_vec(vec![2, 1]).unwrap();

    assert!(small < large);
    assert!(small <= same);
    assert!(small == same);
    assert!(large > small);
    assert!(large >= same);
    assert!(small != large);
    assert!(small.is_proper_subset(&large));
    assert!(!small.is_proper_subset(&same));
    assert!(large.is_proper_superset(&same));
}

#[rstest]
fn test_is_within_factors(arcs: IndexSetNd) {
    let factor = |values: Vec<Scalar>| IndexSet1D::try_from_vec(values).unwrap();
    let origins = factor(vec![Scalar::from(0), Scalar::from(1)]);
    let nodes = factor(vec![Scalar::from(7), Scalar::from(8), Scalar::from(9)]);
    let kinds = factor(vec![Scalar::from("A"), Scalar::from("B")]);
    let few_kinds = factor(vec![Scalar::from("A")]);

    assert_eq!(
        arcs.is_within(&[origins.clone(), nodes.clone(), kinds]),
        Ok(true)
    );
    assert_eq!(arcs.is_within(&[origins, nodes, few_kinds]), Ok(false));
}

#[rstest]
fn test_display_with_names(arcs: IndexSetNd) {
    let set = IndexSetNd::from_tuples([(0, "A")])
        .unwrap()
        .with_names(["NODE", "KIND"])
        .unwrap();
    assert_eq!(set.to_string(), "IndexSetNd: (NODE, KIND)\n[(0, \"A\")]");
    assert_eq!(
        arcs.to_string().lines().next(),
        Some("IndexSetNd:")
    );
}
