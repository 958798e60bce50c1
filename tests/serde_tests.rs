#![cfg(feature = "serde")]
//! Serialization tests for scalars, tuples and index-sets.

use opti_sets::index_set::{IndexSet1D, IndexSetNd, Scalar, Tuple};
use rstest::rstest;

#[rstest]
fn test_index_set_1d_serializes_as_sequence() {
    let set = IndexSet1D::try_from_vec(vec!["Delhi", "Pune"]).unwrap();
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"["Delhi","Pune"]"#);
}

#[rstest]
fn test_index_set_1d_deserialize_rejects_duplicates() {
    let result: Result<IndexSet1D<i32>, _> = serde_json::from_str("[1, 2, 1]");
    let error = result.unwrap_err().to_string();
    assert!(error.contains("duplicate"));
}

#[rstest]
fn test_index_set_nd_round_trip_keeps_order() {
    let set = IndexSetNd::from_tuples([(2, "b"), (1, "a")]).unwrap();
    let json = serde_json::to_string(&set).unwrap();
    let restored: IndexSetNd = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.to_vec(), set.to_vec());
    assert_eq!(restored.width(), Some(2));
}

#[rstest]
fn test_index_set_nd_deserialize_rejects_width_mismatch() {
    let set = IndexSetNd::from_tuples([(1, 2)]).unwrap();
    let mut value = serde_json::to_value(&set).unwrap();
    let element = serde_json::to_value(Tuple::from((3, 4, 5))).unwrap();
    value.as_array_mut().unwrap().push(element);

    let result: Result<IndexSetNd, _> = serde_json::from_value(value);
    assert!(result.unwrap_err().to_string().contains("length 3"));
}

#[rstest]
fn test_scalar_round_trip() {
    let scalars = vec![Scalar::from(true), Scalar::from(-4), Scalar::from("x")];
    let json = serde_json::to_string(&scalars).unwrap();
    let restored: Vec<Scalar> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, scalars);
}
