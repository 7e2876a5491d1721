use crate::graph::{Graph, NodeId};
use num_traits::Float;
use std::fmt::Debug;

/// Checks that the nodes `ids` hold values within `tolerance` of `expected`.
/// Panics if lengths differ, a node has no value, or a value differs
/// significantly.
pub fn check_values_near<T: Float + Debug>(
    graph: &Graph<T>,
    ids: &[NodeId],
    expected: &[T],
    tolerance: T,
) {
    assert_eq!(ids.len(), expected.len(), "Length mismatch");

    for (id, e) in ids.iter().zip(expected.iter()) {
        let actual = graph
            .value(*id)
            .unwrap_or_else(|err| panic!("check_values_near: {}", err))
            .unwrap_or_else(|| panic!("Node {} has no value", id));
        let diff = (actual - *e).abs();
        if !(diff <= tolerance) {
            panic!(
                "Value mismatch at node {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                id, actual, e, diff, tolerance
            );
        }
    }
}

/// Checks that the Input nodes `ids` carry gradients within `tolerance` of
/// `expected` after a backward pass.
pub fn check_gradients_near<T: Float + Debug>(
    graph: &Graph<T>,
    ids: &[NodeId],
    expected: &[T],
    tolerance: T,
) {
    assert_eq!(ids.len(), expected.len(), "Length mismatch");

    for (id, e) in ids.iter().zip(expected.iter()) {
        let actual = graph
            .gradient(*id, *id)
            .unwrap_or_else(|err| panic!("check_gradients_near: {}", err));
        let diff = (actual - *e).abs();
        if !(diff <= tolerance) {
            panic!(
                "Gradient mismatch at node {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                id, actual, e, diff, tolerance
            );
        }
    }
}
