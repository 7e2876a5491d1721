use crate::graph::{NodeId, OpKind};
use thiserror::Error;

/// Custom error type for the NeuraFlow engine.
///
/// Every variant describes a programmer error (a malformed graph or a pass
/// invoked out of order). None of them is transient, so nothing is retried.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum NeuraFlowError {
    #[error("Unknown node {id}: the graph only holds {len} nodes")]
    UnknownNode { id: NodeId, len: usize },

    #[error("Arity mismatch for {operation}: expected {expected} inbound nodes, got {actual}")]
    ArityMismatch {
        operation: OpKind,
        expected: String,
        actual: usize,
    },

    #[error("Cycle detected in the computation graph; unresolved nodes: {unresolved:?}")]
    CycleDetected { unresolved: Vec<NodeId> },

    #[error("Node {node} depends on {dependency}, which is not reachable from the seed set")]
    MissingDependency { node: NodeId, dependency: NodeId },

    #[error("Node {node} has no value; run a forward pass over it first")]
    NotEvaluated { node: NodeId },

    #[error("Node {node} has no gradients; run a backward pass over it first")]
    MissingGradient { node: NodeId },

    #[error("Node {node} is a {kind} node, but the operation requires an Input node")]
    NotAnInput { node: NodeId, kind: OpKind },

    #[error("Node {wrt} is not an inbound dependency of node {node}")]
    NotInbound { node: NodeId, wrt: NodeId },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
