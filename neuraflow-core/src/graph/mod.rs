//! # Computation Graph
//!
//! The [`Graph`] arena owns every node of a computation graph. Nodes are
//! addressed by [`NodeId`]; the inbound relation (what a node reads) and the
//! outbound relation (who reads a node) are both id lists into the arena.
//!
//! A node can only read nodes that already exist, so graphs assembled through
//! this API are acyclic by construction. Topology is frozen once built: there
//! is no way to remove a node or an edge.
//!
//! ```
//! use neuraflow_core::Graph;
//!
//! let mut graph = Graph::new();
//! let x = graph.input(3.0);
//! let w = graph.input(2.0);
//! let b = graph.input(1.0);
//! let lin = graph.linear(x, w, b).unwrap();
//!
//! let order = graph.topological_sort(&[x, w, b]).unwrap();
//! graph.forward(&order).unwrap();
//! assert_eq!(graph.value(lin).unwrap(), Some(7.0));
//! ```

pub mod node;

pub use node::{Arity, Node, NodeId, OpKind};

use crate::error::NeuraFlowError;
use num_traits::Float;

/// Arena owning all nodes of one computation graph.
#[derive(Debug, Clone, Default)]
pub struct Graph<T = f64> {
    pub(crate) nodes: Vec<Node<T>>,
}

impl<T: Float> Graph<T> {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node in construction order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.iter()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node<T>, NeuraFlowError> {
        self.nodes.get(id.0).ok_or(NeuraFlowError::UnknownNode {
            id,
            len: self.nodes.len(),
        })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<T>, NeuraFlowError> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(id.0)
            .ok_or(NeuraFlowError::UnknownNode { id, len })
    }

    /// Creates an Input leaf holding `value`.
    pub fn input(&mut self, value: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, OpKind::Input, Vec::new(), Some(value)));
        log::trace!("Graph: created Input {}", id);
        id
    }

    /// Creates a `Linear` node computing `x * w + b`.
    pub fn linear(&mut self, x: NodeId, w: NodeId, b: NodeId) -> Result<NodeId, NeuraFlowError> {
        self.add_node(OpKind::Linear, &[x, w, b])
    }

    /// Creates a `Combine` node summing every node of `inbound`.
    pub fn combine(&mut self, inbound: &[NodeId]) -> Result<NodeId, NeuraFlowError> {
        self.add_node(OpKind::Combine, inbound)
    }

    pub fn sigmoid(&mut self, x: NodeId) -> Result<NodeId, NeuraFlowError> {
        self.add_node(OpKind::Sigmoid, &[x])
    }

    /// Creates the squared-error loss `(a - y)^2`.
    pub fn mean_squared_error(&mut self, a: NodeId, y: NodeId) -> Result<NodeId, NeuraFlowError> {
        self.add_node(OpKind::MeanSquaredError, &[a, y])
    }

    /// Creates an operator node of `kind` reading `inbound`, and registers the
    /// new node as a consumer of each inbound node.
    ///
    /// Fails with `ArityMismatch` when `inbound` does not fit the kind (this
    /// includes `OpKind::Input`, which must be built with [`Graph::input`]) and
    /// with `UnknownNode` when an inbound id does not belong to this graph.
    pub fn add_node(&mut self, kind: OpKind, inbound: &[NodeId]) -> Result<NodeId, NeuraFlowError> {
        let arity = kind.arity();
        if kind == OpKind::Input || !arity.accepts(inbound.len()) {
            return Err(NeuraFlowError::ArityMismatch {
                operation: kind,
                expected: arity.to_string(),
                actual: inbound.len(),
            });
        }
        for &dep in inbound {
            let dep_node = self.node(dep)?;
            if dep_node.kind == OpKind::MeanSquaredError {
                log::warn!(
                    "Graph: {} node reads loss node {}; the loss ignores its consumers during backward",
                    kind,
                    dep
                );
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, kind, inbound.to_vec(), None));
        for &dep in inbound {
            let outbound = &mut self.nodes[dep.0].outbound;
            if !outbound.contains(&id) {
                outbound.push(id);
            }
        }
        log::trace!("Graph: created {} {} reading {:?}", kind, id, inbound);
        Ok(id)
    }

    /// Current value of `id`; `None` for an operator not yet forwarded.
    pub fn value(&self, id: NodeId) -> Result<Option<T>, NeuraFlowError> {
        Ok(self.node(id)?.value)
    }

    /// Assigns the value of an Input node (feature, label or parameter).
    pub fn set_value(&mut self, id: NodeId, value: T) -> Result<(), NeuraFlowError> {
        let node = self.node_mut(id)?;
        if node.kind != OpKind::Input {
            return Err(NeuraFlowError::NotAnInput {
                node: id,
                kind: node.kind,
            });
        }
        node.value = Some(value);
        Ok(())
    }

    /// Gradient slots recorded on `id` by the latest backward pass.
    pub fn gradients(&self, id: NodeId) -> Result<&[T], NeuraFlowError> {
        Ok(&self.node(id)?.gradients)
    }

    /// Gradient that node `of` recorded toward `wrt` during the latest backward
    /// pass. For an Input, `wrt` is the node itself.
    ///
    /// When `wrt` fills several inbound slots of `of`, the slots are summed.
    pub fn gradient(&self, of: NodeId, wrt: NodeId) -> Result<T, NeuraFlowError> {
        let node = self.node(of)?;
        self.node(wrt)?;
        if node.gradients.is_empty() {
            return Err(NeuraFlowError::MissingGradient { node: of });
        }
        if node.kind == OpKind::Input {
            return if of == wrt {
                Ok(node.gradients[0])
            } else {
                Err(NeuraFlowError::NotInbound { node: of, wrt })
            };
        }
        if !node.inbound.contains(&wrt) {
            return Err(NeuraFlowError::NotInbound { node: of, wrt });
        }
        Ok(slot_sum(node, wrt))
    }
}

/// Sum of the gradient slots `node` holds for inbound `wrt`.
pub(crate) fn slot_sum<T: Float>(node: &Node<T>, wrt: NodeId) -> T {
    node.inbound
        .iter()
        .zip(node.gradients.iter())
        .filter(|(dep, _)| **dep == wrt)
        .fold(T::zero(), |acc, (_, g)| acc + *g)
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
