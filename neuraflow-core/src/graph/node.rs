use std::fmt;

/// Index of a node inside its owning [`Graph`](super::Graph).
///
/// Ids are handed out in construction order and are only meaningful for the
/// graph that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of node variants.
///
/// The variant only tags the computation; the operands live in the node's
/// ordered inbound list (`Linear` reads `[x, w, b]`, `MeanSquaredError`
/// reads `[a, y]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Leaf holding an externally assigned value (feature, label or parameter).
    Input,
    /// `x * w + b`.
    Linear,
    /// Sum of every inbound value.
    Combine,
    /// Logistic activation `1 / (1 + e^-x)`.
    Sigmoid,
    /// Squared error `(a - y)^2`, the root of the backward pass.
    MeanSquaredError,
}

/// Number of inbound nodes an [`OpKind`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl OpKind {
    pub fn arity(self) -> Arity {
        match self {
            OpKind::Input => Arity::Exact(0),
            OpKind::Linear => Arity::Exact(3),
            OpKind::Combine => Arity::AtLeast(1),
            OpKind::Sigmoid => Arity::Exact(1),
            OpKind::MeanSquaredError => Arity::Exact(2),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpKind::Input => "Input",
            OpKind::Linear => "Linear",
            OpKind::Combine => "Combine",
            OpKind::Sigmoid => "Sigmoid",
            OpKind::MeanSquaredError => "MeanSquaredError",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single scalar node of the computation graph.
///
/// Nodes are owned by the [`Graph`](super::Graph) arena; the inbound and
/// outbound relations are id lists into that arena. The outbound list is
/// consumer bookkeeping only and holds each consumer once, even when the
/// consumer reads this node through several inbound slots.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) id: NodeId,
    pub(crate) kind: OpKind,
    pub(crate) value: Option<T>,
    pub(crate) inbound: Vec<NodeId>,
    pub(crate) outbound: Vec<NodeId>,
    /// One slot per inbound node (one slot for the node itself on an Input).
    /// Empty until the node's first backward step.
    pub(crate) gradients: Vec<T>,
}

impl<T: Copy> Node<T> {
    pub(crate) fn new(id: NodeId, kind: OpKind, inbound: Vec<NodeId>, value: Option<T>) -> Self {
        Node {
            id,
            kind,
            value,
            inbound,
            outbound: Vec::new(),
            gradients: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    /// Current value, `None` for an operator that has not been forwarded yet.
    pub fn value(&self) -> Option<T> {
        self.value
    }

    pub fn inbound(&self) -> &[NodeId] {
        &self.inbound
    }

    pub fn outbound(&self) -> &[NodeId] {
        &self.outbound
    }

    /// Gradient slots recorded by the latest backward step, aligned with
    /// [`Node::inbound`] (or a single self-slot for an Input).
    pub fn gradients(&self) -> &[T] {
        &self.gradients
    }

    pub fn is_input(&self) -> bool {
        self.kind == OpKind::Input
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
