use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use num_traits::Float;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating trainable Input nodes based on the
/// gradients recorded by the latest backward pass.
pub trait Optimizer<T: Float> {
    /// Performs a single optimization step on `graph`.
    ///
    /// Must run after a completed `forward_and_backward` and before the next
    /// forward pass.
    fn step(&mut self, graph: &mut Graph<T>) -> Result<(), NeuraFlowError>;

    /// The trainable nodes managed by the optimizer.
    fn params(&self) -> &[NodeId];

    fn learning_rate(&self) -> T;

    /// Changes the learning rate used by subsequent steps.
    ///
    /// Fails with `InvalidArgument` for a negative or non-finite rate.
    fn set_learning_rate(&mut self, lr: T) -> Result<(), NeuraFlowError>;
}
