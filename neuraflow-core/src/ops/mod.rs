//! # Node Operations Module (`ops`)
//!
//! Forward computation and local gradient rule of every [`OpKind`].
//!
//! ## Structure:
//!
//! - **One file per variant:** each exposes a `*_forward` function computing
//!   the node value from its inbound values, and a `*_backward` function
//!   turning the costs recorded by the node's consumers into one gradient
//!   slot per inbound node.
//! - **Dispatch:** [`forward`] and [`backward`] match on the closed
//!   [`OpKind`] set. The evaluator in [`crate::autograd`] is the only caller.
//!
//! Operand slices follow the inbound order of the node: `[x, w, b]` for
//! `Linear`, `[a, y]` for `MeanSquaredError`, and so on. Backward rules are
//! hand-written partial derivatives; there is no symbolic differentiation.
//!
//! ## Key Submodules:
//!
//! - [`input`]: leaves, which only accumulate their consumers' costs.
//! - [`linear`], [`combine`]: affine and summation nodes.
//! - [`activation`]: logistic sigmoid.
//! - [`loss`]: squared error, the root of the backward pass.

use crate::graph::OpKind;
use num_traits::Float;

pub mod activation;
pub mod combine;
pub mod input;
pub mod linear;
pub mod loss;

pub use activation::sigmoid::{sigmoid_backward, sigmoid_forward};
pub use combine::{combine_backward, combine_forward};
pub use input::input_backward;
pub use linear::{linear_backward, linear_forward};
pub use loss::mse::{mse_backward, mse_forward};

/// Computes the new value of a node of `kind`.
///
/// `inputs` holds the current inbound values. An Input has no computation and
/// keeps `current`.
pub(crate) fn forward<T: Float>(kind: OpKind, inputs: &[T], current: Option<T>) -> Option<T> {
    match kind {
        OpKind::Input => current,
        OpKind::Linear => Some(linear_forward(inputs[0], inputs[1], inputs[2])),
        OpKind::Combine => Some(combine_forward(inputs)),
        OpKind::Sigmoid => Some(sigmoid_forward(inputs[0])),
        OpKind::MeanSquaredError => Some(mse_forward(inputs[0], inputs[1])),
    }
}

/// Computes the gradient slots of a node of `kind`.
///
/// `costs` holds, for every consumer, the gradient that consumer recorded
/// toward this node. The returned vector has one slot per inbound node, or a
/// single self-slot for an Input.
pub(crate) fn backward<T: Float>(kind: OpKind, inputs: &[T], value: T, costs: &[T]) -> Vec<T> {
    match kind {
        OpKind::Input => vec![input_backward(costs)],
        OpKind::Linear => linear_backward(inputs[0], inputs[1], costs).to_vec(),
        OpKind::Combine => combine_backward(inputs.len(), costs),
        OpKind::Sigmoid => vec![sigmoid_backward(value, costs)],
        OpKind::MeanSquaredError => mse_backward(inputs[0], inputs[1]).to_vec(),
    }
}
