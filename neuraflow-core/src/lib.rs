//! NeuraFlow core: a scalar computation graph with reverse-mode automatic
//! differentiation.
//!
//! Build a [`Graph`] out of Input, Linear, Combine, Sigmoid and
//! MeanSquaredError nodes, schedule it with [`Graph::topological_sort`], run
//! [`Graph::forward_and_backward`] once per example, and apply the gradients
//! with [`Graph::sgd_update`] (or an [`optim::Sgd`] optimizer).

// Déclare les modules principaux de la crate
pub mod autograd;
pub mod graph;
pub mod ops;

pub mod nn;
pub mod optim;
pub mod utils;

// Ré-exporte les types principaux pour qu'ils soient accessibles via `neuraflow_core::Graph`
pub use graph::{Graph, Node, NodeId, OpKind};
// Re-export traits required by public functions/structs
pub use num_traits;

pub mod error;
pub use error::NeuraFlowError;
