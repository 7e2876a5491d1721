// neuraflow-core/src/optim/mod.rs

//! Parameter updates for training a computation graph.
//!
//! This module provides [`Graph::sgd_update`](crate::graph::Graph::sgd_update),
//! the raw update step, and the [`Optimizer`] trait with its [`Sgd`]
//! implementation, which owns the trainable set and the learning rate.

pub mod optimizer_trait;
pub mod sgd;

// Re-export key items for easier access
pub use optimizer_trait::Optimizer;
pub use sgd::Sgd;
