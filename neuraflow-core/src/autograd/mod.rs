//! # Autograd
//!
//! Scheduling and evaluation of a [`Graph`](crate::graph::Graph):
//!
//! - [`schedule`]: [`Graph::topological_sort`](crate::graph::Graph::topological_sort)
//!   discovers every node reachable from a seed set and orders it after its
//!   dependencies (Kahn's algorithm).
//! - [`evaluate`]: [`Graph::forward`](crate::graph::Graph::forward) walks the
//!   order, [`Graph::backward`](crate::graph::Graph::backward) walks it in
//!   reverse so every consumer has recorded its costs before a node reads them.
//! - [`grad_check`]: finite-difference verification of the gradients.

pub mod evaluate;
pub mod grad_check;
pub mod schedule;

pub use grad_check::{check_gradients, GradCheckError};
