//! # Loss Functions
//!
//! Loss nodes quantify the difference between a prediction and a target. A
//! loss node is the terminal node of a graph: its backward step ignores any
//! consumer and seeds the whole backward pass instead.
//!
//! ## Currently Implemented:
//! - [`mse`]: squared error of one prediction against one target.

pub mod mse;

pub use mse::{mse_backward, mse_forward};
