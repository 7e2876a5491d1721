//! # Activation Functions
//!
//! Non-linear scalar activations.
//!
//! ## Currently Implemented:
//! - [`sigmoid`](sigmoid/fn.sigmoid_forward.html): logistic function.

pub mod sigmoid;

pub use sigmoid::{sigmoid_backward, sigmoid_forward};
