// src/nn/mod.rs
// Helpers for assembling trainable networks out of graph nodes.

pub mod init;
