use num_traits::Float;

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid_forward<T: Float>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

/// Gradient slot toward the single inbound node.
///
/// Uses the node's own forward `value`: `d/dx = value * (1 - value) * cost`,
/// accumulated over every consumer cost.
pub fn sigmoid_backward<T: Float>(value: T, costs: &[T]) -> T {
    let local = value * (T::one() - value);
    costs.iter().fold(T::zero(), |acc, &cost| acc + local * cost)
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
