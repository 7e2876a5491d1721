use num_traits::Float;

/// `x * w + b`.
pub fn linear_forward<T: Float>(x: T, w: T, b: T) -> T {
    x * w + b
}

/// Gradient slots `[d/dx, d/dw, d/db]` of a Linear node.
///
/// Each slot starts at zero and accumulates one term per consumer cost:
/// `w * cost`, `x * cost` and `cost`.
pub fn linear_backward<T: Float>(x: T, w: T, costs: &[T]) -> [T; 3] {
    let mut grads = [T::zero(); 3];
    for &cost in costs {
        grads[0] = grads[0] + w * cost;
        grads[1] = grads[1] + x * cost;
        grads[2] = grads[2] + cost;
    }
    grads
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
