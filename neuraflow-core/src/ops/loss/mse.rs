use num_traits::Float;

/// Squared error `(a - y)^2`.
pub fn mse_forward<T: Float>(a: T, y: T) -> T {
    let diff = a - y;
    diff * diff
}

/// Gradient slots `[d/da, d/dy]` seeding the backward pass.
///
/// The slots are `y - a` and `-(y - a)`: each operand receives "the other
/// minus itself", i.e. the descent direction scaled by one half. Paired with
/// the updater adding `gradient * rate`, this performs gradient descent. Do
/// not flip either sign on its own.
pub fn mse_backward<T: Float>(a: T, y: T) -> [T; 2] {
    let diff = y - a;
    [diff, -diff]
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
