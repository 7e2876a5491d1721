use num_traits::Float;

/// Sum of every inbound value.
pub fn combine_forward<T: Float>(inputs: &[T]) -> T {
    inputs.iter().fold(T::zero(), |acc, &v| acc + v)
}

/// Gradient slots of a Combine node with `arity` inbound nodes.
///
/// The node is a pure sum, so every consumer cost is broadcast unchanged to
/// every slot (not split between them).
pub fn combine_backward<T: Float>(arity: usize, costs: &[T]) -> Vec<T> {
    let mut grads = vec![T::zero(); arity];
    for &cost in costs {
        for grad in grads.iter_mut() {
            *grad = *grad + cost;
        }
    }
    grads
}
