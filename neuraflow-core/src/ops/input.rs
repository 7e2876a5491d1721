use num_traits::Float;

/// Gradient of an Input leaf with respect to itself: the sum of the costs
/// recorded by all of its consumers.
///
/// A parameter may feed several downstream paths, so every contribution is
/// accumulated.
pub fn input_backward<T: Float>(costs: &[T]) -> T {
    costs.iter().fold(T::zero(), |acc, &cost| acc + cost)
}
