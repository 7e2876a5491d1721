use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::{Normal, StandardNormal};

/// Sets every Input node of `ids` to `value`.
///
/// All ids are validated before any value changes.
///
/// # Returns
/// A `Result` indicating success or a `NeuraFlowError` (`UnknownNode`,
/// `NotAnInput`).
pub fn fill_<T: Float>(graph: &mut Graph<T>, ids: &[NodeId], value: T) -> Result<(), NeuraFlowError> {
    fill_with(graph, ids, || value)
}

/// Sets every Input node of `ids` to 0.
pub fn zeros_<T: Float>(graph: &mut Graph<T>, ids: &[NodeId]) -> Result<(), NeuraFlowError> {
    fill_(graph, ids, T::zero())
}

/// Sets every Input node of `ids` to 1.
pub fn ones_<T: Float>(graph: &mut Graph<T>, ids: &[NodeId]) -> Result<(), NeuraFlowError> {
    fill_(graph, ids, T::one())
}

/// Draws every Input node of `ids` from the uniform distribution `[low, high)`.
///
/// `uniform_(graph, ids, 0.0, 1.0, rng)` reproduces the usual starting point
/// of a freshly built network (every weight, bias and target in `[0, 1)`).
///
/// # Arguments
/// * `low`, `high`: bounds of the range; `low` must be strictly below `high`.
/// * `rng`: any `rand` generator; use a seeded one for reproducible runs.
pub fn uniform_<T, R>(
    graph: &mut Graph<T>,
    ids: &[NodeId],
    low: T,
    high: T,
    rng: &mut R,
) -> Result<(), NeuraFlowError>
where
    T: Float + SampleUniform,
    R: Rng + ?Sized,
{
    if !(low < high) || !low.is_finite() || !high.is_finite() {
        return Err(NeuraFlowError::InvalidArgument(format!(
            "uniform_ needs finite bounds with low < high, got [{}, {})",
            low.to_f64().unwrap_or(f64::NAN),
            high.to_f64().unwrap_or(f64::NAN)
        )));
    }
    let dist = Uniform::new(low, high);
    fill_with(graph, ids, || dist.sample(rng))
}

/// Draws every Input node of `ids` from a normal distribution.
pub fn normal_<T, R>(
    graph: &mut Graph<T>,
    ids: &[NodeId],
    mean: T,
    std_dev: T,
    rng: &mut R,
) -> Result<(), NeuraFlowError>
where
    T: Float,
    StandardNormal: Distribution<T>,
    R: Rng + ?Sized,
{
    let dist = Normal::new(mean, std_dev)
        .map_err(|e| NeuraFlowError::InvalidArgument(format!("normal_: {}", e)))?;
    fill_with(graph, ids, || dist.sample(rng))
}

// --- Internal Helper ---

fn fill_with<T, F>(graph: &mut Graph<T>, ids: &[NodeId], mut next: F) -> Result<(), NeuraFlowError>
where
    T: Float,
    F: FnMut() -> T,
{
    for &id in ids {
        let node = graph.node(id)?;
        if !node.is_input() {
            return Err(NeuraFlowError::NotAnInput {
                node: id,
                kind: node.kind(),
            });
        }
    }
    for &id in ids {
        graph.set_value(id, next())?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
