use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId, OpKind};
use crate::optim::optimizer_trait::Optimizer;
use num_traits::Float;

impl<T: Float> Graph<T> {
    /// Applies the gradients of the latest backward pass to `trainables`.
    ///
    /// For every trainable node and every gradient slot it holds,
    /// `value += gradient * rate`. The addition pairs with the sign of the
    /// loss gradient (`y - a`), so this descends the squared error.
    ///
    /// Every trainable must be an Input (`NotAnInput`) that took part in the
    /// latest backward pass (`MissingGradient`). Nodes are validated before
    /// any value changes.
    pub fn sgd_update(&mut self, trainables: &[NodeId], rate: T) -> Result<(), NeuraFlowError> {
        for &id in trainables {
            let node = self.node(id)?;
            if node.kind != OpKind::Input {
                return Err(NeuraFlowError::NotAnInput {
                    node: id,
                    kind: node.kind,
                });
            }
            if node.gradients.is_empty() || node.value.is_none() {
                return Err(NeuraFlowError::MissingGradient { node: id });
            }
        }

        for &id in trainables {
            let node = &mut self.nodes[id.0];
            let delta = node
                .gradients
                .iter()
                .fold(T::zero(), |acc, &g| acc + g * rate);
            node.value = node.value.map(|v| v + delta);
        }
        log::debug!("sgd_update: updated {} trainable nodes", trainables.len());
        Ok(())
    }
}

/// Implements plain Stochastic Gradient Descent over a fixed trainable set.
#[derive(Debug, Clone)]
pub struct Sgd<T> {
    params: Vec<NodeId>,
    lr: T,
}

impl<T: Float> Sgd<T> {
    /// Creates a new `Sgd` optimizer.
    ///
    /// # Arguments
    ///
    /// * `params`: the trainable Input nodes (weights and biases).
    /// * `lr`: the learning rate; must be finite and non-negative.
    pub fn new(params: impl IntoIterator<Item = NodeId>, lr: T) -> Result<Self, NeuraFlowError> {
        validate_lr(lr)?;
        Ok(Sgd {
            params: params.into_iter().collect(),
            lr,
        })
    }
}

impl<T: Float> Optimizer<T> for Sgd<T> {
    fn step(&mut self, graph: &mut Graph<T>) -> Result<(), NeuraFlowError> {
        log::debug!("Sgd: step() called on {} params", self.params.len());
        graph.sgd_update(&self.params, self.lr)
    }

    fn params(&self) -> &[NodeId] {
        &self.params
    }

    fn learning_rate(&self) -> T {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: T) -> Result<(), NeuraFlowError> {
        validate_lr(lr)?;
        self.lr = lr;
        Ok(())
    }
}

fn validate_lr<T: Float>(lr: T) -> Result<(), NeuraFlowError> {
    if !lr.is_finite() || lr < T::zero() {
        return Err(NeuraFlowError::InvalidArgument(format!(
            "learning rate must be finite and non-negative, got {}",
            lr.to_f64().unwrap_or(f64::NAN)
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
