use crate::error::NeuraFlowError;
use crate::graph::{slot_sum, Graph, NodeId, OpKind};
use crate::ops;
use num_traits::Float;

impl<T: Float> Graph<T> {
    /// Runs every node's forward computation in `order`.
    ///
    /// `order` is expected to come from [`Graph::topological_sort`], which
    /// guarantees that inbound values are up to date when a node reads them.
    /// Reading an inbound node that has never been forwarded fails with
    /// `NotEvaluated`.
    pub fn forward(&mut self, order: &[NodeId]) -> Result<(), NeuraFlowError> {
        log::debug!("forward: evaluating {} nodes", order.len());
        let mut inputs = Vec::new();
        for &id in order {
            self.collect_inbound_values(id, &mut inputs)?;
            let node = &mut self.nodes[id.0];
            node.value = ops::forward(node.kind, &inputs, node.value);
            log::trace!("forward: {} {} = {:?}", node.kind, id, node.value.and_then(|v| v.to_f64()));
        }
        Ok(())
    }

    /// Runs every node's backward step in reverse `order`.
    ///
    /// Gradients of every node in `order` are cleared first, then rebuilt.
    /// Walking the reverse of a topological order means every consumer of a
    /// node has recorded its costs before the node reads them.
    ///
    /// `order` is checked before any gradient is touched: a node (or one of
    /// its inbound nodes) without a forward value fails with `NotEvaluated`,
    /// and a consumer that is not part of `order` fails with
    /// `MissingGradient`, even if it still holds slots from an earlier pass.
    /// The only failure left after clearing is an `order` that lists a
    /// consumer before the node it reads, which also yields `MissingGradient`.
    pub fn backward(&mut self, order: &[NodeId]) -> Result<(), NeuraFlowError> {
        log::debug!("backward: propagating through {} nodes", order.len());
        let in_order = self.check_backward_order(order)?;
        for &id in order {
            self.nodes[id.0].gradients.clear();
        }

        let mut inputs = Vec::new();
        let mut costs = Vec::new();
        for &id in order.iter().rev() {
            let value = self.nodes[id.0]
                .value
                .ok_or(NeuraFlowError::NotEvaluated { node: id })?;
            self.collect_inbound_values(id, &mut inputs)?;
            self.collect_costs(id, &in_order, &mut costs)?;
            let node = &mut self.nodes[id.0];
            node.gradients = ops::backward(node.kind, &inputs, value, &costs);
            log::trace!("backward: {} {} recorded {} gradient slots", node.kind, id, node.gradients.len());
        }
        Ok(())
    }

    /// Forward pass followed by a backward pass over the same `order`.
    pub fn forward_and_backward(&mut self, order: &[NodeId]) -> Result<(), NeuraFlowError> {
        self.forward(order)?;
        self.backward(order)
    }

    fn collect_inbound_values(&self, id: NodeId, out: &mut Vec<T>) -> Result<(), NeuraFlowError> {
        out.clear();
        for &dep in &self.node(id)?.inbound {
            let value = self.nodes[dep.0]
                .value
                .ok_or(NeuraFlowError::NotEvaluated { node: dep })?;
            out.push(value);
        }
        Ok(())
    }

    /// Marks the nodes of `order` and checks that a backward pass over it can
    /// complete. Loss nodes ignore their consumers, so theirs are not required.
    fn check_backward_order(&self, order: &[NodeId]) -> Result<Vec<bool>, NeuraFlowError> {
        let mut in_order = vec![false; self.nodes.len()];
        for &id in order {
            self.node(id)?;
            in_order[id.0] = true;
        }
        for &id in order {
            let node = &self.nodes[id.0];
            if node.value.is_none() {
                return Err(NeuraFlowError::NotEvaluated { node: id });
            }
            if let Some(&dep) = node.inbound.iter().find(|dep| self.nodes[dep.0].value.is_none()) {
                return Err(NeuraFlowError::NotEvaluated { node: dep });
            }
            if node.kind == OpKind::MeanSquaredError {
                continue;
            }
            if let Some(&consumer) = node.outbound.iter().find(|c| !in_order[c.0]) {
                return Err(NeuraFlowError::MissingGradient { node: consumer });
            }
        }
        Ok(in_order)
    }

    /// Gathers, for each consumer of `id`, the gradient it recorded toward `id`
    /// during this pass.
    fn collect_costs(&self, id: NodeId, in_order: &[bool], out: &mut Vec<T>) -> Result<(), NeuraFlowError> {
        out.clear();
        let node = &self.nodes[id.0];
        if node.kind == OpKind::MeanSquaredError {
            return Ok(());
        }
        for &consumer in &node.outbound {
            let consumer_node = &self.nodes[consumer.0];
            if !in_order[consumer.0] || consumer_node.gradients.is_empty() {
                return Err(NeuraFlowError::MissingGradient { node: consumer });
            }
            out.push(slot_sum(consumer_node, id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "evaluate_test.rs"]
mod tests;
