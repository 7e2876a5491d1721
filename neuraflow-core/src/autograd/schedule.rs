use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use num_traits::Float;
use std::collections::VecDeque;

impl<T: Float> Graph<T> {
    /// Returns every node reachable from `seeds` by following outbound edges,
    /// ordered so that no node precedes any of its inbound dependencies.
    ///
    /// The seed set must contain every leaf the reachable computation depends
    /// on. A reachable node reading a node outside the discovered set fails
    /// with `MissingDependency`; nodes whose in-degree never drops to zero
    /// fail with `CycleDetected`. Nothing is silently dropped.
    pub fn topological_sort(&self, seeds: &[NodeId]) -> Result<Vec<NodeId>, NeuraFlowError> {
        for &seed in seeds {
            self.node(seed)?;
        }

        // Discovery: walk outbound edges from the seeds.
        let mut discovered = vec![false; self.nodes.len()];
        let mut reachable = Vec::new();
        let mut stack: Vec<NodeId> = seeds.to_vec();
        while let Some(id) = stack.pop() {
            if discovered[id.0] {
                continue;
            }
            discovered[id.0] = true;
            reachable.push(id);
            for &consumer in &self.nodes[id.0].outbound {
                if !discovered[consumer.0] {
                    stack.push(consumer);
                }
            }
        }
        log::trace!(
            "topological_sort: discovered {} nodes from {} seeds",
            reachable.len(),
            seeds.len()
        );

        // Unresolved in-degree counts distinct inbound nodes, matching the
        // deduplicated outbound lists.
        let mut in_degree = vec![0usize; self.nodes.len()];
        for &id in &reachable {
            let node = &self.nodes[id.0];
            for (i, &dep) in node.inbound.iter().enumerate() {
                if !discovered[dep.0] {
                    return Err(NeuraFlowError::MissingDependency {
                        node: id,
                        dependency: dep,
                    });
                }
                if !node.inbound[..i].contains(&dep) {
                    in_degree[id.0] += 1;
                }
            }
        }

        // Emission.
        let mut queued = vec![false; self.nodes.len()];
        let mut ready = VecDeque::new();
        for &seed in seeds {
            if in_degree[seed.0] == 0 && !queued[seed.0] {
                queued[seed.0] = true;
                ready.push_back(seed);
            }
        }
        let mut order = Vec::with_capacity(reachable.len());
        while let Some(id) = ready.pop_front() {
            order.push(id);
            for &consumer in &self.nodes[id.0].outbound {
                in_degree[consumer.0] -= 1;
                if in_degree[consumer.0] == 0 {
                    queued[consumer.0] = true;
                    ready.push_back(consumer);
                }
            }
        }

        if order.len() != reachable.len() {
            let mut unresolved: Vec<NodeId> =
                reachable.into_iter().filter(|id| !queued[id.0]).collect();
            unresolved.sort();
            return Err(NeuraFlowError::CycleDetected { unresolved });
        }

        log::debug!("topological_sort: scheduled {} nodes", order.len());
        Ok(order)
    }
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;
