use crate::blocks::Block;
use crate::network_model::NetworkModel;
use crate::signed_directed_graph::SdGraph;
use crate::{NetworkError, VariableId};
use std::collections::{BTreeSet, HashSet};

impl NetworkModel {
    /// **(internal)** Compute a topological order of `blocks` (Kahn's algorithm).
    ///
    /// Block `j` depends on block `i` when a node analyzed by `i` regulates a node
    /// analyzed by `j`. Among the blocks that are ready, the one created first is taken,
    /// so the order is reproducible. Blocks that can never become ready (a dependency cycle,
    /// or an external regulator that no block computes) are reported as an error.
    pub(super) fn schedule(
        graph: &SdGraph,
        blocks: &[Block],
        excluded: &HashSet<VariableId>,
    ) -> Result<Vec<usize>, NetworkError> {
        let components: Vec<HashSet<VariableId>> = blocks
            .iter()
            .map(|block| block.analyzed().iter().cloned().collect())
            .collect();
        let computed: HashSet<VariableId> = components.iter().flatten().cloned().collect();

        let mut dependencies = vec![0usize; blocks.len()];
        let mut dependents = vec![Vec::new(); blocks.len()];
        for (from, to) in graph.condensation(&components) {
            dependencies[to] += 1;
            dependents[from].push(to);
        }

        // Blocks reading a value that nobody provides are never ready.
        let mut ready: BTreeSet<usize> = BTreeSet::new();
        for (i, block) in blocks.iter().enumerate() {
            let orphan = block
                .external()
                .iter()
                .any(|it| !excluded.contains(it) && !computed.contains(it));
            if orphan {
                dependencies[i] += 1;
            } else if dependencies[i] == 0 {
                ready.insert(i);
            }
        }

        let mut order = Vec::with_capacity(blocks.len());
        while let Some(next) = ready.pop_first() {
            order.push(next);
            for dependent in &dependents[next] {
                dependencies[*dependent] -= 1;
                if dependencies[*dependent] == 0 {
                    ready.insert(*dependent);
                }
            }
        }

        if order.len() != blocks.len() {
            let scheduled: HashSet<usize> = order.iter().cloned().collect();
            return Err(NetworkError::UnresolvedDependencies {
                blocks: (0..blocks.len()).filter(|it| !scheduled.contains(it)).collect(),
            });
        }

        log::debug!("Block evaluation order: {:?}.", order);
        Ok(order)
    }
}
