use crate::blocks::{AcyclicBlock, Block, SccBlock};
use crate::fvs::FvsFinder;
use crate::network_model::NetworkModel;
use crate::signed_directed_graph::SdGraph;
use crate::{NetworkError, SignedNetwork, VariableId};
use std::collections::HashSet;

impl NetworkModel {
    /// **(internal)** Split the network into blocks.
    ///
    /// Every node that is not `excluded` is analyzed by exactly one block. Components with
    /// a cycle become `SccBlock`s. The remaining nodes are cut into `AcyclicBlock`s: each
    /// acyclic block is the largest set of unassigned nodes that is not downstream of a
    /// component which is still waiting for its regulators. The resulting order of blocks
    /// is already a valid evaluation order.
    pub(super) fn decompose(
        network: &SignedNetwork,
        graph: &SdGraph,
        excluded: &HashSet<VariableId>,
        finder: &dyn FvsFinder,
    ) -> Result<Vec<Block>, NetworkError> {
        let mut pending: Vec<HashSet<VariableId>> = Vec::new();
        let mut unassigned: HashSet<VariableId> = HashSet::new();
        for component in graph.component_partition() {
            if component.iter().any(|it| excluded.contains(it)) {
                // Input and degenerate nodes are always trivial components.
                continue;
            }
            let has_feedback =
                component.len() > 1 || component.iter().all(|it| graph.has_self_loop(*it));
            if has_feedback {
                pending.push(component);
            } else {
                unassigned.extend(component);
            }
        }

        let mut blocks = Vec::new();
        let mut known: HashSet<VariableId> = excluded.clone();
        while !unassigned.is_empty() || !pending.is_empty() {
            let mut progress = false;

            let waiting: HashSet<VariableId> = pending.iter().flatten().cloned().collect();
            let downstream = graph.forward_reachable(waiting);
            let chunk: HashSet<VariableId> = unassigned
                .iter()
                .filter(|it| !downstream.contains(it))
                .cloned()
                .collect();
            if !chunk.is_empty() {
                unassigned.retain(|it| !chunk.contains(it));
                log::trace!("Acyclic block with {} node(s).", chunk.len());
                blocks.push(Block::Acyclic(AcyclicBlock::new(network, &chunk)?));
                known.extend(chunk);
                progress = true;
            }

            while let Some(index) = pending
                .iter()
                .position(|component| regulators_known(network, component, &known))
            {
                let component = pending.remove(index);
                log::trace!("SCC block with {} node(s).", component.len());
                blocks.push(Block::Scc(SccBlock::new(
                    network, graph, &component, finder,
                )?));
                known.extend(component);
                progress = true;
            }

            if !progress {
                let next = blocks.len();
                return Err(NetworkError::UnresolvedDependencies {
                    blocks: (next..next + pending.len()).collect(),
                });
            }
        }

        Ok(blocks)
    }
}

/// **(internal)** True if every regulator of the `component` is either in the component,
/// or already `known`.
fn regulators_known(
    network: &SignedNetwork,
    component: &HashSet<VariableId>,
    known: &HashSet<VariableId>,
) -> bool {
    component.iter().all(|target| {
        network
            .regulators(*target)
            .iter()
            .all(|it| component.contains(it) || known.contains(it))
    })
}

#[cfg(test)]
mod tests {
    use crate::network_model::NetworkModel;
    use crate::test_utils::build_test_network;
    use crate::SignedNetwork;
    use std::collections::HashSet;

    #[test]
    fn test_network_decomposition() {
        let network = build_test_network();
        let v = |name: &str| network.find_variable(name).unwrap();
        let model = NetworkModel::new(network.clone()).unwrap();

        assert_eq!(model.input_nodes(), &[v("a")]);
        assert!(model.degenerate_nodes().is_empty());

        let blocks = model.blocks();
        assert_eq!(blocks.len(), 4);
        assert!(blocks[0].is_scc());
        assert_eq!(blocks[0].analyzed(), &[v("b_1"), v("b_2")]);
        assert!(!blocks[1].is_scc());
        assert_eq!(blocks[1].analyzed(), &[v("c")]);
        assert_eq!(blocks[1].external(), &[v("a"), v("b_2")]);
        assert!(blocks[2].is_scc());
        assert_eq!(blocks[2].analyzed(), &[v("e")]);
        assert!(blocks[3].is_scc());
        assert_eq!(blocks[3].analyzed(), &[v("d_1"), v("d_2"), v("d_3")]);

        // Analyzed sets are disjoint and cover every non-input node.
        let mut covered = HashSet::new();
        for block in blocks {
            for node in block.analyzed() {
                assert!(covered.insert(*node));
            }
        }
        assert_eq!(covered.len(), network.num_vars() - 1);
    }

    #[test]
    fn acyclic_nodes_between_components() {
        // `x` feeds the first cycle, `y` sits between the two cycles and `z` is a sink.
        let network = SignedNetwork::try_from(
            r#"
            x -> p_1
            p_1 -> p_2
            p_2 -> p_1
            p_2 -> y
            y -> q_1
            q_1 -| q_2
            q_2 -| q_1
            q_2 -> z
            x -> z
            "#,
        )
        .unwrap();
        let v = |name: &str| network.find_variable(name).unwrap();
        let model = NetworkModel::new(network.clone()).unwrap();

        assert_eq!(model.input_nodes(), &[v("x")]);
        let analyzed: Vec<Vec<_>> = model
            .blocks()
            .iter()
            .map(|it| it.analyzed().to_vec())
            .collect();
        assert_eq!(
            analyzed,
            vec![
                vec![v("p_1"), v("p_2")],
                vec![v("y")],
                vec![v("q_1"), v("q_2")],
                vec![v("z")],
            ]
        );
    }
}
