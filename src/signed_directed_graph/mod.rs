//! A compact adjacency-list representation of a `SignedNetwork` used by the structural
//! algorithms (reachability, strongly connected components, cycles, feedback vertex sets).

use crate::{Sign, SignedNetwork, VariableId};
use std::collections::HashSet;

/// **(internal)** Algorithms for detecting shortest cycles.
mod _cycle_detection;

/// **(internal)** Algorithms for computing feedback vertex sets (greedy approximation
/// and exhaustive enumeration of all minimum sets).
mod _feedback_vertex_set;

/// **(internal)** Algorithm for computing an approximation of the maximum independent cycles set.
mod _independent_cycles;

/// **(internal)** Compute basic reachability properties within the `SdGraph`.
mod _reachability;

/// **(internal)** Perform a decomposition of the signed directed graph (or its subgraph)
/// into strongly connected components.
mod _strongly_connected_components;

/// A signed directed graph with explicit successor and predecessor lists.
///
/// Vertices are the `VariableId`s of the `SignedNetwork` the graph was built from.
#[derive(Clone, Debug)]
pub struct SdGraph {
    successors: Vec<Vec<(VariableId, Sign)>>,
    predecessors: Vec<Vec<(VariableId, Sign)>>,
}

impl SdGraph {
    /// The number of vertices of this graph.
    pub fn num_vertices(&self) -> usize {
        self.successors.len()
    }

    /// The set of all vertices of this graph.
    pub fn mk_all_vertices(&self) -> HashSet<VariableId> {
        (0..self.num_vertices()).map(VariableId::from_index).collect()
    }

    /// Signed successors of the given vertex.
    pub fn successors(&self, vertex: VariableId) -> &[(VariableId, Sign)] {
        &self.successors[vertex.to_index()]
    }

    /// Signed predecessors of the given vertex.
    pub fn predecessors(&self, vertex: VariableId) -> &[(VariableId, Sign)] {
        &self.predecessors[vertex.to_index()]
    }

    /// True if the vertex has an edge to itself.
    pub fn has_self_loop(&self, vertex: VariableId) -> bool {
        self.successors[vertex.to_index()]
            .iter()
            .any(|(x, _)| *x == vertex)
    }
}

impl From<&SignedNetwork> for SdGraph {
    fn from(network: &SignedNetwork) -> Self {
        let mut successors = vec![Vec::new(); network.num_vars()];
        let mut predecessors = vec![Vec::new(); network.num_vars()];
        for regulation in network.regulations() {
            let (regulator, target) = (regulation.get_regulator(), regulation.get_target());
            successors[regulator.to_index()].push((target, regulation.get_sign()));
            predecessors[target.to_index()].push((regulator, regulation.get_sign()));
        }
        // Keep the adjacency lists independent of the order of regulations.
        for list in successors.iter_mut().chain(predecessors.iter_mut()) {
            list.sort();
        }
        SdGraph {
            successors,
            predecessors,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::signed_directed_graph::SdGraph;
    use crate::test_utils::build_test_network;

    #[test]
    pub fn basic_sd_graph_test() {
        let network = build_test_network();
        let sd_graph = SdGraph::from(&network);
        assert_eq!(sd_graph.num_vertices(), network.num_vars());

        for regulator in network.variables() {
            for target in network.targets(regulator) {
                assert!(sd_graph
                    .successors(regulator)
                    .iter()
                    .any(|(it, _)| *it == target));
                assert!(sd_graph
                    .predecessors(target)
                    .iter()
                    .any(|(it, _)| *it == regulator));
            }
        }

        let e = network.find_variable("e").unwrap();
        let c = network.find_variable("c").unwrap();
        assert!(sd_graph.has_self_loop(e));
        assert!(!sd_graph.has_self_loop(c));
        assert_eq!(sd_graph.mk_all_vertices(), network.variables().collect());
    }
}
