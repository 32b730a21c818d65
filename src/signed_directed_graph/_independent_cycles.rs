use crate::signed_directed_graph::SdGraph;
use crate::VariableId;
use std::collections::HashSet;

impl SdGraph {
    /// Compute a collection of independent cycles of this directed graph within the given
    /// `restriction` set.
    ///
    /// Independent cycles are cycles that do not intersect. Every feedback vertex set must
    /// contain at least one vertex of every such cycle, hence the number of independent
    /// cycles is a lower bound on the size of any feedback vertex set. The method tries to
    /// maximize the number of the returned cycles (greedily taking the shortest cycle first),
    /// but the result is not guaranteed to be maximal.
    pub fn restricted_independent_cycles(
        &self,
        restriction: &HashSet<VariableId>,
    ) -> Vec<Vec<VariableId>> {
        let mut cycles = Vec::new();

        let mut components = self.restricted_strongly_connected_components(restriction);
        while let Some(mut scc) = components.pop() {
            let mut vertices: Vec<VariableId> = scc.iter().cloned().collect();
            vertices.sort();

            let mut best_cycle: Option<Vec<VariableId>> = None;
            for x in vertices {
                let bound = best_cycle.as_ref().map(|it| it.len() - 1).unwrap_or(usize::MAX);
                if let Some(cycle) = self.shortest_cycle(&scc, x, bound) {
                    let is_self_loop = cycle.len() == 1;
                    best_cycle = Some(cycle);
                    if is_self_loop {
                        break;
                    }
                }
            }

            // A non-trivial component always has a cycle.
            let Some(best_cycle) = best_cycle else {
                continue;
            };
            for x in &best_cycle {
                scc.remove(x);
            }
            cycles.push(best_cycle);
            components.append(&mut self.restricted_strongly_connected_components(&scc));
        }

        cycles.sort_by(|a, b| (a.len(), a).cmp(&(b.len(), b)));
        cycles
    }
}

#[cfg(test)]
mod tests {
    use crate::signed_directed_graph::SdGraph;
    use crate::test_utils::build_test_network;

    #[test]
    pub fn test_independent_cycles() {
        let network = build_test_network();
        let v = |name: &str| network.find_variable(name).unwrap();
        let graph = SdGraph::from(&network);

        let cycles = graph.restricted_independent_cycles(&graph.mk_all_vertices());
        assert_eq!(cycles.len(), 3);
        assert_eq!(cycles[0], vec![v("e")]);
        assert_eq!(cycles[1], vec![v("b_1"), v("b_2")]);
        assert_eq!(cycles[2], vec![v("d_1"), v("d_2")]);
    }
}
