use crate::signed_directed_graph::SdGraph;
use crate::VariableId;
use std::collections::HashSet;

impl SdGraph {
    /// Compute the shortest cycle (or one of the shortest cycles) within `restriction` that
    /// also contains the `pivot` vertex. The result is a vector with pivot at position zero
    /// and other vertices in the order in which they appear on the cycle. If no such cycle
    /// exists (or `pivot` is not a member of `restriction`), returns `None`.
    ///
    /// You can restrict the search to only include cycles of a specific length by providing
    /// an inclusive `upper_bound` (the length is counted as the number of edges in the cycle,
    /// i.e. a cycle is returned only if `edge_count <= upper_bound`).
    pub fn shortest_cycle(
        &self,
        restriction: &HashSet<VariableId>,
        pivot: VariableId,
        upper_bound: usize,
    ) -> Option<Vec<VariableId>> {
        if !restriction.contains(&pivot) {
            return None;
        }

        /*
           BFS from pivot computes the shortest path to all vertices and terminates once
           it finds an edge leading back to the pivot.
        */

        // This is called very often when computing a feedback vertex set, so a vector
        // is noticeably faster than a hash map here.
        let mut shortest_predecessor: Vec<Option<VariableId>> = vec![None; self.num_vertices()];

        // Each vertex enters the frontier at most once, because it is inserted only when
        // its `shortest_predecessor` slot is first filled.
        let mut frontier = vec![pivot];
        let mut length = 0usize;
        while !frontier.is_empty() {
            length += 1;
            if length > upper_bound {
                // There may be a cycle, but it has more than `upper_bound` edges.
                return None;
            }

            let mut new_frontier = Vec::with_capacity(frontier.len());
            for x in frontier {
                for (succ, _) in &self.successors[x.to_index()] {
                    if *succ == pivot {
                        // BFS guarantees this cycle is minimal, we just have to back-track.
                        let mut cycle = vec![x];
                        while let Some(last) = cycle.last() {
                            if *last == pivot {
                                cycle.reverse();
                                return Some(cycle);
                            }
                            cycle.push(shortest_predecessor[last.to_index()]?);
                        }
                    }
                    if !restriction.contains(succ) {
                        continue;
                    }
                    let slot = &mut shortest_predecessor[succ.to_index()];
                    if slot.is_some() {
                        // Already discovered using a shorter or equivalent path.
                        continue;
                    }
                    *slot = Some(x);
                    new_frontier.push(*succ);
                }
            }

            frontier = new_frontier;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::signed_directed_graph::SdGraph;
    use crate::test_utils::build_test_network;
    use std::collections::HashSet;

    #[test]
    pub fn test_shortest_cycle() {
        let network = build_test_network();
        let v = |name: &str| network.find_variable(name).unwrap();
        let (a, b_1, b_2) = (v("a"), v("b_1"), v("b_2"));
        let (d_1, d_2, d_3, e) = (v("d_1"), v("d_2"), v("d_3"), v("e"));
        let graph = SdGraph::from(&network);
        let all = graph.mk_all_vertices();

        assert_eq!(graph.shortest_cycle(&all, a, usize::MAX), None);
        assert_eq!(graph.shortest_cycle(&all, e, usize::MAX), Some(vec![e]));
        assert_eq!(graph.shortest_cycle(&all, b_1, usize::MAX), Some(vec![b_1, b_2]));
        assert_eq!(graph.shortest_cycle(&all, d_2, usize::MAX), Some(vec![d_2, d_1]));
        assert_eq!(graph.shortest_cycle(&all, d_3, usize::MAX), Some(vec![d_3, d_2, d_1]));

        // Too short upper bound.
        assert_eq!(graph.shortest_cycle(&all, d_3, 2), None);
        assert_eq!(graph.shortest_cycle(&all, d_3, 3), Some(vec![d_3, d_2, d_1]));

        // Restriction removes the short cycle.
        let restriction = HashSet::from([d_1, d_2]);
        assert_eq!(graph.shortest_cycle(&restriction, d_3, usize::MAX), None);
        assert_eq!(graph.shortest_cycle(&restriction, d_1, usize::MAX), Some(vec![d_1, d_2]));
    }
}
