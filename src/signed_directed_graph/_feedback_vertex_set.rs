use crate::signed_directed_graph::SdGraph;
use crate::VariableId;
use biodivine_lib_bdd::{Bdd, BddPartialValuation, BddVariable, BddVariableSet};
use std::collections::{HashMap, HashSet};

impl SdGraph {
    /// A utility function that prunes the `candidates` set to a smaller subset that is still
    /// guaranteed to be a valid FVS of the `subgraph`.
    ///
    /// Vertices are picked greedily from the shortest cycles, preferring vertices with
    /// a higher degree and then a smaller id.
    fn prune_fvs_candidates(
        &self,
        subgraph: &mut HashSet<VariableId>,
        mut candidates: HashSet<VariableId>,
    ) -> HashSet<VariableId> {
        let mut result = HashSet::new();

        // The shortest known cycle in the current `subgraph` for the given `pivot`.
        let mut shortest_cycle_for_pivot: HashMap<VariableId, Vec<VariableId>> = HashMap::new();

        while !candidates.is_empty() {
            let mut iterable: Vec<VariableId> = candidates.iter().cloned().collect();
            iterable.sort();

            let mut best: Option<(VariableId, usize, usize)> = None;
            for vertex in iterable {
                let cycle_len = if let Some(known_cycle) = shortest_cycle_for_pivot.get(&vertex) {
                    known_cycle.len()
                } else if let Some(cycle) = self.shortest_cycle(subgraph, vertex, usize::MAX) {
                    let len = cycle.len();
                    shortest_cycle_for_pivot.insert(vertex, cycle);
                    len
                } else {
                    subgraph.remove(&vertex);
                    candidates.remove(&vertex);
                    continue;
                };

                let degree = self.approx_degree(vertex, subgraph);
                let improves = match best {
                    None => true,
                    Some((_, len, deg)) => cycle_len < len || (cycle_len == len && degree > deg),
                };
                if improves {
                    best = Some((vertex, cycle_len, degree));
                }
                if cycle_len == 1 {
                    // Self-loops are always optimal.
                    break;
                }
            }

            let Some((vertex, _, _)) = best else {
                // The remaining graph is acyclic.
                return result;
            };

            result.insert(vertex);
            subgraph.remove(&vertex);
            candidates.remove(&vertex);

            shortest_cycle_for_pivot.retain(|_, cycle| !cycle.contains(&vertex));
        }

        result
    }

    /// Compute a feedback vertex set of the subgraph induced by the vertices in the
    /// given `restriction` set.
    ///
    /// A feedback vertex set is a set of vertices such that when these vertices are removed,
    /// the resulting graph is acyclic.
    ///
    /// The algorithm attempts to minimize the size of the resulting FVS, but it
    /// is not guaranteed that the result is minimal, as the minimal FVS problem
    /// is NP complete. The result is deterministic for a fixed graph.
    pub fn restricted_feedback_vertex_set(
        &self,
        restriction: &HashSet<VariableId>,
    ) -> HashSet<VariableId> {
        // The first pass removes most of the uninteresting vertices, the second pass then
        // (usually) makes the result subset minimal.
        let candidates = self.prune_fvs_candidates(&mut restriction.clone(), restriction.clone());
        self.prune_fvs_candidates(&mut restriction.clone(), candidates)
    }

    /// Compute *all* feedback vertex sets of minimum cardinality within the subgraph induced
    /// by `restriction`.
    ///
    /// The search starts at the number of independent cycles (a lower bound) and stops at the
    /// size of the greedy FVS (an upper bound). For each size `k`, the candidate sets are
    /// represented symbolically as a `Bdd`. Each candidate is either refuted by a cycle that it
    /// misses (which becomes a new clause) or accepted as a solution.
    ///
    /// If the restriction is acyclic, the result is a single empty set. The result is sorted
    /// by the (sorted) vertices of each set.
    pub fn restricted_minimum_feedback_vertex_sets(
        &self,
        restriction: &HashSet<VariableId>,
    ) -> Vec<HashSet<VariableId>> {
        if self.is_acyclic(restriction) {
            return vec![HashSet::new()];
        }

        let upper_bound = self.restricted_feedback_vertex_set(restriction);
        let cycles = self.restricted_independent_cycles(restriction);
        log::trace!(
            "Minimum FVS size is between {} and {}.",
            cycles.len(),
            upper_bound.len()
        );

        let mut vertices: Vec<VariableId> = restriction.iter().cloned().collect();
        vertices.sort();
        let Ok(num_vars) = u16::try_from(vertices.len()) else {
            return vec![upper_bound];
        };

        let ctx = BddVariableSet::new_anonymous(num_vars);
        let bdd_vars = ctx.variables();
        let bdd_var_of: HashMap<VariableId, BddVariable> = vertices
            .iter()
            .cloned()
            .zip(bdd_vars.iter().cloned())
            .collect();

        // Every FVS must hit every cycle. Here, `true` means "vertex is in the FVS".
        let cycle_clause = |cycle: &[VariableId]| -> Bdd {
            let mut valuation = BddPartialValuation::empty();
            for x in cycle {
                valuation[bdd_var_of[x]] = Some(true);
            }
            ctx.mk_disjunctive_clause(&valuation)
        };

        let mut initial = ctx.mk_true();
        for cycle in &cycles {
            initial = initial.and(&cycle_clause(cycle));
        }

        for k in cycles.len()..=upper_bound.len() {
            log::trace!("Searching for feedback vertex sets of size {}.", k);
            let mut candidates = initial.and(&ctx.mk_sat_exactly_k(k, &bdd_vars));
            let mut solutions: Vec<Vec<VariableId>> = Vec::new();
            while let Some(valuation) = candidates.most_negative_valuation() {
                let fvs: Vec<VariableId> = vertices
                    .iter()
                    .cloned()
                    .filter(|x| valuation[bdd_var_of[x]])
                    .collect();
                let remaining: HashSet<VariableId> = vertices
                    .iter()
                    .cloned()
                    .filter(|x| !fvs.contains(x))
                    .collect();

                if let Some(cycle) = self.any_shortest_cycle(&remaining) {
                    candidates = candidates.and(&cycle_clause(&cycle));
                } else {
                    let mut solution = BddPartialValuation::empty();
                    for x in &fvs {
                        solution[bdd_var_of[x]] = Some(true);
                    }
                    candidates = candidates.and_not(&ctx.mk_conjunctive_clause(&solution));
                    solutions.push(fvs);
                }
            }

            if !solutions.is_empty() {
                solutions.sort();
                log::debug!(
                    "Found {} minimum feedback vertex set(s) of size {}.",
                    solutions.len(),
                    k
                );
                return solutions
                    .into_iter()
                    .map(|it| it.into_iter().collect())
                    .collect();
            }
        }

        // Unreachable in practice, since the greedy FVS is a solution of size `upper_bound`.
        vec![upper_bound]
    }

    /// **(internal)** Find one of the globally shortest cycles within `restriction`.
    fn any_shortest_cycle(&self, restriction: &HashSet<VariableId>) -> Option<Vec<VariableId>> {
        let mut vertices: Vec<VariableId> = restriction.iter().cloned().collect();
        vertices.sort();
        let mut best: Option<Vec<VariableId>> = None;
        for x in vertices {
            let bound = best.as_ref().map(|it| it.len() - 1).unwrap_or(usize::MAX);
            if let Some(cycle) = self.shortest_cycle(restriction, x, bound) {
                let is_self_loop = cycle.len() == 1;
                best = Some(cycle);
                if is_self_loop {
                    break;
                }
            }
        }
        best
    }

    /// **(internal)** Compute the degree of a vertex within the given set.
    pub(crate) fn approx_degree(&self, vertex: VariableId, universe: &HashSet<VariableId>) -> usize {
        let in_degree = self.predecessors[vertex.to_index()]
            .iter()
            .filter(|(x, _)| universe.contains(x))
            .count();
        let out_degree = self.successors[vertex.to_index()]
            .iter()
            .filter(|(x, _)| universe.contains(x))
            .count();

        in_degree + out_degree
    }
}

#[cfg(test)]
mod tests {
    use crate::signed_directed_graph::SdGraph;
    use crate::test_utils::build_test_network;
    use std::collections::HashSet;

    #[test]
    pub fn test_feedback_vertex_set() {
        let network = build_test_network();
        let v = |name: &str| network.find_variable(name).unwrap();
        let graph = SdGraph::from(&network);

        let fvs = graph.restricted_feedback_vertex_set(&graph.mk_all_vertices());
        assert_eq!(fvs.len(), 3);
        assert!(!fvs.contains(&v("a")));
        assert!(!fvs.contains(&v("c")));
        assert!(!fvs.contains(&v("d_3")));
        assert!(fvs.contains(&v("e")));
        assert!(fvs.contains(&v("b_1")) || fvs.contains(&v("b_2")));
        assert!(fvs.contains(&v("d_1")) || fvs.contains(&v("d_2")));

        // Removing the FVS leaves an acyclic graph.
        let rest: HashSet<_> = graph.mk_all_vertices().difference(&fvs).cloned().collect();
        assert!(graph.is_acyclic(&rest));

        // Deterministic.
        assert_eq!(fvs, graph.restricted_feedback_vertex_set(&graph.mk_all_vertices()));
    }

    #[test]
    pub fn test_minimum_feedback_vertex_sets() {
        let network = build_test_network();
        let v = |name: &str| network.find_variable(name).unwrap();
        let graph = SdGraph::from(&network);

        let all = graph.restricted_minimum_feedback_vertex_sets(&graph.mk_all_vertices());
        let expected = vec![
            HashSet::from([v("b_1"), v("d_1"), v("e")]),
            HashSet::from([v("b_1"), v("d_2"), v("e")]),
            HashSet::from([v("b_2"), v("d_1"), v("e")]),
            HashSet::from([v("b_2"), v("d_2"), v("e")]),
        ];
        assert_eq!(all, expected);

        let d_component = HashSet::from([v("d_1"), v("d_2"), v("d_3")]);
        let d_sets = graph.restricted_minimum_feedback_vertex_sets(&d_component);
        assert_eq!(
            d_sets,
            vec![HashSet::from([v("d_1")]), HashSet::from([v("d_2")])]
        );

        let acyclic = HashSet::from([v("a"), v("c"), v("d_3")]);
        assert_eq!(
            graph.restricted_minimum_feedback_vertex_sets(&acyclic),
            vec![HashSet::new()]
        );
    }
}
