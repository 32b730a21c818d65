use crate::signed_directed_graph::SdGraph;
use crate::{Sign, VariableId};
use std::collections::{HashMap, HashSet};

impl SdGraph {
    /// Find all non-trivial strongly connected components of this `SdGraph`.
    ///
    /// A component is non-trivial if it has more than one vertex, or it is a single vertex
    /// with a self-loop. The result is sorted by component size.
    pub fn strongly_connected_components(&self) -> Vec<HashSet<VariableId>> {
        self.restricted_strongly_connected_components(&self.mk_all_vertices())
    }

    /// Find all non-trivial strongly connected components in the given `restriction` of
    /// this `SdGraph`.
    ///
    /// The result is sorted by component size.
    pub fn restricted_strongly_connected_components(
        &self,
        restriction: &HashSet<VariableId>,
    ) -> Vec<HashSet<VariableId>> {
        let mut results = Vec::new();
        scc_recursive(self, restriction.clone(), &mut results, None);
        sort_components(&mut results);
        results
    }

    /// Partition all vertices of this `SdGraph` into strongly connected components.
    ///
    /// Unlike `strongly_connected_components`, the partition also contains trivial
    /// (singleton) components. The result is sorted by component size, and then by the
    /// smallest vertex, so it does not depend on the order in which the edges were declared.
    pub fn component_partition(&self) -> Vec<HashSet<VariableId>> {
        self.restricted_component_partition(&self.mk_all_vertices())
    }

    /// The same as `component_partition`, but only considers the subgraph induced by the
    /// `restriction` set.
    pub fn restricted_component_partition(
        &self,
        restriction: &HashSet<VariableId>,
    ) -> Vec<HashSet<VariableId>> {
        let mut results = Vec::new();
        let mut trivial = Vec::new();
        scc_recursive(self, restriction.clone(), &mut results, Some(&mut trivial));
        results.extend(trivial.into_iter().map(|it| HashSet::from([it])));
        sort_components(&mut results);
        results
    }

    /// Returns `true` if the subgraph induced by `restriction` has no cycles (self-loops
    /// included).
    pub fn is_acyclic(&self, restriction: &HashSet<VariableId>) -> bool {
        let mut universe = restriction.clone();
        trim_trivial(&self.successors, &mut universe, None);
        universe.is_empty()
    }

    /// Compute the edges of the condensation graph of the given `components`.
    ///
    /// The result contains a pair `(i, j)` whenever some vertex of `components[i]`
    /// regulates some vertex of `components[j]` and `i != j`. Vertices that do not belong
    /// to any component are ignored.
    pub fn condensation(&self, components: &[HashSet<VariableId>]) -> HashSet<(usize, usize)> {
        let mut component_of = HashMap::new();
        for (i, component) in components.iter().enumerate() {
            for x in component {
                component_of.insert(*x, i);
            }
        }

        let mut edges = HashSet::new();
        for (x, i) in &component_of {
            for (target, _) in &self.successors[x.to_index()] {
                if let Some(j) = component_of.get(target) {
                    if i != j {
                        edges.insert((*i, *j));
                    }
                }
            }
        }
        edges
    }
}

/// **(internal)** Sort components by size and then by their smallest vertex.
fn sort_components(components: &mut [HashSet<VariableId>]) {
    components.sort_by_key(|it| (it.len(), it.iter().min().cloned()));
}

/// **(internal)** A recursive procedure for finding non-trivial SCCs in a restricted
/// state space. If `trivial` is given, every vertex which is shown to belong to a trivial
/// component is recorded there.
///
/// The complexity of the procedure is $n^2$. It can be (in theory) improved to $n \cdot log(n)$,
/// but at the moment it is still sufficiently fast for the network sizes we care about.
fn scc_recursive(
    graph: &SdGraph,
    mut universe: HashSet<VariableId>,
    results: &mut Vec<HashSet<VariableId>>,
    mut trivial: Option<&mut Vec<VariableId>>,
) {
    trim_trivial(&graph.successors, &mut universe, trivial.as_deref_mut());
    trim_trivial(&graph.predecessors, &mut universe, trivial.as_deref_mut());

    let Some(pivot) = universe.iter().min().cloned() else {
        return;
    };

    let fwd = graph.restricted_forward_reachable(&universe, HashSet::from([pivot]));
    let bwd = graph.restricted_backward_reachable(&universe, HashSet::from([pivot]));

    let fwd_or_bwd: HashSet<VariableId> = fwd.union(&bwd).cloned().collect();
    let fwd_and_bwd: HashSet<VariableId> = fwd.intersection(&bwd).cloned().collect();

    if is_non_trivial(graph, &fwd_and_bwd) {
        results.push(fwd_and_bwd);
    } else if let Some(trivial) = trivial.as_deref_mut() {
        trivial.extend(fwd_and_bwd);
    }

    let universe_rest: HashSet<VariableId> = universe.difference(&fwd_or_bwd).cloned().collect();
    let fwd_rest: HashSet<VariableId> = fwd.difference(&bwd).cloned().collect();
    let bwd_rest: HashSet<VariableId> = bwd.difference(&fwd).cloned().collect();

    for rest in [universe_rest, fwd_rest, bwd_rest] {
        if !rest.is_empty() {
            scc_recursive(graph, rest, results, trivial.as_deref_mut());
        }
    }
}

/// **(internal)** Check if an SCC is trivial.
///
/// Note that this does not verify that the set is an actual SCC. It just checks for self-loops
/// on single-state SCCs.
fn is_non_trivial(graph: &SdGraph, scc: &HashSet<VariableId>) -> bool {
    match scc.len() {
        0 => false,
        1 => scc.iter().all(|x| graph.has_self_loop(*x)),
        _ => true,
    }
}

/// **(internal)** Remove all vertices from `set` that can be trivially shown to be outside
/// of any cycle using the given `edge` set. Removed vertices are recorded in `removed`.
///
/// Note that this does not eliminate *all* trivial SCCs, just a part of them that can be detected
/// using this particular method.
fn trim_trivial(
    edges: &[Vec<(VariableId, Sign)>],
    set: &mut HashSet<VariableId>,
    mut removed: Option<&mut Vec<VariableId>>,
) {
    let mut continue_trimming = true;
    while continue_trimming {
        continue_trimming = false;
        let mut candidates: Vec<VariableId> = set.iter().cloned().collect();
        candidates.sort();
        for x in candidates {
            let non_trivial = edges[x.to_index()].iter().any(|(y, _)| set.contains(y));
            if !non_trivial {
                set.remove(&x);
                if let Some(removed) = removed.as_deref_mut() {
                    removed.push(x);
                }
                continue_trimming = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::signed_directed_graph::SdGraph;
    use crate::test_utils::build_test_network;
    use crate::Sign::{Negative, Positive};
    use crate::{Sign, SignedNetwork};
    use std::collections::{BTreeSet, HashSet};

    #[test]
    pub fn test_scc_decomposition() {
        let network = build_test_network();
        let v = |name: &str| network.find_variable(name).unwrap();
        let (b_1, b_2, c) = (v("b_1"), v("b_2"), v("c"));
        let (d_1, d_2, d_3, e) = (v("d_1"), v("d_2"), v("d_3"), v("e"));

        let graph = SdGraph::from(&network);

        let scc = graph.strongly_connected_components();
        assert_eq!(scc.len(), 3);
        assert_eq!(scc[0], HashSet::from([e]));
        assert_eq!(scc[1], HashSet::from([b_1, b_2]));
        assert_eq!(scc[2], HashSet::from([d_1, d_2, d_3]));

        let scc =
            graph.restricted_strongly_connected_components(&HashSet::from([d_1, d_2, c, b_1, e]));
        assert_eq!(scc.len(), 2);
        assert_eq!(scc[0], HashSet::from([e]));
        assert_eq!(scc[1], HashSet::from([d_1, d_2]));
    }

    #[test]
    pub fn test_component_partition() {
        let network = build_test_network();
        let v = |name: &str| network.find_variable(name).unwrap();
        let graph = SdGraph::from(&network);

        let partition = graph.component_partition();
        assert_eq!(partition.len(), 5);
        assert_eq!(partition[0], HashSet::from([v("a")]));
        assert_eq!(partition[1], HashSet::from([v("c")]));
        assert_eq!(partition[2], HashSet::from([v("e")]));
        assert_eq!(partition[3], HashSet::from([v("b_1"), v("b_2")]));
        assert_eq!(partition[4], HashSet::from([v("d_1"), v("d_2"), v("d_3")]));

        let covered: usize = partition.iter().map(|it| it.len()).sum();
        assert_eq!(covered, network.num_vars());

        let condensation = graph.condensation(&partition);
        let expected = HashSet::from([(0, 1), (3, 1), (1, 2), (1, 4)]);
        assert_eq!(condensation, expected);
    }

    #[test]
    pub fn partition_does_not_depend_on_edge_order() {
        let edges = vec![
            ("a", Positive, "b"),
            ("b", Negative, "c"),
            ("c", Positive, "a"),
            ("c", Positive, "d"),
            ("d", Positive, "e"),
            ("e", Negative, "d"),
            ("f", Positive, "f"),
            ("e", Positive, "g"),
        ];

        let build = |names: Vec<&str>, edges: &[(&str, Sign, &str)]| {
            let names = names.into_iter().map(|it| it.to_string()).collect();
            let mut network = SignedNetwork::new(names).unwrap();
            for (from, sign, to) in edges {
                network.add_regulation(from, *sign, to).unwrap();
            }
            let partition = SdGraph::from(&network).component_partition();
            partition
                .into_iter()
                .map(|component| network.variable_names(&component))
                .map(|component| component.into_iter().collect::<BTreeSet<_>>())
                .collect::<BTreeSet<_>>()
        };

        let names = vec!["a", "b", "c", "d", "e", "f", "g"];
        let expected = build(names.clone(), &edges);

        let mut reversed_names = names.clone();
        reversed_names.reverse();
        let mut reversed_edges = edges.clone();
        reversed_edges.reverse();
        assert_eq!(expected, build(reversed_names, &reversed_edges));

        let mut rotated_names = names.clone();
        rotated_names.rotate_left(2);
        let mut rotated_edges = edges.clone();
        rotated_edges.rotate_left(3);
        assert_eq!(expected, build(rotated_names, &rotated_edges));

        let component = |items: &[&str]| -> BTreeSet<String> {
            items.iter().map(|it| it.to_string()).collect()
        };
        let manual: BTreeSet<BTreeSet<String>> = BTreeSet::from([
            component(&["a", "b", "c"]),
            component(&["d", "e"]),
            component(&["f"]),
            component(&["g"]),
        ]);
        assert_eq!(expected, manual);
    }

    #[test]
    pub fn acyclicity() {
        let network = build_test_network();
        let v = |name: &str| network.find_variable(name).unwrap();
        let graph = SdGraph::from(&network);
        assert!(!graph.is_acyclic(&graph.mk_all_vertices()));
        assert!(graph.is_acyclic(&HashSet::from([v("a"), v("b_1"), v("c"), v("d_2")])));
        assert!(!graph.is_acyclic(&HashSet::from([v("e")])));
        assert!(graph.is_acyclic(&HashSet::new()));
    }
}
