use crate::signed_directed_graph::SdGraph;
use crate::{Sign, VariableId};
use std::collections::HashSet;

impl SdGraph {
    /// Return the set of vertices forward-reachable from the `initial` set.
    pub fn forward_reachable(&self, initial: HashSet<VariableId>) -> HashSet<VariableId> {
        reachability(&self.successors, initial, None)
    }

    /// Return the set of vertices backward-reachable from the `initial` set.
    pub fn backward_reachable(&self, initial: HashSet<VariableId>) -> HashSet<VariableId> {
        reachability(&self.predecessors, initial, None)
    }

    /// Return the set of vertices forward-reachable from the `initial` set within
    /// the `restriction` set.
    pub fn restricted_forward_reachable(
        &self,
        restriction: &HashSet<VariableId>,
        initial: HashSet<VariableId>,
    ) -> HashSet<VariableId> {
        reachability(&self.successors, initial, Some(restriction))
    }

    /// Return the set of vertices backward-reachable from the `initial` set within
    /// the `restriction` set.
    pub fn restricted_backward_reachable(
        &self,
        restriction: &HashSet<VariableId>,
        initial: HashSet<VariableId>,
    ) -> HashSet<VariableId> {
        reachability(&self.predecessors, initial, Some(restriction))
    }
}

/// **(internal)** A shared utility method that implements forward or backward reachability
/// (optionally restricted to a `universe`) depending on the supplied edge relation.
fn reachability(
    edges: &[Vec<(VariableId, Sign)>],
    initial: HashSet<VariableId>,
    universe: Option<&HashSet<VariableId>>,
) -> HashSet<VariableId> {
    let mut result = initial;
    let mut frontier: Vec<VariableId> = result.iter().cloned().collect();
    while let Some(x) = frontier.pop() {
        for (step, _) in &edges[x.to_index()] {
            let allowed = universe.map(|u| u.contains(step)).unwrap_or(true);
            if allowed && result.insert(*step) {
                frontier.push(*step);
            }
        }
    }
    result
}
