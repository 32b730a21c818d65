//! Strategies for choosing feedback vertex sets of a strongly connected component.
//!
//! The `SccBlock` only relies on the `FvsFinder` contract: for a component, return a
//! non-empty list of distinct vertex sets, each of which breaks every cycle of the
//! subgraph induced by the component. `FvsSearch` is the implementation used by default.

use crate::signed_directed_graph::SdGraph;
use crate::VariableId;
use std::collections::HashSet;

/// Components up to this size are searched exhaustively by `FvsSearch::Auto`.
pub const DEFAULT_EXHAUSTIVE_LIMIT: usize = 15;

/// Computes feedback vertex sets of a single component.
///
/// The `component` is a set of vertices of `graph`; edges entering the component from the
/// outside are not part of the problem. An acyclic component yields a single empty set.
pub trait FvsFinder {
    fn find_feedback_vertex_sets(
        &self,
        graph: &SdGraph,
        component: &HashSet<VariableId>,
    ) -> Vec<HashSet<VariableId>>;
}

/// The built-in FVS search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FvsSearch {
    /// All feedback vertex sets of minimum cardinality.
    Minimum,
    /// A single feedback vertex set computed by a greedy heuristic. The set is usually
    /// small, but it is not guaranteed to be minimal.
    Approximate,
    /// `Minimum` for components with at most `exhaustive_limit` vertices,
    /// `Approximate` otherwise.
    Auto { exhaustive_limit: usize },
}

impl Default for FvsSearch {
    fn default() -> Self {
        FvsSearch::Auto {
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
        }
    }
}

impl FvsSearch {
    /// Resolve `Auto` into a concrete strategy for a component of the given size.
    pub fn for_component_size(self, size: usize) -> FvsSearch {
        match self {
            FvsSearch::Auto { exhaustive_limit } if size <= exhaustive_limit => FvsSearch::Minimum,
            FvsSearch::Auto { .. } => FvsSearch::Approximate,
            other => other,
        }
    }
}

impl FvsFinder for FvsSearch {
    fn find_feedback_vertex_sets(
        &self,
        graph: &SdGraph,
        component: &HashSet<VariableId>,
    ) -> Vec<HashSet<VariableId>> {
        let strategy = self.for_component_size(component.len());
        log::trace!(
            "FVS search ({:?}) in a component of size {}.",
            strategy,
            component.len()
        );
        match strategy {
            FvsSearch::Approximate => vec![graph.restricted_feedback_vertex_set(component)],
            _ => graph.restricted_minimum_feedback_vertex_sets(component),
        }
    }
}
