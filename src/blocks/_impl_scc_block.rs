use crate::blocks::{BlockResult, BlockStructure, SccBlock, Unrolling};
use crate::fvs::FvsFinder;
use crate::node_model::{ControlMap, NodeModel};
use crate::signed_directed_graph::SdGraph;
use crate::{NetworkError, SignedNetwork, VariableId};
use std::collections::{HashMap, HashSet};

impl SccBlock {
    /// Create a block for a strongly connected component of `network`.
    ///
    /// The `finder` is consulted exactly once. Every returned feedback vertex set is checked
    /// and converted into an `Unrolling`.
    pub fn new(
        network: &SignedNetwork,
        graph: &SdGraph,
        analyzed: &HashSet<VariableId>,
        finder: &dyn FvsFinder,
    ) -> Result<SccBlock, NetworkError> {
        let structure = BlockStructure::new(network, analyzed);
        let invalid = |fvs: &[VariableId]| NetworkError::InvalidFeedbackVertexSet {
            component: network.variable_names(analyzed),
            fvs: network.variable_names(fvs),
        };

        let mut candidates: Vec<Vec<VariableId>> = finder
            .find_feedback_vertex_sets(graph, analyzed)
            .into_iter()
            .map(|fvs| {
                let mut fvs: Vec<VariableId> = fvs.into_iter().collect();
                fvs.sort();
                fvs
            })
            .collect();
        candidates.sort();
        candidates.dedup();
        if candidates.is_empty() {
            return Err(invalid(&[]));
        }

        let mut unrollings = Vec::with_capacity(candidates.len());
        for fvs in candidates {
            if fvs.iter().any(|it| !analyzed.contains(it)) {
                return Err(invalid(&fvs));
            }
            let mut sources = structure.external().to_vec();
            sources.extend_from_slice(&fvs);
            let Some(mut layers) = structure.layers(&sources) else {
                return Err(invalid(&fvs));
            };
            layers.push(fvs.clone());
            unrollings.push(Unrolling { fvs, layers });
        }

        log::debug!(
            "Component of size {} has {} FVS candidate(s) of size {:?}.",
            analyzed.len(),
            unrollings.len(),
            unrollings.iter().map(|it| it.fvs.len()).collect::<Vec<_>>()
        );

        Ok(SccBlock {
            structure,
            unrollings,
        })
    }

    pub fn structure(&self) -> &BlockStructure {
        &self.structure
    }

    pub fn unrollings(&self) -> &[Unrolling] {
        &self.unrollings
    }

    /// Average the predictions of all unrollings (every FVS has the same weight).
    pub fn evaluate(
        &self,
        nodes: &[NodeModel],
        values: &HashMap<VariableId, f64>,
        control: &ControlMap,
    ) -> Result<BlockResult, NetworkError> {
        let external = self.structure.external_values(nodes, values)?;

        let mut attractor_count = 0.0;
        let mut eavs: HashMap<VariableId, f64> = HashMap::new();
        for unrolling in &self.unrollings {
            let result = self.evaluate_unrolling(unrolling, nodes, &external, control)?;
            attractor_count += result.attractor_count;
            for (node, eav) in result.eavs {
                *eavs.entry(node).or_insert(0.0) += eav;
            }
        }

        let count = self.unrollings.len() as f64;
        for eav in eavs.values_mut() {
            *eav /= count;
        }
        Ok(BlockResult {
            attractor_count: attractor_count / count,
            eavs,
        })
    }

    /// Pin the FVS to every Boolean state, compute the probability that the state is
    /// self-consistent (PBPA) and weight the EAVs of that state by it.
    fn evaluate_unrolling(
        &self,
        unrolling: &Unrolling,
        nodes: &[NodeModel],
        external: &HashMap<VariableId, f64>,
        control: &ControlMap,
    ) -> Result<BlockResult, NetworkError> {
        let size = unrolling.fvs.len();
        let state_count = u32::try_from(size)
            .ok()
            .and_then(|it| 1usize.checked_shl(it))
            .unwrap_or(usize::MAX);

        let mut pbpa_sum = 0.0;
        let mut weighted: HashMap<VariableId, f64> = self
            .structure
            .analyzed()
            .iter()
            .map(|it| (*it, 0.0))
            .collect();

        for state in 0..state_count {
            // The first FVS node is the most significant bit.
            let pinned = |i: usize| (state >> (size - 1 - i)) & 1 == 1;

            let mut values = external.clone();
            for (i, node) in unrolling.fvs.iter().enumerate() {
                values.insert(*node, if pinned(i) { 1.0 } else { 0.0 });
            }
            self.structure
                .propagate(nodes, &unrolling.layers, &mut values, control)?;

            let mut pbpa = 1.0;
            for (i, node) in unrolling.fvs.iter().enumerate() {
                let eav = values[node];
                pbpa *= if pinned(i) { eav } else { 1.0 - eav };
            }
            log::trace!("FVS state {:b} has PBPA {}.", state, pbpa);

            pbpa_sum += pbpa;
            for (node, weight) in weighted.iter_mut() {
                *weight += pbpa * values[node];
            }
        }

        if pbpa_sum <= 0.0 {
            return Err(NetworkError::NoSelfConsistentState {
                fvs: unrolling
                    .fvs
                    .iter()
                    .map(|it| nodes[it.to_index()].name().to_string())
                    .collect(),
            });
        }

        for eav in weighted.values_mut() {
            *eav /= pbpa_sum;
        }
        Ok(BlockResult {
            attractor_count: pbpa_sum,
            eavs: weighted,
        })
    }
}

impl Unrolling {
    /// The (sorted) feedback vertex set of this unrolling.
    pub fn fvs(&self) -> &[VariableId] {
        &self.fvs
    }

    /// Layers of the unrolled block. The FVS appears both in the first and in the last layer.
    pub fn layers(&self) -> &[Vec<VariableId>] {
        &self.layers
    }
}
