use crate::blocks::{AcyclicBlock, BlockResult, BlockStructure};
use crate::node_model::{ControlMap, NodeModel};
use crate::{NetworkError, SignedNetwork, VariableId};
use std::collections::{HashMap, HashSet};

impl AcyclicBlock {
    /// Create a block from a set of nodes that induce an acyclic subgraph of `network`.
    pub fn new(
        network: &SignedNetwork,
        analyzed: &HashSet<VariableId>,
    ) -> Result<AcyclicBlock, NetworkError> {
        let structure = BlockStructure::new(network, analyzed);
        let Some(layers) = structure.layers(structure.external()) else {
            return Err(NetworkError::InvalidFeedbackVertexSet {
                component: network.variable_names(analyzed),
                fvs: Vec::new(),
            });
        };
        Ok(AcyclicBlock { structure, layers })
    }

    pub fn structure(&self) -> &BlockStructure {
        &self.structure
    }

    /// Layers of the block. The first layer holds the external regulators.
    pub fn layers(&self) -> &[Vec<VariableId>] {
        &self.layers
    }

    /// An acyclic block always has exactly one predicted attractor: its state is fully
    /// determined by the external regulators.
    pub fn evaluate(
        &self,
        nodes: &[NodeModel],
        values: &HashMap<VariableId, f64>,
        control: &ControlMap,
    ) -> Result<BlockResult, NetworkError> {
        let mut eavs = self.structure.external_values(nodes, values)?;
        self.structure
            .propagate(nodes, &self.layers, &mut eavs, control)?;
        eavs.retain(|node, _| self.structure.is_analyzed(*node));
        Ok(BlockResult {
            attractor_count: 1.0,
            eavs,
        })
    }
}
