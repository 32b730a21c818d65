//! Evaluation units of a decomposed network.
//!
//! Every analyzed node of a network belongs to exactly one `Block`. A block reads the
//! ensemble average values (EAVs) of its *external regulators* (computed by earlier blocks
//! or given as network inputs) and computes the EAVs of its analyzed nodes together with
//! the predicted number of point attractors (NoPA) of the block.
//!
//!  - An `AcyclicBlock` has no cycles, so its nodes are computed layer by layer and its
//!    NoPA is always `1`.
//!  - An `SccBlock` is a strongly connected component. For every feedback vertex set (FVS)
//!    of the component, the block is unrolled into an acyclic graph where the FVS nodes
//!    are pinned to a Boolean state. The probability that a pinned state reproduces
//!    itself (PBPA) is summed over all states to obtain the NoPA of that FVS.

use crate::node_model::{ControlMap, NodeModel};
use crate::{NetworkError, VariableId};
use std::collections::HashMap;

/// **(internal)** Evaluation of an acyclic block.
mod _impl_acyclic_block;
/// **(internal)** Regulator maps, layering and layer-by-layer EAV propagation.
mod _impl_block_structure;
/// **(internal)** FVS unrolling and evaluation of a strongly connected block.
mod _impl_scc_block;

/// The regulation structure of a block: analyzed nodes, their external regulators and
/// the regulations of the induced subnetwork, split by sign.
#[derive(Clone, Debug)]
pub struct BlockStructure {
    analyzed: Vec<VariableId>,
    external: Vec<VariableId>,
    activating_regulators: HashMap<VariableId, Vec<VariableId>>,
    inhibiting_regulators: HashMap<VariableId, Vec<VariableId>>,
    activating_targets: HashMap<VariableId, Vec<VariableId>>,
    inhibiting_targets: HashMap<VariableId, Vec<VariableId>>,
}

/// A block whose analyzed nodes induce an acyclic subgraph.
#[derive(Clone, Debug)]
pub struct AcyclicBlock {
    structure: BlockStructure,
    layers: Vec<Vec<VariableId>>,
}

/// A block whose analyzed nodes form a strongly connected component (or a single node
/// with a self-loop).
#[derive(Clone, Debug)]
pub struct SccBlock {
    structure: BlockStructure,
    unrollings: Vec<Unrolling>,
}

/// The acyclic form of an `SccBlock` for one feedback vertex set.
///
/// The first layer contains the external regulators and the FVS nodes. The last layer
/// contains the FVS nodes again, so that each of them receives a freshly computed EAV.
#[derive(Clone, Debug)]
pub struct Unrolling {
    fvs: Vec<VariableId>,
    layers: Vec<Vec<VariableId>>,
}

#[derive(Clone, Debug)]
pub enum Block {
    Acyclic(AcyclicBlock),
    Scc(SccBlock),
}

/// Output of a single block evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockResult {
    /// Predicted number of point attractors of the block.
    pub attractor_count: f64,
    /// EAVs of the analyzed nodes of the block.
    pub eavs: HashMap<VariableId, f64>,
}

impl Block {
    pub fn structure(&self) -> &BlockStructure {
        match self {
            Block::Acyclic(block) => &block.structure,
            Block::Scc(block) => &block.structure,
        }
    }

    /// Sorted list of nodes computed by this block.
    pub fn analyzed(&self) -> &[VariableId] {
        self.structure().analyzed()
    }

    /// Sorted list of nodes which this block reads, but does not compute.
    pub fn external(&self) -> &[VariableId] {
        self.structure().external()
    }

    pub fn is_scc(&self) -> bool {
        matches!(self, Block::Scc(_))
    }

    /// Compute the EAVs of the analyzed nodes and the predicted number of point attractors.
    ///
    /// The `values` map must contain the EAVs of all external regulators. `nodes` is indexed
    /// by `VariableId`.
    pub fn evaluate(
        &self,
        nodes: &[NodeModel],
        values: &HashMap<VariableId, f64>,
        control: &ControlMap,
    ) -> Result<BlockResult, NetworkError> {
        match self {
            Block::Acyclic(block) => block.evaluate(nodes, values, control),
            Block::Scc(block) => block.evaluate(nodes, values, control),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::blocks::{AcyclicBlock, Block, SccBlock};
    use crate::fvs::FvsSearch;
    use crate::nested_canalizing::shared_counter;
    use crate::node_model::{ControlMap, NodeModel};
    use crate::signed_directed_graph::SdGraph;
    use crate::{NetworkError, SignedNetwork, VariableId};
    use std::collections::{HashMap, HashSet};

    fn node_models(network: &SignedNetwork) -> Vec<NodeModel> {
        network
            .variables()
            .map(|v| NodeModel::new(network, v, shared_counter()))
            .collect()
    }

    fn scc_block(network: &SignedNetwork, names: &[&str]) -> Result<SccBlock, NetworkError> {
        let graph = SdGraph::from(network);
        let analyzed: HashSet<VariableId> = names
            .iter()
            .map(|it| network.find_variable(it).unwrap())
            .collect();
        SccBlock::new(network, &graph, &analyzed, &FvsSearch::Minimum)
    }

    #[test]
    fn positive_cycle_has_two_attractors() {
        let network = SignedNetwork::try_from("a -> b\nb -> a").unwrap();
        let nodes = node_models(&network);
        let block = Block::Scc(scc_block(&network, &["a", "b"]).unwrap());
        assert!(block.is_scc());
        assert!(block.external().is_empty());

        let result = block
            .evaluate(&nodes, &HashMap::new(), &ControlMap::new())
            .unwrap();
        assert_eq!(result.attractor_count, 2.0);
        assert_eq!(result.eavs.len(), 2);
        for eav in result.eavs.values() {
            assert_eq!(*eav, 0.5);
        }
    }

    #[test]
    fn controlled_positive_cycle() {
        let network = SignedNetwork::try_from("a -> b\nb -> a").unwrap();
        let a = network.find_variable("a").unwrap();
        let b = network.find_variable("b").unwrap();
        let nodes = node_models(&network);
        let block = Block::Scc(scc_block(&network, &["a", "b"]).unwrap());

        let control = ControlMap::from([(a, false)]);
        let result = block.evaluate(&nodes, &HashMap::new(), &control).unwrap();
        assert_eq!(result.attractor_count, 1.0);
        assert_eq!(result.eavs[&a], 0.0);
        assert_eq!(result.eavs[&b], 0.0);
    }

    #[test]
    fn negative_cycle_has_no_self_consistent_state() {
        let network = SignedNetwork::try_from("a -> b\nb -> c\nc -| a").unwrap();
        let nodes = node_models(&network);
        let block = scc_block(&network, &["a", "b", "c"]).unwrap();
        assert_eq!(block.unrollings().len(), 3);

        let result = block.evaluate(&nodes, &HashMap::new(), &ControlMap::new());
        assert!(matches!(
            result,
            Err(NetworkError::NoSelfConsistentState { .. })
        ));
    }

    #[test]
    fn input_driven_negative_cycle() {
        let network =
            SignedNetwork::try_from("i -> a\nc -| a\na -> b\nb -> c\ni -> i").unwrap();
        let i = network.find_variable("i").unwrap();
        let nodes = node_models(&network);
        let block = scc_block(&network, &["a", "b", "c"]).unwrap();
        assert_eq!(block.structure().external(), &[i]);

        for input in [0.0, 1.0] {
            let values = HashMap::from([(i, input)]);
            let result = block
                .evaluate(&nodes, &values, &ControlMap::new())
                .unwrap();
            assert!((result.attractor_count - 0.5).abs() < 1e-12);
            assert_eq!(result.eavs.len(), 3);
        }

        let missing = block.evaluate(&nodes, &HashMap::new(), &ControlMap::new());
        assert_eq!(
            missing,
            Err(NetworkError::MissingValue {
                name: "i".to_string()
            })
        );
    }

    #[test]
    fn acyclic_block_propagation() {
        let network = SignedNetwork::try_from("x -> y\ny -| z\nx -> z").unwrap();
        let v = |name: &str| network.find_variable(name).unwrap();
        let nodes = node_models(&network);
        let analyzed = HashSet::from([v("y"), v("z")]);
        let block = AcyclicBlock::new(&network, &analyzed).unwrap();
        assert_eq!(block.layers().len(), 3);
        assert_eq!(block.layers()[0], vec![v("x")]);
        assert_eq!(block.layers()[1], vec![v("y")]);
        assert_eq!(block.layers()[2], vec![v("z")]);

        let block = Block::Acyclic(block);
        let values = HashMap::from([(v("x"), 1.0)]);
        let result = block
            .evaluate(&nodes, &values, &ControlMap::new())
            .unwrap();
        assert_eq!(result.attractor_count, 1.0);
        // y = 1, so z has one active regulator (x) out of two.
        assert_eq!(result.eavs[&v("y")], 1.0);
        assert_eq!(result.eavs[&v("z")], 0.5);

        let control = ControlMap::from([(v("y"), false)]);
        let result = block.evaluate(&nodes, &values, &control).unwrap();
        assert_eq!(result.eavs[&v("y")], 0.0);
        assert_eq!(result.eavs[&v("z")], 1.0);
    }

    #[test]
    fn acyclic_block_rejects_cycles() {
        let network = SignedNetwork::try_from("a -> b\nb -> a").unwrap();
        let analyzed: HashSet<VariableId> = network.variables().collect();
        assert!(matches!(
            AcyclicBlock::new(&network, &analyzed),
            Err(NetworkError::InvalidFeedbackVertexSet { .. })
        ));
    }
}
