//! The top-level model of a signed network used to predict the number of point attractors.
//!
//! A `NetworkModel` owns the `SignedNetwork`, one `NodeModel` per variable and the
//! decomposition of the network into `Block`s, together with a fixed evaluation order of
//! the blocks. Predictions are computed for a (partial) assignment of the input nodes and
//! an optional control map; the model itself is never modified by a prediction.

use crate::blocks::Block;
use crate::fvs::{FvsFinder, FvsSearch};
use crate::nested_canalizing::shared_counter;
use crate::node_model::{NodeModel, SpecificLogic};
use crate::signed_directed_graph::SdGraph;
use crate::{NetworkError, SignedNetwork, VariableId};
use std::collections::{HashMap, HashSet};

/// **(internal)** Splitting of the network into acyclic and strongly connected blocks.
mod _impl_decomposition;
/// **(internal)** Enumeration of input conditions and evaluation of blocks.
mod _impl_prediction;
/// **(internal)** Topological ordering of blocks.
mod _impl_schedule;

/// A (partial) assignment of Boolean values to input nodes.
pub type InputCondition = HashMap<VariableId, bool>;

#[derive(Clone, Debug)]
pub struct NetworkModel {
    network: SignedNetwork,
    graph: SdGraph,
    nodes: Vec<NodeModel>,
    input_nodes: Vec<VariableId>,
    degenerate_nodes: Vec<VariableId>,
    blocks: Vec<Block>,
    evaluation_order: Vec<usize>,
}

/// The prediction for one full assignment of the free input nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioPrediction {
    /// Values of all input nodes which are not controlled.
    pub inputs: InputCondition,
    /// Predicted number of point attractors (the product over all blocks).
    pub attractor_count: f64,
    /// EAV of every node that was computed in this scenario.
    pub eavs: HashMap<VariableId, f64>,
}

/// The prediction for a partial input condition: the sum over all its completions.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub attractor_count: f64,
    pub scenarios: Vec<ScenarioPrediction>,
}

/// Nominal and controlled predictions for one input condition.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionEffect {
    pub inputs: InputCondition,
    pub nominal: f64,
    pub controlled: f64,
    /// `nominal - controlled`
    pub reduction: f64,
}

/// The effect of a control map on the predicted number of point attractors.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlEffect {
    pub conditions: Vec<ConditionEffect>,
    pub nominal: f64,
    pub controlled: f64,
    pub total_reduction: f64,
}

impl NetworkModel {
    /// Build a model using the default `FvsSearch` strategy.
    pub fn new(network: SignedNetwork) -> Result<NetworkModel, NetworkError> {
        NetworkModel::with_fvs_finder(network, &FvsSearch::default())
    }

    /// Build a model using a custom feedback vertex set strategy.
    pub fn with_fvs_finder(
        network: SignedNetwork,
        finder: &dyn FvsFinder,
    ) -> Result<NetworkModel, NetworkError> {
        let graph = SdGraph::from(&network);
        let counter = shared_counter();
        let nodes: Vec<NodeModel> = network
            .variables()
            .map(|v| NodeModel::new(&network, v, counter))
            .collect();

        let input_nodes = network.input_nodes();
        let degenerate_nodes = network.degenerate_nodes();
        for node in &degenerate_nodes {
            log::warn!(
                "Node `{}` is only regulated by a negative self-loop. Unless it is controlled, \
                 the network has no point attractor.",
                network[*node]
            );
        }

        let excluded: HashSet<VariableId> = input_nodes
            .iter()
            .chain(degenerate_nodes.iter())
            .cloned()
            .collect();
        let blocks = NetworkModel::decompose(&network, &graph, &excluded, finder)?;
        let evaluation_order = NetworkModel::schedule(&graph, &blocks, &excluded)?;

        log::info!(
            "Network with {} nodes: {} input(s), {} SCC block(s), {} acyclic block(s).",
            network.num_vars(),
            input_nodes.len(),
            blocks.iter().filter(|it| it.is_scc()).count(),
            blocks.iter().filter(|it| !it.is_scc()).count(),
        );

        Ok(NetworkModel {
            network,
            graph,
            nodes,
            input_nodes,
            degenerate_nodes,
            blocks,
            evaluation_order,
        })
    }

    pub fn network(&self) -> &SignedNetwork {
        &self.network
    }

    pub fn graph(&self) -> &SdGraph {
        &self.graph
    }

    /// Nodes without regulators, or with a positive self-loop as their only regulator.
    pub fn input_nodes(&self) -> &[VariableId] {
        &self.input_nodes
    }

    /// Nodes with a negative self-loop as their only regulator.
    pub fn degenerate_nodes(&self) -> &[VariableId] {
        &self.degenerate_nodes
    }

    /// Blocks in the order of their construction.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Indices into `blocks` in which the blocks are evaluated.
    pub fn evaluation_order(&self) -> &[usize] {
        &self.evaluation_order
    }

    pub fn node(&self, id: VariableId) -> &NodeModel {
        &self.nodes[id.to_index()]
    }

    pub fn nodes(&self) -> &[NodeModel] {
        &self.nodes
    }

    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.network.find_variable(name)
    }

    /// Replace the ensemble of node `name` with a fixed `logic` whose inputs are the
    /// regulators in the given `order`.
    pub fn set_specific_logic(
        &mut self,
        name: &str,
        order: &[&str],
        logic: SpecificLogic,
    ) -> Result<(), NetworkError> {
        let id = self.network.get_variable_id(name)?;
        let order = order
            .iter()
            .map(|it| self.network.get_variable_id(it))
            .collect::<Result<Vec<_>, _>>()?;
        self.nodes[id.to_index()].rebind_specific_logic(&self.network, order, logic)?;
        log::debug!("Node `{}` uses a specific logic.", name);
        Ok(())
    }
}
