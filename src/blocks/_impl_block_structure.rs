use crate::blocks::BlockStructure;
use crate::node_model::{ControlMap, NodeModel};
use crate::{NetworkError, SignedNetwork, VariableId};
use std::collections::{HashMap, HashSet};

impl BlockStructure {
    /// Build the structure of a block which analyzes the given nodes of `network`.
    ///
    /// External regulators are all nodes outside of `analyzed` that regulate some
    /// analyzed node. Only regulations between nodes of the block are recorded.
    pub fn new(network: &SignedNetwork, analyzed: &HashSet<VariableId>) -> BlockStructure {
        let mut analyzed_sorted: Vec<VariableId> = analyzed.iter().cloned().collect();
        analyzed_sorted.sort();

        let mut external = HashSet::new();
        for target in &analyzed_sorted {
            for regulator in network.regulators(*target) {
                if !analyzed.contains(&regulator) {
                    external.insert(regulator);
                }
            }
        }
        let mut external: Vec<VariableId> = external.into_iter().collect();
        external.sort();

        let mut structure = BlockStructure {
            analyzed: analyzed_sorted,
            external,
            activating_regulators: HashMap::new(),
            inhibiting_regulators: HashMap::new(),
            activating_targets: HashMap::new(),
            inhibiting_targets: HashMap::new(),
        };

        for regulation in network.regulations() {
            let (regulator, target) = (regulation.get_regulator(), regulation.get_target());
            if !analyzed.contains(&target) {
                continue;
            }
            let (regulators, targets) = if regulation.get_sign().is_positive() {
                (
                    &mut structure.activating_regulators,
                    &mut structure.activating_targets,
                )
            } else {
                (
                    &mut structure.inhibiting_regulators,
                    &mut structure.inhibiting_targets,
                )
            };
            regulators.entry(target).or_default().push(regulator);
            targets.entry(regulator).or_default().push(target);
        }

        for list in structure
            .activating_regulators
            .values_mut()
            .chain(structure.inhibiting_regulators.values_mut())
            .chain(structure.activating_targets.values_mut())
            .chain(structure.inhibiting_targets.values_mut())
        {
            list.sort();
        }

        structure
    }

    pub fn analyzed(&self) -> &[VariableId] {
        &self.analyzed
    }

    pub fn external(&self) -> &[VariableId] {
        &self.external
    }

    pub fn is_analyzed(&self, variable: VariableId) -> bool {
        self.analyzed.binary_search(&variable).is_ok()
    }

    /// All regulators of `target` (sorted).
    pub fn regulators(&self, target: VariableId) -> Vec<VariableId> {
        let mut result = self.activating_regulators(target).to_vec();
        result.extend_from_slice(self.inhibiting_regulators(target));
        result.sort();
        result
    }

    pub fn activating_regulators(&self, target: VariableId) -> &[VariableId] {
        lookup(&self.activating_regulators, target)
    }

    pub fn inhibiting_regulators(&self, target: VariableId) -> &[VariableId] {
        lookup(&self.inhibiting_regulators, target)
    }

    /// All targets of `regulator` within the analyzed nodes (sorted).
    pub fn targets(&self, regulator: VariableId) -> Vec<VariableId> {
        let mut result = self.activating_targets(regulator).to_vec();
        result.extend_from_slice(self.inhibiting_targets(regulator));
        result.sort();
        result
    }

    pub fn activating_targets(&self, regulator: VariableId) -> &[VariableId] {
        lookup(&self.activating_targets, regulator)
    }

    pub fn inhibiting_targets(&self, regulator: VariableId) -> &[VariableId] {
        lookup(&self.inhibiting_targets, regulator)
    }

    /// Sort the analyzed nodes into layers, starting with the given `sources`.
    ///
    /// Layer zero is `sources` and layer `k` contains every remaining analyzed node whose
    /// regulators all appear in layers `0..k`. Returns `None` if some analyzed node cannot
    /// be placed, i.e. the block is not acyclic once the sources are removed.
    pub fn layers(&self, sources: &[VariableId]) -> Option<Vec<Vec<VariableId>>> {
        let mut placed: HashSet<VariableId> = sources.iter().cloned().collect();
        let mut remaining: Vec<VariableId> = self
            .analyzed
            .iter()
            .filter(|it| !placed.contains(it))
            .cloned()
            .collect();

        let mut first = sources.to_vec();
        first.sort();
        let mut layers = vec![first];
        while !remaining.is_empty() {
            let (layer, rest): (Vec<VariableId>, Vec<VariableId>) =
                remaining.into_iter().partition(|node| {
                    self.regulators(*node)
                        .iter()
                        .all(|regulator| placed.contains(regulator))
                });
            if layer.is_empty() {
                log::trace!("Cannot place {} node(s) into layers.", rest.len());
                return None;
            }
            placed.extend(layer.iter().cloned());
            layers.push(layer);
            remaining = rest;
        }
        Some(layers)
    }

    /// Compute the EAVs of all nodes in `layers[1..]`, updating `values`.
    ///
    /// All nodes of one layer are computed from the values known before that layer, so
    /// a node that appears in the first and the last layer is read with its initial value
    /// and then overwritten.
    pub fn propagate(
        &self,
        nodes: &[NodeModel],
        layers: &[Vec<VariableId>],
        values: &mut HashMap<VariableId, f64>,
        control: &ControlMap,
    ) -> Result<(), NetworkError> {
        let mut regulator_values = Vec::new();
        for layer in layers.iter().skip(1) {
            let mut layer_values = Vec::with_capacity(layer.len());
            for node in layer {
                let model = &nodes[node.to_index()];
                regulator_values.clear();
                for regulator in model.regulators() {
                    let value = values.get(regulator).ok_or_else(|| NetworkError::MissingValue {
                        name: nodes[regulator.to_index()].name().to_string(),
                    })?;
                    regulator_values.push(*value);
                }
                layer_values.push((*node, model.eav(&regulator_values, control.get(node).cloned())));
            }
            values.extend(layer_values);
        }
        Ok(())
    }

    /// Collect the values of the external regulators of this block.
    pub(crate) fn external_values(
        &self,
        nodes: &[NodeModel],
        values: &HashMap<VariableId, f64>,
    ) -> Result<HashMap<VariableId, f64>, NetworkError> {
        self.external
            .iter()
            .map(|regulator| match values.get(regulator) {
                Some(value) => Ok((*regulator, *value)),
                None => Err(NetworkError::MissingValue {
                    name: nodes[regulator.to_index()].name().to_string(),
                }),
            })
            .collect()
    }
}

/// **(internal)** Read an adjacency list, treating missing entries as empty.
fn lookup(map: &HashMap<VariableId, Vec<VariableId>>, key: VariableId) -> &[VariableId] {
    map.get(&key).map(|it| it.as_slice()).unwrap_or(&[])
}
