use crate::network_model::{
    ConditionEffect, ControlEffect, InputCondition, NetworkModel, Prediction, ScenarioPrediction,
};
use crate::node_model::ControlMap;
use crate::{NetworkError, VariableId};
use std::collections::HashMap;

impl NetworkModel {
    /// Input nodes which are not fixed by the `control` map.
    pub fn free_input_nodes(&self, control: &ControlMap) -> Vec<VariableId> {
        self.input_nodes
            .iter()
            .filter(|it| !control.contains_key(it))
            .cloned()
            .collect()
    }

    /// Predict the number of point attractors for the given partial input `condition`.
    ///
    /// Every input node that is fixed neither by the `condition` nor by the `control` is
    /// enumerated in both states (the first such node is the most significant bit), and the
    /// counts of all resulting scenarios are summed. A control value of an input node takes
    /// precedence over the condition.
    pub fn predict(
        &self,
        condition: &InputCondition,
        control: &ControlMap,
    ) -> Result<Prediction, NetworkError> {
        self.check_condition(condition)?;
        self.check_control(control)?;

        let open: Vec<VariableId> = self
            .free_input_nodes(control)
            .into_iter()
            .filter(|it| !condition.contains_key(it))
            .collect();
        let scenario_count = self.scenario_count(&open)?;
        log::debug!(
            "Predicting {} scenario(s) with {} controlled node(s).",
            scenario_count,
            control.len()
        );

        let mut attractor_count = 0.0;
        let mut scenarios = Vec::new();
        for assignment in 0..scenario_count {
            let mut inputs: InputCondition = condition
                .iter()
                .filter(|(node, _)| !control.contains_key(node))
                .map(|(node, value)| (*node, *value))
                .collect();
            for (i, node) in open.iter().enumerate() {
                let bit = (assignment >> (open.len() - 1 - i)) & 1 == 1;
                inputs.insert(*node, bit);
            }

            let scenario = self.predict_scenario(&inputs, control)?;
            attractor_count += scenario.attractor_count;
            scenarios.push(scenario);
        }

        Ok(Prediction {
            attractor_count,
            scenarios,
        })
    }

    /// The same as `predict`, but only returns the total count.
    pub fn predict_attractor_count(
        &self,
        condition: &InputCondition,
        control: &ControlMap,
    ) -> Result<f64, NetworkError> {
        Ok(self.predict(condition, control)?.attractor_count)
    }

    /// Compare the nominal and the controlled prediction for every assignment of the
    /// input nodes that are fixed neither by `condition` nor by `control`.
    ///
    /// The nominal prediction of each assignment sums over the input nodes fixed by
    /// `control`, so `nominal` and `controlled` totals range over the same scenarios.
    pub fn control_effect(
        &self,
        condition: &InputCondition,
        control: &ControlMap,
    ) -> Result<ControlEffect, NetworkError> {
        self.check_condition(condition)?;
        self.check_control(control)?;
        let nominal_control = ControlMap::new();
        let open: Vec<VariableId> = self
            .free_input_nodes(control)
            .into_iter()
            .filter(|it| !condition.contains_key(it))
            .collect();

        let mut effect = ControlEffect {
            conditions: Vec::new(),
            nominal: 0.0,
            controlled: 0.0,
            total_reduction: 0.0,
        };
        for assignment in 0..self.scenario_count(&open)? {
            let mut inputs: InputCondition = condition
                .iter()
                .filter(|(node, _)| !control.contains_key(node))
                .map(|(node, value)| (*node, *value))
                .collect();
            for (i, node) in open.iter().enumerate() {
                inputs.insert(*node, (assignment >> (open.len() - 1 - i)) & 1 == 1);
            }
            let nominal = self.predict_attractor_count(&inputs, &nominal_control)?;
            let controlled = self.predict_attractor_count(&inputs, control)?;
            effect.nominal += nominal;
            effect.controlled += controlled;
            effect.total_reduction += nominal - controlled;
            effect.conditions.push(ConditionEffect {
                inputs,
                nominal,
                controlled,
                reduction: nominal - controlled,
            });
        }

        Ok(effect)
    }

    /// Evaluate all blocks for one full assignment of the uncontrolled input nodes.
    pub fn predict_scenario(
        &self,
        inputs: &InputCondition,
        control: &ControlMap,
    ) -> Result<ScenarioPrediction, NetworkError> {
        let mut eavs: HashMap<VariableId, f64> = HashMap::new();
        for node in &self.input_nodes {
            let Some(value) = control.get(node).or_else(|| inputs.get(node)) else {
                return Err(NetworkError::MissingValue {
                    name: self.network[*node].clone(),
                });
            };
            eavs.insert(*node, if *value { 1.0 } else { 0.0 });
        }

        for node in &self.degenerate_nodes {
            let Some(value) = control.get(node) else {
                log::debug!("Uncontrolled degenerate node `{}`.", self.network[*node]);
                return Ok(ScenarioPrediction {
                    inputs: inputs.clone(),
                    attractor_count: 0.0,
                    eavs,
                });
            };
            eavs.insert(*node, if *value { 1.0 } else { 0.0 });
        }

        let mut attractor_count = 1.0;
        for index in &self.evaluation_order {
            let result = self.blocks[*index].evaluate(&self.nodes, &eavs, control)?;
            attractor_count *= result.attractor_count;
            eavs.extend(result.eavs);
        }

        Ok(ScenarioPrediction {
            inputs: inputs.clone(),
            attractor_count,
            eavs,
        })
    }

    /// **(internal)** The number of assignments of the `open` input nodes.
    fn scenario_count(&self, open: &[VariableId]) -> Result<usize, NetworkError> {
        u32::try_from(open.len())
            .ok()
            .and_then(|it| 1usize.checked_shl(it))
            .ok_or(NetworkError::TooManyScenarios { free: open.len() })
    }

    /// **(internal)** Only input nodes can appear in an input condition.
    fn check_condition(&self, condition: &InputCondition) -> Result<(), NetworkError> {
        let mut keys: Vec<VariableId> = condition.keys().cloned().collect();
        keys.sort();
        for node in keys {
            self.check_variable(node)?;
            if !self.input_nodes.contains(&node) {
                return Err(NetworkError::NotAnInputNode {
                    name: self.network[node].clone(),
                });
            }
        }
        Ok(())
    }

    /// **(internal)** Controls must refer to variables of this network.
    fn check_control(&self, control: &ControlMap) -> Result<(), NetworkError> {
        control
            .keys()
            .try_for_each(|node| self.check_variable(*node))
    }

    fn check_variable(&self, node: VariableId) -> Result<(), NetworkError> {
        if node.to_index() < self.network.num_vars() {
            Ok(())
        } else {
            Err(NetworkError::UnknownVariable {
                name: node.to_string(),
            })
        }
    }
}
