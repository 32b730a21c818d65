//! Per-node response models.
//!
//! A `NodeModel` maps the states of its regulators to the probability that the node is `1`.
//! By default, the probability is averaged over the whole nested canalizing ensemble
//! compatible with the regulation signs. A fixed logic supplied by the caller replaces the
//! ensemble with a single deterministic function.

use crate::nested_canalizing::NestedCanalizingCounter;
use crate::{NetworkError, Sign, SignedNetwork, VariableId};
use num_bigint::BigInt;
use num_traits::One;
use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A deterministic Boolean function of the regulator states (in the order of
/// `NodeModel::regulators`). Inhibiting regulators are *not* inverted before the call.
pub type SpecificLogic = Arc<dyn Fn(&[bool]) -> bool + Send + Sync>;

/// Nodes with a fixed (controlled) state. Controls are passed explicitly through the
/// evaluation and never stored in the model.
pub type ControlMap = HashMap<VariableId, bool>;

/// The response function of a node.
#[derive(Clone)]
pub enum NodeLogic {
    /// `profile[k]` is the fraction of the ensemble that outputs `1` when exactly `k`
    /// regulators are in their activating state.
    Ensemble { profile: Vec<f64> },
    /// A single known function.
    Specific(SpecificLogic),
}

impl Debug for NodeLogic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeLogic::Ensemble { profile } => {
                f.debug_struct("Ensemble").field("profile", profile).finish()
            }
            NodeLogic::Specific(_) => write!(f, "Specific(<fn>)"),
        }
    }
}

/// The regulators of a single node together with its response function.
#[derive(Clone, Debug)]
pub struct NodeModel {
    id: VariableId,
    name: String,
    regulators: Vec<VariableId>,
    signs: Vec<Sign>,
    logic: NodeLogic,
    logic_count: BigInt,
}

impl NodeModel {
    /// Create an ensemble model of the given `network` variable. Regulators are ordered
    /// by their `VariableId`.
    pub fn new(
        network: &SignedNetwork,
        id: VariableId,
        counter: &NestedCanalizingCounter,
    ) -> NodeModel {
        let regulators = network.regulators(id);
        let signs = regulators
            .iter()
            .map(|r| network.regulation_sign(*r, id).unwrap_or(Sign::Positive))
            .collect();
        let arity = regulators.len();
        let profile = (0..=arity)
            .map(|k| counter.probability_of_one(arity, k))
            .collect();
        NodeModel {
            id,
            name: network.get_variable_name(id).clone(),
            regulators,
            signs,
            logic: NodeLogic::Ensemble { profile },
            logic_count: counter.total(arity),
        }
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regulators in the order expected by the response function.
    pub fn regulators(&self) -> &[VariableId] {
        &self.regulators
    }

    /// Signs of the regulations, parallel to `regulators`.
    pub fn signs(&self) -> &[Sign] {
        &self.signs
    }

    pub fn logic(&self) -> &NodeLogic {
        &self.logic
    }

    /// The number of logic functions represented by this model (`1` for a fixed logic).
    pub fn logic_count(&self) -> &BigInt {
        &self.logic_count
    }

    pub fn has_specific_logic(&self) -> bool {
        matches!(self.logic, NodeLogic::Specific(_))
    }

    /// Replace the ensemble with a fixed `logic` whose inputs follow `order`.
    ///
    /// The `order` must be a permutation of the current regulators. Regulation signs move
    /// together with their regulators. The logic of a node can be fixed only once.
    pub fn rebind_specific_logic(
        &mut self,
        network: &SignedNetwork,
        order: Vec<VariableId>,
        logic: SpecificLogic,
    ) -> Result<(), NetworkError> {
        if self.has_specific_logic() {
            return Err(NetworkError::LogicAlreadySpecified {
                name: self.name.clone(),
            });
        }

        let expected: HashSet<VariableId> = self.regulators.iter().cloned().collect();
        let given: HashSet<VariableId> = order.iter().cloned().collect();
        if expected != given || order.len() != self.regulators.len() {
            return Err(NetworkError::RegulatorMismatch {
                name: self.name.clone(),
                expected: network.variable_names(&self.regulators),
                given: order
                    .iter()
                    .map(|it| network.get_variable_name(*it).clone())
                    .collect(),
            });
        }

        let sign_of: HashMap<VariableId, Sign> = self
            .regulators
            .iter()
            .cloned()
            .zip(self.signs.iter().cloned())
            .collect();
        self.signs = order.iter().map(|it| sign_of[it]).collect();
        self.regulators = order;
        self.logic = NodeLogic::Specific(logic);
        self.logic_count = BigInt::one();
        Ok(())
    }

    /// Probability that the node outputs `1` for the given (raw) regulator state.
    pub fn response(&self, state: &[bool]) -> f64 {
        match &self.logic {
            NodeLogic::Ensemble { profile } => {
                let active = state
                    .iter()
                    .zip(self.signs.iter())
                    .filter(|(value, sign)| sign.apply(**value))
                    .count();
                profile[active]
            }
            NodeLogic::Specific(logic) => {
                if logic(state) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// The ensemble average value of this node, assuming the regulators are independent
    /// and regulator `i` is `1` with probability `regulator_eavs[i]`.
    ///
    /// The result is the sum over all `2^r` regulator states of the state probability times
    /// the `response` in that state. For the ensemble logic, the response only depends on the
    /// number of regulators in their activating state, so the sum is computed from the
    /// distribution of that number instead. A `control` value makes the node constant.
    pub fn eav(&self, regulator_eavs: &[f64], control: Option<bool>) -> f64 {
        if let Some(value) = control {
            return if value { 1.0 } else { 0.0 };
        }
        debug_assert_eq!(regulator_eavs.len(), self.regulators.len());
        match &self.logic {
            NodeLogic::Ensemble { profile } => {
                let mut active_distribution = vec![0.0; regulator_eavs.len() + 1];
                active_distribution[0] = 1.0;
                for (i, (eav, sign)) in regulator_eavs.iter().zip(&self.signs).enumerate() {
                    let p_active = if sign.is_positive() { *eav } else { 1.0 - *eav };
                    for k in (0..=i).rev() {
                        let mass = active_distribution[k];
                        active_distribution[k + 1] += mass * p_active;
                        active_distribution[k] = mass * (1.0 - p_active);
                    }
                }
                active_distribution
                    .iter()
                    .zip(profile)
                    .map(|(mass, p)| mass * p)
                    .sum()
            }
            NodeLogic::Specific(_) => self.eav_by_enumeration(regulator_eavs),
        }
    }

    /// **(internal)** The full sum over all regulator states.
    fn eav_by_enumeration(&self, regulator_eavs: &[f64]) -> f64 {
        let arity = regulator_eavs.len();
        let mut state = vec![false; arity];
        let mut result = 0.0;
        for bits in 0..(1usize << arity) {
            let mut probability = 1.0;
            for (i, eav) in regulator_eavs.iter().enumerate() {
                state[i] = (bits >> i) & 1 == 1;
                probability *= if state[i] { *eav } else { 1.0 - *eav };
            }
            if probability > 0.0 {
                result += probability * self.response(&state);
            }
        }
        result
    }
}
