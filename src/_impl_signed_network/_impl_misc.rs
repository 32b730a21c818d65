use crate::{NetworkError, Regulation, Sign, SignedNetwork, VariableId, VariableIdIterator, ID_REGEX};
use std::collections::HashMap;
use std::ops::Index;

/// Methods for safely constructing new instances of `SignedNetwork`s.
impl SignedNetwork {
    /// Create a new `SignedNetwork` with variables using the given names and no regulations.
    ///
    /// The ordering of the variables is preserved.
    pub fn new(variables: Vec<String>) -> Result<SignedNetwork, NetworkError> {
        let mut variable_to_index = HashMap::new();
        for (i, name) in variables.iter().enumerate() {
            if !SignedNetwork::is_valid_name(name) {
                return Err(NetworkError::InvalidName { name: name.clone() });
            }
            if variable_to_index.insert(name.clone(), VariableId(i)).is_some() {
                return Err(NetworkError::DuplicateVariable { name: name.clone() });
            }
        }
        Ok(SignedNetwork {
            variables,
            regulations: Vec::new(),
            variable_to_index,
        })
    }

    /// Add a new `Regulation` to this `SignedNetwork`.
    ///
    /// Returns `Err` if `regulator` or `target` are not valid network variables or when
    /// a regulation between the two variables already exists.
    pub fn add_regulation(
        &mut self,
        regulator: &str,
        sign: Sign,
        target: &str,
    ) -> Result<(), NetworkError> {
        let regulator = self.get_variable_id(regulator)?;
        let target = self.get_variable_id(target)?;
        self.assert_no_regulation(regulator, target)?;
        self.regulations.push(Regulation {
            regulator,
            target,
            sign,
        });
        Ok(())
    }

    /// Find a `VariableId` for the given name, or return an `UnknownVariable` error.
    pub fn get_variable_id(&self, name: &str) -> Result<VariableId, NetworkError> {
        self.find_variable(name)
            .ok_or_else(|| NetworkError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// **(internal)** Utility method to ensure there is no regulation between the two variables yet.
    fn assert_no_regulation(
        &self,
        regulator: VariableId,
        target: VariableId,
    ) -> Result<(), NetworkError> {
        if self.find_regulation(regulator, target).is_none() {
            Ok(())
        } else {
            Err(NetworkError::DuplicateRegulation {
                regulator: self.get_variable_name(regulator).clone(),
                target: self.get_variable_name(target).clone(),
            })
        }
    }

    /// A static check that allows to verify validity of a variable name.
    pub fn is_valid_name(name: &str) -> bool {
        ID_REGEX.is_match(name)
    }
}

/// Some basic utility methods for inspecting the `SignedNetwork`.
impl SignedNetwork {
    /// The number of variables in this `SignedNetwork`.
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Find a `VariableId` for the given name, or `None` if the variable does not exist.
    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.variable_to_index.get(name).cloned()
    }

    /// Return the name of the variable with the given `VariableId`.
    pub fn get_variable_name(&self, id: VariableId) -> &String {
        &self.variables[id.0]
    }

    /// Convert a collection of variables into a sorted list of their names.
    ///
    /// Mostly useful for error messages and logging.
    pub fn variable_names<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a VariableId>,
    {
        let mut names: Vec<String> = ids
            .into_iter()
            .map(|id| self.get_variable_name(*id).clone())
            .collect();
        names.sort();
        names
    }

    /// Find a `Regulation` between two variables if it exists, `None` otherwise.
    pub fn find_regulation(
        &self,
        regulator: VariableId,
        target: VariableId,
    ) -> Option<&Regulation> {
        self.regulations
            .iter()
            .find(|r| r.regulator == regulator && r.target == target)
    }

    /// The sign of the regulation between two variables, if it exists.
    pub fn regulation_sign(&self, regulator: VariableId, target: VariableId) -> Option<Sign> {
        self.find_regulation(regulator, target).map(|r| r.sign)
    }

    /// Return a sorted list of variables that regulate the given `target` variable.
    pub fn regulators(&self, target: VariableId) -> Vec<VariableId> {
        let mut regulators: Vec<VariableId> = self
            .regulations
            .iter()
            .filter(|r| r.target == target)
            .map(|r| r.regulator)
            .collect();
        regulators.sort();
        regulators
    }

    /// Return a sorted list of variables that are regulated by the given `regulator` variable.
    pub fn targets(&self, regulator: VariableId) -> Vec<VariableId> {
        let mut targets: Vec<VariableId> = self
            .regulations
            .iter()
            .filter(|r| r.regulator == regulator)
            .map(|r| r.target)
            .collect();
        targets.sort();
        targets
    }

    /// The sign of the self-loop of the given variable, if there is one.
    pub fn self_loop(&self, variable: VariableId) -> Option<Sign> {
        self.regulation_sign(variable, variable)
    }

    /// Input nodes are free variables of the network: they either have no regulators,
    /// or their only regulator is a positive self-loop.
    pub fn input_nodes(&self) -> Vec<VariableId> {
        self.variables()
            .filter(|var| {
                let regulators = self.regulators(*var);
                regulators.is_empty()
                    || (regulators == vec![*var] && self.self_loop(*var) == Some(Sign::Positive))
            })
            .collect()
    }

    /// Degenerate nodes have a negative self-loop as their only regulator. Such node can
    /// never reach a fixed point unless it is controlled.
    pub fn degenerate_nodes(&self) -> Vec<VariableId> {
        self.variables()
            .filter(|var| {
                self.regulators(*var) == vec![*var]
                    && self.self_loop(*var) == Some(Sign::Negative)
            })
            .collect()
    }

    /// Return an iterator over all variable ids of this network.
    pub fn variables(&self) -> VariableIdIterator {
        (0..self.variables.len()).map(VariableId)
    }

    /// Return an iterator over all regulations of this network.
    pub fn regulations(&self) -> std::slice::Iter<'_, Regulation> {
        self.regulations.iter()
    }
}

/// Allow indexing `SignedNetwork` using `VariableId` objects.
impl Index<VariableId> for SignedNetwork {
    type Output = String;

    fn index(&self, index: VariableId) -> &Self::Output {
        self.get_variable_name(index)
    }
}
