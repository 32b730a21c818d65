use crate::VariableId;
use std::fmt::{Display, Error, Formatter};

impl VariableId {
    /// Convert a raw index into a `VariableId`.
    ///
    /// There is no check that the index is valid for any particular network.
    pub fn from_index(index: usize) -> VariableId {
        VariableId(index)
    }

    /// The raw index of this variable.
    pub fn to_index(self) -> usize {
        self.0
    }
}

impl From<usize> for VariableId {
    fn from(val: usize) -> Self {
        VariableId(val)
    }
}

impl From<VariableId> for usize {
    fn from(value: VariableId) -> Self {
        value.0
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "Node({})", self.0)
    }
}
