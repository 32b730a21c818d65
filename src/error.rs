use thiserror::Error;

/// Errors reported while building a network model or computing a prediction.
///
/// The first group are input errors (reported immediately, nothing is retried). The second
/// group signals an internal inconsistency of the decomposition and should never happen
/// for a model constructed through `NetworkModel`. The last group are computation errors of
/// the ensemble itself.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("`{token}` is not a valid regulation sign (expected `+`, `1`, `-` or `-1`).")]
    InvalidSign { token: String },
    #[error("`{line}` is not a valid regulation.")]
    InvalidRegulation { line: String },
    #[error("`{name}` is not a valid variable name.")]
    InvalidName { name: String },
    #[error("Variable `{name}` is declared more than once.")]
    DuplicateVariable { name: String },
    #[error("Invalid edge table: {reason}.")]
    InvalidTable { reason: String },
    #[error("There is more than one regulation between `{regulator}` and `{target}`.")]
    DuplicateRegulation { regulator: String, target: String },
    #[error("Unknown variable `{name}`.")]
    UnknownVariable { name: String },
    #[error("Variable `{name}` is not an input node.")]
    NotAnInputNode { name: String },
    #[error("Cannot enumerate all assignments of {free} free input nodes.")]
    TooManyScenarios { free: usize },
    #[error("Regulators {given:?} of `{name}` do not match the regulators {expected:?}.")]
    RegulatorMismatch {
        name: String,
        expected: Vec<String>,
        given: Vec<String>,
    },
    #[error("The logic of `{name}` has already been specified.")]
    LogicAlreadySpecified { name: String },

    #[error("Blocks {blocks:?} depend on each other or on values that are never computed.")]
    UnresolvedDependencies { blocks: Vec<usize> },
    #[error("The value of `{name}` is not available when its block is evaluated.")]
    MissingValue { name: String },
    #[error("Feedback vertex set {fvs:?} does not break all cycles of {component:?}.")]
    InvalidFeedbackVertexSet {
        component: Vec<String>,
        fvs: Vec<String>,
    },

    #[error("No state of feedback vertex set {fvs:?} is self-consistent.")]
    NoSelfConsistentState { fvs: Vec<String> },
}
