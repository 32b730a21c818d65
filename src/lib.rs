//! Ensemble-average prediction of the number of point attractors in large signed regulatory
//! networks.
//!
//! The update functions of the network are assumed to be unknown, and are replaced by an
//! ensemble of all *nested canalizing* functions compatible with the signs of the
//! regulations. Instead of enumerating the 2^N states of the network, the network is
//! decomposed into [blocks::Block]s (strongly connected components and the acyclic parts
//! between them). Each cyclic block is "unrolled" into an acyclic graph using a feedback
//! vertex set, and ensemble average values (probabilities that a node is `1`) are propagated
//! through the unrolled graph layer by layer.
//!
//! The main entry point is [network_model::NetworkModel]:
//!
//! ```rust
//! use biodivine_ensemble_attractors::network_model::NetworkModel;
//! use biodivine_ensemble_attractors::SignedNetwork;
//! use std::collections::HashMap;
//!
//! let network = SignedNetwork::try_from("a -> b \n b -> a").unwrap();
//! let model = NetworkModel::new(network).unwrap();
//! let count = model
//!     .predict_attractor_count(&HashMap::new(), &HashMap::new())
//!     .unwrap();
//! assert_eq!(count, 2.0);
//! ```

#[macro_use]
extern crate lazy_static;

use regex::Regex;
use std::collections::HashMap;
use std::iter::Map;
use std::ops::Range;

pub mod blocks;
pub mod fvs;
pub mod nested_canalizing;
pub mod network_model;
pub mod node_model;
pub mod signed_directed_graph;

/// **(internal)** The error type shared by the whole crate.
mod error;
/// **(internal)** Utility methods for `Regulation`.
mod _impl_regulation;
/// **(internal)** Utility methods for `Sign`.
mod _impl_sign;
/// **(internal)** Construction, parsing and inspection of `SignedNetwork`s.
mod _impl_signed_network;
/// **(internal)** Utility methods for `VariableId`.
mod _impl_variable_id;

#[cfg(test)]
mod test_utils;

pub use error::NetworkError;

lazy_static! {
    /// A regular expression that matches the identifiers allowed as node names.
    static ref ID_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_.:\-]+$").unwrap();
}

/// A type-safe index of a node inside a `SignedNetwork`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariableId(usize);

/// The sign of a regulation: `Positive` is an activation and `Negative` is an inhibition.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Sign {
    Positive,
    Negative,
}

/// A signed edge `regulator -> target` of a `SignedNetwork`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Regulation {
    regulator: VariableId,
    target: VariableId,
    sign: Sign,
}

/// A signed directed graph of regulations between named nodes.
///
/// There is at most one regulation for every ordered pair of nodes. A `SignedNetwork` can
/// be built from a list of `(from, sign, to)` triples, from a tab-separated edge table, or
/// from a string of regulations, one per line:
///
/// ```rg
///  # Comments and empty lines are ignored.
///  a -> b
///  b -| a
///  input -> input
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignedNetwork {
    variables: Vec<String>,
    regulations: Vec<Regulation>,
    variable_to_index: HashMap<String, VariableId>,
}

/// An iterator over all `VariableId`s of a `SignedNetwork`.
pub type VariableIdIterator = Map<Range<usize>, fn(usize) -> VariableId>;
