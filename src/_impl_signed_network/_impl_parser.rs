use crate::{NetworkError, Regulation, Sign, SignedNetwork};
use std::collections::BTreeSet;
use std::convert::TryFrom;

/// Methods for building `SignedNetwork`s from edge lists.
impl SignedNetwork {
    /// Create a `SignedNetwork` from a list of `(from, sign, to)` edges.
    ///
    /// Signs can be given either as strings (`+`, `1`, `-`, `-1`) or as integers (`1`, `-1`).
    /// The variables are determined from the edges and are ordered alphabetically.
    ///
    /// Fails if a sign is not recognized or if there are two edges between the same
    /// ordered pair of nodes.
    pub fn from_edges<N, S>(edges: &[(N, S, N)]) -> Result<SignedNetwork, NetworkError>
    where
        N: AsRef<str>,
        S: Copy + TryInto<Sign, Error = NetworkError>,
    {
        let mut checked = Vec::with_capacity(edges.len());
        let mut variables = BTreeSet::new();
        for (from, sign, to) in edges {
            let sign: Sign = (*sign).try_into()?;
            variables.insert(from.as_ref().to_string());
            variables.insert(to.as_ref().to_string());
            checked.push((from.as_ref(), sign, to.as_ref()));
        }

        let mut network = SignedNetwork::new(variables.into_iter().collect())?;
        for (from, sign, to) in checked {
            network.add_regulation(from, sign, to)?;
        }
        Ok(network)
    }

    /// Create a `SignedNetwork` from a tab-separated edge table.
    ///
    /// The first line is a header which must contain the `from`, `sign` and `to` columns
    /// (in any order, possibly together with other columns). Every following non-empty line
    /// is one edge.
    pub fn from_tsv(table: &str) -> Result<SignedNetwork, NetworkError> {
        let mut lines = table.lines().filter(|line| !line.trim().is_empty());
        let header: Vec<&str> = lines
            .next()
            .ok_or_else(|| NetworkError::InvalidTable {
                reason: "missing header".to_string(),
            })?
            .split_whitespace()
            .collect();

        let column = |name: &str| {
            header
                .iter()
                .position(|it| *it == name)
                .ok_or_else(|| NetworkError::InvalidTable {
                    reason: format!("missing `{}` column", name),
                })
        };
        let from_column = column("from")?;
        let sign_column = column("sign")?;
        let to_column = column("to")?;
        let width = from_column.max(sign_column).max(to_column);

        let mut edges = Vec::new();
        for line in lines {
            let cells: Vec<&str> = line.trim().split('\t').map(|it| it.trim()).collect();
            if cells.len() <= width {
                return Err(NetworkError::InvalidTable {
                    reason: format!("line `{}` has too few columns", line.trim()),
                });
            }
            edges.push((cells[from_column], cells[sign_column], cells[to_column]));
        }

        SignedNetwork::from_edges(&edges)
    }
}

/// Build a `SignedNetwork` from regulation strings, one per line (`a -> b` or `a -| b`).
///
/// Empty lines and lines starting with `#` are ignored.
impl TryFrom<&str> for SignedNetwork {
    type Error = NetworkError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut templates = Vec::new();
        let mut variables = BTreeSet::new();
        for line in value.lines().map(|l| l.trim()) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (regulator, sign, target) =
                Regulation::try_from_string(line).ok_or_else(|| {
                    NetworkError::InvalidRegulation {
                        line: line.to_string(),
                    }
                })?;
            variables.insert(regulator.clone());
            variables.insert(target.clone());
            templates.push((regulator, sign, target));
        }

        let mut network = SignedNetwork::new(variables.into_iter().collect())?;
        for (regulator, sign, target) in templates {
            network.add_regulation(&regulator, sign, &target)?;
        }
        Ok(network)
    }
}
