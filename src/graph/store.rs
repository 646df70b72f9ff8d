use std::collections::HashMap;
use std::io::BufRead;

use tracing::{debug, info};

use crate::errors::{ContactGraphError, Result};
use crate::ingest;

/// In-memory directed contact graph stored as adjacency lists.
///
/// A node is known only once it has been used as the source of an edge.
/// Destinations are kept verbatim in insertion order, duplicates included;
/// that order drives traversal order in [`PathSearchEngine`](super::PathSearchEngine).
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    adjacency: HashMap<String, Vec<String>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `destination` to the adjacency list of `source`, creating the
    /// list if `source` is new.
    ///
    /// Node names are stored as given; no case folding or trimming is applied.
    pub fn add_edge(&mut self, source: &str, destination: &str) -> Result<()> {
        if source.is_empty() || destination.is_empty() {
            return Err(ContactGraphError::InvalidArgument {
                message: format!(
                    "edge endpoints must be non-empty (source: {:?}, destination: {:?})",
                    source, destination
                ),
            });
        }
        self.adjacency
            .entry(source.to_string())
            .or_default()
            .push(destination.to_string());
        Ok(())
    }

    /// Removes every occurrence of `destination` from the adjacency list of
    /// `source`. Removing an absent destination is a no-op.
    pub fn remove_edge(&mut self, source: &str, destination: &str) -> Result<()> {
        let targets = self
            .adjacency
            .get_mut(source)
            .ok_or_else(|| ContactGraphError::UnknownNode {
                node: source.to_string(),
            })?;
        targets.retain(|t| t != destination);
        Ok(())
    }

    /// Returns the adjacency list of `node`, or an empty slice if unknown.
    pub fn adjacent_nodes(&self, node: &str) -> &[String] {
        self.adjacency
            .get(node)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if `source` has at least one edge to `destination`.
    pub fn find_edge(&self, source: &str, destination: &str) -> Result<bool> {
        self.adjacency
            .get(source)
            .map(|targets| targets.iter().any(|t| t == destination))
            .ok_or_else(|| ContactGraphError::UnknownNode {
                node: source.to_string(),
            })
    }

    /// Returns `true` if `name` is a known node (a source key).
    pub fn existing_node(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum()
    }

    /// Ingests `source,destination` lines from a reader.
    ///
    /// Every line is validated before any edge is inserted, so a malformed
    /// line aborts the load with the store unchanged. Returns the number of
    /// entries processed.
    pub fn read_data<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }
        self.apply_lines(&lines)
    }

    /// Validates all lines, then inserts their edges in order.
    pub(crate) fn apply_lines(&mut self, lines: &[String]) -> Result<usize> {
        let entries = lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                debug!(line = idx + 1, content = %line, "entry read");
                ingest::parse_entry(line, idx + 1)
            })
            .collect::<Result<Vec<_>>>()?;

        for (source, destination) in &entries {
            self.add_edge(source, destination)?;
        }

        info!(entries = entries.len(), "reached end of input");
        Ok(entries.len())
    }
}
