use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::config::SearchConfig;
use crate::errors::{ContactGraphError, Result, ValidationError};
use crate::types::{ContactPath, SearchConditions, SearchType};

use super::reporter::{SearchReporter, TracingReporter};
use super::store::GraphStore;

/// Why a search stopped expanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// Shortest-path mode collapsed the working set onto its destination hits.
    Finalized,
    /// `max_depth` rounds have run.
    DepthExhausted,
    /// A round extended no path.
    NoProgress,
}

/// Visited set shared by every path of one search.
///
/// A node is committed the moment it extends any path, so paths processed
/// later in the same round already see it. The exempt node (the destination
/// of a path search) is never committed.
struct Frontier<'g> {
    graph: &'g GraphStore,
    visited: HashSet<String>,
    exempt: Option<String>,
}

impl<'g> Frontier<'g> {
    fn seeded(graph: &'g GraphStore, source: &str, exempt: Option<&str>) -> Self {
        let mut visited = HashSet::new();
        visited.insert(source.to_string());
        Self {
            graph,
            visited,
            exempt: exempt.map(str::to_string),
        }
    }

    /// Pushes `path + next` onto `out` for every neighbour of the leaf of
    /// `path` that was unvisited before this path was expanded, in adjacency
    /// order. Duplicate edges yield duplicate extensions. Returns how many
    /// were pushed.
    fn extend(&mut self, path: &[String], out: &mut Vec<ContactPath>) -> usize {
        let Some(leaf) = path.last() else {
            return 0;
        };

        let graph = self.graph;
        let fresh: Vec<&String> = graph
            .adjacent_nodes(leaf)
            .iter()
            .filter(|next| !self.visited.contains(*next))
            .collect();

        for next in &fresh {
            self.commit(next);
            out.push(extended(path, next));
        }
        fresh.len()
    }

    /// Like [`extend`](Self::extend), but each neighbour is checked right
    /// before it is committed, so a node reached twice through duplicate
    /// edges yields a single extension.
    fn extend_distinct(&mut self, path: &[String], out: &mut Vec<ContactPath>) -> usize {
        let Some(leaf) = path.last() else {
            return 0;
        };

        let mut pushed = 0;
        for next in self.graph.adjacent_nodes(leaf) {
            if self.visited.contains(next) {
                continue;
            }
            self.commit(next);
            out.push(extended(path, next));
            pushed += 1;
        }
        pushed
    }

    fn commit(&mut self, node: &str) {
        if self.exempt.as_deref() != Some(node) {
            self.visited.insert(node.to_string());
        }
    }

    /// Runs one synchronous round: paths already at `destination` carry over,
    /// the rest are replaced by their extensions. Dead ends are dropped.
    fn round(&mut self, paths: Vec<ContactPath>, destination: &str) -> (Vec<ContactPath>, bool) {
        let mut next = Vec::with_capacity(paths.len());
        let mut progressed = false;
        for path in paths {
            if ends_at(&path, destination) {
                next.push(path);
            } else if self.extend(&path, &mut next) > 0 {
                progressed = true;
            }
        }
        (next, progressed)
    }
}

fn ends_at(path: &[String], node: &str) -> bool {
    path.last().map(String::as_str) == Some(node)
}

fn extended(path: &[String], next: &str) -> ContactPath {
    let mut extended = Vec::with_capacity(path.len() + 1);
    extended.extend_from_slice(path);
    extended.push(next.to_string());
    extended
}

/// Answers reachability queries against a [`GraphStore`].
///
/// All queries are synchronous and read-only; the store must not be mutated
/// while an engine borrows it.
pub struct PathSearchEngine<'a> {
    graph: &'a GraphStore,
    config: SearchConfig,
    reporter: Arc<dyn SearchReporter>,
}

impl<'a> PathSearchEngine<'a> {
    /// Creates an engine with default settings that reports through `tracing`.
    pub fn new(graph: &'a GraphStore) -> Self {
        Self::with_config(graph, SearchConfig::default(), Arc::new(TracingReporter))
    }

    pub fn with_config(
        graph: &'a GraphStore,
        config: SearchConfig,
        reporter: Arc<dyn SearchReporter>,
    ) -> Self {
        Self {
            graph,
            config,
            reporter,
        }
    }

    /// Creates an engine from a store that may not have been provided.
    ///
    /// Returns `InvalidArgument` when `graph` is `None`.
    pub fn try_new(
        graph: Option<&'a GraphStore>,
        config: SearchConfig,
        reporter: Arc<dyn SearchReporter>,
    ) -> Result<Self> {
        let graph = graph.ok_or_else(|| ContactGraphError::InvalidArgument {
            message: "expected graph store to be passed to search".to_string(),
        })?;
        Ok(Self::with_config(graph, config, reporter))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn graph(&self) -> &GraphStore {
        self.graph
    }

    /// Returns every path from `source` to `destination` produced by
    /// level-synchronized expansion with a shared visited set.
    ///
    /// This is not the full set of simple paths: once a node has extended one
    /// path it is unavailable to every other path.
    pub fn get_all_paths(&self, source: &str, destination: &str) -> Vec<ContactPath> {
        self.search(source, destination, SearchType::AllPaths)
    }

    /// Validated path query.
    ///
    /// Invalid requests are reported and yield an empty result. A
    /// `shortestPath` query whose source equals its destination returns the
    /// single path `[source, destination]` without traversing.
    pub fn get_paths(&self, conditions: &SearchConditions) -> Vec<ContactPath> {
        let Some(source) = conditions.source.as_deref() else {
            return self.reject(ValidationError::MissingSource);
        };
        if !self.graph.existing_node(source) {
            return self.reject(ValidationError::UnknownSource(source.to_string()));
        }
        let Some(destination) = conditions.destination.as_deref() else {
            return self.reject(ValidationError::MissingDestination);
        };

        let search_type = conditions.search_type();
        if search_type == SearchType::ShortestPath && source == destination {
            return vec![vec![source.to_string(), destination.to_string()]];
        }

        self.search(source, destination, search_type)
    }

    /// Discovers the network around `node_name`, one path per reachable node,
    /// expanding at most `max_depth` rounds.
    ///
    /// The first path is always `[node_name]`. No two paths share a leaf and
    /// no path holds more than `max_depth + 1` nodes.
    pub fn reveal_contacts(&self, node_name: &str) -> Vec<ContactPath> {
        if node_name.is_empty() {
            return self.reject(ValidationError::MissingNodeName);
        }

        let mut frontier = Frontier::seeded(self.graph, node_name, None);
        let mut paths: Vec<ContactPath> = vec![vec![node_name.to_string()]];
        let mut depth = 0;

        let stop = loop {
            if depth >= self.config.max_depth {
                break Stop::DepthExhausted;
            }

            // Only paths present when the round starts are expanded in it.
            let frontier_len = paths.len();
            let mut appended = Vec::new();
            let mut progressed = false;
            for path in &paths[..frontier_len] {
                if frontier.extend_distinct(path, &mut appended) > 0 {
                    progressed = true;
                }
            }
            paths.append(&mut appended);
            depth += 1;

            if !progressed {
                break Stop::NoProgress;
            }
        };

        debug!(node = node_name, depth, contacts = paths.len(), ?stop, "reveal finished");
        paths
    }

    fn search(&self, source: &str, destination: &str, search_type: SearchType) -> Vec<ContactPath> {
        let mut frontier = Frontier::seeded(self.graph, source, Some(destination));
        let mut paths: Vec<ContactPath> = vec![vec![source.to_string()]];
        let mut rounds = 0usize;

        let stop = loop {
            let (next, progressed) = frontier.round(paths, destination);
            paths = next;
            rounds += 1;

            if search_type == SearchType::ShortestPath {
                let hits = paths.iter().filter(|p| ends_at(p, destination)).count();
                if hits > 0 && hits < paths.len() {
                    paths.retain(|p| ends_at(p, destination));
                    break Stop::Finalized;
                }
            }

            if !progressed {
                break Stop::NoProgress;
            }
        };

        debug!(
            source,
            destination,
            search_type = search_type.as_str(),
            rounds,
            ?stop,
            "search finished"
        );
        self.reporter.paths_found(source, destination, &paths);
        paths
    }

    fn reject(&self, error: ValidationError) -> Vec<ContactPath> {
        self.reporter.validation_failed(&error);
        Vec::new()
    }
}
