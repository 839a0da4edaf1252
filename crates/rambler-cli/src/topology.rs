//! Topology input for the CLI.
//!
//! A topology file lists node ids and undirected edges:
//!
//! ```toml
//! nodes = [8]            # optional: nodes with no edges
//! edges = [[1, 2], [2, 3], [3, 1]]
//! ```
//!
//! JSON files (`.json`) use the same shape. With no file configured the
//! built-in 7-node cycle is used.

use rambler_core::traits::ConfigProvider;
use rambler_core::{Error, Result};
use rambler_graph::Graph;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Node count of the built-in cycle.
pub const FIXTURE_CYCLE_LEN: u64 = 7;

// ============================================================================
// Types
// ============================================================================

/// Node and edge lists describing a graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topology {
    /// Nodes to create up front (edges create their endpoints anyway).
    pub nodes: Vec<u64>,
    /// Undirected edges as id pairs.
    pub edges: Vec<(u64, u64)>,
}

impl Topology {
    /// A cycle over nodes `1..=len`.
    pub fn cycle(len: u64) -> Self {
        Self {
            nodes: (1..=len).collect(),
            edges: (1..=len).map(|i| (i, i % len + 1)).collect(),
        }
    }

    /// The built-in 7-node cycle.
    pub fn fixture() -> Self {
        Self::cycle(FIXTURE_CYCLE_LEN)
    }

    /// Parse TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse(format!("topology TOML: {e}")))
    }

    /// Parse JSON content.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::parse(format!("topology JSON: {e}")))
    }

    /// Load a topology file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Pick the topology: explicit path, then config, then the fixture.
    pub fn resolve<C: ConfigProvider>(explicit: Option<&str>, config: &C) -> Result<Self> {
        let path = explicit.map(PathBuf::from).or_else(|| config.topology_path());

        match path {
            Some(path) => {
                debug!("Loading topology from {}", path.display());
                Self::load(&path)
            }
            None => {
                debug!("Using built-in {FIXTURE_CYCLE_LEN}-node cycle");
                Ok(Self::fixture())
            }
        }
    }

    /// Build the graph. Self-loops fail with `InvalidEdge`.
    pub fn to_graph(&self) -> Result<Graph<u64>> {
        let mut graph = Graph::new();
        for &id in &self.nodes {
            graph.add_node(id);
        }
        for &(a, b) in &self.edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig {
        topology: Option<PathBuf>,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test"
        }

        fn topology_path(&self) -> Option<PathBuf> {
            self.topology.clone()
        }

        fn trial_count(&self) -> usize {
            10
        }
    }

    #[test]
    fn test_fixture_is_seven_cycle() {
        let graph = Topology::fixture().to_graph().unwrap();

        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.edge_count(), 7);
        assert_eq!(graph.adjacency_snapshot()[&1], vec![2, 7]);
    }

    #[test]
    fn test_from_toml_str() {
        let topology = Topology::from_toml_str("nodes = [9]\nedges = [[1, 2], [2, 3]]\n").unwrap();

        assert_eq!(topology.nodes, vec![9]);
        assert_eq!(topology.edges, vec![(1, 2), (2, 3)]);
        assert_eq!(topology.to_graph().unwrap().node_count(), 4);
    }

    #[test]
    fn test_from_json_str() {
        let topology = Topology::from_json_str(r#"{"edges": [[1, 2]]}"#).unwrap();
        assert!(topology.nodes.is_empty());
        assert_eq!(topology.edges, vec![(1, 2)]);
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = Topology::from_toml_str("edges = [[1]]");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_to_graph_rejects_self_loop() {
        let topology = Topology {
            nodes: vec![],
            edges: vec![(1, 2), (2, 2)],
        };
        assert!(matches!(topology.to_graph(), Err(Error::InvalidEdge(_))));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let toml_path = dir.path().join("ring.toml");
        let json_path = dir.path().join("ring.json");
        std::fs::write(&toml_path, "edges = [[1, 2], [2, 3], [3, 1]]").unwrap();
        std::fs::write(&json_path, r#"{"edges": [[1, 2], [2, 3], [3, 1]]}"#).unwrap();

        let from_toml = Topology::load(&toml_path).unwrap();
        let from_json = Topology::load(&json_path).unwrap();
        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Topology::load("/nonexistent/topology.toml");
        assert!(matches!(result, Err(Error::IoWithPath { .. })));
    }

    #[test]
    fn test_resolve_precedence() {
        let dir = tempfile::TempDir::new().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let configured = dir.path().join("configured.toml");
        std::fs::write(&explicit, "edges = [[1, 2]]").unwrap();
        std::fs::write(&configured, "edges = [[5, 6], [6, 7]]").unwrap();

        let config = TestConfig {
            topology: Some(configured),
        };
        let chosen = Topology::resolve(explicit.to_str(), &config).unwrap();
        assert_eq!(chosen.edges, vec![(1, 2)]);

        let chosen = Topology::resolve(None, &config).unwrap();
        assert_eq!(chosen.edges, vec![(5, 6), (6, 7)]);

        let fallback = Topology::resolve(None, &TestConfig { topology: None }).unwrap();
        assert_eq!(fallback, Topology::fixture());
    }
}
