//! Undirected graph storage.
//!
//! A [`Graph`] owns its nodes and a log of the edges added to it. Adjacency
//! lives on the nodes themselves as neighbor sets, so the edge log is only
//! a record of construction: adding the same edge twice leaves adjacency
//! unchanged but appends a second [`Edge`].

use log::{debug, warn};
use petgraph::graph::{NodeIndex, UnGraph};
use rambler_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{Debug, Display};
use std::hash::Hash;

// ============================================================================
// Node identifiers
// ============================================================================

/// Bounds required of a node identifier.
///
/// `Ord` gives neighbor sets a stable iteration order, which makes BFS
/// tie-breaking and seeded random walks reproducible.
pub trait NodeKey: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync {}

impl<T> NodeKey for T where T: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync {}

// ============================================================================
// Types
// ============================================================================

/// A node and its neighbor set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<N: NodeKey> {
    /// Unique identifier.
    pub id: N,
    /// Identifiers of adjacent nodes.
    pub neighbors: BTreeSet<N>,
}

impl<N: NodeKey> Node<N> {
    /// Create a node with no neighbors.
    pub fn new(id: N) -> Self {
        Self {
            id,
            neighbors: BTreeSet::new(),
        }
    }

    /// Number of neighbors.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Record of one `add_edge` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<N: NodeKey> {
    /// First endpoint, as passed to `add_edge`.
    pub a: N,
    /// Second endpoint, as passed to `add_edge`.
    pub b: N,
}

impl<N: NodeKey> Edge<N> {
    /// Create an edge record.
    pub fn new(a: N, b: N) -> Self {
        Self { a, b }
    }

    /// The endpoints in ascending order, so `(1, 2)` and `(2, 1)` agree.
    pub fn normalized(&self) -> (&N, &N) {
        if self.a <= self.b {
            (&self.a, &self.b)
        } else {
            (&self.b, &self.a)
        }
    }
}

/// An undirected, unweighted graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: Serialize",
    deserialize = "N: Deserialize<'de>"
))]
pub struct Graph<N: NodeKey> {
    nodes: BTreeMap<N, Node<N>>,
    edges: Vec<Edge<N>>,
}

impl<N: NodeKey> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<N: NodeKey> Graph<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Insert a node with no neighbors. Existing nodes are left untouched.
    pub fn add_node(&mut self, id: N) {
        self.nodes
            .entry(id.clone())
            .or_insert_with(|| Node::new(id));
    }

    /// Connect two nodes, creating either if absent.
    ///
    /// Self-loops are rejected with [`Error::InvalidEdge`]: a node listed as
    /// its own neighbor would let a random walk "move" without going
    /// anywhere and would inflate its degree.
    pub fn add_edge(&mut self, a: N, b: N) -> Result<()> {
        if a == b {
            return Err(Error::invalid_edge(format!("self-loop on node {a}")));
        }

        self.add_node(a.clone());
        self.add_node(b.clone());

        let fresh = self.link(&a, &b);
        self.link(&b, &a);
        if !fresh {
            warn!("Duplicate edge {a} -- {b} recorded; adjacency unchanged");
        }

        debug!("Added edge {a} -- {b}");
        self.edges.push(Edge::new(a, b));
        Ok(())
    }

    fn link(&mut self, from: &N, to: &N) -> bool {
        match self.nodes.get_mut(from) {
            Some(node) => node.neighbors.insert(to.clone()),
            None => false,
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

impl<N: NodeKey> Graph<N> {
    /// The neighbor set of `id`.
    pub fn neighbors(&self, id: &N) -> Result<&BTreeSet<N>> {
        self.node(id).map(|node| &node.neighbors)
    }

    /// Every node mapped to its neighbors, in ascending id order.
    pub fn adjacency_snapshot(&self) -> BTreeMap<N, Vec<N>> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.neighbors.iter().cloned().collect()))
            .collect()
    }

    /// Look up a node.
    pub fn node(&self, id: &N) -> Result<&Node<N>> {
        self.nodes.get(id).ok_or_else(|| Error::unknown_node(id))
    }

    /// Whether `id` is in the graph.
    pub fn contains_node(&self, id: &N) -> bool {
        self.nodes.contains_key(id)
    }

    /// Neighbor count of `id`.
    pub fn degree(&self, id: &N) -> Result<usize> {
        self.node(id).map(Node::degree)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edge records, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = &N> {
        self.nodes.keys()
    }

    /// Nodes in ascending id order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node<N>> {
        self.nodes.values()
    }

    /// Edge records in creation order.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge<N>> {
        self.edges.iter()
    }

    /// Build a petgraph view with one edge per neighbor pair.
    ///
    /// Node weights are the ids; duplicate edge records collapse.
    pub fn to_petgraph(&self) -> UnGraph<N, ()> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut indices: HashMap<&N, NodeIndex> = HashMap::with_capacity(self.nodes.len());

        for id in self.nodes.keys() {
            indices.insert(id, graph.add_node(id.clone()));
        }

        for (id, node) in &self.nodes {
            for neighbor in node.neighbors.iter().filter(|n| *n > id) {
                if let (Some(&a), Some(&b)) = (indices.get(id), indices.get(neighbor)) {
                    graph.add_edge(a, b, ());
                }
            }
        }

        graph
    }
}

// ============================================================================
// Tests
// ============================================================================
