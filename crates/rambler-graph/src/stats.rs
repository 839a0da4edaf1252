//! Graph statistics and analysis.
//!
//! Provides functions for analysing graph structure: size, degree
//! distribution, connectivity, and top-node rankings.

use crate::graph::{Graph, NodeKey};
use petgraph::algo::connected_components;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Types
// ============================================================================

/// Comprehensive statistics about a graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total number of nodes.
    pub node_count: usize,
    /// Number of edge records, duplicates included.
    pub edge_count: usize,
    /// Number of distinct neighbor pairs.
    pub unique_edge_count: usize,
    /// Nodes without any neighbors.
    pub orphan_count: usize,
    /// Average neighbors per node.
    pub avg_degree: f32,
    /// Largest neighbor count.
    pub max_degree: usize,
    /// Smallest neighbor count.
    pub min_degree: usize,
    /// Node with the largest neighbor count (lowest id on ties).
    pub hub: Option<String>,
    /// Number of connected components.
    pub component_count: usize,
    /// Degree → number of nodes with that degree.
    pub degree_distribution: BTreeMap<usize, usize>,
}

// ============================================================================
// Functions
// ============================================================================

/// Compute comprehensive statistics for a graph.
pub fn compute_stats<N: NodeKey>(graph: &Graph<N>) -> GraphStats {
    let node_count = graph.node_count();

    let mut degree_distribution: BTreeMap<usize, usize> = BTreeMap::new();
    let mut total_degree = 0;
    let mut hub: Option<(&N, usize)> = None;

    for node in graph.iter_nodes() {
        let degree = node.degree();
        total_degree += degree;
        *degree_distribution.entry(degree).or_insert(0) += 1;

        if hub.is_none_or(|(_, best)| degree > best) {
            hub = Some((&node.id, degree));
        }
    }

    let avg_degree = if node_count > 0 {
        total_degree as f32 / node_count as f32
    } else {
        0.0
    };

    GraphStats {
        node_count,
        edge_count: graph.edge_count(),
        unique_edge_count: total_degree / 2,
        orphan_count: degree_distribution.get(&0).copied().unwrap_or(0),
        avg_degree,
        max_degree: degree_distribution.keys().next_back().copied().unwrap_or(0),
        min_degree: degree_distribution.keys().next().copied().unwrap_or(0),
        hub: hub.map(|(id, _)| id.to_string()),
        component_count: connected_components(&graph.to_petgraph()),
        degree_distribution,
    }
}

/// Get a quick summary of graph size.
pub fn quick_summary<N: NodeKey>(graph: &Graph<N>) -> String {
    format!("{} nodes, {} edges", graph.node_count(), graph.edge_count())
}

/// Get the top `limit` nodes by degree, highest first (lowest id on ties).
pub fn top_nodes_by_degree<N: NodeKey>(graph: &Graph<N>, limit: usize) -> Vec<(N, usize)> {
    let mut scores: Vec<(N, usize)> = graph
        .iter_nodes()
        .map(|node| (node.id.clone(), node.degree()))
        .collect();

    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores.truncate(limit);
    scores
}

// ============================================================================
// Tests
// ============================================================================
