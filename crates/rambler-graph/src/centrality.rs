//! Degree, closeness, and betweenness centrality.
//!
//! # Definitions
//!
//! ```text
//! degree(v)      = |N(v)|
//! closeness(v)   = 1 / Σ_{u≠v} d(v, u)
//! betweenness(v) = Σ_{s≠v, t≠v, s≠t} σ_st(v)
//! ```
//!
//! σ_st(v) is the number of shortest s–t paths that pass through v. It is
//! non-zero only when d(s, v) + d(v, t) = d(s, t), in which case it equals
//! σ_sv · σ_vt. Both factors fall out of the per-source BFS, so betweenness
//! costs O(V²) on top of the O(V·E) searches rather than enumerating paths.
//!
//! Betweenness here is a raw count. It is not normalized and not a fraction
//! of paths, and ordered pairs are summed, so each unordered pair {s, t}
//! contributes twice.
//!
//! Closeness is undefined when some node cannot be reached or when there
//! are no other nodes; both report [`Error::DisconnectedGraph`].

use crate::graph::{Graph, NodeKey};
use crate::path::{PathFinder, SearchTree};
use log::debug;
use rambler_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Types
// ============================================================================

/// All three metrics for one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CentralityReport<N> {
    /// The node.
    pub id: N,
    /// Neighbor count.
    pub degree: usize,
    /// Closeness, or `None` where undefined.
    pub closeness: Option<f64>,
    /// Raw ordered-pair betweenness count.
    pub betweenness: u64,
}

/// Centrality metrics over a fixed graph snapshot.
///
/// Construction runs one BFS per node; every metric afterwards reads from
/// those search trees.
#[derive(Debug)]
pub struct CentralityCalculator<'g, N: NodeKey> {
    graph: &'g Graph<N>,
    trees: HashMap<N, SearchTree<N>>,
}

// ============================================================================
// Metrics
// ============================================================================

impl<'g, N: NodeKey> CentralityCalculator<'g, N> {
    /// Precompute shortest-path data for `graph`.
    pub fn new(graph: &'g Graph<N>) -> Self {
        let trees = PathFinder::new(graph).search_all();
        debug!("Centrality: searched from {} source(s)", trees.len());
        Self { graph, trees }
    }

    /// Number of neighbors of `id`.
    pub fn degree_centrality(&self, id: &N) -> Result<usize> {
        self.graph.degree(id)
    }

    /// Inverse of the summed distances from `id` to every other node.
    pub fn closeness_centrality(&self, id: &N) -> Result<f64> {
        let tree = self.tree(id)?;

        if tree.reached() < self.graph.node_count() {
            return Err(Error::disconnected(id));
        }

        let total: usize = tree.order().iter().filter_map(|u| tree.distance(u)).sum();
        if total == 0 {
            return Err(Error::disconnected(id));
        }

        Ok(1.0 / total as f64)
    }

    /// Number of shortest paths between other ordered pairs that pass
    /// through `id`.
    pub fn betweenness_centrality(&self, id: &N) -> Result<u64> {
        let through = self.tree(id)?;
        let mut total: u64 = 0;

        for (s, from_s) in &self.trees {
            if s == id {
                continue;
            }
            let Some(d_sv) = from_s.distance(id) else {
                continue;
            };
            let sigma_sv = from_s.path_count(id);

            for t in through.order() {
                if t == id || t == s {
                    continue;
                }
                let (Some(d_vt), Some(d_st)) = (through.distance(t), from_s.distance(t)) else {
                    continue;
                };
                if d_sv + d_vt == d_st {
                    total = total.saturating_add(sigma_sv.saturating_mul(through.path_count(t)));
                }
            }
        }

        Ok(total)
    }

    /// Every metric for every node, in ascending id order.
    pub fn report_all(&self) -> Result<Vec<CentralityReport<N>>> {
        self.graph
            .node_ids()
            .map(|id| {
                Ok(CentralityReport {
                    id: id.clone(),
                    degree: self.degree_centrality(id)?,
                    closeness: self.closeness_centrality(id).ok(),
                    betweenness: self.betweenness_centrality(id)?,
                })
            })
            .collect()
    }

    fn tree(&self, id: &N) -> Result<&SearchTree<N>> {
        self.trees.get(id).ok_or_else(|| Error::unknown_node(id))
    }
}

// ============================================================================
// Tests
// ============================================================================
