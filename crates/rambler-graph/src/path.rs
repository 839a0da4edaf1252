//! Breadth-first shortest paths.
//!
//! The graph is unweighted, so BFS yields minimum hop counts in O(V + E)
//! per source. A single pass records everything the centrality metrics need
//! as well: distances, parent pointers for path reconstruction, and the
//! number of distinct shortest paths reaching each node.
//!
//! Neighbors are expanded in ascending id order and the first parent to
//! discover a node is kept, so the path returned for a pair never changes
//! between runs.

use crate::graph::{Graph, NodeKey};
use log::debug;
use rambler_core::{Error, Result};
use std::collections::{HashMap, VecDeque};

// ============================================================================
// Search tree
// ============================================================================

/// Result of a single-source BFS.
#[derive(Clone, Debug)]
pub struct SearchTree<N: NodeKey> {
    source: N,
    distance: HashMap<N, usize>,
    path_count: HashMap<N, u64>,
    parent: HashMap<N, N>,
    order: Vec<N>,
}

impl<N: NodeKey> SearchTree<N> {
    /// The BFS root.
    pub fn source(&self) -> &N {
        &self.source
    }

    /// Hop distance from the source, or `None` if unreachable.
    pub fn distance(&self, id: &N) -> Option<usize> {
        self.distance.get(id).copied()
    }

    /// Number of distinct shortest paths from the source to `id`
    /// (0 if unreachable, 1 for the source itself).
    pub fn path_count(&self, id: &N) -> u64 {
        self.path_count.get(id).copied().unwrap_or(0)
    }

    /// Reachable nodes in visit order (non-decreasing distance).
    pub fn order(&self) -> &[N] {
        &self.order
    }

    /// Number of reachable nodes, the source included.
    pub fn reached(&self) -> usize {
        self.order.len()
    }

    /// Walk parent pointers back from `target`.
    ///
    /// Returns `None` if `target` was not reached.
    pub fn path_to(&self, target: &N) -> Option<Vec<N>> {
        if !self.distance.contains_key(target) {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while let Some(prev) = self.parent.get(current) {
            path.push(prev.clone());
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

// ============================================================================
// Distance table
// ============================================================================

/// All-pairs hop distances. A missing entry means unreachable.
#[derive(Clone, Debug)]
pub struct DistanceTable<N: NodeKey> {
    rows: HashMap<N, HashMap<N, usize>>,
    node_count: usize,
}

impl<N: NodeKey> DistanceTable<N> {
    /// Distance from `a` to `b`, or `None` if unreachable or unknown.
    pub fn get(&self, a: &N, b: &N) -> Option<usize> {
        self.rows.get(a).and_then(|row| row.get(b)).copied()
    }

    /// Distances from `a` to every node it reaches.
    pub fn row(&self, a: &N) -> Option<&HashMap<N, usize>> {
        self.rows.get(a)
    }

    /// Number of reachable ordered pairs, `(u, u)` included.
    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every node reaches every other node.
    pub fn is_complete(&self) -> bool {
        self.rows.len() == self.node_count
            && self.rows.values().all(|row| row.len() == self.node_count)
    }

    /// Iterate over `(from, to, distance)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &N, usize)> {
        self.rows
            .iter()
            .flat_map(|(a, row)| row.iter().map(move |(b, &d)| (a, b, d)))
    }

    /// Mean distance over reachable ordered pairs of distinct nodes.
    pub fn mean_distance(&self) -> Option<f64> {
        let (sum, count) = self
            .iter()
            .filter(|(a, b, _)| a != b)
            .fold((0usize, 0usize), |(sum, count), (_, _, d)| (sum + d, count + 1));

        if count == 0 {
            None
        } else {
            Some(sum as f64 / count as f64)
        }
    }

    /// Largest finite distance.
    pub fn diameter(&self) -> usize {
        self.iter().map(|(_, _, d)| d).max().unwrap_or(0)
    }
}

// ============================================================================
// PathFinder
// ============================================================================

/// Shortest-path queries over a borrowed graph.
#[derive(Clone, Copy, Debug)]
pub struct PathFinder<'g, N: NodeKey> {
    graph: &'g Graph<N>,
}

impl<'g, N: NodeKey> PathFinder<'g, N> {
    /// Create a path finder for `graph`.
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self { graph }
    }

    /// The graph being searched.
    pub fn graph(&self) -> &'g Graph<N> {
        self.graph
    }

    /// Run BFS from `source`.
    pub fn bfs(&self, source: &N) -> Result<SearchTree<N>> {
        if !self.graph.contains_node(source) {
            return Err(Error::unknown_node(source));
        }

        let mut distance = HashMap::new();
        let mut path_count: HashMap<N, u64> = HashMap::new();
        let mut parent = HashMap::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        distance.insert(source.clone(), 0);
        path_count.insert(source.clone(), 1);
        queue.push_back(source.clone());

        while let Some(current) = queue.pop_front() {
            let d = distance[&current];
            let sigma = path_count[&current];

            for next in self.graph.neighbors(&current)? {
                match distance.get(next) {
                    None => {
                        distance.insert(next.clone(), d + 1);
                        parent.insert(next.clone(), current.clone());
                        path_count.insert(next.clone(), sigma);
                        queue.push_back(next.clone());
                    }
                    Some(&dn) if dn == d + 1 => {
                        if let Some(count) = path_count.get_mut(next) {
                            *count = count.saturating_add(sigma);
                        }
                    }
                    Some(_) => {}
                }
            }

            order.push(current);
        }

        debug!("BFS from {source} reached {} node(s)", order.len());

        Ok(SearchTree {
            source: source.clone(),
            distance,
            path_count,
            parent,
            order,
        })
    }

    /// Minimum number of edges between `start` and `end`.
    pub fn shortest_path_length(&self, start: &N, end: &N) -> Result<usize> {
        self.ensure_node(end)?;
        self.bfs(start)?
            .distance(end)
            .ok_or_else(|| Error::no_path(start, end))
    }

    /// One shortest path from `start` to `end`, both included.
    pub fn shortest_path(&self, start: &N, end: &N) -> Result<Vec<N>> {
        self.ensure_node(end)?;
        self.bfs(start)?
            .path_to(end)
            .ok_or_else(|| Error::no_path(start, end))
    }

    /// Run BFS from every node, keyed by source.
    pub fn search_all(&self) -> HashMap<N, SearchTree<N>> {
        let mut trees = HashMap::with_capacity(self.graph.node_count());

        for id in self.graph.node_ids() {
            // Every id comes from the graph, so BFS cannot fail here.
            if let Ok(tree) = self.bfs(id) {
                trees.insert(id.clone(), tree);
            }
        }

        trees
    }

    /// Distances between every reachable pair, from one BFS per node.
    pub fn all_pairs_shortest_path_length(&self) -> DistanceTable<N> {
        let rows = self
            .search_all()
            .into_iter()
            .map(|(id, tree)| (id, tree.distance))
            .collect();

        DistanceTable {
            rows,
            node_count: self.graph.node_count(),
        }
    }

    /// Exact mean shortest-path length over ordered pairs of distinct nodes.
    ///
    /// Fails with [`Error::DisconnectedGraph`] when some pair is unreachable.
    pub fn average_shortest_path_length(&self) -> Result<f64> {
        let found = self.graph.node_count();
        if found < 2 {
            return Err(Error::TooFewNodes { required: 2, found });
        }

        let table = self.all_pairs_shortest_path_length();
        if let Some(id) = self
            .graph
            .node_ids()
            .find(|id| table.row(id).map_or(0, HashMap::len) < found)
        {
            return Err(Error::disconnected(id));
        }

        table
            .mean_distance()
            .ok_or_else(|| Error::operation("no distinct node pairs"))
    }

    fn ensure_node(&self, id: &N) -> Result<()> {
        if self.graph.contains_node(id) {
            Ok(())
        } else {
            Err(Error::unknown_node(id))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
