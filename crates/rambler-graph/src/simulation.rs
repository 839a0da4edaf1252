//! Monte Carlo comparison of random walks and shortest paths.
//!
//! A [`SimulationHarness`] samples pairs of distinct nodes, measures how
//! many nodes each [`Strategy`] visits to get from one to the other, and
//! keeps every measurement until [`SimulationHarness::summarize`] is
//! called. Lengths count visited nodes, not hops: a walk between adjacent
//! nodes that goes straight there has length 2.
//!
//! # Failure policy
//!
//! The first trial that fails aborts the batch and its error is returned.
//! Measurements recorded before the failure are kept.

use crate::graph::{Graph, NodeKey};
use crate::path::PathFinder;
use crate::walk::Walker;
use log::{debug, info};
use rambler_core::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Types
// ============================================================================

/// How to travel between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Uniform random walk until the target is hit.
    RandomWalk,
    /// A BFS shortest path.
    ShortestPath,
}

impl Strategy {
    /// Both strategies, in reporting order.
    pub const ALL: [Strategy; 2] = [Strategy::RandomWalk, Strategy::ShortestPath];

    /// Stable name for display and serialization.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomWalk => "random_walk",
            Self::ShortestPath => "shortest_path",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate of one strategy's measurements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    /// Number of recorded trials.
    pub trials: usize,
    /// Arithmetic mean of the visited-node counts.
    pub mean: f64,
    /// Shortest recorded length.
    pub min: usize,
    /// Longest recorded length.
    pub max: usize,
}

impl StrategySummary {
    /// Summarize a set of lengths. `None` when empty.
    pub fn from_lengths(lengths: &[usize]) -> Option<Self> {
        let min = *lengths.iter().min()?;
        let max = *lengths.iter().max()?;
        let total: usize = lengths.iter().sum();

        Some(Self {
            trials: lengths.len(),
            mean: total as f64 / lengths.len() as f64,
            min,
            max,
        })
    }
}

/// Per-strategy summaries. A strategy with no trials is `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Random walk results.
    pub random_walk: Option<StrategySummary>,
    /// Shortest path results.
    pub shortest_path: Option<StrategySummary>,
}

impl SimulationSummary {
    /// Look up one strategy's summary.
    pub fn get(&self, strategy: Strategy) -> Option<&StrategySummary> {
        match strategy {
            Strategy::RandomWalk => self.random_walk.as_ref(),
            Strategy::ShortestPath => self.shortest_path.as_ref(),
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Runs trial batches against a shared graph and accumulates lengths.
#[derive(Debug)]
pub struct SimulationHarness<'g, N: NodeKey> {
    finder: PathFinder<'g, N>,
    walker: Walker<'g, N>,
    nodes: Vec<&'g N>,
    results: HashMap<Strategy, Vec<usize>>,
}

impl<'g, N: NodeKey> SimulationHarness<'g, N> {
    /// Create a harness with an unbounded walker.
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self {
            finder: PathFinder::new(graph),
            walker: Walker::new(graph),
            nodes: graph.node_ids().collect(),
            results: HashMap::new(),
        }
    }

    /// Bound every random walk to `max_steps` moves (`None` for unbounded).
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.walker = self.walker.with_step_limit(max_steps);
        self
    }

    /// Run `trial_count` trials of `strategy`, each on a fresh random pair.
    pub fn run<R>(&mut self, trial_count: usize, strategy: Strategy, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        for trial in 0..trial_count {
            let (start, target) = self.sample_pair(rng)?;
            let length = self.measure(strategy, start, target, rng)?;
            debug!("Trial {trial} {strategy} {start} -> {target}: {length} node(s)");
            self.results.entry(strategy).or_default().push(length);
        }

        info!(
            "Completed {trial_count} {strategy} trial(s) ({} recorded)",
            self.results(strategy).len()
        );
        Ok(())
    }

    /// Run `trial_count` trials where both strategies share each pair.
    ///
    /// Pairing removes the pair-sampling noise from the comparison.
    pub fn run_paired<R>(&mut self, trial_count: usize, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        for _ in 0..trial_count {
            let (start, target) = self.sample_pair(rng)?;
            let walked = self.measure(Strategy::RandomWalk, start, target, rng)?;
            let shortest = self.measure(Strategy::ShortestPath, start, target, rng)?;
            self.results
                .entry(Strategy::RandomWalk)
                .or_default()
                .push(walked);
            self.results
                .entry(Strategy::ShortestPath)
                .or_default()
                .push(shortest);
        }

        info!("Completed {trial_count} paired trial(s)");
        Ok(())
    }

    /// Recorded lengths for `strategy`, in trial order.
    pub fn results(&self, strategy: Strategy) -> &[usize] {
        self.results
            .get(&strategy)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mean, min, and max per strategy.
    pub fn summarize(&self) -> SimulationSummary {
        SimulationSummary {
            random_walk: StrategySummary::from_lengths(self.results(Strategy::RandomWalk)),
            shortest_path: StrategySummary::from_lengths(self.results(Strategy::ShortestPath)),
        }
    }

    /// Drop every recorded measurement.
    pub fn reset(&mut self) {
        self.results.clear();
    }

    fn measure<R>(&self, strategy: Strategy, start: &N, target: &N, rng: &mut R) -> Result<usize>
    where
        R: Rng + ?Sized,
    {
        let visited = match strategy {
            Strategy::RandomWalk => self.walker.random_walk(start, target, rng)?,
            Strategy::ShortestPath => self.finder.shortest_path(start, target)?,
        };
        Ok(visited.len())
    }

    fn sample_pair<R>(&self, rng: &mut R) -> Result<(&'g N, &'g N)>
    where
        R: Rng + ?Sized,
    {
        let found = self.nodes.len();
        if found < 2 {
            return Err(Error::TooFewNodes { required: 2, found });
        }

        let start = rng.random_range(0..found);
        let mut target = rng.random_range(0..found);
        while target == start {
            target = rng.random_range(0..found);
        }

        Ok((self.nodes[start], self.nodes[target]))
    }
}

// ============================================================================
// One-shot evaluation
// ============================================================================

/// Mean visited-node counts `(random_walk, shortest_path)` over
/// `trial_count` independent trials of each strategy.
///
/// The graph must be connected: walks are unbounded, and on a connected
/// graph they reach their target with probability one.
pub fn evaluate<N, R>(graph: &Graph<N>, trial_count: usize, rng: &mut R) -> Result<(f64, f64)>
where
    N: NodeKey,
    R: Rng + ?Sized,
{
    if trial_count == 0 {
        return Err(Error::operation("trial count must be positive"));
    }
    ensure_connected(graph)?;

    let mut harness = SimulationHarness::new(graph);
    harness.run(trial_count, Strategy::RandomWalk, rng)?;
    harness.run(trial_count, Strategy::ShortestPath, rng)?;

    let summary = harness.summarize();
    match (summary.random_walk, summary.shortest_path) {
        (Some(walk), Some(path)) => Ok((walk.mean, path.mean)),
        _ => Err(Error::operation("simulation recorded no trials")),
    }
}

/// Fail with [`Error::DisconnectedGraph`] unless one BFS reaches every node.
pub fn ensure_connected<N: NodeKey>(graph: &Graph<N>) -> Result<()> {
    let Some(first) = graph.node_ids().next() else {
        return Err(Error::TooFewNodes {
            required: 2,
            found: 0,
        });
    };

    let tree = PathFinder::new(graph).bfs(first)?;
    if let Some(missing) = graph.node_ids().find(|id| tree.distance(id).is_none()) {
        return Err(Error::disconnected(missing));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
