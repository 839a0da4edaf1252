//! Unbiased random walks.
//!
//! At every step the walker moves to a neighbor chosen uniformly at random
//! and stops on reaching the target. The randomness source is supplied by
//! the caller, so a seeded generator replays the same walk.
//!
//! A walk between nodes in different components never arrives. Bound it
//! with [`Walker::with_max_steps`] whenever the graph is not known to be
//! connected.

use crate::graph::{Graph, NodeKey};
use log::trace;
use rambler_core::{Error, Result};
use rand::Rng;
use rand::seq::IteratorRandom;

/// Random walk driver over a borrowed graph.
#[derive(Clone, Copy, Debug)]
pub struct Walker<'g, N: NodeKey> {
    graph: &'g Graph<N>,
    max_steps: Option<usize>,
}

impl<'g, N: NodeKey> Walker<'g, N> {
    /// Create an unbounded walker.
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self {
            graph,
            max_steps: None,
        }
    }

    /// Fail with [`Error::WalkTooLong`] after `max_steps` moves.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Set or clear the step bound.
    pub fn with_step_limit(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The configured step bound.
    pub fn max_steps(&self) -> Option<usize> {
        self.max_steps
    }

    /// Walk from `start` until `target` is reached.
    ///
    /// Returns every visited node in order, repeats included; the first
    /// element is `start` and the last is `target`.
    pub fn random_walk<R>(&self, start: &N, target: &N, rng: &mut R) -> Result<Vec<N>>
    where
        R: Rng + ?Sized,
    {
        if !self.graph.contains_node(target) {
            return Err(Error::unknown_node(target));
        }
        let mut current = self.graph.node(start)?;
        let mut trace = vec![start.clone()];
        let mut steps = 0usize;

        while current.id != *target {
            if self.max_steps.is_some_and(|max| steps >= max) {
                return Err(Error::walk_too_long(start, target, steps));
            }

            // Sorted neighbor order keeps seeded walks reproducible.
            let next = current
                .neighbors
                .iter()
                .choose(rng)
                .ok_or_else(|| Error::dead_end(&current.id))?;

            trace!("Walk {start} -> {target}: step {steps} to {next}");
            current = self.graph.node(next)?;
            trace.push(next.clone());
            steps += 1;
        }

        Ok(trace)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cycle7() -> Graph<u32> {
        let mut graph = Graph::new();
        for i in 1..=7 {
            graph.add_edge(i, i % 7 + 1).unwrap();
        }
        graph
    }

    #[test]
    fn test_walk_same_node() {
        let graph = cycle7();
        let mut rng = StdRng::seed_from_u64(1);
        let trace = Walker::new(&graph).random_walk(&4, &4, &mut rng).unwrap();
        assert_eq!(trace, vec![4]);
    }

    #[test]
    fn test_walk_endpoints_and_adjacency() {
        let graph = cycle7();
        let walker = Walker::new(&graph);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let trace = walker.random_walk(&1, &4, &mut rng).unwrap();

            assert_eq!(trace.first(), Some(&1));
            assert_eq!(trace.last(), Some(&4));
            assert!(trace.len() >= 4);
            for pair in trace.windows(2) {
                assert!(graph.neighbors(&pair[0]).unwrap().contains(&pair[1]));
            }
            // The target ends the walk, so it appears only once.
            assert_eq!(trace.iter().filter(|&&id| id == 4).count(), 1);
        }
    }

    #[test]
    fn test_walk_seeded_is_reproducible() {
        let graph = cycle7();
        let walker = Walker::new(&graph);

        let a = walker
            .random_walk(&2, &6, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = walker
            .random_walk(&2, &6, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_walk_adjacent_on_path_graph() {
        // A two-node graph leaves no choice.
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edge(1, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let trace = Walker::new(&graph).random_walk(&1, &2, &mut rng).unwrap();
        assert_eq!(trace, vec![1, 2]);
    }

    #[test]
    fn test_walk_step_is_uniform_over_neighbors() {
        // Star: hub 0 with leaves 1..=4. Walks from the hub to leaf 1 take
        // their first step to each leaf about equally often.
        let mut graph: Graph<u32> = Graph::new();
        for leaf in 1..=4 {
            graph.add_edge(0, leaf).unwrap();
        }
        let walker = Walker::new(&graph);
        let mut rng = StdRng::seed_from_u64(21);

        let mut first_steps = [0usize; 5];
        for _ in 0..4000 {
            let trace = walker.random_walk(&0, &1, &mut rng).unwrap();
            first_steps[trace[1] as usize] += 1;
        }

        assert_eq!(first_steps[0], 0);
        for count in &first_steps[1..] {
            assert!((800..1200).contains(count), "skewed: {first_steps:?}");
        }
    }

    #[test]
    fn test_walk_unknown_nodes() {
        let graph = cycle7();
        let walker = Walker::new(&graph);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            walker.random_walk(&0, &1, &mut rng),
            Err(Error::UnknownNode(_))
        ));
        assert!(matches!(
            walker.random_walk(&1, &0, &mut rng),
            Err(Error::UnknownNode(_))
        ));
    }

    #[test]
    fn test_walk_dead_end() {
        let mut graph = cycle7();
        graph.add_node(50);
        let mut rng = StdRng::seed_from_u64(0);

        let result = Walker::new(&graph).random_walk(&50, &1, &mut rng);
        assert!(matches!(result, Err(Error::DeadEnd(id)) if id == "50"));
    }

    #[test]
    fn test_walk_too_long_on_disconnected_graph() {
        let mut graph = cycle7();
        graph.add_edge(20, 21).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let result = Walker::new(&graph)
            .with_max_steps(100)
            .random_walk(&1, &20, &mut rng);
        assert!(matches!(
            result,
            Err(Error::WalkTooLong { max_steps: 100, .. })
        ));
    }

    #[test]
    fn test_walk_bound_respected() {
        let graph = cycle7();
        let walker = Walker::new(&graph).with_max_steps(3);
        let mut rng = StdRng::seed_from_u64(11);

        // Any successful walk used at most 3 moves.
        for _ in 0..50 {
            match walker.random_walk(&1, &4, &mut rng) {
                Ok(trace) => assert_eq!(trace.len(), 4),
                Err(e) => assert!(matches!(e, Error::WalkTooLong { .. })),
            }
        }
    }

    #[test]
    fn test_with_step_limit() {
        let graph = cycle7();
        let walker = Walker::new(&graph).with_max_steps(5).with_step_limit(None);
        assert_eq!(walker.max_steps(), None);
    }
}
