//! Handler functions for graph CLI commands.
//!
//! These functions implement `simulate`, `centrality`, `path`, `stats`, and
//! `validate`. Each prints its human-readable output (or JSON) and returns
//! the computed data so callers and tests can inspect it.

use rambler_core::{Error, Result};
use rambler_graph::{
    CentralityCalculator, CentralityReport, Graph, GraphStats, PathFinder, SimulationHarness,
    SimulationSummary, Strategy, StrategySummary, ValidationResult, compute_stats,
    top_nodes_by_degree, validate_graph,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// Option and report types
// ============================================================================

/// Resolved settings for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    /// Trials per strategy.
    pub trials: usize,
    /// RNG seed; drawn from OS entropy when absent.
    pub seed: Option<u64>,
    /// Random walk step bound.
    pub max_steps: Option<usize>,
    /// Share sampled pairs between strategies.
    pub paired: bool,
    /// Print JSON instead of text.
    pub json: bool,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Trials per strategy.
    pub trials: usize,
    /// Seed actually used, for replaying the run.
    pub seed: u64,
    /// Whether strategies shared sampled pairs.
    pub paired: bool,
    /// Per-strategy results.
    pub summary: SimulationSummary,
    /// Exact mean shortest-path length in visited nodes, when the graph is
    /// connected.
    pub expected_shortest_path: Option<f64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Run the Monte Carlo comparison.
///
/// Independent batches run on separate blocking tasks, each owning its own
/// generator seeded from `seed` and `seed + 1`. Paired runs use one task.
pub async fn handle_simulate(
    graph: Arc<Graph<u64>>,
    options: SimulateOptions,
) -> Result<SimulationReport> {
    if options.trials == 0 {
        return Err(Error::operation("trial count must be positive"));
    }
    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        "Simulating {} trial(s) per strategy on {} node(s), seed {seed}",
        options.trials,
        graph.node_count()
    );

    let summary = if options.paired {
        let graph = Arc::clone(&graph);
        let max_steps = options.max_steps;
        let trials = options.trials;
        join(tokio::task::spawn_blocking(move || -> Result<SimulationSummary> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut harness = SimulationHarness::new(&*graph).with_max_steps(max_steps);
            harness.run_paired(trials, &mut rng)?;
            Ok(harness.summarize())
        }))
        .await?
    } else {
        let walks = spawn_batch(&graph, &options, Strategy::RandomWalk, seed);
        let paths = spawn_batch(&graph, &options, Strategy::ShortestPath, seed.wrapping_add(1));
        let walks = join(walks).await?;
        let paths = join(paths).await?;
        SimulationSummary {
            random_walk: StrategySummary::from_lengths(&walks),
            shortest_path: StrategySummary::from_lengths(&paths),
        }
    };

    let expected_shortest_path = PathFinder::new(&*graph)
        .average_shortest_path_length()
        .ok()
        .map(|hops| hops + 1.0);

    let report = SimulationReport {
        trials: options.trials,
        seed,
        paired: options.paired,
        summary,
        expected_shortest_path,
    };

    if options.json {
        print_json(&report)?;
    } else {
        print_simulation(&report);
    }

    Ok(report)
}

/// Show centrality for one node or all nodes.
pub async fn handle_centrality(
    graph: &Graph<u64>,
    node: Option<u64>,
    json: bool,
) -> Result<Vec<CentralityReport<u64>>> {
    let calc = CentralityCalculator::new(graph);

    let reports = match node {
        Some(id) => vec![CentralityReport {
            id,
            degree: calc.degree_centrality(&id)?,
            closeness: calc.closeness_centrality(&id).ok(),
            betweenness: calc.betweenness_centrality(&id)?,
        }],
        None => calc.report_all()?,
    };

    if json {
        print_json(&reports)?;
        return Ok(reports);
    }

    println!("{:>8}  {:>6}  {:>10}  {:>11}", "node", "degree", "closeness", "betweenness");
    for report in &reports {
        let closeness = report
            .closeness
            .map_or_else(|| "undefined".to_string(), |c| format!("{c:.4}"));
        println!(
            "{:>8}  {:>6}  {:>10}  {:>11}",
            report.id, report.degree, closeness, report.betweenness
        );
    }

    Ok(reports)
}

/// Print one shortest path.
pub async fn handle_path(graph: &Graph<u64>, from: u64, to: u64) -> Result<Vec<u64>> {
    let path = PathFinder::new(graph).shortest_path(&from, &to)?;

    let rendered: Vec<String> = path.iter().map(u64::to_string).collect();
    println!("Path from {from} to {to}: {}", rendered.join(" -> "));
    println!("Length: {} edge(s), {} node(s)", path.len() - 1, path.len());

    Ok(path)
}

/// Show graph statistics.
pub async fn handle_stats(graph: &Graph<u64>, json: bool) -> Result<GraphStats> {
    let stats = compute_stats(graph);

    if json {
        print_json(&stats)?;
        return Ok(stats);
    }

    println!("Graph Statistics");
    println!("================");
    println!("Nodes:          {}", stats.node_count);
    println!("  Orphans:      {}", stats.orphan_count);
    println!("Edges:          {}", stats.edge_count);
    println!("  Unique:       {}", stats.unique_edge_count);
    println!("Components:     {}", stats.component_count);
    println!("Avg degree:     {:.2}", stats.avg_degree);
    println!("Min degree:     {}", stats.min_degree);
    println!("Max degree:     {}", stats.max_degree);

    if let Some(ref hub) = stats.hub {
        println!("Hub:            {hub} (degree: {})", stats.max_degree);
    }

    let top = top_nodes_by_degree(graph, 5);
    if !top.is_empty() {
        println!("\nTop nodes by degree:");
        for (id, degree) in top {
            println!("  {id}: {degree}");
        }
    }

    Ok(stats)
}

/// Validate graph integrity. Fails when any error-level issue is found.
pub async fn handle_validate(graph: &Graph<u64>) -> Result<ValidationResult> {
    let result = validate_graph(graph);

    if result.valid {
        println!("Graph is valid.");
    } else {
        println!("Graph has validation issues:");
    }

    for error in &result.errors {
        println!("  ERROR [{}]: {}", error.code, error.message);
        for item in error.nodes.iter().chain(&error.edges) {
            println!("    - {item}");
        }
    }

    for warning in &result.warnings {
        println!("  WARN  [{}]: {}", warning.code, warning.message);
        for item in warning.nodes.iter().chain(&warning.edges) {
            println!("    - {item}");
        }
    }

    println!(
        "\nSummary: {} error(s), {} warning(s)",
        result.errors.len(),
        result.warnings.len()
    );

    if result.valid {
        Ok(result)
    } else {
        Err(Error::operation(format!(
            "Graph validation failed with {} error(s)",
            result.errors.len()
        )))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Run one strategy's batch on its own blocking task.
fn spawn_batch(
    graph: &Arc<Graph<u64>>,
    options: &SimulateOptions,
    strategy: Strategy,
    seed: u64,
) -> tokio::task::JoinHandle<Result<Vec<usize>>> {
    let graph = Arc::clone(graph);
    let max_steps = options.max_steps;
    let trials = options.trials;

    tokio::task::spawn_blocking(move || -> Result<Vec<usize>> {
        debug!("Starting {strategy} batch with seed {seed}");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut harness = SimulationHarness::new(&*graph).with_max_steps(max_steps);
        harness.run(trials, strategy, &mut rng)?;
        Ok(harness.results(strategy).to_vec())
    })
}

async fn join<T>(handle: tokio::task::JoinHandle<Result<T>>) -> Result<T> {
    handle
        .await
        .map_err(|e| Error::operation(format!("simulation task failed: {e}")))?
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::operation(format!("Failed to serialize output: {e}")))?;
    println!("{json}");
    Ok(())
}

fn print_simulation(report: &SimulationReport) {
    println!(
        "Trials per strategy: {}{}",
        report.trials,
        if report.paired { " (paired)" } else { "" }
    );
    println!("Seed: {}", report.seed);

    for strategy in Strategy::ALL {
        if let Some(summary) = report.summary.get(strategy) {
            println!(
                "Average number of visited nodes for {strategy}: {:.3} (min {}, max {})",
                summary.mean, summary.min, summary.max
            );
        }
    }

    if let Some(expected) = report.expected_shortest_path {
        println!("Exact expected shortest path: {expected:.3}");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;

    fn fixture() -> Graph<u64> {
        Topology::fixture().to_graph().unwrap()
    }

    fn options(trials: usize, seed: u64) -> SimulateOptions {
        SimulateOptions {
            trials,
            seed: Some(seed),
            max_steps: Some(10_000),
            paired: false,
            json: false,
        }
    }

    // ------------------------------------------------------------------------
    // simulate
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_handle_simulate_independent() {
        let report = handle_simulate(Arc::new(fixture()), options(300, 5))
            .await
            .unwrap();

        assert_eq!(report.seed, 5);
        let walk = report.summary.random_walk.unwrap();
        let path = report.summary.shortest_path.unwrap();
        assert_eq!(walk.trials, 300);
        assert_eq!(path.trials, 300);
        assert!(walk.mean >= path.mean);
        assert!((report.expected_shortest_path.unwrap() - 3.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_handle_simulate_paired() {
        let mut opts = options(100, 9);
        opts.paired = true;
        opts.json = true;
        let report = handle_simulate(Arc::new(fixture()), opts).await.unwrap();

        assert!(report.paired);
        assert_eq!(report.summary.random_walk.unwrap().trials, 100);
        assert_eq!(report.summary.shortest_path.unwrap().trials, 100);
    }

    #[tokio::test]
    async fn test_handle_simulate_seeded_reproducible() {
        let graph = Arc::new(fixture());
        let a = handle_simulate(Arc::clone(&graph), options(50, 77))
            .await
            .unwrap();
        let b = handle_simulate(graph, options(50, 77)).await.unwrap();

        assert_eq!(a.summary, b.summary);
    }

    #[tokio::test]
    async fn test_handle_simulate_zero_trials_rejected() {
        for paired in [false, true] {
            let mut opts = options(0, 5);
            opts.paired = paired;
            let result = handle_simulate(Arc::new(fixture()), opts).await;

            match result {
                Err(Error::Operation(msg)) => assert!(msg.contains("must be positive")),
                other => panic!("expected operation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_handle_simulate_disconnected_bounded() {
        let topology = Topology {
            nodes: vec![],
            edges: vec![(1, 2), (3, 4)],
        };
        let mut opts = options(100, 1);
        opts.max_steps = Some(50);

        let result = handle_simulate(Arc::new(topology.to_graph().unwrap()), opts).await;
        assert!(matches!(
            result,
            Err(Error::WalkTooLong { .. }) | Err(Error::NoPath { .. })
        ));
    }

    // ------------------------------------------------------------------------
    // centrality / path
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_handle_centrality_all() {
        let reports = handle_centrality(&fixture(), None, false).await.unwrap();

        assert_eq!(reports.len(), 7);
        assert!(reports.iter().all(|r| r.degree == 2 && r.betweenness == 6));
    }

    #[tokio::test]
    async fn test_handle_centrality_single_node() {
        let reports = handle_centrality(&fixture(), Some(4), true).await.unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, 4);
        assert!((reports[0].closeness.unwrap() - 1.0 / 12.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_handle_centrality_unknown_node() {
        let result = handle_centrality(&fixture(), Some(99), false).await;
        assert!(matches!(result, Err(Error::UnknownNode(_))));
    }

    #[tokio::test]
    async fn test_handle_path() {
        let path = handle_path(&fixture(), 1, 4).await.unwrap();
        assert_eq!(path, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_handle_path_unknown_node() {
        let result = handle_path(&fixture(), 1, 40).await;
        assert!(matches!(result, Err(Error::UnknownNode(_))));
    }

    // ------------------------------------------------------------------------
    // stats / validate
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_handle_stats() {
        let stats = handle_stats(&fixture(), false).await.unwrap();
        assert_eq!(stats.node_count, 7);
        assert_eq!(stats.component_count, 1);
    }

    #[tokio::test]
    async fn test_handle_validate_valid() {
        let result = handle_validate(&fixture()).await.unwrap();
        assert!(result.valid);
    }

    #[tokio::test]
    async fn test_handle_validate_invalid() {
        let mut graph = fixture();
        graph.add_node(100);
        let result = handle_validate(&graph).await;
        assert!(matches!(result, Err(Error::Operation(_))));
    }
}
