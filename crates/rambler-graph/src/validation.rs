//! Graph validation and integrity checking.
//!
//! Flags topologies that would break or skew a simulation before any trial
//! runs: isolated nodes, duplicate edge records, graphs split into several
//! components, broken neighbor symmetry, and graphs too small to sample a
//! pair from.

use crate::graph::{Graph, NodeKey};
use petgraph::algo::connected_components;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Types
// ============================================================================

/// Result of graph validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the graph is valid (no critical issues).
    pub valid: bool,
    /// Critical issues that should be fixed.
    pub errors: Vec<ValidationIssue>,
    /// Non-critical issues (warnings).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error (marks graph as invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether an issue with `code` was raised at any severity.
    pub fn has_issue(&self, code: &str) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|issue| issue.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A validation issue found in the graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue type/code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Affected node IDs (if applicable).
    pub nodes: Vec<String>,
    /// Affected edge descriptions (if applicable).
    pub edges: Vec<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Attach affected nodes.
    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Attach affected edges.
    pub fn with_edges(mut self, edges: Vec<String>) -> Self {
        self.edges = edges;
        self
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a graph for common issues.
///
/// Checks for:
/// - Too few nodes to sample a pair (error)
/// - Orphan nodes (warning)
/// - Duplicate edge records (warning)
/// - Asymmetric adjacency (error)
/// - Multiple connected components (error)
pub fn validate_graph<N: NodeKey>(graph: &Graph<N>) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_size(graph, &mut result);
    check_orphans(graph, &mut result);
    check_duplicate_edges(graph, &mut result);
    check_symmetry(graph, &mut result);
    check_connectivity(graph, &mut result);

    result
}

/// Quick check if graph has any validation errors.
pub fn is_valid<N: NodeKey>(graph: &Graph<N>) -> bool {
    validate_graph(graph).valid
}

// ============================================================================
// Individual checks
// ============================================================================

/// Trials sample two distinct nodes.
fn check_size<N: NodeKey>(graph: &Graph<N>, result: &mut ValidationResult) {
    if graph.node_count() < 2 {
        result.add_error(ValidationIssue::new(
            "TOO_FEW_NODES",
            format!(
                "graph has {} node(s); at least 2 are needed",
                graph.node_count()
            ),
        ));
    }
}

/// Check for orphan nodes (no neighbors).
fn check_orphans<N: NodeKey>(graph: &Graph<N>, result: &mut ValidationResult) {
    let orphans: Vec<String> = graph
        .iter_nodes()
        .filter(|node| node.neighbors.is_empty())
        .map(|node| node.id.to_string())
        .collect();

    if !orphans.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "ORPHAN_NODES",
                format!("{} node(s) have no connections", orphans.len()),
            )
            .with_nodes(orphans),
        );
    }
}

/// Check for edge records that repeat an earlier pair in either direction.
fn check_duplicate_edges<N: NodeKey>(graph: &Graph<N>, result: &mut ValidationResult) {
    let mut seen: HashSet<(&N, &N)> = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();

    for edge in graph.iter_edges() {
        if !seen.insert(edge.normalized()) {
            duplicates.push(format!("{} -- {}", edge.a, edge.b));
        }
    }

    if !duplicates.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "DUPLICATE_EDGES",
                format!("{} duplicate edge(s) found", duplicates.len()),
            )
            .with_edges(duplicates),
        );
    }
}

/// Every neighbor relation must be mutual and point at a known node.
fn check_symmetry<N: NodeKey>(graph: &Graph<N>, result: &mut ValidationResult) {
    let mut broken: Vec<String> = Vec::new();

    for node in graph.iter_nodes() {
        for neighbor in &node.neighbors {
            let mutual = graph
                .neighbors(neighbor)
                .is_ok_and(|back| back.contains(&node.id));
            if !mutual {
                broken.push(format!("{} -> {}", node.id, neighbor));
            }
        }
    }

    if !broken.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "ASYMMETRIC_ADJACENCY",
                format!("{} one-way neighbor relation(s)", broken.len()),
            )
            .with_edges(broken),
        );
    }
}

/// Walks between components never finish.
fn check_connectivity<N: NodeKey>(graph: &Graph<N>, result: &mut ValidationResult) {
    if graph.is_empty() {
        return;
    }

    let components = connected_components(&graph.to_petgraph());
    if components > 1 {
        result.add_error(ValidationIssue::new(
            "DISCONNECTED",
            format!("graph splits into {components} components"),
        ));
    }
}

// ============================================================================
// Tests
// ============================================================================
