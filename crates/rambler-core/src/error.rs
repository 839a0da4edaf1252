//! Error types for Rambler operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Rambler crates. Uses `thiserror` for derive macros.
//!
//! Graph engine failures (unknown nodes, unreachable targets, stuck walks)
//! are local to the call that produced them. None of them poison the graph
//! or any other component, so callers may retry or skip as they see fit.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Rambler operations.
#[derive(Error, Debug)]
pub enum Error {
    // ------------------------------------------------------------------------
    // Graph engine
    // ------------------------------------------------------------------------
    /// An operation referenced a node that is not in the graph.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// No path connects the two nodes.
    #[error("No path from {from} to {to}")]
    NoPath {
        /// Source node.
        from: String,
        /// Target node.
        to: String,
    },

    /// A centrality metric is undefined because some node is unreachable
    /// from the queried node.
    #[error("Graph is disconnected from node {0}")]
    DisconnectedGraph(String),

    /// A random walk reached a node without neighbors before the target.
    #[error("Random walk stuck at node {0} (no neighbors)")]
    DeadEnd(String),

    /// A random walk exceeded its step bound.
    #[error("Random walk from {from} to {to} exceeded {max_steps} steps")]
    WalkTooLong {
        /// Start node.
        from: String,
        /// Target node.
        to: String,
        /// The configured bound.
        max_steps: usize,
    },

    /// The edge cannot be added (self-loop).
    #[error("Invalid edge: {0}")]
    InvalidEdge(String),

    /// The graph has too few nodes for the requested operation.
    #[error("Graph needs at least {required} nodes, found {found}")]
    TooFewNodes {
        /// Minimum node count.
        required: usize,
        /// Actual node count.
        found: usize,
    },

    // ------------------------------------------------------------------------
    // Ambient
    // ------------------------------------------------------------------------
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse error (topology or config content).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic operation failure.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Create an unknown node error.
    pub fn unknown_node(id: impl std::fmt::Display) -> Self {
        Self::UnknownNode(id.to_string())
    }

    /// Create a no-path error.
    pub fn no_path(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        Self::NoPath {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create a disconnected graph error.
    pub fn disconnected(id: impl std::fmt::Display) -> Self {
        Self::DisconnectedGraph(id.to_string())
    }

    /// Create a dead end error.
    pub fn dead_end(id: impl std::fmt::Display) -> Self {
        Self::DeadEnd(id.to_string())
    }

    /// Create a walk-too-long error.
    pub fn walk_too_long(
        from: impl std::fmt::Display,
        to: impl std::fmt::Display,
        max_steps: usize,
    ) -> Self {
        Self::WalkTooLong {
            from: from.to_string(),
            to: to.to_string(),
            max_steps,
        }
    }

    /// Create an invalid edge error.
    pub fn invalid_edge(msg: impl Into<String>) -> Self {
        Self::InvalidEdge(msg.into())
    }

    /// Create an I/O error carrying the offending path.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Whether this error is a recoverable graph engine condition
    /// (as opposed to I/O or configuration trouble).
    pub fn is_engine_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownNode(_)
                | Self::NoPath { .. }
                | Self::DisconnectedGraph(_)
                | Self::DeadEnd(_)
                | Self::WalkTooLong { .. }
                | Self::InvalidEdge(_)
                | Self::TooFewNodes { .. }
        )
    }
}

/// Result type alias using Rambler's Error type.
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Tests
// ============================================================================
