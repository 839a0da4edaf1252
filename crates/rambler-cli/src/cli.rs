//! CLI argument parsing and command definitions.
//!
//! Global flags select the configuration file, the topology, and log
//! verbosity; each subcommand runs one engine operation against the
//! loaded graph.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "rambler", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "RAMBLER_CONFIG")]
    pub config: Option<String>,

    /// Path to a topology file (TOML or JSON). Defaults to the 7-node cycle.
    #[arg(short, long)]
    pub topology: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare random walks with shortest paths over repeated trials.
    Simulate {
        /// Trials per strategy (overrides config).
        #[arg(short = 'n', long)]
        trials: Option<usize>,

        /// Seed for the random number generator (overrides config).
        #[arg(short, long)]
        seed: Option<u64>,

        /// Abort a walk after this many steps (overrides config).
        #[arg(long)]
        max_steps: Option<usize>,

        /// Run both strategies on the same sampled pairs.
        #[arg(long)]
        paired: bool,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show degree, closeness, and betweenness centrality.
    Centrality {
        /// Only report this node.
        #[arg(long)]
        node: Option<u64>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Find a shortest path between two nodes.
    Path {
        /// Start node.
        #[arg(long)]
        from: u64,

        /// Target node.
        #[arg(long)]
        to: u64,
    },

    /// Show graph statistics.
    Stats {
        /// Print the statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate graph integrity.
    Validate,

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "simulation.trials").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
