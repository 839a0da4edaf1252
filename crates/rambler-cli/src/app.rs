//! RamblerCli application.
//!
//! Owns the loaded configuration, sets up logging, resolves the topology,
//! and dispatches each subcommand to its handler.

use crate::cli::{CliArgs, Command};
use crate::config::RamblerConfig;
use crate::graph_handlers::SimulateOptions;
use crate::topology::Topology;
use crate::{config_handlers, graph_handlers};
use rambler_core::Result;
use rambler_core::traits::ConfigProvider;
use rambler_graph::{Graph, quick_summary};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ============================================================================
// RamblerCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct RamblerCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
}

impl RamblerCli<RamblerConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = RamblerConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }
}

impl<C: ConfigProvider> RamblerCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        let Some(command) = args.command else {
            println!("{} {} (use --help for usage)", self.name, self.version);
            return Ok(());
        };

        match command {
            Command::Version => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Command::Config(config_cmd) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Command::Simulate {
                trials,
                seed,
                max_steps,
                paired,
                json,
            } => {
                let graph = Arc::new(self.load_graph(args.topology.as_deref())?);
                let options = SimulateOptions {
                    trials: trials.unwrap_or_else(|| self.config.trial_count()),
                    seed: seed.or_else(|| self.config.seed()),
                    max_steps: max_steps.or_else(|| self.config.max_walk_steps()),
                    paired: paired || self.config.paired_trials(),
                    json,
                };
                graph_handlers::handle_simulate(graph, options).await?;
                Ok(())
            }
            Command::Centrality { node, json } => {
                let graph = self.load_graph(args.topology.as_deref())?;
                graph_handlers::handle_centrality(&graph, node, json).await?;
                Ok(())
            }
            Command::Path { from, to } => {
                let graph = self.load_graph(args.topology.as_deref())?;
                graph_handlers::handle_path(&graph, from, to).await?;
                Ok(())
            }
            Command::Stats { json } => {
                let graph = self.load_graph(args.topology.as_deref())?;
                graph_handlers::handle_stats(&graph, json).await?;
                Ok(())
            }
            Command::Validate => {
                let graph = self.load_graph(args.topology.as_deref())?;
                graph_handlers::handle_validate(&graph).await?;
                Ok(())
            }
        }
    }

    fn load_graph(&self, explicit: Option<&str>) -> Result<Graph<u64>> {
        let topology = Topology::resolve(explicit, &*self.config)?;
        let graph = topology.to_graph()?;
        debug!("Loaded graph: {}", quick_summary(&graph));
        Ok(graph)
    }
}

// ============================================================================
// Tests
// ============================================================================
