//! Command-line front end for the Rambler graph engine.
//!
//! # Key Abstractions
//!
//! - [`RamblerCli<C>`](app::RamblerCli): CLI application parameterized over a config provider
//! - [`RamblerConfig`](config::RamblerConfig): file/env/default configuration via `confyg`
//! - [`Topology`](topology::Topology): node and edge lists loaded from TOML or JSON

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod graph_handlers;
pub mod topology;

pub use app::RamblerCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::RamblerConfig;
pub use topology::Topology;
