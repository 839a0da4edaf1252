//! Configuration for the Rambler CLI.
//!
//! Provides the [`RamblerConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `RAMBLER_CONFIG` environment variable
//! 3. XDG default: `~/.config/rambler/config.toml`
//! 4. Built-in defaults
//!
//! Environment overrides (`RAMBLER_*`) cover the top level and the
//! `topology` section. confyg hands env values over as strings, so the
//! numeric `simulation` settings are read from the file or from flags.

use confyg::{Confygery, env};
use rambler_core::traits::ConfigProvider;
use rambler_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Walk bound applied unless configured otherwise.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Trials per strategy unless configured otherwise.
pub const DEFAULT_TRIALS: usize = 1000;

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "RAMBLER";

/// Sections the environment overlay reads besides the top level.
const ENV_SECTIONS: &[&str] = &["topology"];

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Rambler CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RamblerConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Topology source.
    pub topology: TopologyConfig,

    /// Monte Carlo settings.
    pub simulation: SimulationConfig,
}

/// Where the graph comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Path to a TOML or JSON topology file.
    pub path: Option<String>,
}

/// Monte Carlo settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Trials per strategy.
    pub trials: usize,

    /// RNG seed; drawn from OS entropy when absent.
    pub seed: Option<u64>,

    /// Random walk step bound.
    pub max_steps: Option<usize>,

    /// Share sampled pairs between strategies.
    pub paired: bool,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for RamblerConfig {
    fn default() -> Self {
        Self {
            project_name: "rambler".to_string(),
            topology: TopologyConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            max_steps: Some(DEFAULT_MAX_STEPS),
            paired: false,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl RamblerConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        for section in ENV_SECTIONS {
            env_opts.add_section(*section);
        }
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("RAMBLER_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("rambler").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into the `RAMBLER_*` variables that [`load`]
    /// reads back: top-level keys and the `ENV_SECTIONS` tables.
    ///
    /// `[simulation]` is file-only and is left out.
    ///
    /// [`load`]: Self::load
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let Some(table) = value.as_table() else {
            return Err(Error::config("config did not serialize to a table"));
        };

        let mut vars = Vec::new();
        for (key, val) in table {
            if val.is_table() && !ENV_SECTIONS.contains(&key.as_str()) {
                continue;
            }
            let env_key = format!("{ENV_PREFIX}_{}", key.to_uppercase());
            flatten_toml_value(val, &env_key, &mut vars);
        }
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for RamblerConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn topology_path(&self) -> Option<PathBuf> {
        self.topology.path.as_ref().map(PathBuf::from)
    }

    fn trial_count(&self) -> usize {
        self.simulation.trials
    }

    fn seed(&self) -> Option<u64> {
        self.simulation.seed
    }

    fn max_walk_steps(&self) -> Option<usize> {
        self.simulation.max_steps
    }

    fn paired_trials(&self) -> bool {
        self.simulation.paired
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serializes tests that touch `RAMBLER_*` variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard for env var manipulation in tests.
    struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    #[allow(unsafe_code)]
    impl EnvGuard {
        fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: tests touching a given variable restore it on drop.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: see `new`.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    #[allow(unsafe_code)]
    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: see `new`.
            unsafe {
                match self.prev {
                    Some(ref val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Default tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_rambler_config_default() {
        let config = RamblerConfig::default();
        assert_eq!(config.project_name, "rambler");
        assert!(config.topology.path.is_none());
        assert_eq!(config.simulation.trials, 1000);
        assert!(config.simulation.seed.is_none());
        assert_eq!(config.simulation.max_steps, Some(DEFAULT_MAX_STEPS));
        assert!(!config.simulation.paired);
    }

    // ------------------------------------------------------------------------
    // Serialization tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_rambler_config_from_toml() {
        let toml_str = r#"
            project_name = "ring-study"

            [topology]
            path = "/data/ring.toml"

            [simulation]
            trials = 250
            seed = 42
            max_steps = 500
            paired = true
        "#;

        let config: RamblerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "ring-study");
        assert_eq!(config.topology.path.as_deref(), Some("/data/ring.toml"));
        assert_eq!(config.simulation.trials, 250);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.max_steps, Some(500));
        assert!(config.simulation.paired);
    }

    #[test]
    fn test_rambler_config_partial_toml_keeps_defaults() {
        let config: RamblerConfig = toml::from_str("[simulation]\nseed = 7\n").unwrap();
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.trials, DEFAULT_TRIALS);
        assert_eq!(config.project_name, "rambler");
    }

    #[test]
    fn test_rambler_config_to_toml() {
        let config = RamblerConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"rambler\""));
        assert!(toml_str.contains("[simulation]"));
        assert!(toml_str.contains("trials = 1000"));

        let parsed: RamblerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.simulation.trials, config.simulation.trials);
        assert_eq!(parsed.simulation.max_steps, config.simulation.max_steps);
    }

    // ------------------------------------------------------------------------
    // Loading tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_rambler_config_load_from_file() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [simulation]
                trials = 64
            "#,
        )
        .unwrap();

        let config = RamblerConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.simulation.trials, 64);
    }

    #[test]
    fn test_rambler_config_load_defaults() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let config = RamblerConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "rambler");
        assert_eq!(config.simulation.trials, DEFAULT_TRIALS);
    }

    #[test]
    fn test_rambler_config_load_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [topology]
                path = "/from/file.toml"
            "#,
        )
        .unwrap();

        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = EnvGuard::new("RAMBLER_TOPOLOGY_PATH", "/from/env.toml");
        let config = RamblerConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.topology.path.as_deref(), Some("/from/env.toml"));
    }

    // ------------------------------------------------------------------------
    // resolve_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = RamblerConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = EnvGuard::new("RAMBLER_CONFIG", "/env/config.toml");
        let path = RamblerConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = EnvGuard::remove("RAMBLER_CONFIG");
        if let Some(p) = RamblerConfig::resolve_config_path(None) {
            assert!(p.to_string_lossy().contains("rambler"));
            assert!(p.to_string_lossy().ends_with("config.toml"));
        }
    }

    // ------------------------------------------------------------------------
    // ConfigProvider tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_provider_values() {
        let config = RamblerConfig {
            topology: TopologyConfig {
                path: Some("/data/ring.json".into()),
            },
            simulation: SimulationConfig {
                trials: 12,
                seed: Some(9),
                max_steps: None,
                paired: true,
            },
            ..Default::default()
        };

        assert_eq!(config.project_name(), "rambler");
        assert_eq!(config.topology_path(), Some(PathBuf::from("/data/ring.json")));
        assert_eq!(config.trial_count(), 12);
        assert_eq!(config.seed(), Some(9));
        assert_eq!(config.max_walk_steps(), None);
        assert!(config.paired_trials());
    }

    // ------------------------------------------------------------------------
    // to_env_vars tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_rambler_config_to_env_vars() {
        let mut config = RamblerConfig::default();
        config.topology.path = Some("/data/ring.toml".into());
        let vars = config.to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("RAMBLER_PROJECT_NAME").unwrap(), "rambler");
        assert_eq!(map.get("RAMBLER_TOPOLOGY_PATH").unwrap(), "/data/ring.toml");
        assert!(map.keys().all(|k| !k.starts_with("RAMBLER_SIMULATION")));
    }

    #[test]
    fn test_rambler_config_env_export_reloads() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut config = RamblerConfig::default();
        config.project_name = "exported".to_string();
        config.topology.path = Some("/data/exported.toml".into());
        config.simulation.trials = 5;

        let vars = config.to_env_vars().unwrap();
        let _guards: Vec<EnvGuard> = vars.iter().map(|(k, v)| EnvGuard::new(k, v)).collect();

        let reloaded = RamblerConfig::load(Some("/nonexistent/config.toml")).unwrap();
        let exported_again: HashMap<_, _> = reloaded.to_env_vars().unwrap().into_iter().collect();
        let original: HashMap<_, _> = vars.into_iter().collect();

        assert_eq!(reloaded.project_name, "exported");
        assert_eq!(reloaded.topology.path.as_deref(), Some("/data/exported.toml"));
        assert_eq!(exported_again, original);
    }

    #[test]
    fn test_rambler_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RamblerConfig>();
    }
}
