//! Core traits for Rambler configuration.
//!
//! The engine itself takes plain arguments; [`ConfigProvider`] is how the
//! command-line front end (or any other driver) hands over trial counts,
//! seeds, and topology locations without the engine knowing where they
//! came from.

use std::path::PathBuf;

/// Trait for driver-level configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across worker tasks
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use rambler_core::traits::ConfigProvider;
///
/// #[derive(Clone)]
/// struct FixedConfig;
///
/// impl ConfigProvider for FixedConfig {
///     fn project_name(&self) -> &str {
///         "fixed"
///     }
///
///     fn topology_path(&self) -> Option<PathBuf> {
///         None
///     }
///
///     fn trial_count(&self) -> usize {
///         100
///     }
/// }
///
/// let config = FixedConfig;
/// assert_eq!(config.trial_count(), 100);
/// assert!(config.seed().is_none());
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Location of the topology file, if one is configured.
    ///
    /// `None` means the built-in fixture topology is used.
    fn topology_path(&self) -> Option<PathBuf>;

    /// Number of Monte Carlo trials per strategy.
    fn trial_count(&self) -> usize;

    /// Seed for the randomness source. `None` seeds from OS entropy.
    fn seed(&self) -> Option<u64> {
        None
    }

    /// Upper bound on random walk steps. `None` means unbounded.
    fn max_walk_steps(&self) -> Option<usize> {
        None
    }

    /// Whether both strategies share the sampled node pairs.
    fn paired_trials(&self) -> bool {
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
