//! Runtime configuration types
//!
//! Every field has a default, so a config file only needs to name what it
//! changes.

use serde::{Deserialize, Serialize};

/// Top-level runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Settings for the `substitute` builtin and engine
    pub substitute: SubstituteConfig,
}

/// Default nesting limit, matching R's `expressions` option.
pub const DEFAULT_MAX_DEPTH: usize = 5_000;

/// Substitution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubstituteConfig {
    /// Deepest syntax tree the engine will walk before failing with a
    /// stack overflow error
    pub max_depth: usize,
    /// Treat `env = globalenv()` like top level: nothing is substituted
    pub global_env_as_never: bool,
}

impl Default for SubstituteConfig {
    fn default() -> Self {
        SubstituteConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            global_env_as_never: true,
        }
    }
}
