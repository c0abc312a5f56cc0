//! Engine configuration.
//!
//! Bounds are validated once, when the engine is constructed. Analysis
//! calls never re-validate them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default bound on the service store.
pub const DEFAULT_MAX_SERVICES: usize = 10_000;

/// Default bound on the cross-team edge store.
pub const DEFAULT_MAX_DEPENDENCIES: usize = 10_000;

/// Default bound on BFS cascade depth.
pub const DEFAULT_MAX_CASCADE_DEPTH: usize = 10;

/// Default bound on each derived-result history (predictions, assessments).
pub const DEFAULT_MAX_HISTORY: usize = 1_000;

/// Capacity and traversal bounds for a [`RiskGraphEngine`](crate::engine::RiskGraphEngine).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of service nodes retained; oldest evicted first
    #[serde(rename = "max-services", default = "default_max_services")]
    pub max_services: usize,

    /// Maximum number of cross-team edges retained; oldest evicted first
    #[serde(rename = "max-dependencies", default = "default_max_dependencies")]
    pub max_dependencies: usize,

    /// Maximum BFS depth for cascade simulation
    #[serde(rename = "max-cascade-depth", default = "default_max_cascade_depth")]
    pub max_cascade_depth: usize,

    /// Maximum retained predictions and assessments, each
    #[serde(rename = "max-history", default = "default_max_history")]
    pub max_history: usize,
}

fn default_max_services() -> usize {
    DEFAULT_MAX_SERVICES
}

fn default_max_dependencies() -> usize {
    DEFAULT_MAX_DEPENDENCIES
}

fn default_max_cascade_depth() -> usize {
    DEFAULT_MAX_CASCADE_DEPTH
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_services: DEFAULT_MAX_SERVICES,
            max_dependencies: DEFAULT_MAX_DEPENDENCIES,
            max_cascade_depth: DEFAULT_MAX_CASCADE_DEPTH,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl EngineConfig {
    /// Validate the configured bounds.
    ///
    /// Every bound must be positive: a zero-sized store or a zero-depth
    /// cascade makes every analysis result degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.max_services == 0 {
            return Err(Error::Config("max-services must be positive".to_string()));
        }
        if self.max_dependencies == 0 {
            return Err(Error::Config(
                "max-dependencies must be positive".to_string(),
            ));
        }
        if self.max_cascade_depth == 0 {
            return Err(Error::Config(
                "max-cascade-depth must be positive".to_string(),
            ));
        }
        if self.max_history == 0 {
            return Err(Error::Config("max-history must be positive".to_string()));
        }
        Ok(())
    }
}
