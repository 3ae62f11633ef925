//! Configuration data structures for dagraph.
//!
//! Defines the YAML config format: cycle detection default, the batch size at
//! which edge insertion switches to deferred dedup, and traversal work-list
//! sizing. Every field has a default so partial files are valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Run the cycle probe on every edge insertion.
    #[serde(default = "default_cycle_detection")]
    pub cycle_detection: bool,

    /// Batch size at which `DedupStrategy::Auto` defers duplicate removal.
    #[serde(default = "default_batch_dedup_threshold")]
    pub batch_dedup_threshold: usize,

    /// Work-list sizing for traversals.
    #[serde(default)]
    pub traversal: TraversalOptions,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            cycle_detection: default_cycle_detection(),
            batch_dedup_threshold: default_batch_dedup_threshold(),
            traversal: TraversalOptions::default(),
        }
    }
}

impl GraphConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded graph config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_dedup_threshold == 0 {
            return Err(ConfigError::Invalid(
                "batch_dedup_threshold must be positive".into(),
            ));
        }
        self.traversal.validate()
    }
}

// ---------------------------------------------------------------------------
// TraversalOptions
// ---------------------------------------------------------------------------

/// Sizing of the stack/queue a traversal allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalOptions {
    /// Slots allocated up front.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Growth cap, 0 for unbounded. A traversal that needs more stops early
    /// and reports the error.
    #[serde(default)]
    pub max_capacity: usize,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            max_capacity: 0,
        }
    }
}

impl TraversalOptions {
    /// Options with a hard cap on the work-list.
    pub fn bounded(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::Invalid(
                "traversal.initial_capacity must be positive".into(),
            ));
        }
        if self.max_capacity != 0 && self.max_capacity < self.initial_capacity {
            return Err(ConfigError::Invalid(format!(
                "traversal.max_capacity {} is smaller than initial_capacity {}",
                self.max_capacity, self.initial_capacity
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_cycle_detection() -> bool {
    true
}

fn default_batch_dedup_threshold() -> usize {
    1000
}

fn default_initial_capacity() -> usize {
    64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
