// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plant configuration
//!
//! Every tunable of a run lives here. All fields have defaults, so an empty
//! TOML document is a valid configuration.

mod stages;

pub use stages::{StageTimings, WorkerCounts};

use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How plants in a group are wired together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Every plant runs the whole stage chain on its own queues
    #[default]
    Independent,
    /// Odd plants fetch and peel, even plants squeeze and bottle,
    /// handing oranges over through a queue shared by the group
    Split,
}

/// Settings for a run of the plant group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantConfig {
    /// Number of plants started
    pub plants: u32,
    /// Wall-clock time the plants run before being stopped
    #[serde(with = "humantime_serde")]
    pub run_for: Duration,
    /// Oranges needed to fill one bottle
    pub oranges_per_bottle: u64,
    /// Capacity of every inter-stage queue; full queues block the producer
    pub queue_capacity: usize,
    /// Stop admitting new oranges after this many per plant
    pub admission_limit: Option<u64>,
    pub topology: Topology,
    pub workers: WorkerCounts,
    pub timings: StageTimings,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            plants: 2,
            run_for: Duration::from_secs(5),
            oranges_per_bottle: 3,
            queue_capacity: 64,
            admission_limit: None,
            topology: Topology::default(),
            workers: WorkerCounts::default(),
            timings: StageTimings::default(),
        }
    }
}

impl PlantConfig {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::parse(&content)
    }

    /// Parse and validate a TOML document
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: PlantConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plants == 0 {
            return Err(ConfigError::Invalid("plants must be at least 1".into()));
        }
        if self.oranges_per_bottle == 0 {
            return Err(ConfigError::Invalid(
                "oranges_per_bottle must be at least 1".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "queue_capacity must be at least 1".into(),
            ));
        }
        for stage in Stage::WORK {
            if self.workers.count(stage) == 0 {
                return Err(ConfigError::Invalid(format!(
                    "workers.{} must be at least 1",
                    stage.to_string().to_lowercase()
                )));
            }
        }
        if self.topology == Topology::Split && self.plants < 2 {
            return Err(ConfigError::Invalid(
                "split topology needs at least 2 plants".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
