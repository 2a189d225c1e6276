// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stage settings: simulated work durations and worker counts

use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long each stage's simulated work takes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageTimings {
    #[serde(with = "humantime_serde")]
    pub fetched: Duration,
    #[serde(with = "humantime_serde")]
    pub peeled: Duration,
    #[serde(with = "humantime_serde")]
    pub squeezed: Duration,
    #[serde(with = "humantime_serde")]
    pub bottled: Duration,
    #[serde(with = "humantime_serde")]
    pub processed: Duration,
}

impl StageTimings {
    /// Every stage takes the same time
    pub fn uniform(duration: Duration) -> Self {
        Self {
            fetched: duration,
            peeled: duration,
            squeezed: duration,
            bottled: duration,
            processed: duration,
        }
    }

    pub fn duration(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Fetched => self.fetched,
            Stage::Peeled => self.peeled,
            Stage::Squeezed => self.squeezed,
            Stage::Bottled => self.bottled,
            Stage::Processed => self.processed,
        }
    }
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            fetched: Stage::Fetched.default_duration(),
            peeled: Stage::Peeled.default_duration(),
            squeezed: Stage::Squeezed.default_duration(),
            bottled: Stage::Bottled.default_duration(),
            processed: Stage::Processed.default_duration(),
        }
    }
}

/// Number of workers started for each working stage of a plant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkerCounts {
    pub fetched: usize,
    pub peeled: usize,
    pub squeezed: usize,
    pub bottled: usize,
}

impl WorkerCounts {
    /// One worker per stage
    pub fn single() -> Self {
        Self {
            fetched: 1,
            peeled: 1,
            squeezed: 1,
            bottled: 1,
        }
    }

    /// Worker count for a stage; the terminal stage has no workers
    pub fn count(&self, stage: Stage) -> usize {
        match stage {
            Stage::Fetched => self.fetched,
            Stage::Peeled => self.peeled,
            Stage::Squeezed => self.squeezed,
            Stage::Bottled => self.bottled,
            Stage::Processed => 0,
        }
    }
}

impl Default for WorkerCounts {
    fn default() -> Self {
        Self {
            fetched: 1,
            peeled: 1,
            squeezed: 2,
            bottled: 2,
        }
    }
}
