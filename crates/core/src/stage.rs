// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Processing stages an orange moves through
//!
//! Stages form a fixed, closed sequence. Each one carries the time it takes
//! to complete its work; the final stage has no successor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors from stage transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("already at final stage: {0}")]
    AlreadyTerminal(Stage),
}

/// A step in the processing sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Fetched from the grove, waiting to be peeled
    Fetched,
    /// Peeled, waiting to be squeezed
    Peeled,
    /// Squeezed, waiting to be bottled
    Squeezed,
    /// Bottled, waiting for final processing
    Bottled,
    /// Fully processed
    Processed,
}

impl Stage {
    /// Stage every new item starts in
    pub const INITIAL: Stage = Stage::Fetched;

    /// Stage an item can never leave
    pub const TERMINAL: Stage = Stage::Processed;

    /// All stages in processing order
    pub const ALL: [Stage; 5] = [
        Stage::Fetched,
        Stage::Peeled,
        Stage::Squeezed,
        Stage::Bottled,
        Stage::Processed,
    ];

    /// Stages that have a worker assigned to them
    pub const WORK: [Stage; 4] = [
        Stage::Fetched,
        Stage::Peeled,
        Stage::Squeezed,
        Stage::Bottled,
    ];

    /// Position of this stage in the sequence
    pub fn index(self) -> usize {
        match self {
            Stage::Fetched => 0,
            Stage::Peeled => 1,
            Stage::Squeezed => 2,
            Stage::Bottled => 3,
            Stage::Processed => 4,
        }
    }

    /// The stage that follows this one.
    ///
    /// Fails for the terminal stage.
    pub fn next(self) -> Result<Stage, StageError> {
        match self {
            Stage::Fetched => Ok(Stage::Peeled),
            Stage::Peeled => Ok(Stage::Squeezed),
            Stage::Squeezed => Ok(Stage::Bottled),
            Stage::Bottled => Ok(Stage::Processed),
            Stage::Processed => Err(StageError::AlreadyTerminal(self)),
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::TERMINAL
    }

    /// Time it takes to complete this stage's work
    pub fn default_duration(self) -> Duration {
        let millis = match self {
            Stage::Fetched => 15,
            Stage::Peeled => 38,
            Stage::Squeezed => 29,
            Stage::Bottled => 17,
            Stage::Processed => 1,
        };
        Duration::from_millis(millis)
    }

    /// Name of the worker role that performs this stage
    pub fn role(self) -> &'static str {
        match self {
            Stage::Fetched => "Fetcher",
            Stage::Peeled => "Peeler",
            Stage::Squeezed => "Juicer",
            Stage::Bottled => "Bottler",
            Stage::Processed => "Packer",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetched => "Fetched",
            Stage::Peeled => "Peeled",
            Stage::Squeezed => "Squeezed",
            Stage::Bottled => "Bottled",
            Stage::Processed => "Processed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
