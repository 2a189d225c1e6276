// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the plant engine

use juicer_core::ItemError;
use thiserror::Error;

/// Errors that end a plant task
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("worker {worker} failed: {source}")]
    Transition {
        worker: String,
        #[source]
        source: ItemError,
    },
    #[error("task {task} panicked or was aborted: {message}")]
    TaskFailed { task: String, message: String },
    #[error("plant {0} was already started")]
    AlreadyStarted(u32),
}
