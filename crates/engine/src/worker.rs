// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage workers
//!
//! A worker is bound to one stage. It takes oranges from its input queue,
//! advances those sitting in its stage, and forwards every orange to its
//! output queue whether or not it touched it. Oranges in other stages are
//! relayed unchanged, which lets several workers share one queue pair.

use crate::error::EngineError;
use crate::queue::StageQueue;
use crate::signal::StopListener;
use juicer_core::{Clock, Item, Stage, Workbench};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::Instrument;

/// Worker status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerStatus {
    /// Worker loop is active
    Running,
    /// Worker loop has ended
    Stopped,
}

/// Counters owned by one worker.
///
/// Only the worker's own task writes them; anyone may read them.
#[derive(Debug, Default)]
pub struct WorkerStats {
    admitted: AtomicU64,
    processed: AtomicU64,
    relayed: AtomicU64,
    stopped: AtomicBool,
}

impl WorkerStats {
    /// Oranges taken in at the initial stage (first-stage workers only)
    pub fn admitted(&self) -> u64 {
        self.admitted.load(Ordering::SeqCst)
    }

    /// Oranges this worker moved into the terminal stage
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::SeqCst)
    }

    /// Oranges passed on untouched because they were in another stage
    pub fn relayed(&self) -> u64 {
        self.relayed.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> WorkerStatus {
        if self.stopped.load(Ordering::SeqCst) {
            WorkerStatus::Stopped
        } else {
            WorkerStatus::Running
        }
    }
}

/// Point-in-time view of a worker's counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    pub name: String,
    pub stage: Stage,
    pub admitted: u64,
    pub processed: u64,
    pub relayed: u64,
}

/// A long-running task that performs one stage's work
pub struct StageWorker<C: Clock> {
    name: String,
    stage: Stage,
    input: StageQueue,
    output: StageQueue,
    bench: Workbench<C>,
    stop: StopListener,
    stats: Arc<WorkerStats>,
}

impl<C: Clock> StageWorker<C> {
    pub fn new(
        name: impl Into<String>,
        stage: Stage,
        input: StageQueue,
        output: StageQueue,
        bench: Workbench<C>,
        stop: StopListener,
    ) -> Self {
        Self {
            name: name.into(),
            stage,
            input,
            output,
            bench,
            stop,
            stats: Arc::new(WorkerStats::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Shared handle to this worker's counters
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    pub fn report(&self) -> WorkerReport {
        WorkerReport {
            name: self.name.clone(),
            stage: self.stage,
            admitted: self.stats.admitted(),
            processed: self.stats.processed(),
            relayed: self.stats.relayed(),
        }
    }

    /// Work on one orange if it is in this worker's stage.
    ///
    /// Returns the orange to forward. Oranges in any other stage come back
    /// unchanged.
    pub async fn handle(&self, mut item: Item) -> Result<Item, EngineError> {
        if item.stage() != self.stage {
            tracing::trace!(item = %item.id(), at = %item.stage(), "relaying");
            self.stats.relayed.fetch_add(1, Ordering::SeqCst);
            return Ok(item);
        }

        if self.stage == Stage::INITIAL {
            self.stats.admitted.fetch_add(1, Ordering::SeqCst);
        }

        item.advance(&self.bench)
            .await
            .map_err(|source| EngineError::Transition {
                worker: self.name.clone(),
                source,
            })?;

        if item.is_processed() {
            self.stats.processed.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(item = %item.id(), "fully processed");
        }
        Ok(item)
    }

    /// Run the worker loop until stopped.
    ///
    /// A stop request is honoured between oranges and while waiting on
    /// either queue; work on an orange already taken is finished first.
    pub async fn run(mut self) -> Result<WorkerReport, EngineError> {
        let span = tracing::info_span!("worker", name = %self.name, stage = %self.stage);
        async move {
            tracing::info!(input = self.input.name(), output = self.output.name(), "started");
            let result = self.work_loop().await;
            self.stats.stopped.store(true, Ordering::SeqCst);

            let report = self.report();
            match &result {
                Ok(()) => tracing::info!(
                    admitted = report.admitted,
                    processed = report.processed,
                    relayed = report.relayed,
                    "stopped"
                ),
                Err(e) => tracing::error!(error = %e, "worker failed"),
            }
            result.map(|()| report)
        }
        .instrument(span)
        .await
    }

    async fn work_loop(&mut self) -> Result<(), EngineError> {
        loop {
            if self.stop.is_stopped() {
                return Ok(());
            }

            let item = tokio::select! {
                biased;
                _ = self.stop.stopped() => return Ok(()),
                item = self.input.take() => item,
            };
            let Some(item) = item else {
                tracing::debug!("input queue closed");
                return Ok(());
            };

            let item = self.handle(item).await?;

            tokio::select! {
                biased;
                sent = self.output.put(item) => {
                    if let Err(e) = sent {
                        tracing::debug!(error = %e, "output queue unavailable");
                        return Ok(());
                    }
                }
                _ = self.stop.stopped() => {
                    tracing::debug!("stopped while forwarding, orange dropped");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
