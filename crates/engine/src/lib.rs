// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! juicer plant engine: queues, workers and plant lifecycle

mod error;
mod group;
mod plant;
mod queue;
mod signal;
mod summary;
mod worker;

pub use error::EngineError;
pub use group::PlantGroup;
pub use plant::{Plant, PlantLayout};
pub use queue::{QueueError, StageQueue};
pub use signal::{StopListener, StopSignal};
pub use summary::{PlantReport, RunSummary, Totals};
pub use worker::{StageWorker, WorkerReport, WorkerStats, WorkerStatus};
