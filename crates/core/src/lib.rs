// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! juicer-core: Core library for the juicer plant simulation
//!
//! This crate provides:
//! - The stage state machine every orange moves through
//! - Items and the simulated work that advances them
//! - Clock and ID abstractions with test doubles
//! - Bottling arithmetic and run configuration

pub mod clock;
pub mod config;
pub mod id;

// State machine (order matters for dependencies)
pub mod stage;
pub mod workbench;
pub mod item;
pub mod bottling;

// Re-exports
pub use bottling::Bottling;
pub use clock::{Clock, FakeClock, SystemClock, WorkInterrupted};
pub use config::{ConfigError, PlantConfig, StageTimings, Topology, WorkerCounts};
pub use id::{IdGen, ItemId, SequentialIdGen};
pub use item::{Item, ItemError};
pub use stage::{Stage, StageError};
pub use workbench::Workbench;
