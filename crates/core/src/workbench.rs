// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Where simulated stage work happens

use crate::clock::{Clock, WorkInterrupted};
use crate::config::StageTimings;
use crate::stage::Stage;

/// A clock paired with the time each stage's work takes
#[derive(Clone)]
pub struct Workbench<C: Clock> {
    clock: C,
    timings: StageTimings,
}

impl<C: Clock> Workbench<C> {
    pub fn new(clock: C, timings: StageTimings) -> Self {
        Self { clock, timings }
    }

    /// Perform the work for `stage`, blocking the calling task for its duration
    pub async fn work(&self, stage: Stage) -> Result<(), WorkInterrupted> {
        self.clock.sleep(self.timings.duration(stage)).await
    }
}
