// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Simulated work is a sleep on the clock. The system clock really waits;
//! the fake clock only tallies the time, so tests run instantly.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// A simulated-work wait that ended before its full duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("work interrupted before {0:?} elapsed")]
pub struct WorkInterrupted(pub Duration);

/// A clock simulated work waits on
#[async_trait]
pub trait Clock: Clone + Send + Sync + 'static {
    /// Wait for `duration`. Not cancellable once started.
    async fn sleep(&self, duration: Duration) -> Result<(), WorkInterrupted>;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) -> Result<(), WorkInterrupted> {
        tokio::time::sleep(duration).await;
        Ok(())
    }
}

#[derive(Debug)]
struct FakeState {
    slept: Duration,
    pending_interrupts: u32,
}

/// Fake clock for testing: sleeps return at once and can be interrupted
#[derive(Clone)]
pub struct FakeClock {
    state: Arc<Mutex<FakeState>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                slept: Duration::ZERO,
                pending_interrupts: 0,
            })),
        }
    }

    /// Make the next `count` sleeps end early with [`WorkInterrupted`]
    pub fn interrupt_next(&self, count: u32) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.pending_interrupts += count;
    }

    /// Total virtual time spent in completed sleeps
    pub fn total_slept(&self) -> Duration {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).slept
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) -> Result<(), WorkInterrupted> {
        let interrupted = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.pending_interrupts > 0 {
                state.pending_interrupts -= 1;
                true
            } else {
                state.slept += duration;
                false
            }
        };

        // Keep tight simulation loops from starving other tasks
        tokio::task::yield_now().await;

        if interrupted {
            Err(WorkInterrupted(duration))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
