// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Oranges: the unit of work flowing through a plant
//!
//! An orange only ever moves forward through [`Stage`]s, one step per
//! [`Item::advance`], and is frozen once it reaches the terminal stage.
//! Items are deliberately not `Clone`: exactly one queue or worker owns an
//! orange at any moment.

use crate::clock::Clock;
use crate::id::ItemId;
use crate::stage::Stage;
use crate::workbench::Workbench;
use thiserror::Error;

/// Errors from advancing an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("orange {id} has already been processed")]
    AlreadyProcessed { id: ItemId },
}

/// An orange and the stage it has reached
#[derive(Debug, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    stage: Stage,
    interrupted_steps: u32,
}

impl Item {
    /// Fetch a new orange.
    ///
    /// Performs the initial stage's work before returning, so creating an
    /// orange takes time.
    pub async fn create<C: Clock>(id: ItemId, bench: &Workbench<C>) -> Self {
        let mut item = Self::at(id, Stage::INITIAL);
        item.labor(bench).await;
        item
    }

    /// Build an orange already at `stage`, without doing any work
    pub fn at(id: ItemId, stage: Stage) -> Self {
        Self {
            id,
            stage,
            interrupted_steps: 0,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_processed(&self) -> bool {
        self.stage.is_terminal()
    }

    /// Number of steps whose work was cut short
    pub fn interrupted_steps(&self) -> u32 {
        self.interrupted_steps
    }

    /// Do the current stage's work, then move to the next stage.
    ///
    /// Fails without touching the orange if it is already processed.
    /// Interrupted work is logged and the orange still moves on.
    pub async fn advance<C: Clock>(&mut self, bench: &Workbench<C>) -> Result<Stage, ItemError> {
        let next = self
            .stage
            .next()
            .map_err(|_| ItemError::AlreadyProcessed { id: self.id })?;

        self.labor(bench).await;
        tracing::debug!(item = %self.id, from = %self.stage, to = %next, "advanced");
        self.stage = next;
        Ok(next)
    }

    async fn labor<C: Clock>(&mut self, bench: &Workbench<C>) {
        if let Err(e) = bench.work(self.stage).await {
            self.interrupted_steps += 1;
            tracing::warn!(
                item = %self.id,
                stage = %self.stage,
                error = %e,
                "incomplete orange processing, juice may be bad"
            );
        }
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
