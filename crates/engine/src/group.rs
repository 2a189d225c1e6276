// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plant groups: run several plants for a fixed time and sum up

use crate::error::EngineError;
use crate::plant::{Plant, PlantLayout};
use crate::summary::RunSummary;
use chrono::Utc;
use juicer_core::{Clock, IdGen, PlantConfig, Stage, Topology, Workbench};
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

/// A set of plants started, stopped and reported on together
pub struct PlantGroup<C: Clock, I: IdGen> {
    run_id: Uuid,
    topology: Topology,
    plants: Vec<Plant<C, I>>,
}

impl<C: Clock, I: IdGen> PlantGroup<C, I> {
    /// Build `config.plants` plants wired per `config.topology`.
    ///
    /// All plants share `ids`, so item ids are unique across the group.
    pub fn new(config: &PlantConfig, bench: Workbench<C>, ids: I) -> Self {
        let capacity = config.queue_capacity;
        let numbers = 1..=config.plants;

        let layouts: Vec<(u32, PlantLayout)> = match config.topology {
            Topology::Independent => numbers
                .map(|n| (n, PlantLayout::full(n, capacity)))
                .collect(),
            Topology::Split => {
                let handoff = PlantLayout::shared_queue(Stage::Squeezed, capacity);
                let finished = PlantLayout::shared_queue(Stage::Processed, capacity);
                numbers
                    .map(|n| {
                        let layout = if n % 2 == 1 {
                            PlantLayout::front(n, capacity, handoff.clone())
                        } else {
                            PlantLayout::back(n, capacity, handoff.clone(), finished.clone())
                        };
                        (n, layout)
                    })
                    .collect()
            }
        };

        let plants = layouts
            .into_iter()
            .map(|(n, layout)| Plant::new(n, layout, config, bench.clone(), ids.clone()))
            .collect();

        Self {
            run_id: Uuid::new_v4(),
            topology: config.topology,
            plants,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn plants(&self) -> &[Plant<C, I>] {
        &self.plants
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        for plant in &mut self.plants {
            plant.start()?;
        }
        Ok(())
    }

    pub fn stop(&self) {
        for plant in &self.plants {
            plant.stop();
        }
    }

    /// Wait for every plant; the first failure is returned after all have ended
    pub async fn wait_for_completion(&mut self) -> Result<(), EngineError> {
        let mut first_error = None;
        for plant in &mut self.plants {
            if let Err(e) = plant.wait_for_completion().await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Run every plant for `duration`, then stop them and report
    pub async fn run_for(&mut self, duration: Duration) -> Result<RunSummary, EngineError> {
        self.run_until(duration, std::future::pending()).await
    }

    /// Like [`run_for`](Self::run_for), but stop early once `interrupt` resolves
    pub async fn run_until<F>(
        &mut self,
        duration: Duration,
        interrupt: F,
    ) -> Result<RunSummary, EngineError>
    where
        F: Future<Output = ()>,
    {
        let started_at = Utc::now();
        tracing::info!(
            run_id = %self.run_id,
            plants = self.plants.len(),
            topology = ?self.topology,
            ?duration,
            "starting plants"
        );

        let started = self.start();
        if started.is_ok() {
            tokio::select! {
                _ = tokio::time::sleep(duration) => {}
                _ = interrupt => tracing::info!("interrupted, stopping early"),
            }
        }

        self.stop();
        let completed = self.wait_for_completion().await;
        started?;
        completed?;

        let summary = RunSummary::new(
            self.run_id,
            self.topology,
            started_at,
            Utc::now(),
            self.plants.iter().map(Plant::report).collect(),
        );
        tracing::info!(
            provided = summary.totals.provided,
            processed = summary.totals.processed,
            bottles = summary.totals.bottles,
            "run finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
