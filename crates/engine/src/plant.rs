// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Juice plants
//!
//! A plant owns a chain of stage queues, the workers bound to a contiguous
//! run of stages, and (when its chain starts at the initial stage) an
//! admission task that keeps fetching new oranges. When its chain ends with
//! bottling, a sink task drains the finished oranges.

use crate::error::EngineError;
use crate::queue::StageQueue;
use crate::signal::{StopListener, StopSignal};
use crate::summary::PlantReport;
use crate::worker::{StageWorker, WorkerReport, WorkerStats};
use juicer_core::{Bottling, Clock, IdGen, Item, PlantConfig, Stage, WorkerCounts, Workbench};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Name of the queue holding oranges at `stage`
fn queue_name(owner: &str, stage: Stage) -> String {
    format!("{}/{}", owner, stage.to_string().to_lowercase())
}

/// The stages a plant works on and the queues between them.
///
/// `queues[i]` feeds the workers of `stages[i]`, whose output lands in
/// `queues[i + 1]`.
#[derive(Debug, Clone)]
pub struct PlantLayout {
    stages: Vec<Stage>,
    queues: Vec<StageQueue>,
}

impl PlantLayout {
    /// The whole chain, from fetching to bottling, on the plant's own queues
    pub fn full(plant: u32, capacity: usize) -> Self {
        let owner = format!("plant-{}", plant);
        Self {
            stages: Stage::WORK.to_vec(),
            queues: Stage::ALL
                .iter()
                .map(|&stage| StageQueue::bounded(queue_name(&owner, stage), capacity))
                .collect(),
        }
    }

    /// Fetch and peel, handing peeled oranges to `handoff`
    pub fn front(plant: u32, capacity: usize, handoff: StageQueue) -> Self {
        let owner = format!("plant-{}", plant);
        Self {
            stages: vec![Stage::Fetched, Stage::Peeled],
            queues: vec![
                StageQueue::bounded(queue_name(&owner, Stage::Fetched), capacity),
                StageQueue::bounded(queue_name(&owner, Stage::Peeled), capacity),
                handoff,
            ],
        }
    }

    /// Squeeze and bottle oranges taken from `handoff`, finishing into `finished`
    pub fn back(plant: u32, capacity: usize, handoff: StageQueue, finished: StageQueue) -> Self {
        let owner = format!("plant-{}", plant);
        Self {
            stages: vec![Stage::Squeezed, Stage::Bottled],
            queues: vec![
                handoff,
                StageQueue::bounded(queue_name(&owner, Stage::Bottled), capacity),
                finished,
            ],
        }
    }

    /// Name a shared queue holding oranges at `stage`
    pub fn shared_queue(stage: Stage, capacity: usize) -> StageQueue {
        StageQueue::bounded(queue_name("shared", stage), capacity)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn queues(&self) -> &[StageQueue] {
        &self.queues
    }

    /// Queue new oranges are admitted into
    pub fn inlet(&self) -> &StageQueue {
        &self.queues[0]
    }

    /// Queue the last stage's workers forward into
    pub fn outlet(&self) -> &StageQueue {
        &self.queues[self.queues.len() - 1]
    }

    /// Whether this plant fetches new oranges
    pub fn admits(&self) -> bool {
        self.stages.first() == Some(&Stage::INITIAL)
    }

    /// Whether this plant's outlet receives fully processed oranges
    pub fn finishes(&self) -> bool {
        self.stages
            .last()
            .is_some_and(|stage| stage.next().is_ok_and(Stage::is_terminal))
    }
}

struct WorkerSlot {
    name: String,
    stage: Stage,
    stats: Arc<WorkerStats>,
}

/// A plant: queues, workers, admission and lifecycle
pub struct Plant<C: Clock, I: IdGen> {
    id: u32,
    layout: PlantLayout,
    bench: Workbench<C>,
    ids: I,
    workers: WorkerCounts,
    oranges_per_bottle: u64,
    admission_limit: Option<u64>,
    signal: StopSignal,
    provided: Arc<AtomicU64>,
    delivered: Arc<AtomicU64>,
    slots: Vec<WorkerSlot>,
    tasks: Vec<(String, JoinHandle<Result<(), EngineError>>)>,
    started: bool,
}

impl<C: Clock, I: IdGen> Plant<C, I> {
    pub fn new(
        id: u32,
        layout: PlantLayout,
        config: &PlantConfig,
        bench: Workbench<C>,
        ids: I,
    ) -> Self {
        Self {
            id,
            layout,
            bench,
            ids,
            workers: config.workers.clone(),
            oranges_per_bottle: config.oranges_per_bottle,
            admission_limit: config.admission_limit,
            signal: StopSignal::new(),
            provided: Arc::new(AtomicU64::new(0)),
            delivered: Arc::new(AtomicU64::new(0)),
            slots: Vec::new(),
            tasks: Vec::new(),
            started: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn layout(&self) -> &PlantLayout {
        &self.layout
    }

    /// Whether the plant was started and not yet asked to stop
    pub fn is_running(&self) -> bool {
        self.started && !self.signal.is_stopped()
    }

    /// Launch admission, the workers and the sink as independent tasks
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.started {
            return Err(EngineError::AlreadyStarted(self.id));
        }
        self.started = true;

        let span = tracing::info_span!("plant", plant = self.id);
        let _guard = span.enter();

        if self.layout.admits() {
            let task = admit(
                self.layout.inlet().clone(),
                self.bench.clone(),
                self.ids.clone(),
                self.admission_limit,
                Arc::clone(&self.provided),
                self.signal.listener(),
            );
            self.spawn(format!("Plant[{}] - admission", self.id), task);
        }

        let stages = self.layout.stages().to_vec();
        for (i, stage) in stages.into_iter().enumerate() {
            for n in 1..=self.workers.count(stage) {
                let worker = StageWorker::new(
                    format!("Plant[{}] - {} #{}", self.id, stage.role(), n),
                    stage,
                    self.layout.queues[i].clone(),
                    self.layout.queues[i + 1].clone(),
                    self.bench.clone(),
                    self.signal.listener(),
                );
                self.slots.push(WorkerSlot {
                    name: worker.name().to_string(),
                    stage,
                    stats: worker.stats(),
                });
                let name = worker.name().to_string();
                self.spawn(name, async move { worker.run().await.map(|_| ()) });
            }
        }

        if self.layout.finishes() {
            let task = drain(
                self.layout.outlet().clone(),
                Arc::clone(&self.delivered),
                self.signal.listener(),
            );
            self.spawn(format!("Plant[{}] - sink", self.id), task);
        }

        tracing::info!(
            stages = ?self.layout.stages(),
            workers = self.slots.len(),
            "plant started"
        );
        Ok(())
    }

    fn spawn<F>(&mut self, name: String, task: F)
    where
        F: std::future::Future<Output = Result<(), EngineError>> + Send + 'static,
    {
        let handle = tokio::spawn(task.in_current_span());
        self.tasks.push((name, handle));
    }

    /// Ask every task to finish its current orange and end.
    ///
    /// The plant's queues are closed as well, shared ones included, so
    /// workers of another plant feeding on them end once they run dry.
    pub fn stop(&self) {
        tracing::info!(plant = self.id, "stopping plant");
        self.signal.request_stop();
        for queue in self.layout.queues() {
            queue.close();
        }
    }

    /// Wait until admission, every worker and the sink have ended.
    ///
    /// Every task is awaited even if one failed; the first failure is
    /// returned.
    pub async fn wait_for_completion(&mut self) -> Result<(), EngineError> {
        let mut first_error = None;
        for (name, handle) in self.tasks.drain(..) {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(e) => Err(EngineError::TaskFailed {
                    task: name,
                    message: e.to_string(),
                }),
            };
            if let Err(e) = outcome {
                tracing::error!(plant = self.id, error = %e, "plant task failed");
                first_error.get_or_insert(e);
            }
        }
        tracing::info!(plant = self.id, "plant stopped");
        first_error.map_or(Ok(()), Err)
    }

    /// Oranges put on the first queue by the admission task
    pub fn items_admitted(&self) -> u64 {
        self.provided.load(Ordering::SeqCst)
    }

    /// Oranges taken in by the fetchers
    pub fn items_fetched(&self) -> u64 {
        self.slots
            .iter()
            .filter(|slot| slot.stage == Stage::INITIAL)
            .map(|slot| slot.stats.admitted())
            .sum()
    }

    /// Oranges moved into the terminal stage by this plant's workers.
    ///
    /// Never exceeds [`items_admitted`](Self::items_admitted) for a full
    /// layout. A back-half plant processes oranges admitted elsewhere.
    pub fn items_processed(&self) -> u64 {
        self.slots.iter().map(|slot| slot.stats.processed()).sum()
    }

    /// Finished oranges drained from the outlet by this plant's sink
    pub fn items_delivered(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }

    pub fn bottling(&self) -> Bottling {
        Bottling::from_processed(self.items_processed(), self.oranges_per_bottle)
    }

    pub fn bottles(&self) -> u64 {
        self.bottling().bottles
    }

    pub fn waste(&self) -> u64 {
        self.bottling().waste
    }

    pub fn worker_reports(&self) -> Vec<WorkerReport> {
        self.slots
            .iter()
            .map(|slot| WorkerReport {
                name: slot.name.clone(),
                stage: slot.stage,
                admitted: slot.stats.admitted(),
                processed: slot.stats.processed(),
                relayed: slot.stats.relayed(),
            })
            .collect()
    }

    pub fn report(&self) -> PlantReport {
        let bottling = self.bottling();
        PlantReport {
            plant: self.id,
            provided: self.items_admitted(),
            fetched: self.items_fetched(),
            processed: self.items_processed(),
            delivered: self.items_delivered(),
            bottles: bottling.bottles,
            waste: bottling.waste,
            workers: self.worker_reports(),
        }
    }
}

/// Keep fetching new oranges onto the inlet until stopped or the limit is hit
async fn admit<C: Clock, I: IdGen>(
    inlet: StageQueue,
    bench: Workbench<C>,
    ids: I,
    limit: Option<u64>,
    provided: Arc<AtomicU64>,
    mut stop: StopListener,
) -> Result<(), EngineError> {
    tracing::debug!(inlet = inlet.name(), "admission started");
    loop {
        if stop.is_stopped() {
            break;
        }
        if limit.is_some_and(|limit| provided.load(Ordering::SeqCst) >= limit) {
            tracing::debug!("admission limit reached");
            break;
        }

        let item = Item::create(ids.next(), &bench).await;
        tokio::select! {
            biased;
            sent = inlet.put(item) => {
                if let Err(e) = sent {
                    tracing::debug!(error = %e, "inlet unavailable");
                    break;
                }
                provided.fetch_add(1, Ordering::SeqCst);
            }
            _ = stop.stopped() => break,
        }
    }
    tracing::debug!(provided = provided.load(Ordering::SeqCst), "admission stopped");
    Ok(())
}

/// Drain finished oranges from the outlet until stopped
async fn drain(
    outlet: StageQueue,
    delivered: Arc<AtomicU64>,
    mut stop: StopListener,
) -> Result<(), EngineError> {
    loop {
        let item = tokio::select! {
            biased;
            _ = stop.stopped() => break,
            item = outlet.take() => item,
        };
        let Some(item) = item else {
            break;
        };
        tracing::trace!(item = %item.id(), "delivered");
        delivered.fetch_add(1, Ordering::SeqCst);
    }
    Ok(())
}

#[cfg(test)]
#[path = "plant_tests.rs"]
mod tests;
