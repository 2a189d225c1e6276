// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-of-run statistics

use crate::worker::WorkerReport;
use chrono::{DateTime, Utc};
use juicer_core::Topology;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const BANNER: &str = "======= Juice Plant Processing Summary =======";
const FOOTER: &str = "==============================================";

/// Counters of one plant at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantReport {
    pub plant: u32,
    pub provided: u64,
    pub fetched: u64,
    pub processed: u64,
    pub delivered: u64,
    pub bottles: u64,
    pub waste: u64,
    pub workers: Vec<WorkerReport>,
}

/// Sums over every plant in the group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub provided: u64,
    pub fetched: u64,
    pub processed: u64,
    pub bottles: u64,
    pub wasted: u64,
}

impl Totals {
    fn from_reports(plants: &[PlantReport]) -> Self {
        plants.iter().fold(Totals::default(), |acc, p| Totals {
            provided: acc.provided + p.provided,
            fetched: acc.fetched + p.fetched,
            processed: acc.processed + p.processed,
            bottles: acc.bottles + p.bottles,
            wasted: acc.wasted + p.waste,
        })
    }
}

/// Report of a whole run of a plant group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub topology: Topology,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub plants: Vec<PlantReport>,
    pub totals: Totals,
}

impl RunSummary {
    pub fn new(
        run_id: Uuid,
        topology: Topology,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        plants: Vec<PlantReport>,
    ) -> Self {
        let totals = Totals::from_reports(&plants);
        Self {
            run_id,
            topology,
            started_at,
            finished_at,
            plants,
            totals,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BANNER)?;
        writeln!(f, "Total Oranges Provided: {}", self.totals.provided)?;
        writeln!(f, "Total Oranges Fetched: {}", self.totals.fetched)?;
        writeln!(f, "Total Oranges Processed: {}", self.totals.processed)?;
        writeln!(f, "Total Bottles Created: {}", self.totals.bottles)?;
        writeln!(f, "Total Oranges Wasted: {}", self.totals.wasted)?;
        write!(f, "{}", FOOTER)
    }
}
