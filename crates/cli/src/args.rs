// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command line arguments and how they override the config file

use anyhow::Result;
use clap::{Parser, ValueEnum};
use juicer_core::{PlantConfig, Topology};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "juicer",
    version,
    about = "Juicer - run a simulated juice bottling plant and report its output"
)]
pub struct Cli {
    /// TOML config file (defaults apply to anything it leaves out)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Number of plants to run
    #[arg(long)]
    pub plants: Option<u32>,

    /// How long the plants run (e.g. "5s", "250ms")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub duration: Option<Duration>,

    /// How plants are wired together
    #[arg(long, value_enum)]
    pub topology: Option<TopologyArg>,

    /// Stop admitting oranges after this many per plant
    #[arg(long)]
    pub limit: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TopologyArg {
    Independent,
    Split,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Independent => Topology::Independent,
            TopologyArg::Split => Topology::Split,
        }
    }
}

impl Cli {
    /// Load the config file, apply flag overrides, and validate the result
    pub fn plant_config(&self) -> Result<PlantConfig> {
        let mut config = match &self.config {
            Some(path) => PlantConfig::load(path)?,
            None => PlantConfig::default(),
        };

        if let Some(plants) = self.plants {
            config.plants = plants;
        }
        if let Some(duration) = self.duration {
            config.run_for = duration;
        }
        if let Some(topology) = self.topology {
            config.topology = topology.into();
        }
        if let Some(limit) = self.limit {
            config.admission_limit = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }
}
