// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! juicer - Juice plant simulation CLI

mod args;

use anyhow::Result;
use clap::Parser;
use juicer_core::{SequentialIdGen, SystemClock, Workbench};
use juicer_engine::PlantGroup;

use crate::args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let config = cli.plant_config()?;

    let bench = Workbench::new(SystemClock, config.timings.clone());
    let mut group = PlantGroup::new(&config, bench, SequentialIdGen::new());

    let summary = group.run_until(config.run_for, ctrl_c()).await?;

    if cli.json {
        println!("{}", summary.to_json()?);
    } else {
        println!();
        println!("{}", summary);
    }
    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the handler can't be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Log to stderr so stdout carries only the report
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
