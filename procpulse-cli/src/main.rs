//! # procpulse
//!
//! Minimal CPU utilization sampler. Re-reads the aggregate `cpu` row of
//! `/proc/stat` once per second, computes the tick delta against the previous
//! sample, and prints the percentage share of each CPU state.
//!
//! ## Output
//! A header naming the eight columns, then one line per sampling interval:
//! ```text
//! us ni sy id io iq sq st
//!  3  0  1 95  0  0  0  0
//! ```
//! The first line covers the time since boot rather than the last second,
//! because the first delta is taken against an all-zero baseline.
//!
//! ## Usage
//! ```bash
//! procpulse --log-level debug
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use procpulse_telemetry::{delta, normalize, CpuPercents, CpuTimes, StatSampler};

mod cli;

use cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    match args.log_format.as_str() {
        "json" => procpulse_common::init_logging_json(&args.log_level)?,
        _ => procpulse_common::init_logging(&args.log_level)?,
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        stat_path = %args.stat_path,
        "Starting procpulse"
    );

    // The counter source stays open for the life of the process.
    let mut sampler = match StatSampler::open(&args.stat_path) {
        Ok(sampler) => sampler,
        Err(e) => {
            error!(error = %e, path = %args.stat_path, "Unable to open counter source");
            return Err(e.into());
        }
    };

    run(&mut sampler).await
}

/// The sampling loop: one cycle per interval tick until the source fails or
/// the process is interrupted.
///
/// Each cycle samples the cumulative counters, computes the delta against the
/// stored previous sample, rotates the previous sample, and emits the
/// normalized percentages. The first read or parse failure ends the loop
/// without emitting a line for that cycle; the process then falls through to
/// a normal exit.
async fn run(sampler: &mut StatSampler) -> Result<()> {
    println!("us ni sy id io iq sq st");

    let mut previous = CpuTimes::default();

    let mut ticker = time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; consume it so every cycle below
    // is followed by a full interval.
    ticker.tick().await;

    loop {
        let current = match sampler.sample() {
            Ok(current) => current,
            Err(e) => {
                error!(error = %e, "Sampling failed, stopping");
                break;
            }
        };

        let interval = delta(&current, &previous);
        previous = current;
        emit(&normalize(&interval));

        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Print one fixed-width data line, matching the header columns.
fn emit(percents: &CpuPercents) {
    println!(
        "{:2} {:2} {:2} {:2} {:2} {:2} {:2} {:2}",
        percents.user,
        percents.nice,
        percents.system,
        percents.idle,
        percents.iowait,
        percents.irq,
        percents.softirq,
        percents.steal
    );
}
