//! Lockstep CLI entry point

use anyhow::{Context, Result};
use chrono::Utc;
use lockstep::config::{cli::Cli, Config};
use lockstep::coordinator::Rendezvous;
use lockstep::output::{self, RoundMeta};
use lockstep::sync::layout::ScratchLayout;
use lockstep::workload;
use std::time::Instant;

fn main() -> Result<()> {
    println!("lockstep v{}", env!("CARGO_PKG_VERSION"));
    println!("File-lock based process rendezvous");
    println!();

    let cli = Cli::parse_args();
    let config = Config::from_cli(&cli)?;
    config.validate().context("Configuration validation failed")?;

    if cli.dry_run {
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let layout = ScratchLayout::under(&config.outputdir);
    let rendezvous = Rendezvous::new(
        layout,
        config.workers,
        config.timeout,
        config.poll_interval,
    );

    let registered_at = Utc::now();
    let coord_start = Instant::now();
    let ctx = rendezvous.run().context("Coordination failed")?;
    let barrier_completed_at = Utc::now();
    let coord_elapsed = coord_start.elapsed();
    if cli.debug {
        eprintln!(
            "DEBUG TIMING: coordination: {:.3}s",
            coord_elapsed.as_secs_f64()
        );
    }

    println!(
        "worker #{}: all {} workers registered, proceeding as {}",
        ctx.ordinal, ctx.workers, ctx.role
    );

    let status = workload::hand_off(&config.exec, &ctx)?;
    if cli.debug {
        eprintln!("DEBUG: workload exited with {:?}", status.code());
    }

    if cli.save_meta {
        let meta = RoundMeta {
            worker_number: ctx.ordinal,
            number_of_workers: ctx.workers,
            role: ctx.role,
            scratch_dir: ctx.scratch.clone(),
            registered_at,
            barrier_completed_at,
            barrier_wait_secs: coord_elapsed.as_secs_f64(),
            workload_exit_code: status.code(),
        };
        let path = output::meta_path(&config.outputdir, ctx.ordinal);
        output::write_meta(&path, &meta)?;
        println!("Wrote metadata report to {}", path.display());
    }

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}
