//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// Lockstep - file-lock based rendezvous for cooperating worker processes
#[derive(Parser, Debug)]
#[command(name = "lockstep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input directory shared by all workers
    #[arg(value_name = "INPUTDIR")]
    pub inputdir: PathBuf,

    /// Output directory; coordination scratch state lives under <OUTPUTDIR>/tmp
    #[arg(value_name = "OUTPUTDIR")]
    pub outputdir: PathBuf,

    /// Number of concurrently launched worker processes
    #[arg(short = 'w', long, env = "NUMBER_OF_WORKERS")]
    pub workers: u64,

    /// Downstream workload executable invoked once after coordination
    #[arg(long, env = "WORKLOAD_EXEC")]
    pub exec: PathBuf,

    /// Registration barrier timeout (e.g. 60s, 5m)
    #[arg(long, default_value = "60s")]
    pub timeout: String,

    /// Interval between barrier polls (e.g. 1s, 250ms)
    #[arg(long, default_value = "1s")]
    pub poll_interval: String,

    /// Validate configuration and exit without coordinating
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON metadata report to the output directory
    #[arg(long)]
    pub save_meta: bool,

    /// Print debug timing information
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
