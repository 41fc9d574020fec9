//! Round metadata reports
//!
//! Optional JSON report describing how one worker's coordination round went:
//! assigned number, role, timings, and the workload's exit code. Written to the
//! output directory next to the scratch directory, one file per worker.

use crate::coordinator::Role;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// One worker's view of a completed coordination round
#[derive(Debug, Clone, Serialize)]
pub struct RoundMeta {
    pub worker_number: u64,
    pub number_of_workers: u64,
    pub role: Role,
    pub scratch_dir: PathBuf,
    pub registered_at: DateTime<Utc>,
    pub barrier_completed_at: DateTime<Utc>,
    pub barrier_wait_secs: f64,
    /// None when the workload was killed by a signal
    pub workload_exit_code: Option<i32>,
}

/// Report path for a given worker, under the output directory
pub fn meta_path(output_dir: &Path, ordinal: u64) -> PathBuf {
    output_dir.join(format!("coordination-{ordinal}.meta.json"))
}

/// Write the report as pretty-printed JSON
pub fn write_meta(path: &Path, meta: &RoundMeta) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create metadata report {}", path.display()))?;
    serde_json::to_writer_pretty(file, meta)
        .with_context(|| format!("Failed to write metadata report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_meta_path_is_per_worker() {
        let path = meta_path(Path::new("/data/out"), 2);
        assert_eq!(path, Path::new("/data/out/coordination-2.meta.json"));
    }

    #[test]
    fn test_write_meta_round_trips_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = meta_path(temp_dir.path(), 0);

        let registered_at = Utc::now();
        let meta = RoundMeta {
            worker_number: 0,
            number_of_workers: 3,
            role: Role::Leader,
            scratch_dir: temp_dir.path().join("tmp"),
            registered_at,
            barrier_completed_at: registered_at,
            barrier_wait_secs: 1.5,
            workload_exit_code: Some(0),
        };

        write_meta(&path, &meta).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["worker_number"], 0);
        assert_eq!(value["number_of_workers"], 3);
        assert_eq!(value["role"], "leader");
        assert_eq!(value["barrier_wait_secs"], 1.5);
        assert_eq!(value["workload_exit_code"], 0);
    }
}
