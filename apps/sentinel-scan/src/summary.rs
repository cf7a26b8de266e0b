//! Run summary document (§6 "Persistent state layout": `<domain>_run_
//! <timestamp>.json`) — the single artifact the CI/cron driver
//! captures as a build artifact after every invocation.

use crate::counters::RunCounters;
use chrono::{DateTime, Utc};
use sentinel_domain_models::ThreatDomain;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub group_id: u32,
    pub threat_domain: &'static str,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub timed_out: bool,
    pub keyword_batch_size: u32,
    pub keywords_fully_processed: u32,
    pub completed_cycles: u32,
    pub listings_scanned: u64,
    pub pages_fetched: u64,
    pub fingerprint_rejections: u64,
    pub seen_cache_hits: u64,
    pub excluded_safe: u64,
    pub total_stored: u64,
    pub duplicates_skipped: u64,
    pub backfill_window_rejected: u64,
    pub persistence_transient_failures: u64,
    pub persistence_fatal: u64,
    pub errors_by_kind: std::collections::HashMap<&'static str, u64>,
    pub errors_by_platform: std::collections::HashMap<&'static str, u64>,
    pub parse_error_samples: Vec<String>,
    pub persistence_failure_samples: Vec<String>,
}

impl RunSummary {
    pub fn path_for(state_dir: &Path, domain: ThreatDomain, run_id: &str) -> PathBuf {
        state_dir.join(format!("{}_run_{}.json", domain.as_str(), run_id))
    }

    /// Write this summary atomically, matching the cursor/snapshot
    /// write-temp-then-rename idiom (§4.5, §4.6).
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        let serialized = serde_json::to_vec_pretty(self).expect("run summary always serializes");
        let mut tmp = path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);
        std::fs::write(&tmp_path, &serialized)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

/// Render the single-line stdout summary (§7 "prints a single-line
/// summary and exits").
pub fn one_line(counters: &RunCounters, timed_out: bool, exit_code: i32) -> String {
    format!(
        "sentinel-scan: exit={exit_code} timed_out={timed_out} scanned={} stored={} duplicates={} errors={}",
        counters.listings_scanned,
        counters.total_stored,
        counters.duplicates_skipped,
        counters.errors_by_kind.values().sum::<u64>(),
    )
}
