//! Per-invocation counters (§4.8 "reports counters", §7 run-summary
//! contract). A single instance is shared across the worker pool
//! behind a mutex — the hot path is one lock per listing, the same
//! shape as the dedupe cache's hot path.

use sentinel_domain_models::Platform;
use sentinel_infra_scanners::ScanErrorKind;
use std::collections::HashMap;
use std::sync::Mutex;

/// How many sample strings the run summary keeps per failure bucket
/// (§7: "include a sample in the run summary, size-limited").
const MAX_SAMPLES: usize = 20;

#[derive(Debug, Default, Clone)]
pub struct RunCounters {
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
    pub errors_by_kind: HashMap<&'static str, u64>,
    pub errors_by_platform: HashMap<&'static str, u64>,
    pub parse_error_samples: Vec<String>,
    pub persistence_failure_samples: Vec<String>,
}

impl RunCounters {
    fn record_error(&mut self, platform: Platform, kind: ScanErrorKind) {
        *self.errors_by_kind.entry(kind.as_str()).or_insert(0) += 1;
        *self.errors_by_platform.entry(platform.as_str()).or_insert(0) += 1;
        if kind == ScanErrorKind::ParseError && self.parse_error_samples.len() < MAX_SAMPLES {
            self.parse_error_samples.push(format!("{}: parse_error", platform.as_str()));
        }
    }
}

/// Thread-safe wrapper the worker pool mutates concurrently.
#[derive(Default)]
pub struct SharedCounters {
    inner: Mutex<RunCounters>,
}

impl SharedCounters {
    pub fn new() -> SharedCounters {
        SharedCounters::default()
    }

    pub fn record_scan(&self, platform: Platform, pages_fetched: u32, listings: usize, error_counts: &HashMap<ScanErrorKind, u32>) {
        let mut counters = self.inner.lock().expect("counters mutex poisoned");
        counters.pages_fetched += pages_fetched as u64;
        counters.listings_scanned += listings as u64;
        for (&kind, &count) in error_counts {
            for _ in 0..count {
                counters.record_error(platform, kind);
            }
        }
    }

    pub fn record_fingerprint_rejection(&self) {
        self.inner.lock().expect("counters mutex poisoned").fingerprint_rejections += 1;
    }

    pub fn record_seen_cache_hit(&self) {
        self.inner.lock().expect("counters mutex poisoned").seen_cache_hits += 1;
    }

    pub fn record_excluded_safe(&self) {
        self.inner.lock().expect("counters mutex poisoned").excluded_safe += 1;
    }

    pub fn record_inserted(&self) {
        self.inner.lock().expect("counters mutex poisoned").total_stored += 1;
    }

    pub fn record_duplicate(&self) {
        self.inner.lock().expect("counters mutex poisoned").duplicates_skipped += 1;
    }

    /// A backfilled detection whose `observed_at` fell outside the
    /// `--backfill-days` acceptance window (§4.7); dropped, not
    /// persisted.
    pub fn record_backfill_window_exceeded(&self) {
        self.inner.lock().expect("counters mutex poisoned").backfill_window_rejected += 1;
    }

    pub fn record_transient_failure(&self, detail: &str) {
        let mut counters = self.inner.lock().expect("counters mutex poisoned");
        counters.persistence_transient_failures += 1;
        if counters.persistence_failure_samples.len() < MAX_SAMPLES {
            counters.persistence_failure_samples.push(detail.to_string());
        }
    }

    pub fn record_fatal(&self) {
        self.inner.lock().expect("counters mutex poisoned").persistence_fatal += 1;
    }

    pub fn snapshot(&self) -> RunCounters {
        self.inner.lock().expect("counters mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_scan_tallies_pages_listings_and_errors() {
        let shared = SharedCounters::new();
        let mut errors = HashMap::new();
        errors.insert(ScanErrorKind::Timeout, 2u32);
        shared.record_scan(Platform::Ebay, 3, 10, &errors);

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.pages_fetched, 3);
        assert_eq!(snapshot.listings_scanned, 10);
        assert_eq!(snapshot.errors_by_kind.get("timeout"), Some(&2));
        assert_eq!(snapshot.errors_by_platform.get("ebay"), Some(&2));
    }

    #[test]
    fn parse_error_samples_are_capped() {
        let shared = SharedCounters::new();
        let mut errors = HashMap::new();
        errors.insert(ScanErrorKind::ParseError, (MAX_SAMPLES as u32) + 5);
        shared.record_scan(Platform::Taobao, 0, 0, &errors);
        assert_eq!(shared.snapshot().parse_error_samples.len(), MAX_SAMPLES);
    }
}
