//! Worker Orchestrator (C8): the single short-lived run that loads a
//! keyword batch, fans it out across the platform set, and drives each
//! listing through normalize -> dedupe -> score -> persist (§4.8).

use crate::config::RunConfig;
use crate::counters::SharedCounters;
use anyhow::Context;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use sentinel_core_dedupe::SharedDedupeCache;
use sentinel_core_fingerprint::{canonicalize, fingerprint, normalize::normalize_text};
use sentinel_core_keywords::{advance, start_batch, store as cursor_store};
use sentinel_core_scoring::{assess, to_detection};
use sentinel_domain_models::{KeywordCursor, Listing, Platform, ThreatDomain};
use sentinel_infra_scanners::{scanner_for, ScanContext};
use sentinel_infra_store::{InsertOutcome, StoreClient, StoreError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Per-keyword result cap (§4.4 leaves this to the implementation; not
/// named as a CLI flag in §6). Kept as an engine-internal constant
/// rather than surfaced as a flag this implementation doesn't need.
const MAX_RESULTS_PER_KEYWORD: usize = 50;

/// Wall-clock grace window for in-flight workers after the soft
/// deadline (§5).
const GRACE_WINDOW: Duration = Duration::from_secs(15);

pub struct Orchestrator {
    config: RunConfig,
    scan_context: Arc<ScanContext>,
    store: Arc<StoreClient>,
    dedupe: Arc<SharedDedupeCache>,
    counters: Arc<SharedCounters>,
}

/// What one invocation produced, enough for `main` to persist state and
/// pick an exit code (§6, §7).
pub struct RunReport {
    pub cursor: KeywordCursor,
    pub timed_out: bool,
    pub fatal: Option<String>,
    pub counters: crate::counters::RunCounters,
    pub keywords_fully_processed: u32,
    pub started_at: DateTime<Utc>,
}

impl Orchestrator {
    pub fn new(
        config: RunConfig,
        scan_context: Arc<ScanContext>,
        store: Arc<StoreClient>,
        dedupe: Arc<SharedDedupeCache>,
    ) -> Orchestrator {
        Orchestrator {
            config,
            scan_context,
            store,
            dedupe,
            counters: Arc::new(SharedCounters::new()),
        }
    }

    /// Run to completion or until the wall-clock budget (plus grace)
    /// expires. `shutdown` is shared with the process's Ctrl-C handler
    /// so an operator-requested stop and a deadline-triggered stop are
    /// the same signal from the worker pool's point of view.
    #[instrument(skip(self, shutdown), fields(group_id = self.config.group_id, domain = self.config.threat_domain.as_str()))]
    pub async fn run(&self, shutdown: Arc<AtomicBool>) -> anyhow::Result<RunReport> {
        let started_at = Utc::now();
        let domain = self.config.threat_domain;

        let existing_cursor = cursor_store::load(&self.config.state_dir, domain, self.config.group_id)
            .context("failed to load keyword cursor")?;
        let (cursor, batch) = start_batch(existing_cursor, domain, self.config.group_id, self.config.batch_size);
        let batch_len = batch.len() as u32;

        if batch.is_empty() {
            warn!("keyword corpus for this domain is empty; nothing to scan");
            return Ok(RunReport {
                cursor: advance(cursor, 0),
                timed_out: false,
                fatal: None,
                counters: self.counters.snapshot(),
                keywords_fully_processed: 0,
                started_at,
            });
        }

        let mut ordered_platforms = self.config.platforms.clone();
        if let Some(priority) = self.config.priority_platform {
            ordered_platforms.sort_by_key(|&p| if p == priority { 0 } else { 1 });
        }
        let platform_count = ordered_platforms.len();

        let mut queue = VecDeque::new();
        for &keyword in &batch {
            for &platform in &ordered_platforms {
                queue.push_back((platform, keyword));
            }
        }
        info!(units = queue.len(), keywords = batch.len(), platforms = platform_count, "work queue built");

        let queue = Arc::new(Mutex::new(queue));
        let keyword_progress: Arc<Mutex<HashMap<&'static str, usize>>> = Arc::new(Mutex::new(HashMap::new()));
        let fatal: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

        let pool_size = (platform_count * 2).clamp(1, 16);
        let mut handles = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            handles.push(tokio::spawn(run_worker(
                Arc::clone(&queue),
                Arc::clone(&shutdown),
                Arc::clone(&fatal),
                Arc::clone(&keyword_progress),
                Arc::clone(&self.scan_context),
                Arc::clone(&self.store),
                Arc::clone(&self.dedupe),
                Arc::clone(&self.counters),
                domain,
                self.config.backfill_days,
                platform_count,
            )));
        }
        let abort_handles: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();

        let deadline = Duration::from_secs(self.config.duration_seconds);
        let deadline_shutdown = Arc::clone(&shutdown);
        let deadline_watch = tokio::spawn(async move {
            sleep(deadline).await;
            deadline_shutdown.store(true, Ordering::SeqCst);
        });

        match tokio::time::timeout(deadline + GRACE_WINDOW, join_all(handles)).await {
            Ok(_) => {}
            Err(_) => {
                warn!("grace window elapsed with workers still in flight; aborting remaining tasks");
                for abort in &abort_handles {
                    abort.abort();
                }
            }
        }
        deadline_watch.abort();
        shutdown.store(true, Ordering::SeqCst);

        let fully_processed = {
            let progress = keyword_progress.lock().expect("keyword progress mutex poisoned");
            contiguous_prefix_done(&batch, &progress, platform_count)
        };
        let timed_out = fully_processed < batch_len;

        let fatal_message = fatal.lock().expect("fatal flag mutex poisoned").clone();

        Ok(RunReport {
            cursor: advance(cursor, fully_processed),
            timed_out,
            fatal: fatal_message,
            counters: self.counters.snapshot(),
            keywords_fully_processed: fully_processed,
            started_at,
        })
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_worker(
    queue: Arc<Mutex<VecDeque<(Platform, &'static str)>>>,
    shutdown: Arc<AtomicBool>,
    fatal: Arc<Mutex<Option<String>>>,
    keyword_progress: Arc<Mutex<HashMap<&'static str, usize>>>,
    scan_context: Arc<ScanContext>,
    store: Arc<StoreClient>,
    dedupe: Arc<SharedDedupeCache>,
    counters: Arc<SharedCounters>,
    domain: ThreatDomain,
    backfill_days: u32,
    platform_count: usize,
) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        let Some((platform, keyword)) = queue.lock().expect("work queue mutex poisoned").pop_front() else {
            break;
        };

        let scanner = scanner_for(platform);
        let outcome = scanner.search(keyword, MAX_RESULTS_PER_KEYWORD, &scan_context).await;
        counters.record_scan(platform, outcome.pages_fetched, outcome.listings.len(), &outcome.error_counts);

        for listing in outcome.listings {
            process_listing(listing, domain, backfill_days, &dedupe, &store, &counters, &fatal).await;
            if fatal.lock().expect("fatal flag mutex poisoned").is_some() {
                shutdown.store(true, Ordering::SeqCst);
                break;
            }
        }

        let mut progress = keyword_progress.lock().expect("keyword progress mutex poisoned");
        let count = progress.entry(keyword).or_insert(0);
        *count = (*count + 1).min(platform_count);
        drop(progress);

        if fatal.lock().expect("fatal flag mutex poisoned").is_some() {
            break;
        }
    }
}

/// How many keywords, counting from the front of `batch`, are done
/// (§4.5 "keywords fully processed advance the cursor; keywords
/// partially processed are re-scanned next invocation"). `advance`
/// only ever bumps `last_index` by a count, so it implicitly assumes
/// everything before that count is finished — this must be the length
/// of the contiguous done prefix, not a count of however many keywords
/// anywhere in the batch happen to be done. Workers pull from a
/// keyword-major queue with `pool_size >= 2`, so a later keyword
/// routinely finishes before an earlier one; stopping at the first
/// not-yet-complete keyword is what keeps that earlier keyword queued
/// for re-scanning next invocation instead of silently skipped.
fn contiguous_prefix_done(batch: &[&'static str], progress: &HashMap<&'static str, usize>, platform_count: usize) -> u32 {
    batch
        .iter()
        .take_while(|keyword| progress.get(*keyword).copied().unwrap_or(0) >= platform_count)
        .count() as u32
}

async fn process_listing(
    listing: Listing,
    domain: ThreatDomain,
    backfill_days: u32,
    dedupe: &SharedDedupeCache,
    store: &StoreClient,
    counters: &SharedCounters,
    fatal: &Mutex<Option<String>>,
) {
    let Some(canonical_url) = canonicalize(&listing.url, None) else {
        counters.record_fingerprint_rejection();
        return;
    };

    let normalized = Listing {
        title: normalize_text(&listing.title),
        description: normalize_text(&listing.description),
        url: canonical_url,
        ..listing
    };

    let fp = fingerprint(&normalized.url);
    if !dedupe.check_and_insert(fp) {
        counters.record_seen_cache_hit();
        return;
    }

    let assessment = assess(&normalized, domain);
    if assessment.is_safe() {
        counters.record_excluded_safe();
        return;
    }

    let backfill = backfill_days > 0;
    let detection = to_detection(&normalized, &assessment, &normalized.search_term, backfill);
    if backfill && !detection.within_backfill_window(backfill_days) {
        counters.record_backfill_window_exceeded();
        return;
    }
    match store.insert(&detection).await {
        Ok(InsertOutcome::Inserted) => counters.record_inserted(),
        Ok(InsertOutcome::Duplicate) => counters.record_duplicate(),
        Err(StoreError::Transient(detail)) => counters.record_transient_failure(&detail),
        Err(StoreError::Fatal(detail)) => {
            counters.record_fatal();
            *fatal.lock().expect("fatal flag mutex poisoned") = Some(detail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_order_completion_does_not_advance_past_an_unfinished_earlier_keyword() {
        let batch = vec!["alpha", "beta", "gamma"];
        let mut progress = HashMap::new();
        // beta (second in the batch) finishes fully; alpha (first) is
        // still mid-flight on one of two platforms.
        progress.insert("alpha", 1);
        progress.insert("beta", 2);
        let done = contiguous_prefix_done(&batch, &progress, 2);
        assert_eq!(done, 0, "alpha is still incomplete, so nothing in the batch has advanced yet");
    }

    #[test]
    fn contiguous_prefix_advances_only_up_to_the_first_gap() {
        let batch = vec!["alpha", "beta", "gamma"];
        let mut progress = HashMap::new();
        progress.insert("alpha", 2);
        progress.insert("beta", 2);
        progress.insert("gamma", 1);
        let done = contiguous_prefix_done(&batch, &progress, 2);
        assert_eq!(done, 2, "alpha and beta are done; gamma is not, so the prefix stops there");
    }

    #[test]
    fn fully_done_batch_advances_completely() {
        let batch = vec!["alpha", "beta"];
        let mut progress = HashMap::new();
        progress.insert("alpha", 2);
        progress.insert("beta", 2);
        assert_eq!(contiguous_prefix_done(&batch, &progress, 2), 2);
    }
}
