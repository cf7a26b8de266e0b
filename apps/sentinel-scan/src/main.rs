//! Single-invocation CLI entry point (§6 "Invocation surface"): parses
//! flags/env, wires up the shared HTTP/store/dedupe collaborators,
//! runs one `Orchestrator` invocation to completion or timeout, then
//! persists the keyword cursor, the dedupe snapshot, and the run
//! summary before exiting with the contract's exit code (§6, §7).

use anyhow::Result;
use clap::Parser;
use sentinel_core_dedupe::{load_snapshot, save_snapshot, DedupeCache, SharedDedupeCache, DEFAULT_CAPACITY};
use sentinel_core_keywords::store as cursor_store;
use sentinel_infra_scanners::{EbayCredentials, ScanContext};
use sentinel_infra_store::StoreClient;
use sentinel_scan_lib::config::{Cli, ConfigError, RunConfig};
use sentinel_scan_lib::engine::Orchestrator;
use sentinel_scan_lib::summary::{self, RunSummary};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Global outbound concurrency cap (§5(a), default 16).
const GLOBAL_CONCURRENCY: usize = 16;

const EXIT_OK: u8 = 0;
const EXIT_TIMEOUT: u8 = 2;
const EXIT_CONFIG_ERROR: u8 = 10;
const EXIT_STORE_FATAL: u8 = 20;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    sentinel_shared_telemetry::init_tracing("sentinel-scan");

    let cli = Cli::parse();
    let config = match RunConfig::resolve(cli) {
        Ok(config) => config,
        Err(err) => {
            print_config_error(&err);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    match run(config).await {
        Ok(exit_code) => ExitCode::from(exit_code),
        Err(err) => {
            error!(error = %err, "sentinel-scan aborted before a run summary could be produced");
            println!("sentinel-scan: exit={EXIT_STORE_FATAL} aborted={err}");
            ExitCode::from(EXIT_STORE_FATAL)
        }
    }
}

fn print_config_error(err: &ConfigError) {
    error!(error = %err, "invalid configuration");
    println!("sentinel-scan: exit={EXIT_CONFIG_ERROR} config_error={err}");
}

async fn run(config: RunConfig) -> Result<u8> {
    let domain = config.threat_domain;
    let group_id = config.group_id;

    let ebay_credentials = match (&config.ebay_app_id, &config.ebay_cert_id) {
        (Some(app_id), Some(cert_id)) => Some(EbayCredentials {
            app_id: app_id.clone(),
            cert_id: cert_id.clone(),
        }),
        _ => None,
    };
    let scan_context = Arc::new(ScanContext::new(GLOBAL_CONCURRENCY, ebay_credentials));
    let store = Arc::new(StoreClient::new(&config.store_url, &config.store_api_key));

    let dedupe_path = config.state_dir.join(format!("{}_url_cache.json", domain.as_str()));
    let dedupe_cache = load_snapshot(&dedupe_path, DEFAULT_CAPACITY)?.unwrap_or_else(|| DedupeCache::new(DEFAULT_CAPACITY));
    let dedupe = Arc::new(SharedDedupeCache::new(dedupe_cache));

    let shutdown = Arc::new(AtomicBool::new(false));
    let ctrlc_shutdown = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        warn!("interrupt received; stopping after the current grace window");
        ctrlc_shutdown.store(true, Ordering::SeqCst);
    })
    .ok();

    let state_dir = config.state_dir.clone();

    let orchestrator = Orchestrator::new(config, scan_context, store, Arc::clone(&dedupe));
    let report = orchestrator.run(shutdown).await?;

    cursor_store::save(&state_dir, domain, &report.cursor)?;
    let snapshot_cache = DedupeCache::from_ordered(DEFAULT_CAPACITY, dedupe.snapshot_entries());
    save_snapshot(&dedupe_path, &snapshot_cache)?;

    let finished_at = chrono::Utc::now();
    let exit_code = if report.fatal.is_some() {
        EXIT_STORE_FATAL
    } else if report.timed_out {
        EXIT_TIMEOUT
    } else {
        EXIT_OK
    };

    let run_id = uuid::Uuid::new_v4().simple().to_string();
    let run_summary = RunSummary {
        run_id: run_id.clone(),
        group_id,
        threat_domain: domain.as_str(),
        started_at: report.started_at,
        finished_at,
        duration_seconds: (finished_at - report.started_at).num_milliseconds() as f64 / 1000.0,
        timed_out: report.timed_out,
        keyword_batch_size: report.cursor.batch_size,
        keywords_fully_processed: report.keywords_fully_processed,
        completed_cycles: report.cursor.completed_cycles,
        listings_scanned: report.counters.listings_scanned,
        pages_fetched: report.counters.pages_fetched,
        fingerprint_rejections: report.counters.fingerprint_rejections,
        seen_cache_hits: report.counters.seen_cache_hits,
        excluded_safe: report.counters.excluded_safe,
        total_stored: report.counters.total_stored,
        duplicates_skipped: report.counters.duplicates_skipped,
        backfill_window_rejected: report.counters.backfill_window_rejected,
        persistence_transient_failures: report.counters.persistence_transient_failures,
        persistence_fatal: report.counters.persistence_fatal,
        errors_by_kind: report.counters.errors_by_kind.clone(),
        errors_by_platform: report.counters.errors_by_platform.clone(),
        parse_error_samples: report.counters.parse_error_samples.clone(),
        persistence_failure_samples: report.counters.persistence_failure_samples.clone(),
    };
    let summary_path = RunSummary::path_for(&state_dir, domain, &run_id);
    if let Err(err) = run_summary.write(&summary_path) {
        warn!(error = %err, "failed to write run summary artifact");
    }

    if let Some(detail) = &report.fatal {
        error!(detail, "invocation ended on a fatal persistence error");
    }
    info!(group_id, domain = domain.as_str(), exit_code, "invocation complete");
    println!("{}", summary::one_line(&report.counters, report.timed_out, exit_code as i32));

    Ok(exit_code)
}
