//! The capability every platform implements (§4.4 "Operations exposed
//! by each scanner"), and a generic static-HTML implementation shared
//! by the platforms that don't need special-cased request building.

use crate::client::{fetch_page, FetchOutcome};
use crate::context::ScanContext;
use crate::error::{ScanErrorKind, ScanOutcome};
use crate::extract::RawItem;
use futures::future::BoxFuture;
use regex::Regex;
use sentinel_domain_models::{Listing, Platform};
use url::Url;

/// Pagination style a platform declares (§4.4). Cursor-token and
/// infinite-scroll platforms are out of this implementation's budget
/// (see [`crate::platforms::headless_unavailable`]); only `Numeric` is
/// exercised by the static-HTML scanners in this crate.
#[derive(Debug, Clone, Copy)]
pub enum Pagination {
    Numeric { max_pages: u32 },
}

/// The capability every platform value implements (§9 "Ad-hoc
/// per-platform classes with duck-typed `search` methods" — replaced
/// with a single trait the orchestrator is polymorphic over).
pub trait PlatformScanner: Send + Sync {
    fn platform(&self) -> Platform;

    /// Emit up to `max_results` listings for `keyword`, terminating
    /// cleanly on end-of-results or the platform's page cap (§4.4).
    /// Never fails; failures are counters on the returned outcome.
    fn search<'a>(&'a self, keyword: &'a str, max_results: usize, ctx: &'a ScanContext) -> BoxFuture<'a, ScanOutcome>;

    /// Pure parsing function, testable independently of any network
    /// call (§4.4 `parse(response_body) -> Listing*`).
    fn parse(&self, body: &str, keyword: &str) -> Vec<Listing>;
}

/// Per-platform declaration driving the generic static-HTML scanner
/// (§4.4's bulleted list: base URL/template, pagination, extractor,
/// per-keyword cap).
pub struct StaticScannerConfig {
    pub platform: Platform,
    pub base_url: &'static str,
    pub search_url: fn(&str, u32) -> String,
    pub pagination: Pagination,
    pub item_pattern: Regex,
}

/// The shared static-HTTP scanner: fetch, parse, paginate, repeat
/// until the page cap or `max_results` (§4.4's "static HTTP" path,
/// used by every platform except the two requiring a headless
/// renderer).
pub struct StaticScanner {
    pub config: StaticScannerConfig,
}

impl StaticScanner {
    pub fn new(config: StaticScannerConfig) -> StaticScanner {
        StaticScanner { config }
    }
}

impl PlatformScanner for StaticScanner {
    fn platform(&self) -> Platform {
        self.config.platform
    }

    fn parse(&self, body: &str, keyword: &str) -> Vec<Listing> {
        let base = Url::parse(self.config.base_url).expect("platform base_url must be a valid URL");
        let raw_items: Vec<RawItem> = crate::extract::extract_title_url(body, &self.config.item_pattern);
        raw_items
            .into_iter()
            .filter_map(|item| crate::extract::into_listing(item, self.config.platform, &base, keyword))
            .collect()
    }

    fn search<'a>(&'a self, keyword: &'a str, max_results: usize, ctx: &'a ScanContext) -> BoxFuture<'a, ScanOutcome> {
        Box::pin(async move {
            let mut outcome = ScanOutcome::default();
            let Pagination::Numeric { max_pages } = self.config.pagination;
            let platform = self.config.platform;
            let throttle = ctx.throttle(platform);

            for page in 1..=max_pages {
                if outcome.listings.len() >= max_results {
                    break;
                }

                let _global_permit = ctx.global_semaphore.acquire().await;
                let _platform_permit = throttle.semaphore().acquire().await;

                let url = (self.config.search_url)(keyword, page);
                match fetch_page(&ctx.client, &url).await {
                    FetchOutcome::Body(body) => {
                        throttle.record_outcome(false);
                        outcome.pages_fetched += 1;
                        let listings = self.parse(&body, keyword);
                        if listings.is_empty() {
                            break;
                        }
                        outcome.listings.extend(listings);
                    }
                    FetchOutcome::EndOfResults => {
                        throttle.record_outcome(false);
                        break;
                    }
                    FetchOutcome::Abandon(kind) => {
                        throttle.record_outcome(matches!(kind, ScanErrorKind::Blocked));
                        outcome.record(kind);
                        break;
                    }
                }

                ctx.pace(platform).await;
            }

            outcome.listings.truncate(max_results);
            outcome
        })
    }
}
