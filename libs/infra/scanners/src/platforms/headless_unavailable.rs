//! Shared scanner for platforms that only render search results via
//! client-side JavaScript (Taobao, Mercari). Headless rendering is out
//! of this implementation's budget (§4.4's resolution for these two
//! platforms), so these scanners implement `PlatformScanner` without
//! ever issuing a fetch: they report zero listings and a single
//! `ParseError`-classified "headless rendering unavailable" counter
//! per call, so the orchestrator can see the platform ran and produced
//! nothing rather than silently skipping it.

use crate::context::ScanContext;
use crate::error::{ScanErrorKind, ScanOutcome};
use crate::scanner::PlatformScanner;
use futures::future::BoxFuture;
use sentinel_domain_models::{Listing, Platform};

pub struct HeadlessUnavailableScanner {
    platform: Platform,
}

impl HeadlessUnavailableScanner {
    pub fn new(platform: Platform) -> HeadlessUnavailableScanner {
        HeadlessUnavailableScanner { platform }
    }
}

impl PlatformScanner for HeadlessUnavailableScanner {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn parse(&self, _body: &str, _keyword: &str) -> Vec<Listing> {
        Vec::new()
    }

    fn search<'a>(&'a self, _keyword: &'a str, _max_results: usize, _ctx: &'a ScanContext) -> BoxFuture<'a, ScanOutcome> {
        Box::pin(async move {
            let mut outcome = ScanOutcome::default();
            outcome.record(ScanErrorKind::ParseError);
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_parse_error_and_no_listings() {
        let scanner = HeadlessUnavailableScanner::new(Platform::Taobao);
        assert_eq!(scanner.parse("<html></html>", "ivory"), Vec::new());
    }
}
