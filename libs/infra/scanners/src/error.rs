//! Per-unit scanner failure taxonomy (§4.4, §7).
//!
//! A scanner never raises out of `search` — every failure becomes a
//! counter increment on the returned [`ScanOutcome`] instead.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    Timeout,
    Http4xx,
    Http5xx,
    Blocked,
    ParseError,
    Other,
}

impl ScanErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScanErrorKind::Timeout => "timeout",
            ScanErrorKind::Http4xx => "http_4xx",
            ScanErrorKind::Http5xx => "http_5xx",
            ScanErrorKind::Blocked => "blocked",
            ScanErrorKind::ParseError => "parse_error",
            ScanErrorKind::Other => "other",
        }
    }
}

/// What one `search(keyword, max_results)` call produced: zero or more
/// listings plus a structured error breakdown (§4.4 "Failure
/// semantics"). Never an `Err` — the orchestrator reads both fields.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub listings: Vec<sentinel_domain_models::Listing>,
    pub error_counts: HashMap<ScanErrorKind, u32>,
    /// Pages actually fetched, for the run summary / test assertions.
    pub pages_fetched: u32,
}

impl ScanOutcome {
    pub fn record(&mut self, kind: ScanErrorKind) {
        *self.error_counts.entry(kind).or_insert(0) += 1;
    }
}
