//! Shared HTTP client, user-agent rotation, and the per-request retry
//! contract every static-HTML scanner reuses (§4.4 "Algorithmic
//! contract"). Grounded in this corpus's `execute_with_retry` idiom
//! (exponential backoff with a capped ceiling, `tokio::time::timeout`
//! racing the request, classify-then-retry-or-bail).

use crate::error::ScanErrorKind;
use rand::seq::SliceRandom;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);
const MAX_REDIRECTS: usize = 3;
/// Response bodies shorter than this are treated as a block page
/// (§4.4 "Anti-bot detection") rather than a genuine empty result.
const MIN_PLAUSIBLE_BODY_LEN: usize = 200;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
];

pub fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .pool_max_idle_per_host(8)
        .build()
        .expect("scanner HTTP client failed to build")
}

pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// What a completed fetch attempt means for the caller's pagination
/// loop (§4.4's per-keyword state machine: `fetching -> parsing |
/// backing_off -> (fetching | abandoned)`).
pub enum FetchOutcome {
    /// 2xx with a body that looks genuine; hand to the parser.
    Body(String),
    /// 404/410, or a 2xx body too short to be a real page: no more
    /// results for this keyword on this platform.
    EndOfResults,
    /// Retry budget exhausted or a non-retryable status: abandon this
    /// keyword on this platform for the invocation.
    Abandon(ScanErrorKind),
}

/// Fetch one page with the shared timeout/retry/anti-bot contract.
///
/// - Individual request timeout: hard 25s; on timeout, one retry with
///   1-3s jittered backoff, then abandon.
/// - 2xx: returned as `Body`, unless suspiciously short (anti-bot).
/// - 404/410: `EndOfResults`.
/// - 429/503: honor `Retry-After` if present, else exponential
///   backoff with jitter; at most 2 retries.
/// - other 4xx/5xx: one retry, then abandon.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    let mut rate_limit_retries = 0u32;
    let mut generic_retries = 0u32;

    loop {
        let request = client.get(url).header(reqwest::header::USER_AGENT, random_user_agent());

        let attempt = timeout(REQUEST_TIMEOUT, request.send()).await;
        let response = match attempt {
            Ok(Ok(response)) => response,
            Ok(Err(_transport_error)) if generic_retries == 0 => {
                generic_retries += 1;
                sleep(jittered(Duration::from_secs(1), Duration::from_secs(3))).await;
                continue;
            }
            Ok(Err(transport_error)) => {
                warn!(url, error = %transport_error, "scanner request failed after retry, abandoning");
                return FetchOutcome::Abandon(ScanErrorKind::Other);
            }
            Err(_timed_out) if generic_retries == 0 => {
                generic_retries += 1;
                sleep(jittered(Duration::from_secs(1), Duration::from_secs(3))).await;
                continue;
            }
            Err(_timed_out) => {
                return FetchOutcome::Abandon(ScanErrorKind::Timeout);
            }
        };

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => return FetchOutcome::EndOfResults,
            status if status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                if looks_like_block_page(&body) {
                    if rate_limit_retries >= 2 {
                        return FetchOutcome::Abandon(ScanErrorKind::Blocked);
                    }
                    rate_limit_retries += 1;
                    sleep(backoff_delay(rate_limit_retries)).await;
                    continue;
                }
                return FetchOutcome::Body(body);
            }
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
                if rate_limit_retries >= 2 {
                    return FetchOutcome::Abandon(ScanErrorKind::Blocked);
                }
                let retry_after = retry_after_duration(response.headers());
                rate_limit_retries += 1;
                sleep(retry_after.unwrap_or_else(|| backoff_delay(rate_limit_retries))).await;
                continue;
            }
            status if status.is_client_error() => {
                if generic_retries == 0 {
                    generic_retries += 1;
                    sleep(jittered(Duration::from_secs(1), Duration::from_secs(3))).await;
                    continue;
                }
                return FetchOutcome::Abandon(ScanErrorKind::Http4xx);
            }
            status if status.is_server_error() => {
                if generic_retries == 0 {
                    generic_retries += 1;
                    sleep(jittered(Duration::from_secs(1), Duration::from_secs(3))).await;
                    continue;
                }
                return FetchOutcome::Abandon(ScanErrorKind::Http5xx);
            }
            other => {
                debug!(url, status = %other, "unhandled status, abandoning keyword on this platform");
                return FetchOutcome::Abandon(ScanErrorKind::Other);
            }
        }
    }
}

fn retry_after_duration(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    let value = headers.get(reqwest::header::RETRY_AFTER)?.to_str().ok()?;
    value.parse::<u64>().ok().map(Duration::from_secs)
}

fn backoff_delay(attempt: u32) -> Duration {
    let base = Duration::from_secs(2u64.saturating_pow(attempt));
    jittered(base, base + Duration::from_secs(1))
}

fn jittered(low: Duration, high: Duration) -> Duration {
    let low_ms = low.as_millis() as u64;
    let high_ms = high.as_millis().max(low.as_millis() + 1) as u64;
    Duration::from_millis(rand::Rng::gen_range(&mut rand::thread_rng(), low_ms..high_ms))
}

/// Anti-bot heuristic (§4.4): a page too short to plausibly be a real
/// listing page, or explicitly asking whether we're human.
fn looks_like_block_page(body: &str) -> bool {
    if body.len() < MIN_PLAUSIBLE_BODY_LEN {
        return true;
    }
    let lower = body.to_lowercase();
    lower.contains("are you human") || lower.contains("detected unusual traffic") || lower.contains("captcha")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_treated_as_block_page() {
        assert!(looks_like_block_page("short"));
    }

    #[test]
    fn captcha_wording_is_treated_as_block_page() {
        let body = "x".repeat(500) + " please complete the captcha to continue";
        assert!(looks_like_block_page(&body));
    }

    #[test]
    fn plausible_listing_page_is_not_blocked() {
        let body = "<html><body>".to_string() + &"<div class=listing>item</div>".repeat(20) + "</body></html>";
        assert!(!looks_like_block_page(&body));
    }
}
