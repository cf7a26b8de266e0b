//! REST/HTTPS store client (§4.7): single POST per row, bearer auth,
//! retry-with-backoff on transient failure. Grounded in this corpus's
//! bearer-default-header client construction and status-code-branch
//! idiom, generalized from a mission/finding uplink to a single
//! `insert(Detection)` call.

use crate::errors::StoreError;
use reqwest::{Client, StatusCode};
use sentinel_domain_models::Detection;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{instrument, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TRANSIENT_RETRIES: u32 = 3;

/// What inserting one `Detection` produced (§4.7's `insert(detection)
/// -> {inserted | duplicate | error(kind)}` contract, modeled as
/// `Ok(InsertOutcome)` for the two expected outcomes and `Err
/// (StoreError)` for the two the Orchestrator must branch on
/// differently).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Unique-constraint violation on `listing_url` — expected,
    /// increment a counter, discard the row.
    Duplicate,
}

pub struct StoreClient {
    client: Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(base_url: &str, api_key: &str) -> StoreClient {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .expect("store api key must be a valid header value");
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        StoreClient {
            client: Client::builder()
                .default_headers(headers)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("store HTTP client failed to build"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Insert one detection, retrying transient (network/5xx) failures
    /// up to `MAX_TRANSIENT_RETRIES` times with exponential backoff
    /// before giving up and returning `StoreError::Transient`.
    #[instrument(skip(self, detection), fields(listing_url = %detection.listing_url))]
    pub async fn insert(&self, detection: &Detection) -> Result<InsertOutcome, StoreError> {
        let url = format!("{}/api/v1/detections", self.base_url);
        let mut attempt = 0u32;

        loop {
            let response = self.client.post(&url).json(detection).send().await;

            match response {
                Ok(response) => match classify(response.status()) {
                    Classification::Inserted => return Ok(InsertOutcome::Inserted),
                    Classification::Duplicate => return Ok(InsertOutcome::Duplicate),
                    Classification::Fatal => {
                        let status = response.status();
                        let body = response.text().await.unwrap_or_default();
                        return Err(StoreError::Fatal(format!("store rejected write with status {status}: {body}")));
                    }
                    Classification::Transient => {
                        if attempt >= MAX_TRANSIENT_RETRIES {
                            return Err(StoreError::Transient(format!("store returned status {} after {attempt} retries", response.status())));
                        }
                        attempt += 1;
                        warn!(attempt, status = %response.status(), "store write failed, retrying");
                        sleep(backoff_delay(attempt)).await;
                    }
                },
                Err(transport_error) => {
                    if attempt >= MAX_TRANSIENT_RETRIES {
                        return Err(StoreError::Transient(format!("store unreachable after {attempt} retries: {transport_error}")));
                    }
                    attempt += 1;
                    warn!(attempt, error = %transport_error, "store request failed, retrying");
                    sleep(backoff_delay(attempt)).await;
                }
            }
        }
    }
}

enum Classification {
    Inserted,
    Duplicate,
    Transient,
    Fatal,
}

fn classify(status: StatusCode) -> Classification {
    match status {
        StatusCode::OK | StatusCode::CREATED => Classification::Inserted,
        StatusCode::CONFLICT => Classification::Duplicate,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Classification::Fatal,
        status if status.is_server_error() => Classification::Transient,
        StatusCode::TOO_MANY_REQUESTS => Classification::Transient,
        status if status.is_client_error() => Classification::Fatal,
        _ => Classification::Fatal,
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let base_ms = 250u64 * 2u64.saturating_pow(attempt);
    let jitter_ms = rand::Rng::gen_range(&mut rand::thread_rng(), 0..base_ms / 2 + 1);
    Duration::from_millis(base_ms + jitter_ms)
}
