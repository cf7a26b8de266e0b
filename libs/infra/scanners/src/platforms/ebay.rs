//! eBay: dual-path scanner (§4.4 "Per-platform notes"). When
//! `PLATFORM_EBAY_APP_ID`/`PLATFORM_EBAY_CERT_ID` are configured on the
//! [`ScanContext`], search goes through eBay's official Browse API
//! (JSON field extraction, no regex); otherwise it falls back to the
//! same static-HTML pagination path every other platform uses. Both
//! paths produce the same `Listing` shape.

use crate::client::build_client;
use crate::context::ScanContext;
use crate::error::{ScanErrorKind, ScanOutcome};
use crate::extract::{into_listing, RawItem};
use crate::scanner::{Pagination, PlatformScanner, StaticScanner, StaticScannerConfig};
use futures::future::BoxFuture;
use regex::Regex;
use sentinel_domain_models::{Listing, Platform};
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;
use url::Url;

const BASE_URL: &str = "https://www.ebay.com";
const API_BASE_URL: &str = "https://api.ebay.com/buy/browse/v1/item_summary/search";
const API_TIMEOUT: Duration = Duration::from_secs(25);
const API_PAGE_SIZE: usize = 50;

fn html_search_url(keyword: &str, page: u32) -> String {
    let offset = (page - 1) * 60;
    format!("{BASE_URL}/sch/i.html?_nkw={}&_pgn={page}&_skc={offset}", keyword.trim().replace(' ', "+"))
}

fn html_item_pattern() -> Regex {
    Regex::new(
        r#"(?s)<li class="s-item">.*?<a[^>]*class="s-item__link"[^>]*href="(?P<url>[^"]+)".*?<span[^>]*class="s-item__title"[^>]*>(?P<title>[^<]+)</span>.*?(?:<span class="s-item__price">(?P<price>[^<]*)</span>)?.*?(?:<span class="s-item__location[^"]*">(?P<location>[^<]*)</span>)?.*?</li>"#,
    )
    .expect("ebay html item regex failed to compile")
}

fn html_scanner() -> StaticScanner {
    StaticScanner::new(StaticScannerConfig {
        platform: Platform::Ebay,
        base_url: BASE_URL,
        search_url: html_search_url,
        pagination: Pagination::Numeric { max_pages: 4 },
        item_pattern: html_item_pattern(),
    })
}

pub struct EbayScanner {
    html_fallback: StaticScanner,
}

pub fn build() -> EbayScanner {
    EbayScanner { html_fallback: html_scanner() }
}

impl PlatformScanner for EbayScanner {
    fn platform(&self) -> Platform {
        Platform::Ebay
    }

    fn parse(&self, body: &str, keyword: &str) -> Vec<Listing> {
        self.html_fallback.parse(body, keyword)
    }

    fn search<'a>(&'a self, keyword: &'a str, max_results: usize, ctx: &'a ScanContext) -> BoxFuture<'a, ScanOutcome> {
        Box::pin(async move {
            match &ctx.ebay_credentials {
                Some(credentials) if !credentials.app_id.is_empty() => search_via_api(keyword, max_results, &credentials.app_id).await,
                _ => self.html_fallback.search(keyword, max_results, ctx).await,
            }
        })
    }
}

async fn search_via_api(keyword: &str, max_results: usize, app_id: &str) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let client = build_client();
    let url = format!("{API_BASE_URL}?q={}&limit={API_PAGE_SIZE}", keyword.trim().replace(' ', "+"));

    let request = client.get(&url).bearer_auth(app_id);
    let response = match timeout(API_TIMEOUT, request.send()).await {
        Ok(Ok(response)) => response,
        Ok(Err(transport_error)) => {
            warn!(error = %transport_error, "ebay api request failed");
            outcome.record(ScanErrorKind::Other);
            return outcome;
        }
        Err(_timed_out) => {
            outcome.record(ScanErrorKind::Timeout);
            return outcome;
        }
    };

    if response.status().is_client_error() {
        outcome.record(ScanErrorKind::Http4xx);
        return outcome;
    }
    if response.status().is_server_error() {
        outcome.record(ScanErrorKind::Http5xx);
        return outcome;
    }

    let body: serde_json::Value = match response.json().await {
        Ok(value) => value,
        Err(_) => {
            outcome.record(ScanErrorKind::ParseError);
            return outcome;
        }
    };

    let base = Url::parse(BASE_URL).expect("ebay base_url must be a valid URL");
    let listings = extract_api_items(&body, keyword, &base);
    outcome.pages_fetched = 1;
    outcome.listings = listings.into_iter().take(max_results).collect();
    outcome
}

fn extract_api_items(body: &serde_json::Value, keyword: &str, base: &Url) -> Vec<Listing> {
    let Some(items) = body.get("itemSummaries").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let title = item.get("title")?.as_str()?.to_string();
            let url = item.get("itemWebUrl")?.as_str()?.to_string();
            let price = item.get("price").and_then(|p| p.get("value")).and_then(|v| v.as_str()).map(|v| v.to_string());
            let location = item
                .get("itemLocation")
                .and_then(|l| l.get("city"))
                .and_then(|c| c.as_str())
                .map(|c| c.to_string());

            into_listing(RawItem { title, url, price, location }, Platform::Ebay, base, keyword)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_html_fixture() {
        let fixture = r#"<li class="s-item"><a class="s-item__link" href="https://www.ebay.com/itm/555"><span class="s-item__title">Ivory cane handle antique</span></a><span class="s-item__price">$200.00</span><span class="s-item__location">San Jose, CA</span></li>"#;
        let listings = build().parse(fixture, "ivory");
        assert_eq!(listings.len(), 1);
    }

    #[test]
    fn extracts_api_items_from_json() {
        let body = serde_json::json!({
            "itemSummaries": [{
                "title": "Carved ivory figurine",
                "itemWebUrl": "https://www.ebay.com/itm/999",
                "price": {"value": "75.00", "currency": "USD"},
                "itemLocation": {"city": "Reno"}
            }]
        });
        let base = Url::parse(BASE_URL).unwrap();
        let listings = extract_api_items(&body, "ivory", &base);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].location, "Reno");
    }
}
