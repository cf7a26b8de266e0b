//! Shared, regex-based result-item extraction (§4.4 "HTML/text
//! extraction approach"). No selector-engine crate is introduced —
//! each platform module supplies its own small set of capture-group
//! regexes; this module turns their raw captures into `Listing`s.

use chrono::Utc;
use regex::Regex;
use sentinel_domain_models::{Listing, Platform};
use std::collections::BTreeMap;
use url::Url;

/// The four fields every platform's extractor pulls out of a response
/// body (§4.4), before URL resolution and field normalization.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: String,
    pub url: String,
    pub price: Option<String>,
    pub location: Option<String>,
}

/// Turn extractor captures into a `Listing`, resolving a relative URL
/// against `base` and dropping the item if it has no usable URL or
/// title (§4.4: "emissions with missing required fields are dropped
/// inside the scanner").
pub fn into_listing(raw: RawItem, platform: Platform, base: &Url, search_term: &str) -> Option<Listing> {
    let title = raw.title.trim();
    if title.is_empty() || raw.url.trim().is_empty() {
        return None;
    }
    let url = resolve_url(&raw.url, base)?;

    Some(Listing {
        platform,
        platform_id: None,
        title: title.to_string(),
        description: String::new(),
        price: raw.price.map(|text| sentinel_core_fingerprint::normalize::parse_price(&text)),
        url,
        location: raw.location.unwrap_or_default(),
        seller_info: BTreeMap::new(),
        image_url: None,
        observed_at: Utc::now(),
        search_term: search_term.to_string(),
    })
}

fn resolve_url(raw: &str, base: &Url) -> Option<String> {
    if let Ok(absolute) = Url::parse(raw) {
        return Some(absolute.to_string());
    }
    base.join(raw).ok().map(|u| u.to_string())
}

/// Apply a two-capture-group regex (title, url) repeatedly against
/// `body`, producing one `RawItem` per match. Platform modules that
/// need price/location add those via their own follow-up regexes or a
/// richer capture set — this covers the common case.
pub fn extract_title_url(body: &str, pattern: &Regex) -> Vec<RawItem> {
    pattern
        .captures_iter(body)
        .map(|caps| RawItem {
            title: caps.name("title").map(|m| m.as_str().to_string()).unwrap_or_default(),
            url: caps.name("url").map(|m| m.as_str().to_string()).unwrap_or_default(),
            price: caps.name("price").map(|m| m.as_str().to_string()),
            location: caps.name("location").map(|m| m.as_str().to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_items_missing_title_or_url() {
        let base = Url::parse("https://x.test/").unwrap();
        assert!(into_listing(RawItem { title: "".into(), url: "/a".into(), ..Default::default() }, Platform::Ebay, &base, "k").is_none());
        assert!(into_listing(RawItem { title: "a".into(), url: "".into(), ..Default::default() }, Platform::Ebay, &base, "k").is_none());
    }

    #[test]
    fn resolves_relative_url_against_base() {
        let base = Url::parse("https://x.test/search").unwrap();
        let listing = into_listing(
            RawItem { title: "Item".into(), url: "/itm/55".into(), ..Default::default() },
            Platform::Ebay,
            &base,
            "ivory",
        )
        .unwrap();
        assert_eq!(listing.url, "https://x.test/itm/55");
    }
}
