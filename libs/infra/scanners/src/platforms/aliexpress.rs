//! AliExpress: static HTML, numeric page parameter. Smaller per-keyword
//! caps and longer inter-request delays already apply via
//! `ScanContext`'s default concurrency/delay tables (§4.4 "Per-platform
//! notes").

use super::common::generic_card_pattern;
use crate::scanner::{Pagination, StaticScanner, StaticScannerConfig};
use sentinel_domain_models::Platform;

const BASE_URL: &str = "https://www.aliexpress.com";

fn search_url(keyword: &str, page: u32) -> String {
    format!("{BASE_URL}/wholesale?SearchText={}&page={page}", keyword.trim().replace(' ', "+"))
}

pub fn build() -> StaticScanner {
    StaticScanner::new(StaticScannerConfig {
        platform: Platform::Aliexpress,
        base_url: BASE_URL,
        search_url,
        pagination: Pagination::Numeric { max_pages: 3 },
        item_pattern: generic_card_pattern("list-item"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlatformScanner;

    #[test]
    fn parses_generic_card_fixture() {
        let fixture = r#"<div class="list-item"><a href="/item/100.html">Hand carved ivory figurine replica</a><span class="price">$12.50</span></div>"#;
        let listings = build().parse(fixture, "ivory figurine");
        assert_eq!(listings.len(), 1);
    }
}
