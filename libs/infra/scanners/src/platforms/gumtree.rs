//! Gumtree: static HTML, numeric page parameter. Region hint: GB.

use super::common::generic_card_pattern;
use crate::scanner::{Pagination, StaticScanner, StaticScannerConfig};
use sentinel_domain_models::Platform;

const BASE_URL: &str = "https://www.gumtree.com";

fn search_url(keyword: &str, page: u32) -> String {
    format!("{BASE_URL}/search?q={}&page={page}", keyword.trim().replace(' ', "+"))
}

pub fn build() -> StaticScanner {
    StaticScanner::new(StaticScannerConfig {
        platform: Platform::Gumtree,
        base_url: BASE_URL,
        search_url,
        pagination: Pagination::Numeric { max_pages: 4 },
        item_pattern: generic_card_pattern("listing-tile"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlatformScanner;

    #[test]
    fn parses_generic_card_fixture() {
        let fixture = r#"<div class="listing-tile"><a href="/p/antiques/1">Carved ivory tusk</a><span class="price">GBP 900</span><span class="location">London</span></div>"#;
        let listings = build().parse(fixture, "ivory");
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].location, "London");
    }
}
