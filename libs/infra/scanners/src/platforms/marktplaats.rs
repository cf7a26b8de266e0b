//! Marktplaats: static HTML, numeric page parameter. Region hint: NL.

use super::common::generic_card_pattern;
use crate::scanner::{Pagination, StaticScanner, StaticScannerConfig};
use sentinel_domain_models::Platform;

const BASE_URL: &str = "https://www.marktplaats.nl";

fn search_url(keyword: &str, page: u32) -> String {
    format!("{BASE_URL}/q/{}/p/{page}/", keyword.trim().replace(' ', "-"))
}

pub fn build() -> StaticScanner {
    StaticScanner::new(StaticScannerConfig {
        platform: Platform::Marktplaats,
        base_url: BASE_URL,
        search_url,
        pagination: Pagination::Numeric { max_pages: 4 },
        item_pattern: generic_card_pattern("listing-card"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlatformScanner;

    #[test]
    fn parses_generic_card_fixture() {
        let fixture = r#"<div class="listing-card"><a href="/v/item/1.html">Ivoor beeldje</a><span class="price">EUR 300</span></div>"#;
        let listings = build().parse(fixture, "ivoor");
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Ivoor beeldje");
    }
}
