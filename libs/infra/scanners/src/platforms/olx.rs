//! OLX: static HTML, numeric page parameter. Region hint: PL.

use super::common::generic_card_pattern;
use crate::scanner::{Pagination, StaticScanner, StaticScannerConfig};
use sentinel_domain_models::Platform;

const BASE_URL: &str = "https://www.olx.pl";

fn search_url(keyword: &str, page: u32) -> String {
    format!("{BASE_URL}/oferty/q-{}/?page={page}", keyword.trim().replace(' ', "-"))
}

pub fn build() -> StaticScanner {
    StaticScanner::new(StaticScannerConfig {
        platform: Platform::Olx,
        base_url: BASE_URL,
        search_url,
        pagination: Pagination::Numeric { max_pages: 4 },
        item_pattern: generic_card_pattern("offer-card"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlatformScanner;

    #[test]
    fn parses_generic_card_fixture() {
        let fixture = r#"<div class="offer-card"><a href="/d/oferta/1.html">Rzezba z kosci sloniowej</a><span class="price">450 zl</span><span class="location">Warszawa</span></div>"#;
        let listings = build().parse(fixture, "kosc sloniowa");
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].location, "Warszawa");
    }
}
