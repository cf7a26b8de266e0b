//! Avito: static HTML, numeric page parameter. Region hint: RU.

use super::common::generic_card_pattern;
use crate::scanner::{Pagination, StaticScanner, StaticScannerConfig};
use sentinel_domain_models::Platform;

const BASE_URL: &str = "https://www.avito.ru";

fn search_url(keyword: &str, page: u32) -> String {
    format!("{BASE_URL}/rossiya?q={}&p={page}", keyword.trim().replace(' ', "+"))
}

pub fn build() -> StaticScanner {
    StaticScanner::new(StaticScannerConfig {
        platform: Platform::Avito,
        base_url: BASE_URL,
        search_url,
        pagination: Pagination::Numeric { max_pages: 4 },
        item_pattern: generic_card_pattern("iva-item-root"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlatformScanner;

    #[test]
    fn parses_generic_card_fixture() {
        let fixture = r#"<div class="iva-item-root"><a href="/item/1">Рог носорога резной</a><span class="price">120000 руб</span></div>"#;
        let listings = build().parse(fixture, "рог носорога");
        assert_eq!(listings.len(), 1);
    }
}
