//! MercadoLibre: static HTML, numeric page parameter. Region hint: MX.

use super::common::generic_card_pattern;
use crate::scanner::{Pagination, StaticScanner, StaticScannerConfig};
use sentinel_domain_models::Platform;

const BASE_URL: &str = "https://listado.mercadolibre.com.mx";

fn search_url(keyword: &str, page: u32) -> String {
    let offset = (page - 1) * 50 + 1;
    format!("{BASE_URL}/{}_Desde_{offset}", keyword.trim().replace(' ', "-"))
}

pub fn build() -> StaticScanner {
    StaticScanner::new(StaticScannerConfig {
        platform: Platform::Mercadolibre,
        base_url: BASE_URL,
        search_url,
        pagination: Pagination::Numeric { max_pages: 4 },
        item_pattern: generic_card_pattern("ui-search-result"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlatformScanner;

    #[test]
    fn parses_generic_card_fixture() {
        let fixture = r#"<div class="ui-search-result"><a href="/MLM-item-1">Marfil tallado antiguo</a><span class="price">$4,200</span></div>"#;
        let listings = build().parse(fixture, "marfil");
        assert_eq!(listings.len(), 1);
    }
}
