//! Craigslist: static HTML search results, numeric page parameter.

use crate::scanner::{Pagination, StaticScanner, StaticScannerConfig};
use regex::Regex;
use sentinel_domain_models::Platform;

const BASE_URL: &str = "https://craigslist.org";

fn search_url(keyword: &str, page: u32) -> String {
    let offset = (page - 1) * 120;
    format!(
        "{BASE_URL}/search/sss?query={}&s={offset}",
        urlencoding_lite(keyword)
    )
}

fn urlencoding_lite(s: &str) -> String {
    s.trim().replace(' ', "+")
}

fn item_pattern() -> Regex {
    Regex::new(
        r#"(?s)<li class="result-row">.*?<a[^>]*href="(?P<url>[^"]+)"[^>]*class="result-title[^"]*">(?P<title>[^<]+)</a>.*?(?:<span class="result-price">(?P<price>[^<]*)</span>)?.*?(?:<span class="result-hood">\s*\((?P<location>[^)]*)\)\s*</span>)?.*?</li>"#,
    )
    .expect("craigslist item regex failed to compile")
}

pub fn build() -> StaticScanner {
    StaticScanner::new(StaticScannerConfig {
        platform: Platform::Craigslist,
        base_url: BASE_URL,
        search_url,
        pagination: Pagination::Numeric { max_pages: 4 },
        item_pattern: item_pattern(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlatformScanner;

    const FIXTURE: &str = r#"
        <ul>
        <li class="result-row">
            <a href="/d/antique-ivory-carving/123.html" class="result-title hdrlnk">Antique ivory carving</a>
            <span class="result-price">$450</span>
            <span class="result-hood"> (downtown)</span>
        </li>
        </ul>
    "#;

    #[test]
    fn parses_fixture_listing() {
        let scanner = build();
        let listings = scanner.parse(FIXTURE, "ivory");
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Antique ivory carving");
        assert_eq!(listings[0].url, "https://craigslist.org/d/antique-ivory-carving/123.html");
    }

    #[test]
    fn search_url_encodes_spaces() {
        assert!(search_url("rhino horn", 1).contains("rhino+horn"));
    }
}
