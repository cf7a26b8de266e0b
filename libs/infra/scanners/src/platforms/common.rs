//! A generic `<div class="...">title/url/price/location</div>` item
//! pattern shared by platforms whose markup is a flat listing-card
//! shape; platforms with a genuinely different shape (Craigslist,
//! eBay) own their own pattern instead.

use regex::Regex;

pub fn generic_card_pattern(container_class: &str) -> Regex {
    let pattern = format!(
        r#"(?s)<div class="{container_class}">.*?<a[^>]*href="(?P<url>[^"]+)"[^>]*>(?P<title>[^<]+)</a>.*?(?:<span class="price">(?P<price>[^<]*)</span>)?.*?(?:<span class="location">(?P<location>[^<]*)</span>)?.*?</div>"#
    );
    Regex::new(&pattern).expect("generic card regex failed to compile")
}
