//! Field normalization (§4.1): whitespace and price parsing.

use sentinel_domain_models::Price;

const ISO_4217: &[&str] = &[
    "USD", "EUR", "GBP", "RUB", "JPY", "CNY", "MXN", "PLN", "AUD", "CAD",
];

/// Trim and collapse interior whitespace (including newlines/tabs) to
/// single spaces.
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse free-text price into `(currency, amount)` where detectable;
/// accepts the symbols `$ € £ ₽ ¥` and ISO-4217 codes. Anything else is
/// left as raw text (P10) — currency stays `None`, amount is not
/// fabricated.
pub fn parse_price(raw: &str) -> Price {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Price::Raw { text: raw.to_string() };
    }

    if let Some((currency, rest)) = strip_symbol(trimmed) {
        if let Some(amount) = extract_number(rest) {
            return Price::Parsed { currency: Some(currency.to_string()), amount };
        }
    }

    let upper = trimmed.to_uppercase();
    for code in ISO_4217 {
        if let Some(rest) = upper.strip_prefix(code).or_else(|| upper.strip_suffix(code)) {
            if let Some(amount) = extract_number(rest) {
                return Price::Parsed { currency: Some((*code).to_string()), amount };
            }
        }
    }

    Price::Raw { text: raw.to_string() }
}

fn strip_symbol(text: &str) -> Option<(&'static str, &str)> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    match first {
        '$' => Some(("USD", rest)),
        '€' => Some(("EUR", rest)),
        '£' => Some(("GBP", rest)),
        '₽' => Some(("RUB", rest)),
        '¥' => Some(("JPY", rest)),
        _ => None,
    }
}

fn extract_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Normalize a listing's free-text fields in one pass (§4.1).
pub fn normalize_fields(title: &str, description: &str, raw_price: Option<&str>) -> (String, String, Option<Price>) {
    let title = normalize_text(title);
    let description = normalize_text(description);
    let price = raw_price.map(parse_price);
    (title, description, price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_interior_whitespace() {
        assert_eq!(normalize_text("  hello   \n\tworld  "), "hello world");
    }

    #[test]
    fn parses_dollar_amounts() {
        match parse_price("$4,200.00") {
            Price::Parsed { currency, amount } => {
                assert_eq!(currency.as_deref(), Some("USD"));
                assert_eq!(amount, 4200.0);
            }
            Price::Raw { .. } => panic!("expected parsed price"),
        }
    }

    #[test]
    fn parses_iso_codes() {
        match parse_price("EUR 99.50") {
            Price::Parsed { currency, amount } => {
                assert_eq!(currency.as_deref(), Some("EUR"));
                assert_eq!(amount, 99.50);
            }
            Price::Raw { .. } => panic!("expected parsed price"),
        }
    }

    #[test]
    fn leaves_unknown_formats_as_raw_text() {
        match parse_price("contact for price") {
            Price::Raw { text } => assert_eq!(text, "contact for price"),
            Price::Parsed { .. } => panic!("expected raw price"),
        }
    }
}
