//! The closed set of marketplace platforms the crawler understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A platform the scanner layer knows how to fetch and parse.
///
/// This set is closed by design (§4.4): adding a platform means adding
/// a variant here, a scanner implementation, and a scorer multiplier —
/// never a stringly-typed lookup against an open registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ebay,
    Craigslist,
    Olx,
    Marktplaats,
    Mercadolibre,
    Gumtree,
    Avito,
    Aliexpress,
    Taobao,
    Mercari,
}

impl Platform {
    /// All platforms in the closed set, in a stable order.
    pub const ALL: [Platform; 10] = [
        Platform::Ebay,
        Platform::Craigslist,
        Platform::Olx,
        Platform::Marktplaats,
        Platform::Mercadolibre,
        Platform::Gumtree,
        Platform::Avito,
        Platform::Aliexpress,
        Platform::Taobao,
        Platform::Mercari,
    ];

    /// Stable lowercase tag, matching the CLI `--platforms` flag and the
    /// store's `platform` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ebay => "ebay",
            Platform::Craigslist => "craigslist",
            Platform::Olx => "olx",
            Platform::Marktplaats => "marktplaats",
            Platform::Mercadolibre => "mercadolibre",
            Platform::Gumtree => "gumtree",
            Platform::Avito => "avito",
            Platform::Aliexpress => "aliexpress",
            Platform::Taobao => "taobao",
            Platform::Mercari => "mercari",
        }
    }

    /// Parse a platform tag from the CLI/env surface. Unknown tags are
    /// a `ConfigError` at the call site, not a panic here.
    pub fn parse(tag: &str) -> Option<Platform> {
        Platform::ALL.into_iter().find(|p| p.as_str() == tag.trim().to_lowercase())
    }

    /// Historical base-rate multiplier applied in the scorer's
    /// aggregation stage (§4.3 stage 8), in `[0.8, 1.3]`.
    pub fn risk_multiplier(self) -> f64 {
        match self {
            Platform::Ebay => 0.9,
            Platform::Craigslist => 1.2,
            Platform::Olx => 1.0,
            Platform::Marktplaats => 0.85,
            Platform::Mercadolibre => 1.0,
            Platform::Gumtree => 0.95,
            Platform::Avito => 1.15,
            Platform::Aliexpress => 1.25,
            Platform::Taobao => 1.3,
            Platform::Mercari => 0.8,
        }
    }

    /// Region/language hint used only for logging (§4.4); the scorer
    /// itself stays language-agnostic at the rule level.
    pub fn region_hint(self) -> &'static str {
        match self {
            Platform::Ebay => "US",
            Platform::Craigslist => "US",
            Platform::Olx => "PL",
            Platform::Marktplaats => "NL",
            Platform::Mercadolibre => "MX",
            Platform::Gumtree => "GB",
            Platform::Avito => "RU",
            Platform::Aliexpress => "CN",
            Platform::Taobao => "CN",
            Platform::Mercari => "JP",
        }
    }

    /// Whether this platform's scanner requires a headless renderer
    /// for at least some regions (§4.4). Sentinel Scan does not ship
    /// a headless renderer; these scanners degrade to zero results
    /// with a `ParseError`-classified counter rather than fetching.
    pub fn requires_headless_renderer(self) -> bool {
        matches!(self, Platform::Mercari | Platform::Taobao)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_variant() {
        for platform in Platform::ALL {
            assert_eq!(Platform::parse(platform.as_str()), Some(platform));
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(Platform::parse(" EbAy \n"), Some(Platform::Ebay));
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        assert_eq!(Platform::parse("facebook_marketplace"), None);
    }

    #[test]
    fn all_multipliers_are_within_spec_bounds() {
        for platform in Platform::ALL {
            let m = platform.risk_multiplier();
            assert!((0.8..=1.3).contains(&m), "{platform} multiplier {m} out of bounds");
        }
    }
}
