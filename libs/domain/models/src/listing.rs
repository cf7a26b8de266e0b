//! The raw, in-memory listing a scanner emits before scoring.

use crate::platform::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A listing's price, either left as the scanner's raw text or parsed
/// into a currency/amount pair by the normalizer (§4.1).
///
/// Kept as a tagged variant rather than two nullable fields so that
/// "price present but unparseable" and "price absent" stay distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Price {
    /// Text the normalizer could not parse into a currency/amount pair.
    Raw { text: String },
    /// Successfully parsed price.
    Parsed {
        currency: Option<String>,
        amount: f64,
    },
}

impl Price {
    /// The numeric amount, if this price was successfully parsed.
    pub fn numeric_amount(&self) -> Option<f64> {
        match self {
            Price::Parsed { amount, .. } => Some(*amount),
            Price::Raw { .. } => None,
        }
    }
}

/// A single listing as observed on a source platform, prior to scoring.
///
/// Constraint (§3): `url` is non-empty for any listing that proceeds
/// past the scanner — scanners drop listings missing a URL themselves
/// (§4.4) rather than constructing one with an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub platform: Platform,
    /// Platform-local identifier, when the response body exposes one.
    pub platform_id: Option<String>,
    pub title: String,
    pub description: String,
    pub price: Option<Price>,
    /// Canonical, absolute listing URL. Non-empty by construction.
    pub url: String,
    pub location: String,
    /// Free-text seller attributes the scanner happened to capture
    /// (e.g. "seller_since" -> "2019", "rating" -> "98%"). Kept as a
    /// map because the platforms disagree on what, if anything, they
    /// expose about the seller — the scorer never reads this field.
    pub seller_info: BTreeMap<String, String>,
    pub image_url: Option<String>,
    pub observed_at: DateTime<Utc>,
    /// The keyword that produced this hit.
    pub search_term: String,
}

impl Listing {
    /// A lowercased, trimmed view of title + description, the input
    /// every rule table and exclusion regex matches against.
    pub fn searchable_text(&self) -> String {
        let mut text = self.title.to_lowercase();
        text.push(' ');
        text.push_str(&self.description.to_lowercase());
        text
    }
}
