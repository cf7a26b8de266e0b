//! The scored, persisted record derived from a `Listing` (§3, §4.3).

use crate::platform::Platform;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Threat severity, totally ordered low-to-high so overrides (§4.3
/// stage 10) can be expressed as `level = level.max(forced_level)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    /// The level a raw aggregate score (§4.3 stage 10) maps to, before
    /// any category override is applied.
    pub fn from_score(raw: i32) -> ThreatLevel {
        match raw {
            r if r < 25 => ThreatLevel::Safe,
            r if r < 45 => ThreatLevel::Low,
            r if r < 65 => ThreatLevel::Medium,
            r if r < 80 => ThreatLevel::High,
            _ => ThreatLevel::Critical,
        }
    }
}

/// The threat domain a Detection falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatCategory {
    Wildlife,
    HumanTrafficking,
    Both,
    Safe,
}

/// The scorer's output for one listing (§4.3). Produced by
/// `sentinel-core-scoring`, consumed by the orchestrator to decide
/// whether and how to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatAssessment {
    /// 0..=100, clamped (§4.3 stage 9).
    pub score: i32,
    pub level: ThreatLevel,
    pub category: ThreatCategory,
    pub requires_human_review: bool,
    /// 0.0..=1.0 (§4.3 stage 11). Never lowers the score; informs
    /// reviewers only.
    pub confidence: f64,
    /// Human-readable explanation of which stages fired.
    pub reasoning: String,
    /// The specific indicator strings that matched, for audit trails.
    pub indicators: Vec<String>,
}

impl ThreatAssessment {
    /// I5: an assessment whose exclusion filters fired with enough
    /// weight to force `Safe` is never persisted.
    pub fn is_safe(&self) -> bool {
        self.level == ThreatLevel::Safe
    }
}

/// A persisted, scored record (§3). `Platform`'s `Serialize` impl
/// lowercases the tag to match the store's `platform` column; every
/// other field keeps the semantic type named in the schema (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Short ASCII identifier unique to this write attempt (I4): a
    /// failed insert never reuses its id.
    pub evidence_id: String,
    pub observed_at: DateTime<Utc>,
    pub platform: Platform,
    /// Canonical URL; unique key at the store (I1).
    pub listing_url: String,
    pub listing_title: String,
    pub listing_description: String,
    pub listing_price: String,
    pub listing_location: String,
    pub search_term: String,
    pub threat_score: i32,
    pub threat_level: ThreatLevel,
    pub threat_category: ThreatCategory,
    pub requires_human_review: bool,
    pub confidence_score: f64,
    pub enhancement_notes: String,
    /// Always false unless the (out-of-core) vision sidecar annotated
    /// this row out-of-band.
    pub vision_analyzed: bool,
    /// Set when the adapter is running in backfill mode (§4.7); a
    /// backfilled row never displaces an existing row for the same URL.
    pub backfill: bool,
}

impl Detection {
    /// Whether `observed_at` falls inside the Persistence Adapter's
    /// backfill acceptance window (§4.7: "the adapter accepts an
    /// `observed_at` up to N days in the past"). Callers only need
    /// this check when `backfill` is enabled; a live-scanned detection
    /// always carries `observed_at` at capture time and trivially
    /// satisfies it.
    pub fn within_backfill_window(&self, backfill_days: u32) -> bool {
        Utc::now().signed_duration_since(self.observed_at) <= Duration::days(backfill_days as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries_match_spec_thresholds() {
        assert_eq!(ThreatLevel::from_score(0), ThreatLevel::Safe);
        assert_eq!(ThreatLevel::from_score(24), ThreatLevel::Safe);
        assert_eq!(ThreatLevel::from_score(25), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_score(44), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_score(45), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_score(64), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_score(65), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_score(79), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_score(80), ThreatLevel::Critical);
        assert_eq!(ThreatLevel::from_score(100), ThreatLevel::Critical);
    }

    #[test]
    fn level_ordering_supports_override_via_max() {
        assert_eq!(ThreatLevel::Medium.max(ThreatLevel::High), ThreatLevel::High);
        assert_eq!(ThreatLevel::Critical.max(ThreatLevel::High), ThreatLevel::Critical);
    }

    fn detection_observed(observed_at: DateTime<Utc>) -> Detection {
        Detection {
            evidence_id: "ev-1".into(),
            observed_at,
            platform: Platform::Ebay,
            listing_url: "https://example.com/item/1".into(),
            listing_title: String::new(),
            listing_description: String::new(),
            listing_price: String::new(),
            listing_location: String::new(),
            search_term: "test".into(),
            threat_score: 70,
            threat_level: ThreatLevel::High,
            threat_category: ThreatCategory::Wildlife,
            requires_human_review: false,
            confidence_score: 0.8,
            enhancement_notes: String::new(),
            vision_analyzed: false,
            backfill: true,
        }
    }

    #[test]
    fn observed_now_is_within_any_backfill_window() {
        let detection = detection_observed(Utc::now());
        assert!(detection.within_backfill_window(0));
        assert!(detection.within_backfill_window(30));
    }

    #[test]
    fn observed_beyond_the_window_is_rejected() {
        let detection = detection_observed(Utc::now() - Duration::days(10));
        assert!(!detection.within_backfill_window(5));
        assert!(detection.within_backfill_window(10));
        assert!(detection.within_backfill_window(30));
    }
}
