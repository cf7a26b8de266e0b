//! Human-trafficking "safe" keyword set and indicator categories (§4.2).
//!
//! Per the spec's resolution of its own open question: the source
//! carries both an expansive HT list and a narrower "safe" set with
//! false-positive exclusions; this crate only compiles the safe set.
//! It deliberately omits ambiguous single tokens ("restaurant", "hotel
//! spa", "medical massage") that produce high false-positive rates,
//! keeping multi-token phrases and compound-indicator tokens instead.

use crate::matcher::{table, RuleTable, WeightedTerm};
use std::sync::OnceLock;

/// Broad HT indicator corpus used for category detection (§4.3 stage 2).
pub static HT_INDICATOR_KEYWORDS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "new in town", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "24/7 available", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "housing provided", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "cash only", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "no experience needed", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "travel opportunities", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "flexible schedule guaranteed income", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "outcall available 24/7", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "new talent arriving weekly", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "incall only no advertising", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "visiting for a few days only", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "room and board included", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "all expenses covered by employer", weight: 1, tag: "indicator" },
    WeightedTerm { pattern: "transportation provided daily", weight: 1, tag: "indicator" },
];

/// Age-concern tokens (§4.2). A single match here is sufficient to
/// force `requires_human_review = true` and `level >= HIGH` (§4.3
/// stage 5).
pub static AGE_CONCERN_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "young new in town", weight: 40, tag: "age_concern" },
    WeightedTerm { pattern: "fresh young talent", weight: 35, tag: "age_concern" },
    WeightedTerm { pattern: "barely legal", weight: 45, tag: "age_concern" },
    WeightedTerm { pattern: "just turned 18", weight: 40, tag: "age_concern" },
    WeightedTerm { pattern: "brand new to the industry", weight: 30, tag: "age_concern" },
    WeightedTerm { pattern: "petite schoolgirl look", weight: 45, tag: "age_concern" },
];

/// Control-pattern tokens: language describing restricted movement,
/// confiscated documents, or managed schedules.
pub static CONTROL_PATTERN_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "housing provided no id needed", weight: 30, tag: "control_pattern" },
    WeightedTerm { pattern: "passport held by employer", weight: 35, tag: "control_pattern" },
    WeightedTerm { pattern: "live in required", weight: 15, tag: "control_pattern" },
    WeightedTerm { pattern: "managed schedule 24/7", weight: 20, tag: "control_pattern" },
];

/// Financial-exploitation tokens: debt bondage, confiscated earnings,
/// recruitment-fee language.
pub static FINANCIAL_EXPLOITATION_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "pay off your debt", weight: 30, tag: "financial_exploitation" },
    WeightedTerm { pattern: "recruitment fee required", weight: 25, tag: "financial_exploitation" },
    WeightedTerm { pattern: "earnings held until", weight: 28, tag: "financial_exploitation" },
    WeightedTerm { pattern: "guaranteed income no questions", weight: 20, tag: "financial_exploitation" },
];

/// Coded-language tokens: euphemisms common in trafficking ads.
pub static CODED_LANGUAGE_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "private buyer only", weight: 15, tag: "coded_language" },
    WeightedTerm { pattern: "discreet location", weight: 15, tag: "coded_language" },
    WeightedTerm { pattern: "no questions asked", weight: 18, tag: "coded_language" },
    WeightedTerm { pattern: "full service", weight: 10, tag: "coded_language" },
];

/// Licensed-service exclusions: phrases that, when present, reduce
/// confidence in a HT read (fed into the context-modifier stage, not
/// this crate's weight accumulation — see `context::POSITIVE_CONTEXT`).
pub static LICENSED_SERVICE_TERMS: &[&str] = &[
    "licensed massage therapist",
    "licensed therapist",
    "spa license number",
    "board certified",
];

static HT_INDICATOR_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn ht_indicator_table() -> &'static RuleTable {
    table(&HT_INDICATOR_CELL, HT_INDICATOR_KEYWORDS)
}

static AGE_CONCERN_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn age_concern_table() -> &'static RuleTable {
    table(&AGE_CONCERN_CELL, AGE_CONCERN_TERMS)
}

static CONTROL_PATTERN_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn control_pattern_table() -> &'static RuleTable {
    table(&CONTROL_PATTERN_CELL, CONTROL_PATTERN_TERMS)
}

static FINANCIAL_EXPLOITATION_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn financial_exploitation_table() -> &'static RuleTable {
    table(&FINANCIAL_EXPLOITATION_CELL, FINANCIAL_EXPLOITATION_TERMS)
}

static CODED_LANGUAGE_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn coded_language_table() -> &'static RuleTable {
    table(&CODED_LANGUAGE_CELL, CODED_LANGUAGE_TERMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_concern_matches_force_candidate_flag() {
        assert!(age_concern_table().is_match("Young new in town, 24/7, cash only, housing provided"));
    }

    #[test]
    fn safe_set_excludes_ambiguous_single_tokens() {
        // "restaurant" and "hotel spa" alone must not appear in any HT table.
        let haystacks = [
            HT_INDICATOR_KEYWORDS.iter().map(|t| t.pattern).collect::<Vec<_>>(),
            AGE_CONCERN_TERMS.iter().map(|t| t.pattern).collect(),
            CONTROL_PATTERN_TERMS.iter().map(|t| t.pattern).collect(),
        ];
        for table in haystacks {
            assert!(!table.contains(&"restaurant"));
            assert!(!table.contains(&"hotel spa"));
        }
    }
}
