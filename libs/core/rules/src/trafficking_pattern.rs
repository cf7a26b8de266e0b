//! Trafficking-pattern language common to both threat domains (§4.3
//! stage 4): discretion, urgency, and authenticity claims.

use crate::matcher::{table, RuleTable, WeightedTerm};
use std::sync::OnceLock;

pub static DISCRETION_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "discreet", weight: 4, tag: "discretion" },
    WeightedTerm { pattern: "private buyer only", weight: 6, tag: "discretion" },
    WeightedTerm { pattern: "serious inquiries only", weight: 2, tag: "discretion" },
];

pub static URGENCY_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "must sell today", weight: 5, tag: "urgency" },
    WeightedTerm { pattern: "act fast", weight: 3, tag: "urgency" },
    WeightedTerm { pattern: "wont last", weight: 2, tag: "urgency" },
];

pub static AUTHENTICITY_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "100% real", weight: 5, tag: "authenticity" },
    WeightedTerm { pattern: "guaranteed authentic", weight: 5, tag: "authenticity" },
    WeightedTerm { pattern: "genuine article", weight: 4, tag: "authenticity" },
];

static DISCRETION_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn discretion_table() -> &'static RuleTable {
    table(&DISCRETION_CELL, DISCRETION_TERMS)
}

static URGENCY_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn urgency_table() -> &'static RuleTable {
    table(&URGENCY_CELL, URGENCY_TERMS)
}

static AUTHENTICITY_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn authenticity_table() -> &'static RuleTable {
    table(&AUTHENTICITY_CELL, AUTHENTICITY_TERMS)
}

/// Sum of discretion + urgency + authenticity + source-region weight
/// (§4.3 stage 4, "both paths").
pub fn trafficking_pattern_weight(text: &str) -> i32 {
    discretion_table().total_weight(text)
        + urgency_table().total_weight(text)
        + authenticity_table().total_weight(text)
        + crate::wildlife::source_region_table().total_weight(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_across_all_four_pattern_families() {
        let text = "discreet sale, must sell today, 100% real, direct from africa";
        assert!(trafficking_pattern_weight(text) > 0);
    }
}
