//! Exclusion vocabulary (§4.2): terms and patterns identifying obvious
//! false positives.

use crate::matcher::{table, RuleTable, WeightedTerm};
use regex::Regex;
use std::sync::OnceLock;

/// Color/material modifiers, product-kind modifiers, and brand names
/// that strongly suggest a non-trafficking listing (replica jewelry,
/// toys, costumes).
pub static EXCLUSION_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "ivory colored", weight: 2, tag: "color_modifier" },
    WeightedTerm { pattern: "ivory color", weight: 2, tag: "color_modifier" },
    WeightedTerm { pattern: "faux ivory", weight: 2, tag: "material_modifier" },
    WeightedTerm { pattern: "toy elephant", weight: 2, tag: "product_kind" },
    WeightedTerm { pattern: "replica", weight: 2, tag: "product_kind" },
    WeightedTerm { pattern: "costume", weight: 2, tag: "product_kind" },
    WeightedTerm { pattern: "plush", weight: 1, tag: "product_kind" },
    WeightedTerm { pattern: "child safe", weight: 1, tag: "product_kind" },
    WeightedTerm { pattern: "stuffed animal", weight: 2, tag: "product_kind" },
    WeightedTerm { pattern: "resin carving", weight: 1, tag: "material_modifier" },
];

/// Licensed-service exclusions shared with the HT domain (§4.2) live
/// in `human_trafficking::LICENSED_SERVICE_TERMS`; they are context
/// modifiers rather than straight exclusion weight, so they're not
/// duplicated here.

static EXCLUSION_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn exclusion_table() -> &'static RuleTable {
    table(&EXCLUSION_CELL, EXCLUSION_TERMS)
}

static PRINT_NEAR_ANIMAL: OnceLock<Regex> = OnceLock::new();

/// "print" used as a pattern/fabric descriptor adjacent to an animal
/// name (e.g. "tiger print scarf") rather than the animal itself.
pub fn print_adjacent_to_animal(text: &str) -> bool {
    let re = PRINT_NEAR_ANIMAL.get_or_init(|| {
        Regex::new(r"(?i)\b(tiger|leopard|zebra|snake|elephant)\s+print\b|\bprint\s+(tiger|leopard|zebra|snake|elephant)\b")
            .expect("print-adjacent-to-animal regex failed to compile")
    });
    re.is_match(text)
}

/// Total exclusion weight for a listing's searchable text (§4.3 stage 1).
pub fn exclusion_weight(text: &str) -> i32 {
    let mut weight = exclusion_table().total_weight(text);
    if print_adjacent_to_animal(text) {
        weight += 3;
    }
    weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toy_elephant_listing_accumulates_exclusion_weight() {
        let text = "ivory colored toy elephant, plush, child safe";
        assert!(exclusion_weight(text) >= 2);
    }

    #[test]
    fn print_adjacent_to_animal_is_detected() {
        assert!(print_adjacent_to_animal("tiger print scarf for sale"));
        assert!(!print_adjacent_to_animal("elephant ivory tusk"));
    }
}
