//! A pattern → (weight, tag) table compiled once into an Aho-Corasick
//! automaton (§4.2). Every rule table in this crate is read-only after
//! the first lookup, matching the concurrency model's requirement that
//! rule tables be lock-free (§5).

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::collections::HashSet;
use std::sync::OnceLock;

/// One entry in a static rule table: the surface pattern, its weight
/// contribution, and an advisory tag (category, language, etc.).
#[derive(Debug, Clone, Copy)]
pub struct WeightedTerm {
    pub pattern: &'static str,
    pub weight: i32,
    pub tag: &'static str,
}

/// A compiled table, ready for repeated lookups.
pub struct RuleTable {
    automaton: AhoCorasick,
    terms: &'static [WeightedTerm],
}

impl RuleTable {
    fn build(terms: &'static [WeightedTerm]) -> RuleTable {
        let patterns: Vec<&str> = terms.iter().map(|t| t.pattern).collect();
        let automaton = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostFirst)
            .build(&patterns)
            .expect("rule table pattern set failed to compile");
        RuleTable { automaton, terms }
    }

    /// All distinct terms that matched anywhere in `text`, deduplicated
    /// by pattern index so a repeated phrase only counts once.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a WeightedTerm> {
        let mut seen = HashSet::new();
        self.automaton
            .find_iter(text)
            .filter_map(|m| {
                let idx = m.pattern().as_usize();
                if seen.insert(idx) {
                    self.terms.get(idx)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Sum of weights across distinct matches.
    pub fn total_weight(&self, text: &str) -> i32 {
        self.matches(text).iter().map(|t| t.weight).sum()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.automaton.is_match(text)
    }
}

/// Lazily compile a table behind a `OnceLock`, keyed by the static
/// slice's address via a module-level static — callers declare one
/// `OnceLock<RuleTable>` per table and call this from an accessor fn.
pub fn table(cell: &'static OnceLock<RuleTable>, terms: &'static [WeightedTerm]) -> &'static RuleTable {
    cell.get_or_init(|| RuleTable::build(terms))
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_TERMS: &[WeightedTerm] = &[
        WeightedTerm { pattern: "ivory", weight: 10, tag: "wildlife" },
        WeightedTerm { pattern: "tiger bone", weight: 30, tag: "wildlife" },
    ];
    static TEST_CELL: OnceLock<RuleTable> = OnceLock::new();

    #[test]
    fn matches_dedupe_and_sum_weights() {
        let t = table(&TEST_CELL, TEST_TERMS);
        assert_eq!(t.total_weight("ivory ivory tiger bone carving"), 40);
    }

    #[test]
    fn no_match_yields_zero_weight() {
        let t = table(&TEST_CELL, TEST_TERMS);
        assert_eq!(t.total_weight("plain wooden chair"), 0);
    }
}
