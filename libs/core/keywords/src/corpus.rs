//! Compiled keyword corpus per threat domain (§4.2, §4.5).
//!
//! The rotation engine cycles through the same multilingual keyword
//! strings the scorer's rule tables already match against (§4.2's
//! tables and the scanner's `(platform, keyword)` work queue name the
//! same corpus from two different angles) — so the corpus here is
//! built directly from `sentinel-core-rules`'s static tables rather
//! than a second, independently maintained keyword list.

use sentinel_core_rules::{human_trafficking, wildlife};
use sentinel_domain_models::ThreatDomain;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// The ordered keyword corpus for one threat domain.
///
/// Ordering is stable (lexicographic, via `BTreeSet`) so that
/// `last_index` means the same thing across process restarts as long
/// as the compiled tables don't change — and when they do change,
/// [`corpus_version`] changes with them, which is exactly the signal
/// the cursor uses to reset (§4.5).
pub fn corpus_for(domain: ThreatDomain) -> Vec<&'static str> {
    let mut terms: BTreeSet<&'static str> = BTreeSet::new();
    match domain {
        ThreatDomain::Wildlife => {
            for t in wildlife::WILDLIFE_INDICATOR_KEYWORDS {
                terms.insert(t.pattern);
            }
            for t in wildlife::SPECIES_TABLE {
                terms.insert(t.pattern);
            }
            for t in wildlife::PRODUCT_TYPE_TERMS {
                terms.insert(t.pattern);
            }
        }
        ThreatDomain::HumanTrafficking => {
            for t in human_trafficking::HT_INDICATOR_KEYWORDS {
                terms.insert(t.pattern);
            }
            for t in human_trafficking::AGE_CONCERN_TERMS {
                terms.insert(t.pattern);
            }
            for t in human_trafficking::CONTROL_PATTERN_TERMS {
                terms.insert(t.pattern);
            }
            for t in human_trafficking::FINANCIAL_EXPLOITATION_TERMS {
                terms.insert(t.pattern);
            }
            for t in human_trafficking::CODED_LANGUAGE_TERMS {
                terms.insert(t.pattern);
            }
        }
    }
    terms.into_iter().collect()
}

/// A digest of the compiled keyword table, used as `corpus_version`
/// (§4.5). A mismatch against a persisted cursor's `corpus_version`
/// means the table changed since that cursor was written, and the
/// cursor resets to `last_index = 0`.
pub fn corpus_version(domain: ThreatDomain) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_str().as_bytes());
    for term in corpus_for(domain) {
        hasher.update(b"\0");
        hasher.update(term.as_bytes());
    }
    hex::encode(&hasher.finalize()[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_version_is_deterministic() {
        assert_eq!(corpus_version(ThreatDomain::Wildlife), corpus_version(ThreatDomain::Wildlife));
    }

    #[test]
    fn domains_have_distinct_versions_and_nonempty_corpora() {
        assert_ne!(corpus_version(ThreatDomain::Wildlife), corpus_version(ThreatDomain::HumanTrafficking));
        assert!(!corpus_for(ThreatDomain::Wildlife).is_empty());
        assert!(!corpus_for(ThreatDomain::HumanTrafficking).is_empty());
    }

    #[test]
    fn corpus_has_no_duplicate_entries() {
        let corpus = corpus_for(ThreatDomain::Wildlife);
        let unique: BTreeSet<_> = corpus.iter().collect();
        assert_eq!(corpus.len(), unique.len());
    }
}
