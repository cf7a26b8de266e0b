//! Durable progress state for the keyword rotation engine (§3, §4.5).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which rule tables and keyword corpus a run selects (§6 `threat_domain`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatDomain {
    Wildlife,
    HumanTrafficking,
}

impl ThreatDomain {
    pub fn as_str(self) -> &'static str {
        match self {
            ThreatDomain::Wildlife => "wildlife",
            ThreatDomain::HumanTrafficking => "human_trafficking",
        }
    }

    pub fn parse(tag: &str) -> Option<ThreatDomain> {
        match tag.trim().to_lowercase().as_str() {
            "wildlife" => Some(ThreatDomain::Wildlife),
            "human_trafficking" | "ht" => Some(ThreatDomain::HumanTrafficking),
            _ => None,
        }
    }
}

/// One worker-group's durable pointer into the keyword corpus (§3).
///
/// Mutated exactly once per completed invocation and never destroyed.
/// A mismatched `corpus_version` (the compiled keyword table changed)
/// resets `last_index` to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCursor {
    pub corpus_version: String,
    pub last_index: u32,
    pub total_keywords: u32,
    pub completed_cycles: u32,
    pub last_run: DateTime<Utc>,
    pub group_id: u32,
    pub batch_size: u32,
    pub partition_offset: u32,
}

impl KeywordCursor {
    /// Fresh state for a group that has never run, or whose persisted
    /// cursor was discarded for a corpus-version mismatch (§4.5).
    pub fn fresh(corpus_version: String, total_keywords: u32, group_id: u32, batch_size: u32) -> KeywordCursor {
        let partition_offset = group_offset(group_id, batch_size, total_keywords);
        KeywordCursor {
            corpus_version,
            last_index: partition_offset,
            total_keywords,
            completed_cycles: 0,
            last_run: Utc::now(),
            group_id,
            batch_size,
            partition_offset,
        }
    }
}

/// `group_offset(g) = ((g-1) * B) mod N` (§4.5) — guarantees disjoint
/// initial windows across groups (P4).
pub fn group_offset(group_id: u32, batch_size: u32, corpus_size: u32) -> u32 {
    if corpus_size == 0 {
        return 0;
    }
    (((group_id.saturating_sub(1)) as u64 * batch_size as u64) % corpus_size as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_partitioning_for_four_groups() {
        // P4: G groups with batch_size B and corpus size N >= G*B have
        // pairwise disjoint initial batches.
        let (n, b, g) = (1000u32, 50u32, 4u32);
        let mut seen = std::collections::HashSet::new();
        for group_id in 1..=g {
            let offset = group_offset(group_id, b, n);
            for idx in offset..offset + b {
                assert!(seen.insert(idx), "index {idx} claimed by more than one group");
            }
        }
        assert_eq!(seen.len(), (g * b) as usize);
    }
}
