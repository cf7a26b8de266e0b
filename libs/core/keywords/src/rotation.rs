//! Batch assignment and wrap semantics over a keyword corpus (§4.5).

use crate::corpus::{corpus_for, corpus_version};
use chrono::Utc;
use sentinel_domain_models::cursor::group_offset;
use sentinel_domain_models::{KeywordCursor, ThreatDomain};

/// Load (or synthesize fresh) state, then compute this invocation's
/// keyword batch, returning the batch alongside the cursor state that
/// should eventually be persisted once the batch finishes (§4.5).
///
/// A `corpus_version` mismatch against `existing` is treated exactly
/// like a missing cursor: `last_index` resets to zero.
pub fn start_batch(
    existing: Option<KeywordCursor>,
    domain: ThreatDomain,
    group_id: u32,
    batch_size: u32,
) -> (KeywordCursor, Vec<&'static str>) {
    let corpus = corpus_for(domain);
    let total = corpus.len() as u32;
    let version = corpus_version(domain);
    let batch_size = batch_size.clamp(1, 200);

    let mut cursor = match existing {
        Some(c) if c.corpus_version == version && c.total_keywords == total => c,
        Some(stale) => {
            tracing::warn!(
                group_id,
                old_version = %stale.corpus_version,
                new_version = %version,
                "keyword corpus changed since last run; resetting cursor to index 0"
            );
            KeywordCursor::fresh(version, total, group_id, batch_size)
        }
        None => KeywordCursor::fresh(version, total, group_id, batch_size),
    };
    cursor.batch_size = batch_size;

    if total == 0 {
        return (cursor, Vec::new());
    }

    // Wrap: a cursor at or past the end restarts at this group's
    // partition offset and records a completed cycle (§4.5).
    if cursor.last_index >= total {
        cursor.last_index = group_offset(group_id, batch_size, total);
        cursor.completed_cycles += 1;
    }

    let start = cursor.last_index as usize;
    let end = (start + batch_size as usize).min(corpus.len());
    let batch = corpus[start..end].to_vec();
    (cursor, batch)
}

/// Advance the cursor past `fully_processed` keywords of the batch
/// (§4.5, §4.8 step 5). `fully_processed` must be the length of the
/// *contiguous prefix* of the batch completed starting from its front
/// — not a raw count of however many keywords anywhere in the batch
/// happened to finish. Workers race, so a later keyword can complete
/// before an earlier one; advancing past an earlier, still-incomplete
/// keyword would skip it instead of re-scanning it next invocation.
pub fn advance(mut cursor: KeywordCursor, fully_processed: u32) -> KeywordCursor {
    let next = cursor.last_index.saturating_add(fully_processed.min(cursor.batch_size));
    cursor.last_index = next.min(cursor.total_keywords);
    cursor.last_run = Utc::now();
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_uses_group_offset() {
        let (cursor, batch) = start_batch(None, ThreatDomain::Wildlife, 2, 3);
        assert_eq!(cursor.last_index, group_offset(2, 3, cursor.total_keywords));
        assert!(batch.len() <= 3);
    }

    #[test]
    fn advance_then_wrap_bumps_completed_cycles() {
        let (cursor, batch) = start_batch(None, ThreatDomain::Wildlife, 1, cursor_total_for_test());
        let total = cursor.total_keywords;
        let advanced = advance(cursor, batch.len() as u32);
        assert_eq!(advanced.last_index, total);

        let (wrapped, _) = start_batch(Some(advanced), ThreatDomain::Wildlife, 1, total);
        assert_eq!(wrapped.completed_cycles, 1);
        assert_eq!(wrapped.last_index, group_offset(1, total, total));
    }

    #[test]
    fn version_mismatch_resets_to_zero() {
        let mut stale = KeywordCursor::fresh("stale-version".into(), 999, 1, 10);
        stale.last_index = 500;
        let (cursor, _) = start_batch(Some(stale), ThreatDomain::Wildlife, 1, 10);
        assert_eq!(cursor.last_index, group_offset(1, 10, cursor.total_keywords));
    }

    fn cursor_total_for_test() -> u32 {
        corpus_for(ThreatDomain::Wildlife).len() as u32
    }
}
