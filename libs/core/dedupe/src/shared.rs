//! Thread-safe wrapper around [`DedupeCache`] for the worker pool's
//! hot path (§4.6: "a single mutex or a concurrent set; the hot path is
//! a single lookup + possibly a single insert").

use crate::cache::DedupeCache;
use sentinel_core_fingerprint::Fingerprint;
use std::sync::Mutex;

pub struct SharedDedupeCache {
    inner: Mutex<DedupeCache>,
}

impl SharedDedupeCache {
    pub fn new(cache: DedupeCache) -> SharedDedupeCache {
        SharedDedupeCache { inner: Mutex::new(cache) }
    }

    /// Check-and-insert in one lock acquisition. Returns `true` if the
    /// fingerprint was new (caller should proceed to score/persist),
    /// `false` if it was already seen (caller should count a "seen"
    /// hit and drop the listing).
    pub fn check_and_insert(&self, fingerprint: Fingerprint) -> bool {
        self.inner.lock().expect("dedupe cache mutex poisoned").insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("dedupe cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the current membership in insertion order, for flushing
    /// to disk at the end of a run.
    pub fn snapshot_entries(&self) -> Vec<Fingerprint> {
        self.inner.lock().expect("dedupe cache mutex poisoned").iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core_fingerprint::fingerprint;

    #[test]
    fn check_and_insert_reports_seen_on_second_call() {
        let shared = SharedDedupeCache::new(DedupeCache::new(10));
        let fp = fingerprint("https://x.test/item/1");
        assert!(shared.check_and_insert(fp));
        assert!(!shared.check_and_insert(fp));
        assert_eq!(shared.len(), 1);
    }
}
