//! Deduplication Cache (C6).
//!
//! A bounded, FIFO-evicting set of fingerprints consulted before
//! scoring and before persistence, so the worker pool doesn't re-score
//! or re-submit a listing it has already seen this run. The store
//! remains the authoritative uniqueness check (§4.6) — this cache only
//! avoids repeat work.

mod cache;
mod errors;
mod shared;
mod snapshot;

pub use cache::{DedupeCache, DEFAULT_CAPACITY};
pub use errors::SnapshotError;
pub use shared::SharedDedupeCache;
pub use snapshot::{load as load_snapshot, save as save_snapshot};
