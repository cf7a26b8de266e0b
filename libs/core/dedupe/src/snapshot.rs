//! Advisory on-disk snapshot of the dedupe cache (§4.6, §6): a JSON
//! document of hex fingerprints plus a timestamp, loaded at start and
//! flushed at end. The store remains the authoritative uniqueness
//! check — losing or corrupting this file only costs a few avoidable
//! re-scores, never a correctness bug.

use crate::cache::DedupeCache;
use crate::errors::SnapshotError;
use chrono::{DateTime, Utc};
use sentinel_core_fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    fingerprints: Vec<String>,
    updated_at: DateTime<Utc>,
}

/// Load a snapshot from `path`, if present. A missing file is not an
/// error — the cache simply starts empty.
pub fn load(path: &Path, capacity: usize) -> Result<Option<DedupeCache>, SnapshotError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SnapshotError::Read { path: path.to_path_buf(), source }),
    };

    let document: SnapshotDocument =
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Decode { path: path.to_path_buf(), source })?;

    let fingerprints = document
        .fingerprints
        .iter()
        .filter_map(|hex| serde_json::from_value(serde_json::Value::String(hex.clone())).ok())
        .collect::<Vec<Fingerprint>>();

    Ok(Some(DedupeCache::from_ordered(capacity, fingerprints)))
}

/// Write a snapshot atomically: serialize, write to a sibling `.tmp`
/// path, then rename onto `path`, so a crash mid-write never leaves a
/// half-written file observable at `path`.
pub fn save(path: &Path, cache: &DedupeCache) -> Result<(), SnapshotError> {
    let document = SnapshotDocument {
        fingerprints: cache.iter().map(Fingerprint::to_hex).collect(),
        updated_at: Utc::now(),
    };

    let serialized = serde_json::to_string_pretty(&document).expect("snapshot document always serializes");

    let tmp_path = tmp_path_for(path);
    std::fs::write(&tmp_path, serialized).map_err(|source| SnapshotError::Write { path: tmp_path.clone(), source })?;
    std::fs::rename(&tmp_path, path).map_err(|source| SnapshotError::Write { path: path.to_path_buf(), source })?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core_fingerprint::fingerprint;

    #[test]
    fn missing_snapshot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(load(&path, 200_000).unwrap().is_none());
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dedupe_cache.json");

        let mut cache = DedupeCache::new(200_000);
        let fp = fingerprint("https://x.test/item/1");
        cache.insert(fp);

        save(&path, &cache).unwrap();
        let reloaded = load(&path, 200_000).unwrap().unwrap();
        assert!(reloaded.contains(&fp));
    }

    #[test]
    fn save_leaves_no_tmp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dedupe_cache.json");
        save(&path, &DedupeCache::new(200_000)).unwrap();
        assert!(!tmp_path_for(&path).exists());
    }
}
