//! Durable cursor read/write (§4.5, §6 "Persistent state layout").
//!
//! Readers tolerate a missing cursor (treated as fresh state); writers
//! never partially update — the write lands via a temp file followed
//! by a rename, so a reader never observes a half-written document.

use crate::errors::CursorError;
use sentinel_domain_models::{KeywordCursor, ThreatDomain};
use std::path::{Path, PathBuf};

/// Filename convention from §6: `<domain>_keyword_state_g<group>.json`.
pub fn cursor_path(state_dir: &Path, domain: ThreatDomain, group_id: u32) -> PathBuf {
    state_dir.join(format!("{}_keyword_state_g{}.json", domain.as_str(), group_id))
}

/// Load the persisted cursor for `(domain, group_id)`, or `None` if no
/// cursor file exists yet (a fresh group).
pub fn load(state_dir: &Path, domain: ThreatDomain, group_id: u32) -> Result<Option<KeywordCursor>, CursorError> {
    let path = cursor_path(state_dir, domain, group_id);
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path).map_err(|source| CursorError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let cursor = serde_json::from_str(&raw).map_err(|source| CursorError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(cursor))
}

/// Persist `cursor` atomically: write to a sibling `.tmp` path, then
/// rename onto the final path (§4.5, §9 "JSON state files").
pub fn save(state_dir: &Path, domain: ThreatDomain, cursor: &KeywordCursor) -> Result<(), CursorError> {
    std::fs::create_dir_all(state_dir).map_err(|source| CursorError::Write {
        path: state_dir.display().to_string(),
        source,
    })?;
    let path = cursor_path(state_dir, domain, cursor.group_id);
    let tmp_path = path.with_extension("json.tmp");
    let serialized = serde_json::to_vec_pretty(cursor).expect("KeywordCursor always serializes");
    std::fs::write(&tmp_path, &serialized).map_err(|source| CursorError::Write {
        path: tmp_path.display().to_string(),
        source,
    })?;
    std::fs::rename(&tmp_path, &path).map_err(|source| CursorError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cursor_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(dir.path(), ThreatDomain::Wildlife, 1).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = KeywordCursor::fresh("v1".into(), 100, 1, 20);
        save(dir.path(), ThreatDomain::Wildlife, &cursor).unwrap();
        let loaded = load(dir.path(), ThreatDomain::Wildlife, 1).unwrap().unwrap();
        assert_eq!(loaded, cursor);
    }

    #[test]
    fn save_leaves_no_tmp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = KeywordCursor::fresh("v1".into(), 100, 1, 20);
        save(dir.path(), ThreatDomain::Wildlife, &cursor).unwrap();
        let tmp = cursor_path(dir.path(), ThreatDomain::Wildlife, 1).with_extension("json.tmp");
        assert!(!tmp.exists());
    }
}
