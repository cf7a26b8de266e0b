//! Error taxonomy for the dedupe cache's optional disk snapshot (§4.6).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read dedupe snapshot at {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to decode dedupe snapshot at {path}: {source}")]
    Decode { path: PathBuf, source: serde_json::Error },

    #[error("failed to write dedupe snapshot at {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}
