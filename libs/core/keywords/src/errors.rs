//! Cursor durability failures (§4.5, §7).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CursorError {
    #[error("failed to read keyword cursor at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode keyword cursor at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write keyword cursor at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
