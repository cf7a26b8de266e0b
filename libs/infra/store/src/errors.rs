//! Persistence failure taxonomy (§4.7, §7).
//!
//! `StoreError` only ever surfaces for the two error cases the spec
//! distinguishes from a plain duplicate: a transient failure the
//! adapter already retried and gave up on, and a fatal failure the
//! Orchestrator must stop the whole invocation for.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Network/5xx from the store, retried up to 3 times with
    /// exponential backoff and still failing. Non-fatal: the
    /// Orchestrator records the failure and continues (§4.7).
    #[error("persistence transient failure after retries: {0}")]
    Transient(String),

    /// Auth failure or schema mismatch. Fatal: the Orchestrator exits
    /// 20 (§6 exit codes).
    #[error("persistence fatal failure: {0}")]
    Fatal(String),
}
