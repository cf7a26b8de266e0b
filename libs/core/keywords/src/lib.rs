//! Keyword Rotation & Coverage Engine (C5).
//!
//! Compiles the per-domain keyword corpus, assigns each worker group a
//! disjoint covering batch per invocation, and persists the resulting
//! cursor atomically between invocations (§4.5).

pub mod corpus;
pub mod errors;
pub mod rotation;
pub mod store;

pub use corpus::{corpus_for, corpus_version};
pub use errors::CursorError;
pub use rotation::{advance, start_batch};
