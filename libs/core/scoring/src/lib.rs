//! Eleven-stage threat scoring pipeline (C3): turns a normalized
//! listing and scan domain into a `ThreatAssessment`.

pub mod pipeline;

pub use pipeline::{assess, to_detection};
