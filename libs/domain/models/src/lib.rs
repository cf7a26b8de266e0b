//! Shared domain types for the Sentinel Scan crawler.
//!
//! Every type here is a closed record: optional fields use `Option<T>`
//! rather than open maps, per the project's re-architecture guidance.
//! Parsers (in `sentinel-infra-scanners`) are the only code that
//! constructs a `Listing`; the scorer and persistence adapter only
//! ever consume one.

pub mod platform;
pub mod listing;
pub mod detection;
pub mod cursor;

pub use platform::Platform;
pub use listing::{Listing, Price};
pub use detection::{Detection, ThreatAssessment, ThreatCategory, ThreatLevel};
pub use cursor::{KeywordCursor, ThreatDomain};
