//! Static rule tables: weighted keyword matching for wildlife and
//! human-trafficking listing detection, plus shared exclusion and
//! context-modifier vocabulary (§4.2, §4.3).

pub mod context;
pub mod exclusion;
pub mod human_trafficking;
pub mod matcher;
pub mod trafficking_pattern;
pub mod wildlife;

pub use matcher::{table, RuleTable, WeightedTerm};
