//! Persistence Adapter (C7): exactly-once REST/HTTPS writes of
//! `Detection`s to the shared store, keyed on `listing_url`.

pub mod client;
pub mod errors;

pub use client::{InsertOutcome, StoreClient};
pub use errors::StoreError;
