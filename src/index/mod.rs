//! Search index module
//!
//! This module owns everything that talks to the backing search engine:
//! - Index lifecycle (create with mapping, delete-if-exists, exists)
//! - Idempotent document upsert keyed by content-addressed IDs
//! - The incremental guard that decides skip vs. reindex

mod client;
mod guard;
mod mapping;

pub use client::{IndexedDocument, SearchIndexClient, StoredDocument};
pub use guard::IncrementalGuard;
pub use mapping::AnalyzerProfile;
