//! Configuration module for Docsite-Indexer
//!
//! This module handles loading and parsing the line-oriented index
//! configuration format, plus the per-host credential table used for
//! sitemaps behind HTTP Basic auth.
//!
//! # Example
//!
//! ```no_run
//! use docsite_indexer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("index.conf")).unwrap();
//! println!("Indexing into: {}", config.index_name);
//! ```

mod parser;
mod types;

// Re-export types
pub use types::{Config, CredentialMap, HostCredentials, DEFAULT_INDEX_NAME};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
