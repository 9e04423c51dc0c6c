//! strsync - translation key extraction and catalog synchronization
//!
//! strsync scans source text for string literals passed to a marker function
//! (`_i("...")` by default), then merges the keys into every JSON locale
//! catalog of a language directory. Existing translations are kept, new keys
//! get a placeholder value, and keys that are no longer used are dropped with
//! a warning.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `extract`: Key extraction from source lines
//! - `catalog`: Catalog merge, storage and synchronization
//! - `error`: Error types of the synchronization pipeline

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
