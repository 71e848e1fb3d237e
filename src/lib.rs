//! locsync - translatable string extraction and synchronization
//!
//! locsync scans PHP and JavaScript sources for calls to the translation
//! functions (`t`, `pt`, `td`, `ptd`), keeps a registry of every string per
//! source, stores translations per locale and publishes a JavaScript client
//! library with the translated tables.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Localization engine (tokenizers, extraction, registry, storage)
//! - `mcp`: Model Context Protocol server implementation
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod mcp;
pub mod utils;
