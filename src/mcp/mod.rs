//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the localization context to AI assistants over stdio: listing
//! locales and sources, reading and setting translations, scanning and
//! publishing.
//!
//! ## Module Structure
//!
//! - `helpers`: Project loading, error mapping and pagination
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameter and result types

mod helpers;
mod server;
pub mod types;

pub use server::{LocsyncMcpServer, run_server};
