//! MCP tool modules.
//!
//! Graph queries live in `query`; `context` carries the help listing.

pub mod query;
mod context;
