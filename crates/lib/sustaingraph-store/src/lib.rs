//! Graph data model and schema constants for SustainGraph.
//!
//! This crate defines the canonical record shapes shared by the reshape
//! engine, the batch loader, and the query tools.

pub mod models;
pub mod schema;

pub use models::*;
