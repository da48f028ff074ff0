//! Core services for SustainGraph.
//!
//! This crate reshapes wide statistical tables into the graph's observation
//! model, loads them into Neo4j in bounded batches, resolves country names for
//! survey data, and runs the read-only query tools exposed over MCP.

pub mod control;
pub mod country;
pub mod provider;
pub mod reshape;
pub mod store;
