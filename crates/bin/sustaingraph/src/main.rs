//! Entry point for the SustainGraph loader and MCP server.
//!
//! Loads `.env`, parses configuration, connects to Neo4j once, and runs the
//! selected subcommand against the shared control plane.

mod commands;
mod config;

use sustaingraph_core::control::SdgControlPlane;
use sustaingraph_core::store::Neo4jGraphStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SustainGraphConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = SustainGraphConfig::from_args()?;
    info!(uri = %config.neo4j.uri, "connecting to neo4j");
    let store = Neo4jGraphStore::connect(&config.neo4j).await?;
    let control = SdgControlPlane::new(store);
    commands::run(control, config.command).await
}
