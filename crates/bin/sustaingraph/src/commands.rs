use serde_json::Value;
use sustaingraph_core::control::SdgControlPlane;
use sustaingraph_core::provider::{EurostatClient, TabularProvider, TsvDirectoryProvider};
use sustaingraph_core::store::GraphStore;
use sustaingraph_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;

use crate::config::{CommandConfig, EurostatSource};

type CommandResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub async fn run<S: GraphStore>(control: SdgControlPlane<S>, command: CommandConfig) -> CommandResult {
    match command {
        CommandConfig::Serve(serve) => {
            if serve.enable_stdio {
                serve_stdio(control).await
            } else {
                let config = McpHttpServerConfig::new(serve.mcp_http_addr)
                    .with_stateful_mode(serve.stateful_mode);
                serve_streamable_http(control, config).await
            }
        }
        CommandConfig::LoadEurostat { source, request } => {
            let provider: Box<dyn TabularProvider> = match source {
                EurostatSource::Api => Box::new(EurostatClient::default()),
                EurostatSource::Directory(root) => Box::new(TsvDirectoryProvider::new(root)),
            };
            let report = control.ingest_indicator(provider.as_ref(), request).await?;
            info!(
                code = %report.code,
                applicable = report.applicable,
                observations = report.load.as_ref().map_or(0, |load| load.observation_count),
                "eurostat load finished"
            );
            print_report(&serde_json::to_value(&report)?)
        }
        CommandConfig::LoadHappiness(request) => {
            let report = control.ingest_happiness(request).await?;
            info!(
                year = %report.year,
                series = report.series.len(),
                rows = report.preprocess.rows_kept,
                "happiness load finished"
            );
            print_report(&serde_json::to_value(&report)?)
        }
    }
}

/// Writes the load report to stdout as pretty JSON.
fn print_report(report: &Value) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
