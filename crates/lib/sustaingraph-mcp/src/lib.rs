//! MCP server implementation for SustainGraph.
//!
//! This crate wires the control plane's read-only query tools into rmcp tool
//! handlers and exposes them over stdio or streamable HTTP.

mod helpers;
mod tools;
pub mod server;

use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use sustaingraph_core::control::SdgControlPlane;
use sustaingraph_core::store::GraphStore;

pub use tools::query::{
    IndicatorTrendParams, PeerRegionsParams, PolicyMappingParams, RegionalProfileParams,
};

const SERVER_INSTRUCTIONS: &str = r"SustainGraph exposes read-only tools over a knowledge graph of SDG indicators, regions, observations, and policy frameworks.

Identifiers:
- `geo_id` is a Eurostat/NUTS code (e.g. `EL30`) or an ISO alpha-3 code (e.g. `GRC`).
- `sdg_id` names a goal, e.g. `SDG_7`. It is normalized to the series prefix `sdg_07`.
- `indicator_id` is a full series code, e.g. `sdg_07_40`.

Tools:
- `get_regional_sdg_profile(geo_id, sdg_id)`: latest observations for a region and goal, newest first, at most 30.
- `find_peer_regions(geo_id, sdg_id)`: regions sharing at least two of the target's series for a goal, at most 5.
- `get_indicator_trend(indicator_id, geo_id)`: every observation of a series for a region, oldest first.
- `map_sdg_to_policy(sdg_id, geo_id)`: policy frameworks with up to three policy areas, at most 10. Not yet filtered by goal.

Every tool returns `{result, query, metadata}` where `query` is the Cypher that ran and `metadata.nodes` lists the node labels it touched.
Use `help` for the command list. `health` returns `ok`.";

/// MCP server wrapper around the control plane and tool routers.
pub struct SustainGraphMcp<S: GraphStore> {
    tool_router: ToolRouter<Self>,
    control: SdgControlPlane<S>,
}

impl<S: GraphStore> Clone for SustainGraphMcp<S> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<S: GraphStore> SustainGraphMcp<S> {
    #[must_use]
    pub fn new(control: SdgControlPlane<S>) -> Self {
        let tool_router =
            Self::tool_router_core() + Self::tool_router_query() + Self::tool_router_context();
        Self {
            tool_router,
            control,
        }
    }

    pub(crate) const fn control(&self) -> &SdgControlPlane<S> {
        &self.control
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<S: GraphStore> SustainGraphMcp<S> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl<S: GraphStore> ServerHandler for SustainGraphMcp<S> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
