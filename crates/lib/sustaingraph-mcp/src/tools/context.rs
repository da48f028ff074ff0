use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use sustaingraph_core::store::GraphStore;

use crate::SustainGraphMcp;

/// Payload listing the MCP commands this server exposes.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List the MCP commands this server exposes.".to_string(),
                "health - Returns 'ok' when the server is up.".to_string(),
                "get_regional_sdg_profile - Latest observations for a region (geo_id) and goal (sdg_id)."
                    .to_string(),
                "find_peer_regions - Regions sharing at least two series with geo_id for a goal."
                    .to_string(),
                "get_indicator_trend - Time series of one indicator (indicator_id) for a region."
                    .to_string(),
                "map_sdg_to_policy - Policy frameworks and their policy areas for a goal and region."
                    .to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl<S: GraphStore> SustainGraphMcp<S> {
    #[tool(description = "List the MCP commands this server exposes.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}
