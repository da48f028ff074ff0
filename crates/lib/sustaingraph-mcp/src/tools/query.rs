use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use sustaingraph_core::store::GraphStore;

use crate::{SustainGraphMcp, helpers};

/// Parameters for the regional SDG profile.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RegionalProfileParams {
    /// Eurostat/NUTS or ISO alpha-3 area code, e.g. `EL30`.
    pub geo_id: String,
    /// Goal identifier, e.g. `SDG_7`.
    pub sdg_id: String,
}

/// Parameters for the peer region search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PeerRegionsParams {
    pub geo_id: String,
    pub sdg_id: String,
}

/// Parameters for an indicator trend.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct IndicatorTrendParams {
    /// Full series code, e.g. `sdg_07_40`.
    pub indicator_id: String,
    pub geo_id: String,
}

/// Parameters for the SDG to policy mapping.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PolicyMappingParams {
    pub sdg_id: String,
    pub geo_id: String,
}

#[tool_router(router = tool_router_query, vis = "pub")]
impl<S: GraphStore> SustainGraphMcp<S> {
    #[tool(description = "Latest observations for a region and SDG, newest first (at most 30).")]
    async fn get_regional_sdg_profile(
        &self,
        Parameters(params): Parameters<RegionalProfileParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let profile = self
            .control()
            .regional_sdg_profile(&params.geo_id, &params.sdg_id)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(profile)?]))
    }

    #[tool(description = "Regions sharing at least two SDG series with the target region (at most 5).")]
    async fn find_peer_regions(
        &self,
        Parameters(params): Parameters<PeerRegionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let peers = self
            .control()
            .peer_regions(&params.geo_id, &params.sdg_id)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(peers)?]))
    }

    #[tool(description = "Time series of one indicator for one region, oldest first.")]
    async fn get_indicator_trend(
        &self,
        Parameters(params): Parameters<IndicatorTrendParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let trend = self
            .control()
            .indicator_trend(&params.indicator_id, &params.geo_id)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(trend)?]))
    }

    #[tool(description = "Policy frameworks and up to three policy areas each (at most 10).")]
    async fn map_sdg_to_policy(
        &self,
        Parameters(params): Parameters<PolicyMappingParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let mapping = self
            .control()
            .sdg_policy_mapping(&params.sdg_id, &params.geo_id)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(mapping)?]))
    }
}
