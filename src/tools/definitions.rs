//! Tool names, descriptions and JSON input schemas.

use schemars::{schema_for, JsonSchema};
use serde::Serialize;
use serde_json::{json, Value};

use super::analysis::AnalysisParams;
use super::content::RegionParams;
use super::leaderboard::{LeaderboardParams, PositionParams};
use super::matches::MatchParams;
use super::player::{LifetimeParams, PagedPlayerParams, PlayerParams};
use super::SetApiKeyParams;

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    fn new(name: &'static str, description: &'static str, input_schema: Value) -> Self {
        Self {
            name,
            description,
            input_schema,
        }
    }
}

/// Input schema derived from a tool's argument type.
fn input_schema<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }));
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
        map.remove("title");
    }
    schema
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "get_account_details",
            "Get account details for a Valorant player: PUUID, account level, player card and region.",
            input_schema::<PlayerParams>(),
        ),
        ToolDefinition::new(
            "get_match_history_by_name",
            "Get recent matches across all modes with the player's agent, K/D/A and score.",
            input_schema::<PagedPlayerParams>(),
        ),
        ToolDefinition::new(
            "get_match_details",
            "Get one match with every player's stats.",
            input_schema::<MatchParams>(),
        ),
        ToolDefinition::new(
            "get_mmr_details_by_name",
            "Get the player's current rank, elo, RR and last RR change.",
            input_schema::<PlayerParams>(),
        ),
        ToolDefinition::new(
            "get_mmr_history_by_name",
            "Get rank history with match ids, maps and RR changes, plus a rank progression summary.",
            input_schema::<PagedPlayerParams>(),
        ),
        ToolDefinition::new(
            "get_lifetime_matches_by_name",
            "Get lifetime match statistics and a page of the lifetime match list.",
            input_schema::<LifetimeParams>(),
        ),
        ToolDefinition::new(
            "get_leaderboard",
            "Get the competitive leaderboard for a region and season.",
            input_schema::<LeaderboardParams>(),
        ),
        ToolDefinition::new(
            "get_content",
            "Get game content: agents (with roles) and maps.",
            input_schema::<RegionParams>(),
        ),
        ToolDefinition::new(
            "get_status",
            "Get service status: maintenances and incidents.",
            input_schema::<RegionParams>(),
        ),
        ToolDefinition::new(
            "set_api_key",
            "Set the HenrikDev API key used for all requests.",
            input_schema::<SetApiKeyParams>(),
        ),
        ToolDefinition::new(
            "get_detailed_competitive_analysis",
            "Correlate rank history with full match details: per-match performance and RR change, \
             overall stats, agent and map breakdowns.",
            input_schema::<AnalysisParams>(),
        ),
        ToolDefinition::new(
            "find_leaderboard_position",
            "Find the player's leaderboard position and nearby players (Immortal 3+ only); \
             falls back to their current rank when not listed.",
            input_schema::<PositionParams>(),
        ),
    ]
}
