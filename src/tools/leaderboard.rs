//! Leaderboard listing and position search.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{default_region, default_season, respond, ToolError};
use crate::calculate;
use crate::models::LeaderboardEntry;
use crate::upstream::UpstreamClient;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LeaderboardParams {
    /// Region code (ap, na, eu, kr, br, latam)
    #[serde(default = "default_region")]
    pub region: String,
    /// Season identifier, e.g. e8a1
    #[serde(default = "default_season")]
    pub season: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PositionParams {
    /// Player's in-game name
    pub name: String,
    /// Player's tag (the part after #)
    pub tag: String,
    /// Region code (ap, na, eu, kr, br, latam)
    #[serde(default = "default_region")]
    pub region: String,
    /// Season identifier, e.g. e8a1
    #[serde(default = "default_season")]
    pub season: String,
}

#[derive(Debug, Serialize)]
struct LeaderboardListing {
    region: String,
    season: String,
    total_players: usize,
    last_update: Option<Value>,
    players: Vec<LeaderboardEntry>,
}

pub async fn get_leaderboard(client: &UpstreamClient, params: LeaderboardParams) -> Result<Value, ToolError> {
    let leaderboard = client.leaderboard(&params.region, &params.season).await?;

    respond(&LeaderboardListing {
        region: params.region,
        season: params.season,
        total_players: leaderboard.players.len(),
        last_update: leaderboard.last_update,
        players: leaderboard.players,
    })
}

pub async fn find_leaderboard_position(
    client: &UpstreamClient,
    params: PositionParams,
) -> Result<Value, ToolError> {
    let report = calculate::find_leaderboard_position(
        client,
        &params.region,
        &params.season,
        &params.name,
        &params.tag,
    )
    .await?;

    respond(&report)
}
