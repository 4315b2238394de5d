//! Detailed competitive analysis.
//!
//! Rank history supplies the matches and their RR movement, match details
//! supply the player's performance. The two are joined per match and then
//! rolled up overall, per agent and per map.

use std::num::NonZeroU32;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use super::{count, default_region, respond, ToolError};
use crate::calculate::{
    aggregate, join_match_performance, AgentPerformance, CompositeMatchRecord, MapPerformance,
    OverallStats, SkippedMatch,
};
use crate::models::{riot_id, RankHistoryEntry};
use crate::upstream::UpstreamClient;

fn default_match_count() -> NonZeroU32 {
    count(10)
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AnalysisParams {
    /// Player's in-game name
    pub name: String,
    /// Player's tag (the part after #)
    pub tag: String,
    /// Region code (ap, na, eu, kr, br, latam)
    #[serde(default = "default_region")]
    pub region: String,
    /// Number of competitive matches to analyze (max 20)
    #[serde(default = "default_match_count")]
    pub match_count: NonZeroU32,
    /// Also list matches that could not be analyzed
    #[serde(default)]
    pub include_skipped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentRank {
    pub rank: Option<String>,
    pub elo: Option<i64>,
    pub rr: Option<i64>,
}

impl From<Option<&RankHistoryEntry>> for CurrentRank {
    fn from(newest: Option<&RankHistoryEntry>) -> Self {
        match newest {
            Some(entry) => Self {
                rank: entry.currenttierpatched.clone(),
                elo: entry.elo,
                rr: entry.ranking_in_tier,
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompetitiveAnalysis {
    player: String,
    competitive_matches: Vec<CompositeMatchRecord>,
    overall_stats: OverallStats,
    /// Best K/D first
    agent_performance: Vec<AgentPerformance>,
    map_performance: Vec<MapPerformance>,
    current_rank: CurrentRank,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped_matches: Option<Vec<SkippedMatch>>,
}

pub async fn get_detailed_competitive_analysis(
    client: &UpstreamClient,
    params: AnalysisParams,
) -> Result<Value, ToolError> {
    let player = riot_id(&params.name, &params.tag);
    let match_count = params.match_count.get();

    let history = client
        .mmr_history(&params.region, &params.name, &params.tag, match_count)
        .await?;
    if history.is_empty() {
        return Ok(json!({
            "player": player,
            "message": "No competitive match history found."
        }));
    }

    let account = client.account(&params.name, &params.tag).await?;
    let puuid = account.puuid.ok_or(ToolError::MissingPuuid)?;

    let joined = join_match_performance(client, &puuid, &history, match_count as usize).await;
    info!(
        "Analyzed {} of {} matches for {}",
        joined.records.len(),
        history.len().min(match_count as usize),
        player
    );

    let stats = aggregate(&joined.records);

    respond(&CompetitiveAnalysis {
        player,
        current_rank: CurrentRank::from(history.first()),
        competitive_matches: joined.records,
        overall_stats: stats.overall,
        agent_performance: stats.agents,
        map_performance: stats.maps,
        skipped_matches: params.include_skipped.then_some(joined.skipped),
    })
}
