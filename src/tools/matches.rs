//! Single match lookup.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{default_region, respond, ToolError};
use crate::models::{MatchDetail, PlayerMatchStat, PlayerStats};
use crate::upstream::UpstreamClient;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MatchParams {
    /// Match identifier
    pub match_id: String,
    /// Region code; unused since match ids are global
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Serialize)]
struct RosterLine {
    puuid: Option<String>,
    name: Option<String>,
    tag: Option<String>,
    team: Option<String>,
    character: Option<String>,
    stats: PlayerStats,
}

impl From<&PlayerMatchStat> for RosterLine {
    fn from(player: &PlayerMatchStat) -> Self {
        Self {
            puuid: player.puuid.clone(),
            name: player.name.clone(),
            tag: player.tag.clone(),
            team: player.team.clone(),
            character: player.character.clone(),
            stats: player.stats.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchSummary {
    match_id: String,
    map: Option<String>,
    mode: Option<String>,
    rounds_played: Option<i64>,
    rounds_won: Option<i64>,
    rounds_lost: Option<i64>,
    score: Option<Value>,
    result: Option<String>,
    date: Option<String>,
    players: Vec<RosterLine>,
}

fn summarize(match_id: &str, detail: &MatchDetail) -> MatchSummary {
    let metadata = detail.metadata.clone().unwrap_or_default();

    MatchSummary {
        match_id: match_id.to_string(),
        map: metadata.map,
        mode: metadata.mode,
        rounds_played: metadata.rounds_played,
        rounds_won: metadata.rounds_won,
        rounds_lost: metadata.rounds_lost,
        score: metadata.score,
        result: metadata.result,
        date: metadata.game_start_patched,
        players: detail.roster().iter().map(RosterLine::from).collect(),
    }
}

pub async fn get_match_details(client: &UpstreamClient, params: MatchParams) -> Result<Value, ToolError> {
    let detail = client.match_detail(&params.match_id).await?;
    respond(&summarize(&params.match_id, &detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tests::registry_with;
    use crate::upstream::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_match_details_lists_every_player() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json(
            "/valorant/v2/match/abc-123",
            json!({ "data": {
                "metadata": { "matchid": "abc-123", "map": "Haven", "mode": "Competitive",
                              "rounds_played": 24, "game_start_patched": "Friday, May 3, 2024 7:12 PM" },
                "players": { "all_players": [
                    { "puuid": "p1", "name": "A", "tag": "1", "team": "Blue", "character": "Sova",
                      "stats": { "kills": 19, "deaths": 15, "assists": 8, "score": 4800 } },
                    { "puuid": "p2", "name": "B", "tag": "2", "team": "Red", "character": "Killjoy" }
                ] }
            } }),
        );
        let registry = registry_with(&mock).await;

        let result = registry
            .invoke("get_match_details", json!({ "match_id": "abc-123" }))
            .await;

        assert_eq!(result["match_id"], "abc-123");
        assert_eq!(result["map"], "Haven");
        assert_eq!(result["rounds_played"], 24);
        assert_eq!(result["date"], "Friday, May 3, 2024 7:12 PM");
        assert_eq!(result["players"].as_array().unwrap().len(), 2);
        assert_eq!(result["players"][0]["stats"]["kills"], 19);
        assert!(result["players"][1]["stats"]["kills"].is_null());
    }

    #[tokio::test]
    async fn test_match_details_requires_match_id() {
        let mock = Arc::new(MockTransport::new());
        let registry = registry_with(&mock).await;

        let result = registry.invoke("get_match_details", json!({ "region": "eu" })).await;

        assert!(result["error"]
            .as_str()
            .unwrap()
            .contains("missing field `match_id`"));
        assert_eq!(mock.call_count(), 0);
    }
}
