//! Match models.
//!
//! The v2 single-match endpoint and the v3 match-history endpoint share the
//! same `metadata` + `players.all_players` layout, so one type covers both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nullable;

/// A full match as returned by `/valorant/v2/match/{id}` or as one element of
/// `/valorant/v3/by-puuid/matches/...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchDetail {
    pub match_id: Option<String>,

    pub metadata: Option<MatchMetadata>,

    pub players: Option<MatchPlayers>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub matchid: Option<String>,
    pub map: Option<String>,
    pub mode: Option<String>,
    pub rounds_played: Option<i64>,
    pub rounds_won: Option<i64>,
    pub rounds_lost: Option<i64>,
    pub score: Option<Value>,
    pub result: Option<String>,
    pub game_start_patched: Option<String>,
    pub season_id: Option<String>,
    pub region: Option<String>,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchPlayers {
    #[serde(default, deserialize_with = "nullable")]
    pub all_players: Vec<PlayerMatchStat>,
}

/// One player's line in a match roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchStat {
    pub puuid: Option<String>,
    pub name: Option<String>,
    pub tag: Option<String>,
    pub team: Option<String>,

    /// Agent played
    pub character: Option<String>,

    pub currenttier_patched: Option<String>,

    pub stats: Option<PlayerStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub kills: Option<i64>,
    pub deaths: Option<i64>,
    pub assists: Option<i64>,
    pub score: Option<i64>,
}

impl MatchDetail {
    /// Match id from the top level, falling back to `metadata.matchid`.
    pub fn id(&self) -> Option<&str> {
        self.match_id
            .as_deref()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.matchid.as_deref()))
    }

    pub fn roster(&self) -> &[PlayerMatchStat] {
        self.players
            .as_ref()
            .map(|p| p.all_players.as_slice())
            .unwrap_or_default()
    }

    /// Find a player by exact PUUID.
    pub fn find_player(&self, puuid: &str) -> Option<&PlayerMatchStat> {
        self.roster()
            .iter()
            .find(|p| p.puuid.as_deref() == Some(puuid))
    }
}

impl PlayerMatchStat {
    /// Stats with missing values treated as zero.
    pub fn line(&self) -> StatLine {
        let stats = self.stats.unwrap_or_default();
        StatLine {
            kills: stats.kills.unwrap_or(0),
            deaths: stats.deaths.unwrap_or(0),
            assists: stats.assists.unwrap_or(0),
            score: stats.score.unwrap_or(0),
        }
    }
}

/// Kills/deaths/assists/score with no gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatLine {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MatchDetail {
        serde_json::from_value(json!({
            "metadata": { "matchid": "m-1", "map": "Ascent", "mode": "Competitive" },
            "players": {
                "all_players": [
                    { "puuid": "p-1", "name": "A", "tag": "1", "character": "Jett",
                      "stats": { "kills": 20, "deaths": 10, "assists": 4, "score": 5000 } },
                    { "puuid": "p-2", "name": "B", "tag": "2", "character": "Sova",
                      "stats": { "kills": 7, "deaths": null } }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_id_falls_back_to_metadata() {
        assert_eq!(sample().id(), Some("m-1"));
    }

    #[test]
    fn test_find_player_by_puuid() {
        let detail = sample();
        assert_eq!(
            detail.find_player("p-2").and_then(|p| p.character.as_deref()),
            Some("Sova")
        );
        assert!(detail.find_player("P-2").is_none());
    }

    #[test]
    fn test_line_fills_missing_stats() {
        let detail = sample();
        let line = detail.find_player("p-2").unwrap().line();
        assert_eq!(
            line,
            StatLine {
                kills: 7,
                deaths: 0,
                assists: 0,
                score: 0
            }
        );
    }

    #[test]
    fn test_roster_without_players() {
        let detail = MatchDetail::default();
        assert!(detail.roster().is_empty());
        assert!(detail.find_player("p-1").is_none());
    }
}
