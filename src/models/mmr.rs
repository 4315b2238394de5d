//! Rank (MMR) models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current rank from `/valorant/v2/mmr/{region}/{name}/{tag}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MmrDetails {
    pub current_tier: Option<i64>,
    pub current_tier_patched: Option<String>,
    pub ranking_in_tier: Option<i64>,
    pub mmr_change_to_last_game: Option<i64>,
    pub elo: Option<i64>,
    pub games_needed_for_rating: Option<i64>,
    pub old: Option<bool>,
    pub season: Option<SeasonRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonRef {
    pub id: Option<String>,
    pub short: Option<String>,
}

/// One entry of `/valorant/v1/mmr-history/...`, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankHistoryEntry {
    pub match_id: Option<String>,

    pub map: Option<MapRef>,

    /// Numeric tier
    pub currenttier: Option<i64>,

    /// Tier name, e.g. "Diamond 2"
    pub currenttierpatched: Option<String>,

    /// RR within the current tier
    pub ranking_in_tier: Option<i64>,

    /// Signed RR delta caused by this match
    pub mmr_change_to_last_game: Option<i64>,

    pub elo: Option<i64>,

    pub season_id: Option<String>,

    pub date: Option<String>,

    /// Unix timestamp in seconds
    pub date_raw: Option<i64>,

    pub images: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapRef {
    pub name: Option<String>,
    pub id: Option<String>,
}

impl RankHistoryEntry {
    pub fn map_name(&self) -> Option<&str> {
        self.map.as_ref().and_then(|m| m.name.as_deref())
    }

    pub fn played_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.date_raw
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    }
}
