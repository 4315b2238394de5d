//! Competitive leaderboard model.

use serde::{Deserialize, Serialize};

use super::nullable;

/// Leaderboard payload from `/valorant/v2/leaderboard/{region}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Entries ordered by rank ascending
    #[serde(default, deserialize_with = "nullable")]
    pub players: Vec<LeaderboardEntry>,

    pub last_update: Option<serde_json::Value>,
}

/// One ranked player on the leaderboard. Accepts both the snake_case and
/// camelCase spellings the upstream has used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub puuid: Option<String>,

    #[serde(alias = "gameName")]
    pub game_name: Option<String>,

    #[serde(alias = "tagLine")]
    pub tag_line: Option<String>,

    /// 1-based position, lower is better
    #[serde(alias = "leaderboardRank")]
    pub leaderboard_rank: Option<i64>,

    #[serde(alias = "rankedRating")]
    pub ranked_rating: Option<i64>,

    #[serde(alias = "numberOfWins")]
    pub number_of_wins: Option<i64>,

    #[serde(alias = "competitiveTier")]
    pub competitive_tier: Option<i64>,
}

impl LeaderboardEntry {
    /// Exact, case-sensitive match on display name and tag.
    pub fn is_player(&self, name: &str, tag: &str) -> bool {
        self.game_name.as_deref() == Some(name) && self.tag_line.as_deref() == Some(tag)
    }

    /// `name#tag` as listed on the leaderboard.
    pub fn display_name(&self) -> String {
        super::riot_id(
            self.game_name.as_deref().unwrap_or_default(),
            self.tag_line.as_deref().unwrap_or_default(),
        )
    }
}
