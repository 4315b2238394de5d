//! Leaderboard position search.

use serde::Serialize;
use tracing::warn;

use crate::models::{riot_id, LeaderboardEntry};
use crate::upstream::{ApiError, UpstreamClient};

/// Entries shown on each side of a located player.
pub const NEIGHBOR_RADIUS: usize = 2;

/// Lowest rank that can appear on the leaderboard.
pub const MINIMUM_LEADERBOARD_RANK: &str = "Immortal 3+";

/// A leaderboard entry reduced to what the neighbour window shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub rank: Option<i64>,
    pub name: String,
    pub rr: Option<i64>,
    pub wins: Option<i64>,
}

impl From<&LeaderboardEntry> for Neighbor {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            rank: entry.leaderboard_rank,
            name: entry.display_name(),
            rr: entry.ranked_rating,
            wins: entry.number_of_wins,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeaderboardHit<'a> {
    pub entry: &'a LeaderboardEntry,
    pub neighbors: Vec<Neighbor>,
}

/// Indices within `radius` of `index`, clipped to `0..len`, excluding `index`.
pub fn neighbor_indices(len: usize, index: usize, radius: usize) -> Vec<usize> {
    let start = index.saturating_sub(radius);
    let end = (index + radius + 1).min(len);
    (start..end).filter(|&i| i != index).collect()
}

/// Find the first entry matching `name` and `tag` exactly.
pub fn locate<'a>(entries: &'a [LeaderboardEntry], name: &str, tag: &str) -> Option<LeaderboardHit<'a>> {
    let index = entries.iter().position(|e| e.is_player(name, tag))?;
    let neighbors = neighbor_indices(entries.len(), index, NEIGHBOR_RADIUS)
        .into_iter()
        .map(|i| Neighbor::from(&entries[i]))
        .collect();

    Some(LeaderboardHit {
        entry: &entries[index],
        neighbors,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardInfo {
    pub minimum_rank_required: &'static str,
    pub total_players_on_leaderboard: usize,
    /// Rating of the last listed entry, `None` for an empty listing
    pub lowest_leaderboard_rr: Option<i64>,
}

impl LeaderboardInfo {
    pub fn from_entries(entries: &[LeaderboardEntry]) -> Self {
        Self {
            minimum_rank_required: MINIMUM_LEADERBOARD_RANK,
            total_players_on_leaderboard: entries.len(),
            lowest_leaderboard_rr: entries.last().and_then(|e| e.ranked_rating),
        }
    }
}

/// Outcome of a leaderboard position search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PositionReport {
    Found {
        found: bool,
        player: String,
        position: Option<i64>,
        ranked_rating: Option<i64>,
        wins: Option<i64>,
        competitive_tier: Option<i64>,
        nearby_players: Vec<Neighbor>,
        total_leaderboard_players: usize,
    },
    NotFound {
        found: bool,
        player: String,
        message: String,
        current_rank: Option<String>,
        current_elo: Option<i64>,
        leaderboard_info: LeaderboardInfo,
    },
}

/// Search the region's leaderboard for `name#tag`.
///
/// The listing fetch is a prerequisite and its error is returned. When the
/// player is not listed, their current rank is looked up directly; a failing
/// rank lookup leaves rank and elo empty instead of failing the search.
pub async fn find_leaderboard_position(
    client: &UpstreamClient,
    region: &str,
    season: &str,
    name: &str,
    tag: &str,
) -> Result<PositionReport, ApiError> {
    let leaderboard = client.leaderboard(region, season).await?;
    let entries = &leaderboard.players;

    if let Some(hit) = locate(entries, name, tag) {
        return Ok(PositionReport::Found {
            found: true,
            player: riot_id(name, tag),
            position: hit.entry.leaderboard_rank,
            ranked_rating: hit.entry.ranked_rating,
            wins: hit.entry.number_of_wins,
            competitive_tier: hit.entry.competitive_tier,
            nearby_players: hit.neighbors,
            total_leaderboard_players: entries.len(),
        });
    }

    let (current_rank, current_elo) = match client.mmr(region, name, tag).await {
        Ok(mmr) => (mmr.current_tier_patched, mmr.elo),
        Err(e) => {
            warn!("Rank lookup for {} failed: {}", riot_id(name, tag), e);
            (None, None)
        }
    };

    Ok(PositionReport::NotFound {
        found: false,
        player: riot_id(name, tag),
        message: "Player not found on leaderboard".to_string(),
        current_rank,
        current_elo,
        leaderboard_info: LeaderboardInfo::from_entries(entries),
    })
}
