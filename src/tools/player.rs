//! Player lookups: account, match history, rank and lifetime matches.

use std::num::NonZeroU32;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{count, default_region, respond, ToolError};
use crate::models::{riot_id, MatchDetail, PlayerCard, RankHistoryEntry, SeasonRef};
use crate::upstream::{LifetimeFilter, UpstreamClient};

fn default_size() -> NonZeroU32 {
    count(10)
}

fn default_page() -> NonZeroU32 {
    count(1)
}

fn default_lifetime_size() -> NonZeroU32 {
    count(20)
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PlayerParams {
    /// Player's in-game name
    pub name: String,
    /// Player's tag (the part after #)
    pub tag: String,
    /// Region code (ap, na, eu, kr, br, latam)
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PagedPlayerParams {
    /// Player's in-game name
    pub name: String,
    /// Player's tag (the part after #)
    pub tag: String,
    /// Region code (ap, na, eu, kr, br, latam)
    #[serde(default = "default_region")]
    pub region: String,
    /// Number of entries (max 20)
    #[serde(default = "default_size")]
    pub size: NonZeroU32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LifetimeParams {
    /// Player's in-game name
    pub name: String,
    /// Player's tag (the part after #)
    pub tag: String,
    /// Region code (ap, na, eu, kr, br, latam)
    #[serde(default = "default_region")]
    pub region: String,
    /// Game mode filter
    pub mode: Option<String>,
    /// Map filter
    pub map_filter: Option<String>,
    /// Page number
    #[serde(default = "default_page")]
    pub page: NonZeroU32,
    /// Matches per page
    #[serde(default = "default_lifetime_size")]
    pub size: NonZeroU32,
}

#[derive(Debug, Serialize)]
struct AccountSummary {
    puuid: Option<String>,
    name: Option<String>,
    tag: Option<String>,
    card: PlayerCard,
    region: Option<String>,
    account_level: Option<i64>,
    last_update: Option<String>,
}

pub async fn get_account_details(client: &UpstreamClient, params: PlayerParams) -> Result<Value, ToolError> {
    let account = client.account(&params.name, &params.tag).await?;

    respond(&AccountSummary {
        puuid: account.puuid,
        name: account.name,
        tag: account.tag,
        card: account.card.unwrap_or_default(),
        region: account.region,
        account_level: account.account_level,
        last_update: account.last_update,
    })
}

/// The requesting player's line within a listed match.
#[derive(Debug, Serialize)]
struct PlayerLine {
    character: Option<String>,
    team: Option<String>,
    kills: i64,
    deaths: i64,
    assists: i64,
    score: i64,
    tier: Option<String>,
}

#[derive(Debug, Serialize)]
struct MatchHistoryItem {
    match_id: Option<String>,
    map: Option<String>,
    mode: Option<String>,
    started_at: Option<String>,
    season_id: Option<String>,
    region: Option<String>,
    cluster: Option<String>,
    #[serde(flatten)]
    player: Option<PlayerLine>,
}

impl MatchHistoryItem {
    fn new(detail: &MatchDetail, puuid: &str) -> Self {
        let metadata = detail.metadata.clone().unwrap_or_default();
        let player = detail.find_player(puuid).map(|p| {
            let line = p.line();
            PlayerLine {
                character: p.character.clone(),
                team: p.team.clone(),
                kills: line.kills,
                deaths: line.deaths,
                assists: line.assists,
                score: line.score,
                tier: p.currenttier_patched.clone(),
            }
        });

        Self {
            match_id: detail.id().map(str::to_string),
            map: metadata.map,
            mode: metadata.mode,
            started_at: metadata.game_start_patched,
            season_id: metadata.season_id,
            region: metadata.region,
            cluster: metadata.cluster,
            player,
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchHistory {
    player_name: String,
    region: String,
    total_matches: usize,
    matches: Vec<MatchHistoryItem>,
}

pub async fn get_match_history_by_name(
    client: &UpstreamClient,
    params: PagedPlayerParams,
) -> Result<Value, ToolError> {
    let account = client.account(&params.name, &params.tag).await?;
    let puuid = account.puuid.ok_or(ToolError::MissingPuuid)?;

    let details = client
        .matches_by_puuid(&params.region, &puuid, params.size.get())
        .await?;
    let matches: Vec<_> = details
        .iter()
        .map(|d| MatchHistoryItem::new(d, &puuid))
        .collect();

    respond(&MatchHistory {
        player_name: riot_id(&params.name, &params.tag),
        region: params.region,
        total_matches: matches.len(),
        matches,
    })
}

#[derive(Debug, Serialize)]
struct MmrSummary {
    player_name: String,
    region: String,
    current_tier: Option<i64>,
    current_tier_patched: Option<String>,
    ranking_in_tier: Option<i64>,
    mmr_change_to_last_game: Option<i64>,
    elo: Option<i64>,
    games_needed_for_rating: Option<i64>,
    old: Option<bool>,
    season: Option<SeasonRef>,
}

pub async fn get_mmr_details_by_name(
    client: &UpstreamClient,
    params: PlayerParams,
) -> Result<Value, ToolError> {
    let mmr = client.mmr(&params.region, &params.name, &params.tag).await?;

    respond(&MmrSummary {
        player_name: riot_id(&params.name, &params.tag),
        region: params.region,
        current_tier: mmr.current_tier,
        current_tier_patched: mmr.current_tier_patched,
        ranking_in_tier: mmr.ranking_in_tier,
        mmr_change_to_last_game: mmr.mmr_change_to_last_game,
        elo: mmr.elo,
        games_needed_for_rating: mmr.games_needed_for_rating,
        old: mmr.old,
        season: mmr.season,
    })
}

#[derive(Debug, Serialize)]
struct HistoryItem {
    match_id: Option<String>,
    map: Option<String>,
    map_id: Option<String>,
    current_tier: Option<i64>,
    current_tier_patched: Option<String>,
    ranking_in_tier: Option<i64>,
    mmr_change_to_last_game: Option<i64>,
    elo: Option<i64>,
    season_id: Option<String>,
    date: Option<String>,
    date_raw: Option<i64>,
    images: Option<Value>,
}

impl From<&RankHistoryEntry> for HistoryItem {
    fn from(entry: &RankHistoryEntry) -> Self {
        Self {
            match_id: entry.match_id.clone(),
            map: entry.map_name().map(str::to_string),
            map_id: entry.map.as_ref().and_then(|m| m.id.clone()),
            current_tier: entry.currenttier,
            current_tier_patched: entry.currenttierpatched.clone(),
            ranking_in_tier: entry.ranking_in_tier,
            mmr_change_to_last_game: entry.mmr_change_to_last_game,
            elo: entry.elo,
            season_id: entry.season_id.clone(),
            date: entry.date.clone(),
            date_raw: entry.date_raw,
            images: entry.images.clone(),
        }
    }
}

/// Rank summary over a history slice, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankProgression {
    /// Distinct rank names in first-seen order
    pub ranks_achieved: Vec<String>,
    /// Rank of the entry with the highest tier
    pub highest_rank: Option<String>,
    pub current_rank: Option<String>,
    pub lowest_elo: Option<i64>,
    pub highest_elo: Option<i64>,
}

pub fn rank_progression(history: &[RankHistoryEntry]) -> RankProgression {
    let mut ranks_achieved: Vec<String> = Vec::new();
    for rank in history.iter().filter_map(|e| e.currenttierpatched.as_deref()) {
        if !ranks_achieved.iter().any(|r| r == rank) {
            ranks_achieved.push(rank.to_string());
        }
    }

    // max_by_key returns the last maximum, so scan in reverse to keep the first
    let highest_rank = history
        .iter()
        .rev()
        .filter(|e| e.currenttierpatched.is_some())
        .max_by_key(|e| e.currenttier.unwrap_or(i64::MIN))
        .and_then(|e| e.currenttierpatched.clone());

    let elos = history.iter().filter_map(|e| e.elo);

    RankProgression {
        ranks_achieved,
        highest_rank,
        current_rank: history.first().and_then(|e| e.currenttierpatched.clone()),
        lowest_elo: elos.clone().min(),
        highest_elo: elos.max(),
    }
}

#[derive(Debug, Serialize)]
struct MmrHistory {
    player_name: String,
    region: String,
    total_updates: usize,
    mmr_history: Vec<HistoryItem>,
    rank_progression: RankProgression,
}

pub async fn get_mmr_history_by_name(
    client: &UpstreamClient,
    params: PagedPlayerParams,
) -> Result<Value, ToolError> {
    let history = client
        .mmr_history(&params.region, &params.name, &params.tag, params.size.get())
        .await?;

    respond(&MmrHistory {
        player_name: riot_id(&params.name, &params.tag),
        region: params.region,
        total_updates: history.len(),
        mmr_history: history.iter().map(HistoryItem::from).collect(),
        rank_progression: rank_progression(&history),
    })
}

/// First non-null value among candidate paths.
fn pick(value: &Value, paths: &[&[&str]]) -> Value {
    paths
        .iter()
        .filter_map(|path| path.iter().try_fold(value, |v, key| v.get(*key)))
        .find(|v| !v.is_null())
        .cloned()
        .unwrap_or(Value::Null)
}

fn lifetime_match(item: &Value) -> Value {
    let mut out = Map::new();
    out.insert("match_id".into(), pick(item, &[&["match_id"], &["meta", "id"]]));
    out.insert("map".into(), pick(item, &[&["map"], &["meta", "map", "name"]]));
    out.insert("mode".into(), pick(item, &[&["mode"], &["meta", "mode"]]));
    out.insert("result".into(), pick(item, &[&["result"]]));
    out.insert("score".into(), pick(item, &[&["score"], &["stats", "score"]]));
    out.insert("date".into(), pick(item, &[&["date"], &["meta", "started_at"]]));
    Value::Object(out)
}

/// Shape a lifetime payload, which is either a summary object carrying a
/// `matches` list or a bare list of matches.
pub fn shape_lifetime(data: &Value) -> (Value, Vec<Value>) {
    let (summary, items): (Option<&Value>, &[Value]) = match data {
        Value::Array(items) => (None, items.as_slice()),
        Value::Object(_) => (
            Some(data),
            data.get("matches")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
        ),
        _ => (None, &[]),
    };

    let matches: Vec<Value> = items.iter().map(lifetime_match).collect();

    let mut stats = Map::new();
    let summary_field = |key: &str| summary.map(|s| pick(s, &[&[key]])).unwrap_or(Value::Null);
    let total = match summary_field("total_matches") {
        Value::Null => Value::from(matches.len()),
        total => total,
    };
    stats.insert("total_matches".into(), total);
    for key in ["win_rate", "average_score", "favorite_agent", "favorite_map"] {
        stats.insert(key.into(), summary_field(key));
    }

    (Value::Object(stats), matches)
}

#[derive(Debug, Serialize)]
struct LifetimeMatches {
    player_name: String,
    region: String,
    lifetime_stats: Value,
    total_matches: usize,
    matches: Vec<Value>,
}

pub async fn get_lifetime_matches_by_name(
    client: &UpstreamClient,
    params: LifetimeParams,
) -> Result<Value, ToolError> {
    let filter = LifetimeFilter {
        mode: params.mode,
        map: params.map_filter,
        page: Some(params.page.get()),
        size: Some(params.size.get()),
    };
    let data = client
        .lifetime_matches(&params.region, &params.name, &params.tag, &filter)
        .await?;
    let (lifetime_stats, matches) = shape_lifetime(&data);

    respond(&LifetimeMatches {
        player_name: riot_id(&params.name, &params.tag),
        region: params.region,
        lifetime_stats,
        total_matches: matches.len(),
        matches,
    })
}
