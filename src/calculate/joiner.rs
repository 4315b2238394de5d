//! Match-performance joiner.
//!
//! Pairs each rank-history entry with the full match it refers to and pulls
//! out the target player's line, producing one [`CompositeMatchRecord`] per
//! match that could be joined. Entries that cannot be joined are dropped from
//! the records and listed in [`JoinOutcome::skipped`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::{kda_ratio, MatchOutcome};
use crate::models::{MatchDetail, RankHistoryEntry};
use crate::upstream::UpstreamClient;

/// Placeholder for a missing agent or map name.
pub const UNKNOWN: &str = "Unknown";

/// One rank-history entry joined with its match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeMatchRecord {
    pub match_id: String,
    pub map: String,
    pub agent: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub kda: f64,
    pub score: i64,
    pub mmr_change: i64,
    pub rank: Option<String>,
    pub rr: Option<i64>,
    pub elo: Option<i64>,
    pub date: Option<String>,
    pub played_at: Option<DateTime<Utc>>,
    pub result: MatchOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingMatchId,
    FetchFailed,
    PlayerNotInMatch,
}

/// A rank-history entry that produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedMatch {
    pub match_id: Option<String>,
    pub reason: SkipReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    /// Joined records, in input order
    pub records: Vec<CompositeMatchRecord>,
    pub skipped: Vec<SkippedMatch>,
}

/// Join a single entry with an already-fetched match. Returns `None` when the
/// player is not on the roster.
pub fn compose_record(
    entry: &RankHistoryEntry,
    match_id: &str,
    detail: &MatchDetail,
    puuid: &str,
) -> Option<CompositeMatchRecord> {
    let player = detail.find_player(puuid)?;
    let line = player.line();
    let mmr_change = entry.mmr_change_to_last_game.unwrap_or(0);

    Some(CompositeMatchRecord {
        match_id: match_id.to_string(),
        map: entry.map_name().unwrap_or(UNKNOWN).to_string(),
        agent: player.character.as_deref().unwrap_or(UNKNOWN).to_string(),
        kills: line.kills,
        deaths: line.deaths,
        assists: line.assists,
        kda: kda_ratio(line.kills, line.deaths, line.assists),
        score: line.score,
        mmr_change,
        rank: entry.currenttierpatched.clone(),
        rr: entry.ranking_in_tier,
        elo: entry.elo,
        date: entry.date.clone(),
        played_at: entry.played_at(),
        result: MatchOutcome::from_mmr_change(mmr_change),
    })
}

/// Fetch and join up to `limit` entries (further capped by the client's
/// batch bound). Fetches run one at a time in input order.
pub async fn join_match_performance(
    client: &UpstreamClient,
    puuid: &str,
    history: &[RankHistoryEntry],
    limit: usize,
) -> JoinOutcome {
    let limit = limit.min(client.max_match_batch());
    let mut outcome = JoinOutcome::default();

    for entry in history.iter().take(limit) {
        let Some(match_id) = entry.match_id.as_deref().filter(|id| !id.is_empty()) else {
            outcome.skipped.push(SkippedMatch {
                match_id: None,
                reason: SkipReason::MissingMatchId,
                detail: None,
            });
            continue;
        };

        let detail = match client.match_detail(match_id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Skipping match {}: {}", match_id, e);
                outcome.skipped.push(SkippedMatch {
                    match_id: Some(match_id.to_string()),
                    reason: SkipReason::FetchFailed,
                    detail: Some(e.to_string()),
                });
                continue;
            }
        };

        match compose_record(entry, match_id, &detail, puuid) {
            Some(record) => outcome.records.push(record),
            None => {
                debug!("Player not on roster of match {}", match_id);
                outcome.skipped.push(SkippedMatch {
                    match_id: Some(match_id.to_string()),
                    reason: SkipReason::PlayerNotInMatch,
                    detail: None,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::upstream::mock::MockTransport;
    use serde_json::{json, Value};
    use std::sync::Arc;

    pub(crate) const PUUID: &str = "target-puuid";

    pub(crate) fn history_entry(match_id: Option<&str>, map: &str, change: i64) -> RankHistoryEntry {
        serde_json::from_value(json!({
            "match_id": match_id,
            "map": { "name": map, "id": format!("{}-id", map) },
            "currenttier": 20,
            "currenttierpatched": "Diamond 3",
            "ranking_in_tier": 55,
            "mmr_change_to_last_game": change,
            "elo": 1755,
            "date": "Monday, March 4, 2024 9:00 PM",
            "date_raw": 1709586000
        }))
        .unwrap()
    }

    pub(crate) fn match_body(match_id: &str, puuid: &str, agent: &str, k: i64, d: i64, a: i64) -> Value {
        json!({
            "data": {
                "metadata": { "matchid": match_id, "map": "Ascent", "mode": "Competitive" },
                "players": {
                    "all_players": [
                        { "puuid": "someone-else", "character": "Sage",
                          "stats": { "kills": 1, "deaths": 1, "assists": 1, "score": 100 } },
                        { "puuid": puuid, "name": "Target", "tag": "NA1", "character": agent,
                          "stats": { "kills": k, "deaths": d, "assists": a, "score": k * 250 } }
                    ]
                }
            }
        })
    }

    pub(crate) async fn client_with(mock: &Arc<MockTransport>) -> UpstreamClient {
        let client = UpstreamClient::new("https://api.example.test", mock.clone()).unwrap();
        client.credential().set("test-key").await;
        client
    }

    #[test]
    fn test_compose_record_fields() {
        let entry = history_entry(Some("m1"), "Bind", 21);
        let detail: MatchDetail =
            serde_json::from_value(match_body("m1", PUUID, "Jett", 18, 12, 6)["data"].clone())
                .unwrap();

        let record = compose_record(&entry, "m1", &detail, PUUID).unwrap();

        assert_eq!(record.map, "Bind");
        assert_eq!(record.agent, "Jett");
        assert_eq!(record.kda, 2.0);
        assert_eq!(record.score, 4500);
        assert_eq!(record.mmr_change, 21);
        assert_eq!(record.rank.as_deref(), Some("Diamond 3"));
        assert_eq!(record.rr, Some(55));
        assert_eq!(record.result, MatchOutcome::Win);
        assert!(record.played_at.is_some());
    }

    #[test]
    fn test_compose_record_missing_map_and_agent() {
        let entry: RankHistoryEntry =
            serde_json::from_value(json!({ "match_id": "m1", "mmr_change_to_last_game": null }))
                .unwrap();
        let detail: MatchDetail = serde_json::from_value(json!({
            "players": { "all_players": [ { "puuid": PUUID } ] }
        }))
        .unwrap();

        let record = compose_record(&entry, "m1", &detail, PUUID).unwrap();
        assert_eq!(record.map, UNKNOWN);
        assert_eq!(record.agent, UNKNOWN);
        assert_eq!(record.kda, 0.0);
        assert_eq!(record.result, MatchOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_join_drops_failed_fetch_in_order() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json("/valorant/v2/match/m1", match_body("m1", PUUID, "Jett", 20, 10, 5));
        // m2 is unscripted and answers 404
        mock.respond_json("/valorant/v2/match/m3", match_body("m3", PUUID, "Omen", 12, 15, 9));
        let client = client_with(&mock).await;

        let history = vec![
            history_entry(Some("m1"), "Ascent", 20),
            history_entry(Some("m2"), "Bind", -15),
            history_entry(Some("m3"), "Haven", -10),
        ];

        let outcome = join_match_performance(&client, PUUID, &history, 10).await;

        let ids: Vec<&str> = outcome.records.iter().map(|r| r.match_id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].match_id.as_deref(), Some("m2"));
        assert_eq!(outcome.skipped[0].reason, SkipReason::FetchFailed);
        assert_eq!(
            outcome.skipped[0].detail.as_deref(),
            Some("API error: Player not found")
        );
    }

    #[tokio::test]
    async fn test_join_drops_match_without_player() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json("/valorant/v2/match/m1", match_body("m1", "other", "Jett", 20, 10, 5));
        let client = client_with(&mock).await;

        let history = vec![history_entry(Some("m1"), "Ascent", 20)];
        let outcome = join_match_performance(&client, PUUID, &history, 10).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped[0].reason, SkipReason::PlayerNotInMatch);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_join_skips_missing_match_id_without_fetch() {
        let mock = Arc::new(MockTransport::new());
        let client = client_with(&mock).await;

        let history = vec![history_entry(None, "Ascent", 20)];
        let outcome = join_match_performance(&client, PUUID, &history, 10).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped[0].reason, SkipReason::MissingMatchId);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_join_respects_limit_and_batch_bound() {
        let mock = Arc::new(MockTransport::new());
        for id in ["m1", "m2", "m3", "m4"] {
            mock.respond_json(
                &format!("/valorant/v2/match/{}", id),
                match_body(id, PUUID, "Jett", 10, 10, 0),
            );
        }
        let client = client_with(&mock).await.with_max_match_batch(3);
        let history: Vec<_> = ["m1", "m2", "m3", "m4"]
            .iter()
            .map(|id| history_entry(Some(*id), "Ascent", 5))
            .collect();

        let limited = join_match_performance(&client, PUUID, &history, 2).await;
        assert_eq!(limited.records.len(), 2);

        let bounded = join_match_performance(&client, PUUID, &history, 100).await;
        assert_eq!(bounded.records.len(), 3);
        assert_eq!(mock.call_count(), 5);
    }
}
