//! Aggregation over joined match records.

use std::collections::HashMap;

use serde::Serialize;

use super::{average, kd_ratio, win_rate, CompositeMatchRecord, MatchOutcome};

/// Summary across every joined match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallStats {
    pub matches: usize,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub avg_score: f64,
    pub kd_ratio: f64,
    /// Percentage (0-100)
    pub win_rate: f64,
    pub wins: usize,
    pub losses: usize,
    pub unchanged: usize,
}

/// Per-agent rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentPerformance {
    pub agent: String,
    pub matches: usize,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub score: i64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub kd_ratio: f64,
}

/// Per-map rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPerformance {
    pub map: String,
    pub matches: usize,
    pub kills: i64,
    pub deaths: i64,
    /// Net RR across matches on this map, may be negative
    pub mmr_change: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub overall: OverallStats,
    /// Ordered by K/D descending; ties keep first-seen order
    pub agents: Vec<AgentPerformance>,
    /// First-seen order
    pub maps: Vec<MapPerformance>,
}

/// Partition records by key, keeping groups in first-seen order.
fn group_by<'a, F>(records: &'a [CompositeMatchRecord], key: F) -> Vec<(&'a str, Vec<&'a CompositeMatchRecord>)>
where
    F: Fn(&'a CompositeMatchRecord) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&CompositeMatchRecord>)> = Vec::new();

    for record in records {
        let k = key(record);
        match index.get(k) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(k, groups.len());
                groups.push((k, vec![record]));
            }
        }
    }

    groups
}

pub fn overall_stats(records: &[CompositeMatchRecord]) -> OverallStats {
    let matches = records.len();
    let kills: i64 = records.iter().map(|r| r.kills).sum();
    let deaths: i64 = records.iter().map(|r| r.deaths).sum();
    let assists: i64 = records.iter().map(|r| r.assists).sum();
    let score: i64 = records.iter().map(|r| r.score).sum();

    let count = |outcome: MatchOutcome| records.iter().filter(|r| r.result == outcome).count();
    let wins = count(MatchOutcome::Win);

    OverallStats {
        matches,
        avg_kills: average(kills, matches),
        avg_deaths: average(deaths, matches),
        avg_assists: average(assists, matches),
        avg_score: average(score, matches),
        kd_ratio: kd_ratio(kills, deaths),
        win_rate: win_rate(wins, matches),
        wins,
        losses: count(MatchOutcome::Loss),
        unchanged: count(MatchOutcome::Unchanged),
    }
}

pub fn agent_performance(records: &[CompositeMatchRecord]) -> Vec<AgentPerformance> {
    let mut agents: Vec<AgentPerformance> = group_by(records, |r| r.agent.as_str())
        .into_iter()
        .map(|(agent, group)| {
            let matches = group.len();
            let kills: i64 = group.iter().map(|r| r.kills).sum();
            let deaths: i64 = group.iter().map(|r| r.deaths).sum();
            AgentPerformance {
                agent: agent.to_string(),
                matches,
                kills,
                deaths,
                assists: group.iter().map(|r| r.assists).sum(),
                score: group.iter().map(|r| r.score).sum(),
                avg_kills: average(kills, matches),
                avg_deaths: average(deaths, matches),
                kd_ratio: kd_ratio(kills, deaths),
            }
        })
        .collect();

    // sort_by is stable
    agents.sort_by(|a, b| b.kd_ratio.total_cmp(&a.kd_ratio));
    agents
}

pub fn map_performance(records: &[CompositeMatchRecord]) -> Vec<MapPerformance> {
    group_by(records, |r| r.map.as_str())
        .into_iter()
        .map(|(map, group)| MapPerformance {
            map: map.to_string(),
            matches: group.len(),
            kills: group.iter().map(|r| r.kills).sum(),
            deaths: group.iter().map(|r| r.deaths).sum(),
            mmr_change: group.iter().map(|r| r.mmr_change).sum(),
        })
        .collect()
}

/// Compute every rollup. Empty input yields zeroed stats.
pub fn aggregate(records: &[CompositeMatchRecord]) -> AggregateStats {
    AggregateStats {
        overall: overall_stats(records),
        agents: agent_performance(records),
        maps: map_performance(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::joiner::tests::{client_with, history_entry, match_body, PUUID};
    use crate::calculate::join_match_performance;
    use crate::upstream::mock::MockTransport;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn record(agent: &str, map: &str, kills: i64, deaths: i64, mmr_change: i64) -> CompositeMatchRecord {
        CompositeMatchRecord {
            match_id: format!("{}-{}-{}", agent, map, kills),
            map: map.to_string(),
            agent: agent.to_string(),
            kills,
            deaths,
            assists: 3,
            kda: 0.0,
            score: 1000,
            mmr_change,
            rank: None,
            rr: None,
            elo: None,
            date: None,
            played_at: None,
            result: MatchOutcome::from_mmr_change(mmr_change),
        }
    }

    #[test]
    fn test_empty_is_all_zero() {
        let stats = aggregate(&[]);

        assert_eq!(stats.overall, OverallStats::default());
        assert!(stats.agents.is_empty());
        assert!(stats.maps.is_empty());
    }

    #[test]
    fn test_kd_with_zero_deaths() {
        let stats = aggregate(&[record("Jett", "Ascent", 5, 0, 10)]);

        assert_eq!(stats.overall.kd_ratio, 5.0);
        assert_eq!(stats.agents[0].kd_ratio, 5.0);
    }

    #[test]
    fn test_win_rate_two_of_three() {
        let records = vec![
            record("Jett", "Ascent", 10, 10, 15),
            record("Jett", "Ascent", 10, 10, 20),
            record("Jett", "Ascent", 10, 10, -18),
        ];

        let overall = overall_stats(&records);
        assert_eq!(overall.win_rate, 66.67);
        assert_eq!(overall.wins, 2);
        assert_eq!(overall.losses, 1);
    }

    #[test]
    fn test_unchanged_counts_in_denominator_only() {
        let records = vec![
            record("Jett", "Ascent", 10, 10, 15),
            record("Jett", "Ascent", 10, 10, 0),
        ];

        let overall = overall_stats(&records);
        assert_eq!(overall.win_rate, 50.0);
        assert_eq!(overall.unchanged, 1);
        assert_eq!(overall.losses, 0);
    }

    #[test]
    fn test_overall_averages() {
        let records = vec![
            record("Jett", "Ascent", 20, 10, 15),
            record("Omen", "Bind", 11, 14, -10),
        ];

        let overall = overall_stats(&records);
        assert_eq!(overall.matches, 2);
        assert_eq!(overall.avg_kills, 15.5);
        assert_eq!(overall.avg_deaths, 12.0);
        assert_eq!(overall.avg_assists, 3.0);
        assert_eq!(overall.avg_score, 1000.0);
        assert_eq!(overall.kd_ratio, 1.29);
    }

    #[test]
    fn test_agents_sorted_by_kd_with_stable_ties() {
        let records = vec![
            record("Sage", "Ascent", 10, 10, 5),  // 1.0
            record("Jett", "Ascent", 30, 10, 5),  // 3.0
            record("Omen", "Bind", 10, 10, 5),    // 1.0, seen after Sage
            record("Sage", "Bind", 10, 10, 5),
        ];

        let agents = agent_performance(&records);
        let order: Vec<&str> = agents.iter().map(|a| a.agent.as_str()).collect();
        assert_eq!(order, vec!["Jett", "Sage", "Omen"]);

        let sage = &agents[1];
        assert_eq!(sage.matches, 2);
        assert_eq!(sage.kills, 20);
        assert_eq!(sage.assists, 6);
        assert_eq!(sage.score, 2000);
        assert_eq!(sage.avg_kills, 10.0);
        assert_eq!(sage.avg_deaths, 10.0);
    }

    #[test]
    fn test_maps_first_seen_with_signed_mmr() {
        let records = vec![
            record("Jett", "Bind", 10, 12, -20),
            record("Jett", "Ascent", 15, 10, 18),
            record("Omen", "Bind", 8, 9, 5),
        ];

        let maps = map_performance(&records);
        assert_eq!(
            maps,
            vec![
                MapPerformance {
                    map: "Bind".to_string(),
                    matches: 2,
                    kills: 18,
                    deaths: 21,
                    mmr_change: -15,
                },
                MapPerformance {
                    map: "Ascent".to_string(),
                    matches: 1,
                    kills: 15,
                    deaths: 10,
                    mmr_change: 18,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_joined_map_totals_match_manual_sums() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json("/valorant/v2/match/m1", match_body("m1", PUUID, "Jett", 21, 14, 3));
        mock.respond_json("/valorant/v2/match/m2", match_body("m2", PUUID, "Raze", 9, 17, 6));
        mock.respond_json("/valorant/v2/match/m3", match_body("m3", PUUID, "Jett", 25, 11, 2));
        let client = client_with(&mock).await;

        let history = vec![
            history_entry(Some("m1"), "Lotus", 19),
            history_entry(Some("m2"), "Split", -22),
            history_entry(Some("m3"), "Lotus", 24),
        ];
        let joined = join_match_performance(&client, PUUID, &history, 10).await;
        let stats = aggregate(&joined.records);

        let lotus = stats.maps.iter().find(|m| m.map == "Lotus").unwrap();
        let manual: Vec<_> = joined.records.iter().filter(|r| r.map == "Lotus").collect();
        assert_eq!(lotus.kills, manual.iter().map(|r| r.kills).sum::<i64>());
        assert_eq!(lotus.deaths, manual.iter().map(|r| r.deaths).sum::<i64>());
        assert_eq!(lotus.kills, 46);
        assert_eq!(lotus.mmr_change, 43);
    }
}
