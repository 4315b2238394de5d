//! Upstream path templates and typed endpoint calls.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::{ApiError, UpstreamClient};
use crate::models::{
    Account, Content, Leaderboard, MatchDetail, MmrDetails, RankHistoryEntry, ServiceStatus,
};

/// A path (as raw, unescaped segments) plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

/// Optional filters for the lifetime matches endpoint.
#[derive(Debug, Clone, Default)]
pub struct LifetimeFilter {
    pub mode: Option<String>,
    pub map: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl Endpoint {
    fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
        }
    }

    fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    fn with_optional_query(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.with_query(key, v),
            None => self,
        }
    }

    pub fn account(name: &str, tag: &str) -> Self {
        Self::new(&["valorant", "v1", "account", name, tag])
    }

    pub fn match_detail(match_id: &str) -> Self {
        Self::new(&["valorant", "v2", "match", match_id])
    }

    pub fn mmr(region: &str, name: &str, tag: &str) -> Self {
        Self::new(&["valorant", "v2", "mmr", region, name, tag])
    }

    pub fn mmr_history(region: &str, name: &str, tag: &str, size: u32) -> Self {
        Self::new(&["valorant", "v1", "mmr-history", region, name, tag]).with_query("size", size)
    }

    pub fn matches_by_puuid(region: &str, puuid: &str, size: u32) -> Self {
        Self::new(&["valorant", "v3", "by-puuid", "matches", region, puuid])
            .with_query("size", size)
    }

    pub fn lifetime_matches(region: &str, name: &str, tag: &str, filter: &LifetimeFilter) -> Self {
        Self::new(&["valorant", "v1", "lifetime", "matches", region, name, tag])
            .with_optional_query("mode", filter.mode.as_deref())
            .with_optional_query("map", filter.map.as_deref())
            .with_optional_query("page", filter.page)
            .with_optional_query("size", filter.size)
    }

    pub fn leaderboard(region: &str, season: &str) -> Self {
        Self::new(&["valorant", "v2", "leaderboard", region]).with_query("season", season)
    }

    pub fn content() -> Self {
        Self::new(&["valorant", "v1", "content"])
    }

    pub fn status() -> Self {
        Self::new(&["valorant", "v1", "status"])
    }

    /// Unescaped path, for logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Resolve against `base`, percent-encoding each segment.
    pub fn to_url(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Unexpected(format!("base URL cannot be a base: {}", base)))?;
            path.pop_if_empty();
            path.extend(self.segments.iter());
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

/// Decode the `data` member of an upstream envelope. A missing or null
/// `data` yields the type's default.
pub fn decode_data<T>(body: Value) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    match body {
        Value::Object(mut map) => match map.remove("data") {
            None | Some(Value::Null) => Ok(T::default()),
            Some(data) => serde_json::from_value(data)
                .map_err(|e| ApiError::Unexpected(format!("unexpected response shape: {}", e))),
        },
        _ => Ok(T::default()),
    }
}

impl UpstreamClient {
    async fn fetch<T>(&self, endpoint: Endpoint) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        decode_data(self.request(&endpoint).await?)
    }

    pub async fn account(&self, name: &str, tag: &str) -> Result<Account, ApiError> {
        self.fetch(Endpoint::account(name, tag)).await
    }

    pub async fn match_detail(&self, match_id: &str) -> Result<MatchDetail, ApiError> {
        self.fetch(Endpoint::match_detail(match_id)).await
    }

    pub async fn mmr(&self, region: &str, name: &str, tag: &str) -> Result<MmrDetails, ApiError> {
        self.fetch(Endpoint::mmr(region, name, tag)).await
    }

    pub async fn mmr_history(
        &self,
        region: &str,
        name: &str,
        tag: &str,
        size: u32,
    ) -> Result<Vec<RankHistoryEntry>, ApiError> {
        self.fetch(Endpoint::mmr_history(region, name, tag, size))
            .await
    }

    pub async fn matches_by_puuid(
        &self,
        region: &str,
        puuid: &str,
        size: u32,
    ) -> Result<Vec<MatchDetail>, ApiError> {
        self.fetch(Endpoint::matches_by_puuid(region, puuid, size))
            .await
    }

    /// Lifetime payloads vary in shape, so they are returned undecoded.
    pub async fn lifetime_matches(
        &self,
        region: &str,
        name: &str,
        tag: &str,
        filter: &LifetimeFilter,
    ) -> Result<Value, ApiError> {
        self.fetch(Endpoint::lifetime_matches(region, name, tag, filter))
            .await
    }

    pub async fn leaderboard(&self, region: &str, season: &str) -> Result<Leaderboard, ApiError> {
        self.fetch(Endpoint::leaderboard(region, season)).await
    }

    pub async fn content(&self) -> Result<Content, ApiError> {
        self.fetch(Endpoint::content()).await
    }

    pub async fn status(&self) -> Result<ServiceStatus, ApiError> {
        self.fetch(Endpoint::status()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("https://api.henrikdev.xyz").unwrap()
    }

    #[test]
    fn test_account_url() {
        let url = Endpoint::account("TenZ", "0505").to_url(&base()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.henrikdev.xyz/valorant/v1/account/TenZ/0505"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let url = Endpoint::account("Some One", "a/b#1").to_url(&base()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.henrikdev.xyz/valorant/v1/account/Some%20One/a%2Fb%231"
        );
    }

    #[test]
    fn test_base_with_trailing_slash_and_prefix() {
        let base = Url::parse("http://localhost:3000/proxy/").unwrap();
        let url = Endpoint::content().to_url(&base).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/proxy/valorant/v1/content");
    }

    #[test]
    fn test_query_parameters() {
        let url = Endpoint::leaderboard("eu", "e8a1").to_url(&base()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.henrikdev.xyz/valorant/v2/leaderboard/eu?season=e8a1"
        );
    }

    #[test]
    fn test_lifetime_omits_absent_filters() {
        let filter = LifetimeFilter {
            mode: Some("competitive".to_string()),
            map: None,
            page: Some(2),
            size: Some(20),
        };
        let endpoint = Endpoint::lifetime_matches("na", "a", "b", &filter);
        let keys: Vec<&str> = endpoint.query().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["mode", "page", "size"]);
    }

    #[test]
    fn test_path_for_logging() {
        assert_eq!(
            Endpoint::mmr_history("ap", "x", "y", 5).path(),
            "/valorant/v1/mmr-history/ap/x/y"
        );
    }

    #[test]
    fn test_decode_data_missing_or_null() {
        let empty: Vec<RankHistoryEntry> = decode_data(json!({"status": 200})).unwrap();
        assert!(empty.is_empty());

        let null: Account = decode_data(json!({"data": null})).unwrap();
        assert!(null.puuid.is_none());
    }

    #[test]
    fn test_decode_data_shape_mismatch() {
        let err = decode_data::<Vec<RankHistoryEntry>>(json!({"data": "oops"})).unwrap_err();
        assert!(matches!(err, ApiError::Unexpected(_)));
    }
}
