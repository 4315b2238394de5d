//! Callable tools.
//!
//! Each tool decodes its JSON arguments, calls the upstream API one or more
//! times and returns a simplified JSON result. Failures never escape as
//! faults: [`ToolRegistry::invoke`] turns every error into `{"error": "..."}`.

pub mod analysis;
pub mod content;
pub mod definitions;
pub mod leaderboard;
pub mod matches;
pub mod player;

pub use definitions::{tool_definitions, ToolDefinition};

use std::num::NonZeroU32;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::upstream::{ApiError, UpstreamClient};

pub const DEFAULT_REGION: &str = "na";
pub const DEFAULT_SEASON: &str = "e8a1";

pub(crate) fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

pub(crate) fn default_season() -> String {
    DEFAULT_SEASON.to_string()
}

/// Positive count argument default.
pub(crate) const fn count(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(n) => n,
        None => NonZeroU32::MIN,
    }
}

/// Errors surfaced by tools.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Could not retrieve player PUUID")]
    MissingPuuid,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unexpected error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// The uniform `{"error": message}` result.
    pub fn to_value(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

/// Decode tool arguments; a missing argument object counts as empty.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = match args {
        Value::Null => json!({}),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Serialize a tool result.
pub(crate) fn respond<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(value)?)
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SetApiKeyParams {
    /// HenrikDev API key
    pub api_key_input: String,
}

/// Store the upstream API key for subsequent calls. The key is kept as given.
pub async fn set_api_key(client: &UpstreamClient, params: SetApiKeyParams) -> Result<Value, ToolError> {
    if params.api_key_input.trim().is_empty() {
        return Err(ToolError::InvalidArguments(
            "api_key_input must not be empty".to_string(),
        ));
    }

    if client.credential().set(&params.api_key_input).await {
        info!("Valorant API key replaced");
    } else {
        info!("Valorant API key set");
    }

    Ok(json!({
        "message": "API key set successfully",
        "status": "success"
    }))
}

/// Dispatches tool calls against one upstream client.
#[derive(Clone)]
pub struct ToolRegistry {
    client: Arc<UpstreamClient>,
}

impl ToolRegistry {
    pub fn new(client: Arc<UpstreamClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &UpstreamClient {
        &self.client
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        tool_definitions().iter().any(|t| t.name == name)
    }

    /// Run a tool and return its result or error.
    pub async fn call(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let client = self.client.as_ref();

        match name {
            "get_account_details" => player::get_account_details(client, parse_args(args)?).await,
            "get_match_history_by_name" => {
                player::get_match_history_by_name(client, parse_args(args)?).await
            }
            "get_match_details" => matches::get_match_details(client, parse_args(args)?).await,
            "get_mmr_details_by_name" => {
                player::get_mmr_details_by_name(client, parse_args(args)?).await
            }
            "get_mmr_history_by_name" => {
                player::get_mmr_history_by_name(client, parse_args(args)?).await
            }
            "get_lifetime_matches_by_name" => {
                player::get_lifetime_matches_by_name(client, parse_args(args)?).await
            }
            "get_leaderboard" => leaderboard::get_leaderboard(client, parse_args(args)?).await,
            "get_content" => content::get_content(client, parse_args(args)?).await,
            "get_status" => content::get_status(client, parse_args(args)?).await,
            "set_api_key" => set_api_key(client, parse_args(args)?).await,
            "get_detailed_competitive_analysis" => {
                analysis::get_detailed_competitive_analysis(client, parse_args(args)?).await
            }
            "find_leaderboard_position" => {
                leaderboard::find_leaderboard_position(client, parse_args(args)?).await
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// Run a tool, folding any error into `{"error": message}`.
    pub async fn invoke(&self, name: &str, args: Value) -> Value {
        info!("Tool call: {}", name);

        match self.call(name, args).await {
            Ok(value) => value,
            Err(e) => {
                match &e {
                    ToolError::Api(_) | ToolError::InvalidArguments(_) => {
                        warn!("Tool {} failed: {}", name, e)
                    }
                    _ => error!("Tool {} failed: {}", name, e),
                }
                e.to_value()
            }
        }
    }
}
