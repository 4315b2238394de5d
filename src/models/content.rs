//! Static game content and service status models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nullable;

/// Payload of `/valorant/v1/content`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    pub version: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub characters: Vec<Character>,

    #[serde(default, deserialize_with = "nullable")]
    pub maps: Vec<GameMap>,
}

/// A playable agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    pub uuid: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub display_icon: Option<String>,
    pub role: Option<AgentRole>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentRole {
    pub uuid: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub display_icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameMap {
    pub uuid: Option<String>,
    pub display_name: Option<String>,
    pub coordinates: Option<String>,
    pub display_icon: Option<String>,
}

/// Payload of `/valorant/v1/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default, deserialize_with = "nullable")]
    pub maintenances: Vec<Value>,

    #[serde(default, deserialize_with = "nullable")]
    pub incidents: Vec<Value>,
}
