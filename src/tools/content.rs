//! Game content and service status.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{default_region, respond, ToolError};
use crate::upstream::UpstreamClient;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RegionParams {
    /// Region code (ap, na, eu, kr, br, latam)
    #[serde(default = "default_region")]
    pub region: String,
}

pub async fn get_content(client: &UpstreamClient, _params: RegionParams) -> Result<Value, ToolError> {
    let content = client.content().await?;
    respond(&content)
}

#[derive(Debug, Serialize)]
struct StatusReport {
    region: String,
    maintenances: Vec<Value>,
    incidents: Vec<Value>,
}

pub async fn get_status(client: &UpstreamClient, params: RegionParams) -> Result<Value, ToolError> {
    let status = client.status().await?;

    respond(&StatusReport {
        region: params.region,
        maintenances: status.maintenances,
        incidents: status.incidents,
    })
}
