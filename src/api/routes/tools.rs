use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::state::AppState;
use crate::api::RouteError;
use crate::tools::ToolDefinition;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub api_key_configured: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        api_key_configured: state.tools.client().credential().is_set().await,
    })
}

#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDefinition>,
}

pub async fn list_tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: state.tools.definitions(),
    })
}

/// Run a tool. Tool-level failures come back as `{"error": ...}` with 200.
///
/// The body is read as raw bytes rather than through `Json` because an empty
/// body, with or without a content type, means "no arguments".
pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, RouteError> {
    if !state.tools.has_tool(&name) {
        return Err(RouteError::NotFound(format!("Unknown tool: {}", name)));
    }

    let args = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value @ Value::Object(_)) => value,
            Ok(_) => {
                return Err(RouteError::BadRequest(
                    "tool arguments must be a JSON object".to_string(),
                ))
            }
            Err(e) => return Err(RouteError::BadRequest(format!("invalid JSON body: {}", e))),
        }
    };

    Ok(Json(state.tools.invoke(&name, args).await))
}
