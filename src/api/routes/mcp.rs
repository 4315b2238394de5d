use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::state::AppState;

/// Handle one JSON-RPC message. Notifications are acknowledged with 202.
pub async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> Response {
    let line = String::from_utf8_lossy(&body);

    match state.mcp.handle_line(&line).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::tests::{app, post_json, send};
    use crate::upstream::mock::MockTransport;
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_rpc_request() {
        let mock = Arc::new(MockTransport::new());

        let (status, json) = send(
            app(&mock).await,
            post_json("/mcp", r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], 7);
        assert!(json["result"]["tools"].is_array());
    }

    #[tokio::test]
    async fn test_rpc_notification_accepted() {
        let mock = Arc::new(MockTransport::new());

        let (status, _) = send(
            app(&mock).await,
            post_json("/mcp", r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_rpc_parse_error() {
        let mock = Arc::new(MockTransport::new());

        let (status, json) = send(app(&mock).await, post_json("/mcp", "nope")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["error"]["code"], -32700);
    }
}
