//! Scripted transport for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::{RawResponse, Transport, TransportError};

enum Scripted {
    Response(RawResponse),
    Failure(String),
}

/// Returns canned responses keyed by URL path and records every call.
/// Unscripted paths answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<(Url, String)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, response: RawResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Scripted::Response(response));
    }

    pub fn respond_json(&self, path: &str, body: Value) {
        self.respond(path, RawResponse::new(200, body.to_string()));
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Scripted::Failure(message.to_string()));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Paths requested so far, in order.
    pub fn paths(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.path().to_string())
            .collect()
    }

    pub fn last_url(&self) -> Option<Url> {
        self.calls.lock().unwrap().last().map(|(url, _)| url.clone())
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|(_, key)| key.clone())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url, api_key: &str) -> Result<RawResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.clone(), api_key.to_string()));

        match self.routes.lock().unwrap().get(url.path()) {
            Some(Scripted::Response(response)) => Ok(response.clone()),
            Some(Scripted::Failure(message)) => Err(TransportError(message.clone())),
            None => Ok(RawResponse::new(404, "not scripted")),
        }
    }
}
