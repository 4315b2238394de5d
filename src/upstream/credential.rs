use std::sync::Arc;

use tokio::sync::RwLock;

/// The upstream API key.
///
/// Read by every request, written at startup or by the `set_api_key` tool.
/// A later `set` replaces the key for all subsequent requests.
#[derive(Clone, Default)]
pub struct Credential {
    inner: Arc<RwLock<Option<String>>>,
}

impl Credential {
    pub fn new(key: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(key.filter(|k| !k.is_empty()))),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Store a key. Returns true when a previous key was replaced.
    pub async fn set(&self, key: impl Into<String>) -> bool {
        let mut guard = self.inner.write().await;
        guard.replace(key.into()).is_some()
    }

    pub async fn get(&self) -> Option<String> {
        self.inner.read().await.clone()
    }

    pub async fn is_set(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
