use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use color_changer_core::Session;
#[cfg(test)]
use mockall::automock;
use tokio::sync::Mutex;

/// Where sessions live between two requests.
///
/// Implementations must tolerate concurrent calls for different sessions;
/// the handler never holds anything from the store while it routes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> Result<Option<Session>>;

    async fn save(&self, session_id: &str, session: Session) -> Result<()>;

    async fn remove(&self, session_id: &str) -> Result<()>;
}

/// Process-local store. Sessions are lost on restart, after which they are
/// rebuilt from the attributes the platform echoes back.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.lock().await.get(session_id).cloned())
    }

    async fn save(&self, session_id: &str, session: Session) -> Result<()> {
        self.sessions
            .lock()
            .await
            .insert(session_id.to_string(), session);
        Ok(())
    }

    async fn remove(&self, session_id: &str) -> Result<()> {
        self.sessions.lock().await.remove(session_id);
        Ok(())
    }
}
