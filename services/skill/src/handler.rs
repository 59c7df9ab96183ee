use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use color_changer_core::{RequestRouter, Session, SessionFlow};
use color_changer_types::envelope::{RequestEnvelope, ResponseEnvelope};
use tracing::{debug, error, info, warn};

use crate::envelope;
use crate::store::SessionStore;

/// Requests the skill refuses to answer at all.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("request for application {received} rejected")]
    ApplicationMismatch { received: String },
}

/// Turns one request envelope into one response envelope.
///
/// Everything that goes wrong after the application check is answered with
/// a spoken apology and an open microphone, never with a transport error.
pub struct SkillHandler {
    store: Arc<dyn SessionStore>,
    application_id: Option<String>,
}

impl SkillHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            application_id: None,
        }
    }

    pub fn with_application_id(mut self, application_id: Option<String>) -> Self {
        self.application_id = application_id;
        self
    }

    /// Handles an envelope that has not been parsed yet.
    pub async fn handle_value(
        &self,
        value: serde_json::Value,
    ) -> Result<ResponseEnvelope, HandlerError> {
        debug!(envelope = %value, "inbound envelope");
        let attributes = value
            .pointer("/session/attributes")
            .filter(|attributes| !attributes.is_null())
            .cloned();
        match serde_json::from_value::<RequestEnvelope>(value) {
            Ok(request) => self.handle(&request).await,
            Err(err) => {
                warn!(error = %err, "malformed request envelope");
                Ok(envelope::apology(attributes))
            }
        }
    }

    pub async fn handle(
        &self,
        request: &RequestEnvelope,
    ) -> Result<ResponseEnvelope, HandlerError> {
        self.check_application(request)?;
        match self.respond(request).await {
            Ok(response) => {
                debug!(?response, "outbound envelope");
                Ok(response)
            }
            Err(err) => {
                error!(error = ?err, "failed to handle request");
                Ok(envelope::apology(echoed_attributes(request)))
            }
        }
    }

    /// Reads one request envelope from a JSON file and answers it.
    pub async fn handle_file(&self, path: &Path) -> Result<ResponseEnvelope> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read request file: {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&contents)
            .with_context(|| format!("Request file is not JSON: {}", path.display()))?;
        Ok(self.handle_value(value).await?)
    }

    fn check_application(&self, request: &RequestEnvelope) -> Result<(), HandlerError> {
        let Some(expected) = &self.application_id else {
            return Ok(());
        };
        let received = request
            .session
            .as_ref()
            .and_then(|session| session.application.as_ref())
            .map(|application| application.application_id.as_str());

        if received == Some(expected.as_str()) {
            Ok(())
        } else {
            warn!(?received, "request for another application");
            Err(HandlerError::ApplicationMismatch {
                received: received.unwrap_or("none").to_string(),
            })
        }
    }

    async fn respond(&self, request: &RequestEnvelope) -> Result<ResponseEnvelope> {
        let inbound = envelope::to_inbound(request);
        let session_id = request
            .session
            .as_ref()
            .map(|session| session.session_id.as_str());

        let mut session = self.load_session(request).await?;
        let response = RequestRouter::route(&mut session, &inbound)
            .with_context(|| format!("Failed to route request {}", inbound.request_id))?;

        if response.flow() == SessionFlow::EndSession {
            if let Some(id) = session_id {
                self.store
                    .remove(id)
                    .await
                    .with_context(|| format!("Failed to remove session {id}"))?;
            }
            info!(session_id, "session ended");
            return Ok(envelope::to_response(&response, None));
        }

        if let Some(id) = session_id {
            self.store
                .save(id, session.clone())
                .await
                .with_context(|| format!("Failed to save session {id}"))?;
        }
        let attributes =
            serde_json::to_value(&session).context("Failed to serialize session attributes")?;
        Ok(envelope::to_response(&response, Some(attributes)))
    }

    /// The stored session, else the attributes the platform echoed back,
    /// else a fresh one.
    async fn load_session(&self, request: &RequestEnvelope) -> Result<Session> {
        let Some(info) = &request.session else {
            return Ok(Session::new());
        };
        if info.new {
            return Ok(Session::new());
        }

        if let Some(session) = self
            .store
            .load(&info.session_id)
            .await
            .with_context(|| format!("Failed to load session {}", info.session_id))?
        {
            return Ok(session);
        }

        match echoed_attributes(request) {
            Some(attributes) => {
                debug!(session_id = %info.session_id, "restoring session from attributes");
                serde_json::from_value(attributes).context("Failed to parse session attributes")
            }
            None => Ok(Session::new()),
        }
    }
}

/// Session attributes the platform sent back with this request, if any.
fn echoed_attributes(request: &RequestEnvelope) -> Option<serde_json::Value> {
    request
        .session
        .as_ref()
        .and_then(|session| session.attributes.clone())
        .filter(|attributes| !attributes.is_null())
}
