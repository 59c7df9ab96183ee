//! Request and response envelopes exchanged with the voice platform.
//!
//! These mirror the platform JSON closely and carry no behavior; the skill
//! service converts them to and from the core's request and response values.

use std::collections::BTreeMap;

use crate::directives::Directive;

/// Version string the platform expects on every response.
pub const RESPONSE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Option<SessionInfo>,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    #[serde(default)]
    pub application: Option<Application>,
    /// Attributes echoed back from the previous response of this session.
    #[serde(default)]
    pub attributes: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    LaunchRequest(LaunchRequest),
    IntentRequest(IntentRequest),
    #[serde(rename = "GameEngine.InputHandlerEvent")]
    InputHandlerEvent(InputHandlerEventRequest),
    SessionEndedRequest(SessionEndedRequest),
    #[serde(rename = "System.ExceptionEncountered")]
    ExceptionEncountered(ExceptionEncounteredRequest),
    /// Any request type this skill does not know about.
    #[serde(other)]
    Unsupported,
}

impl Request {
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Request::LaunchRequest(r) => Some(&r.request_id),
            Request::IntentRequest(r) => Some(&r.request_id),
            Request::InputHandlerEvent(r) => Some(&r.request_id),
            Request::SessionEndedRequest(r) => Some(&r.request_id),
            Request::ExceptionEncountered(r) => Some(&r.request_id),
            Request::Unsupported => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub intent: Intent,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slot {
    pub name: String,
    /// Absent when the user did not fill the slot.
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputHandlerEventRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Id of the request whose StartInputHandler produced these events.
    pub originating_request_id: String,
    #[serde(default)]
    pub events: Vec<InputHandlerEvent>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputHandlerEvent {
    pub name: String,
    #[serde(default)]
    pub input_events: Vec<InputEvent>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEvent {
    pub gadget_id: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    pub request_id: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionEncounteredRequest {
    pub request_id: String,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<serde_json::Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    /// `Some(false)` keeps the microphone open, `None` keeps the session
    /// alive with the microphone closed, `Some(true)` ends the session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    #[serde(rename = "PlainText")]
    PlainText { text: String },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_handler_event_request_parses() {
        let json = r#"{
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "session-1",
                "application": { "applicationId": "app-1" },
                "attributes": { "mode": "Play" }
            },
            "request": {
                "type": "GameEngine.InputHandlerEvent",
                "requestId": "req-2",
                "timestamp": "2018-01-01T00:00:00Z",
                "originatingRequestId": "req-1",
                "events": [{
                    "name": "button_down_event",
                    "inputEvents": [{
                        "gadgetId": "dev1",
                        "timestamp": "2018-01-01T00:00:00Z",
                        "action": "down",
                        "color": "0000FF",
                        "feature": "press"
                    }]
                }]
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();

        let session = envelope.session.as_ref().unwrap();
        assert_eq!(session.session_id, "session-1");
        assert_eq!(session.application.as_ref().unwrap().application_id, "app-1");
        match &envelope.request {
            Request::InputHandlerEvent(event) => {
                assert_eq!(event.originating_request_id, "req-1");
                assert_eq!(event.events[0].name, "button_down_event");
                assert_eq!(event.events[0].input_events[0].gadget_id, "dev1");
            }
            other => panic!("Expected an InputHandlerEvent request, got {:?}", other),
        }
        assert_eq!(envelope.request.request_id(), Some("req-2"));
    }

    #[test]
    fn test_unknown_request_type_is_unsupported() {
        let json = r#"{ "request": { "type": "AudioPlayer.PlaybackStarted", "requestId": "r" } }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.request, Request::Unsupported);
        assert!(envelope.session.is_none());
    }

    #[test]
    fn test_response_omits_should_end_session_when_awaiting_input() {
        let envelope = ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: None,
            response: ResponseBody {
                output_speech: Some(OutputSpeech::Ssml {
                    ssml: "<speak>hello</speak>".to_string(),
                }),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["response"]["outputSpeech"]["type"], "SSML");
        assert!(value["response"].get("shouldEndSession").is_none());
        assert!(value["response"].get("directives").is_none());
        assert!(value.get("sessionAttributes").is_none());
    }
}
