//! Conversion between the platform envelopes and the core's values.

use color_changer_core::inbound::{HardwareReport, ReportedEvent, VoiceIntent};
use color_changer_core::{InboundRequest, RequestKind, SkillResponse};
use color_changer_types::envelope::{
    OutputSpeech, Reprompt, Request, RequestEnvelope, ResponseBody, ResponseEnvelope,
    RESPONSE_VERSION,
};

pub fn to_inbound(envelope: &RequestEnvelope) -> InboundRequest {
    let new_session = envelope.session.as_ref().is_some_and(|s| s.new);

    let (request_id, kind) = match &envelope.request {
        Request::LaunchRequest(launch) => (&launch.request_id, RequestKind::SessionStart),
        Request::SessionEndedRequest(ended) => (&ended.request_id, RequestKind::SessionEnded),
        // Whatever opens a session starts roll call.
        Request::IntentRequest(r) if new_session => (&r.request_id, RequestKind::SessionStart),
        Request::InputHandlerEvent(r) if new_session => {
            (&r.request_id, RequestKind::SessionStart)
        }
        Request::IntentRequest(r) => {
            let mut intent = VoiceIntent::new(&r.intent.name);
            for (name, slot) in &r.intent.slots {
                if let Some(value) = &slot.value {
                    intent = intent.with_slot(name, value);
                }
            }
            (&r.request_id, RequestKind::Intent(intent))
        }
        Request::InputHandlerEvent(r) => {
            let events = r
                .events
                .iter()
                .map(|event| ReportedEvent {
                    name: event.name.clone(),
                    device_ids: event
                        .input_events
                        .iter()
                        .map(|input| input.gadget_id.clone())
                        .collect(),
                })
                .collect();
            (
                &r.request_id,
                RequestKind::HardwareReport(HardwareReport::new(
                    &r.originating_request_id,
                    events,
                )),
            )
        }
        Request::ExceptionEncountered(r) => {
            let details = r
                .error
                .as_ref()
                .map_or_else(|| "no details".to_string(), |error| error.to_string());
            (&r.request_id, RequestKind::SystemException(details))
        }
        Request::Unsupported => {
            return InboundRequest::new("", RequestKind::Unrecognized);
        }
    };

    InboundRequest::new(request_id, kind)
}

/// Builds the platform response. `attributes` is echoed back by the
/// platform on the next request of the session.
pub fn to_response(
    response: &SkillResponse,
    attributes: Option<serde_json::Value>,
) -> ResponseEnvelope {
    ResponseEnvelope {
        version: RESPONSE_VERSION.to_string(),
        session_attributes: attributes,
        response: ResponseBody {
            output_speech: response.speech().map(ssml),
            reprompt: response.reprompt().map(|text| Reprompt {
                output_speech: ssml(text),
            }),
            directives: response.directives().to_vec(),
            should_end_session: response.flow().should_end_session(),
        },
    }
}

/// The generic failure answer. `attributes` should be what the platform
/// echoed on the failed request, so the session survives the failure.
pub fn apology(attributes: Option<serde_json::Value>) -> ResponseEnvelope {
    to_response(&SkillResponse::apology(), attributes)
}

fn ssml(text: &str) -> OutputSpeech {
    OutputSpeech::Ssml {
        ssml: format!("<speak>{text}</speak>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_changer_core::SessionFlow;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> RequestEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_input_handler_event_becomes_hardware_report() {
        let envelope = envelope(json!({
            "version": "1.0",
            "session": { "new": false, "sessionId": "s-1" },
            "request": {
                "type": "GameEngine.InputHandlerEvent",
                "requestId": "req-2",
                "originatingRequestId": "req-1",
                "events": [{
                    "name": "second_button_checked_in",
                    "inputEvents": [
                        { "gadgetId": "dev1", "action": "down" },
                        { "gadgetId": "dev2", "action": "down" }
                    ]
                }]
            }
        }));

        let inbound = to_inbound(&envelope);

        assert_eq!(inbound.request_id, "req-2");
        assert_eq!(
            inbound.kind,
            RequestKind::HardwareReport(HardwareReport::new(
                "req-1",
                vec![ReportedEvent::new("second_button_checked_in", &["dev1", "dev2"])]
            ))
        );
    }

    #[test]
    fn test_intent_keeps_filled_slots_only() {
        let envelope = envelope(json!({
            "session": { "new": false, "sessionId": "s-1" },
            "request": {
                "type": "IntentRequest",
                "requestId": "req-3",
                "intent": {
                    "name": "colorIntent",
                    "slots": {
                        "color": { "name": "color", "value": "blue" },
                        "shade": { "name": "shade" }
                    }
                }
            }
        }));

        let inbound = to_inbound(&envelope);

        match inbound.kind {
            RequestKind::Intent(intent) => {
                assert_eq!(intent.slot("color"), Some("blue"));
                assert_eq!(intent.slot("shade"), None);
            }
            other => panic!("Expected Intent, got {:?}", other),
        }
    }

    #[test]
    fn test_first_request_of_a_session_starts_roll_call() {
        let envelope = envelope(json!({
            "session": { "new": true, "sessionId": "s-1" },
            "request": {
                "type": "IntentRequest",
                "requestId": "req-1",
                "intent": { "name": "AMAZON.HelpIntent" }
            }
        }));

        let inbound = to_inbound(&envelope);

        assert_eq!(inbound.kind, RequestKind::SessionStart);
    }

    #[test]
    fn test_unsupported_request_is_unrecognized() {
        let envelope = envelope(json!({
            "session": { "new": false, "sessionId": "s-1" },
            "request": { "type": "CanFulfillIntentRequest", "requestId": "req-1" }
        }));

        let inbound = to_inbound(&envelope);

        assert_eq!(inbound.kind, RequestKind::Unrecognized);
    }

    #[test]
    fn test_apology_keeps_echoed_attributes() {
        let attributes = json!({ "mode": "Play", "activeWatcherId": "req-color" });

        let response = apology(Some(attributes.clone()));

        assert_eq!(response.session_attributes, Some(attributes));
        assert_eq!(response.response.should_end_session, Some(false));
    }

    #[test]
    fn test_response_wraps_speech_and_maps_flow() {
        let response = SkillResponse::new()
            .with_speech("hello")
            .with_reprompt("again?")
            .with_flow(SessionFlow::OpenMicrophone);

        let value = serde_json::to_value(to_response(&response, None)).unwrap();

        assert_eq!(
            value,
            json!({
                "version": "1.0",
                "response": {
                    "outputSpeech": { "type": "SSML", "ssml": "<speak>hello</speak>" },
                    "reprompt": {
                        "outputSpeech": { "type": "SSML", "ssml": "<speak>again?</speak>" }
                    },
                    "shouldEndSession": false
                }
            })
        );
    }

    #[test]
    fn test_awaiting_input_omits_should_end_session() {
        let response = SkillResponse::new().with_flow(SessionFlow::AwaitInput);

        let value = serde_json::to_value(to_response(&response, Some(json!({ "mode": "Play" }))))
            .unwrap();

        assert!(value["response"].get("shouldEndSession").is_none());
        assert_eq!(value["sessionAttributes"]["mode"], "Play");
    }
}
