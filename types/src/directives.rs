use std::collections::BTreeMap;

use crate::animation::AnimationStep;
use crate::input_handler::{EventDefinition, Recognizer};

/// Current version of the `GadgetController.SetLight` directive.
pub const SET_LIGHT_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "GameEngine.StartInputHandler")]
    StartInputHandler(StartInputHandlerDirective),
    #[serde(rename = "GameEngine.StopInputHandler")]
    StopInputHandler(StopInputHandlerDirective),
    #[serde(rename = "GadgetController.SetLight")]
    SetLight(SetLightDirective),
}

/// `GameEngine.StartInputHandler` directive
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInputHandlerDirective {
    /// Milliseconds until the built-in "timed out" recognizer fires.
    timeout: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_history_length: Option<u32>,

    /// Placeholder gadget ids bound to real gadgets as they are pressed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    proxies: Vec<String>,

    recognizers: BTreeMap<String, Recognizer>,

    events: BTreeMap<String, EventDefinition>,
}

impl StartInputHandlerDirective {
    pub fn new(
        timeout: u64,
        recognizers: BTreeMap<String, Recognizer>,
        events: BTreeMap<String, EventDefinition>,
    ) -> Self {
        Self {
            timeout,
            maximum_history_length: None,
            proxies: vec![],
            recognizers,
            events,
        }
    }

    pub fn with_proxies(mut self, proxies: Vec<String>) -> Self {
        self.proxies = proxies;
        self
    }

    pub fn with_maximum_history_length(mut self, maximum_history_length: u32) -> Self {
        self.maximum_history_length = Some(maximum_history_length);
        self
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn maximum_history_length(&self) -> Option<u32> {
        self.maximum_history_length
    }

    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    pub fn recognizers(&self) -> &BTreeMap<String, Recognizer> {
        &self.recognizers
    }

    pub fn events(&self) -> &BTreeMap<String, EventDefinition> {
        &self.events
    }
}

/// `GameEngine.StopInputHandler` directive
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopInputHandlerDirective {
    /// Id of the request that started the input handler.
    originating_request_id: String,
}

impl StopInputHandlerDirective {
    pub fn new(originating_request_id: &str) -> Self {
        Self {
            originating_request_id: originating_request_id.to_string(),
        }
    }

    pub fn originating_request_id(&self) -> &str {
        &self.originating_request_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerEvent {
    ButtonDown,
    ButtonUp,
    /// Plays immediately.
    None,
}

/// `GadgetController.SetLight` directive
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLightDirective {
    version: u8,

    /// Gadgets the animation is sent to. Empty means every connected gadget.
    target_gadgets: Vec<String>,

    parameters: SetLightParameters,
}

impl SetLightDirective {
    pub fn new(target_gadgets: Vec<String>, parameters: SetLightParameters) -> Self {
        Self {
            version: SET_LIGHT_VERSION,
            target_gadgets,
            parameters,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn target_gadgets(&self) -> &[String] {
        &self.target_gadgets
    }

    pub fn parameters(&self) -> &SetLightParameters {
        &self.parameters
    }

    pub fn trigger_event(&self) -> TriggerEvent {
        self.parameters.trigger_event
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLightParameters {
    animations: Vec<AnimationStep>,

    trigger_event: TriggerEvent,

    /// Delay after the trigger before the animation starts.
    trigger_event_time_ms: u32,
}

impl SetLightParameters {
    pub fn new(trigger_event: TriggerEvent, animations: Vec<AnimationStep>) -> Self {
        Self {
            animations,
            trigger_event,
            trigger_event_time_ms: 0,
        }
    }

    pub fn with_trigger_event_time_ms(mut self, trigger_event_time_ms: u32) -> Self {
        self.trigger_event_time_ms = trigger_event_time_ms;
        self
    }

    pub fn animations(&self) -> &[AnimationStep] {
        &self.animations
    }

    pub fn trigger_event(&self) -> TriggerEvent {
        self.trigger_event
    }

    pub fn trigger_event_time_ms(&self) -> u32 {
        self.trigger_event_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationFrame;
    use crate::input_handler::{GadgetAction, MatchRecognizer, PatternStep, Reports};

    #[test]
    fn test_set_light_serializes_with_platform_names() {
        let directive = Directive::SetLight(SetLightDirective::new(
            vec!["gadget-1".to_string()],
            SetLightParameters::new(
                TriggerEvent::ButtonDown,
                vec![AnimationStep::new(1, vec![AnimationFrame::new(2000, false, "0000ff")])],
            ),
        ));

        let value = serde_json::to_value(&directive).unwrap();

        assert_eq!(value["type"], "GadgetController.SetLight");
        assert_eq!(value["version"], 1);
        assert_eq!(value["targetGadgets"][0], "gadget-1");
        assert_eq!(value["parameters"]["triggerEvent"], "buttonDown");
        assert_eq!(value["parameters"]["triggerEventTimeMs"], 0);
        let step = &value["parameters"]["animations"][0];
        assert_eq!(step["repeat"], 1);
        assert_eq!(step["targetLights"][0], "1");
        assert_eq!(step["sequence"][0]["durationMs"], 2000);
        assert_eq!(step["sequence"][0]["color"], "0000ff");
    }

    #[test]
    fn test_start_input_handler_omits_empty_proxies() {
        let mut recognizers = BTreeMap::new();
        recognizers.insert(
            "button_down_recognizer".to_string(),
            Recognizer::Match(MatchRecognizer::new(vec![PatternStep::new(GadgetAction::Down)])),
        );
        let mut events = BTreeMap::new();
        events.insert(
            "button_down_event".to_string(),
            EventDefinition::new(vec!["button_down_recognizer".to_string()], Reports::Matches),
        );

        let directive = Directive::StartInputHandler(StartInputHandlerDirective::new(
            30000,
            recognizers,
            events,
        ));
        let value = serde_json::to_value(&directive).unwrap();

        assert_eq!(value["type"], "GameEngine.StartInputHandler");
        assert_eq!(value["timeout"], 30000);
        assert!(value.get("proxies").is_none());
        assert!(value.get("maximumHistoryLength").is_none());
        let recognizer = &value["recognizers"]["button_down_recognizer"];
        assert_eq!(recognizer["type"], "match");
        assert_eq!(recognizer["anchor"], "end");
        assert_eq!(recognizer["pattern"][0]["action"], "down");
        assert!(recognizer["pattern"][0].get("gadgetIds").is_none());
        assert_eq!(
            value["events"]["button_down_event"]["shouldEndInputHandler"],
            false
        );
    }

    #[test]
    fn test_directive_round_trips_through_json() {
        let directive = Directive::StopInputHandler(StopInputHandlerDirective::new("req-1"));
        let json = serde_json::to_string(&directive).unwrap();

        assert_eq!(
            json,
            r#"{"type":"GameEngine.StopInputHandler","originatingRequestId":"req-1"}"#
        );
        let parsed: Directive = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, directive);
    }
}
