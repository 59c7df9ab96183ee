//! Builds the directives a response carries, rejecting incomplete ones.
//!
//! A directive that fails validation here is a bug in the caller, never a
//! user mistake, so it surfaces as [`SkillError::Configuration`].

use std::collections::BTreeMap;

use color_changer_types::input_handler::TIMED_OUT;
use color_changer_types::{
    AnimationStep, Directive, EventDefinition, Recognizer, SetLightDirective, SetLightParameters,
    StartInputHandlerDirective, StopInputHandlerDirective, TriggerEvent,
};

use crate::error::{Result, SkillError};

/// Everything needed to start a watcher. Build it with the `with_*` methods
/// and hand it to [`start_watcher`].
#[derive(Debug, Clone, Default)]
pub struct WatcherConfig {
    timeout_ms: u64,
    proxies: Vec<String>,
    recognizers: BTreeMap<String, Recognizer>,
    events: BTreeMap<String, EventDefinition>,
}

impl WatcherConfig {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }

    pub fn with_proxies(mut self, proxies: &[&str]) -> Self {
        self.proxies = proxies.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_recognizer(mut self, name: &str, recognizer: Recognizer) -> Self {
        self.recognizers.insert(name.to_string(), recognizer);
        self
    }

    pub fn with_event(mut self, name: &str, event: EventDefinition) -> Self {
        self.events.insert(name.to_string(), event);
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
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

pub fn start_watcher(config: WatcherConfig) -> Result<Directive> {
    if config.timeout_ms == 0 {
        return Err(SkillError::Configuration(
            "watcher timeout must be positive".to_string(),
        ));
    }
    if config.recognizers.is_empty() {
        return Err(SkillError::Configuration(
            "watcher needs at least one recognizer".to_string(),
        ));
    }
    if config.events.is_empty() {
        return Err(SkillError::Configuration(
            "watcher needs at least one event".to_string(),
        ));
    }
    for (name, event) in &config.events {
        if event.meets().is_empty() {
            return Err(SkillError::Configuration(format!(
                "event {name} meets no recognizer"
            )));
        }
        let unknown = event
            .meets()
            .iter()
            .chain(event.fails())
            .find(|r| r.as_str() != TIMED_OUT && !config.recognizers.contains_key(r.as_str()));
        if let Some(recognizer) = unknown {
            return Err(SkillError::Configuration(format!(
                "event {name} refers to unknown recognizer {recognizer}"
            )));
        }
    }

    let mut directive =
        StartInputHandlerDirective::new(config.timeout_ms, config.recognizers, config.events);
    if !config.proxies.is_empty() {
        directive = directive.with_proxies(config.proxies);
    }
    Ok(Directive::StartInputHandler(directive))
}

pub fn stop_watcher(watcher_id: &str) -> Result<Directive> {
    if watcher_id.is_empty() {
        return Err(SkillError::Configuration(
            "cannot stop a watcher without an id".to_string(),
        ));
    }
    Ok(Directive::StopInputHandler(StopInputHandlerDirective::new(
        watcher_id,
    )))
}

/// Plays `animations` on `target_devices` when `trigger` happens. An empty
/// target list addresses every connected button.
pub fn set_light(
    trigger: TriggerEvent,
    target_devices: &[String],
    animations: Vec<AnimationStep>,
) -> Result<Directive> {
    if animations.is_empty() {
        return Err(SkillError::Configuration(
            "light directive needs at least one animation".to_string(),
        ));
    }
    Ok(Directive::SetLight(SetLightDirective::new(
        target_devices.to_vec(),
        SetLightParameters::new(trigger, animations),
    )))
}

pub fn idle_animation(
    target_devices: &[String],
    animations: Vec<AnimationStep>,
) -> Result<Directive> {
    set_light(TriggerEvent::None, target_devices, animations)
}

pub fn button_down_animation(
    target_devices: &[String],
    animations: Vec<AnimationStep>,
) -> Result<Directive> {
    set_light(TriggerEvent::ButtonDown, target_devices, animations)
}

pub fn button_up_animation(
    target_devices: &[String],
    animations: Vec<AnimationStep>,
) -> Result<Directive> {
    set_light(TriggerEvent::ButtonUp, target_devices, animations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animations;
    use color_changer_types::input_handler::{GadgetAction, MatchRecognizer, PatternStep, Reports};

    fn any_button_down() -> Recognizer {
        Recognizer::Match(MatchRecognizer::new(vec![PatternStep::new(GadgetAction::Down)]))
    }

    fn pressed_event() -> EventDefinition {
        EventDefinition::new(vec!["pressed".to_string()], Reports::Matches)
    }

    #[test]
    fn test_start_watcher_builds_directive() {
        let config = WatcherConfig::new(30000)
            .with_recognizer("pressed", any_button_down())
            .with_event("pressed_event", pressed_event())
            .with_event(
                "timeout",
                EventDefinition::new(vec![TIMED_OUT.to_string()], Reports::History)
                    .with_should_end_input_handler(true),
            );

        let directive = start_watcher(config).unwrap();

        match directive {
            Directive::StartInputHandler(start) => {
                assert_eq!(start.timeout(), 30000);
                assert!(start.proxies().is_empty());
                assert_eq!(start.events().len(), 2);
            }
            other => panic!("Expected StartInputHandler, got {:?}", other),
        }
    }

    #[test]
    fn test_start_watcher_rejects_missing_recognizers() {
        let config = WatcherConfig::new(30000).with_event("pressed_event", pressed_event());

        let err = start_watcher(config).unwrap_err();

        assert!(matches!(err, SkillError::Configuration(_)));
    }

    #[test]
    fn test_start_watcher_rejects_unknown_recognizer_reference() {
        let config = WatcherConfig::new(30000)
            .with_recognizer("other", any_button_down())
            .with_event("pressed_event", pressed_event());

        let err = start_watcher(config).unwrap_err();

        assert_eq!(
            err,
            SkillError::Configuration(
                "event pressed_event refers to unknown recognizer pressed".to_string()
            )
        );
    }

    #[test]
    fn test_start_watcher_rejects_zero_timeout_and_missing_events() {
        let no_timeout = WatcherConfig::new(0).with_recognizer("pressed", any_button_down());
        let no_events = WatcherConfig::new(10).with_recognizer("pressed", any_button_down());

        assert!(start_watcher(no_timeout).is_err());
        assert!(start_watcher(no_events).is_err());
    }

    #[test]
    fn test_stop_watcher_requires_an_id() {
        assert!(stop_watcher("").is_err());
        assert_eq!(
            stop_watcher("req-1").unwrap(),
            Directive::StopInputHandler(StopInputHandlerDirective::new("req-1"))
        );
    }

    #[test]
    fn test_set_light_scopes_to_targets() {
        let targets = vec!["dev1".to_string(), "dev2".to_string()];

        let directive = button_up_animation(&targets, animations::solid(1, "red", 200)).unwrap();

        match directive {
            Directive::SetLight(light) => {
                assert_eq!(light.target_gadgets(), targets.as_slice());
                assert_eq!(light.trigger_event(), TriggerEvent::ButtonUp);
            }
            other => panic!("Expected SetLight, got {:?}", other),
        }
        assert!(idle_animation(&targets, vec![]).is_err());
    }
}
