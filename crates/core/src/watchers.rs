//! The fixed watcher set of each mode.

use color_changer_types::input_handler::{
    GadgetAction, MatchRecognizer, PatternStep, Reports, TIMED_OUT,
};
use color_changer_types::{EventDefinition, Recognizer};

use crate::directives::WatcherConfig;

pub const ROLL_CALL_TIMEOUT_MS: u64 = 50_000;
pub const ROLL_CALL_RETRY_TIMEOUT_MS: u64 = 30_000;
pub const PLAY_TIMEOUT_MS: u64 = 30_000;

pub const FIRST_BUTTON_PROXY: &str = "first_button";
pub const SECOND_BUTTON_PROXY: &str = "second_button";

pub const FIRST_BUTTON_CHECKED_IN: &str = "first_button_checked_in";
pub const SECOND_BUTTON_CHECKED_IN: &str = "second_button_checked_in";
pub const BUTTON_DOWN_EVENT: &str = "button_down_event";
pub const TIMEOUT_EVENT: &str = "timeout";

const FIRST_BUTTON_RECOGNIZER: &str = "roll_call_first_button_recognizer";
const SECOND_BUTTON_RECOGNIZER: &str = "roll_call_second_button_recognizer";
const BUTTON_DOWN_RECOGNIZER: &str = "button_down_recognizer";

/// Reports the first press of each of two not-yet-known buttons.
pub fn roll_call(timeout_ms: u64) -> WatcherConfig {
    let first_down = PatternStep::new(GadgetAction::Down)
        .with_gadget_ids(vec![FIRST_BUTTON_PROXY.to_string()]);
    let second_down = PatternStep::new(GadgetAction::Down)
        .with_gadget_ids(vec![SECOND_BUTTON_PROXY.to_string()]);

    WatcherConfig::new(timeout_ms)
        .with_proxies(&[FIRST_BUTTON_PROXY, SECOND_BUTTON_PROXY])
        .with_recognizer(
            FIRST_BUTTON_RECOGNIZER,
            Recognizer::Match(MatchRecognizer::new(vec![first_down.clone()])),
        )
        .with_recognizer(
            SECOND_BUTTON_RECOGNIZER,
            Recognizer::Match(
                MatchRecognizer::new(vec![first_down, second_down]).with_fuzzy(true),
            ),
        )
        .with_event(
            FIRST_BUTTON_CHECKED_IN,
            EventDefinition::new(vec![FIRST_BUTTON_RECOGNIZER.to_string()], Reports::Matches)
                .with_maximum_invocations(1),
        )
        .with_event(
            SECOND_BUTTON_CHECKED_IN,
            EventDefinition::new(vec![SECOND_BUTTON_RECOGNIZER.to_string()], Reports::Matches)
                .with_should_end_input_handler(true)
                .with_maximum_invocations(1),
        )
        .with_event(TIMEOUT_EVENT, timeout_event())
}

/// Reports every button press until the watcher times out.
pub fn play() -> WatcherConfig {
    WatcherConfig::new(PLAY_TIMEOUT_MS)
        .with_recognizer(
            BUTTON_DOWN_RECOGNIZER,
            Recognizer::Match(MatchRecognizer::new(vec![PatternStep::new(
                GadgetAction::Down,
            )])),
        )
        .with_event(
            BUTTON_DOWN_EVENT,
            EventDefinition::new(vec![BUTTON_DOWN_RECOGNIZER.to_string()], Reports::Matches),
        )
        .with_event(TIMEOUT_EVENT, timeout_event())
}

fn timeout_event() -> EventDefinition {
    EventDefinition::new(vec![TIMED_OUT.to_string()], Reports::History)
        .with_should_end_input_handler(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directives::start_watcher;

    #[test]
    fn test_roll_call_watcher_uses_proxies() {
        let config = roll_call(ROLL_CALL_TIMEOUT_MS);

        assert_eq!(config.timeout_ms(), 50_000);
        assert_eq!(config.proxies(), ["first_button", "second_button"]);
        assert_eq!(config.recognizers().len(), 2);

        let second = &config.events()[SECOND_BUTTON_CHECKED_IN];
        assert!(second.should_end_input_handler());
        assert_eq!(second.maximum_invocations(), Some(1));
        assert!(!config.events()[FIRST_BUTTON_CHECKED_IN].should_end_input_handler());

        match &config.recognizers()[SECOND_BUTTON_RECOGNIZER] {
            Recognizer::Match(recognizer) => {
                assert!(recognizer.fuzzy());
                assert_eq!(recognizer.pattern().len(), 2);
            }
        }
    }

    #[test]
    fn test_play_watcher_has_no_proxies() {
        let config = play();

        assert_eq!(config.timeout_ms(), PLAY_TIMEOUT_MS);
        assert!(config.proxies().is_empty());
        assert_eq!(config.recognizers().len(), 1);
        assert!(config.events().contains_key(BUTTON_DOWN_EVENT));
        assert!(config.events()[TIMEOUT_EVENT].should_end_input_handler());
    }

    #[test]
    fn test_mode_watchers_pass_validation() {
        assert!(start_watcher(roll_call(ROLL_CALL_RETRY_TIMEOUT_MS)).is_ok());
        assert!(start_watcher(play()).is_ok());
    }
}
