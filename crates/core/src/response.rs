use color_changer_types::Directive;
#[cfg(test)]
use color_changer_types::TriggerEvent;

use crate::speech;

/// What the platform should do with the session once it has played the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionFlow {
    /// Listen for the user's answer.
    OpenMicrophone,
    /// Keep the session alive with the microphone closed, waiting for
    /// button events.
    #[default]
    AwaitInput,
    EndSession,
}

impl SessionFlow {
    /// The platform's `shouldEndSession` flag for this flow.
    pub fn should_end_session(&self) -> Option<bool> {
        match self {
            SessionFlow::OpenMicrophone => Some(false),
            SessionFlow::AwaitInput => None,
            SessionFlow::EndSession => Some(true),
        }
    }
}

/// The result of handling one request, built fresh every time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkillResponse {
    speech: Option<String>,
    reprompt: Option<String>,
    directives: Vec<Directive>,
    flow: SessionFlow,
}

impl SkillResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// The generic answer for failures the skill cannot explain to the user.
    pub fn apology() -> Self {
        Self::new()
            .with_speech(speech::APOLOGY)
            .with_reprompt(speech::FALLBACK_REPROMPT)
            .with_flow(SessionFlow::OpenMicrophone)
    }

    pub fn with_speech(mut self, speech: &str) -> Self {
        self.speech = Some(speech.to_string());
        self
    }

    pub fn with_reprompt(mut self, reprompt: &str) -> Self {
        self.reprompt = Some(reprompt.to_string());
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn with_flow(mut self, flow: SessionFlow) -> Self {
        self.flow = flow;
        self
    }

    pub fn speech(&self) -> Option<&str> {
        self.speech.as_deref()
    }

    pub fn reprompt(&self) -> Option<&str> {
        self.reprompt.as_deref()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn flow(&self) -> SessionFlow {
        self.flow
    }

    #[cfg(test)]
    pub fn is_microphone_open(&self) -> bool {
        self.flow == SessionFlow::OpenMicrophone
    }

    #[cfg(test)]
    /// Triggers of the `SetLight` directives, in order.
    pub fn light_triggers(&self) -> Vec<TriggerEvent> {
        self.directives
            .iter()
            .filter_map(|d| match d {
                Directive::SetLight(light) => Some(light.trigger_event()),
                _ => None,
            })
            .collect()
    }

    #[cfg(test)]
    /// True when nothing in the response would reach the buttons.
    pub fn has_no_hardware_directives(&self) -> bool {
        self.directives.is_empty()
    }
}
