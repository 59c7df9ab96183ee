/// Errors raised while turning a request into a response.
///
/// Every variant except [`SkillError::Configuration`] is recovered inside the
/// crate; see [`SkillError::recovery`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("unsupported color: {0}")]
    UnsupportedColor(String),

    #[error("missing slot: {0}")]
    MissingSlot(String),

    #[error("stale input event from {received}, expecting {expected}")]
    StaleEvent { received: String, expected: String },

    #[error("malformed input event: {0}")]
    MalformedEvent(String),

    #[error("{operation} is not valid {reason}")]
    InvalidTransition {
        operation: &'static str,
        reason: String,
    },

    #[error("invalid directive: {0}")]
    Configuration(String),
}

/// How the state machine answers a request that failed with a [`SkillError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Explain what the user can say, without touching the session.
    Help,
    /// "Sorry, I didn't get that" and reopen the microphone.
    Fallback,
    /// Answer with an empty response and keep the microphone closed.
    Discard,
    /// A programming defect; propagate to the caller.
    Fatal,
}

impl SkillError {
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::UnsupportedColor(_) | Self::MissingSlot(_) => Recovery::Help,
            Self::MalformedEvent(_) => Recovery::Fallback,
            Self::StaleEvent { .. } | Self::InvalidTransition { .. } => Recovery::Discard,
            Self::Configuration(_) => Recovery::Fatal,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::UnsupportedColor(_) => "unsupported_color",
            Self::MissingSlot(_) => "missing_slot",
            Self::StaleEvent { .. } => "stale_event",
            Self::MalformedEvent(_) => "malformed_event",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Configuration(_) => "configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;
