/// Name of the recognizer the platform fires when an input handler runs out of time.
pub const TIMED_OUT: &str = "timed out";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GadgetAction {
    Down,
    Up,
    Silence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    End,
    Anywhere,
}

/// One step of a recognizer pattern. An empty `gadget_ids` matches any gadget.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStep {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    gadget_ids: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<GadgetAction>,
}

impl PatternStep {
    pub fn new(action: GadgetAction) -> Self {
        Self {
            gadget_ids: vec![],
            action: Some(action),
        }
    }

    pub fn with_gadget_ids(mut self, gadget_ids: Vec<String>) -> Self {
        self.gadget_ids = gadget_ids;
        self
    }

    pub fn gadget_ids(&self) -> &[String] {
        &self.gadget_ids
    }

    pub fn action(&self) -> Option<GadgetAction> {
        self.action
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Recognizer {
    #[serde(rename = "match")]
    Match(MatchRecognizer),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchRecognizer {
    /// Allow other actions to appear between the pattern steps.
    fuzzy: bool,

    anchor: Anchor,

    pattern: Vec<PatternStep>,
}

impl MatchRecognizer {
    pub fn new(pattern: Vec<PatternStep>) -> Self {
        Self {
            fuzzy: false,
            anchor: Anchor::End,
            pattern,
        }
    }

    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn fuzzy(&self) -> bool {
        self.fuzzy
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn pattern(&self) -> &[PatternStep] {
        &self.pattern
    }
}

/// What an event sends back to the skill when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reports {
    History,
    Matches,
    Nothing,
}

/// A named event of an input handler, fired when all recognizers in `meets` are true.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    meets: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fails: Vec<String>,

    reports: Reports,

    should_end_input_handler: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_invocations: Option<u32>,
}

impl EventDefinition {
    pub fn new(meets: Vec<String>, reports: Reports) -> Self {
        Self {
            meets,
            fails: vec![],
            reports,
            should_end_input_handler: false,
            maximum_invocations: None,
        }
    }

    pub fn with_fails(mut self, fails: Vec<String>) -> Self {
        self.fails = fails;
        self
    }

    pub fn with_should_end_input_handler(mut self, should_end: bool) -> Self {
        self.should_end_input_handler = should_end;
        self
    }

    pub fn with_maximum_invocations(mut self, maximum_invocations: u32) -> Self {
        self.maximum_invocations = Some(maximum_invocations);
        self
    }

    pub fn meets(&self) -> &[String] {
        &self.meets
    }

    pub fn fails(&self) -> &[String] {
        &self.fails
    }

    pub fn reports(&self) -> Reports {
        self.reports
    }

    pub fn should_end_input_handler(&self) -> bool {
        self.should_end_input_handler
    }

    pub fn maximum_invocations(&self) -> Option<u32> {
        self.maximum_invocations
    }
}
