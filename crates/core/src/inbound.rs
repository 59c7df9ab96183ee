use std::collections::BTreeMap;

pub const YES_INTENT: &str = "AMAZON.YesIntent";
pub const NO_INTENT: &str = "AMAZON.NoIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const COLOR_INTENT: &str = "colorIntent";
pub const COLOR_SLOT: &str = "color";

/// One request as the router sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundRequest {
    /// Platform id of this request. A watcher started while handling it is
    /// identified by the same id.
    pub request_id: String,
    pub kind: RequestKind,
}

impl InboundRequest {
    pub fn new(request_id: &str, kind: RequestKind) -> Self {
        Self {
            request_id: request_id.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    SessionStart,
    Intent(VoiceIntent),
    HardwareReport(HardwareReport),
    SessionEnded,
    /// The platform reports that our previous response failed.
    SystemException(String),
    /// A request type the skill has no handler for.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceIntent {
    pub name: String,
    pub slots: BTreeMap<String, String>,
}

impl VoiceIntent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slots: BTreeMap::new(),
        }
    }

    pub fn with_slot(mut self, name: &str, value: &str) -> Self {
        self.slots.insert(name.to_string(), value.to_string());
        self
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }
}

/// Events delivered by a watcher, possibly several in one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareReport {
    pub originating_watcher_id: String,
    pub events: Vec<ReportedEvent>,
}

impl HardwareReport {
    pub fn new(originating_watcher_id: &str, events: Vec<ReportedEvent>) -> Self {
        Self {
            originating_watcher_id: originating_watcher_id.to_string(),
            events,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportedEvent {
    pub name: String,
    /// Device ids of the input events behind this event, in delivery order.
    pub device_ids: Vec<String>,
}

impl ReportedEvent {
    pub fn new(name: &str, device_ids: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            device_ids: device_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}
