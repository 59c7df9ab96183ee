use tracing::{debug, error, warn};

use crate::error::{Recovery, Result, SkillError};
use crate::inbound::{
    CANCEL_INTENT, COLOR_INTENT, COLOR_SLOT, HELP_INTENT, HardwareReport, InboundRequest,
    NO_INTENT, RequestKind, STOP_INTENT, VoiceIntent, YES_INTENT,
};
use crate::response::SkillResponse;
use crate::session_state::{Mode, Session, SessionStateMachine};
use crate::watchers;

/// The single thing a request asks the state machine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    StartSession { timeout_ms: u64 },
    RestartRollCall,
    FirstCheckIn { device_id: String },
    SecondCheckIn { device_ids: Vec<String> },
    RollCallTimeout,
    ColorChoice { requested: Option<String> },
    PlayTimeout,
    ButtonDown { device_id: String },
    ExitYes,
    ExitNo,
    Help,
    Stop,
    SessionEnded,
    Fallback,
    Discard,
}

pub struct RequestRouter;

impl RequestRouter {
    /// Picks the operation for `request` given the current session.
    ///
    /// Routing failures are already mapped to their recovery operation, so
    /// this never fails.
    pub fn resolve(session: &Session, request: &InboundRequest) -> Operation {
        let resolved = match &request.kind {
            RequestKind::SessionStart => Ok(Operation::StartSession {
                timeout_ms: watchers::ROLL_CALL_TIMEOUT_MS,
            }),
            RequestKind::Intent(intent) => Ok(Self::resolve_intent(session, intent)),
            RequestKind::HardwareReport(report) => Self::resolve_report(session, report),
            RequestKind::SessionEnded => Ok(Operation::SessionEnded),
            RequestKind::SystemException(details) => {
                error!(
                    request_id = %request.request_id,
                    details = %details,
                    "platform reported an exception"
                );
                Ok(Operation::Discard)
            }
            RequestKind::Unrecognized => {
                debug!(request_id = %request.request_id, "no handler for request type");
                Ok(Operation::Fallback)
            }
        };

        match resolved {
            Ok(operation) => operation,
            Err(err) => {
                warn!(
                    request_id = %request.request_id,
                    error = %err,
                    code = err.error_code(),
                    "request not routable"
                );
                match err.recovery() {
                    Recovery::Help => Operation::Help,
                    Recovery::Fallback | Recovery::Fatal => Operation::Fallback,
                    Recovery::Discard => Operation::Discard,
                }
            }
        }
    }

    /// Resolves and runs `request`, mutating `session` in place.
    pub fn route(session: &mut Session, request: &InboundRequest) -> Result<SkillResponse> {
        let operation = Self::resolve(session, request);
        debug!(request_id = %request.request_id, ?operation, "routed request");
        SessionStateMachine::new(session, &request.request_id).apply(operation)
    }

    fn resolve_intent(session: &Session, intent: &VoiceIntent) -> Operation {
        let confirming = session.awaiting_exit_confirmation;
        match (intent.name.as_str(), session.mode) {
            (YES_INTENT, Mode::RollCall) if confirming => Operation::RestartRollCall,
            (YES_INTENT, Mode::Exit) if confirming => Operation::ExitYes,
            (NO_INTENT, Mode::RollCall) if confirming => Operation::Stop,
            (NO_INTENT, Mode::Exit) if confirming => Operation::ExitNo,
            (YES_INTENT | NO_INTENT | HELP_INTENT, _) => Operation::Help,
            (STOP_INTENT | CANCEL_INTENT, _) => Operation::Stop,
            (COLOR_INTENT, Mode::Play) => Operation::ColorChoice {
                requested: intent.slot(COLOR_SLOT).map(str::to_string),
            },
            (name, mode) => {
                debug!(intent = name, ?mode, "no handler for intent");
                Operation::Fallback
            }
        }
    }

    fn resolve_report(session: &Session, report: &HardwareReport) -> Result<Operation> {
        if !session.is_active_watcher(&report.originating_watcher_id) {
            return Err(SkillError::StaleEvent {
                received: report.originating_watcher_id.clone(),
                expected: session
                    .active_watcher_id
                    .clone()
                    .unwrap_or_else(|| "no watcher".to_string()),
            });
        }

        let relevant: &[&str] = match session.mode {
            Mode::RollCall => &[
                watchers::FIRST_BUTTON_CHECKED_IN,
                watchers::SECOND_BUTTON_CHECKED_IN,
                watchers::TIMEOUT_EVENT,
            ],
            Mode::Play => &[watchers::BUTTON_DOWN_EVENT, watchers::TIMEOUT_EVENT],
            Mode::Exit => &[],
        };

        let Some(event) = report
            .events
            .iter()
            .find(|event| relevant.contains(&event.name.as_str()))
        else {
            debug!(mode = ?session.mode, "report carries no event for this mode");
            return Ok(Operation::Discard);
        };

        let first_device = || {
            event.device_ids.first().cloned().ok_or_else(|| {
                SkillError::MalformedEvent(format!("{} carries no device id", event.name))
            })
        };

        match (session.mode, event.name.as_str()) {
            (Mode::RollCall, watchers::FIRST_BUTTON_CHECKED_IN) => Ok(Operation::FirstCheckIn {
                device_id: first_device()?,
            }),
            (Mode::RollCall, watchers::SECOND_BUTTON_CHECKED_IN) => Ok(Operation::SecondCheckIn {
                device_ids: event.device_ids.clone(),
            }),
            (Mode::RollCall, watchers::TIMEOUT_EVENT) => Ok(Operation::RollCallTimeout),
            (Mode::Play, watchers::BUTTON_DOWN_EVENT) => Ok(Operation::ButtonDown {
                device_id: first_device()?,
            }),
            (Mode::Play, watchers::TIMEOUT_EVENT) => Ok(Operation::PlayTimeout),
            _ => Ok(Operation::Discard),
        }
    }
}
