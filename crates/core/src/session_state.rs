use color_changer_types::AnimationStep;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::animations;
use crate::colors::PlayColor;
use crate::directives;
use crate::error::{Recovery, Result, SkillError};
use crate::response::{SessionFlow, SkillResponse};
use crate::router::Operation;
use crate::speech;
use crate::watchers;

/// Number of buttons a roll call registers.
pub const BUTTONS_IN_PLAY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Waiting for both buttons to be pressed once.
    #[default]
    RollCall,
    /// Both buttons registered; the user picks colors and presses buttons.
    Play,
    /// Play timed out and the user is asked whether to quit.
    Exit,
}

/// Everything the skill remembers between two requests of one session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub mode: Mode,
    /// Registered buttons in check-in order. Never longer than two.
    pub registered_device_ids: Vec<String>,
    pub button_check_in_count: u8,
    /// Id of the only watcher whose events are still accepted.
    pub active_watcher_id: Option<String>,
    pub chosen_color: Option<PlayColor>,
    /// A yes/no answer is expected for "more time?" or "quit?".
    pub awaiting_exit_confirmation: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_roll_call_complete(&self) -> bool {
        usize::from(self.button_check_in_count) == BUTTONS_IN_PLAY
    }

    /// Position of a button in check-in order, if it was registered.
    pub fn device_index(&self, device_id: &str) -> Option<usize> {
        self.registered_device_ids
            .iter()
            .position(|id| id == device_id)
    }

    pub fn is_active_watcher(&self, watcher_id: &str) -> bool {
        self.active_watcher_id.as_deref() == Some(watcher_id)
    }
}

/// Runs one operation against a session.
///
/// Each handler checks its precondition first and builds every directive
/// before it changes the session, so a rejected request leaves the session
/// exactly as it found it.
pub struct SessionStateMachine<'a> {
    session: &'a mut Session,
    request_id: &'a str,
}

impl<'a> SessionStateMachine<'a> {
    pub fn new(session: &'a mut Session, request_id: &'a str) -> Self {
        Self {
            session,
            request_id,
        }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    /// Runs `operation` and recovers from every error except configuration
    /// errors, which are returned to the caller.
    pub fn apply(&mut self, operation: Operation) -> Result<SkillResponse> {
        debug!(?operation, mode = ?self.session.mode, "applying operation");
        match self.dispatch(operation) {
            Ok(response) => Ok(response),
            Err(err) => match err.recovery() {
                Recovery::Help => {
                    debug!(error = %err, "answering with help");
                    self.help()
                }
                Recovery::Fallback => {
                    warn!(error = %err, "falling back to default handler");
                    Ok(self.fallback())
                }
                Recovery::Discard => {
                    debug!(error = %err, "ignoring request");
                    Ok(self.discard())
                }
                Recovery::Fatal => Err(err),
            },
        }
    }

    fn dispatch(&mut self, operation: Operation) -> Result<SkillResponse> {
        match operation {
            Operation::StartSession { timeout_ms } => {
                self.start_session(&speech::waiting(speech::WELCOME), timeout_ms)
            }
            Operation::RestartRollCall => self.start_session(
                &speech::waiting(speech::ROLL_CALL_RETRY),
                watchers::ROLL_CALL_RETRY_TIMEOUT_MS,
            ),
            Operation::FirstCheckIn { device_id } => self.handle_first_check_in(&device_id),
            Operation::SecondCheckIn { device_ids } => self.handle_second_check_in(&device_ids),
            Operation::RollCallTimeout => self.handle_roll_call_timeout(),
            Operation::ColorChoice { requested } => self.handle_color_choice(requested.as_deref()),
            Operation::PlayTimeout => self.handle_play_timeout(),
            Operation::ButtonDown { device_id } => self.handle_button_down(&device_id),
            Operation::ExitYes => self.handle_exit_yes(),
            Operation::ExitNo => self.handle_exit_no(),
            Operation::Help => self.help(),
            Operation::Stop => Ok(self.stop()),
            Operation::SessionEnded => Ok(self.session_ended()),
            Operation::Fallback => Ok(self.fallback()),
            Operation::Discard => Ok(self.discard()),
        }
    }

    /// Starts (or restarts) roll call with a fresh session.
    pub fn start_session(&mut self, speech: &str, timeout_ms: u64) -> Result<SkillResponse> {
        let timeout_ms = if timeout_ms == 0 {
            warn!(
                default_ms = watchers::ROLL_CALL_TIMEOUT_MS,
                "roll call requested without a timeout, using the default"
            );
            watchers::ROLL_CALL_TIMEOUT_MS
        } else {
            timeout_ms
        };

        let start = directives::start_watcher(watchers::roll_call(timeout_ms))?;
        let down = directives::button_down_animation(&[], animations::solid(1, "green", 1000))?;
        let up = directives::button_up_animation(&[], animations::solid(1, "white", 4000))?;

        *self.session = Session::default();
        self.session.active_watcher_id = Some(self.request_id.to_string());
        info!(watcher_id = self.request_id, timeout_ms, "roll call started");

        Ok(SkillResponse::new()
            .with_speech(speech)
            .with_directive(start)
            .with_directive(down)
            .with_directive(up)
            .with_flow(SessionFlow::AwaitInput))
    }

    pub fn handle_first_check_in(&mut self, device_id: &str) -> Result<SkillResponse> {
        self.require_roll_call("first check-in")?;
        if self.session.button_check_in_count != 0 {
            return Err(SkillError::InvalidTransition {
                operation: "first check-in",
                reason: format!(
                    "with {} buttons already checked in",
                    self.session.button_check_in_count
                ),
            });
        }

        let targets = vec![device_id.to_string()];
        let idle = directives::idle_animation(&targets, animations::solid(1, "green", 8000))?;

        self.session.registered_device_ids = targets;
        self.session.button_check_in_count = 1;
        info!(device_id, "first button checked in");

        Ok(SkillResponse::new()
            .with_speech(&speech::waiting(speech::FIRST_BUTTON_CHECKED_IN))
            .with_directive(idle)
            .with_flow(SessionFlow::AwaitInput))
    }

    /// Completes roll call. `reported` is every device id of the batch in
    /// delivery order.
    pub fn handle_second_check_in(&mut self, reported: &[String]) -> Result<SkillResponse> {
        self.require_roll_call("second check-in")?;
        let (devices, greeting) = match self.session.button_check_in_count {
            0 => {
                let mut distinct: Vec<String> = Vec::with_capacity(BUTTONS_IN_PLAY);
                for id in reported {
                    if !distinct.contains(id) {
                        distinct.push(id.clone());
                    }
                }
                if distinct.len() < BUTTONS_IN_PLAY {
                    return Err(SkillError::MalformedEvent(format!(
                        "second check-in reported {} distinct buttons",
                        distinct.len()
                    )));
                }
                distinct.truncate(BUTTONS_IN_PLAY);
                (distinct, speech::BOTH_BUTTONS_CHECKED_IN)
            }
            1 => {
                let first = self.session.registered_device_ids.first().cloned().ok_or_else(|| {
                    SkillError::MalformedEvent("first button was never registered".to_string())
                })?;
                let second = reported
                    .iter()
                    .find(|id| **id != first)
                    .cloned()
                    .ok_or_else(|| {
                        SkillError::MalformedEvent(
                            "second check-in reported no new button".to_string(),
                        )
                    })?;
                (vec![first, second], speech::SECOND_BUTTON_CHECKED_IN)
            }
            count => {
                return Err(SkillError::InvalidTransition {
                    operation: "second check-in",
                    reason: format!("with {count} buttons already checked in"),
                });
            }
        };

        let idle = directives::idle_animation(&devices, animations::fade_in(1, "green", 5000))?;
        let [down, up] = default_button_animations(&[])?;

        info!(devices = ?devices, "roll call complete");
        self.session.registered_device_ids = devices;
        self.session.button_check_in_count = BUTTONS_IN_PLAY as u8;
        self.session.active_watcher_id = None;
        self.session.mode = Mode::Play;

        Ok(SkillResponse::new()
            .with_speech(&format!("{greeting}{}", speech::PICK_A_COLOR))
            .with_reprompt(speech::PICK_A_COLOR_REPROMPT)
            .with_directive(idle)
            .with_directive(down)
            .with_directive(up)
            .with_flow(SessionFlow::OpenMicrophone))
    }

    pub fn handle_roll_call_timeout(&mut self) -> Result<SkillResponse> {
        self.require_roll_call("roll call timeout")?;
        if self.session.is_roll_call_complete() {
            return Err(SkillError::InvalidTransition {
                operation: "roll call timeout",
                reason: "after roll call completed".to_string(),
            });
        }

        let targets = self.session.registered_device_ids.clone();
        let idle = directives::idle_animation(&targets, animations::fade("black", 1000))?;
        let [down, up] = default_button_animations(&targets)?;

        self.session.awaiting_exit_confirmation = true;
        self.session.active_watcher_id = None;
        info!(
            checked_in = self.session.button_check_in_count,
            "roll call timed out"
        );

        Ok(SkillResponse::new()
            .with_speech(speech::ROLL_CALL_TIMEOUT)
            .with_reprompt(speech::ROLL_CALL_TIMEOUT_REPROMPT)
            .with_directive(idle)
            .with_directive(down)
            .with_directive(up)
            .with_flow(SessionFlow::OpenMicrophone))
    }

    pub fn handle_color_choice(&mut self, requested: Option<&str>) -> Result<SkillResponse> {
        self.require_mode(Mode::Play, "color choice")?;
        let requested = requested.ok_or_else(|| SkillError::MissingSlot("color".to_string()))?;
        let color: PlayColor = requested.parse()?;

        let targets = self.session.registered_device_ids.clone();
        let start = directives::start_watcher(watchers::play())?;
        let idle =
            directives::idle_animation(&targets, animations::breathe(30, color.dimmed(), 450))?;
        let down =
            directives::button_down_animation(&targets, animations::solid(1, color.name(), 2000))?;
        let up =
            directives::button_up_animation(&targets, animations::solid(1, color.name(), 200))?;

        self.session.chosen_color = Some(color);
        self.session.active_watcher_id = Some(self.request_id.to_string());
        info!(%color, watcher_id = self.request_id, "color chosen, watching buttons");

        Ok(SkillResponse::new()
            .with_speech(&speech::color_confirmed(color.name()))
            .with_directive(start)
            .with_directive(idle)
            .with_directive(down)
            .with_directive(up)
            .with_flow(SessionFlow::AwaitInput))
    }

    pub fn handle_play_timeout(&mut self) -> Result<SkillResponse> {
        self.require_mode(Mode::Play, "play timeout")?;

        let targets = self.session.registered_device_ids.clone();
        let color = self.session.chosen_color.map_or("black", |c| c.name());
        let idle = directives::idle_animation(&targets, animations::fade_out(1, color, 2000))?;
        let [down, up] = default_button_animations(&targets)?;

        self.session.awaiting_exit_confirmation = true;
        self.session.active_watcher_id = None;
        self.session.mode = Mode::Exit;
        info!("play timed out, asking to exit");

        Ok(SkillResponse::new()
            .with_speech(speech::PLAY_TIMEOUT)
            .with_reprompt(speech::PLAY_TIMEOUT_REPROMPT)
            .with_directive(idle)
            .with_directive(down)
            .with_directive(up)
            .with_flow(SessionFlow::OpenMicrophone))
    }

    /// Announces which registered button was pressed. Presses of unknown
    /// buttons get a spoken notice and never a light directive.
    pub fn handle_button_down(&mut self, device_id: &str) -> Result<SkillResponse> {
        self.require_mode(Mode::Play, "button press")?;

        let text = match self.session.device_index(device_id) {
            Some(index) => {
                debug!(device_id, index, "registered button pressed");
                speech::button_pressed(index + 1)
            }
            None => {
                warn!(device_id, "button event from a gadget that missed roll call");
                speech::waiting(speech::UNREGISTERED_BUTTON)
            }
        };

        Ok(SkillResponse::new()
            .with_speech(&text)
            .with_flow(SessionFlow::AwaitInput))
    }

    pub fn handle_exit_yes(&mut self) -> Result<SkillResponse> {
        self.require_exit_confirmation(Mode::Exit, "exit confirmation")?;
        info!("exit confirmed");
        Ok(self.session_ended())
    }

    pub fn handle_exit_no(&mut self) -> Result<SkillResponse> {
        self.require_exit_confirmation(Mode::Exit, "exit refusal")?;

        self.session.mode = Mode::Play;
        self.session.awaiting_exit_confirmation = false;
        info!("exit declined, back to play");

        Ok(SkillResponse::new()
            .with_speech(&speech::keep_going())
            .with_reprompt(speech::KEEP_GOING_REPROMPT)
            .with_flow(SessionFlow::OpenMicrophone))
    }

    /// Stops the running watcher so it cannot interrupt, then explains what
    /// to do next. Before roll call completes this asks whether to continue.
    pub fn help(&mut self) -> Result<SkillResponse> {
        let mut response = SkillResponse::new().with_flow(SessionFlow::OpenMicrophone);
        if let Some(watcher_id) = &self.session.active_watcher_id {
            response = response.with_directive(directives::stop_watcher(watcher_id)?);
        }

        if self.session.is_roll_call_complete() {
            Ok(response
                .with_speech(&format!("{}{}", speech::PLAY_HELP, speech::PLAY_HELP_REPROMPT))
                .with_reprompt(speech::PLAY_HELP_REPROMPT))
        } else {
            self.session.awaiting_exit_confirmation = true;
            Ok(response
                .with_speech(&format!(
                    "{}{}",
                    speech::ROLL_CALL_HELP,
                    speech::ROLL_CALL_HELP_REPROMPT
                ))
                .with_reprompt(speech::ROLL_CALL_HELP_REPROMPT))
        }
    }

    pub fn stop(&mut self) -> SkillResponse {
        info!("session stopped by user");
        SkillResponse::new()
            .with_speech(speech::GOODBYE)
            .with_flow(SessionFlow::EndSession)
    }

    pub fn session_ended(&mut self) -> SkillResponse {
        SkillResponse::new().with_flow(SessionFlow::EndSession)
    }

    pub fn fallback(&mut self) -> SkillResponse {
        SkillResponse::new()
            .with_speech(&speech::fallback())
            .with_reprompt(speech::FALLBACK_REPROMPT)
            .with_flow(SessionFlow::OpenMicrophone)
    }

    pub fn discard(&mut self) -> SkillResponse {
        SkillResponse::new().with_flow(SessionFlow::AwaitInput)
    }

    fn require_roll_call(&self, operation: &'static str) -> Result<()> {
        self.require_mode(Mode::RollCall, operation)
    }

    fn require_mode(&self, mode: Mode, operation: &'static str) -> Result<()> {
        if self.session.mode == mode {
            Ok(())
        } else {
            Err(SkillError::InvalidTransition {
                operation,
                reason: format!("in {:?} mode", self.session.mode),
            })
        }
    }

    fn require_exit_confirmation(&self, mode: Mode, operation: &'static str) -> Result<()> {
        self.require_mode(mode, operation)?;
        if self.session.awaiting_exit_confirmation {
            Ok(())
        } else {
            Err(SkillError::InvalidTransition {
                operation,
                reason: "without a pending question".to_string(),
            })
        }
    }
}

/// Button down/up reactions close to the buttons' factory behavior.
fn default_button_animations(targets: &[String]) -> Result<[color_changer_types::Directive; 2]> {
    Ok([
        directives::button_down_animation(targets, default_down())?,
        directives::button_up_animation(targets, animations::solid(1, "black", 100))?,
    ])
}

fn default_down() -> Vec<AnimationStep> {
    animations::fade_out(1, "blue", 200)
}
