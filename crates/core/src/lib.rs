//! Session logic for the Color Changer button skill.
//!
//! The crate is a pure transform: given the stored [`session_state::Session`]
//! and one [`inbound::InboundRequest`], [`router::RequestRouter`] picks the
//! operation to run and returns the [`response::SkillResponse`] the platform
//! should receive. Nothing here blocks, spawns, or touches wire bytes.

pub mod animations;
pub mod colors;
pub mod directives;
pub mod error;
pub mod inbound;
pub mod response;
pub mod router;
pub mod session_state;
pub mod speech;
pub mod watchers;

pub use error::{Recovery, SkillError};
pub use inbound::{HardwareReport, InboundRequest, ReportedEvent, RequestKind, VoiceIntent};
pub use response::{SessionFlow, SkillResponse};
pub use router::{Operation, RequestRouter};
pub use session_state::{Mode, Session, SessionStateMachine};
