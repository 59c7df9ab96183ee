//! HTTP and command-line front end of the Color Changer skill.

pub mod config;
pub mod envelope;
pub mod handler;
pub mod server;
pub mod store;

pub use handler::{HandlerError, SkillHandler};
pub use store::{InMemorySessionStore, SessionStore};
