pub mod animation;
pub mod directives;
pub mod envelope;
pub mod input_handler;

pub use animation::{AnimationFrame, AnimationStep};
pub use directives::{
    Directive, SetLightDirective, SetLightParameters, StartInputHandlerDirective,
    StopInputHandlerDirective, TriggerEvent,
};
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use input_handler::{Anchor, EventDefinition, GadgetAction, PatternStep, Recognizer, Reports};
