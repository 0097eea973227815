//! Rule-dispatched chat agent and its personas

mod dispatcher;
mod persona;
pub mod rules;

pub use dispatcher::{AgentConfig, AgentResponse, ChatAgent, DEFAULT_FALLBACK};
pub use persona::{asisten, builtin_personas, guru, sobat, Persona, QuickAction};
pub use rules::{IntentRule, Matcher};
