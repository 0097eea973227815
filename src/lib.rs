//! ngamumule: a Sundanese learning companion with a rule-dispatched agent
//!
//! This library provides:
//! - Static learning content (vocabulary, lessons, cultural notes, audio paths)
//! - A tool registry with simulated general tools and Sundanese tutor tools
//! - A keyword-rule agent that records its thoughts and tool calls
//! - Chat sessions with personas, quick actions and optional speech

pub mod agent;
pub mod config;
pub mod content;
pub mod core;
pub mod session;
pub mod speech;
pub mod tools;
pub mod transport;

pub use agent::{AgentConfig, ChatAgent, Persona};
pub use config::Config;
pub use session::ChatSession;
pub use tools::ToolRegistry;
