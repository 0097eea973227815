//! Core domain modules
//!
//! This module contains domain types and errors shared across the agent,
//! session and transport layers.

pub mod errors;
pub mod types;

// Re-export canonical types
pub use errors::{AgentError, ConfigError, ContentError, SessionError, ToolError};
pub use types::{ActionKind, AgentAction, ChatMessage, Role};
