//! Domain error types
//!
//! These errors represent business logic failures, distinct from infrastructure errors.
//! Using thiserror for ergonomic error handling with proper Display implementations.

use thiserror::Error;

/// Errors raised by the tool registry before or around tool execution
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required parameter was not supplied
    #[error("Missing required parameter '{param}' for tool '{tool}'")]
    MissingParameter { tool: String, param: String },

    /// A parameter was supplied with the wrong primitive type
    #[error("Parameter '{param}' for tool '{tool}' must be {expected}")]
    InvalidParameter {
        tool: String,
        param: String,
        expected: String,
    },

    /// Parameters were not a JSON object
    #[error("Parameters for tool '{0}' must be an object")]
    NotAnObject(String),
}

/// Errors related to dispatching a message through the agent
#[derive(Debug, Error)]
pub enum AgentError {
    /// The selected tool failed; the message is what the trace shows
    #[error("Tool '{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },

    /// A rule points at a tool the agent was not configured with
    #[error("Tool '{0}' is not available to this agent")]
    ToolUnavailable(String),
}

/// Errors related to chat session management
#[derive(Debug, Error)]
pub enum SessionError {
    /// Persona not found
    #[error("Persona not found: {0}")]
    UnknownPersona(String),

    /// Quick action index out of range
    #[error("No quick action at position {index} (persona has {available})")]
    NoSuchQuickAction { index: usize, available: usize },
}

/// Errors related to static content lookups
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Lesson not found: {0}")]
    UnknownLesson(String),

    #[error("Unknown vocabulary category: {0}")]
    UnknownCategory(String),

    #[error("Unknown level: {0}")]
    UnknownLevel(String),
}

/// Configuration validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    Temperature(f32),

    #[error("Agent name must not be empty")]
    EmptyName,

    #[error("Persona '{persona}' references unknown tool '{tool}'")]
    UnknownTool { persona: String, tool: String },

    #[error("Persona '{0}' is defined more than once")]
    DuplicatePersona(String),

    #[error("Default persona '{0}' is not defined")]
    UnknownDefaultPersona(String),
}
