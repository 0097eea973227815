//! Canonical type definitions for the core domain
//!
//! Messages and actions are shared by the agent, the session layer and the
//! CLI transport. All other modules should `pub use` these types rather than
//! defining their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Get display label for this role
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Agent",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a chat session
///
/// Messages are immutable once created. The id is a v4 uuid so ids stay
/// unique across persona switches within one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Kind of step recorded by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Thought,
    ToolUse,
    Response,
}

impl ActionKind {
    /// Get icon for this kind
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Thought => "💭",
            Self::ToolUse => "🔧",
            Self::Response => "💬",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Thought => write!(f, "thought"),
            Self::ToolUse => write!(f, "tool_use"),
            Self::Response => write!(f, "response"),
        }
    }
}

/// One logged step of the dispatcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    pub kind: ActionKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_output: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AgentAction {
    pub fn thought(content: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Thought,
            content: content.into(),
            tool: None,
            tool_input: None,
            tool_output: None,
            timestamp: Utc::now(),
        }
    }

    pub fn tool_use(
        tool: impl Into<String>,
        input: Value,
        output: impl Into<String>,
    ) -> Self {
        let tool = tool.into();
        Self {
            kind: ActionKind::ToolUse,
            content: format!("Using {}", tool),
            tool: Some(tool),
            tool_input: Some(input),
            tool_output: Some(output.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn response(content: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Response,
            content: content.into(),
            tool: None,
            tool_input: None,
            tool_output: None,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::user("halo");
        let b = ChatMessage::user("halo");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, Role::User);
    }

    #[test]
    fn action_kind_serializes_snake_case() {
        let action = AgentAction::tool_use("calculator", json!({"expression": "1+1"}), "2");
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["kind"], "tool_use");
        assert_eq!(value["tool"], "calculator");
        assert_eq!(value["tool_output"], "2");
    }

    #[test]
    fn thought_omits_tool_fields() {
        let value = serde_json::to_value(AgentAction::thought("thinking")).unwrap();
        assert!(value.get("tool").is_none());
        assert!(value.get("tool_input").is_none());
    }
}
