//! Rule-driven chat agent
//!
//! Maps user text to at most one tool call per message by walking an ordered
//! rule table. Every step is recorded as an [`AgentAction`] so the session can
//! show what the agent "thought" and which tool it used.

use super::rules::{self, IntentRule};
use crate::core::{AgentAction, AgentError, ChatMessage};
use crate::tools::ToolRegistry;
use serde::Serialize;

pub const DEFAULT_FALLBACK: &str = "I'm not sure how to help with that yet. Try asking me to \
calculate something, check the weather, search the web, run some code, or work with files.";

/// Static description of an agent instance
#[derive(Debug, Clone, Serialize)]
pub struct AgentConfig {
    pub name: String,
    /// Descriptive only; no model is called
    pub model: String,
    pub tools: Vec<String>,
    /// Tool invocations allowed per message; 0 disables tool use
    pub max_iterations: usize,
    /// Carried for display; dispatch is deterministic
    pub temperature: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "Ngamumule Assistant".to_string(),
            model: "rule-based-demo".to_string(),
            tools: crate::tools::BUILTIN_TOOLS[..5]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_iterations: 5,
            temperature: 0.7,
        }
    }
}

/// Result of a single `process_message` call
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    pub message: ChatMessage,
    /// Actions recorded for this message only
    pub actions: Vec<AgentAction>,
    pub tool_used: Option<String>,
}

/// Chat agent that dispatches to tools by keyword rules
pub struct ChatAgent {
    config: AgentConfig,
    tools: ToolRegistry,
    rules: Vec<IntentRule>,
    fallback: String,
    actions: Vec<AgentAction>,
}

impl ChatAgent {
    /// Build an agent over the full rule catalog, keeping only rules whose
    /// tool is in the registry.
    pub fn new(config: AgentConfig, tools: ToolRegistry) -> Self {
        let rules = rules::catalog()
            .into_iter()
            .filter(|r| tools.contains(r.tool))
            .collect();
        Self::with_rules(config, tools, rules)
    }

    pub fn with_rules(config: AgentConfig, tools: ToolRegistry, rules: Vec<IntentRule>) -> Self {
        Self {
            config,
            tools,
            rules,
            fallback: DEFAULT_FALLBACK.to_string(),
            actions: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Full action log since creation or the last clear
    pub fn actions(&self) -> &[AgentAction] {
        &self.actions
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    /// Handle one user message
    ///
    /// On tool failure the `tool_use` action is still recorded with an
    /// `Error: ...` output before the error is returned.
    pub async fn process_message(&mut self, text: &str) -> Result<AgentResponse, AgentError> {
        let start = self.actions.len();
        let lowered = text.to_lowercase();

        let Some(rule) = self.rules.iter().find(|r| r.matches(&lowered, text)) else {
            tracing::debug!(agent = %self.config.name, "No rule matched, using fallback");
            return Ok(AgentResponse {
                message: ChatMessage::assistant(self.fallback.clone()),
                actions: Vec::new(),
                tool_used: None,
            });
        };

        tracing::debug!(intent = rule.intent, tool = rule.tool, "Rule matched");
        if !self.tools.contains(rule.tool) {
            return Err(AgentError::ToolUnavailable(rule.tool.to_string()));
        }
        self.actions.push(AgentAction::thought(rule.thought));

        if self.config.max_iterations == 0 {
            tracing::info!(tool = rule.tool, "Tool use disabled (max_iterations = 0)");
            let reply = self.fallback.clone();
            self.actions.push(AgentAction::response(&reply));
            return Ok(AgentResponse {
                message: ChatMessage::assistant(reply),
                actions: self.actions[start..].to_vec(),
                tool_used: None,
            });
        }

        let tool = rule.tool;
        let reply_prefix = rule.reply_prefix;
        let params = (rule.build_params)(text);

        let outcome = self.tools.execute(tool, params.clone()).await;
        let output = match outcome {
            Ok(result) if result.success => result.output,
            Ok(result) => {
                return Err(self.record_failure(tool, params, result.output));
            }
            Err(e) => {
                return Err(self.record_failure(tool, params, e.to_string()));
            }
        };

        self.actions
            .push(AgentAction::tool_use(tool, params, output.clone()));

        let reply = format!("{}\n\n{}", reply_prefix, output);
        self.actions.push(AgentAction::response(&reply));

        Ok(AgentResponse {
            message: ChatMessage::assistant(reply),
            actions: self.actions[start..].to_vec(),
            tool_used: Some(tool.to_string()),
        })
    }

    fn record_failure(
        &mut self,
        tool: &str,
        params: serde_json::Value,
        message: String,
    ) -> AgentError {
        tracing::warn!(tool, error = %message, "Tool failed");
        self.actions.push(AgentAction::tool_use(
            tool,
            params,
            format!("Error: {}", message),
        ));
        AgentError::ToolFailed {
            tool: tool.to_string(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionKind;

    fn agent() -> ChatAgent {
        let registry = ToolRegistry::with_defaults(Default::default());
        ChatAgent::new(AgentConfig::default(), registry)
    }

    #[tokio::test]
    async fn calculator_rule_records_three_actions() {
        let mut agent = agent();
        let response = agent.process_message("calculate 15 * 23").await.unwrap();

        assert!(response.message.content.contains("345"));
        assert_eq!(response.tool_used.as_deref(), Some("calculator"));
        let kinds: Vec<_> = agent.actions().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::Thought, ActionKind::ToolUse, ActionKind::Response]
        );
        assert_eq!(agent.actions()[1].tool_output.as_deref(), Some("15 * 23 = 345"));
    }

    #[tokio::test]
    async fn unmatched_input_uses_fallback() {
        let mut agent = agent();
        let response = agent.process_message("hello there").await.unwrap();
        assert_eq!(response.message.content, DEFAULT_FALLBACK);
        assert!(response.actions.is_empty());
        assert!(agent.actions().is_empty());
    }

    #[tokio::test]
    async fn tool_failure_is_logged_then_returned() {
        let mut agent = agent();
        let err = agent.process_message("calculate 5 / 0").await.unwrap_err();
        assert!(matches!(err, AgentError::ToolFailed { ref tool, .. } if tool == "calculator"));

        let last = agent.actions().last().unwrap();
        assert_eq!(last.kind, ActionKind::ToolUse);
        assert!(last.tool_output.as_deref().unwrap().starts_with("Error: "));
    }

    #[tokio::test]
    async fn zero_iterations_disables_tools() {
        let registry = ToolRegistry::with_defaults(Default::default());
        let config = AgentConfig {
            max_iterations: 0,
            ..AgentConfig::default()
        };
        let mut agent = ChatAgent::new(config, registry);
        let response = agent.process_message("calculate 2 + 2").await.unwrap();

        assert!(response.tool_used.is_none());
        assert!(agent
            .actions()
            .iter()
            .all(|a| a.kind != ActionKind::ToolUse));
    }

    #[tokio::test]
    async fn rule_without_tool_is_unavailable() {
        let mut agent = ChatAgent::with_rules(
            AgentConfig::default(),
            ToolRegistry::new(),
            rules::catalog(),
        );
        let err = agent.process_message("weather please").await.unwrap_err();
        assert!(matches!(err, AgentError::ToolUnavailable(ref t) if t == "weather"));
        assert!(agent.actions().is_empty());
    }

    #[tokio::test]
    async fn rules_follow_registry_subset() {
        let registry = ToolRegistry::with_defaults(Default::default())
            .subset(&["weather"])
            .unwrap();
        let mut agent = ChatAgent::new(AgentConfig::default(), registry);
        assert_eq!(agent.rules().len(), 1);

        let response = agent.process_message("calculate 1 + 1").await.unwrap();
        assert!(response.tool_used.is_none());
    }
}
