//! Chat session state
//!
//! Owns the visible conversation for one persona at a time: the message list,
//! the input buffer that quick actions prefill, and the agent whose action log
//! backs the trace view. Agent failures never escape `submit`; the user sees an
//! apology and the error stays visible in the trace.

use crate::agent::{AgentConfig, ChatAgent, Persona, QuickAction};
use crate::config::Config;
use crate::core::{AgentAction, ChatMessage, SessionError};
use crate::speech::{self, SilentSpeaker, Speaker};
use crate::tools::ToolRegistry;
use anyhow::Result;
use std::sync::Arc;

/// Number of recent actions shown by default
pub const TRACE_WINDOW: usize = 10;

pub const DEFAULT_APOLOGY: &str =
    "I'm sorry, I encountered an error while processing your request. Please try again.";

pub struct ChatSession {
    personas: Vec<Persona>,
    active: usize,
    registry: ToolRegistry,
    base_config: AgentConfig,
    agent: ChatAgent,
    messages: Vec<ChatMessage>,
    input: String,
    apology: String,
    trace_window: usize,
    speaker: Arc<dyn Speaker>,
}

impl ChatSession {
    /// Start a session on `persona_id`
    pub fn new(
        personas: Vec<Persona>,
        registry: ToolRegistry,
        base_config: AgentConfig,
        persona_id: &str,
    ) -> Result<Self> {
        let active = find_persona(&personas, persona_id)?;
        let agent = personas[active].build_agent(&base_config, &registry)?;
        let messages = vec![ChatMessage::assistant(personas[active].greeting.clone())];

        Ok(Self {
            personas,
            active,
            registry,
            base_config,
            agent,
            messages,
            input: String::new(),
            apology: DEFAULT_APOLOGY.to_string(),
            trace_window: TRACE_WINDOW,
            speaker: Arc::new(SilentSpeaker),
        })
    }

    /// Build a session from configuration; `persona` overrides the default
    pub fn from_config(config: &Config, persona: Option<&str>) -> Result<Self> {
        let persona_id = persona.unwrap_or(&config.session.default_persona);
        let session = Self::new(
            config.personas(),
            config.tool_registry(),
            config.agent_config(),
            persona_id,
        )?
        .with_apology(config.session.apology.clone())
        .with_trace_window(config.session.trace_window)
        .with_speaker(speech::from_config(&config.speech));
        Ok(session)
    }

    pub fn with_apology(mut self, apology: impl Into<String>) -> Self {
        self.apology = apology.into();
        self
    }

    pub fn with_trace_window(mut self, window: usize) -> Self {
        self.trace_window = window;
        self
    }

    pub fn with_speaker(mut self, speaker: Arc<dyn Speaker>) -> Self {
        self.speaker = speaker;
        self
    }

    pub fn persona(&self) -> &Persona {
        &self.personas[self.active]
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn agent(&self) -> &ChatAgent {
        &self.agent
    }

    /// Messages in insertion order, greeting first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Full action log of the active agent
    pub fn actions(&self) -> &[AgentAction] {
        self.agent.actions()
    }

    /// The most recent actions, at most `trace_window` of them
    pub fn trace(&self) -> &[AgentAction] {
        let actions = self.agent.actions();
        &actions[actions.len().saturating_sub(self.trace_window)..]
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Send a message and return the assistant's reply
    ///
    /// Blank input is ignored and returns `None`.
    pub async fn submit(&mut self, text: &str) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        let reply = match self.agent.process_message(text).await {
            Ok(response) => response.message,
            Err(e) => {
                tracing::warn!(persona = %self.persona().id, "Agent error: {}", e);
                ChatMessage::assistant(self.apology.clone())
            }
        };

        speech::speak_quietly(self.speaker.as_ref(), &reply.content).await;
        self.messages.push(reply.clone());
        Some(reply)
    }

    /// Submit whatever is in the input buffer and clear it
    pub async fn submit_input(&mut self) -> Option<ChatMessage> {
        let text = std::mem::take(&mut self.input);
        self.submit(&text).await
    }

    /// Switch persona, resetting the conversation to its greeting
    pub fn switch_persona(&mut self, persona_id: &str) -> Result<()> {
        let index = find_persona(&self.personas, persona_id)?;
        let agent = self.personas[index].build_agent(&self.base_config, &self.registry)?;

        tracing::info!(from = %self.persona().id, to = %persona_id, "Switching persona");
        self.active = index;
        self.agent = agent;
        self.reset();
        Ok(())
    }

    /// Clear the conversation but keep the persona
    pub fn reset(&mut self) {
        self.agent.clear_actions();
        self.messages = vec![ChatMessage::assistant(self.persona().greeting.clone())];
        self.input.clear();
    }

    pub fn quick_actions(&self) -> &[QuickAction] {
        &self.persona().quick_actions
    }

    /// Prefill the input buffer with a quick action's prompt
    pub fn apply_quick_action(&mut self, index: usize) -> Result<&str, SessionError> {
        let available = self.quick_actions().len();
        let prompt = self
            .quick_actions()
            .get(index)
            .map(|q| q.prompt.clone())
            .ok_or(SessionError::NoSuchQuickAction { index, available })?;
        self.input = prompt;
        Ok(&self.input)
    }
}

fn find_persona(personas: &[Persona], id: &str) -> Result<usize, SessionError> {
    personas
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| SessionError::UnknownPersona(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::builtin_personas;
    use crate::core::{ActionKind, Role};

    fn session(persona: &str) -> ChatSession {
        ChatSession::new(
            builtin_personas(),
            ToolRegistry::with_defaults(Default::default()),
            AgentConfig::default(),
            persona,
        )
        .unwrap()
    }

    #[test]
    fn starts_with_greeting() {
        let session = session("guru");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert!(session.messages()[0].content.starts_with("Sampurasun"));
    }

    #[tokio::test]
    async fn failure_becomes_apology() {
        let mut session = session("asisten");
        let reply = session.submit("calculate 2 +* 3").await.unwrap();
        assert_eq!(reply.content, DEFAULT_APOLOGY);

        let last = session.actions().last().unwrap();
        assert_eq!(last.kind, ActionKind::ToolUse);
        assert!(last.tool_output.as_deref().unwrap().starts_with("Error: "));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut session = session("asisten");
        assert!(session.submit("   ").await.is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn trace_keeps_last_ten() {
        let mut session = session("asisten");
        for _ in 0..5 {
            session.submit("calculate 1 + 1").await;
        }
        assert_eq!(session.actions().len(), 15);
        assert_eq!(session.trace().len(), TRACE_WINDOW);
        assert_eq!(session.trace()[0].kind, ActionKind::Response);
    }

    #[tokio::test]
    async fn switching_persona_resets_state() {
        let mut session = session("asisten");
        session.submit("weather in Bogor").await;
        assert!(!session.actions().is_empty());

        session.switch_persona("sobat").unwrap();
        assert_eq!(session.persona().id, "sobat");
        assert_eq!(session.messages().len(), 1);
        assert!(session.messages()[0].content.starts_with("Wilujeng sumping"));
        assert!(session.actions().is_empty());
    }

    #[test]
    fn unknown_persona_keeps_current() {
        let mut session = session("guru");
        let err = session.switch_persona("dalang").unwrap_err();
        assert!(err.to_string().contains("dalang"));
        assert_eq!(session.persona().id, "guru");
    }

    #[tokio::test]
    async fn quick_action_prefills_input() {
        let mut session = session("asisten");
        assert_eq!(session.apply_quick_action(1).unwrap(), "Calculate 15 * 23");

        let reply = session.submit_input().await.unwrap();
        assert!(reply.content.contains("345"));
        assert!(session.input().is_empty());

        assert!(matches!(
            session.apply_quick_action(9),
            Err(SessionError::NoSuchQuickAction { index: 9, available: 5 })
        ));
    }
}
