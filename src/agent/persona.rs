//! Agent personas
//!
//! A persona is a named agent profile: greeting, tone, the tools it may use
//! and a few canned prompts. Built-ins cover the general assistant and the two
//! Sundanese tutors; more can be declared in the config file.

use super::dispatcher::{AgentConfig, ChatAgent};
use crate::core::ToolError;
use crate::tools::ToolRegistry;
use serde::{Deserialize, Serialize};

/// A canned prompt offered as a one-click suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub prompt: String,
}

impl QuickAction {
    pub fn new(label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub greeting: String,
    #[serde(default)]
    pub tone: String,
    pub tools: Vec<String>,
    #[serde(default)]
    pub quick_actions: Vec<QuickAction>,
    /// Reply used when no rule matches
    #[serde(default)]
    pub fallback: Option<String>,
}

impl Persona {
    /// Build a dispatcher restricted to this persona's tools
    pub fn build_agent(
        &self,
        base: &AgentConfig,
        registry: &ToolRegistry,
    ) -> Result<ChatAgent, ToolError> {
        let tools = registry.subset(&self.tools[..])?;
        let config = AgentConfig {
            name: self.name.clone(),
            tools: self.tools.clone(),
            ..base.clone()
        };
        let agent = ChatAgent::new(config, tools);
        Ok(match &self.fallback {
            Some(text) => agent.with_fallback(text.clone()),
            None => agent,
        })
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn asisten() -> Persona {
    Persona {
        id: "asisten".to_string(),
        name: "Asisten".to_string(),
        greeting: "Hi! I'm your AI assistant. I can search the web, do calculations, check the \
                   weather, run code, and work with files. What can I help you with?"
            .to_string(),
        tone: "helpful and concise".to_string(),
        tools: strings(&[
            "web_search",
            "calculator",
            "weather",
            "execute_code",
            "file_operations",
        ]),
        quick_actions: vec![
            QuickAction::new("Search", "Search for the history of angklung"),
            QuickAction::new("Calculate", "Calculate 15 * 23"),
            QuickAction::new("Weather", "What's the weather in Bandung?"),
            QuickAction::new("Run code", "Run this ```python\nprint(\"Wilujeng sumping!\")\n```"),
            QuickAction::new("Files", "List files in the workspace"),
        ],
        fallback: None,
    }
}

pub fn guru() -> Persona {
    Persona {
        id: "guru".to_string(),
        name: "Guru Basa".to_string(),
        greeting: "Sampurasun! I'm Guru Basa, your Sundanese teacher. Ask me for vocabulary, \
                   grammar explanations, or how to pronounce a word."
            .to_string(),
        tone: "patient and encouraging".to_string(),
        tools: strings(&["vocabulary", "grammar", "pronunciation"]),
        quick_actions: vec![
            QuickAction::new("Greetings", "Teach me some greeting words"),
            QuickAction::new("Numbers", "Show me number vocabulary"),
            QuickAction::new("Grammar", "Explain grammar for plurals"),
            QuickAction::new("Pronounce", "How do I pronounce hatur nuhun?"),
        ],
        fallback: Some(
            "Punten, I didn't catch that. Try asking for vocabulary, grammar, or \
             pronunciation help."
                .to_string(),
        ),
    }
}

pub fn sobat() -> Persona {
    Persona {
        id: "sobat".to_string(),
        name: "Sobat Ngobrol".to_string(),
        greeting: "Wilujeng sumping! I'm Sobat, your conversation partner. Let's practise \
                   speaking Sundanese together."
            .to_string(),
        tone: "friendly and casual".to_string(),
        tools: strings(&["conversation", "vocabulary", "pronunciation"]),
        quick_actions: vec![
            QuickAction::new("Introductions", "Let's practice a conversation introducing ourselves"),
            QuickAction::new("Market", "Practice bargaining at the pasar"),
            QuickAction::new("Warung", "Practice ordering food at a warung"),
            QuickAction::new("Food words", "Teach me food words"),
        ],
        fallback: Some(
            "Hampura, I'm not sure what you mean. Want to practise a conversation or learn \
             some words?"
                .to_string(),
        ),
    }
}

/// Built-in personas; the first is the default
pub fn builtin_personas() -> Vec<Persona> {
    vec![asisten(), guru(), sobat()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tools_exist_in_registry() {
        let registry = ToolRegistry::with_defaults(Default::default());
        for persona in builtin_personas() {
            for tool in &persona.tools {
                assert!(registry.contains(tool), "{} uses unknown {}", persona.id, tool);
            }
        }
    }

    #[tokio::test]
    async fn guru_agent_only_sees_tutor_tools() {
        let registry = ToolRegistry::with_defaults(Default::default());
        let mut agent = guru()
            .build_agent(&AgentConfig::default(), &registry)
            .unwrap();
        assert_eq!(agent.config().name, "Guru Basa");
        assert_eq!(agent.tools().names(), ["vocabulary", "grammar", "pronunciation"]);

        let response = agent.process_message("calculate 2 + 2").await.unwrap();
        assert!(response.tool_used.is_none());
        assert!(response.message.content.starts_with("Punten"));
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let registry = ToolRegistry::with_defaults(Default::default());
        let persona = Persona {
            tools: vec!["teleport".to_string()],
            ..asisten()
        };
        let err = persona
            .build_agent(&AgentConfig::default(), &registry)
            .err()
            .unwrap();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "teleport"));
    }

    #[test]
    fn persona_parses_from_toml() {
        let persona: Persona = toml::from_str(
            r#"
            id = "pasar"
            name = "Padagang"
            greeting = "Mangga, Neng!"
            tools = ["conversation"]

            [[quick_actions]]
            label = "Bargain"
            prompt = "Practice at the market"
            "#,
        )
        .unwrap();
        assert_eq!(persona.quick_actions.len(), 1);
        assert!(persona.fallback.is_none());
        assert!(persona.tone.is_empty());
    }
}
