//! Integration tests for the rule-dispatched agent

use ngamumule::agent::{builtin_personas, guru, sobat, AgentConfig, ChatAgent, DEFAULT_FALLBACK};
use ngamumule::content::AudioManifest;
use ngamumule::core::{ActionKind, Role};
use ngamumule::tools::ToolRegistry;
use serde_json::json;
use std::collections::HashSet;

fn registry() -> ToolRegistry {
    ToolRegistry::with_defaults(AudioManifest::default())
}

fn agent_for(persona: ngamumule::Persona) -> ChatAgent {
    persona
        .build_agent(&AgentConfig::default(), &registry())
        .unwrap()
}

#[tokio::test]
async fn test_tutor_replies_are_deterministic() {
    let prompts = [
        (guru(), "Teach me some family words"),
        (guru(), "Explain grammar for questions"),
        (guru(), "How do I pronounce wilujeng enjing?"),
        (sobat(), "Let's practice at the market"),
    ];

    for (persona, prompt) in prompts {
        let mut first = agent_for(persona.clone());
        let mut second = agent_for(persona);

        let a = first.process_message(prompt).await.unwrap();
        let b = second.process_message(prompt).await.unwrap();

        assert_eq!(a.message.content, b.message.content, "prompt: {}", prompt);
        assert_eq!(a.tool_used, b.tool_used);
        assert!(a.tool_used.is_some(), "no tool for: {}", prompt);
    }
}

#[tokio::test]
async fn test_unmatched_input_falls_back_without_actions() {
    let mut agent = ChatAgent::new(AgentConfig::default(), registry());
    let response = agent.process_message("Good evening!").await.unwrap();

    assert_eq!(response.message.role, Role::Assistant);
    assert_eq!(response.message.content, DEFAULT_FALLBACK);
    assert!(agent.actions().is_empty());
}

#[tokio::test]
async fn test_calculate_reports_product() {
    let mut agent = ChatAgent::new(AgentConfig::default(), registry());
    let response = agent.process_message("calculate 15 * 23").await.unwrap();
    assert!(response.message.content.contains("345"));

    let tool_use = response
        .actions
        .iter()
        .find(|a| a.kind == ActionKind::ToolUse)
        .unwrap();
    assert_eq!(tool_use.tool.as_deref(), Some("calculator"));
    assert_eq!(tool_use.tool_input, Some(json!({ "expression": "15 * 23" })));
}

#[tokio::test]
async fn test_action_log_accumulates_until_cleared() {
    let mut agent = ChatAgent::new(AgentConfig::default(), registry());
    agent.process_message("weather in Cirebon").await.unwrap();
    agent.process_message("search for sisingaan").await.unwrap();
    assert_eq!(agent.actions().len(), 6);

    agent.clear_actions();
    assert!(agent.actions().is_empty());
}

#[tokio::test]
async fn test_malformed_expression_surfaces_error() {
    let mut agent = ChatAgent::new(AgentConfig::default(), registry());
    let err = agent.process_message("calculate (2 + 3").await.unwrap_err();
    assert!(err.to_string().starts_with("Tool 'calculator' failed:"));

    let output = agent.actions().last().unwrap().tool_output.clone().unwrap();
    assert!(output.starts_with("Error: "));
}

#[tokio::test]
async fn test_tools_are_idempotent() {
    let registry = registry();
    let calls = [
        ("web_search", json!({ "query": "angklung" })),
        ("calculator", json!({ "expression": "2 ^ 10" })),
        ("weather", json!({ "location": "Tasikmalaya" })),
        ("execute_code", json!({ "code": "print('sampurasun')" })),
        ("file_operations", json!({ "operation": "read", "path": "README.md" })),
        ("vocabulary", json!({ "category": "food" })),
        ("conversation", json!({ "scenario": "warung" })),
        ("grammar", json!({ "topic": "negation" })),
        ("pronunciation", json!({ "word": "peuyeum" })),
    ];

    for (name, params) in calls {
        let first = registry.execute(name, params.clone()).await.unwrap();
        let second = registry.execute(name, params).await.unwrap();
        assert!(first.success, "{} failed: {}", name, first.output);
        assert_eq!(first, second, "{} not idempotent", name);
    }
}

#[tokio::test]
async fn test_every_persona_quick_action_dispatches_a_tool() {
    for persona in builtin_personas() {
        let mut agent = agent_for(persona.clone());
        for quick in &persona.quick_actions {
            let response = agent.process_message(&quick.prompt).await.unwrap();
            assert!(
                response.tool_used.is_some(),
                "{}: '{}' did not use a tool",
                persona.id,
                quick.prompt
            );
        }
    }
}

#[tokio::test]
async fn test_message_ids_are_unique() {
    let mut agent = ChatAgent::new(AgentConfig::default(), registry());
    let mut ids = HashSet::new();
    for i in 0..25 {
        let response = agent
            .process_message(&format!("calculate {} + 1", i))
            .await
            .unwrap();
        assert!(response.message.content.contains(&format!("= {}", i + 1)));
        assert!(ids.insert(response.message.id));
    }
}
