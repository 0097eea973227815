//! Conversation practice tool

use crate::content::practice::{self, DIALOGUES};
use crate::tools::{str_param, ParamType, ParameterSchema, Tool, ToolCategory, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub struct ConversationTool;

impl ConversationTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConversationTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ConversationTool {
    fn name(&self) -> &str {
        "conversation"
    }

    fn description(&self) -> &str {
        "Play a scripted Sundanese dialogue for a practice scenario."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new().required(
            "scenario",
            ParamType::String,
            "wawanohan (introductions), pasar (market) or warung (ordering food)",
        )
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Tutor
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scenario = str_param(&params, "scenario").unwrap_or_default();
        let dialogue = practice::dialogue(scenario).ok_or_else(|| {
            let known: Vec<_> = DIALOGUES.iter().map(|d| d.id).collect();
            anyhow::anyhow!(
                "Unknown scenario '{}' (available: {})",
                scenario,
                known.join(", ")
            )
        })?;

        let mut output = format!("Scenario: {}\n", dialogue.scenario);
        for line in dialogue.lines {
            output.push_str(&format!(
                "{}: {}\n   ({})\n",
                line.speaker, line.sundanese, line.english
            ));
        }
        Ok(ToolResult::success(output.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn plays_dialogue() {
        let result = ConversationTool::new()
            .execute(json!({ "scenario": "pasar" }))
            .await
            .unwrap();
        assert!(result.output.starts_with("Scenario: Bargaining at the market"));
        assert!(result.output.contains("Padagang: Sapuluh rebu, Neng."));
    }

    #[tokio::test]
    async fn unknown_scenario_lists_options() {
        let err = ConversationTool::new()
            .execute(json!({ "scenario": "bioskop" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("wawanohan, pasar, warung"));
    }
}
