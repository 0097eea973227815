//! Grammar explanation tool

use crate::content::practice::{self, GRAMMAR_TOPICS};
use crate::tools::{str_param, ParamType, ParameterSchema, Tool, ToolCategory, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub struct GrammarTool;

impl GrammarTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GrammarTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GrammarTool {
    fn name(&self) -> &str {
        "grammar"
    }

    fn description(&self) -> &str {
        "Explain a Sundanese grammar topic with examples."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new().required(
            "topic",
            ParamType::String,
            "word-order, speech-levels, plurals, negation or questions",
        )
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Tutor
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let topic_id = str_param(&params, "topic").unwrap_or_default();
        let topic = practice::grammar_topic(topic_id).ok_or_else(|| {
            let known: Vec<_> = GRAMMAR_TOPICS.iter().map(|t| t.id).collect();
            anyhow::anyhow!(
                "Unknown grammar topic '{}' (available: {})",
                topic_id,
                known.join(", ")
            )
        })?;

        let mut output = format!("{}: {}\n", topic.title, topic.explanation);
        for (sundanese, english) in topic.examples {
            output.push_str(&format!("• {} = {}\n", sundanese, english));
        }
        Ok(ToolResult::success(output.trim_end()))
    }
}
