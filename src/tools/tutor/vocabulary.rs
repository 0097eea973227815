//! Vocabulary drill tool

use crate::content::vocabulary::{self, Category};
use crate::tools::{str_param, ParamType, ParameterSchema, Tool, ToolCategory, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

const DEFAULT_COUNT: usize = 5;

pub struct VocabularyTool;

impl VocabularyTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VocabularyTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for VocabularyTool {
    fn name(&self) -> &str {
        "vocabulary"
    }

    fn description(&self) -> &str {
        "List Sundanese words with translations and pronunciation for a category."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
            .required(
                "category",
                ParamType::String,
                "greetings, numbers, family, food or verbs",
            )
            .optional("count", ParamType::Integer, "How many words (default 5)")
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Tutor
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let category: Category = str_param(&params, "category")
            .unwrap_or_default()
            .parse()?;
        let count = params
            .get("count")
            .and_then(Value::as_u64)
            .map(|n| n.max(1) as usize)
            .unwrap_or(DEFAULT_COUNT);

        let mut output = format!("{}:\n", category.label());
        for item in vocabulary::by_category(category).take(count) {
            output.push_str(&format!(
                "• {} - {} ({})\n",
                item.word, item.translation, item.pronunciation
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
    async fn lists_words_in_category() {
        let result = VocabularyTool::new()
            .execute(json!({ "category": "numbers", "count": 3 }))
            .await
            .unwrap();
        assert_eq!(
            result.output,
            "Wilangan (Numbers):\n• hiji - one (HI-ji)\n• dua - two (DU-a)\n• tilu - three (TI-lu)"
        );
    }

    #[tokio::test]
    async fn unknown_category_fails() {
        let err = VocabularyTool::new()
            .execute(json!({ "category": "weather" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown vocabulary category"));
    }
}
