//! Simulated code execution
//!
//! Nothing is compiled or run. The tool recognises literal print statements
//! and echoes their arguments, which is enough for demo snippets.

use super::{str_param, ParamType, ParameterSchema, Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const SUPPORTED_LANGUAGES: &[&str] = &["python", "javascript", "rust"];

static PRINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:print|console\.log|println!)\s*\(\s*"([^"]*)"\s*\)"#)
        .expect("valid regex")
});

/// Tool that pretends to run a code snippet
pub struct ExecuteCodeTool;

impl ExecuteCodeTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExecuteCodeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ExecuteCodeTool {
    fn name(&self) -> &str {
        "execute_code"
    }

    fn description(&self) -> &str {
        "Run a code snippet in a sandbox (demo: simulated, only literal prints produce output)."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
            .required("code", ParamType::String, "Source code to run")
            .optional(
                "language",
                ParamType::String,
                "python (default), javascript or rust",
            )
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let code = str_param(&params, "code")
            .ok_or_else(|| anyhow::anyhow!("No code to execute"))?;
        let language = str_param(&params, "language")
            .map(str::to_lowercase)
            .unwrap_or_else(|| "python".to_string());

        if !SUPPORTED_LANGUAGES.contains(&language.as_str()) {
            anyhow::bail!(
                "Unsupported language '{}' (supported: {})",
                language,
                SUPPORTED_LANGUAGES.join(", ")
            );
        }

        let printed: Vec<&str> = PRINT_RE
            .captures_iter(code)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();

        let output = if printed.is_empty() {
            format!("[{}] Executed successfully (simulated, no output)", language)
        } else {
            format!("[{}] Output:\n{}", language, printed.join("\n"))
        };
        Ok(ToolResult::success(output))
    }
}
