//! Agent tools
//!
//! Tools are organized by audience:
//! - core tools (`web_search`, `calculator`, `weather`, `execute_code`,
//!   `file_operations`) used by the general assistant persona
//! - `tutor/`: language-learning tools used by the tutor personas
//!
//! Every tool here is a simulation: results are a pure function of the
//! parameters, with no network or filesystem access.

mod calculator;
mod code_exec;
mod file_ops;
pub mod tutor;
mod weather;
mod web_search;

pub use calculator::{evaluate, format_number, CalcError, CalculatorTool};
pub use code_exec::ExecuteCodeTool;
pub use file_ops::FileOperationsTool;
pub use tutor::{ConversationTool, GrammarTool, PronunciationTool, VocabularyTool};
pub use weather::WeatherTool;
pub use web_search::WebSearchTool;

use crate::content::AudioManifest;
use crate::core::ToolError;
use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Result of executing a tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
}

impl ToolResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: message.into(),
        }
    }
}

/// Tool category for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// General assistant tools
    #[default]
    Core,
    /// Language tutor tools
    Tutor,
}

/// Primitive type of a declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// Whether a JSON value has this primitive type
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// One declared parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParamType,
    pub description: String,
}

/// Declared parameters of a tool
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParameterSchema {
    pub properties: Vec<ParameterSpec>,
    pub required: Vec<String>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required parameter
    pub fn required(mut self, name: &str, kind: ParamType, description: &str) -> Self {
        self.required.push(name.to_string());
        self.optional(name, kind, description)
    }

    /// Add an optional parameter
    pub fn optional(mut self, name: &str, kind: ParamType, description: &str) -> Self {
        self.properties.push(ParameterSpec {
            name: name.to_string(),
            kind,
            description: description.to_string(),
        });
        self
    }

    pub fn property(&self, name: &str) -> Option<&ParameterSpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Render as a JSON schema object
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    json!({ "type": p.kind.as_str(), "description": p.description }),
                )
            })
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }

    /// Check required fields and declared types; undeclared fields pass through
    pub fn validate(&self, tool: &str, params: &Value) -> Result<(), ToolError> {
        let empty = Map::new();
        let obj = match params {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => return Err(ToolError::NotAnObject(tool.to_string())),
        };

        for name in &self.required {
            if obj.get(name).map_or(true, Value::is_null) {
                return Err(ToolError::MissingParameter {
                    tool: tool.to_string(),
                    param: name.clone(),
                });
            }
        }

        for spec in &self.properties {
            if let Some(value) = obj.get(&spec.name).filter(|v| !v.is_null()) {
                if !spec.kind.matches(value) {
                    return Err(ToolError::InvalidParameter {
                        tool: tool.to_string(),
                        param: spec.name.clone(),
                        expected: spec.kind.as_str().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Tool description for listings and JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub category: ToolCategory,
    pub parameters: Value,
}

/// Trait for agent tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name
    fn name(&self) -> &str;

    /// Get the tool description
    fn description(&self) -> &str;

    /// Get the declared parameters
    fn parameters(&self) -> ParameterSchema;

    /// Execute the tool with given parameters
    ///
    /// Failures are reported as `Err`; the registry has already validated
    /// `params` against `parameters()`.
    async fn execute(&self, params: Value) -> Result<ToolResult>;

    /// Get the category for this tool (default: Core)
    fn category(&self) -> ToolCategory {
        ToolCategory::Core
    }

    /// Convert to a listing definition
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            category: self.category(),
            parameters: self.parameters().to_json_schema(),
        }
    }
}

/// Names of the built-in tools, in registration order
pub const BUILTIN_TOOLS: &[&str] = &[
    "web_search",
    "calculator",
    "weather",
    "execute_code",
    "file_operations",
    "vocabulary",
    "conversation",
    "grammar",
    "pronunciation",
];

/// Registry of available tools
#[derive(Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Registration order, for stable listings
    order: Vec<String>,
    tool_timeout_secs: u64,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
            tool_timeout_secs: 30,
        }
    }

    /// Create a registry with all built-in tools
    pub fn with_defaults(manifest: AudioManifest) -> Self {
        let mut registry = Self::new();

        // Core tools
        registry.register(Arc::new(WebSearchTool::new()));
        registry.register(Arc::new(CalculatorTool::new()));
        registry.register(Arc::new(WeatherTool::new()));
        registry.register(Arc::new(ExecuteCodeTool::new()));
        registry.register(Arc::new(FileOperationsTool::new()));

        // Tutor tools
        registry.register(Arc::new(VocabularyTool::new()));
        registry.register(Arc::new(ConversationTool::new()));
        registry.register(Arc::new(GrammarTool::new()));
        registry.register(Arc::new(PronunciationTool::new(manifest)));

        tracing::debug!("Tool registry created with tools: {:?}", registry.order);
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Set the default tool timeout (seconds)
    pub fn set_tool_timeout_secs(&mut self, secs: u64) {
        self.tool_timeout_secs = secs;
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get all tool definitions in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| t.to_definition())
            .collect()
    }

    /// A registry holding only the named tools, sharing the same instances
    ///
    /// Tools keep the order given in `names`.
    pub fn subset<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, ToolError> {
        let mut subset = Self::new();
        subset.tool_timeout_secs = self.tool_timeout_secs;
        for name in names {
            let name = name.as_ref();
            let tool = self
                .tools
                .get(name)
                .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
            subset.register(tool.clone());
        }
        Ok(subset)
    }

    /// Execute a tool by name with given parameters
    ///
    /// Unknown tools and schema violations are returned as `Err`. A tool that
    /// times out or panics yields an unsuccessful `ToolResult`.
    pub async fn execute(&self, name: &str, params: Value) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tool.parameters().validate(name, &params)?;

        let timeout_duration = Duration::from_secs(self.tool_timeout_secs);

        tracing::debug!(tool = %name, params = %params, "Executing tool");

        // Wrap tool execution with timeout + panic recovery
        match timeout(
            timeout_duration,
            AssertUnwindSafe(tool.execute(params)).catch_unwind(),
        )
        .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(panic_info)) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                tracing::error!("Tool '{}' panicked: {}", name, panic_msg);
                Ok(ToolResult::error(format!(
                    "Tool '{}' crashed: {}",
                    name, panic_msg
                )))
            }
            Err(_) => Ok(ToolResult::error(format!(
                "Tool '{}' timed out after {} seconds",
                name, self.tool_timeout_secs
            ))),
        }
    }
}

/// Read an optional string parameter
pub(crate) fn str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time;

    struct SleepTool {
        duration: Duration,
    }

    #[async_trait]
    impl Tool for SleepTool {
        fn name(&self) -> &str {
            "sleep"
        }

        fn description(&self) -> &str {
            "sleep tool"
        }

        fn parameters(&self) -> ParameterSchema {
            ParameterSchema::new()
        }

        async fn execute(&self, _params: Value) -> Result<ToolResult> {
            time::sleep(self.duration).await;
            Ok(ToolResult::success("done"))
        }
    }

    struct PanicTool;

    #[async_trait]
    impl Tool for PanicTool {
        fn name(&self) -> &str {
            "panic"
        }

        fn description(&self) -> &str {
            "always panics"
        }

        fn parameters(&self) -> ParameterSchema {
            ParameterSchema::new()
        }

        async fn execute(&self, _params: Value) -> Result<ToolResult> {
            panic!("boom");
        }
    }

    #[tokio::test]
    async fn tool_registry_enforces_timeout() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(SleepTool {
            duration: Duration::from_secs(5),
        }));
        registry.set_tool_timeout_secs(1);

        let result = registry.execute("sleep", json!({})).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("timed out"));
    }

    #[tokio::test]
    async fn tool_registry_recovers_from_panic() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PanicTool));

        let result = registry.execute("panic", json!({})).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("boom"));
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let err = registry.execute("teleport", json!({})).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::UnknownTool(name)) if name == "teleport"
        ));
    }

    #[tokio::test]
    async fn missing_required_parameter_is_rejected() {
        let registry = ToolRegistry::with_defaults(AudioManifest::default());
        let err = registry.execute("calculator", json!({})).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::MissingParameter { param, .. }) if param == "expression"
        ));
    }

    #[tokio::test]
    async fn wrong_parameter_type_is_rejected() {
        let registry = ToolRegistry::with_defaults(AudioManifest::default());
        let err = registry
            .execute("calculator", json!({ "expression": 42 }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("must be string"));
    }

    #[test]
    fn defaults_register_every_builtin_in_order() {
        let registry = ToolRegistry::with_defaults(AudioManifest::default());
        assert_eq!(registry.names(), BUILTIN_TOOLS);
    }

    #[test]
    fn subset_keeps_requested_order() {
        let registry = ToolRegistry::with_defaults(AudioManifest::default());
        let subset = registry.subset(&["grammar", "vocabulary"]).unwrap();
        assert_eq!(subset.names(), ["grammar", "vocabulary"]);
        assert!(registry.subset(&["teleport"]).is_err());
    }

    #[test]
    fn schema_renders_json() {
        let schema = ParameterSchema::new()
            .required("query", ParamType::String, "Search query")
            .optional("max_results", ParamType::Integer, "Result limit");
        let json = schema.to_json_schema();
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["max_results"]["type"], "integer");
        assert_eq!(json["required"], json!(["query"]));
    }

    #[test]
    fn null_params_count_as_empty() {
        let schema = ParameterSchema::new().optional("x", ParamType::Number, "");
        assert!(schema.validate("t", &Value::Null).is_ok());
        assert!(schema.validate("t", &json!("nope")).is_err());
    }
}
