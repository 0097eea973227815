//! Simulated web search
//!
//! Returns canned results derived from the query text. No network access.

use super::{str_param, ParamType, ParameterSchema, Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

const DEFAULT_MAX_RESULTS: usize = 3;
const MAX_RESULTS_CAP: usize = 5;

/// Canned result sources, in ranking order
const SOURCES: &[(&str, &str, &str)] = &[
    ("Wikipedia", "https://en.wikipedia.org/wiki/", "Encyclopedia overview of"),
    ("Kamus Sunda", "https://kamus-sunda.example/", "Dictionary entries and usage notes for"),
    ("Dinas Kabudayaan Jabar", "https://budaya.jabarprov.example/", "Cultural background on"),
    ("Forum Diajar Basa", "https://forum.diajar.example/t/", "Learner discussion about"),
    ("News", "https://news.example/search?q=", "Recent articles mentioning"),
];

fn slug(query: &str) -> String {
    query
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Tool that simulates a web search
pub struct WebSearchTool;

impl WebSearchTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for information (demo: returns simulated results)."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
            .required("query", ParamType::String, "What to search for")
            .optional(
                "max_results",
                ParamType::Integer,
                "Number of results to return (1-5, default 3)",
            )
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let query = str_param(&params, "query")
            .ok_or_else(|| anyhow::anyhow!("Search query must not be empty"))?;
        let max_results = params
            .get("max_results")
            .and_then(Value::as_u64)
            .map(|n| (n as usize).clamp(1, MAX_RESULTS_CAP))
            .unwrap_or(DEFAULT_MAX_RESULTS);

        let slug = slug(query);
        let mut output = format!("Search results for \"{}\":\n", query);
        for (rank, (site, base, blurb)) in SOURCES.iter().take(max_results).enumerate() {
            output.push_str(&format!(
                "{}. {} - {}\n   {}{}\n   {} {}.\n",
                rank + 1,
                query,
                site,
                base,
                slug,
                blurb,
                query
            ));
        }
        Ok(ToolResult::success(output.trim_end()))
    }
}
