//! Simulated file operations over a fixed demo workspace
//!
//! The workspace is a read-only in-memory table. Writes are never applied;
//! they return a diff preview of what would change.

use super::{str_param, ParamType, ParameterSchema, Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Demo workspace contents
const DEMO_FILES: &[(&str, &str)] = &[
    (
        "README.md",
        "# Catetan Diajar\nNotes from my Sundanese lessons.\n",
    ),
    (
        "notes/salam.txt",
        "wilujeng enjing - good morning\nhatur nuhun - thank you\npunten - excuse me\n",
    ),
    (
        "notes/wilangan.txt",
        "hiji dua tilu opat lima\ngenep tujuh dalapan salapan sapuluh\n",
    ),
    (
        "notes/kulawarga.txt",
        "bapa - father\nema - mother\nlanceuk - older sibling\nadi - younger sibling\n",
    ),
];

/// Reject paths that would escape the demo workspace
fn validate_path(path: &str) -> Result<&str> {
    let path = path.trim().trim_start_matches("./");
    if path.is_empty() {
        anyhow::bail!("Path must not be empty");
    }
    if path.starts_with('/') || path.split('/').any(|part| part == "..") {
        anyhow::bail!("Path '{}' is outside the workspace", path);
    }
    Ok(path)
}

fn lookup(path: &str) -> Option<&'static str> {
    DEMO_FILES
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, content)| *content)
}

/// Generate a line-by-line diff between two strings
fn generate_diff(old_content: &str, new_content: &str, filename: &str) -> String {
    let old_lines: Vec<&str> = old_content.lines().collect();
    let new_lines: Vec<&str> = new_content.lines().collect();

    let mut diff = format!("--- a/{}\n+++ b/{}\n", filename, filename);
    for i in 0..old_lines.len().max(new_lines.len()) {
        match (old_lines.get(i), new_lines.get(i)) {
            (Some(o), Some(n)) if o == n => diff.push_str(&format!(" {}\n", o)),
            (Some(o), Some(n)) => diff.push_str(&format!("-{}\n+{}\n", o, n)),
            (Some(o), None) => diff.push_str(&format!("-{}\n", o)),
            (None, Some(n)) => diff.push_str(&format!("+{}\n", n)),
            (None, None) => {}
        }
    }
    diff
}

/// Tool that simulates reading, listing and writing files
pub struct FileOperationsTool;

impl FileOperationsTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileOperationsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FileOperationsTool {
    fn name(&self) -> &str {
        "file_operations"
    }

    fn description(&self) -> &str {
        "Read, list or write files in the demo workspace (simulated; writes are previewed, not applied)."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
            .required("operation", ParamType::String, "One of: read, list, write")
            .optional("path", ParamType::String, "File path (read/write) or directory (list)")
            .optional("content", ParamType::String, "New file content (write)")
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let operation = str_param(&params, "operation").unwrap_or_default();

        match operation {
            "list" => {
                let prefix = match str_param(&params, "path") {
                    Some(dir) => format!("{}/", validate_path(dir)?.trim_end_matches('/')),
                    None => String::new(),
                };
                let files: Vec<&str> = DEMO_FILES
                    .iter()
                    .map(|(name, _)| *name)
                    .filter(|name| name.starts_with(&prefix))
                    .collect();
                if files.is_empty() {
                    anyhow::bail!("Directory not found: {}", prefix.trim_end_matches('/'));
                }
                Ok(ToolResult::success(files.join("\n")))
            }
            "read" => {
                let path = validate_path(
                    str_param(&params, "path")
                        .ok_or_else(|| anyhow::anyhow!("'read' needs a path"))?,
                )?;
                let content =
                    lookup(path).ok_or_else(|| anyhow::anyhow!("File not found: {}", path))?;
                Ok(ToolResult::success(format!("{}:\n{}", path, content.trim_end())))
            }
            "write" => {
                let path = validate_path(
                    str_param(&params, "path")
                        .ok_or_else(|| anyhow::anyhow!("'write' needs a path"))?,
                )?;
                let content = params
                    .get("content")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let old = lookup(path).unwrap_or_default();
                Ok(ToolResult::success(format!(
                    "Simulated write of {} bytes to {} (no changes made)\n{}",
                    content.len(),
                    path,
                    generate_diff(old, content, path).trim_end()
                )))
            }
            other => anyhow::bail!(
                "Unknown operation '{}' (expected read, list or write)",
                other
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn reads_demo_file() {
        let result = FileOperationsTool::new()
            .execute(json!({ "operation": "read", "path": "notes/salam.txt" }))
            .await
            .unwrap();
        assert!(result.output.contains("hatur nuhun - thank you"));
    }

    #[tokio::test]
    async fn lists_directory() {
        let result = FileOperationsTool::new()
            .execute(json!({ "operation": "list", "path": "notes" }))
            .await
            .unwrap();
        assert_eq!(result.output.lines().count(), 3);
        assert!(!result.output.contains("README.md"));
    }

    #[tokio::test]
    async fn write_is_previewed_not_applied() {
        let tool = FileOperationsTool::new();
        let result = tool
            .execute(json!({
                "operation": "write",
                "path": "README.md",
                "content": "# Catetan Diajar\nUpdated.\n"
            }))
            .await
            .unwrap();
        assert!(result.output.contains("no changes made"));
        assert!(result.output.contains("+Updated."));

        let read = tool
            .execute(json!({ "operation": "read", "path": "README.md" }))
            .await
            .unwrap();
        assert!(!read.output.contains("Updated."));
    }

    #[tokio::test]
    async fn rejects_escaping_paths() {
        let tool = FileOperationsTool::new();
        for path in ["../etc/passwd", "/etc/passwd", "notes/../../x"] {
            let err = tool
                .execute(json!({ "operation": "read", "path": path }))
                .await
                .unwrap_err();
            assert!(err.to_string().contains("outside the workspace"), "{}", path);
        }
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let err = FileOperationsTool::new()
            .execute(json!({ "operation": "read", "path": "secret.txt" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
