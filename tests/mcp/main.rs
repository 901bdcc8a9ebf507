use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary project with a bundles/ directory
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        fs::create_dir_all(project_root.join(".git"))?;
        fs::create_dir_all(project_root.join("bundles"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with bundle tables
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_tables(vec![
    ///     ("javac", json!({"javac.opt.verbose": "Output messages"})),
    ///     ("javac_ja", json!({"javac.opt.verbose": "メッセージを出力する"})),
    /// ])?;
    /// ```
    pub fn with_tables(tables: Vec<(&str, Value)>) -> Result<Self> {
        let fixture = Self::new()?;
        for (name, content) in tables {
            fixture.write_table(name, &content)?;
        }
        Ok(fixture)
    }

    /// Write bundles/<name>.json
    pub fn write_table(&self, name: &str, content: &Value) -> Result<()> {
        let path = self
            .project_root
            .join("bundles")
            .join(format!("{}.json", name));
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for table: {}", name))?;
        fs::write(&path, format!("{}\n", json_str))
            .with_context(|| format!("Failed to write table file: {}", path.display()))?;
        Ok(())
    }

    /// Write raw text to bundles/<name>.json
    pub fn write_raw_table(&self, name: &str, content: &str) -> Result<()> {
        let path = self
            .project_root
            .join("bundles")
            .join(format!("{}.json", name));
        fs::write(&path, content)
            .with_context(|| format!("Failed to write table file: {}", path.display()))?;
        Ok(())
    }

    /// Write a .restextrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".restextrc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// javac specific bundle over a common bundle, with a Japanese translation
pub fn fixture_javac() -> Result<McpTestFixture> {
    let fixture = McpTestFixture::with_tables(vec![
        (
            "javac",
            json!({
                "javac.err.file.not.found": "file not found: {0}",
                "javac.err.bad.value.for.option": "bad value for {0} option: ''{1}''",
                "javac.opt.verbose": "Output messages about what the compiler is doing",
                "main.usage.summary": "use --help for a list of possible options"
            }),
        ),
        (
            "javac_ja",
            json!({
                "javac.err.file.not.found": "ファイルが見つかりません: {0}",
                "javac.opt.verbose": "コンパイラの動作についてメッセージを出力する"
            }),
        ),
        (
            "common",
            json!({
                "main.usage.summary": "Usage: {0} <options> <source files>",
                "main.warn.deprecated": "{0} is deprecated"
            }),
        ),
    ])?;
    fixture.write_config(&json!({
        "specificBundle": "javac",
        "locale": "root"
    }))?;
    Ok(fixture)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
