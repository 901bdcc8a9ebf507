use restext::mcp::{RestextMcpServer, types::GetConfigParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = RestextMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["config"]["bundlesRoot"], "./bundles");
    assert_eq!(json_result["config"]["commonBundle"], "common");
    assert_eq!(json_result["config"]["specificBundle"], "messages");
    assert!(json_result["config"]["ignores"].is_array());
    assert!(json_result["config"].get("locale").is_none());
    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["projectRoot"], fixture.root());
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "bundlesRoot": "i18n",
            "specificBundle": "doclets.formats.html",
            "locale": "ja_JP",
            "fallbackLocale": "en"
        }))
        .unwrap();

    let server = RestextMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["bundlesRoot"], "i18n");
    assert_eq!(json_result["config"]["specificBundle"], "doclets.formats.html");
    assert_eq!(json_result["config"]["commonBundle"], "common");
    assert_eq!(json_result["config"]["fallbackLocale"], "en");
    assert_eq!(json_result["effectiveLocale"], "ja_JP");
}

#[tokio::test]
async fn test_get_config_invalid_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "specificBundle": "not_valid" }))
        .unwrap();

    let server = RestextMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let err = server.get_config(params).await.unwrap_err();
    assert!(err.message.contains("specificBundle"), "{}", err.message);
}
