use restext::mcp::{RestextMcpServer, types::ResolveMessageParams};
use rmcp::handler::server::wrapper::Parameters;

use crate::{extract_tool_result_json, fixture_javac};

fn params(root: String, key: &str) -> ResolveMessageParams {
    ResolveMessageParams {
        project_root_path: root,
        key: key.to_string(),
        args: None,
        locale: None,
    }
}

#[tokio::test]
async fn test_resolve_specific_first() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let result = server
        .resolve_message(Parameters(params(fixture.root(), "main.usage.summary")))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["found"], true);
    assert_eq!(json_result["value"], "use --help for a list of possible options");
    assert_eq!(json_result["bundle"], "javac");
    assert_eq!(json_result["locale"], "root");
}

#[tokio::test]
async fn test_resolve_common_with_args() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let mut p = params(fixture.root(), "main.warn.deprecated");
    p.args = Some(vec!["-source 7".to_string()]);
    let result = server.resolve_message(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["value"], "-source 7 is deprecated");
    assert_eq!(json_result["template"], "{0} is deprecated");
    assert_eq!(json_result["bundle"], "common");
}

#[tokio::test]
async fn test_resolve_quoted_pattern() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let mut p = params(fixture.root(), "javac.err.bad.value.for.option");
    p.args = Some(vec!["--release".to_string(), "99".to_string()]);
    let result = server.resolve_message(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["value"], "bad value for --release option: '99'");
}

#[tokio::test]
async fn test_resolve_with_locale() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let mut p = params(fixture.root(), "javac.err.file.not.found");
    p.args = Some(vec!["Foo.java".to_string()]);
    p.locale = Some("ja_JP".to_string());
    let result = server.resolve_message(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["value"], "ファイルが見つかりません: Foo.java");
    assert_eq!(json_result["bundle"], "javac");
    assert_eq!(json_result["locale"], "ja");
}

#[tokio::test]
async fn test_resolve_missing_key() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let result = server
        .resolve_message(Parameters(params(fixture.root(), "javac.err.no.such.key")))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["found"], false);
    assert_eq!(
        json_result["error"],
        "Can't find resource for bundle common, key javac.err.no.such.key"
    );
    assert!(json_result.get("value").is_none());
}

#[tokio::test]
async fn test_resolve_broken_bundle_is_error() {
    let fixture = fixture_javac().unwrap();
    fixture.write_raw_table("common", "{ broken").unwrap();
    let server = RestextMcpServer::new();

    let err = server
        .resolve_message(Parameters(params(fixture.root(), "main.warn.deprecated")))
        .await
        .unwrap_err();
    assert!(err.message.contains("common.json"), "{}", err.message);
}
