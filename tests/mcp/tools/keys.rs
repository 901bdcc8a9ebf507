use restext::mcp::{RestextMcpServer, types::ListKeysParams};
use rmcp::handler::server::wrapper::Parameters;

use crate::{assert_pagination, extract_tool_result_json, fixture_javac};

fn params(root: String) -> ListKeysParams {
    ListKeysParams {
        project_root_path: root,
        locale: None,
        prefix: None,
        limit: None,
        offset: None,
    }
}

#[tokio::test]
async fn test_list_keys_all() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let result = server
        .list_keys(Parameters(params(fixture.root())))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 5);
    assert_eq!(json_result["locale"], "root");
    assert_eq!(json_result["tiers"][0], "javac");
    assert_eq!(json_result["tiers"][1], "common");

    let items = json_result["items"].as_array().unwrap();
    let summary = items
        .iter()
        .find(|i| i["key"] == "main.usage.summary")
        .unwrap();
    assert_eq!(summary["bundle"], "javac");
    let deprecated = items
        .iter()
        .find(|i| i["key"] == "main.warn.deprecated")
        .unwrap();
    assert_eq!(deprecated["bundle"], "common");

    assert_pagination(&json_result, 0, 50, false);
}

#[tokio::test]
async fn test_list_keys_prefix_and_locale() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let mut p = params(fixture.root());
    p.prefix = Some("javac.".to_string());
    p.locale = Some("ja".to_string());
    let result = server.list_keys(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 3);
    assert_eq!(json_result["locale"], "ja");

    let items = json_result["items"].as_array().unwrap();
    let locales: Vec<&str> = items
        .iter()
        .map(|i| i["locale"].as_str().unwrap())
        .collect();
    assert_eq!(locales, vec!["root", "ja", "ja"]);
}

#[tokio::test]
async fn test_list_keys_pagination() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let mut p = params(fixture.root());
    p.limit = Some(2);
    p.offset = Some(2);
    let result = server.list_keys(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 5);
    let items = json_result["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["key"], "javac.opt.verbose");
    assert_pagination(&json_result, 2, 2, true);
}

#[tokio::test]
async fn test_list_keys_limit_capped() {
    let fixture = fixture_javac().unwrap();
    let server = RestextMcpServer::new();

    let mut p = params(fixture.root());
    p.limit = Some(10_000);
    let result = server.list_keys(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_pagination(&json_result, 0, 200, false);
}
