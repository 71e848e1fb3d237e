use locsync::mcp::{
    LocsyncMcpServer,
    types::{ListLocalesParams, ProjectParams},
};
use rmcp::{handler::server::wrapper::Parameters, model::ErrorCode};

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// list_locales tests
// ============================================================================

#[tokio::test]
async fn test_list_locales_application() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(ListLocalesParams {
        project_root_path: fixture.root(),
        namespace: None,
    });

    let result = server.list_locales(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["namespace"], "application");
    assert_eq!(json_result["selected"], "en_UK");

    let mut names: Vec<&str> = json_result["locales"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["de_DE", "en_UK", "fr_FR"]);

    let german = json_result["locales"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == "de_DE")
        .unwrap();
    assert_eq!(german["currency"], "EUR");
    assert_eq!(german["native"], false);
}

#[tokio::test]
async fn test_list_locales_content_namespace() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(ListLocalesParams {
        project_root_path: fixture.root(),
        namespace: Some("content".to_string()),
    });

    let result = server.list_locales(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["namespace"], "content");
    assert_eq!(json_result["locales"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_locales_unknown_namespace() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(ListLocalesParams {
        project_root_path: fixture.root(),
        namespace: Some("legal".to_string()),
    });

    let err = server.list_locales(params).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("legal"));
}

// ============================================================================
// list_sources tests
// ============================================================================

#[tokio::test]
async fn test_list_sources() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });

    let result = server.list_sources(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let sources = json_result["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["alias"], "app");
    assert_eq!(sources[0]["scanned"], false);
    assert_eq!(
        sources[0]["roots"][0],
        fixture.root_path().join("src").to_string_lossy().to_string()
    );
    assert_eq!(sources[0]["id"].as_str().unwrap().len(), 32);
}

#[tokio::test]
async fn test_missing_project_root() {
    let server = LocsyncMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: "/definitely/not/here".to_string(),
    });

    let err = server.list_sources(params).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}
