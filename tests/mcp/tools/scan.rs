use locsync::mcp::{
    LocsyncMcpServer,
    types::{ProjectParams, PublishParams, ScanParams},
};
use rmcp::{handler::server::wrapper::Parameters, model::ErrorCode};
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

pub async fn scan_all(server: &LocsyncMcpServer, fixture: &McpTestFixture) {
    let params = Parameters(ScanParams {
        project_root_path: fixture.root(),
        source: None,
    });
    server.scan(params).await.unwrap();
}

// ============================================================================
// scan tests
// ============================================================================

#[tokio::test]
async fn test_scan_all_sources() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(ScanParams {
        project_root_path: fixture.root(),
        source: None,
    });

    let result = server.scan(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let sources = json_result["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["source"], "app");
    assert_eq!(sources[0]["filesScanned"], 2);
    assert_eq!(sources[0]["stringCount"], 3);
    assert_eq!(sources[0]["added"], 3);
    assert_eq!(sources[0]["failures"], json!([]));

    assert!(fixture.root_path().join("l10n/app/strings.json").exists());
    // Scanning refreshes the client files.
    assert!(fixture.root_path().join("public/js/locale-de_DE.js").exists());
    assert!(fixture.root_path().join("public/js/locale-fr_FR.js").exists());
}

#[tokio::test]
async fn test_scan_unknown_source() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(ScanParams {
        project_root_path: fixture.root(),
        source: Some("missing".to_string()),
    });

    let err = server.scan(params).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.data, Some(json!({ "code": "unknown-source" })));
}

#[tokio::test]
async fn test_scan_reports_lexical_warnings() {
    let fixture = McpTestFixture::with_sources().unwrap();
    fixture
        .write_source_file("src/broken.js", "t('fine');\n/* never closed\n")
        .unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(ScanParams {
        project_root_path: fixture.root(),
        source: Some("app".to_string()),
    });

    let result = server.scan(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let warnings = json_result["sources"][0]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["file"], "broken.js");
    assert_eq!(warnings[0]["problem"], "unterminated comment");
    assert_eq!(warnings[0]["line"], 2);
}

// ============================================================================
// get_status tests
// ============================================================================

#[tokio::test]
async fn test_get_status_after_scan() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();
    scan_all(&server, &fixture).await;

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_status(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["locales"], json!(["de_DE", "fr_FR"]));
    assert_eq!(json_result["totalUntranslated"], 6);
    let source = &json_result["sources"][0];
    assert_eq!(source["scanned"], true);
    assert_eq!(source["stringCount"], 3);
    assert_eq!(
        source["untranslated"],
        json!([
            { "locale": "de_DE", "count": 3 },
            { "locale": "fr_FR", "count": 3 }
        ])
    );
}

// ============================================================================
// publish tests
// ============================================================================

#[tokio::test]
async fn test_publish_up_to_date_then_forced() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();
    scan_all(&server, &fixture).await;

    let params = Parameters(PublishParams {
        project_root_path: fixture.root(),
        force: None,
    });
    let result = server.publish(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["status"], "upToDate");
    assert_eq!(json_result["files"].as_array().unwrap().len(), 4);

    let params = Parameters(PublishParams {
        project_root_path: fixture.root(),
        force: Some(true),
    });
    let result = server.publish(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["status"], "written");
    assert!(
        json_result["clientFolder"]
            .as_str()
            .unwrap()
            .ends_with("public/js")
    );
}

#[tokio::test]
async fn test_publish_disabled() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "sources": [{ "alias": "app", "label": "App", "paths": ["."] }] }))
        .unwrap();
    let server = LocsyncMcpServer::new();

    let params = Parameters(PublishParams {
        project_root_path: fixture.root(),
        force: Some(true),
    });
    let result = server.publish(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["status"], "disabled");
    assert_eq!(json_result["clientFolder"], serde_json::Value::Null);
}
