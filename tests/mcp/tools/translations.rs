use locsync::mcp::{
    LocsyncMcpServer,
    types::{GetStringsParams, SetTranslationParams, TranslationInput},
};
use locsync::utils::hash_text;
use rmcp::{handler::server::wrapper::Parameters, model::ErrorCode};
use serde_json::json;

use super::scan::scan_all;
use crate::{McpTestFixture, assert_pagination, extract_tool_result_json};

fn strings_params(fixture: &McpTestFixture, locale: &str) -> GetStringsParams {
    GetStringsParams {
        project_root_path: fixture.root(),
        source: "app".to_string(),
        locale: locale.to_string(),
        untranslated_only: None,
        offset: None,
        limit: None,
    }
}

fn translation(text: &str, translated: &str) -> TranslationInput {
    TranslationInput {
        hash: hash_text(text),
        text: translated.to_string(),
    }
}

// ============================================================================
// get_strings tests
// ============================================================================

#[tokio::test]
async fn test_get_strings_sorted_with_usage() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();
    scan_all(&server, &fixture).await;

    let result = server
        .get_strings(Parameters(strings_params(&fixture, "de_DE")))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 3);
    assert_eq!(json_result["untranslatedCount"], 3);
    assert_pagination(&json_result, 0, 50, false);

    let items = json_result["items"].as_array().unwrap();
    let texts: Vec<&str> = items.iter().map(|i| i["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["Cancel", "Delete %s?", "Save"]);

    let save = &items[2];
    assert_eq!(save["hash"], hash_text("Save"));
    assert_eq!(save["callCount"], 2);
    assert_eq!(save["files"], json!(["app.js", "index.php"]));
    assert_eq!(save["families"], json!(["server", "client"]));
    assert_eq!(save["translation"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_get_strings_pagination() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();
    scan_all(&server, &fixture).await;

    let mut params = strings_params(&fixture, "de_DE");
    params.offset = Some(1);
    params.limit = Some(1);

    let result = server.get_strings(Parameters(params)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_pagination(&json_result, 1, 1, true);
    assert_eq!(json_result["items"][0]["text"], "Delete %s?");
}

#[tokio::test]
async fn test_get_strings_locale_not_added() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();

    let err = server
        .get_strings(Parameters(strings_params(&fixture, "it_IT")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.data, Some(json!({ "code": "unknown-locale" })));
}

// ============================================================================
// set_translation tests
// ============================================================================

#[tokio::test]
async fn test_set_translation_saves_and_publishes() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();
    scan_all(&server, &fixture).await;

    let params = Parameters(SetTranslationParams {
        project_root_path: fixture.root(),
        source: "app".to_string(),
        locale: "de_DE".to_string(),
        translations: vec![
            translation("Save", "Speichern"),
            translation("Delete %s?", "%s löschen?"),
        ],
    });

    let result = server.set_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["appliedCount"], 2);
    assert_eq!(json_result["untranslatedCount"], 1);

    let server_ini = fixture.read_file("l10n/app/de_DE-server.ini").unwrap();
    assert!(server_ini.contains(&format!("{}= \"Speichern\"", hash_text("Save"))));

    let client = fixture.read_file("public/js/locale-de_DE.js").unwrap();
    assert!(client.contains("\"%s löschen?\""));
    assert!(!client.contains(&hash_text("Cancel")));

    let mut params = strings_params(&fixture, "de_DE");
    params.untranslated_only = Some(true);
    let result = server.get_strings(Parameters(params)).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["items"].as_array().unwrap().len(), 1);
    assert_eq!(json_result["items"][0]["text"], "Cancel");
}

#[tokio::test]
async fn test_set_translation_unknown_hash_and_removal() {
    let fixture = McpTestFixture::with_sources().unwrap();
    let server = LocsyncMcpServer::new();
    scan_all(&server, &fixture).await;

    let params = Parameters(SetTranslationParams {
        project_root_path: fixture.root(),
        source: "app".to_string(),
        locale: "fr_FR".to_string(),
        translations: vec![translation("Cancel", "Annuler")],
    });
    server.set_translation(params).await.unwrap();

    let params = Parameters(SetTranslationParams {
        project_root_path: fixture.root(),
        source: "app".to_string(),
        locale: "fr_FR".to_string(),
        translations: vec![
            translation("Cancel", ""),
            TranslationInput {
                hash: "0123456789abcdef0123456789abcdef".to_string(),
                text: "Rien".to_string(),
            },
        ],
    });

    let result = server.set_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], false);
    assert_eq!(json_result["appliedCount"], 0);
    assert_eq!(json_result["removedCount"], 1);
    assert_eq!(
        json_result["unknownHashes"],
        json!(["0123456789abcdef0123456789abcdef"])
    );
    assert_eq!(json_result["untranslatedCount"], 3);

    let server_ini = fixture.read_file("l10n/app/fr_FR-server.ini").unwrap();
    assert!(!server_ini.contains("Annuler"));
    assert!(!server_ini.contains("Rien"));
}
