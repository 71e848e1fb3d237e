use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_scan_writes_registry() -> Result<()> {
    let test = CliTest::project()?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Scanned app: 2 files, 2 strings (2 added, 0 removed)"));

    let registry: Value = serde_json::from_str(&test.read_file("l10n/app/strings.json")?)?;
    let strings = registry["strings"].as_array().unwrap();
    let mut texts: Vec<&str> = strings.iter().map(|s| s["text"].as_str().unwrap()).collect();
    texts.sort();
    assert_eq!(texts, vec!["Bye %s", "Hello"]);

    let hello = strings.iter().find(|s| s["text"] == "Hello").unwrap();
    assert_eq!(hello["hash"], locsync::utils::hash_text("Hello"));
    assert_eq!(hello["callCount"], 2);
    assert_eq!(hello["languageFamilies"], serde_json::json!(["server", "client"]));

    Ok(())
}

#[test]
fn test_rescan_reports_changes() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;

    test.write_file("src/app.js", "alert(t(\"Goodbye\"));\n")?;
    let output = test.run(&["scan", "--source", "app"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Scanned app: 2 files, 3 strings (1 added, 0 removed)"));

    test.write_file("src/index.php", "<p>static</p>\n")?;
    let output = test.run(&["scan"])?;
    assert!(stdout(&output).contains("Scanned app: 2 files, 1 string (0 added, 2 removed)"));

    Ok(())
}

#[test]
fn test_scan_is_idempotent() -> Result<()> {
    let test = CliTest::project()?;

    test.run(&["scan"])?;
    let first = test.read_file("l10n/app/strings.json")?;
    test.run(&["scan"])?;
    let second = test.read_file("l10n/app/strings.json")?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_scan_unknown_source_fails() -> Result<()> {
    let test = CliTest::project()?;

    let output = test.run(&["scan", "--source", "nope"])?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Unknown localization source 'nope'"), "stderr: {}", err);
    assert!(err.contains("app ("));

    Ok(())
}

#[test]
fn test_scan_lexical_warning_hint() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file("src/broken.js", "t(\"ok\");\nvar s = \"unterminated\n")?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("use -v for details"));

    let output = test.run(&["scan", "-v"])?;
    let out = stdout(&output);
    assert!(out.contains("warning: unterminated string constant"), "stdout: {}", out);
    assert!(out.contains("--> broken.js:2:"));

    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let test = CliTest::with_file(".locsyncrc.json", r#"{ "appLocales": ["xx_XX"] }"#)?;

    let output = test.run(&["scan"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("appLocales"));

    Ok(())
}

#[test]
fn test_storage_folder_override() -> Result<()> {
    let test = CliTest::project()?;

    let output = test.run(&["scan", "--storage-folder", "custom"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.root().join("custom/app/strings.json").exists());
    assert!(!test.root().join("l10n").exists());

    Ok(())
}
