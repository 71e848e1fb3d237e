use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["storageFolder"], "./localization");
    assert_eq!(parsed["clientFolder"], "");
    assert_eq!(parsed["unicode"], true);
    assert_eq!(parsed["sources"][0]["alias"], "app");
    assert!(
        parsed["sources"][0]["excludeFolders"]
            .as_array()
            .is_some_and(|folders| folders.iter().any(|f| f == "node_modules")),
        "Default source should exclude node_modules"
    );

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .locsyncrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".locsyncrc.json").exists());
    let content = test.read_file(".locsyncrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".locsyncrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .locsyncrc.json already exists
    ");

    assert_eq!(test.read_file(".locsyncrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&[])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(crate::stdout(&output).contains("Usage:"));

    Ok(())
}
