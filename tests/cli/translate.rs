use anyhow::Result;
use locsync::utils::hash_text;

use crate::{CliTest, stdout};

#[test]
fn test_strings_lists_entries() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;

    let output = test.run(&["strings", "--source", "app", "--locale", "de_DE"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains(&format!("{}  \"Hello\"", hash_text("Hello"))), "stdout: {}", out);
    assert!(out.contains("= de_DE: (untranslated)"));
    assert!(out.contains("= used: app.js, index.php (2 calls)"));
    assert!(out.contains("Listed 2 of 2 strings in app"));

    Ok(())
}

#[test]
fn test_translate_saves_table() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;
    let hash = hash_text("Hello");

    let output = test.run(&["translate", "--source", "app", "--locale", "de_DE", &hash, "Hallo"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(&format!("Saved de_DE translation of {} in app", hash)));

    let server = test.read_file("l10n/app/de_DE-server.ini")?;
    assert!(server.contains(&format!("{}= \"Hallo\"", hash)), "server: {}", server);
    let client = test.read_file("l10n/app/de_DE-client.ini")?;
    assert!(client.contains(&format!("{}= \"Hallo\"", hash)));

    let output = test.run(&["strings", "--source", "app", "--locale", "de_DE", "--untranslated"])?;
    let out = stdout(&output);
    assert!(!out.contains("\"Hello\""));
    assert!(out.contains("Listed 1 of 2 strings in app"));

    Ok(())
}

#[test]
fn test_blank_translation_removes() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;
    let hash = hash_text("Bye %s");
    test.run(&["translate", "--source", "app", "--locale", "de_DE", &hash, "Tschüss %s"])?;

    let output = test.run(&["translate", "--source", "app", "--locale", "de_DE", &hash, " "])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Removed de_DE translation"));
    assert!(!test.read_file("l10n/app/de_DE-server.ini")?.contains("Tschüss"));

    let output = test.run(&["status"])?;
    assert!(stdout(&output).contains("2 untranslated strings"));

    Ok(())
}

#[test]
fn test_translate_unknown_hash() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;

    let output = test.run(&["translate", "--source", "app", "--locale", "de_DE", "deadbeef", "X"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No string with hash deadbeef in source app"));
    assert!(!test.read_file("l10n/app/de_DE-server.ini")?.contains("deadbeef"));

    Ok(())
}

#[test]
fn test_translate_unknown_locale_fails() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;

    let output = test.run(&[
        "translate",
        "--source",
        "app",
        "--locale",
        "fr_FR",
        &hash_text("Hello"),
        "Bonjour",
    ])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("fr_FR"));

    Ok(())
}
