use anyhow::Result;
use locsync::utils::hash_text;

use crate::{CliTest, stdout};

#[test]
fn test_publish_without_client_folder() -> Result<()> {
    let test = CliTest::project()?;

    let output = test.run(&["publish"])?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("warning: no client folder configured"));
    assert!(out.contains("hint: set clientFolder in .locsyncrc.json or pass --client-folder"));

    Ok(())
}

#[test]
fn test_publish_writes_client_files() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;
    test.run(&[
        "translate",
        "--source",
        "app",
        "--locale",
        "de_DE",
        &hash_text("Hello"),
        "Hallo",
    ])?;

    let output = test.run(&["publish", "--client-folder", "public/js", "-v"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Wrote 3 client files"));

    let locale = test.read_file("public/js/locale-de_DE.js")?;
    assert!(locale.starts_with("/* "));
    assert!(locale.contains("LocSync.register(\"de_DE\", {"));
    assert!(locale.contains(&format!("\"{}\": \"Hallo\"", hash_text("Hello"))));
    // PHP-only strings stay out of the client table.
    assert!(!locale.contains(&hash_text("Bye %s")));

    assert!(test.read_file("public/js/translator.js")?.contains("LocSync"));
    assert!(test.root().join("public/js/md5.js").exists());

    Ok(())
}

#[test]
fn test_publish_honors_cache_key() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;

    test.run(&["publish", "--client-folder", "out"])?;
    let output = test.run(&["publish", "--client-folder", "out"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Client files are up to date (use --force to rewrite)"));

    let output = test.run(&["publish", "--client-folder", "out", "--force"])?;
    assert!(stdout(&output).contains("Wrote 3 client files"));

    Ok(())
}

#[test]
fn test_files_lists_artifacts() -> Result<()> {
    let test = CliTest::project()?;

    let output = test.run(&["files", "--client-folder", "out"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("translator.js (missing)"));
    assert!(out.contains("md5.js (missing)"));
    assert!(out.contains("locale-de_DE.js (missing)"));

    let output = test.run(&["files"])?;
    assert!(stdout(&output).contains("No client folder configured"));

    Ok(())
}
