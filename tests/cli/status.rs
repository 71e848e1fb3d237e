use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn test_status_before_scan() -> Result<()> {
    let test = CliTest::project()?;

    let output = test.run(&["status"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Application  not scanned  -"), "stdout: {}", out);

    Ok(())
}

#[test]
fn test_status_counts_untranslated() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;

    let output = test.run(&["status"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.lines().next().unwrap().contains("de_DE"));
    assert!(out.contains("Application  2        2"), "stdout: {}", out);
    assert!(out.contains("warning: 2 untranslated strings"));

    Ok(())
}

#[test]
fn test_status_fail_on_untranslated() -> Result<()> {
    let test = CliTest::project()?;
    test.run(&["scan"])?;

    let output = test.run(&["status", "--fail-on-untranslated"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("\u{2718} 2 untranslated strings"));

    Ok(())
}

#[test]
fn test_status_unknown_locale() -> Result<()> {
    let test = CliTest::project()?;

    let output = test.run(&["status", "--locale", "fr_FR"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("'--locale'"));

    Ok(())
}
