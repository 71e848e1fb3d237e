use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn test_locales_lists_configured() -> Result<()> {
    let test = CliTest::project()?;

    let output = test.run(&["locales"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().take(2).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|l| l.starts_with("  de_DE")));
    assert!(lines.iter().any(|l| l.starts_with("* en_UK")));
    assert!(out.contains("2 locales in the application namespace"));

    let output = test.run(&["locales", "--namespace", "content"])?;
    assert!(stdout(&output).contains("1 locale in the content namespace"));

    Ok(())
}

#[test]
fn test_locales_supported() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["locales", "--supported"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 11);
    assert!(out.contains("sv_SE"));

    Ok(())
}

#[test]
fn test_sources_grouped() -> Result<()> {
    let test = CliTest::with_file(
        ".locsyncrc.json",
        r#"{
          "sources": [
            { "alias": "web", "label": "Website", "group": "Frontend", "paths": ["web"] },
            { "alias": "admin", "label": "Admin", "group": "Frontend", "paths": ["admin"] },
            { "alias": "api", "label": "API", "paths": ["api"] }
          ]
        }"#,
    )?;

    let output = test.run(&["sources"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Frontend:\n  admin Admin ("), "stdout: {}", out);
    assert!(out.contains("  web Website ("));
    assert!(out.contains("api API ("));
    assert!(out.contains("[not scanned]"));

    Ok(())
}
