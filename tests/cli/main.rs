use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod init;
mod listing;
mod publish;
mod scan;
mod status;
mod translate;

const BIN_NAME: &str = "locsync";

/// Config used by most tests: one German locale, one source rooted at
/// `src/` with `css` folders excluded.
pub const PROJECT_CONFIG: &str = r#"{
  "storageFolder": "./l10n",
  "appLocales": ["de_DE"],
  "sources": [
    { "alias": "app", "label": "Application", "paths": ["src"], "excludeFolders": ["css"] }
  ]
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops config discovery at the temp project.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A project with [`PROJECT_CONFIG`] and a PHP and a JavaScript file.
    pub fn project() -> Result<Self> {
        let test = Self::with_file(".locsyncrc.json", PROJECT_CONFIG)?;
        test.write_file(
            "src/index.php",
            "<h1><?php echo t(\"Hello\"); ?></h1>\n<?= t('Bye %s', $name) ?>\n",
        )?;
        test.write_file("src/app.js", "alert(t(\"Hello\"));\n")?;
        test.write_file("src/css/theme.js", "t(\"Never scanned\");\n")?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Runs `locsync <args>` in the project.
    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to run locsync {}", args.join(" ")))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
