use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod init;

const BIN_NAME: &str = "restext";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    /// Empty project; the `.git` marker stops the config search at its root.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir_all(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Project with a javac bundle (root and ja) and a common bundle.
    pub fn javac() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(
            ".restextrc.json",
            r#"{
  "specificBundle": "javac",
  "commonBundle": "common"
}"#,
        )?;
        test.write_file(
            "bundles/javac.json",
            r#"{
  "javac.err.file.not.found": "file not found: {0}",
  "javac.err.bad.value.for.option": "bad value for {0} option: ''{1}''",
  "javac.opt.verbose": "Output messages about what the compiler is doing",
  "main.usage.summary": "use --help for a list of possible options"
}"#,
        )?;
        test.write_file(
            "bundles/javac_ja.json",
            r#"{
  "javac.err.file.not.found": "ファイルが見つかりません: {0}",
  "javac.opt.verbose": "コンパイラの動作についてメッセージを出力する"
}"#,
        )?;
        test.write_file(
            "bundles/common.json",
            r#"{
  "main.usage.summary": "Usage: {0} <options> <source files>",
  "main.warn.deprecated": "{0} is deprecated"
}"#,
        )?;
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

    pub fn get_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("get");
        cmd
    }

    pub fn keys_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("keys");
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Run `cmd`, returning (exit code, stdout, stderr).
pub fn run(mut cmd: Command) -> Result<(i32, String, String)> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output().context("Failed to run restext")?;
    Ok((
        status.code().unwrap_or(-1),
        String::from_utf8(stdout)?,
        String::from_utf8(stderr)?,
    ))
}
