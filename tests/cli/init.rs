use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Created .restextrc.json\n");

    let content = test.read_file(".restextrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["bundlesRoot"], "./bundles");
    assert_eq!(parsed["commonBundle"], "common");
    assert_eq!(parsed["specificBundle"], "messages");
    assert!(parsed.get("locale").is_none());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".restextrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, stdout, stderr) = run(cmd)?;

    assert_eq!(code, 1);
    assert_eq!(stdout, "");
    assert_eq!(stderr, "error: .restextrc.json already exists\n");
    assert_eq!(test.read_file(".restextrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_then_get_uses_defaults() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "bundles/messages.json",
        r#"{ "launcher.err.main.not.found": "Could not find or load main class {0}" }"#,
    )?;
    test.write_file("bundles/common.json", "{}")?;

    let mut init = test.command();
    init.arg("init");
    assert_eq!(run(init)?.0, 0);
    assert!(test.root().join(".restextrc.json").exists());

    let mut get = test.get_command();
    get.args(["launcher.err.main.not.found", "Hello"]);
    let (code, stdout, _) = run(get)?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "Could not find or load main class Hello\n");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Usage: restext"), "stdout: {stdout}");

    Ok(())
}
