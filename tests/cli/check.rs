use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::javac()?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "✓ Checked 3 bundle files in 2 bundles - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_check_orphan_key_is_warning() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file(
        "bundles/javac_ja.json",
        r#"{
  "javac.opt.verbose": "コンパイラの動作についてメッセージを出力する",
  "javac.opt.removed": "削除されたオプション"
}"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert!(
        stdout.contains("warning: \"javac.opt.removed\"  orphan-key"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("javac_ja.json:3:1"), "stdout: {stdout}");
    assert!(
        stdout.contains("missing from root javac"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("✘ 1 problems (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_check_report_format() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file(
        "bundles/javac_ja.json",
        r#"{
  "javac.opt.verbose": "コンパイラの動作についてメッセージを出力する",
  "javac.opt.removed": "削除されたオプション"
}"#,
    )?;

    let (_, stdout, _) = run(test.check_command())?;

    assert_snapshot!(stdout, @r#"
    warning: "javac.opt.removed"  orphan-key
      --> ./bundles/javac_ja.json:3:1
      = note: in ja ("削除されたオプション"), missing from root javac

    ✘ 1 problems (0 errors, 1 warning)
    "#);

    Ok(())
}

#[test]
fn test_check_malformed_pattern_is_error() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file(
        "bundles/common.json",
        r#"{
  "main.usage.summary": "Usage: {0 <options>"
}"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(
        stdout.contains("error: \"main.usage.summary\"  malformed-pattern"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("unmatched brace"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_check_placeholder_mismatch() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file(
        "bundles/javac_ja.json",
        r#"{
  "javac.err.file.not.found": "ファイルが見つかりません"
}"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert!(
        stdout.contains("placeholder-mismatch"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("root uses {0}, ja uses none"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_check_missing_root_table() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file("bundles/doclets_ja.json", r#"{ "doclet.Generating": "生成中" }"#)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(
        stdout.contains("error: \"doclets\"  missing-root"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("only found: ja"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_check_parse_error() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file("bundles/common_ja.json", "{ \"main.usage.summary\": ")?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("parse-error"), "stdout: {stdout}");
    assert!(stdout.contains("common_ja.json"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_check_nested_and_dotted_key_collision() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file(
        "bundles/javac_ja.json",
        r#"{
  "javac.opt": {
    "verbose": "コンパイラの動作についてメッセージを出力する"
  },
  "javac.opt.verbose": "詳細を出力する"
}"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("parse-error"), "stdout: {stdout}");
    assert!(stdout.contains("javac_ja.json"), "stdout: {stdout}");
    assert!(
        stdout.contains("duplicate key \"javac.opt.verbose\" (lines 3 and 5)"),
        "stdout: {stdout}"
    );

    Ok(())
}

#[test]
fn test_check_selected_rules_only() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file("bundles/doclets_ja.json", r#"{ "doclet.Generating": "生成中" }"#)?;

    let mut cmd = test.check_command();
    cmd.arg("orphan-key");
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 0);
    assert!(
        stdout.starts_with("✓ Checked 4 bundle files in 3 bundles"),
        "stdout: {stdout}"
    );

    Ok(())
}

#[test]
fn test_check_config_ignores() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file(
        ".restextrc.json",
        r#"{
  "specificBundle": "javac",
  "ignores": ["generated/**"]
}"#,
    )?;
    test.write_file("bundles/generated/broken.json", "not json")?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert!(stdout.starts_with("✓ Checked 3 bundle files"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_check_invalid_config() -> Result<()> {
    let test = CliTest::javac()?;
    test.write_file(".restextrc.json", r#"{ "commonBundle": "has_underscore" }"#)?;

    let (code, stdout, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert_eq!(stdout, "");
    assert!(stderr.contains("commonBundle"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_check_missing_bundles_root() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");

    Ok(())
}
