use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .mdlocrc.json"));

    let content = test.read_file(".mdlocrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["defaultLocale"], "en");
    assert_eq!(parsed["placeholder"], "locale");
    assert!(parsed.get("collapsibleElements").is_some());
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".mdlocrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("already exists"));
    assert_eq!(test.read_file(".mdlocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("docs/index.mdx", "# Welcome\n")?;

    let output = test.extract_command().arg("docs/index.mdx").output()?;

    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_init_in_subdirectory_notes_parent_config() -> Result<()> {
    let test = CliTest::with_file(".mdlocrc.json", "{}")?;
    test.write_file("docs/index.mdx", "# Welcome\n")?;

    let output = test
        .command()
        .current_dir(test.root().join("docs"))
        .arg("init")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("docs/.mdlocrc.json").exists());
    assert!(stdout(&output).contains("is no longer used from this directory"));

    Ok(())
}
