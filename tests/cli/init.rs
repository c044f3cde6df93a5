use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{APP_PROJECT, CliTest, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["includes", "ignores", "propertySuffix", "learnMoreUrl", "indent"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["propertySuffix"], "Version");
    assert_eq!(parsed["indent"], 2);
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
    ✓ Created .cspropsrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".cspropsrc.json").exists());
    let content = test.read_file(".cspropsrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".cspropsrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(".cspropsrc.json already exists"));
    assert_eq!(test.read_file(".cspropsrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("shared.props", "<Project>\n</Project>\n")?;
    test.write_file("App.csproj", APP_PROJECT)?;

    let output = test.scan_command().output()?;
    assert_eq!(
        output.status.code(),
        Some(1),
        "Scan should run with the initialized config. stdout: {}",
        stdout(&output)
    );
    assert!(stdout(&output).contains("NewtonsoftJsonVersion"));

    Ok(())
}
