use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_suggest_lists_imported_properties() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.suggest_command().arg("App.csproj").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "$(LangVersion)    = latest\n$(SerilogVersion) = 3.1.1\n"
    );

    Ok(())
}

#[test]
fn test_suggest_json_completion_items() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test
        .suggest_command()
        .args(["App.csproj", "--json"])
        .output()?;
    assert!(output.status.success());

    let items: Value = serde_json::from_slice(&output.stdout)?;
    let items = items.as_array().expect("array of completion items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["label"], "SerilogVersion");
    assert_eq!(items[1]["insertText"], "$(SerilogVersion)");
    assert_eq!(
        items[1]["documentation"],
        "*SerilogVersion* refers a value as **3.1.1**."
    );

    Ok(())
}

#[test]
fn test_suggest_follows_imports_in_order() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "build/versions.props",
        "<Project>\n  <PropertyGroup>\n    <XunitVersion>2.9.0</XunitVersion>\n  </PropertyGroup>\n</Project>\n",
    )?;
    test.write_file(
        "common.props",
        "<Project>\n  <PropertyGroup>\n    <Nullable>enable</Nullable>\n  </PropertyGroup>\n</Project>\n",
    )?;
    test.write_file(
        "src/Tests/Tests.csproj",
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <Import Project="..\..\build\versions.props" />
  <Import Project="../../common.props" />
</Project>
"#,
    )?;

    let output = test
        .suggest_command()
        .arg("src/Tests/Tests.csproj")
        .output()?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "$(XunitVersion) = 2.9.0\n$(Nullable)     = enable\n"
    );

    Ok(())
}

#[test]
fn test_suggest_skips_missing_import() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "Other.csproj",
        r#"<Project>
  <Import Project="missing.props" />
  <Import Project="shared.props" />
</Project>
"#,
    )?;

    let output = test.suggest_command().arg("Other.csproj").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("$(LangVersion)"));
    assert!(stderr(&output).contains("missing.props"));

    Ok(())
}

#[test]
fn test_suggest_without_imports() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Lib.csproj", "<Project Sdk=\"Microsoft.NET.Sdk\">\n</Project>\n")?;

    let output = test.suggest_command().arg("Lib.csproj").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("No properties available to"));

    Ok(())
}

#[test]
fn test_suggest_missing_document() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.suggest_command().arg("Nope.csproj").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Failed to open document"));

    Ok(())
}
