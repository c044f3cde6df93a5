use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_fixes_package_version() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test
        .fixes_command()
        .args(["App.csproj", "--line", "7"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[1] Extract '13.0.1' to $(NewtonsoftJsonVersion) (preferred)\n\
         [2] Learn more about MSBuild properties\n"
    );

    Ok(())
}

#[test]
fn test_fixes_element_value() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test
        .fixes_command()
        .args(["App.csproj", "--line", "4"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[1] Extract 'net8.0' to $(TargetFramework)\n\
         [2] Learn more about MSBuild properties\n"
    );

    Ok(())
}

#[test]
fn test_fixes_reference_is_not_extracted_again() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test
        .fixes_command()
        .args(["App.csproj", "--line", "8"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[1] Learn more about MSBuild properties\n");

    Ok(())
}

#[test]
fn test_fixes_without_imports_only_learn_more() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "Lib.csproj",
        r#"<Project>
  <ItemGroup>
    <PackageReference Include="Dapper" Version="2.1.35" />
  </ItemGroup>
</Project>
"#,
    )?;

    let output = test
        .fixes_command()
        .args(["Lib.csproj", "--line", "3"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[1] Learn more about MSBuild properties\n");

    Ok(())
}

#[test]
fn test_fixes_json() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        ".cspropsrc.json",
        r#"{ "learnMoreUrl": "https://example.com/props" }"#,
    )?;

    let output = test
        .fixes_command()
        .args(["App.csproj", "--line", "7", "--json"])
        .output()?;
    assert!(output.status.success());

    let actions: Value = serde_json::from_slice(&output.stdout)?;
    let extract = &actions[0];
    assert_eq!(extract["isPreferred"], true);
    assert_eq!(extract["edit"]["newText"], "$(NewtonsoftJsonVersion)");
    assert_eq!(extract["edit"]["range"]["start"]["line"], 6);
    assert_eq!(extract["command"]["command"], "csprops.extractProperty");
    assert_eq!(extract["command"]["arguments"][1], "NewtonsoftJsonVersion");
    assert_eq!(extract["command"]["arguments"][2], "13.0.1");
    assert!(
        extract["command"]["arguments"][0]
            .as_str()
            .is_some_and(|path| path.ends_with("shared.props"))
    );

    let learn_more = &actions[1];
    assert_eq!(learn_more["command"]["command"], "csprops.openLink");
    assert_eq!(learn_more["command"]["arguments"][0], "https://example.com/props");

    Ok(())
}

#[test]
fn test_fixes_custom_suffix() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(".cspropsrc.json", r#"{ "propertySuffix": "PackageVersion" }"#)?;

    let output = test
        .fixes_command()
        .args(["App.csproj", "--line", "7"])
        .output()?;
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("[1] Extract '13.0.1' to $(NewtonsoftJsonPackageVersion)"));

    Ok(())
}
