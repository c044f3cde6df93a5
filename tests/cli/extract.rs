use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{APP_PROJECT, CliTest, SHARED_PROPS, stderr, stdout};

const TOOLS_PROJECT: &str = r#"<Project>
  <Import Project="shared.props" />
  <ItemGroup>
    <DotNetCliToolReference Update="dotnet-ef" Version="8.0.0" />
  </ItemGroup>
</Project>
"#;

fn output_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }
    Ok(child.wait_with_output()?)
}

#[test]
fn test_extract_dry_run() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test
        .extract_command()
        .args(["App.csproj", "--line", "7"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("App.csproj:7:"), "stdout: {}", out);
    assert!(out.contains("<NewtonsoftJsonVersion>13.0.1</NewtonsoftJsonVersion>"));
    assert!(out.contains("Run with --apply to apply this change."));

    assert_eq!(test.read_file("App.csproj")?, APP_PROJECT);
    assert_eq!(test.read_file("shared.props")?, SHARED_PROPS);

    Ok(())
}

#[test]
fn test_extract_apply() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test
        .extract_command()
        .args(["App.csproj", "--line", "7", "--apply"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Added NewtonsoftJsonVersion to"));

    assert_eq!(
        test.read_file("App.csproj")?,
        APP_PROJECT.replace(r#"Version="13.0.1""#, r#"Version="$(NewtonsoftJsonVersion)""#)
    );
    assert_eq!(
        test.read_file("shared.props")?,
        r#"<Project>
  <PropertyGroup>
    <LangVersion>latest</LangVersion>
    <SerilogVersion>3.1.1</SerilogVersion>
    <NewtonsoftJsonVersion>13.0.1</NewtonsoftJsonVersion>
  </PropertyGroup>
</Project>
"#
    );

    Ok(())
}

#[test]
fn test_extract_existing_property_not_duplicated() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "Web.csproj",
        r#"<Project>
  <Import Project="shared.props" />
  <ItemGroup>
    <PackageReference Include="Serilog" Version="3.1.1" />
  </ItemGroup>
</Project>
"#,
    )?;

    let output = test
        .extract_command()
        .args(["Web.csproj", "--line", "4", "--apply"])
        .output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("SerilogVersion is already declared in"));

    assert!(test.read_file("Web.csproj")?.contains(r#"Version="$(SerilogVersion)""#));
    assert_eq!(test.read_file("shared.props")?, SHARED_PROPS);

    Ok(())
}

#[test]
fn test_extract_with_name_option() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("Tools.csproj", TOOLS_PROJECT)?;

    let output = test
        .extract_command()
        .args(["Tools.csproj", "--line", "4", "--candidate", "2"])
        .args(["--name", "Ef.Tool Version", "--apply"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(
        test.read_file("Tools.csproj")?
            .contains(r#"Update="dotnet-ef" Version="$(EfToolVersion)""#)
    );
    assert!(
        test.read_file("shared.props")?
            .contains("    <EfToolVersion>8.0.0</EfToolVersion>\n")
    );

    Ok(())
}

#[test]
fn test_extract_prompts_for_name() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("Tools.csproj", TOOLS_PROJECT)?;

    let mut cmd = test.extract_command();
    cmd.args(["Tools.csproj", "--line", "4", "--candidate", "2", "--apply"]);
    let output = output_with_stdin(cmd, "DotnetEfVersion\n")?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains(r#"Property name for Version="8.0.0": "#));

    assert!(test.read_file("Tools.csproj")?.contains(r#"Version="$(DotnetEfVersion)""#));
    assert!(test.read_file("shared.props")?.contains("<DotnetEfVersion>8.0.0</DotnetEfVersion>"));

    Ok(())
}

#[test]
fn test_extract_cancelled_prompt() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("Tools.csproj", TOOLS_PROJECT)?;

    let mut cmd = test.extract_command();
    cmd.args(["Tools.csproj", "--line", "4", "--apply"]);
    let output = output_with_stdin(cmd, "\n")?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Extraction cancelled."));

    assert_eq!(test.read_file("Tools.csproj")?, TOOLS_PROJECT);
    assert_eq!(test.read_file("shared.props")?, SHARED_PROPS);

    Ok(())
}

#[test]
fn test_extract_without_import() -> Result<()> {
    let test = CliTest::new()?;
    let project = r#"<Project>
  <ItemGroup>
    <PackageReference Include="Dapper" Version="2.1.35" />
  </ItemGroup>
</Project>
"#;
    test.write_file("Lib.csproj", project)?;

    let output = test
        .extract_command()
        .args(["Lib.csproj", "--line", "3", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not import any properties file"));
    assert_eq!(test.read_file("Lib.csproj")?, project);

    Ok(())
}

#[test]
fn test_extract_line_without_value() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test
        .extract_command()
        .args(["App.csproj", "--line", "6", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no extractable value on line 6"));
    assert_eq!(test.read_file("App.csproj")?, APP_PROJECT);

    Ok(())
}

#[test]
fn test_extract_candidate_out_of_range() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test
        .extract_command()
        .args(["App.csproj", "--line", "7", "--candidate", "3"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--candidate 3 is out of range"));

    Ok(())
}

#[test]
fn test_extract_broken_props_file_keeps_document_edit() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("shared.props", "<Project>\n  <PropertyGroup>\n</Project>\n")?;

    let output = test
        .extract_command()
        .args(["App.csproj", "--line", "7", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("NewtonsoftJsonVersion was not added"));

    assert!(test.read_file("App.csproj")?.contains("$(NewtonsoftJsonVersion)"));
    assert_eq!(
        test.read_file("shared.props")?,
        "<Project>\n  <PropertyGroup>\n</Project>\n"
    );

    Ok(())
}
