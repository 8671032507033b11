use assert_cmd::prelude::*;
use std::process::Command;

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly will cause clap to panic regardless of the arguments or
// options provided.
// Calling help does not require any application logic so if this tests fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookfind")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

#[test]
fn title_subcommand_help_lists_options() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookfind")?;

    cmd.args(["title", "--help"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let help = String::from_utf8(output)?;

    for option in ["--max-results", "--exact", "--min-rating", "--lang", "--format"] {
        assert!(help.contains(option), "missing {option} in:\n{help}");
    }

    Ok(())
}

#[test]
fn isbn_without_value_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookfind")?;

    cmd.arg("isbn");
    cmd.assert().failure();

    Ok(())
}

#[test]
fn unknown_format_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookfind")?;

    cmd.args(["--format", "xml", "isbn", "9780441013593"]);
    cmd.assert().failure();

    Ok(())
}
