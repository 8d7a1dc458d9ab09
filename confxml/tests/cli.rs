//! CLI integration tests for the `confxml` binary.
//!
//! Each test writes a source file into a temporary directory, runs the
//! binary on it and checks exit code, stdout and stderr.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn confxml() -> Command {
    cargo_bin_cmd!("confxml")
}

fn write_source(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("input.conf");
    fs::write(&path, contents).expect("write input");
    path
}

#[test]
fn converts_bare_values_to_xml() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "1 \"x\" {1,2,3}");

    confxml().arg(&input).assert().success().stdout(
        "<config>\n  <item_0>1</item_0>\n  <item_1>x</item_1>\n  <item_2>\n    <array>\n      <item>1</item>\n      <item>2</item>\n      <item>3</item>\n    </array>\n  </item_2>\n</config>\n",
    );
}

#[test]
fn resolves_constants_at_point_of_use() {
    let dir = TempDir::new().unwrap();
    let input = write_source(
        &dir,
        "-- redefinition\ndef A = 1\ndef B = ?[A]\n|# shadow A #|\ndef A = 2\ndef C = ?[A]\n",
    );

    confxml()
        .arg(&input)
        .assert()
        .success()
        .stdout("<config>\n  <A>2</A>\n  <B>1</B>\n  <C>2</C>\n</config>\n");
}

#[test]
fn custom_root_element() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "def PORT = 8080");

    confxml()
        .arg(&input)
        .args(["--root", "server"])
        .assert()
        .success()
        .stdout("<server>\n  <PORT>8080</PORT>\n</server>\n");
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "def NAME = \"demo\"");
    let output = dir.path().join("out.xml");

    confxml()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "<config>\n  <NAME>demo</NAME>\n</config>\n");
}

#[test]
fn missing_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.conf");

    confxml()
        .arg(&missing)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn undefined_constant_exits_1() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "def B = ?[A]");

    confxml()
        .arg(&input)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Undefined constant 'A'"));
}

#[test]
fn syntax_error_reports_position() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "def A = 1\ndef B = {}\n");

    confxml()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Syntax error")
                .and(predicate::str::contains("line 2, column 10")),
        );
}

#[test]
fn lexer_error_reports_position() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "def A = 1 |# open comment");

    confxml()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Lexer error")
                .and(predicate::str::contains("line 1, column 11")),
        );
}

#[test]
fn number_overflow_exits_1() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "99999999999999999999");

    confxml()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("64-bit"));
}

#[test]
fn show_ast_goes_to_stderr() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "def A = 1");

    confxml()
        .arg(&input)
        .arg("--show-tokens")
        .arg("--show-ast")
        .assert()
        .success()
        .stdout("<config>\n  <A>1</A>\n</config>\n")
        .stderr(
            predicate::str::contains("=== TOKENS ===").and(predicate::str::contains("Assign")),
        );
}

#[test]
fn missing_argument_is_a_usage_error() {
    confxml().assert().failure();
}

#[test]
fn deep_reference_chain_exits_1_with_message() {
    let dir = TempDir::new().unwrap();
    let mut source = String::from("def A = 1\n");
    source.push_str(&"def A = {?[A]}\n".repeat(60_000));
    let input = write_source(&dir, &source);

    confxml()
        .arg(&input)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("Error: ").and(predicate::str::contains("nested deeper than")));
}
