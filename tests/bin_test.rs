use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn yaml_gen() -> Command {
    Command::cargo_bin("yaml-gen").unwrap()
}

#[test]
fn test_stdin_to_stdout() {
    yaml_gen()
        .args(["--format=false", "--package", "demo"])
        .write_stdin("name: widget\ncount: 2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("package demo\n"))
        .stdout(predicate::str::contains("// Source: (stdin)"))
        .stdout(predicate::str::contains("\"name\": \"widget\""))
        .stdout(predicate::str::contains("\t\"count\",\n\t\"name\",\n"));
}

#[test]
fn test_file_input_writes_sibling() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("types.go"), "package models\n").unwrap();
    let input = dir.path().join("data.yaml");
    fs::write(&input, "name: widget\n").unwrap();

    yaml_gen()
        .arg("--format=false")
        .arg("--in")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let generated = fs::read_to_string(dir.path().join("data.go")).unwrap();
    assert!(generated.starts_with("// Code generated by yaml-gen"));
    assert!(generated.contains("// Source: data.yaml\n"));
    assert!(generated.contains("package models\n"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    yaml_gen()
        .arg("--format=false")
        .arg("--in")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("error: failed to read input"));
}

#[test]
fn test_formatter_not_on_path() {
    yaml_gen()
        .env("PATH", "")
        .args(["--format", "--package", "demo"])
        .write_stdin("name: widget\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "goimports was not found, consider using `--format=false`",
        ));
}

#[test]
fn test_invalid_document() {
    yaml_gen()
        .args(["--format=false", "--package", "demo"])
        .write_stdin("name: [unterminated\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode input (stdin)"));
}

#[test]
fn test_long_help_shows_usage() {
    yaml_gen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Renders a Go source file from a YAML or JSON document."))
        .stdout(predicate::str::contains("data.yaml becomes data.go"));

    yaml_gen()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("data.yaml becomes data.go").not());
}
