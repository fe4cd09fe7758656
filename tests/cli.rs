use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn data_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn curvy() -> Command {
    Command::cargo_bin("curvy").unwrap()
}

#[test]
fn help_lists_options() {
    curvy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--interpolation"))
        .stdout(predicate::str::contains("--print"));
}

#[test]
fn prints_polynomial_fit() {
    let file = data_file("time,distance\n0,1\n1,3\n2,5\n3,7\n");
    curvy()
        .args(["--print", "--style", "poly", "--degree", "1"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Line Plot: 4 points (Polynomial Fit)"))
        .stdout(predicate::str::contains("time: [0.0000, 3.0000]  distance: [1.0000, 7.0000]"))
        .stdout(predicate::str::contains("y = 2.0000x + 1.0000"))
        .stdout(predicate::str::contains("R² = 1.0000"));
}

#[test]
fn prints_least_squares_line_for_scattered_points() {
    // Mean 1.5 on both axes: slope 4/5, SS_res 1.8, SS_tot 5
    let file = data_file("0,0\n1,2\n2,1\n3,3\n");
    curvy()
        .args(["--print", "--style", "poly", "--degree", "1"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("y = 0.8000x + 0.3000"))
        .stdout(predicate::str::contains("R² = 0.6400"));
}

#[test]
fn reports_skipped_rows_and_fallbacks() {
    let file = data_file("0,0\nabc,1\n1,1\n2,0\n");
    curvy()
        .args(["--print", "--style", "smooth", "--interpolation", "cubic"])
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped row 2"))
        .stdout(predicate::str::contains("Fallback: too few distinct x values"));
}

#[test]
fn superscript_labels_on_the_command_line() {
    let file = data_file("0,0\n1,1\n");
    curvy()
        .args(["--print", "--latex", "--x-label", "t^2"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("t²: [0.0000, 1.0000]"))
        .stdout(predicate::str::contains("LaTeX unavailable"));
}

#[test]
fn insufficient_data_fails() {
    let file = data_file("1,2\n");
    curvy()
        .arg("--print")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least two valid data points"));
}

#[test]
fn wrong_column_count_fails() {
    let file = data_file("0,0\n1,2,3\n");
    curvy()
        .arg("--print")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 2 columns, found 3"));
}

#[test]
fn missing_file_fails() {
    curvy()
        .args(["--print", "/definitely/not/here.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn unknown_style_is_rejected() {
    let file = data_file("0,0\n1,1\n");
    curvy()
        .args(["--print", "--style", "bezier"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown plot style"));
}
