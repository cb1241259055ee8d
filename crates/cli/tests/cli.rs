use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

fn fasta(records: &[(&str, &str)]) -> NamedTempFile {
    let mut file = Builder::new().suffix(".fa").tempfile().unwrap();
    for (id, seq) in records {
        writeln!(file, ">{id}").unwrap();
        writeln!(file, "{seq}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn divstat() -> Command {
    Command::cargo_bin("divstat").unwrap()
}

const SAMPLE: [(&str, &str); 4] = [
    ("s1", "ACGTACGTAC-TACGT"),
    ("s2", "ACGTTCGTACGTACGA"),
    ("s3", "ACCTACGTAAGTACGT"),
    ("s4", "TCGTACGTACGTAC-T"),
];

#[test]
fn test_analyze_whole_table() {
    let input = fasta(&SAMPLE);

    divstat()
        .arg("analyze")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("alignment"))
        .stdout(predicate::str::contains("theta_w"))
        .stdout(predicate::str::contains("F*"));
}

#[test]
fn test_analyze_two_sequences_reports_na() {
    let input = fasta(&[("a", "AAAA"), ("b", "AATA")]);

    divstat()
        .args(["analyze", "--no-header", "--label", "toy"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("NA"))
        .stdout(predicate::str::contains("toy"))
        .stdout(predicate::str::contains("alignment").not());
}

#[test]
fn test_analyze_batch_prints_one_row_per_file() {
    let first = fasta(&SAMPLE);
    let second = fasta(&[("a", "AAAA"), ("b", "AATA")]);

    let output = divstat()
        .args(["analyze", "--no-header"])
        .arg(first.path())
        .arg(second.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn test_analyze_json() {
    let input = fasta(&SAMPLE);

    let output = divstat()
        .args(["analyze", "--format", "json"])
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["output"]["mode"], "whole");
    assert_eq!(doc["output"]["result"]["sample_size"], 4);
    assert_eq!(doc["output"]["result"]["gap_free_length"], 14);
}

#[test]
fn test_analyze_pairwise_absolute() {
    let input = fasta(&[("a", "AAAA"), ("b", "AATA"), ("c", "TATA")]);

    divstat()
        .args(["analyze", "--pairwise", "--absolute", "--format", "latex", "--no-header"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("b & 1.000000 \\\\"))
        .stdout(predicate::str::contains("c & 2.000000 & 1.000000 \\\\"));
}

#[test]
fn test_analyze_windows() {
    let input = fasta(&SAMPLE);

    let output = divstat()
        .args(["analyze", "--window", "4:3:tajima", "--no-header"])
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    assert!(lines.next().unwrap().starts_with("# "));
    // 14 gap-free columns give four windows of width 4 and step 3.
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[0].starts_with("1 "));
}

#[test]
fn test_analyze_window_pairwise_without_header_keeps_coordinates() {
    let input = fasta(&[("a", "AAAAAA"), ("b", "AATAAT"), ("c", "TATAAA")]);

    divstat()
        .args(["analyze", "--pairwise", "--window", "3:3:pi", "--no-header"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# window 1-3 midpoint 2.0"))
        .stdout(predicate::str::contains("# window 4-6 midpoint 5.0"));
}

#[test]
fn test_analyze_pairwise_batch_separates_sources_and_shows_label() {
    let first = fasta(&SAMPLE);
    let second = fasta(&[("a", "AAAA"), ("b", "AATA")]);
    let second_name = second.path().file_name().unwrap().to_string_lossy().into_owned();

    divstat()
        .args(["analyze", "--pairwise", "--no-header", "--label", "run1"])
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("# {second_name} run1")));
}

#[test]
fn test_analyze_window_pairwise() {
    let input = fasta(&SAMPLE);

    divstat()
        .args(["analyze", "--pairwise", "--window", "5:5:theta"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# window 1-5"))
        .stdout(predicate::str::contains("# window 6-"));
}

#[test]
fn test_invalid_window_rejected() {
    let input = fasta(&SAMPLE);

    divstat()
        .args(["analyze", "--window", "10:0:pi"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("step"));

    divstat()
        .args(["analyze", "--window", "10:5:foo"])
        .arg(input.path())
        .assert()
        .failure();
}

#[test]
fn test_single_sequence_rejected() {
    let input = fasta(&[("only", "ACGT")]);

    divstat()
        .arg("analyze")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least 2"));
}

#[test]
fn test_invalid_residue_rejected() {
    let input = fasta(&[("a", "ACGN"), ("b", "ACGT")]);

    divstat()
        .arg("analyze")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read alignment"));
}

#[test]
fn test_protein_alignment() {
    let input = fasta(&[("a", "MKVL"), ("b", "MKIL"), ("c", "MRVL")]);

    divstat()
        .args(["analyze", "--molecule", "protein", "--no-header"])
        .arg(input.path())
        .assert()
        .success();
}

#[test]
fn test_missing_file() {
    divstat()
        .args(["analyze", "does-not-exist.fa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.fa"));
}

#[test]
fn test_validate() {
    let input = fasta(&SAMPLE);

    divstat()
        .arg("validate")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequences: 4"))
        .stdout(predicate::str::contains("Gap-free columns: 14"));
}

#[test]
fn test_threads_flag() {
    let input = fasta(&SAMPLE);

    divstat()
        .args(["--threads", "2", "analyze", "--pairwise"])
        .arg(input.path())
        .assert()
        .success();
}
