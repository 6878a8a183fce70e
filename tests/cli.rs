use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const FASTA: &str = ">A\nAC\n>B\nAC\n>C\nGT\n>D\nGT\n";

#[test]
fn test_table_with_popmap() {
    let temp = tempdir().unwrap();
    let fasta = temp.path().join("aln.fasta");
    let popmap = temp.path().join("popmap.txt");
    fs::write(&fasta, FASTA).unwrap();
    fs::write(&popmap, "A\tpop1\nB\tpop1\nC\tpop2\nD\tpop2\n").unwrap();
    let prefix = temp.path().join("result");

    let mut cmd = Command::cargo_bin("hapfreq").unwrap();
    cmd.arg("--fasta")
        .arg(&fasta)
        .arg("--popmap")
        .arg(&popmap)
        .arg("--out")
        .arg(&prefix)
        .assert()
        .success()
        .stdout(predicate::str::contains("Haplotype frequencies for pop pop1:"))
        .stdout(predicate::str::contains("AC:1.0000"));

    let table = fs::read_to_string(temp.path().join("result_freq.tsv")).unwrap();
    assert_eq!(
        table,
        "Haplotype\tTOTAL\tpop1\tpop2\nAC\t0.5000\t1.0000\t0.0000\nGT\t0.5000\t0.0000\t1.0000\n"
    );
}

#[test]
fn test_table_without_popmap() {
    let temp = tempdir().unwrap();
    let fasta = temp.path().join("aln.fasta");
    fs::write(&fasta, FASTA).unwrap();

    let mut cmd = Command::cargo_bin("hapfreq").unwrap();
    cmd.current_dir(temp.path())
        .arg("-f")
        .arg(&fasta)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let table = fs::read_to_string(temp.path().join("out_freq.tsv")).unwrap();
    assert_eq!(table, "Haplotype\tTOTAL\nAC\t0.5000\nGT\t0.5000\n");
}

#[test]
fn test_unassigned_sample_warns() {
    let temp = tempdir().unwrap();
    let fasta = temp.path().join("aln.fasta");
    let popmap = temp.path().join("popmap.txt");
    fs::write(&fasta, FASTA).unwrap();
    fs::write(&popmap, "A\tpop1\nB\tpop1\nC\tpop2\n").unwrap();

    let mut cmd = Command::cargo_bin("hapfreq").unwrap();
    cmd.current_dir(temp.path())
        .env("RUST_LOG", "warn")
        .arg("-f")
        .arg(&fasta)
        .arg("-p")
        .arg(&popmap)
        .assert()
        .success()
        .stderr(predicate::str::contains("sample D isn't in the population map"));

    let table = fs::read_to_string(temp.path().join("out_freq.tsv")).unwrap();
    assert!(table.contains("GT\t0.5000\t0.0000\t1.0000"));
}

#[test]
fn test_missing_fasta_argument_fails() {
    let temp = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("hapfreq").unwrap();
    cmd.current_dir(temp.path())
        .env("RUST_LOG", "error")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required input"));
    assert!(!temp.path().join("out_freq.tsv").exists());
}

#[test]
fn test_nonexistent_fasta_fails() {
    let temp = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("hapfreq").unwrap();
    cmd.current_dir(temp.path())
        .env("RUST_LOG", "error")
        .arg("-f")
        .arg("nope.fasta")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.fasta not found"));
}

#[test]
fn test_unwritable_output_fails() {
    let temp = tempdir().unwrap();
    let fasta = temp.path().join("aln.fasta");
    fs::write(&fasta, FASTA).unwrap();

    let mut cmd = Command::cargo_bin("hapfreq").unwrap();
    cmd.arg("-f")
        .arg(&fasta)
        .arg("-o")
        .arg(temp.path().join("no_such_dir").join("out"))
        .assert()
        .failure();
}
