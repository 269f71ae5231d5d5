//! Tests of the command surface: consent gating, exit codes, and the
//! verify subcommand, driving the real binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn acquire_cmd() -> Command {
    Command::cargo_bin("rust_acquire").unwrap()
}

#[test]
fn refusing_consent_exits_1_and_creates_nothing() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("a.txt"), b"data").unwrap();
    let outdir = TempDir::new().unwrap();

    acquire_cmd()
        .arg("--input")
        .arg(source.path())
        .arg("--outdir")
        .arg(outdir.path())
        .assert()
        .code(1);

    // no workspace directory anywhere under outdir
    assert_eq!(fs::read_dir(outdir.path()).unwrap().count(), 0);
}

#[test]
fn missing_source_exits_2() {
    let outdir = TempDir::new().unwrap();

    acquire_cmd()
        .arg("--consent")
        .arg("--outdir")
        .arg(outdir.path())
        .assert()
        .code(2);

    assert_eq!(fs::read_dir(outdir.path()).unwrap().count(), 0);
}

#[test]
fn unreachable_source_exits_2() {
    let outdir = TempDir::new().unwrap();

    acquire_cmd()
        .arg("--consent")
        .arg("--input")
        .arg("/nonexistent-backup-folder")
        .arg("--outdir")
        .arg(outdir.path())
        .assert()
        .code(2);

    assert_eq!(fs::read_dir(outdir.path()).unwrap().count(), 0);
}

#[test]
fn successful_acquisition_exits_0() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("chat.db"), b"sqlite bytes").unwrap();
    let outdir = TempDir::new().unwrap();

    acquire_cmd()
        .arg("--consent")
        .arg("--input")
        .arg(source.path())
        .arg("--outdir")
        .arg(outdir.path())
        .arg("--case-id")
        .arg("CASE-1")
        .arg("--collector")
        .arg("Tester")
        .assert()
        .success();

    let workspace = fs::read_dir(outdir.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    assert!(predicate::path::is_file().eval(&workspace.join("manifest.json")));
    assert!(predicate::path::is_file().eval(&workspace.join("chain_of_custody.json")));
    assert!(predicate::path::is_file().eval(&workspace.join("summary.json")));
}

#[test]
fn verify_detects_tampering_with_exit_6() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("chat.db"), b"sqlite bytes").unwrap();
    let outdir = TempDir::new().unwrap();

    acquire_cmd()
        .arg("--consent")
        .arg("--input")
        .arg(source.path())
        .arg("--outdir")
        .arg(outdir.path())
        .assert()
        .success();

    let workspace = fs::read_dir(outdir.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();

    // clean workspace verifies
    acquire_cmd().arg("verify").arg(&workspace).assert().success();

    // tampered copy is caught
    fs::write(workspace.join("data/chat.db"), b"tampered").unwrap();
    acquire_cmd().arg("verify").arg(&workspace).assert().code(6);
}
