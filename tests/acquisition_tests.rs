//! End-to-end tests of the acquisition pipeline against real directory
//! trees.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use rust_acquire::acquisition::{run_acquisition, AcquisitionOptions};
use rust_acquire::models::{AcquisitionSummary, ArchiveInfo, ChainOfCustodyRecord, Manifest};
use rust_acquire::utils::hash::sha256_file;

/// Source tree from the reference scenario: a.txt (0 bytes), b.txt
/// (5 bytes), c/d.txt (10 bytes).
fn build_source_tree() -> TempDir {
    let source = TempDir::new().unwrap();
    fs::create_dir(source.path().join("c")).unwrap();
    fs::write(source.path().join("a.txt"), b"").unwrap();
    fs::write(source.path().join("b.txt"), b"12345").unwrap();
    fs::write(source.path().join("c/d.txt"), b"0123456789").unwrap();
    source
}

fn options(source: &Path, outdir: &Path, archive: bool) -> AcquisitionOptions {
    AcquisitionOptions {
        input: Some(source.to_path_buf()),
        device_package: None,
        outdir: outdir.to_path_buf(),
        case_id: "CASE-1".to_string(),
        collector: "Tester".to_string(),
        reason: "integration test".to_string(),
        archive,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: PathBuf) -> T {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn acquisition_produces_consistent_workspace() {
    let source = build_source_tree();
    let outdir = TempDir::new().unwrap();

    let outcome = run_acquisition(&options(source.path(), outdir.path(), false)).unwrap();
    let workspace = &outcome.workspace;

    // copied data tree mirrors the source
    for rel in ["data/a.txt", "data/b.txt", "data/c/d.txt"] {
        assert!(workspace.join(rel).is_file(), "{} missing", rel);
    }

    // manifest: 3 items, sizes 0/5/10, hashes re-verify against the copies
    let manifest: Manifest = read_json(workspace.join("manifest.json"));
    assert_eq!(manifest.items.len(), 3);
    let sizes: HashSet<u64> = manifest.items.iter().map(|i| i.size).collect();
    assert_eq!(sizes, HashSet::from([0, 5, 10]));
    for item in &manifest.items {
        assert_eq!(
            item.sha256,
            sha256_file(Path::new(&item.acquired_path)).unwrap(),
            "manifest hash does not match the copy for {}",
            item.rel_path
        );
    }

    // bijection: every file under data/ has exactly one manifest entry
    let mut on_disk = HashSet::new();
    collect_files(&workspace.join("data"), &workspace.join("data"), &mut on_disk);
    let in_manifest: HashSet<String> =
        manifest.items.iter().map(|i| i.rel_path.clone()).collect();
    assert_eq!(on_disk, in_manifest);

    // custody record carries the operator metadata
    let custody: ChainOfCustodyRecord = read_json(workspace.join("chain_of_custody.json"));
    assert_eq!(custody.case_id, "CASE-1");
    assert_eq!(custody.collector, "Tester");
    assert_eq!(custody.workspace, workspace.display().to_string());

    // summary is the fold of the manifest
    let summary: AcquisitionSummary = read_json(workspace.join("summary.json"));
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.total_bytes, 15);
    assert_eq!(summary.failed_files, 0);
}

fn collect_files(root: &Path, dir: &Path, out: &mut HashSet<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            out.insert(
                path.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/"),
            );
        }
    }
}

#[test]
fn archive_hash_matches_and_manifest_round_trips() {
    let source = build_source_tree();
    let outdir = TempDir::new().unwrap();

    let outcome = run_acquisition(&options(source.path(), outdir.path(), true)).unwrap();
    let workspace = &outcome.workspace;

    let info: ArchiveInfo = read_json(workspace.join("archive_info.json"));
    let archive_path = Path::new(&info.archive);
    assert!(archive_path.is_file());

    // independently recomputed hash equals the recorded one
    assert_eq!(sha256_file(archive_path).unwrap(), info.archive_sha256);

    // the archived manifest is byte-identical to the one in the workspace
    let direct = fs::read(workspace.join("manifest.json")).unwrap();
    let mut archive = zip::ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    let mut extracted = Vec::new();
    archive
        .by_name("manifest.json")
        .unwrap()
        .read_to_end(&mut extracted)
        .unwrap();
    assert_eq!(extracted, direct);

    // the archive records itself in a side file, never in the manifest
    let manifest: Manifest = read_json(workspace.join("manifest.json"));
    assert!(manifest
        .items
        .iter()
        .all(|i| !i.rel_path.ends_with(".zip")));
}

#[test]
fn two_runs_against_one_source_are_content_stable() {
    let source = build_source_tree();
    let outdir_a = TempDir::new().unwrap();
    let outdir_b = TempDir::new().unwrap();

    let a = run_acquisition(&options(source.path(), outdir_a.path(), false)).unwrap();
    let b = run_acquisition(&options(source.path(), outdir_b.path(), false)).unwrap();

    let manifest_a: Manifest = read_json(a.workspace.join("manifest.json"));
    let manifest_b: Manifest = read_json(b.workspace.join("manifest.json"));

    let mut pairs_a: Vec<_> = manifest_a
        .items
        .iter()
        .map(|i| (i.rel_path.clone(), i.sha256.clone()))
        .collect();
    let mut pairs_b: Vec<_> = manifest_b
        .items
        .iter()
        .map(|i| (i.rel_path.clone(), i.sha256.clone()))
        .collect();
    pairs_a.sort();
    pairs_b.sort();
    assert_eq!(pairs_a, pairs_b);
    assert_ne!(a.workspace, b.workspace);
}
