//! Command-Line Tests
//!
//! Runs the `cytobands` binary end to end against small band, centromere,
//! and source files written to temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn cytobands() -> Command {
    Command::cargo_bin("cytobands").expect("binary should build")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

fn source_json(name: &str, organisms: &serde_json::Value) -> String {
    serde_json::json!({ "name": name, "organisms": organisms }).to_string()
}

fn assembly(accession: &str, db: &str, bands: &serde_json::Value) -> serde_json::Value {
    serde_json::json!([{ "genbank_accession": accession, "db": db, "bands": bands }])
}

#[test]
fn test_apply_merger_prints_collapsed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let bands = write(
        dir.path(),
        "bands.tsv",
        "1\tb1\t1\t100\t1\t100\tgneg\n1\tb2\t150\t300\t150\t300\tgneg\n",
    );
    let centromeres = write(dir.path(), "cen.tsv", "chrom\tstart\tstop\n1\t110\t140\n");

    cytobands()
        .arg("apply")
        .arg(&bands)
        .args(["--strategy", "merger", "--centromeres"])
        .arg(&centromeres)
        .assert()
        .success()
        .stdout(
            "1 p b1 1 109 1 109 gneg\n\
             1 p pcen 110 124 110 124 acen\n\
             1 q qcen 125 140 125 140 acen\n\
             1 q b2 141 300 141 300 gneg\n",
        );
}

#[test]
fn test_apply_uses_organism_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let bands = write(dir.path(), "fly.tsv", "2L\t21A1\t50\t100\t50\t100\tgneg\n");

    cytobands()
        .arg("apply")
        .arg(&bands)
        .args(["--organism", "drosophila-melanogaster"])
        .assert()
        .success()
        .stdout("2L q pter 1 49 1 49 gpos\n2L q 21A1 50 100 50 100 gneg\n");
}

#[test]
fn test_apply_merger_without_centromeres_fails() {
    let dir = tempfile::tempdir().unwrap();
    let bands = write(dir.path(), "bands.tsv", "1\tb1\t1\t100\t1\t100\tgneg\n");

    cytobands()
        .arg("apply")
        .arg(&bands)
        .args(["--organism", "zea-mays"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --centromeres"));
}

#[test]
fn test_apply_rejects_malformed_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let bands = write(dir.path(), "bands.tsv", "1\tb1\t1\t100\t1\t100\tgneg\n1\tb2\t300\t150\t1\t100\tgneg\n");

    cytobands()
        .arg("apply")
        .arg(&bands)
        .assert()
        .failure()
        .stderr(predicate::str::contains("stop 150 is before start 300"));
}

#[test]
fn test_apply_tsv_output() {
    let dir = tempfile::tempdir().unwrap();
    let bands = write(
        dir.path(),
        "rice.tsv",
        "1\tp1\t1\t10\t1\t10\tgneg\n1\tcen\t11\t20\t11\t20\tacen\n",
    );

    cytobands()
        .args(["--format", "tsv", "apply"])
        .arg(&bands)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "chrom\tarm\tname\tbp_start\tbp_stop\tiscn_start\tiscn_stop\tstain\n",
        ))
        .stdout(predicate::str::contains("1\tp\tp1\t1\t10\t1\t10\tgneg"))
        .stdout(predicate::str::contains("1\tq\tcen\t11\t20\t11\t20\tacen"));
}

#[test]
fn test_strategies_json() {
    let output = cytobands()
        .args(["strategies", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let table: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(table["default"], "parser");
    assert_eq!(table["organisms"]["zea-mays"], "merger");
    assert_eq!(table["organisms"]["drosophila-melanogaster"], "patcher");
}

#[test]
fn test_reconcile_writes_band_files_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let ensembl = write(
        dir.path(),
        "ensembl.json",
        &source_json(
            "ensembl",
            &serde_json::json!({
                "zea-mays": assembly("GCA_000005005.6", "zea_mays_core", &serde_json::json!({
                    "1": [["b1", "1", "100", "1", "100", "gneg"], ["b2", "150", "300", "150", "300", "gneg"]]
                })),
                "oryza-sativa": assembly("GCA_001433935.1", "oryza_sativa_core", &serde_json::json!({
                    "1": [["p1", "1", "10", "1", "10", "gneg"], ["cen", "11", "20", "11", "20", "acen"]]
                })),
                "broken-organism": assembly("GCA_9", "broken", &serde_json::json!({
                    "1": [["p1", "1", "ten", "1", "10", "gneg"]]
                })),
            }),
        ),
    );
    let ucsc = write(
        dir.path(),
        "ucsc.json",
        &source_json(
            "ucsc",
            &serde_json::json!({
                "oryza-sativa": assembly("GCA_999", "ignored", &serde_json::json!({
                    "1": [["x", "1", "10", "1", "10", "gneg"]]
                })),
            }),
        ),
    );
    let centromeres = write(dir.path(), "maize_cen.tsv", "1\t110\t140\n");
    let output_dir = dir.path().join("out");

    cytobands()
        .args(["--format", "tsv", "reconcile", "-s"])
        .arg(&ensembl)
        .arg("-s")
        .arg(&ucsc)
        .arg("--centromeres")
        .arg(format!("zea-mays={}", centromeres.display()))
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("zea-mays\twritten\tmerger"))
        .stdout(predicate::str::contains("oryza-sativa\twritten\tparser\tensembl"))
        .stdout(predicate::str::contains("broken-organism\tskipped"));

    let maize = fs::read_to_string(output_dir.join("zea-mays.js")).unwrap();
    assert_eq!(
        maize,
        r#"window.chrBands = ["1 p b1 1 109 1 109 gneg","1 p pcen 110 124 110 124 acen","1 q qcen 125 140 125 140 acen","1 q b2 141 300 141 300 gneg"]"#
    );

    let rice = fs::read_to_string(output_dir.join("oryza-sativa.js")).unwrap();
    assert!(rice.contains("1 p p1 1 10 1 10 gneg"));
    assert!(!output_dir.join("broken-organism.js").exists());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(
        manifest["organisms"]["oryza-sativa"],
        serde_json::json!(["GCA_001433935.1", "oryza_sativa_core"])
    );
    assert!(manifest["created_at"].is_string());
}

#[test]
fn test_reconcile_fails_when_nothing_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(
        dir.path(),
        "ensembl.json",
        &source_json(
            "ensembl",
            &serde_json::json!({
                "zea-mays": assembly("GCA_1", "maize", &serde_json::json!({
                    "1": [["b1", "1", "100", "1", "100", "gneg"]]
                })),
            }),
        ),
    );

    cytobands()
        .arg("reconcile")
        .arg("-s")
        .arg(&source)
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No organism could be reconciled"));
}

#[test]
fn test_reconcile_rejects_bad_centromere_argument() {
    cytobands()
        .args(["reconcile", "-s", "source.json", "--centromeres", "zea-mays"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected ORGANISM=PATH"));
}
