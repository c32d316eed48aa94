use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MONTHS: [(&str, f64); 4] = [
    ("2024-01-31", 0.0),
    ("2024-02-29", -0.35),
    ("2024-03-28", 0.2),
    ("2024-04-30", -0.15),
];

fn quote_file(dir: &Path, name: &str, shift: f64) -> PathBuf {
    let mut content = String::from("maturity,price,coupon,yield\n");
    let coupons = [3.0, 3.25, 3.5, 3.75, 4.0];
    for (i, coupon) in coupons.iter().enumerate() {
        let years = i + 1;
        let price = 99.0 + shift + 0.1 * i as f64;
        let yld = coupon + 0.5 - shift / 2.0;
        content.push_str(&format!("{years},{price:.3},{coupon}%,{yld:.3}%\n"));
    }
    let path = dir.join(format!("{name}.csv"));
    std::fs::write(&path, content).unwrap();
    path
}

fn history() -> (TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().unwrap();
    let files = MONTHS
        .iter()
        .map(|(name, shift)| quote_file(dir.path(), name, *shift))
        .collect();
    (dir, files)
}

fn tenor() -> Command {
    let mut cmd = Command::cargo_bin("tenor").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("TENOR_CONFIG");
    cmd
}

#[test]
fn test_help() {
    tenor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("covariance"));
}

#[test]
fn test_spot_table() {
    let (_dir, files) = history();
    tenor()
        .arg("spot")
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::contains("Spot Curves"))
        .stdout(predicate::str::contains("1yr"))
        .stdout(predicate::str::contains("5yr"))
        .stdout(predicate::str::contains("2024-03-28"));
}

#[test]
fn test_spot_json() {
    let (_dir, files) = history();
    let output = tenor()
        .args(["--format", "json", "spot"])
        .args(&files)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "spot");
    assert_eq!(json["curves"].as_array().unwrap().len(), 4);
    assert_eq!(json["matrix"]["columns"][0], "1yr");
}

#[test]
fn test_spot_repricing() {
    let (_dir, files) = history();
    tenor()
        .args(["spot", "--repricing"])
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::contains("Repricing: 2024-01-31"))
        .stdout(predicate::str::contains("PASSED"));
}

#[test]
fn test_forward_labels() {
    let (_dir, files) = history();
    tenor()
        .args(["--format", "csv", "forward"])
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("observation,1yr-1yr,1yr-2yr,1yr-3yr,1yr-4yr"));
}

#[test]
fn test_yields() {
    let (_dir, files) = history();
    tenor()
        .arg("yields")
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quoted Yields"))
        .stdout(predicate::str::contains("3.5000%"));
}

#[test]
fn test_covariance() {
    let (_dir, files) = history();
    let output = tenor()
        .args(["--format", "json", "covariance", "--source", "yield"])
        .args(&files)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "yield");
    assert_eq!(json["covariance"].as_array().unwrap().len(), 5);
    assert_eq!(json["eigenvalues"].as_array().unwrap().len(), 5);
    assert_eq!(json["returns"]["rows"][0], "2024-02-29");
}

#[test]
fn test_covariance_table() {
    let (_dir, files) = history();
    tenor()
        .arg("covariance")
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::contains("Eigenvalues"))
        .stdout(predicate::str::contains("PC1"));
}

#[test]
fn test_skips_bad_observation() {
    let (dir, mut files) = history();
    let short = dir.path().join("2024-05-31.csv");
    std::fs::write(&short, "maturity,price,coupon\n1,99.0,3%\n").unwrap();
    files.push(short);

    tenor()
        .args(["--format", "csv", "spot"])
        .args(&files)
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped 2024-05-31"))
        .stdout(predicate::str::contains("2024-05-31").not());
}

#[test]
fn test_unreadable_file_does_not_abort() {
    let (dir, mut files) = history();
    files.push(dir.path().join("2024-06-28.csv"));

    tenor()
        .args(["--format", "csv", "spot"])
        .args(&files)
        .assert()
        .success()
        .stderr(predicate::str::contains("2024-06-28.csv"))
        .stdout(predicate::str::contains("2024-04-30"));
}

#[test]
fn test_no_usable_observations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2024-01-31.csv");
    std::fs::write(&path, "maturity,price,coupon\n1,abc,3%\n").unwrap();

    tenor()
        .arg("spot")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No usable observations"));
}

#[test]
fn test_config_rungs() {
    let (dir, files) = history();
    let config = dir.path().join("tenor.toml");
    std::fs::write(&config, "rungs = [1.0, 2.0, 3.0]\n").unwrap();

    tenor()
        .arg("--config")
        .arg(&config)
        .args(["--format", "csv", "spot"])
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("observation,1yr,2yr,3yr\n"));
}

#[test]
fn test_invalid_config() {
    let (dir, files) = history();
    let config = dir.path().join("tenor.toml");
    std::fs::write(&config, "rungs = [3.0, 1.0]\n").unwrap();

    tenor()
        .arg("--config")
        .arg(&config)
        .arg("spot")
        .args(&files)
        .assert()
        .failure();
}

#[test]
fn test_requires_files() {
    tenor().arg("spot").assert().failure();
}
