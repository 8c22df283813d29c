use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str, mtime: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime))
        .unwrap();
}

/// Scratch lower/upper pair with one newer, one only-in-upper and one
/// conflicting entry
fn trees() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let lower = tmp.path().join("lower");
    let upper = tmp.path().join("upper");
    write_file(&lower.join("x.txt"), "0123456789", 1_000);
    write_file(&upper.join("x.txt"), "0123456789AB", 1_001);
    write_file(&upper.join("fresh"), "fresh", 1_000);
    write_file(&lower.join("clash/inner"), "inner", 1_000);
    write_file(&upper.join("clash"), "clash", 1_000);
    tmp
}

fn mergetree() -> Command {
    let mut cmd = Command::cargo_bin("mergetree").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_output() {
    mergetree()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge two directory trees into one"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--remove"))
        .stdout(predicate::str::contains("--strict"))
        .stdout(predicate::str::contains("--backup"))
        .stdout(predicate::str::contains("--summary"));
}

#[test]
fn test_version_output() {
    mergetree()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_missing_arguments() {
    mergetree()
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOWER"));
}

#[test]
fn test_nonexistent_lower_tree() {
    let tmp = trees();

    mergetree()
        .args(["--no-config"])
        .arg(tmp.path().join("missing"))
        .arg(tmp.path().join("upper"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list lower tree"));
}

#[test]
fn test_file_as_upper_tree() {
    let tmp = trees();

    mergetree()
        .arg("--no-config")
        .arg(tmp.path().join("lower"))
        .arg(tmp.path().join("upper/fresh"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_merge() {
    let tmp = trees();
    let lower = tmp.path().join("lower");
    let upper = tmp.path().join("upper");

    mergetree()
        .arg("--no-config")
        .arg(&lower)
        .arg(&upper)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(lower.join("x.txt")).unwrap(), "0123456789AB");
    assert_eq!(fs::read_to_string(lower.join("fresh")).unwrap(), "fresh");
    assert_eq!(fs::read_to_string(lower.join("clash###")).unwrap(), "clash");
    assert!(lower.join("clash/inner").exists());
    assert_eq!(fs::read_dir(&upper).unwrap().count(), 0);
}

#[test]
fn test_dry_run_prints_commands() {
    let tmp = trees();
    let lower = tmp.path().join("lower");
    let upper = tmp.path().join("upper");

    mergetree()
        .args(["--no-config", "-N"])
        .arg(&lower)
        .arg(&upper)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "rm {}",
            lower.join("x.txt").display()
        )))
        .stdout(predicate::str::contains(format!(
            "mv {} {}",
            upper.join("fresh").display(),
            lower.join("fresh").display()
        )));

    assert_eq!(fs::read_to_string(lower.join("x.txt")).unwrap(), "0123456789");
    assert!(upper.join("fresh").exists());
    assert!(!lower.join("fresh").exists());
}

#[test]
fn test_verbose_trace() {
    let tmp = trees();

    mergetree()
        .args(["--no-config", "--dry-run", "--verbose"])
        .arg(tmp.path().join("lower"))
        .arg(tmp.path().join("upper"))
        .assert()
        .success()
        .stderr(predicate::str::contains("/** /clash"))
        .stderr(predicate::str::contains("<<< /fresh"))
        .stderr(predicate::str::contains("!!< /x.txt"));
}

#[test]
fn test_summary_on_stderr() {
    let tmp = trees();

    mergetree()
        .args(["--no-config", "-N", "-S"])
        .arg(tmp.path().join("lower"))
        .arg(tmp.path().join("upper"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing Summary").not())
        .stderr(predicate::str::contains("Processing Summary:"))
        .stderr(predicate::str::contains(" Moved: 3"))
        .stderr(predicate::str::contains(" Removed files: 1"))
        .stderr(predicate::str::contains(" Newer files: 1"))
        .stderr(predicate::str::contains(" Backed-up files: 1"));
}

#[test]
fn test_backup_suffix() {
    let tmp = trees();
    let lower = tmp.path().join("lower");

    mergetree()
        .args(["--no-config", "--backup", ".bak"])
        .arg(&lower)
        .arg(tmp.path().join("upper"))
        .assert()
        .success();

    assert_eq!(fs::read_to_string(lower.join("clash.bak")).unwrap(), "clash");
}

#[test]
fn test_invalid_backup_suffix() {
    let tmp = trees();

    mergetree()
        .args(["--no-config", "--backup", ""])
        .arg(tmp.path().join("lower"))
        .arg(tmp.path().join("upper"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn test_config_file() {
    let tmp = trees();
    let config = tmp.path().join("mergetree.toml");
    fs::write(&config, "backup_suffix = \".orig\"\ndry_run = true\n").unwrap();

    mergetree()
        .arg("--config")
        .arg(&config)
        .arg(tmp.path().join("lower"))
        .arg(tmp.path().join("upper"))
        .assert()
        .success()
        .stdout(predicate::str::contains("clash.orig"));

    assert!(tmp.path().join("upper/clash").exists());
}

#[test]
fn test_invalid_config_file() {
    let tmp = trees();
    let config = tmp.path().join("mergetree.toml");
    fs::write(&config, "no_such_key = true\n").unwrap();

    mergetree()
        .arg("--config")
        .arg(&config)
        .arg(tmp.path().join("lower"))
        .arg(tmp.path().join("upper"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_config_conflicts_with_no_config() {
    mergetree()
        .args(["--config", "x.toml", "--no-config", "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_dump() {
    let tmp = trees();

    mergetree()
        .args(["--no-config", "--dry-run", "--dump"])
        .arg(tmp.path().join("lower"))
        .arg(tmp.path().join("upper"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Lower Tree:\nclash/\n inner\nx.txt\n"))
        .stdout(predicate::str::contains("Upper Tree:\nclash\nfresh\nx.txt\n"));
}

#[test]
fn test_progress() {
    let tmp = trees();

    mergetree()
        .args(["--no-config", "--dry-run", "--progress"])
        .arg(tmp.path().join("lower"))
        .arg(tmp.path().join("upper"))
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "Listing files:{}: 3\n",
            tmp.path().join("upper").display()
        )));
}

#[test]
fn test_remove_upper_directories() {
    let tmp = trees();
    let lower = tmp.path().join("lower");
    let upper = tmp.path().join("upper");
    write_file(&lower.join("d/a"), "a", 1_000);
    write_file(&upper.join("d/b"), "b", 1_000);

    mergetree()
        .args(["--no-config", "-R"])
        .arg(&lower)
        .arg(&upper)
        .assert()
        .success();

    assert!(lower.join("d/b").exists());
    assert!(!upper.join("d").exists());
}
