//! Command line behaviour of the `olca_packager` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn packager() -> Command {
    let mut cmd = Command::cargo_bin("olca_packager").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_the_options() {
    packager()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--archiver"))
        .stdout(predicate::str::contains("--keep-staging"));
}

#[test]
fn missing_bundles_fail_each_platform() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("build.properties"), "openlca_version_id=2.1.0\n").unwrap();

    packager()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("═══ Linux ═══"))
        .stdout(predicate::str::contains("═══ macOS ═══"))
        .stderr(predicate::str::contains("ERROR: Linux: could not find Linux package"))
        .stderr(predicate::str::contains("ERROR: macOS: could not find macOS package"));

    assert!(dir.path().join("packages").is_dir());
}

#[test]
fn missing_properties_file_aborts() {
    let dir = tempfile::tempdir().unwrap();

    packager()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("build.properties"));
}

#[test]
fn invalid_arguments_exit_with_two() {
    let dir = tempfile::tempdir().unwrap();

    packager()
        .args(["--platform", "windows"])
        .assert()
        .code(2);

    packager()
        .arg("--root")
        .arg(dir.path())
        .args(["--platform", "linux", "--platform", "linux"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("more than once"));

    packager()
        .arg("--root")
        .arg(dir.path())
        .args(["--verbose", "--quiet"])
        .assert()
        .code(2);
}

#[test]
fn broken_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("packager.toml"), "archiver = \"rar\"\n").unwrap();

    packager()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("packager.toml"));
}
