//! CLI tests for dependency listing.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn install(root: &Path, dir: &str, manifest: &str) {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("package.yaml"), manifest).unwrap();
}

fn packages() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    install(
        temp_dir.path(),
        "Foo.1.0.0",
        "id: Foo\nversion: 1.0.0\ndependency_sets:\n  - profile: net45\n    dependencies:\n      - id: Bar\n        version: \">=1.0, <=2.0\"\n      - id: Baz\n        version: \">=3.0\"\n",
    );
    install(temp_dir.path(), "Bar.1.5.0", "id: Bar\nversion: 1.5.0\n");
    install(temp_dir.path(), "Baz.2.0.0", "id: Baz\nversion: 2.0.0\n");
    temp_dir
}

fn modload(packages: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("modload").unwrap();
    cmd.env_remove("MODLOAD_PROFILE")
        .env_remove("MODLOAD_MODULE_EXT")
        .arg("--packages")
        .arg(packages.path());
    cmd
}

#[test]
fn test_deps_text() {
    let packages = packages();
    modload(&packages)
        .args(["deps", "Foo", "--profile", "net45"])
        .assert()
        .success()
        .stdout("Bar 1.5.0\n");
}

#[test]
fn test_deps_json() {
    let packages = packages();
    modload(&packages)
        .args(["deps", "Foo", "--profile", "net45", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Bar\""))
        .stdout(predicate::str::contains("\"version\": \"1.5.0\""))
        .stdout(predicate::str::contains("Baz").not());
}

#[test]
fn test_deps_unknown_package() {
    let packages = packages();
    modload(&packages)
        .args(["deps", "Nope", "--profile", "net45"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package not found: Nope"));
}

#[test]
fn test_deps_requires_profile() {
    let packages = packages();
    modload(&packages)
        .args(["deps", "Foo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no runtime profile configured"));
}

#[test]
fn test_closure() {
    let packages = packages();
    modload(&packages)
        .args(["closure", "Foo@1.0.0", "--profile", "net45"])
        .assert()
        .success()
        .stdout("Foo 1.0.0\nBar 1.5.0\n");
}

#[test]
fn test_closure_json_skips_version_above_range() {
    let packages = packages();
    install(packages.path(), "Bar.2.0.5", "id: Bar\nversion: 2.0.5\n");
    modload(&packages)
        .args(["--profile", "net45", "--json", "closure", "Foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\": \"1.5.0\""))
        .stdout(predicate::str::contains("2.0.5").not());
}

#[test]
fn test_paths_without_modules() {
    let packages = packages();
    modload(&packages)
        .args(["paths", "Foo", "Bar", "--profile", "net45"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_paths_malformed_module() {
    let packages = packages();
    let lib = packages.path().join("Foo.1.0.0/lib/net45");
    fs::create_dir_all(&lib).unwrap();
    fs::write(lib.join("Foo.mod"), "not a library").unwrap();

    modload(&packages)
        .args(["paths", "Foo", "--profile", "net45", "--ext", "mod"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("malformed module"));
}
