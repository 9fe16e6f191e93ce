//! End-to-end scenarios over a local packages folder.
//!
//! Packages are laid out on disk with `package.yaml` manifests and text
//! module files read by a fake host.

mod common;

use std::fs;
use std::sync::Arc;

use common::{install, write_module, TextHost};
use modload_core::{
    resolve_closure, Dependency, FileReference, LoadError, LoadOptions, LoaderConfig,
    LocalRepository, PackageLoader, Profile, Version,
};
use tempfile::TempDir;

const FOO: &str = r#"
id: Foo
version: 1.0.0
dependency_sets:
  - profile: net45
    dependencies:
      - id: Bar
        version: ">=1.0, <=2.0"
      - id: Baz
        version: ">=3.0"
"#;

const BAR: &str = r#"
id: Bar
version: 1.5.0
modules:
  - path: lib/net40/Bar.dll
    profiles: [net40]
  - path: lib/native/bar_native.dll
    profiles: [native]
"#;

const BAZ: &str = "id: Baz\nversion: 2.0.0\n";

fn p() -> Profile {
    Profile::parse("net45").unwrap()
}

fn fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let foo = install(root, "Foo.1.0.0", FOO);
    write_module(&foo.join("lib/net45/Foo.dll"), "Foo");

    let bar = install(root, "Bar.1.5.0", BAR);
    write_module(&bar.join("lib/net40/Bar.dll"), "Bar");

    install(root, "Baz.2.0.0", BAZ);
    temp_dir
}

fn open(temp_dir: &TempDir) -> PackageLoader<LocalRepository, TextHost> {
    let config = LoaderConfig::default()
        .with_packages_dir(temp_dir.path())
        .with_module_extension("dll");
    PackageLoader::open(&config, TextHost).unwrap()
}

#[test]
fn test_dependencies_respect_constraints() {
    let temp_dir = fixture();
    let loader = open(&temp_dir);

    let deps: Vec<_> = loader.dependencies("Foo", None, &p()).unwrap().collect();

    // Baz >=3.0 is unsatisfiable and silently omitted.
    assert_eq!(deps, vec![Dependency::new("Bar", Version::new(1, 5, 0))]);
}

#[test]
fn test_dependencies_of_missing_package() {
    let temp_dir = fixture();
    let loader = open(&temp_dir);

    assert!(loader.dependencies("Missing", None, &p()).is_none());
    assert!(loader
        .dependencies("Foo", Some(&Version::new(9, 9, 9)), &p())
        .is_none());
}

#[test]
fn test_initialize_load_and_reference() {
    let temp_dir = fixture();
    let mut loader = open(&temp_dir);

    loader
        .initialize(&[Dependency::new("Foo", Version::new(1, 0, 0))], &p())
        .unwrap();

    let module = loader
        .load(&LoadOptions::new("Foo"))
        .unwrap()
        .expect("Foo should load");
    let expected = temp_dir.path().join("Foo.1.0.0/lib/net45/Foo.dll");

    assert_eq!(module.name, "Foo");
    assert_eq!(module.path, expected);
    assert_eq!(
        loader.resolve_reference("Foo"),
        Some(FileReference::new(&expected))
    );
}

#[test]
fn test_cached_load_survives_file_removal() {
    let temp_dir = fixture();
    let mut loader = open(&temp_dir);
    loader.initialize(&[Dependency::any("Foo")], &p()).unwrap();

    let first = loader.load(&LoadOptions::new("Foo")).unwrap().unwrap();
    fs::remove_file(temp_dir.path().join("Foo.1.0.0/lib/net45/Foo.dll")).unwrap();
    let second = loader.load(&LoadOptions::new("Foo")).unwrap().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_unknown_names_miss() {
    let temp_dir = fixture();
    let mut loader = open(&temp_dir);
    loader.initialize(&[Dependency::any("Foo")], &p()).unwrap();

    assert!(loader.load(&LoadOptions::new("Nope")).unwrap().is_none());
    assert!(loader.resolve_reference("Nope").is_none());
}

#[test]
fn test_declared_modules_when_no_profile_directory() {
    let temp_dir = fixture();
    let mut loader = open(&temp_dir);

    loader.initialize(&[Dependency::any("Bar")], &p()).unwrap();

    let expected = temp_dir.path().join("Bar.1.5.0/lib/net40/Bar.dll");
    assert_eq!(loader.module_path("bar"), Some(expected.as_path()));
}

#[test]
fn test_profile_directory_wins_even_when_empty() {
    let temp_dir = fixture();
    fs::create_dir_all(temp_dir.path().join("Bar.1.5.0/lib/net45")).unwrap();
    let mut loader = open(&temp_dir);

    let bar = loader.find_candidate("Bar", None).unwrap();
    assert!(loader.module_files(&bar, &p()).unwrap().is_empty());

    loader.initialize(&[Dependency::any("Bar")], &p()).unwrap();
    assert!(loader.module_path("Bar").is_none());
}

#[test]
fn test_closure_then_initialize() {
    let temp_dir = fixture();
    let mut loader = open(&temp_dir);

    let closure = resolve_closure(&loader, &[Dependency::any("Foo")], &p());
    assert_eq!(
        closure,
        vec![
            Dependency::any("Foo"),
            Dependency::new("Bar", Version::new(1, 5, 0)),
        ]
    );

    loader.initialize(&closure, &p()).unwrap();
    assert!(loader.module_path("Foo").is_some());
    assert!(loader.module_path("Bar").is_some());
}

#[test]
fn test_malformed_module_aborts_initialize() {
    let temp_dir = fixture();
    fs::write(temp_dir.path().join("Foo.1.0.0/lib/net45/Foo.dll"), "\n").unwrap();
    let mut loader = open(&temp_dir);

    let result = loader.initialize(&[Dependency::any("Foo")], &p());

    assert!(matches!(result, Err(LoadError::MalformedModule { .. })));
}

#[test]
fn test_newer_patch_above_upper_bound_is_not_picked() {
    let temp_dir = fixture();
    install(temp_dir.path(), "Bar.2.0.5", "id: Bar\nversion: 2.0.5\n");
    let loader = open(&temp_dir);

    assert_eq!(
        loader.find_candidate("Bar", None).unwrap().version,
        Version::new(2, 0, 5)
    );

    let deps: Vec<_> = loader.dependencies("Foo", None, &p()).unwrap().collect();
    assert_eq!(deps, vec![Dependency::new("Bar", Version::new(1, 5, 0))]);
}

#[test]
fn test_prerelease_satisfies_lower_bound() {
    let temp_dir = TempDir::new().unwrap();
    install(temp_dir.path(), "Foo.1.0.0", FOO);
    install(temp_dir.path(), "Bar.1.6.0-beta", "id: Bar\nversion: 1.6.0-beta\n");
    let loader = open(&temp_dir);

    let deps: Vec<_> = loader.dependencies("Foo", None, &p()).unwrap().collect();
    assert_eq!(
        deps,
        vec![Dependency::new("Bar", Version::parse("1.6.0-beta").unwrap())]
    );
}

#[test]
fn test_profile_spelling_does_not_change_directory() {
    let temp_dir = fixture();
    let mut loader = open(&temp_dir);

    loader
        .initialize(&[Dependency::any("Foo")], &Profile::parse("net4.5").unwrap())
        .unwrap();

    let expected = temp_dir.path().join("Foo.1.0.0/lib/net45/Foo.dll");
    assert_eq!(loader.module_path("Foo"), Some(expected.as_path()));
}
