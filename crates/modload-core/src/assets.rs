//! Module file discovery.
//!
//! A package's modules for a profile come from one of two places:
//!
//! 1. `{install}/lib/{short-profile}/` when that directory exists. Every file
//!    with the module extension is taken, without looking at the manifest.
//!    An existing but empty directory yields nothing and does not fall back.
//! 2. Otherwise the manifest's per-file `modules` declarations, filtered
//!    through the profile matcher.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::matcher::select_compatible;
use crate::profile::Profile;
use crate::repository::PackageRepository;
use crate::types::Package;

/// Directory under the install path holding profile-specific modules.
///
/// Profile directories are looked up by the canonical, lower-case short name
/// (`lib/net45`). On case-sensitive filesystems a directory spelled any other
/// way, such as `lib/Net45`, is not found and the manifest declarations are
/// used instead.
pub const LIB_DIR: &str = "lib";

/// Absolute paths of the module files `package` provides for `profile`.
///
/// Directory listings are sorted by path so results are stable across
/// filesystems. Declared entries keep manifest order.
pub fn module_files<R: PackageRepository + ?Sized>(
    repository: &R,
    package: &Package,
    profile: &Profile,
    extension: &str,
) -> LoadResult<Vec<PathBuf>> {
    let install = repository.install_path(package);
    let directory = install.join(LIB_DIR).join(profile.short_name());

    if directory.is_dir() {
        let files = list_modules(&directory, extension)?;
        debug!(
            package = %package,
            directory = %directory.display(),
            count = files.len(),
            "using profile directory"
        );
        return Ok(files);
    }

    let files: Vec<PathBuf> = select_compatible(profile, &package.modules)
        .unwrap_or_default()
        .into_iter()
        .map(|entry| install.join(&entry.path))
        .collect();

    debug!(package = %package, count = files.len(), "using declared modules");
    Ok(files)
}

fn list_modules(directory: &Path, extension: &str) -> LoadResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(directory).map_err(|e| LoadError::io(directory, e))? {
        let path = entry.map_err(|e| LoadError::io(directory, e))?.path();
        if path.is_file() && has_extension(&path, extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}
