//! Local package folder.
//!
//! # Layout
//!
//! ```text
//! {packages_dir}/
//!   Foo.1.0.0/
//!     package.yaml       # Package manifest
//!     lib/net45/Foo.dll  # Profile-specific modules
//!   Bar.1.5.0/
//!     package.yaml
//! ```
//!
//! Directory names are not interpreted; id and version come from the manifest.

use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use tracing::{debug, info};

use super::PackageRepository;
use crate::error::{LoadError, LoadResult};
use crate::types::Package;

/// Manifest file name inside each package directory.
pub const MANIFEST_NAME: &str = "package.yaml";

#[derive(Debug, Clone)]
struct Installed {
    package: Package,
    dir: PathBuf,
}

/// Repository over a folder of installed packages.
///
/// The folder is scanned once on [`LocalRepository::open`]. Versions of the
/// same id are listed newest first.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
    installed: Vec<Installed>,
}

impl LocalRepository {
    /// Scan a packages folder.
    ///
    /// A missing folder yields an empty repository. A manifest that cannot be
    /// read or parsed is an error.
    pub fn open(root: impl Into<PathBuf>) -> LoadResult<Self> {
        let root = root.into();

        if !root.is_dir() {
            debug!(root = %root.display(), "packages folder does not exist");
            return Ok(Self {
                root,
                installed: Vec::new(),
            });
        }

        let mut installed = Vec::new();
        let entries = fs::read_dir(&root).map_err(|e| LoadError::io(&root, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| LoadError::io(&root, e))?;
            let dir = entry.path();
            let manifest = dir.join(MANIFEST_NAME);
            if !manifest.is_file() {
                continue;
            }

            let package = read_manifest(&manifest)?;
            debug!(package = %package, dir = %dir.display(), "found package");
            installed.push(Installed { package, dir });
        }

        installed.sort_by(|a, b| {
            a.package
                .id
                .to_lowercase()
                .cmp(&b.package.id.to_lowercase())
                .then_with(|| b.package.version.cmp(&a.package.version))
        });

        info!(root = %root.display(), packages = installed.len(), "opened package folder");

        Ok(Self { root, installed })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All installed packages.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.installed.iter().map(|i| &i.package)
    }
}

fn read_manifest(path: &Path) -> LoadResult<Package> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    serde_yaml::from_str(&content).map_err(|e| LoadError::Manifest {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl PackageRepository for LocalRepository {
    fn find_packages_by_id(&self, id: &str) -> Vec<Package> {
        self.installed
            .iter()
            .filter(|i| i.package.is(id))
            .map(|i| i.package.clone())
            .collect()
    }

    fn find_package(&self, id: &str, version: &Version) -> Option<Package> {
        self.installed
            .iter()
            .find(|i| i.package.is(id) && &i.package.version == version)
            .map(|i| i.package.clone())
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        self.installed
            .iter()
            .find(|i| i.package.is(&package.id) && i.package.version == package.version)
            .map(|i| i.dir.clone())
            .unwrap_or_else(|| {
                self.root
                    .join(format!("{}.{}", package.id, package.version))
            })
    }
}
