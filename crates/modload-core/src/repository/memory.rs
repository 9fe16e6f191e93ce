use std::path::{Path, PathBuf};

use semver::Version;

use super::PackageRepository;
use crate::types::Package;

/// In-memory repository.
///
/// Packages are returned in insertion order. Each package is considered
/// installed under `root/<id>.<version>`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    root: PathBuf,
    packages: Vec<Package>,
}

impl MemoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            packages: Vec::new(),
        }
    }

    /// Add a package.
    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// Add a package in place.
    pub fn add(&mut self, package: Package) {
        self.packages.push(package);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }
}

impl PackageRepository for MemoryRepository {
    fn find_packages_by_id(&self, id: &str) -> Vec<Package> {
        self.packages.iter().filter(|p| p.is(id)).cloned().collect()
    }

    fn find_package(&self, id: &str, version: &Version) -> Option<Package> {
        self.packages
            .iter()
            .find(|p| p.is(id) && &p.version == version)
            .cloned()
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        self.root.join(format!("{}.{}", package.id, package.version))
    }
}
