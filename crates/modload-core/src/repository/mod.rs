//! Package repositories.
//!
//! The loader only needs three queries from wherever packages live: all
//! versions of an id, one exact version, and the directory a package is
//! installed in. Ordering of [`PackageRepository::find_packages_by_id`] is the
//! repository's contract; the resolver takes the first acceptable entry.

mod local;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use semver::Version;

use crate::types::Package;

pub use local::{LocalRepository, MANIFEST_NAME};
pub use memory::MemoryRepository;

/// Read access to installed packages.
pub trait PackageRepository {
    /// All packages with this id (ASCII case-insensitive), in repository order.
    fn find_packages_by_id(&self, id: &str) -> Vec<Package>;

    /// The package with this id and exact version.
    fn find_package(&self, id: &str, version: &Version) -> Option<Package>;

    /// Directory the package is installed in.
    fn install_path(&self, package: &Package) -> PathBuf;
}

impl<T: PackageRepository + ?Sized> PackageRepository for &T {
    fn find_packages_by_id(&self, id: &str) -> Vec<Package> {
        (**self).find_packages_by_id(id)
    }

    fn find_package(&self, id: &str, version: &Version) -> Option<Package> {
        (**self).find_package(id, version)
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        (**self).install_path(package)
    }
}

impl<T: PackageRepository + ?Sized> PackageRepository for Arc<T> {
    fn find_packages_by_id(&self, id: &str) -> Vec<Package> {
        (**self).find_packages_by_id(id)
    }

    fn find_package(&self, id: &str, version: &Version) -> Option<Package> {
        (**self).find_package(id, version)
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        (**self).install_path(package)
    }
}
