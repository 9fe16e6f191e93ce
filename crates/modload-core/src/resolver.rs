//! Dependency resolution.
//!
//! Finds the candidate package for a (name, optional version) request and
//! expands the dependency sets that apply to a runtime profile into concrete
//! (name, version) pairs.
//!
//! This is best-effort: a dependency nobody can satisfy is skipped, not
//! reported. There is no conflict resolution beyond picking the first
//! acceptable version the repository lists.

use semver::Version;
use tracing::debug;

use crate::matcher::select_compatible;
use crate::profile::Profile;
use crate::repository::PackageRepository;
use crate::types::{Dependency, DependencySet, Package, PackageDependency};

/// Resolver over a package repository.
pub struct Resolver<'r, R: ?Sized> {
    repository: &'r R,
}

impl<'r, R: PackageRepository + ?Sized> Resolver<'r, R> {
    pub fn new(repository: &'r R) -> Self {
        Self { repository }
    }

    /// Find the package a request refers to.
    ///
    /// Without a version this is the first package the repository lists for
    /// `name`. With a version it is the exact match.
    pub fn find_candidate(&self, name: &str, version: Option<&Version>) -> Option<Package> {
        match version {
            None => self.repository.find_packages_by_id(name).into_iter().next(),
            Some(version) => self.repository.find_package(name, version),
        }
    }

    /// Direct dependencies of a package for a runtime profile.
    ///
    /// Returns `None` when the package itself cannot be found. An empty
    /// iterator means the package was found but nothing applies.
    pub fn dependencies(
        &self,
        name: &str,
        version: Option<&Version>,
        profile: &Profile,
    ) -> Option<Dependencies<'r, R>> {
        let package = self.find_candidate(name, version)?;
        Some(Dependencies::new(self.repository, &package, profile))
    }
}

/// Lazy, single-pass expansion of a package's dependency sets.
///
/// Each declared dependency is looked up in the repository only when the
/// iterator reaches it. Sets are visited in declaration order, then
/// dependencies within a set.
pub struct Dependencies<'r, R: ?Sized> {
    repository: &'r R,
    sets: std::vec::IntoIter<DependencySet>,
    current: std::vec::IntoIter<PackageDependency>,
}

impl<'r, R: PackageRepository + ?Sized> Dependencies<'r, R> {
    fn new(repository: &'r R, package: &Package, profile: &Profile) -> Self {
        let sets: Vec<DependencySet> = select_compatible(profile, &package.dependency_sets)
            .unwrap_or_default()
            .into_iter()
            .cloned()
            .collect();

        if sets.is_empty() {
            debug!(package = %package, profile = %profile, "no dependency set applies");
        }

        Self {
            repository,
            sets: sets.into_iter(),
            current: Vec::new().into_iter(),
        }
    }

    fn satisfy(&self, dependency: &PackageDependency) -> Option<Dependency> {
        let found = self
            .repository
            .find_packages_by_id(&dependency.id)
            .into_iter()
            .find(|p| dependency.version.matches(&p.version));

        match found {
            Some(package) => Some(Dependency::new(package.id, package.version)),
            None => {
                debug!(
                    id = %dependency.id,
                    requirement = %dependency.version,
                    "no installed version satisfies dependency, skipping"
                );
                None
            }
        }
    }
}

impl<R: PackageRepository + ?Sized> Iterator for Dependencies<'_, R> {
    type Item = Dependency;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(dependency) = self.current.next() {
                if let Some(resolved) = self.satisfy(&dependency) {
                    return Some(resolved);
                }
                continue;
            }

            let set = self.sets.next()?;
            self.current = set.dependencies.into_iter();
        }
    }
}
