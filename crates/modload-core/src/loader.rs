//! Module loader and caches.
//!
//! [`PackageLoader`] ties the pieces together:
//!
//! 1. [`PackageLoader::initialize`] resolves a flat dependency list, finds the
//!    module files each package provides for a profile, and records
//!    name → path.
//! 2. [`PackageLoader::load`] brings a module into the process by name,
//!    memoizing the handle.
//! 3. [`PackageLoader::resolve_reference`] hands a compiler a reference to the
//!    module file registered for a name.
//!
//! # Concurrency
//!
//! All operations are blocking. `initialize` and `load` take `&mut self`; a
//! loader shared between threads must be wrapped in a lock by the caller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use semver::Version;
use tracing::{debug, info};

use crate::assets;
use crate::config::LoaderConfig;
use crate::error::LoadResult;
use crate::host::ModuleHost;
use crate::names::NameMap;
use crate::profile::Profile;
use crate::reference::{FileReferences, ReferenceFactory};
use crate::repository::{LocalRepository, PackageRepository};
use crate::resolver::{Dependencies, Resolver};
use crate::types::{Dependency, LoadOptions, Package};

/// Loads modules into the process by name.
pub trait ModuleLoader {
    type Module;

    /// Load the module registered for `options.module_name`.
    ///
    /// `Ok(None)` when no module is known by that name.
    fn load(&mut self, options: &LoadOptions) -> LoadResult<Option<Arc<Self::Module>>>;
}

/// Resolves module names to compiler references.
pub trait ReferenceResolver {
    type Reference;

    fn resolve_reference(&self, name: &str) -> Option<Self::Reference>;
}

/// Dependency graph queries for a build host.
pub trait DependencyGraph {
    /// Direct dependencies of a package for a profile, `None` if the package
    /// is unknown.
    fn dependencies<'a>(
        &'a self,
        name: &str,
        version: Option<&Version>,
        profile: &Profile,
    ) -> Option<Box<dyn Iterator<Item = Dependency> + 'a>>;

    /// Register the modules of an already flattened dependency list.
    fn initialize(&mut self, dependencies: &[Dependency], profile: &Profile) -> LoadResult<()>;
}

/// Loader lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// `initialize` has not been called; every lookup misses.
    Uninitialized,
    /// `initialize` has been called at least once.
    Initialized,
}

/// Package-backed module loader.
pub struct PackageLoader<R, H: ModuleHost, F = FileReferences> {
    repository: R,
    host: H,
    references: F,
    module_extension: String,
    paths: NameMap<PathBuf>,
    cache: NameMap<Arc<H::Module>>,
    state: LoaderState,
}

impl<R: PackageRepository, H: ModuleHost> PackageLoader<R, H> {
    /// Create a loader producing [`FileReference`](crate::FileReference)s.
    pub fn new(repository: R, host: H) -> Self {
        Self {
            repository,
            host,
            references: FileReferences,
            module_extension: std::env::consts::DLL_EXTENSION.to_string(),
            paths: NameMap::new(),
            cache: NameMap::new(),
            state: LoaderState::Uninitialized,
        }
    }
}

impl<H: ModuleHost> PackageLoader<LocalRepository, H> {
    /// Create a loader over the configured packages folder.
    pub fn open(config: &LoaderConfig, host: H) -> LoadResult<Self> {
        let repository = LocalRepository::open(&config.packages_dir)?;
        Ok(Self::new(repository, host).with_module_extension(&config.module_extension))
    }
}

impl<R, H, F> PackageLoader<R, H, F>
where
    R: PackageRepository,
    H: ModuleHost,
    F: ReferenceFactory,
{
    /// Use a different reference factory.
    pub fn with_references<G: ReferenceFactory>(self, references: G) -> PackageLoader<R, H, G> {
        PackageLoader {
            repository: self.repository,
            host: self.host,
            references,
            module_extension: self.module_extension,
            paths: self.paths,
            cache: self.cache,
            state: self.state,
        }
    }

    /// Set the module file extension (without the dot).
    pub fn with_module_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.module_extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn module_extension(&self) -> &str {
        &self.module_extension
    }

    /// Resolver over this loader's repository.
    pub fn resolver(&self) -> Resolver<'_, R> {
        Resolver::new(&self.repository)
    }

    /// See [`Resolver::find_candidate`].
    pub fn find_candidate(&self, name: &str, version: Option<&Version>) -> Option<Package> {
        self.resolver().find_candidate(name, version)
    }

    /// See [`Resolver::dependencies`].
    pub fn dependencies(
        &self,
        name: &str,
        version: Option<&Version>,
        profile: &Profile,
    ) -> Option<Dependencies<'_, R>> {
        self.resolver().dependencies(name, version, profile)
    }

    /// Module files `package` provides for `profile`.
    pub fn module_files(&self, package: &Package, profile: &Profile) -> LoadResult<Vec<PathBuf>> {
        assets::module_files(&self.repository, package, profile, &self.module_extension)
    }

    /// Register the modules of each dependency.
    ///
    /// Dependencies are not expanded; pass the full closure if transitive
    /// modules are wanted. A dependency with no matching package is skipped.
    ///
    /// For every module file, the name the module declares maps to the file,
    /// replacing earlier entries. The package id is also mapped to the file,
    /// but only if nothing holds that id yet, so the id alias keeps the first
    /// file registered while module names keep the last.
    ///
    /// Reading a module's declared name can fail; the error is returned and
    /// entries recorded before it are kept.
    pub fn initialize(&mut self, dependencies: &[Dependency], profile: &Profile) -> LoadResult<()> {
        self.state = LoaderState::Initialized;

        let mut registered = 0usize;
        for dependency in dependencies {
            let Some(package) = Resolver::new(&self.repository)
                .find_candidate(&dependency.name, dependency.version.as_ref())
            else {
                debug!(dependency = %dependency, "package not installed, skipping");
                continue;
            };

            let files = assets::module_files(
                &self.repository,
                &package,
                profile,
                &self.module_extension,
            )?;

            for file in files {
                let name = self.host.module_name(&file)?;
                debug!(module = %name, package = %package, path = %file.display(), "registering module");

                self.paths.insert(&name, file.clone());
                if !self.paths.insert_if_absent(&package.id, file) {
                    debug!(package = %package, "package id alias already registered");
                }
                registered += 1;
            }
        }

        info!(
            dependencies = dependencies.len(),
            modules = registered,
            names = self.paths.len(),
            profile = %profile,
            "initialized module paths"
        );
        Ok(())
    }

    /// Load a module by name.
    ///
    /// A name loaded before returns the cached handle without touching the
    /// path map or the file again. Unknown names yield `Ok(None)`.
    pub fn load(&mut self, options: &LoadOptions) -> LoadResult<Option<Arc<H::Module>>> {
        let name = options.module_name.as_str();

        if let Some(module) = self.cache.get(name) {
            return Ok(Some(Arc::clone(module)));
        }

        let Some(path) = self.paths.get(name) else {
            debug!(name, "no module registered");
            return Ok(None);
        };

        let module = Arc::new(self.host.load(path)?);
        info!(name, path = %path.display(), "loaded module");
        self.cache.insert(name, Arc::clone(&module));

        Ok(Some(module))
    }

    /// Compiler reference for the module registered under `name`.
    pub fn resolve_reference(&self, name: &str) -> Option<F::Reference> {
        self.paths
            .get(name)
            .map(|path| self.references.file_reference(path))
    }

    /// Path registered under `name`.
    pub fn module_path(&self, name: &str) -> Option<&Path> {
        self.paths.get(name).map(PathBuf::as_path)
    }

    /// All registered names (lower-cased) with their paths, sorted by name.
    pub fn paths(&self) -> Vec<(&str, &Path)> {
        self.paths
            .sorted()
            .into_iter()
            .map(|(name, path)| (name, path.as_path()))
            .collect()
    }

    /// Number of modules loaded so far.
    pub fn loaded_count(&self) -> usize {
        self.cache.len()
    }
}

impl<R, H, F> ModuleLoader for PackageLoader<R, H, F>
where
    R: PackageRepository,
    H: ModuleHost,
    F: ReferenceFactory,
{
    type Module = H::Module;

    fn load(&mut self, options: &LoadOptions) -> LoadResult<Option<Arc<H::Module>>> {
        PackageLoader::load(self, options)
    }
}

impl<R, H, F> ReferenceResolver for PackageLoader<R, H, F>
where
    R: PackageRepository,
    H: ModuleHost,
    F: ReferenceFactory,
{
    type Reference = F::Reference;

    fn resolve_reference(&self, name: &str) -> Option<F::Reference> {
        PackageLoader::resolve_reference(self, name)
    }
}

impl<R, H, F> DependencyGraph for PackageLoader<R, H, F>
where
    R: PackageRepository,
    H: ModuleHost,
    F: ReferenceFactory,
{
    fn dependencies<'a>(
        &'a self,
        name: &str,
        version: Option<&Version>,
        profile: &Profile,
    ) -> Option<Box<dyn Iterator<Item = Dependency> + 'a>> {
        PackageLoader::dependencies(self, name, version, profile)
            .map(|deps| Box::new(deps) as Box<dyn Iterator<Item = Dependency> + 'a>)
    }

    fn initialize(&mut self, dependencies: &[Dependency], profile: &Profile) -> LoadResult<()> {
        PackageLoader::initialize(self, dependencies, profile)
    }
}
