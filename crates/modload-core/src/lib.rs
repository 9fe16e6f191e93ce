//! Versioned package resolution and module loading.
//!
//! Given named, versioned dependencies and a target runtime profile, this
//! crate finds the matching installed packages, picks the binary modules they
//! provide for that profile, and serves those modules by name:
//!
//! - Profile matching (exact → compatible older version → neutral)
//! - Dependency lookup with version requirements
//! - Module discovery from `lib/<profile>/` or manifest declarations
//! - Name → path registration, lazy loading with a per-name cache
//! - Compiler references by module name
//!
//! # Quick Start
//!
//! ```no_run
//! use modload_core::{Dependency, LoadOptions, LoaderConfig, NativeHost, PackageLoader, Profile};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LoaderConfig::from_env();
//! let mut loader = PackageLoader::open(&config, NativeHost)?;
//! let profile = Profile::parse("net45")?;
//!
//! loader.initialize(&[Dependency::any("Foo")], &profile)?;
//!
//! if let Some(module) = loader.load(&LoadOptions::new("Foo"))? {
//!     println!("loaded {}", module.name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `MODLOAD_PACKAGES_DIR` | Packages folder (default: `~/.modload/packages`) |
//! | `MODLOAD_PROFILE` | Default runtime profile |
//! | `MODLOAD_MODULE_EXT` | Module file extension (default: platform library extension) |

pub mod assets;
pub mod closure;
pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod matcher;
pub mod names;
pub mod profile;
pub mod range;
pub mod reference;
pub mod repository;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types
pub use closure::resolve_closure;
pub use config::LoaderConfig;
pub use error::{LoadError, LoadResult};
pub use host::ModuleHost;
#[cfg(feature = "native")]
pub use host::{NativeHost, NativeModule};
pub use loader::{DependencyGraph, LoaderState, ModuleLoader, PackageLoader, ReferenceResolver};
pub use matcher::{select_compatible, ProfileTagged, Specificity};
pub use names::NameMap;
pub use profile::Profile;
pub use reference::{FileReference, FileReferences, ReferenceFactory};
pub use repository::{LocalRepository, MemoryRepository, PackageRepository, MANIFEST_NAME};
pub use resolver::{Dependencies, Resolver};
pub use range::{Bound, VersionRange};
pub use semver::Version;
pub use types::{Dependency, DependencySet, LoadOptions, ModuleEntry, Package, PackageDependency};
