//! Package and dependency types.

use std::fmt;
use std::path::PathBuf;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::matcher::ProfileTagged;
use crate::profile::Profile;
use crate::range::VersionRange;

/// A requested package reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// Package id.
    pub name: String,

    /// Exact version, or `None` for "whatever the repository lists first".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
}

impl Dependency {
    /// Dependency on an exact version.
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version: Some(version),
        }
    }

    /// Dependency without a version.
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}

/// One installed package version, as described by its manifest.
///
/// ```yaml
/// id: Foo
/// version: 1.0.0
/// dependency_sets:
///   - profile: net45
///     dependencies:
///       - id: Bar
///         version: ">=1.0, <=2.0"
/// modules:
///   - path: lib/net40/Foo.dll
///     profiles: [net40]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Package id.
    pub id: String,

    /// Package version.
    pub version: Version,

    /// Dependency groups, one per runtime profile.
    #[serde(default)]
    pub dependency_sets: Vec<DependencySet>,

    /// Per-file module compatibility declarations.
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

impl Package {
    /// Package with no dependencies or module declarations.
    pub fn new(id: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            version,
            dependency_sets: Vec::new(),
            modules: Vec::new(),
        }
    }

    /// Add a dependency set.
    pub fn with_dependency_set(mut self, set: DependencySet) -> Self {
        self.dependency_sets.push(set);
        self
    }

    /// Add a module declaration.
    pub fn with_module(mut self, module: ModuleEntry) -> Self {
        self.modules.push(module);
        self
    }

    /// Whether `id` names this package (ASCII case-insensitive).
    pub fn is(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

/// A profile-tagged group of package dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencySet {
    /// Profile the group applies to; `None` applies to any profile.
    #[serde(default)]
    pub profile: Option<Profile>,

    /// Dependencies in declaration order.
    #[serde(default)]
    pub dependencies: Vec<PackageDependency>,
}

impl DependencySet {
    pub fn new(profile: Option<Profile>) -> Self {
        Self {
            profile,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, id: impl Into<String>, version: VersionRange) -> Self {
        self.dependencies.push(PackageDependency {
            id: id.into(),
            version,
        });
        self
    }
}

impl ProfileTagged for DependencySet {
    fn profiles(&self) -> &[Profile] {
        self.profile.as_slice()
    }
}

/// A declared dependency on another package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDependency {
    /// Package id.
    pub id: String,

    /// Accepted versions.
    #[serde(default)]
    pub version: VersionRange,
}

/// A module file declared by a package, relative to its install directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Path relative to the package install directory.
    pub path: PathBuf,

    /// Profiles the module supports; empty means any.
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl ModuleEntry {
    pub fn new(path: impl Into<PathBuf>, profiles: Vec<Profile>) -> Self {
        Self {
            path: path.into(),
            profiles,
        }
    }
}

impl ProfileTagged for ModuleEntry {
    fn profiles(&self) -> &[Profile] {
        &self.profiles
    }
}

/// Options for loading a module by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Declared module name (or package id alias).
    pub module_name: String,
}

impl LoadOptions {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }
}
