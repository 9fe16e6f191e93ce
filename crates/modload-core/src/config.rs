//! Loader configuration.

use std::path::PathBuf;

use tracing::warn;

use crate::error::{LoadError, LoadResult};
use crate::profile::Profile;

/// Loader configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Folder holding installed packages.
    pub packages_dir: PathBuf,

    /// Runtime profile used when a caller does not name one.
    pub profile: Option<Profile>,

    /// Extension of module files, without the dot.
    pub module_extension: String,
}

fn default_packages_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".modload").join("packages"))
        .unwrap_or_else(|| PathBuf::from(".modload/packages"))
}

fn default_module_extension() -> String {
    std::env::consts::DLL_EXTENSION.to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            packages_dir: default_packages_dir(),
            profile: None,
            module_extension: default_module_extension(),
        }
    }
}

impl LoaderConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `MODLOAD_PACKAGES_DIR` | Packages folder (default `~/.modload/packages`) |
    /// | `MODLOAD_PROFILE` | Default runtime profile |
    /// | `MODLOAD_MODULE_EXT` | Module file extension (default: platform library extension) |
    ///
    /// An unparsable `MODLOAD_PROFILE` is ignored with a warning.
    pub fn from_env() -> Self {
        let profile = std::env::var("MODLOAD_PROFILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| match Profile::parse(&v) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(error = %e, "ignoring MODLOAD_PROFILE");
                    None
                }
            });

        Self {
            packages_dir: std::env::var_os("MODLOAD_PACKAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_packages_dir),
            profile,
            module_extension: std::env::var("MODLOAD_MODULE_EXT")
                .ok()
                .map(|v| v.trim().trim_start_matches('.').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_module_extension),
        }
    }

    /// Set the packages folder.
    pub fn with_packages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.packages_dir = dir.into();
        self
    }

    /// Set the default profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the module file extension.
    pub fn with_module_extension(mut self, extension: impl Into<String>) -> Self {
        self.module_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// The configured profile, or an error naming what is missing.
    pub fn require_profile(&self) -> LoadResult<&Profile> {
        self.profile.as_ref().ok_or_else(|| LoadError::Config {
            message: "no runtime profile configured (set MODLOAD_PROFILE or pass --profile)"
                .to_string(),
        })
    }
}
