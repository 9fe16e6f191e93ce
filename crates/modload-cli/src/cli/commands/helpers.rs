//! Shared helpers for CLI commands.

use anyhow::Context;
use modload_core::{Dependency, LoaderConfig, Profile, Version};

use crate::cli::args::GlobalArgs;

/// Environment configuration with command-line overrides applied.
pub fn load_config(global: &GlobalArgs) -> anyhow::Result<LoaderConfig> {
    let mut config = LoaderConfig::from_env();

    if let Some(dir) = &global.packages_dir {
        config = config.with_packages_dir(dir);
    }
    if let Some(profile) = &global.profile {
        config = config.with_profile(Profile::parse(profile)?);
    }
    if let Some(ext) = &global.ext {
        config = config.with_module_extension(ext);
    }

    Ok(config)
}

/// Parse `name` or `name@version`.
pub fn parse_dependency(reference: &str) -> anyhow::Result<Dependency> {
    match reference.split_once('@') {
        Some((name, version)) => {
            anyhow::ensure!(!name.is_empty(), "missing package name in '{reference}'");
            let version = Version::parse(version)
                .with_context(|| format!("invalid version in '{reference}'"))?;
            Ok(Dependency::new(name, version))
        }
        None => {
            anyhow::ensure!(!reference.is_empty(), "empty package reference");
            Ok(Dependency::any(reference))
        }
    }
}

pub fn parse_dependencies(references: &[String]) -> anyhow::Result<Vec<Dependency>> {
    references.iter().map(|s| parse_dependency(s)).collect()
}

/// One line per dependency: `name version` or just `name`.
pub fn format_dependency(dependency: &Dependency) -> String {
    match &dependency.version {
        Some(version) => format!("{} {}", dependency.name, version),
        None => dependency.name.clone(),
    }
}
