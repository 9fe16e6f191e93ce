use anyhow::Context;
use modload_core::{Dependency, NativeHost, PackageLoader, Version};

use super::helpers::{format_dependency, load_config};
use crate::cli::args::{DepsArgs, GlobalArgs};
use crate::exit_codes::{NOT_FOUND, SUCCESS};

pub fn run(global: &GlobalArgs, args: DepsArgs) -> anyhow::Result<i32> {
    let config = load_config(global)?;
    let profile = config.require_profile()?.clone();
    let version = args
        .package_version
        .as_deref()
        .map(Version::parse)
        .transpose()
        .context("invalid --version")?;

    let loader = PackageLoader::open(&config, NativeHost)?;

    let Some(deps) = loader.dependencies(&args.name, version.as_ref(), &profile) else {
        eprintln!("package not found: {}", args.name);
        return Ok(NOT_FOUND);
    };
    let deps: Vec<Dependency> = deps.collect();

    if global.json {
        println!("{}", serde_json::to_string_pretty(&deps)?);
    } else {
        for dependency in &deps {
            println!("{}", format_dependency(dependency));
        }
    }

    Ok(SUCCESS)
}
