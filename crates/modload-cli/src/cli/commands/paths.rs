use std::collections::BTreeMap;

use modload_core::{NativeHost, PackageLoader};

use super::helpers::{load_config, parse_dependencies};
use crate::cli::args::{GlobalArgs, PackagesArgs};
use crate::exit_codes::SUCCESS;

pub fn run(global: &GlobalArgs, args: PackagesArgs) -> anyhow::Result<i32> {
    let config = load_config(global)?;
    let profile = config.require_profile()?.clone();
    let dependencies = parse_dependencies(&args.packages)?;

    let mut loader = PackageLoader::open(&config, NativeHost)?;
    loader.initialize(&dependencies, &profile)?;

    let paths = loader.paths();

    if global.json {
        let map: BTreeMap<&str, String> = paths
            .iter()
            .map(|(name, path)| (*name, path.display().to_string()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (name, path) in &paths {
            println!("{}\t{}", name, path.display());
        }
    }

    Ok(SUCCESS)
}
