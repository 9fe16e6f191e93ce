use modload_core::{resolve_closure, NativeHost, PackageLoader};

use super::helpers::{format_dependency, load_config, parse_dependencies};
use crate::cli::args::{GlobalArgs, PackagesArgs};
use crate::exit_codes::SUCCESS;

pub fn run(global: &GlobalArgs, args: PackagesArgs) -> anyhow::Result<i32> {
    let config = load_config(global)?;
    let profile = config.require_profile()?.clone();
    let roots = parse_dependencies(&args.packages)?;

    let loader = PackageLoader::open(&config, NativeHost)?;
    let closure = resolve_closure(&loader, &roots, &profile);

    if global.json {
        println!("{}", serde_json::to_string_pretty(&closure)?);
    } else {
        for dependency in &closure {
            println!("{}", format_dependency(dependency));
        }
    }

    Ok(SUCCESS)
}
