use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "modload",
    version,
    about = "Resolve package dependencies and module paths for a runtime profile"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Packages folder (overrides MODLOAD_PACKAGES_DIR)
    #[arg(long = "packages", value_name = "DIR", global = true)]
    pub packages_dir: Option<PathBuf>,

    /// Runtime profile, e.g. net45 (overrides MODLOAD_PROFILE)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Module file extension (overrides MODLOAD_MODULE_EXT)
    #[arg(long, global = true)]
    pub ext: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the direct dependencies of a package
    Deps(DepsArgs),
    /// List the transitive dependency closure of packages
    Closure(PackagesArgs),
    /// Register packages and print the module name → path map
    Paths(PackagesArgs),
}

#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Package id
    pub name: String,

    /// Exact package version (default: first installed)
    #[arg(long = "version", value_name = "VERSION")]
    pub package_version: Option<String>,
}

#[derive(Args, Debug)]
pub struct PackagesArgs {
    /// Packages as `name` or `name@version`
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<String>,
}
