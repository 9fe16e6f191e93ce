use super::super::args::{Cli, Command};

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let global = cli.global;
    match cli.cmd {
        Command::Deps(args) => super::deps::run(&global, args),
        Command::Closure(args) => super::closure::run(&global, args),
        Command::Paths(args) => super::paths::run(&global, args),
    }
}
