use anyhow::Result;
use clap::Command;

mod cmd;
mod config;
mod probe;

fn make_app() -> Command {
    Command::new("draftsmith")
        .about("Assemble quantum-computing article pages and repository update plans")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::generate::make_subcommand())
        .subcommand(cmd::plan::make_subcommand())
}

fn main() -> Result<()> {
    let matches = make_app().get_matches();

    match matches.subcommand() {
        Some(("generate", args)) => cmd::generate::execute(args),
        Some(("plan", args)) => cmd::plan::execute(args),
        _ => unreachable!("subcommand required"),
    }
}
