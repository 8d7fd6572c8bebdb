use anyhow::Result;
use chrono::Local;
use clap::{ArgMatches, Command};
use std::path::Path;

use draftsmith_core::instructions::pr_checklist;
use draftsmith_core::{meta, Manifest};

use crate::cmd::generate::{add_generate_args, add_repo_args};
use crate::config::DraftsmithConfig;
use crate::probe;

pub fn make_subcommand() -> Command {
    add_repo_args(add_generate_args(Command::new("plan")))
        .about("Print the meta.json update plan and pull-request checklist")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let draftsmith_config = DraftsmithConfig::load(args)?;
    let build_config = draftsmith_config.build_config();

    let document = Manifest::read(Path::new(&build_config.manifest))?.into_document()?;

    let probe = probe::select(build_config.offline, &build_config.repo_root);
    let plan = meta::plan(&document, probe.as_ref(), Local::now().date_naive())?;

    println!("{}", plan.to_text());
    println!("{}", pr_checklist(&document));

    Ok(())
}
