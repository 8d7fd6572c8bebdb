use anyhow::Result;
use chrono::Local;
use clap::{Arg, ArgMatches, Command};
use std::fs;
use std::path::Path;

use draftsmith_core::instructions::pr_checklist;
use draftsmith_core::{meta, pretty, render_document, slug, Manifest};

use crate::config::DraftsmithConfig;
use crate::probe;

pub fn add_generate_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .value_name("FILE")
                .help("TOML manifest describing the document")
                .default_value("./draft.toml"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output HTML file (defaults to the title slug)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./draftsmith.toml"),
        )
}

pub fn add_repo_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("repo-root")
                .short('r')
                .long("repo-root")
                .value_name("DIR")
                .help("Local checkout of the site repository")
                .default_value("."),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Plan as if no repository paths exist instead of probing")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn make_subcommand() -> Command {
    add_repo_args(add_generate_args(Command::new("generate")))
        .about("Render the manifest into a formatted HTML page and print the update plan")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let draftsmith_config = DraftsmithConfig::load(args)?;
    let build_config = draftsmith_config.build_config();

    let document = Manifest::read(Path::new(&build_config.manifest))?.into_document()?;

    let today = Local::now().date_naive();
    let html = render_document(&document, today)?;
    let formatted = pretty::format_html(&html);

    let output = if build_config.output.is_empty() {
        slug::filename_for(&document.metadata.title)
    } else {
        build_config.output.clone()
    };
    fs::write(&output, formatted)?;

    println!("Page written to {}", output);

    // A generated page always ships with its index instructions.
    let probe = probe::select(build_config.offline, &build_config.repo_root);
    let plan = meta::plan(&document, probe.as_ref(), today)?;
    println!();
    println!("{}", plan.to_text());
    println!("{}", pr_checklist(&document));

    Ok(())
}
