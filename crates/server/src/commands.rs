//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("sitedata")
        .about("JSON document store behind a small resource API")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: ./sitedata.toml)")
                .global(true),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .help("JSON document path, overrides data_file")
                .global(true),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .help("Listen address, overrides bind")
                .global(true),
        )
        .arg(
            Arg::new("ephemeral")
                .long("ephemeral")
                .help("In-memory document, nothing written to disk")
                .action(ArgAction::SetTrue)
                .conflicts_with("data")
                .global(true),
        )
        .subcommand(Command::new("serve").about("Serve the resource API (default)"))
        .subcommand(
            Command::new("init").about("Write the default config and create the document"),
        )
        .subcommand(Command::new("dump").about("Print the whole document"))
}
