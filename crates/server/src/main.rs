//! SiteData binary: serve the resource API, or manage the document.
//!
//! - `sitedata [serve]` - run the HTTP server
//! - `sitedata init`    - write `sitedata.toml` and create the document
//! - `sitedata dump`    - print the document

mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::ArgMatches;
use sitedata_engine::{Database, SiteDataConfig, CONFIG_FILE_NAME};
use sitedata_executor::Executor;
use tracing_subscriber::EnvFilter;

use commands::build_cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = build_cli().get_matches();
    let (name, sub) = match matches.subcommand() {
        Some((name, sub)) => (name, sub),
        None => ("serve", &matches),
    };

    let config_path = sub
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if name == "init" {
        return run_init(&config_path, sub);
    }

    let config = load_config(&config_path, sub)?;
    let db = open_database(&config, sub.get_flag("ephemeral"))?;

    match name {
        "dump" => {
            let document = db.document().context("Failed to read document")?;
            println!("{}", document.to_pretty_string()?);
            Ok(())
        }
        _ => {
            let executor = Executor::new(db);
            sitedata_server::serve(executor, &config.bind, &config.normalized_base_path())
                .await
                .with_context(|| format!("Server on {} failed", config.bind))
        }
    }
}

/// Config file merged with command-line overrides.
fn load_config(path: &Path, matches: &ArgMatches) -> anyhow::Result<SiteDataConfig> {
    let mut config = SiteDataConfig::load_or_default(path)?;
    if let Some(data) = matches.get_one::<String>("data") {
        config.data_file = PathBuf::from(data);
    }
    if let Some(bind) = matches.get_one::<String>("bind") {
        config.bind = bind.clone();
    }
    config.validate()?;
    Ok(config)
}

fn open_database(config: &SiteDataConfig, ephemeral: bool) -> anyhow::Result<Arc<Database>> {
    if ephemeral {
        tracing::warn!(target: "sitedata::engine", "Ephemeral mode: nothing will be persisted");
        return Ok(Database::ephemeral_with(config.schema()));
    }
    Database::open(config)
        .with_context(|| format!("Failed to open {}", config.data_file.display()))
}

fn run_init(config_path: &Path, matches: &ArgMatches) -> anyhow::Result<()> {
    if SiteDataConfig::write_default_if_missing(config_path)? {
        println!("Created {}", config_path.display());
    } else {
        println!("{} already exists", config_path.display());
    }

    let config = load_config(config_path, matches)?;
    if !matches.get_flag("ephemeral") {
        Database::open(&config)
            .with_context(|| format!("Failed to open {}", config.data_file.display()))?;
        println!("Document ready at {}", config.data_file.display());
    }
    Ok(())
}
