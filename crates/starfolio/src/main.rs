mod app;
mod cli;
mod commands;
mod logging;
mod markdown;
mod pages;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use starfolio_config::Config;
use starfolio_core::SystemClock;
use starfolio_posts::{FsDocumentStore, PostCollection};
use tracing::info;

use crate::app::App;
use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let overrides = cli.overrides();

    if let Some(command) = &cli.command {
        logging::init_stderr()?;
        let (config, _) = load_config(&cli)?;
        let posts = PostCollection::new(FsDocumentStore::new(overrides.posts_dir(&config)));
        return commands::run(command, &posts, &mut io::stdout().lock());
    }

    let log_path = logging::init_file()?;
    let (config, config_path) = load_config(&cli)?;
    info!(
        log = ?log_path,
        config = ?config_path.clone().or_else(Config::default_path),
        "settings loaded"
    );

    let terminal = ratatui::init();
    let result = App::new(config, config_path, &overrides, Arc::new(SystemClock)).run(terminal);
    ratatui::restore();
    result
}

/// Load settings from `--config` or the default location. The path is only
/// returned for an explicit `--config`.
fn load_config(cli: &Cli) -> color_eyre::Result<(Config, Option<PathBuf>)> {
    match &cli.config {
        Some(path) => Ok((Config::load_from(path)?, Some(path.clone()))),
        None => Ok((Config::load()?, None)),
    }
}
